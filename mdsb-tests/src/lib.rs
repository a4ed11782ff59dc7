#![allow(clippy::unwrap_used)]

#[macro_use]
extern crate log;

use std::{
    fs::File,
    io::{Read, Seek, SeekFrom},
};

use data_encoding::HEXLOWER;
use sha2::{Digest, Sha256};

pub mod imagegen;

/// SHA-256 of a whole image, lower-case hex.
pub fn fingerprint(f: &File) -> String {
    let mut f = f.try_clone().unwrap();
    let mut data = Vec::new();
    f.seek(SeekFrom::Start(0)).unwrap();
    f.read_to_end(&mut data).unwrap();
    HEXLOWER.encode(&Sha256::digest(&data))
}

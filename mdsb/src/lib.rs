#![warn(missing_docs)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::new_without_default)]
#![allow(clippy::upper_case_acronyms)]
#![allow(dead_code)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::print_stdout)]
#![deny(clippy::cast_possible_truncation)]

//! MDSB, a generator for version-1 MD RAID member superblocks.

#[macro_use]
extern crate more_asserts;

#[macro_use]
extern crate log;

#[allow(unused_imports)]
#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate mdsb_macros;

/// Addressing unit of every offset and size field in the superblock.
pub const SECTOR_SIZE: u64 = 512;

/// The superblock's magic number. Appears little-endian at offset 0.
pub const MD_SB_MAGIC: u32 = 0xa92b_4efc;

/// The only superblock major version we write.
pub const MD_SB_MAJOR_VERSION: u32 = 1;

/// Sector offset from the start of the device to the superblock (version 1.2).
pub const SUPER_OFFSET_SECTORS: u64 = 8;

/// Sector offset from the start of the device to the data area.
pub const DATA_OFFSET_SECTORS: u64 = 2048;

/// Byte offset of the superblock.
pub const SUPER_OFFSET_BYTES: u64 = SUPER_OFFSET_SECTORS * SECTOR_SIZE;

/// Byte offset of the data area. Everything before it is reserved for metadata.
pub const DATA_OFFSET_BYTES: u64 = DATA_OFFSET_SECTORS * SECTOR_SIZE;

/// Output images are sized in multiples of this, which keeps 4kB alignment.
pub const ALIGN_BYTES: u64 = 8 * SECTOR_SIZE;

pub use self::{
    config::{MDConfig, PartitionSpec},
    disk::{Disk, DiskFile, DiskMem, DiskObj},
    error::{ConfigError, FormatError, MDError, MDResult, SizingError},
    features::MDFeatures,
    ondisk::*,
};

mod disk;
mod features;
mod ondisk;

/// Error types
pub mod error;

/// Configuration surface of the image generator
pub mod config;

/// Array and device identifiers
pub mod uuid;

/// Functions useful for testing
pub mod test;

/// Implementation for several utilites: mkraid, examine
pub mod operations;

/// Documentation-only module
pub mod doc;

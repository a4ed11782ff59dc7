//!
//! Documentation on the on-disk format written by MDSB
//!
//! An MDSB image is a single member of a Linux MD raid1 array using metadata
//! version 1.2. It can be assembled by the kernel as a degraded mirror.
//!

pub mod checksum;
pub mod superblock;

//! Field table of `mdp_superblock_1`.
//!
//! The record is never transmuted from a Rust struct. Each field is read and
//! written through its [`Field`] descriptor, always little-endian, so the
//! bytes do not depend on host layout or byte order.
#![allow(missing_docs)]

use std::ops::Range;

use endian_codec::{DecodeLE, EncodeLE};

/// Size of the fixed part of the superblock. The role table follows it.
pub const SB_FIXED_SIZE: usize = 256;

/// A field of the superblock: name, byte offset and width.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Field {
    /// Name as used by the kernel header
    pub name:   &'static str,
    /// Byte offset from the start of the record
    pub offset: usize,
    /// Width in bytes
    pub width:  usize,
}

impl Field {
    const fn new(name: &'static str, offset: usize, width: usize) -> Field {
        Field {
            name,
            offset,
            width,
        }
    }
    /// Byte range covered by the field
    #[cfg(feature = "stable")]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
    /// First byte after the field
    #[cfg(feature = "stable")]
    pub const fn end(&self) -> usize {
        self.offset + self.width
    }
    /// Writes a little-endian integer into the field
    #[cfg(feature = "stable")]
    pub fn put<T: EncodeLE>(&self, buf: &mut [u8], value: T) {
        assert_eq!(T::PACKED_LEN, self.width, "{} is {} bytes", self.name, self.width);
        value.encode_as_le_bytes(&mut buf[self.range()]);
    }
    /// Reads a little-endian integer from the field
    #[cfg(feature = "stable")]
    pub fn get<T: DecodeLE>(&self, buf: &[u8]) -> T {
        assert_eq!(T::PACKED_LEN, self.width, "{} is {} bytes", self.name, self.width);
        T::decode_from_le_bytes(&buf[self.range()])
    }
    /// Copies raw bytes into the field
    #[cfg(feature = "stable")]
    pub fn put_bytes(&self, buf: &mut [u8], value: &[u8]) {
        buf[self.range()].copy_from_slice(value);
    }
    /// Raw bytes of the field
    #[cfg(feature = "stable")]
    pub fn bytes<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        &buf[self.range()]
    }
}

// constant array information - 128 bytes
pub const MAGIC: Field = Field::new("magic", 0, 4);
pub const MAJOR_VERSION: Field = Field::new("major_version", 4, 4);
pub const FEATURE_MAP: Field = Field::new("feature_map", 8, 4);
pub const PAD0: Field = Field::new("pad0", 12, 4);
pub const SET_UUID: Field = Field::new("set_uuid", 16, 16);
pub const SET_NAME: Field = Field::new("set_name", 32, 32);
pub const CTIME: Field = Field::new("ctime", 64, 8);
pub const LEVEL: Field = Field::new("level", 72, 4);
pub const LAYOUT: Field = Field::new("layout", 76, 4);
pub const SIZE: Field = Field::new("size", 80, 8);
pub const CHUNKSIZE: Field = Field::new("chunksize", 88, 4);
pub const RAID_DISKS: Field = Field::new("raid_disks", 92, 4);
pub const BITMAP_OFFSET: Field = Field::new("bitmap_offset", 96, 4);
/// new_level, reshape_position, delta_disks, new_layout, new_chunk, new_offset
pub const RESHAPE: Field = Field::new("reshape", 100, 28);

// constant this-device information - 64 bytes
pub const DATA_OFFSET: Field = Field::new("data_offset", 128, 8);
pub const DATA_SIZE: Field = Field::new("data_size", 136, 8);
pub const SUPER_OFFSET: Field = Field::new("super_offset", 144, 8);
pub const RECOVERY_OFFSET: Field = Field::new("recovery_offset", 152, 8);
pub const DEV_NUMBER: Field = Field::new("dev_number", 160, 4);
pub const CNT_CORRECTED_READ: Field = Field::new("cnt_corrected_read", 164, 4);
pub const DEVICE_UUID: Field = Field::new("device_uuid", 168, 16);
pub const DEVFLAGS: Field = Field::new("devflags", 184, 1);
pub const BBLOG_SHIFT: Field = Field::new("bblog_shift", 185, 1);
pub const BBLOG_SIZE: Field = Field::new("bblog_size", 186, 2);
pub const BBLOG_OFFSET: Field = Field::new("bblog_offset", 188, 4);

// array state information - 64 bytes
pub const UTIME: Field = Field::new("utime", 192, 8);
pub const EVENTS: Field = Field::new("events", 200, 8);
pub const RESYNC_OFFSET: Field = Field::new("resync_offset", 208, 8);
pub const SB_CSUM: Field = Field::new("sb_csum", 216, 4);
pub const MAX_DEV: Field = Field::new("max_dev", 220, 4);
pub const PAD3: Field = Field::new("pad3", 224, 32);

/// Every field of the fixed region, in on-disk order.
pub const FIELDS: [Field; 31] = [
    MAGIC,
    MAJOR_VERSION,
    FEATURE_MAP,
    PAD0,
    SET_UUID,
    SET_NAME,
    CTIME,
    LEVEL,
    LAYOUT,
    SIZE,
    CHUNKSIZE,
    RAID_DISKS,
    BITMAP_OFFSET,
    RESHAPE,
    DATA_OFFSET,
    DATA_SIZE,
    SUPER_OFFSET,
    RECOVERY_OFFSET,
    DEV_NUMBER,
    CNT_CORRECTED_READ,
    DEVICE_UUID,
    DEVFLAGS,
    BBLOG_SHIFT,
    BBLOG_SIZE,
    BBLOG_OFFSET,
    UTIME,
    EVENTS,
    RESYNC_OFFSET,
    SB_CSUM,
    MAX_DEV,
    PAD3,
];

/// Byte offset of role table entry `n`
#[cfg(feature = "stable")]
pub const fn dev_role(n: usize) -> Field {
    Field::new("dev_roles", SB_FIXED_SIZE + 2 * n, 2)
}

#[test]
fn fields_tile_fixed_region() {
    let mut pos = 0;
    for f in FIELDS.iter() {
        assert_eq!(f.offset, pos, "gap or overlap before {}", f.name);
        pos = f.end();
    }
    assert_eq!(pos, SB_FIXED_SIZE);
}

#[test]
fn kernel_offsets() {
    assert_eq!(CTIME.offset, 64);
    assert_eq!(DATA_OFFSET.offset, 128);
    assert_eq!(UTIME.offset, 192);
    assert_eq!(SB_CSUM.offset, 216);
    assert_eq!(MAX_DEV.offset, 220);
    assert_eq!(dev_role(1).offset, 258);
}

#[test]
fn put_get() {
    let mut buf = [0u8; SB_FIXED_SIZE];
    MAGIC.put(&mut buf, 0xa92b_4efcu32);
    assert_eq!(&buf[0..4], &[0xfc, 0x4e, 0x2b, 0xa9]);
    BBLOG_OFFSET.put(&mut buf, -16i32);
    assert_eq!(BBLOG_OFFSET.get::<i32>(&buf), -16);
    assert_eq!(MAGIC.get::<u32>(&buf), 0xa92b_4efc);
}

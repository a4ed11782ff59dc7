//!
//! The superblock describes the array and this member's place in it.
//!
//! It lives 4KiB from the start of the device (sector 8). The data area starts at 1MiB (sector 2048),
//! everything in between is reserved for metadata:
//! ```
//! # use mdsb::{Geometry, MDError};
//! let geo = Geometry::plan(Some(4 * 1024 * 1024), None)?;
//! assert_eq!(geo.super_offset(), 8);
//! assert_eq!(geo.data_offset(), 2048);
//! assert_eq!(geo.array_size(), 6144);
//! # Ok::<(), MDError>(())
//! ```
//!
//! Without an explicit size, the image is just large enough for its payload, rounded up to 4KiB:
//! ```
//! # use mdsb::{Geometry, MDError, DATA_OFFSET_BYTES};
//! let geo = Geometry::plan(None, Some(10_000))?;
//! assert_eq!(geo.total_bytes(), DATA_OFFSET_BYTES + 12_288);
//! # Ok::<(), MDError>(())
//! ```
//!
//! Every field is little-endian at a fixed offset, see [layout](crate::layout). The fixed part is 256 bytes,
//! followed by a table of 16-bit device roles. MDSB writes one slot:
//! ```
//! # use mdsb::{encode_superblock, Geometry, SuperblockParams, MDError};
//! let params = SuperblockParams {
//!     label:     "test:1".to_string(),
//!     raid_uuid: None,
//!     disk_uuid: None,
//!     timestamp: Some(1_700_000_000),
//!     geometry:  Geometry::plan(Some(4 * 1024 * 1024), None)?,
//! };
//! let bytes = encode_superblock(&params)?;
//! assert_eq!(bytes.len(), 258);
//! assert_eq!(&bytes[0..4], &[0xfc, 0x4e, 0x2b, 0xa9]);
//! # Ok::<(), MDError>(())
//! ```
//!
//! The array name is at most 31 bytes and always NUL-terminated. Identifiers are generated when not given,
//! so two images only match byte for byte when both identifiers and the timestamp are pinned.
//!
//! No optional [feature](crate::MDFeatures) is ever enabled, so the bitmap and bad-block log offsets are
//! informational only.

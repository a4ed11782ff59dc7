//!
//! Superblocks carry a 32-bit checksum at offset 216.
//!
//! It is the sum of the record's little-endian 32-bit words, with the checksum field read as zero. A
//! trailing 16-bit word is added when the role table has an odd number of slots. The 64-bit sum is folded
//! once:
//! ```
//! # use mdsb::calc_sb_csum;
//! let words = [0xffff_ffffu32, 0xffff_ffff, 2];
//! let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
//! // 0x2_0000_0000 folds to 0x2
//! assert_eq!(calc_sb_csum(&bytes), 2);
//! ```
//!
//! A record read from disk is rejected when its checksum does not match:
//! ```
//! # use mdsb::{operations::examine, test::sbinit::create_sb_mem, MDError, FormatError, SUPER_OFFSET_BYTES};
//! let mut disk = create_sb_mem(4 * 1024 * 1024);
//! assert!(examine(disk.clone()).is_ok());
//! disk.write_at(SUPER_OFFSET_BYTES + 40, b"X")?;
//! assert!(matches!(examine(disk), Err(MDError::Format(FormatError::Checksum { .. }))));
//! # Ok::<(), MDError>(())
//! ```

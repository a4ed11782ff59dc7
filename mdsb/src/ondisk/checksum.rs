//! Superblock checksum.
//!
//! An additive sum of little-endian 32-bit words over the first
//! `256 + 2 * max_dev` bytes, with a trailing 16-bit word if two bytes remain.
//! The 64-bit sum is folded once into 32 bits. Compatible with `calc_sb_1_csum`
//! in mdadm and the kernel; it is not an integrity hash.

use endian_codec::DecodeLE;

use crate::{
    error::{FormatError, MDResult},
    ondisk::layout::{MAX_DEV, SB_CSUM, SB_FIXED_SIZE},
};

/// Largest role table we accept when reading a record back.
pub(crate) const MAX_DEV_LIMIT: u32 = 1920;

/// Number of bytes covered by the checksum of `sb`, taken from its `max_dev`.
#[cfg(feature = "stable")]
pub fn csum_region_len(sb: &[u8]) -> MDResult<usize> {
    assert_or_err!(
        sb.len() >= SB_FIXED_SIZE,
        FormatError::Truncated {
            needed: SB_FIXED_SIZE,
            got:    sb.len(),
        }
    );
    let max_dev = MAX_DEV.get::<u32>(sb);
    assert_or_err!(max_dev <= MAX_DEV_LIMIT, FormatError::MaxDev(max_dev));
    let len = SB_FIXED_SIZE + 2 * max_dev as usize;
    assert_or_err!(
        sb.len() >= len,
        FormatError::Truncated {
            needed: len,
            got:    sb.len(),
        }
    );
    Ok(len)
}

/// Sums `region` as it is. The caller is responsible for the checksum field
/// reading as zero.
#[cfg(feature = "stable")]
#[allow(clippy::cast_possible_truncation)]
pub fn calc_sb_csum(region: &[u8]) -> u32 {
    let mut words = region.chunks_exact(4);
    let mut newcsum: u64 = 0;
    for word in &mut words {
        newcsum += u64::from(u32::decode_from_le_bytes(word));
    }
    let tail = words.remainder();
    debug_assert!(tail.len() % 2 == 0, "odd superblock length");
    if tail.len() == 2 {
        newcsum += u64::from(u16::decode_from_le_bytes(tail));
    }
    let folded = (newcsum & 0xffff_ffff) + (newcsum >> 32);
    (folded & 0xffff_ffff) as u32
}

/// Computes the checksum of `sb` with the checksum field zeroed and stores it.
#[cfg(feature = "stable")]
pub fn inject_checksum(sb: &mut [u8]) -> MDResult<u32> {
    let len = csum_region_len(sb)?;
    SB_CSUM.put(sb, 0u32);
    let csum = calc_sb_csum(&sb[..len]);
    SB_CSUM.put(sb, csum);
    Ok(csum)
}

/// Recomputes the checksum of `sb` and compares it with the stored one.
/// `sb` is left unchanged.
#[cfg(feature = "stable")]
pub fn verify_checksum(sb: &mut [u8]) -> MDResult<()> {
    let len = csum_region_len(sb)?;
    let stored = SB_CSUM.get::<u32>(sb);
    SB_CSUM.put(sb, 0u32);
    let computed = calc_sb_csum(&sb[..len]);
    SB_CSUM.put(sb, stored);
    assert_or_err!(stored == computed, FormatError::Checksum { stored, computed });
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn fold_carries_high_half() {
        // two words of 0xffffffff sum to 0x1_fffffffe, folded to 0xffffffff
        assert_eq!(calc_sb_csum(&[0xff; 8]), 0xffff_ffff);
        // three words: 0x2_fffffffd folds to the same value
        assert_eq!(calc_sb_csum(&[0xff; 12]), 0xffff_ffff);
    }

    #[test]
    fn trailing_halfword() {
        assert_eq!(calc_sb_csum(&[1, 0, 0, 0, 0x34, 0x12]), 0x1235);
        assert_eq!(calc_sb_csum(&[0x34, 0x12]), 0x1234);
    }

    #[test]
    fn inject_then_verify() {
        let mut sb = vec![0u8; SB_FIXED_SIZE + 2];
        MAX_DEV.put(&mut sb, 1u32);
        sb[40] = 0x7f;
        let csum = inject_checksum(&mut sb).unwrap();
        assert_eq!(SB_CSUM.get::<u32>(&sb), csum);
        verify_checksum(&mut sb).unwrap();
        // recomputing over an already checksummed record is stable
        assert_eq!(inject_checksum(&mut sb).unwrap(), csum);

        sb[41] = 1;
        assert!(matches!(
            verify_checksum(&mut sb).unwrap_err().as_format(),
            Some(FormatError::Checksum { .. })
        ));
        assert_eq!(SB_CSUM.get::<u32>(&sb), csum);
    }

    #[test]
    fn region_follows_max_dev() {
        let mut sb = vec![0u8; SB_FIXED_SIZE + 6];
        MAX_DEV.put(&mut sb, 3u32);
        assert_eq!(csum_region_len(&sb).unwrap(), 262);
        MAX_DEV.put(&mut sb, 4u32);
        assert!(csum_region_len(&sb).is_err());
    }
}

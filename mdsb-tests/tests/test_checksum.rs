use mdsb::{
    calc_sb_csum, csum_region_len, inject_checksum,
    layout::{MAGIC, MAX_DEV, SB_CSUM},
    verify_checksum, FormatError, MDError, MD_SB_MAGIC,
};
use mdsb_macros::*;

/// Byte-at-a-time reference: little-endian words, then a trailing halfword.
fn reference(buf: &[u8]) -> u32 {
    let mut sum = 0u64;
    let mut i = 0;
    while i + 4 <= buf.len() {
        sum += buf[i] as u64
            | (buf[i + 1] as u64) << 8
            | (buf[i + 2] as u64) << 16
            | (buf[i + 3] as u64) << 24;
        i += 4;
    }
    if i + 2 == buf.len() {
        sum += buf[i] as u64 | (buf[i + 1] as u64) << 8;
    }
    ((sum & 0xffff_ffff) + (sum >> 32)) as u32
}

fn record(max_dev: u32) -> Vec<u8> {
    let mut buf: Vec<u8> = (0..256 + 2 * max_dev as usize)
        .map(|i| (i * 7 + 3) as u8)
        .collect();
    MAGIC.put(&mut buf, MD_SB_MAGIC);
    MAX_DEV.put(&mut buf, max_dev);
    buf
}

#[test_sb]
fn test_matches_reference() {
    for max_dev in 1..=3 {
        let mut buf = record(max_dev);
        assert_eq!(csum_region_len(&buf).unwrap(), buf.len());
        let csum = inject_checksum(&mut buf).unwrap();
        assert_eq!(SB_CSUM.get::<u32>(&buf), csum);

        let mut zeroed = buf.clone();
        SB_CSUM.put(&mut zeroed, 0u32);
        assert_eq!(csum, reference(&zeroed), "max_dev {}", max_dev);
        assert_eq!(calc_sb_csum(&zeroed), csum);
        verify_checksum(&mut buf).unwrap();
    }
}

#[test_sb]
fn test_region_ignores_trailing_bytes() {
    let mut buf = record(1);
    inject_checksum(&mut buf).unwrap();
    let csum = SB_CSUM.get::<u32>(&buf);
    buf.extend_from_slice(&[0xff; 64]);
    verify_checksum(&mut buf).unwrap();
    assert_eq!(SB_CSUM.get::<u32>(&buf), csum);
}

#[test_sb]
fn test_detects_flip() {
    let mut buf = record(2);
    inject_checksum(&mut buf).unwrap();
    buf[257] ^= 0x01;
    assert!(matches!(
        verify_checksum(&mut buf),
        Err(MDError::Format(FormatError::Checksum { .. }))
    ));
}

#[test_sb]
fn test_truncated_role_table() {
    let mut buf = record(3);
    buf.truncate(258);
    assert!(matches!(
        inject_checksum(&mut buf),
        Err(MDError::Format(FormatError::Truncated {
            needed: 262,
            got:    258,
        }))
    ));
}

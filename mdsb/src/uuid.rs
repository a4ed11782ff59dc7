//! Array and device identifiers in canonical `8-4-4-4-12` hex form.

use std::convert::TryFrom;

use data_encoding::HEXLOWER_PERMISSIVE;
use rand::RngCore;

use crate::error::{MDError, MDResult};

/// Length of a canonical identifier string
pub const UUID_STR_LEN: usize = 36;

const DASHES: [usize; 4] = [8, 13, 18, 23];

/// Parses a canonical identifier into its 16 raw bytes. Hex digits may be
/// upper or lower case.
#[cfg(feature = "stable")]
pub fn parse_uuid(s: &str) -> MDResult<[u8; 16]> {
    let bad = || MDError::Identifier(s.to_string());
    let b = s.as_bytes();
    if b.len() != UUID_STR_LEN || DASHES.iter().any(|i| b[*i] != b'-') {
        return Err(bad());
    }
    let hex: Vec<u8> = b.iter().copied().filter(|c| *c != b'-').collect();
    if hex.len() != 32 {
        return Err(bad());
    }
    let raw = HEXLOWER_PERMISSIVE.decode(&hex).map_err(|_| bad())?;
    <[u8; 16]>::try_from(raw.as_slice()).map_err(|_| bad())
}

/// Formats 16 raw bytes as a canonical lower-case identifier.
#[cfg(feature = "stable")]
pub fn format_uuid(u: &[u8; 16]) -> String {
    let hex = HEXLOWER_PERMISSIVE.encode(u);
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}

/// Generates a random (version 4) identifier in canonical form.
#[cfg(feature = "stable")]
pub fn generate_uuid() -> String {
    let mut u = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut u);
    u[6] = (u[6] & 0x0f) | 0x40;
    u[8] = (u[8] & 0x3f) | 0x80;
    format_uuid(&u)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn parse_canonical() {
        let u = parse_uuid("0123ABCD-4567-89ab-cdef-0011223344ff").unwrap();
        assert_eq!(
            u,
            [
                0x01, 0x23, 0xab, 0xcd, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0x00, 0x11, 0x22, 0x33,
                0x44, 0xff
            ]
        );
        assert_eq!(format_uuid(&u), "0123abcd-4567-89ab-cdef-0011223344ff");
    }

    #[test]
    fn reject_malformed() {
        for s in [
            "",
            "0123abcd456789abcdef0011223344ff",
            "0123abcd-4567-89ab-cdef-0011223344f",
            "0123abcd-4567-89ab-cdef-0011223344fg",
            "0123abcd_4567-89ab-cdef-0011223344ff",
            "0123abcd-4567-89ab-cdef-0011223344ff0",
        ] {
            assert!(matches!(parse_uuid(s), Err(MDError::Identifier(_))), "{}", s);
        }
    }

    #[test]
    fn generated_parse() {
        let a = generate_uuid();
        let b = generate_uuid();
        assert_ne!(a, b);
        let raw = parse_uuid(&a).unwrap();
        assert_eq!(raw[6] >> 4, 4);
        assert_eq!(format_uuid(&raw), a);
    }
}

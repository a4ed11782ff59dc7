use bitvec::prelude::*;
use std::collections::BTreeSet;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

#[repr(u32)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, EnumIter, Debug)]
/// Optional features announced in the superblock's `feature_map`.
/// Discriminants are bit indices.
pub enum MDFeatures {
    /// `bitmap_offset` points at a write-intent bitmap
    BitmapOffset = 0,
    /// `recovery_offset` is meaningful
    RecoveryOffset = 1,
    /// A reshape is in progress
    ReshapeActive = 2,
    /// The bad-block log contains entries
    BadBlocks = 3,
    /// This device is replacing another
    Replacement = 4,
    /// Reshape runs towards lower addresses
    ReshapeBackwards = 5,
    /// `new_offset` is meaningful
    NewOffset = 6,
    /// Bitmap tracks recovery progress
    RecoveryBitmap = 7,
    /// Array is shared by a cluster
    Clustered = 8,
    /// Device is a journal device
    Journal = 9,
    /// Partial parity log
    PPL = 10,
    /// Multiple partial parity logs
    MultiplePPLs = 11,
    /// raid0 layout is recorded
    Raid0Layout = 12,
}

impl MDFeatures {
    /// Returns the feature map we write. Nothing optional is ever enabled.
    #[cfg(feature = "unstable")]
    pub fn current() -> u32 {
        Self::set2bit(&Self::current_set())
    }
    /// Returns the set of features we write
    #[cfg(feature = "unstable")]
    pub fn current_set() -> BTreeSet<MDFeatures> {
        BTreeSet::new()
    }
    /// Converts a feature map to a set of known features
    #[cfg(feature = "stable")]
    pub fn bit2set(map: u32) -> BTreeSet<MDFeatures> {
        let bits = map.view_bits::<Lsb0>();
        MDFeatures::iter().filter(|f| bits[*f as usize]).collect()
    }
    /// Converts a set of features to a feature map
    #[cfg(feature = "stable")]
    pub fn set2bit(set: &BTreeSet<MDFeatures>) -> u32 {
        let mut map = 0u32;
        let bits = map.view_bits_mut::<Lsb0>();
        for f in set {
            bits.set(*f as usize, true);
        }
        map
    }
    /// Bits of `map` that name no known feature
    #[cfg(feature = "stable")]
    pub fn unknown_bits(map: u32) -> u32 {
        map & !Self::set2bit(&MDFeatures::iter().collect())
    }
}

#[test]
fn current_is_empty() {
    assert_eq!(MDFeatures::current(), 0);
    assert!(MDFeatures::bit2set(MDFeatures::current()).is_empty());
}

#[test]
fn bit_mapping() {
    let map = (1 << 0) | (1 << 3) | (1 << 31);
    let set = MDFeatures::bit2set(map);
    assert_eq!(
        set.iter().copied().collect::<Vec<_>>(),
        vec![MDFeatures::BitmapOffset, MDFeatures::BadBlocks]
    );
    assert_eq!(MDFeatures::set2bit(&set), 0b1001);
    assert_eq!(MDFeatures::unknown_bits(map), 1 << 31);
}

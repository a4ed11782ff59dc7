use std::convert::TryFrom;

use strum_macros::{Display, EnumIter};

use crate::error::ConfigError;

/// RAID personalities known to the superblock format.
#[repr(i32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, Display)]
pub enum RaidLevel {
    /// Multipath
    #[strum(serialize = "multipath")]
    Multipath = -4,
    /// Linear concatenation
    #[strum(serialize = "linear")]
    Linear = -1,
    /// Striping
    #[strum(serialize = "raid0")]
    Raid0 = 0,
    /// Mirroring
    #[strum(serialize = "raid1")]
    Raid1 = 1,
    /// Dedicated parity
    #[strum(serialize = "raid4")]
    Raid4 = 4,
    /// Distributed parity
    #[strum(serialize = "raid5")]
    Raid5 = 5,
    /// Double distributed parity
    #[strum(serialize = "raid6")]
    Raid6 = 6,
    /// Striped mirrors
    #[strum(serialize = "raid10")]
    Raid10 = 10,
}

impl TryFrom<i32> for RaidLevel {
    type Error = ConfigError;

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        use strum::IntoEnumIterator;
        RaidLevel::iter()
            .find(|l| *l as i32 == v)
            .ok_or(ConfigError::UnsupportedLevel(v))
    }
}

#[test]
fn known_levels() {
    assert_eq!(RaidLevel::try_from(1), Ok(RaidLevel::Raid1));
    assert_eq!(RaidLevel::try_from(-4), Ok(RaidLevel::Multipath));
    assert_eq!(RaidLevel::try_from(3), Err(ConfigError::UnsupportedLevel(3)));
    assert_eq!(RaidLevel::Raid10.to_string(), "raid10");
}

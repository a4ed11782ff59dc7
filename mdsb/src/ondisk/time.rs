use std::{
    fmt,
    time::{SystemTime, UNIX_EPOCH},
};

/// Superblock timestamp: seconds in the low 40 bits, microseconds in the top 24.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct MDTime(u64);

impl MDTime {
    const SECONDS_MASK: u64 = 0xff_ffff_ffff;

    /// Packs whole seconds since the epoch. Bits above 40 are dropped, the
    /// sub-second part is left zero.
    #[cfg(feature = "stable")]
    pub fn from_secs(secs: u64) -> MDTime {
        MDTime(secs & Self::SECONDS_MASK)
    }
    /// The current wall-clock time, truncated to whole seconds.
    #[cfg(feature = "stable")]
    pub fn now() -> MDTime {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        MDTime::from_secs(secs)
    }
    /// Wraps a raw on-disk value
    #[cfg(feature = "stable")]
    pub fn from_raw(raw: u64) -> MDTime {
        MDTime(raw)
    }
    /// The raw on-disk value
    #[cfg(feature = "stable")]
    pub fn raw(&self) -> u64 {
        self.0
    }
    /// Seconds since the epoch
    #[cfg(feature = "stable")]
    pub fn secs(&self) -> u64 {
        self.0 & Self::SECONDS_MASK
    }
    /// Sub-second part
    #[cfg(feature = "stable")]
    pub fn micros(&self) -> u64 {
        self.0 >> 40
    }
}

impl fmt::Display for MDTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.micros() == 0 {
            write!(f, "{}", self.secs())
        } else {
            write!(f, "{}.{:06}", self.secs(), self.micros())
        }
    }
}

#[test]
fn packs_low_40_bits() {
    let t = MDTime::from_secs(1_700_000_000);
    assert_eq!(t.raw(), 1_700_000_000);
    assert_eq!(t.micros(), 0);
    let t = MDTime::from_secs(u64::MAX);
    assert_eq!(t.raw(), 0xff_ffff_ffff);
    assert_eq!(MDTime::from_raw(5 << 40 | 7).to_string(), "7.000005");
}

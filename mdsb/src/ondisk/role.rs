use std::fmt;

/// Role of a device slot in the superblock's role table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DevRole {
    /// In use at the given array position
    Active(u16),
    /// Spare, no position
    Spare,
    /// Failed, no position
    Faulty,
}

impl DevRole {
    const SPARE: u16 = 0xffff;
    const FAULTY: u16 = 0xfffe;
}

impl From<u16> for DevRole {
    fn from(v: u16) -> DevRole {
        match v {
            DevRole::SPARE => DevRole::Spare,
            DevRole::FAULTY => DevRole::Faulty,
            n => DevRole::Active(n),
        }
    }
}

impl From<DevRole> for u16 {
    fn from(r: DevRole) -> u16 {
        match r {
            DevRole::Active(n) => n,
            DevRole::Spare => DevRole::SPARE,
            DevRole::Faulty => DevRole::FAULTY,
        }
    }
}

impl fmt::Display for DevRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DevRole::Active(n) => write!(f, "Active device {}", n),
            DevRole::Spare => write!(f, "spare"),
            DevRole::Faulty => write!(f, "faulty"),
        }
    }
}

#[test]
fn sentinels() {
    assert_eq!(DevRole::from(0xffff), DevRole::Spare);
    assert_eq!(DevRole::from(0xfffe), DevRole::Faulty);
    assert_eq!(DevRole::from(0), DevRole::Active(0));
    assert_eq!(u16::from(DevRole::Faulty), 0xfffe);
}

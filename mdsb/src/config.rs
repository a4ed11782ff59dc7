//! Options of an mdraid image.
//!
//! Options are read from an INI file:
//!
//! ```ini
//! [mdraid]
//! label = localhost:42
//! level = 1
//! timestamp = 1700000000
//! raid-uuid = 5f2e4c1a-9b3d-4e7f-8a6c-0d1e2f3a4b5c
//! disk-uuid = 0a1b2c3d-4e5f-4a6b-9c7d-8e9fa0b1c2d3
//! size = 64M
//!
//! [partition data]
//! image = rootfs.ext4
//! ```
//!
//! Every key is optional. Only partitions named `data` carry a payload.

use std::{convert::TryFrom, path::PathBuf};

use configparser::ini::Ini;

use crate::error::{ConfigError, MDError, MDResult};

/// Name of the main section
pub const SECTION: &str = "mdraid";
/// Prefix of partition sections
pub const PARTITION_PREFIX: &str = "partition ";
/// The only partition name that carries a payload
pub const DATA_PARTITION: &str = "data";

/// A partition of the image, naming the source of its content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartitionSpec {
    /// Partition name. Only `data` is used.
    pub name:   String,
    /// Source image
    pub image:  Option<PathBuf>,
    /// Byte offset into the source image
    pub offset: u64,
    /// Number of bytes to take, the rest of the source image when `None`
    pub size:   Option<u64>,
}

/// Every option of an mdraid image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MDConfig {
    /// Array name
    pub label:      String,
    /// RAID level. Only 1 is accepted.
    pub level:      i32,
    /// Creation time in seconds, now when `None`
    pub timestamp:  Option<u64>,
    /// Array identifier, generated when `None`
    pub raid_uuid:  Option<String>,
    /// Device identifier, generated when `None`
    pub disk_uuid:  Option<String>,
    /// Image size in bytes, derived from the payload when `None`
    pub size:       Option<u64>,
    /// Partitions
    pub partitions: Vec<PartitionSpec>,
}

impl Default for MDConfig {
    fn default() -> Self {
        MDConfig {
            label:      "localhost:42".to_string(),
            level:      1,
            timestamp:  None,
            raid_uuid:  None,
            disk_uuid:  None,
            size:       None,
            partitions: Vec::new(),
        }
    }
}

impl MDConfig {
    /// Loads options from an INI file.
    #[cfg(feature = "stable")]
    pub fn load(path: &str) -> MDResult<MDConfig> {
        let mut ini = Ini::new();
        ini.load(path).map_err(MDError::Ini)?;
        Self::from_ini(&ini)
    }
    /// Parses options from INI text.
    #[cfg(feature = "stable")]
    pub fn parse(text: &str) -> MDResult<MDConfig> {
        let mut ini = Ini::new();
        ini.read(text.to_string()).map_err(MDError::Ini)?;
        Self::from_ini(&ini)
    }
    fn from_ini(ini: &Ini) -> MDResult<MDConfig> {
        let mut res = MDConfig::default();
        if let Some(label) = ini.get(SECTION, "label") {
            res.label = label;
        }
        if let Some(level) = get_int(ini, SECTION, "level")? {
            res.level = i32::try_from(level).map_err(|_| invalid("level", level))?;
        }
        // negative means unset
        res.timestamp = get_int(ini, SECTION, "timestamp")?.and_then(|t| u64::try_from(t).ok());
        res.raid_uuid = ini.get(SECTION, "raid-uuid").filter(|s| !s.is_empty());
        res.disk_uuid = ini.get(SECTION, "disk-uuid").filter(|s| !s.is_empty());
        res.size = match ini.get(SECTION, "size") {
            Some(s) => Some(parse_size("size", &s)?),
            None => None,
        };

        let mut sections: Vec<String> = ini
            .sections()
            .into_iter()
            .filter(|s| s.starts_with(PARTITION_PREFIX))
            .collect();
        sections.sort();
        for section in sections {
            let name = section[PARTITION_PREFIX.len()..].trim().to_string();
            let offset = match ini.get(&section, "offset") {
                Some(s) => parse_size("offset", &s)?,
                None => 0,
            };
            let size = match ini.get(&section, "size") {
                Some(s) => Some(parse_size("size", &s)?),
                None => None,
            };
            let image = ini.get(&section, "image").map(PathBuf::from);
            // a range needs something to take it from
            assert_or_err!(
                image.is_some() || (offset == 0 && size.is_none()),
                ConfigError::MissingValue("image")
            );
            res.partitions.push(PartitionSpec {
                name,
                image,
                offset,
                size,
            });
        }
        Ok(res)
    }
}

fn get_int(ini: &Ini, section: &str, key: &str) -> MDResult<Option<i64>> {
    ini.getint(section, key).map_err(|_| {
        invalid(key, ini.get(section, key).unwrap_or_default()).into()
    })
}

fn invalid<T: ToString>(key: &str, value: T) -> ConfigError {
    ConfigError::InvalidValue {
        key:   key.to_string(),
        value: value.to_string(),
    }
}

/// Parses a byte count with an optional binary suffix: `k`, `M`, `G` or `T`.
#[cfg(feature = "stable")]
pub fn parse_size(key: &str, s: &str) -> MDResult<u64> {
    let s = s.trim();
    let (digits, shift) = match s.chars().last().map(|c| c.to_ascii_uppercase()) {
        Some('K') => (&s[..s.len() - 1], 10),
        Some('M') => (&s[..s.len() - 1], 20),
        Some('G') => (&s[..s.len() - 1], 30),
        Some('T') => (&s[..s.len() - 1], 40),
        _ => (s, 0),
    };
    digits
        .trim()
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(1u64 << shift))
        .ok_or_else(|| invalid(key, s).into())
}

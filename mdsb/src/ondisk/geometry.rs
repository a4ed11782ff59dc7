use std::convert::TryFrom;

use crate::{
    error::{ConfigError, MDResult, SizingError},
    RaidLevel, ALIGN_BYTES, DATA_OFFSET_BYTES, DATA_OFFSET_SECTORS, SECTOR_SIZE,
    SUPER_OFFSET_SECTORS,
};

/// Rounds `v` up to the next multiple of `align`.
#[cfg(feature = "stable")]
pub fn round_up(v: u64, align: u64) -> u64 {
    ((v + align - 1) / align) * align
}

/// Size of the output container and the size fields derived from it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Geometry {
    total_bytes: u64,
    array_size:  u64,
    data_size:   u64,
}

impl Geometry {
    /// Validates and derives the geometry of a container.
    ///
    /// `requested` is the explicit image size in bytes (`None` or 0 to derive it),
    /// `payload` the number of bytes to embed at the data offset, if any.
    #[cfg(feature = "stable")]
    pub fn plan(requested: Option<u64>, payload: Option<u64>) -> MDResult<Geometry> {
        let reserved = DATA_OFFSET_BYTES;
        let total_bytes = match (requested.filter(|s| *s != 0), payload) {
            (Some(size), payload) => {
                let needed = payload.unwrap_or(0) + reserved;
                assert_or_err!(size >= needed, SizingError::TooSmall { size, needed });
                size
            }
            (None, Some(len)) => {
                let size = round_up(len + reserved, ALIGN_BYTES);
                debug!("Derived image size {} from payload of {} bytes", size, len);
                size
            }
            (None, None) => return Err(ConfigError::MissingGeometry.into()),
        };
        assert_or_err!(
            total_bytes % ALIGN_BYTES == 0,
            SizingError::Unaligned {
                size:  total_bytes,
                align: ALIGN_BYTES,
            }
        );

        let array_size = (total_bytes - reserved) / SECTOR_SIZE;
        let data_size = total_bytes / SECTOR_SIZE - DATA_OFFSET_SECTORS;
        assert_eq!(array_size, data_size);
        Ok(Geometry {
            total_bytes,
            array_size,
            data_size,
        })
    }
    /// Checks the array shape: mirrored, exactly one member.
    #[cfg(feature = "stable")]
    pub fn check_array(level: i32, members: u32) -> MDResult<RaidLevel> {
        let level = RaidLevel::try_from(level)?;
        assert_or_err!(
            level == RaidLevel::Raid1,
            ConfigError::UnsupportedLevel(level as i32)
        );
        assert_or_err!(members == 1, ConfigError::UnsupportedMembers(members));
        Ok(level)
    }
    /// Total container size in bytes
    #[cfg(feature = "stable")]
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }
    /// Total container size in sectors
    #[cfg(feature = "stable")]
    pub fn total_sectors(&self) -> u64 {
        self.total_bytes / SECTOR_SIZE
    }
    /// Usable array capacity in sectors
    #[cfg(feature = "stable")]
    pub fn array_size(&self) -> u64 {
        self.array_size
    }
    /// Usable sectors on the member device
    #[cfg(feature = "stable")]
    pub fn data_size(&self) -> u64 {
        self.data_size
    }
    /// Sector where the data area starts
    #[cfg(feature = "stable")]
    pub fn data_offset(&self) -> u64 {
        DATA_OFFSET_SECTORS
    }
    /// Sector where the superblock lives
    #[cfg(feature = "stable")]
    pub fn super_offset(&self) -> u64 {
        SUPER_OFFSET_SECTORS
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::MDError;

    #[test]
    fn explicit_size() {
        let g = Geometry::plan(Some(4_194_304), None).unwrap();
        assert_eq!(g.array_size(), 6144);
        assert_eq!(g.data_size(), 6144);
        assert_eq!(g.total_sectors(), 8192);
        assert_le!(g.super_offset(), g.data_offset());
    }

    #[test]
    fn derived_from_payload() {
        let g = Geometry::plan(None, Some(1000)).unwrap();
        assert_eq!(g.total_bytes(), DATA_OFFSET_BYTES + 4096);
        let g = Geometry::plan(Some(0), Some(8192)).unwrap();
        assert_eq!(g.total_bytes(), DATA_OFFSET_BYTES + 8192);
    }

    #[test]
    fn unaligned_is_rejected() {
        match Geometry::plan(Some(4_194_305), None) {
            Err(MDError::Sizing(SizingError::Unaligned { size, align })) => {
                assert_eq!(size, 4_194_305);
                assert_eq!(align, 4096);
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn too_small_for_payload() {
        let e = Geometry::plan(Some(2 * 1024 * 1024), Some(1024 * 1024 + 1)).unwrap_err();
        assert_eq!(
            e.as_sizing(),
            Some(&SizingError::TooSmall {
                size:   2 * 1024 * 1024,
                needed: 2 * 1024 * 1024 + 1,
            })
        );
    }

    #[test]
    fn reserved_region_only() {
        let g = Geometry::plan(Some(DATA_OFFSET_BYTES), None).unwrap();
        assert_eq!(g.total_bytes(), DATA_OFFSET_BYTES);
        assert_eq!(g.array_size(), 0);
        assert_eq!(g.data_size(), 0);
        // an empty payload derives the same container
        assert_eq!(Geometry::plan(None, Some(0)).unwrap(), g);
        let e = Geometry::plan(Some(DATA_OFFSET_BYTES - ALIGN_BYTES), None).unwrap_err();
        assert_eq!(
            e.as_sizing(),
            Some(&SizingError::TooSmall {
                size:   DATA_OFFSET_BYTES - ALIGN_BYTES,
                needed: DATA_OFFSET_BYTES,
            })
        );
    }

    #[test]
    fn missing_geometry() {
        let e = Geometry::plan(None, None).unwrap_err();
        assert_eq!(e.as_config(), Some(&ConfigError::MissingGeometry));
    }

    #[test]
    fn only_single_mirror() {
        assert_eq!(Geometry::check_array(1, 1).unwrap(), RaidLevel::Raid1);
        for level in [-4, -1, 0, 4, 5, 6, 10, 7] {
            let e = Geometry::check_array(level, 1).unwrap_err();
            assert_eq!(e.as_config(), Some(&ConfigError::UnsupportedLevel(level)));
        }
        let e = Geometry::check_array(1, 2).unwrap_err();
        assert_eq!(e.as_config(), Some(&ConfigError::UnsupportedMembers(2)));
    }
}

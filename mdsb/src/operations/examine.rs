use crate::{
    error::{FormatError, MDError, MDResult},
    Disk, MDFeatures, Superblock, DATA_OFFSET_SECTORS, MD_SB_MAGIC, SECTOR_SIZE,
    SUPER_OFFSET_BYTES, SUPER_OFFSET_SECTORS,
};

/// Something unusual about an otherwise valid superblock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Finding {
    /// Feature bits we do not know about
    UnknownFeatures(u32),
    /// A sector offset field differs from the layout we write
    UnexpectedOffset {
        /// Field name
        field:    &'static str,
        /// Value on disk
        found:    u64,
        /// Value we write
        expected: u64,
    },
    /// The data area ends past the end of the device
    DataBeyondDisk {
        /// End of the data area in bytes, `u64::MAX` if it is not addressable
        end:  u64,
        /// Device size in bytes
        disk: u64,
    },
    /// The array capacity differs from the member's data area
    SizeMismatch {
        /// Array size in sectors
        array: u64,
        /// Data size in sectors
        data:  u64,
    },
}

/// Checks the superblock of a member device.
///
/// Fails if the superblock can not be read or its checksum is wrong. Anything
/// else worth noting is logged and returned as a [`Finding`].
#[cfg(feature = "unstable")]
pub fn examine(d: Disk) -> MDResult<(Superblock, Vec<Finding>)> {
    info!("Verifying superblock at {}", SUPER_OFFSET_BYTES);
    let sb = match Superblock::read(d.clone()) {
        Ok(sb) => {
            info!("\tOK!");
            sb
        }
        Err(e) => {
            warn!("\tNot OK");
            match &e {
                MDError::Format(FormatError::Magic(m)) => {
                    warn!("\t\tIncorrect magic {:#010x}, expected {:#010x}", m, MD_SB_MAGIC)
                }
                MDError::Format(FormatError::Checksum { stored, computed }) => warn!(
                    "\t\tIncorrect checksum {:#010x}, expected {:#010x}",
                    stored, computed
                ),
                e => warn!("\t\t{}", e),
            }
            return Err(e);
        }
    };

    let mut findings = Vec::new();
    let unknown = MDFeatures::unknown_bits(sb.feature_map());
    if unknown != 0 {
        findings.push(Finding::UnknownFeatures(unknown));
    }
    for (field, found, expected) in [
        ("super_offset", sb.super_offset(), SUPER_OFFSET_SECTORS),
        ("data_offset", sb.data_offset(), DATA_OFFSET_SECTORS),
    ] {
        if found != expected {
            findings.push(Finding::UnexpectedOffset {
                field,
                found,
                expected,
            });
        }
    }
    let disk = d.size()?;
    let end = sb
        .data_offset()
        .checked_add(sb.data_size())
        .and_then(|sectors| sectors.checked_mul(SECTOR_SIZE));
    match end {
        Some(end) if end <= disk => {}
        Some(end) => findings.push(Finding::DataBeyondDisk { end, disk }),
        // past any addressable byte
        None => findings.push(Finding::DataBeyondDisk {
            end: u64::MAX,
            disk,
        }),
    }
    if sb.array_size() != sb.data_size() {
        findings.push(Finding::SizeMismatch {
            array: sb.array_size(),
            data:  sb.data_size(),
        });
    }
    for f in &findings {
        warn!("\t\t{:?}", f);
    }
    Ok((sb, findings))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{ondisk::layout, test::sbinit::create_sb_mem, DiskMem};

    #[test]
    fn clean_image() {
        let d = create_sb_mem(4 << 20);
        let (sb, findings) = examine(d).unwrap();
        assert_eq!(sb.name(), "test:1");
        assert!(findings.is_empty());
    }

    #[test]
    fn blank_disk() {
        let d = DiskMem::open(4 << 20);
        let e = examine(d).unwrap_err();
        assert!(matches!(e, MDError::Format(FormatError::Magic(0))));
    }

    #[test]
    fn truncated_device() {
        let mut d = create_sb_mem(4 << 20);
        d.set_size(2 << 20).unwrap();
        let (_, findings) = examine(d).unwrap();
        assert_eq!(
            findings,
            vec![Finding::DataBeyondDisk {
                end:  4 << 20,
                disk: 2 << 20,
            }]
        );
    }

    #[test]
    fn huge_data_size() {
        let d = create_sb_mem(4 << 20);
        let mut buf = Superblock::read(d.clone()).unwrap().encode();
        layout::DATA_SIZE.put(&mut buf, u64::MAX / 2);
        layout::SIZE.put(&mut buf, u64::MAX / 2);
        let mut sb = Superblock::decode(&buf).unwrap();
        sb.write(d.clone()).unwrap();
        let (_, findings) = examine(d).unwrap();
        assert_eq!(
            findings,
            vec![Finding::DataBeyondDisk {
                end:  u64::MAX,
                disk: 4 << 20,
            }]
        );
    }

    #[test]
    fn foreign_features() {
        let mut d = create_sb_mem(4 << 20);
        let mut sb = Superblock::read(d.clone()).unwrap();
        let mut buf = sb.encode();
        layout::FEATURE_MAP.put(&mut buf, 1u32 << 20);
        sb = Superblock::decode(&buf).unwrap();
        sb.write(d.clone()).unwrap();
        let (_, findings) = examine(d.clone()).unwrap();
        assert_eq!(findings, vec![Finding::UnknownFeatures(1 << 20)]);

        // checksum no longer matches
        let mut byte = [0u8; 1];
        d.read_at(SUPER_OFFSET_BYTES + 32, &mut byte).unwrap();
        d.write_at(SUPER_OFFSET_BYTES + 32, &[byte[0] ^ 0xff]).unwrap();
        assert!(matches!(
            examine(d),
            Err(MDError::Format(FormatError::Checksum { .. }))
        ));
    }
}

use derivative::Derivative;

use crate::{
    config::{MDConfig, PartitionSpec, DATA_PARTITION},
    error::{ConfigError, MDResult, SizingError},
    uuid::parse_uuid,
    Disk, DiskFile, Geometry, Superblock, SuperblockParams, DATA_OFFSET_BYTES,
    SUPER_OFFSET_BYTES,
};

/// A byte range of a source image, embedded at the data offset.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct Payload {
    /// Partition the payload comes from
    pub name:   String,
    #[derivative(Debug = "ignore")]
    source:     Disk,
    /// Byte offset into the source image
    pub offset: u64,
    /// Length in bytes
    pub len:    u64,
}

/// Everything needed to write an image, validated.
#[derive(Clone, Debug)]
pub struct Plan {
    /// Superblock inputs, geometry included
    pub params:  SuperblockParams,
    /// Optional payload
    pub payload: Option<Payload>,
}

impl Plan {
    /// Container geometry
    #[cfg(feature = "stable")]
    pub fn geometry(&self) -> &crate::Geometry {
        &self.params.geometry
    }
}

/// Validates a configuration, opening partition images from the filesystem.
#[cfg(feature = "unstable")]
pub fn setup(cfg: &MDConfig) -> MDResult<Plan> {
    setup_with(cfg, |part| match &part.image {
        Some(path) => Ok(Some(DiskFile::open_ro(path)?)),
        None => Ok(None),
    })
}

/// Validates a configuration. `resolve` opens the source image of a
/// partition, if it has one.
#[cfg(feature = "unstable")]
pub fn setup_with<F>(cfg: &MDConfig, mut resolve: F) -> MDResult<Plan>
where
    F: FnMut(&PartitionSpec) -> MDResult<Option<Disk>>,
{
    Geometry::check_array(cfg.level, 1)?;
    for uuid in cfg.raid_uuid.iter().chain(cfg.disk_uuid.iter()) {
        parse_uuid(uuid)?;
    }

    let mut payload: Option<Payload> = None;
    let mut data_seen = false;
    for part in &cfg.partitions {
        if part.name != DATA_PARTITION {
            info!(
                "MDRAID partition has to be called '{}' instead of '{}'",
                DATA_PARTITION, part.name
            );
            continue;
        }
        assert_or_err!(!data_seen, ConfigError::TooManyDataSources);
        data_seen = true;
        if let Some(source) = resolve(part)? {
            info!("MDRAID using data from [{}]: {:?}", part.name, part.image);
            payload = Some(payload_range(part, source)?);
        }
    }
    if payload.is_none() {
        info!("MDRAID is created without data.");
    }

    let geometry = Geometry::plan(cfg.size, payload.as_ref().map(|p| p.len))?;
    debug!("{:?}", geometry);

    Ok(Plan {
        params: SuperblockParams {
            label: cfg.label.clone(),
            raid_uuid: cfg.raid_uuid.clone(),
            disk_uuid: cfg.disk_uuid.clone(),
            timestamp: cfg.timestamp,
            geometry,
        },
        payload,
    })
}

fn payload_range(part: &PartitionSpec, source: Disk) -> MDResult<Payload> {
    let source_len = source.size()?;
    let len = match part.size {
        Some(len) => len,
        None => source_len.saturating_sub(part.offset),
    };
    assert_or_err!(
        part.offset.checked_add(len).map_or(false, |end| end <= source_len),
        SizingError::PayloadOutOfRange {
            offset: part.offset,
            len,
            source_len,
        }
    );
    Ok(Payload {
        name: part.name.clone(),
        source,
        offset: part.offset,
        len,
    })
}

/// Writes the image described by `plan` to `out`.
///
/// The superblock is built and checksummed before `out` is touched. `out` is
/// then resized to the container size, zero-filled, and receives the
/// superblock at sector 8 and the payload at the data offset.
#[cfg(feature = "unstable")]
pub fn generate(plan: &Plan, mut out: Disk) -> MDResult<Superblock> {
    let mut sb = Superblock::new(&plan.params)?;
    sb.update_checksum();
    let bytes = sb.encode();
    let total = plan.geometry().total_bytes();
    assert_le!(SUPER_OFFSET_BYTES + bytes.len() as u64, DATA_OFFSET_BYTES);

    out.set_size(0)?;
    out.set_size(total)?;
    out.write_at(SUPER_OFFSET_BYTES, &bytes)?;
    info!(
        "Wrote {} byte superblock at {}, checksum {:#010x}",
        bytes.len(),
        SUPER_OFFSET_BYTES,
        sb.checksum()
    );
    if let Some(p) = &plan.payload {
        out.copy_from(&p.source, p.offset, p.len, DATA_OFFSET_BYTES)?;
        info!("Inserted {} bytes of [{}] at {}", p.len, p.name, DATA_OFFSET_BYTES);
    }
    out.sync()?;
    Ok(sb)
}

/// Validates `cfg` and writes the image to `out`.
#[cfg(feature = "unstable")]
pub fn mkraid(cfg: &MDConfig, out: Disk) -> MDResult<Superblock> {
    let plan = setup(cfg)?;
    generate(&plan, out)
}

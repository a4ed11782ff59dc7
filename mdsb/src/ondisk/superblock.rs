use crate::{
    error::{FormatError, MDResult},
    ondisk::{
        checksum::{calc_sb_csum, csum_region_len, MAX_DEV_LIMIT},
        layout::*,
    },
    uuid::{generate_uuid, parse_uuid},
    DevRole, Disk, Geometry, MDFeatures, MDTime, MD_SB_MAGIC, MD_SB_MAJOR_VERSION,
    SUPER_OFFSET_BYTES,
};

/// Width of the array name field. The last byte is always NUL.
pub const SB_NAME_LEN: usize = 32;

const BITMAP_OFFSET_SECTORS: i32 = 8;
const BBLOG_SHIFT_DEFAULT: u8 = 9;
const BBLOG_SIZE_SECTORS: u16 = 8;
const BBLOG_OFFSET_SECTORS: i32 = 16;

/// Logical inputs of a superblock.
#[derive(Clone, Debug)]
pub struct SuperblockParams {
    /// Array name. Clipped to 31 bytes.
    pub label:     String,
    /// Array identifier in canonical form, generated when `None`
    pub raid_uuid: Option<String>,
    /// Device identifier in canonical form, generated when `None`
    pub disk_uuid: Option<String>,
    /// Creation time in seconds since the epoch, now when `None`
    pub timestamp: Option<u64>,
    /// Validated container geometry
    pub geometry:  Geometry,
}

/// A version-1 MD superblock for one member device.
///
/// The in-memory form holds the logical values only. Bytes are produced by
/// [`Superblock::encode`] through the field table in [`crate::layout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Superblock {
    feature_map:        u32,
    set_uuid:           [u8; 16],
    set_name:           [u8; SB_NAME_LEN],
    ctime:              MDTime,
    level:              i32,
    layout:             u32,
    size:               u64,
    chunksize:          u32,
    raid_disks:         u32,
    bitmap_offset:      i32,
    data_offset:        u64,
    data_size:          u64,
    super_offset:       u64,
    recovery_offset:    u64,
    dev_number:         u32,
    cnt_corrected_read: u32,
    device_uuid:        [u8; 16],
    devflags:           u8,
    bblog_shift:        u8,
    bblog_size:         u16,
    bblog_offset:       i32,
    utime:              MDTime,
    events:             u64,
    resync_offset:      u64,
    checksum:           u32,
    dev_roles:          Vec<u16>,
}

impl Superblock {
    /// Creates the superblock of a new single-device raid1 array.
    ///
    /// Missing identifiers are generated and a missing timestamp is read from
    /// the wall clock. The checksum is left zero until [`Superblock::update_checksum`].
    #[cfg(feature = "unstable")]
    pub fn new(params: &SuperblockParams) -> MDResult<Superblock> {
        let raid_uuid = params.raid_uuid.clone().unwrap_or_else(generate_uuid);
        let disk_uuid = params.disk_uuid.clone().unwrap_or_else(generate_uuid);
        let ctime = params.timestamp.map(MDTime::from_secs).unwrap_or_else(MDTime::now);
        let geo = &params.geometry;

        let mut set_name = [0u8; SB_NAME_LEN];
        let label = params.label.as_bytes();
        let n = label.len().min(SB_NAME_LEN - 1);
        set_name[..n].copy_from_slice(&label[..n]);
        if n < label.len() {
            debug!("Array name {:?} clipped to {} bytes", params.label, n);
        }

        Ok(Superblock {
            feature_map: MDFeatures::current(),
            set_uuid: parse_uuid(&raid_uuid)?,
            set_name,
            ctime,
            level: 1,
            layout: 0,
            size: geo.array_size(),
            chunksize: 0,
            raid_disks: 1,
            bitmap_offset: BITMAP_OFFSET_SECTORS,
            data_offset: geo.data_offset(),
            data_size: geo.data_size(),
            super_offset: geo.super_offset(),
            recovery_offset: 0,
            dev_number: 0,
            cnt_corrected_read: 0,
            device_uuid: parse_uuid(&disk_uuid)?,
            devflags: 0,
            bblog_shift: BBLOG_SHIFT_DEFAULT,
            bblog_size: BBLOG_SIZE_SECTORS,
            bblog_offset: BBLOG_OFFSET_SECTORS,
            utime: MDTime::default(),
            events: 0,
            resync_offset: 0,
            checksum: 0,
            dev_roles: vec![0; 1],
        })
    }
    /// Size of the encoded record: fixed part plus two bytes per device slot.
    #[cfg(feature = "stable")]
    pub fn size(&self) -> usize {
        SB_FIXED_SIZE + 2 * self.dev_roles.len()
    }
    /// Serializes every field at its fixed offset, checksum as currently stored.
    #[cfg(feature = "stable")]
    #[allow(clippy::cast_possible_truncation)]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = vec![0u8; self.size()];
        MAGIC.put(&mut buf, MD_SB_MAGIC);
        MAJOR_VERSION.put(&mut buf, MD_SB_MAJOR_VERSION);
        FEATURE_MAP.put(&mut buf, self.feature_map);
        SET_UUID.put_bytes(&mut buf, &self.set_uuid);
        SET_NAME.put_bytes(&mut buf, &self.set_name);
        CTIME.put(&mut buf, self.ctime.raw());
        LEVEL.put(&mut buf, self.level);
        LAYOUT.put(&mut buf, self.layout);
        SIZE.put(&mut buf, self.size);
        CHUNKSIZE.put(&mut buf, self.chunksize);
        RAID_DISKS.put(&mut buf, self.raid_disks);
        BITMAP_OFFSET.put(&mut buf, self.bitmap_offset);

        DATA_OFFSET.put(&mut buf, self.data_offset);
        DATA_SIZE.put(&mut buf, self.data_size);
        SUPER_OFFSET.put(&mut buf, self.super_offset);
        RECOVERY_OFFSET.put(&mut buf, self.recovery_offset);
        DEV_NUMBER.put(&mut buf, self.dev_number);
        CNT_CORRECTED_READ.put(&mut buf, self.cnt_corrected_read);
        DEVICE_UUID.put_bytes(&mut buf, &self.device_uuid);
        DEVFLAGS.put(&mut buf, self.devflags);
        BBLOG_SHIFT.put(&mut buf, self.bblog_shift);
        BBLOG_SIZE.put(&mut buf, self.bblog_size);
        BBLOG_OFFSET.put(&mut buf, self.bblog_offset);

        UTIME.put(&mut buf, self.utime.raw());
        EVENTS.put(&mut buf, self.events);
        RESYNC_OFFSET.put(&mut buf, self.resync_offset);
        SB_CSUM.put(&mut buf, self.checksum);
        // the role table length is bounded by MAX_DEV_LIMIT
        MAX_DEV.put(&mut buf, self.dev_roles.len() as u32);

        for (i, role) in self.dev_roles.iter().enumerate() {
            dev_role(i).put(&mut buf, *role);
        }
        buf
    }
    /// Parses a superblock from its on-disk bytes. Checks magic, version and
    /// length, but not the checksum.
    #[cfg(feature = "stable")]
    pub fn decode(buf: &[u8]) -> MDResult<Superblock> {
        check_head(buf)?;
        let len = csum_region_len(buf)?;

        let mut set_uuid = [0u8; 16];
        set_uuid.copy_from_slice(SET_UUID.bytes(buf));
        let mut set_name = [0u8; SB_NAME_LEN];
        set_name.copy_from_slice(SET_NAME.bytes(buf));
        let mut device_uuid = [0u8; 16];
        device_uuid.copy_from_slice(DEVICE_UUID.bytes(buf));
        let dev_roles = (0..(len - SB_FIXED_SIZE) / 2)
            .map(|i| dev_role(i).get::<u16>(buf))
            .collect();

        Ok(Superblock {
            feature_map: FEATURE_MAP.get(buf),
            set_uuid,
            set_name,
            ctime: MDTime::from_raw(CTIME.get(buf)),
            level: LEVEL.get(buf),
            layout: LAYOUT.get(buf),
            size: SIZE.get(buf),
            chunksize: CHUNKSIZE.get(buf),
            raid_disks: RAID_DISKS.get(buf),
            bitmap_offset: BITMAP_OFFSET.get(buf),
            data_offset: DATA_OFFSET.get(buf),
            data_size: DATA_SIZE.get(buf),
            super_offset: SUPER_OFFSET.get(buf),
            recovery_offset: RECOVERY_OFFSET.get(buf),
            dev_number: DEV_NUMBER.get(buf),
            cnt_corrected_read: CNT_CORRECTED_READ.get(buf),
            device_uuid,
            devflags: DEVFLAGS.get(buf),
            bblog_shift: BBLOG_SHIFT.get(buf),
            bblog_size: BBLOG_SIZE.get(buf),
            bblog_offset: BBLOG_OFFSET.get(buf),
            utime: MDTime::from_raw(UTIME.get(buf)),
            events: EVENTS.get(buf),
            resync_offset: RESYNC_OFFSET.get(buf),
            checksum: SB_CSUM.get(buf),
            dev_roles,
        })
    }
    /// Computes the checksum the record should carry.
    #[cfg(feature = "stable")]
    pub fn calc_checksum(&self) -> u32 {
        let mut buf = self.encode();
        SB_CSUM.put(&mut buf, 0u32);
        calc_sb_csum(&buf)
    }
    /// Verifies our checksum
    #[cfg(feature = "stable")]
    pub fn verify_checksum(&self) -> bool {
        self.checksum == self.calc_checksum()
    }
    /// Updates our checksum. Needed after any field changes.
    #[cfg(feature = "stable")]
    pub fn update_checksum(&mut self) {
        self.checksum = self.calc_checksum();
    }
    /// Reads a superblock from disk.
    #[cfg(feature = "stable")]
    pub fn read(d: Disk) -> MDResult<Superblock> {
        let res = read_record(d)?;
        let computed = res.calc_checksum();
        assert_or_err!(
            res.checksum == computed,
            FormatError::Checksum {
                stored: res.checksum,
                computed,
            }
        );
        Ok(res)
    }
    /// Reads a superblock from disk without verifying its checksum.
    #[cfg(feature = "unstable")]
    pub fn read_unchecked(d: Disk) -> MDResult<Superblock> {
        read_record(d)
    }
    /// Writes a superblock to disk, refreshing the checksum first.
    #[cfg(feature = "stable")]
    pub fn write(&mut self, mut d: Disk) -> MDResult<()> {
        self.update_checksum();
        d.write_at(SUPER_OFFSET_BYTES, &self.encode())?;
        Ok(())
    }
    /// Getter for feature_map
    #[cfg(feature = "stable")]
    pub fn feature_map(&self) -> u32 {
        self.feature_map
    }
    /// Getter for the array identifier
    #[cfg(feature = "stable")]
    pub fn set_uuid(&self) -> &[u8; 16] {
        &self.set_uuid
    }
    /// The array name up to its first NUL
    #[cfg(feature = "stable")]
    pub fn name(&self) -> String {
        let end = self
            .set_name
            .iter()
            .position(|c| *c == 0)
            .unwrap_or(SB_NAME_LEN);
        String::from_utf8_lossy(&self.set_name[..end]).into_owned()
    }
    /// Getter for the raw name field
    #[cfg(feature = "stable")]
    pub fn set_name(&self) -> &[u8; SB_NAME_LEN] {
        &self.set_name
    }
    /// Getter for ctime
    #[cfg(feature = "stable")]
    pub fn ctime(&self) -> MDTime {
        self.ctime
    }
    /// Getter for level
    #[cfg(feature = "stable")]
    pub fn level(&self) -> i32 {
        self.level
    }
    /// Getter for layout
    #[cfg(feature = "stable")]
    pub fn layout(&self) -> u32 {
        self.layout
    }
    /// Array size in sectors
    #[cfg(feature = "stable")]
    pub fn array_size(&self) -> u64 {
        self.size
    }
    /// Getter for chunksize
    #[cfg(feature = "stable")]
    pub fn chunksize(&self) -> u32 {
        self.chunksize
    }
    /// Getter for raid_disks
    #[cfg(feature = "stable")]
    pub fn raid_disks(&self) -> u32 {
        self.raid_disks
    }
    /// Getter for bitmap_offset
    #[cfg(feature = "stable")]
    pub fn bitmap_offset(&self) -> i32 {
        self.bitmap_offset
    }
    /// Getter for data_offset
    #[cfg(feature = "stable")]
    pub fn data_offset(&self) -> u64 {
        self.data_offset
    }
    /// Getter for data_size
    #[cfg(feature = "stable")]
    pub fn data_size(&self) -> u64 {
        self.data_size
    }
    /// Getter for super_offset
    #[cfg(feature = "stable")]
    pub fn super_offset(&self) -> u64 {
        self.super_offset
    }
    /// Getter for recovery_offset
    #[cfg(feature = "stable")]
    pub fn recovery_offset(&self) -> u64 {
        self.recovery_offset
    }
    /// Getter for dev_number
    #[cfg(feature = "stable")]
    pub fn dev_number(&self) -> u32 {
        self.dev_number
    }
    /// Getter for cnt_corrected_read
    #[cfg(feature = "stable")]
    pub fn cnt_corrected_read(&self) -> u32 {
        self.cnt_corrected_read
    }
    /// Getter for the device identifier
    #[cfg(feature = "stable")]
    pub fn device_uuid(&self) -> &[u8; 16] {
        &self.device_uuid
    }
    /// Getter for devflags
    #[cfg(feature = "stable")]
    pub fn devflags(&self) -> u8 {
        self.devflags
    }
    /// Bad-block log geometry: shift, size, offset
    #[cfg(feature = "stable")]
    pub fn bblog(&self) -> (u8, u16, i32) {
        (self.bblog_shift, self.bblog_size, self.bblog_offset)
    }
    /// Getter for utime
    #[cfg(feature = "stable")]
    pub fn utime(&self) -> MDTime {
        self.utime
    }
    /// Getter for events
    #[cfg(feature = "stable")]
    pub fn events(&self) -> u64 {
        self.events
    }
    /// Getter for resync_offset
    #[cfg(feature = "stable")]
    pub fn resync_offset(&self) -> u64 {
        self.resync_offset
    }
    /// Getter for checksum
    #[cfg(feature = "stable")]
    pub fn checksum(&self) -> u32 {
        self.checksum
    }
    /// Number of role table slots
    #[cfg(feature = "stable")]
    pub fn max_dev(&self) -> usize {
        self.dev_roles.len()
    }
    /// Role of slot `n`
    #[cfg(feature = "stable")]
    pub fn dev_role(&self, n: usize) -> Option<DevRole> {
        self.dev_roles.get(n).map(|r| DevRole::from(*r))
    }
}

/// Reads the fixed part to learn `max_dev`, then the whole record.
fn read_record(mut d: Disk) -> MDResult<Superblock> {
    let mut head = vec![0u8; SB_FIXED_SIZE];
    d.read_at(SUPER_OFFSET_BYTES, &mut head)?;
    check_head(&head)?;
    let max_dev = MAX_DEV.get::<u32>(&head);
    assert_or_err!(max_dev <= MAX_DEV_LIMIT, FormatError::MaxDev(max_dev));
    let mut buf = vec![0u8; SB_FIXED_SIZE + 2 * max_dev as usize];
    d.read_at(SUPER_OFFSET_BYTES, &mut buf)?;
    Superblock::decode(&buf)
}

/// Length, magic and version of a fixed region.
fn check_head(buf: &[u8]) -> MDResult<()> {
    assert_or_err!(
        buf.len() >= SB_FIXED_SIZE,
        FormatError::Truncated {
            needed: SB_FIXED_SIZE,
            got:    buf.len(),
        }
    );
    let magic = MAGIC.get::<u32>(buf);
    assert_or_err!(magic == MD_SB_MAGIC, FormatError::Magic(magic));
    let version = MAJOR_VERSION.get::<u32>(buf);
    assert_or_err!(
        version == MD_SB_MAJOR_VERSION,
        FormatError::Version(version)
    );
    Ok(())
}

/// Builds, checksums and serializes the superblock described by `params`.
#[cfg(feature = "unstable")]
pub fn encode_superblock(params: &SuperblockParams) -> MDResult<Vec<u8>> {
    let mut sb = Superblock::new(params)?;
    sb.update_checksum();
    Ok(sb.encode())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{test::sbinit, DiskMem, MDError};

    fn params(label: &str) -> SuperblockParams {
        SuperblockParams {
            label:     label.to_string(),
            raid_uuid: Some(sbinit::RAID_UUID.to_string()),
            disk_uuid: Some(sbinit::DISK_UUID.to_string()),
            timestamp: Some(sbinit::TIMESTAMP),
            geometry:  Geometry::plan(Some(4 << 20), None).unwrap(),
        }
    }

    #[test]
    fn scenario_bytes() {
        let buf = encode_superblock(&params("test:1")).unwrap();
        assert_eq!(buf.len(), 258);
        assert_eq!(&buf[0..8], &[0xfc, 0x4e, 0x2b, 0xa9, 0x01, 0x00, 0x00, 0x00]);
        assert_eq!(&buf[32..39], b"test:1\0");
        assert_eq!(SIZE.get::<u64>(&buf), 6144);
        assert_eq!(DATA_SIZE.get::<u64>(&buf), 6144);
        assert_eq!(DATA_OFFSET.get::<u64>(&buf), 2048);
        assert_eq!(SUPER_OFFSET.get::<u64>(&buf), 8);
        assert_eq!(RECOVERY_OFFSET.get::<u64>(&buf), 0);
        assert_eq!(BBLOG_SHIFT.get::<u8>(&buf), 9);
        assert_eq!(MAX_DEV.get::<u32>(&buf), 1);
        assert_eq!(&buf[256..258], &[0, 0]);
        assert_eq!(SB_CSUM.get::<u32>(&buf), 0xb2b5_d419);
    }

    #[test]
    fn deterministic() {
        let a = encode_superblock(&params("test:1")).unwrap();
        let b = encode_superblock(&params("test:1")).unwrap();
        assert_eq!(a, b);
        let mut p = params("test:1");
        p.raid_uuid = None;
        assert_ne!(encode_superblock(&p).unwrap(), a);
    }

    #[test]
    fn label_is_clipped() {
        let long = "x".repeat(40);
        let sb = Superblock::new(&params(&long)).unwrap();
        assert_eq!(sb.name(), "x".repeat(31));
        assert_eq!(sb.set_name()[31], 0);
        let buf = encode_superblock(&params(&long)).unwrap();
        assert_eq!(SB_CSUM.get::<u32>(&buf), 0x8a06_012e);
    }

    #[test]
    fn decode_matches() {
        let mut sb = Superblock::new(&params("test:1")).unwrap();
        assert!(!sb.verify_checksum());
        sb.update_checksum();
        let back = Superblock::decode(&sb.encode()).unwrap();
        assert_eq!(back, sb);
        assert_eq!(back.dev_role(0), Some(DevRole::Active(0)));
        assert_eq!(back.dev_role(1), None);
        assert_eq!(back.bblog(), (9, 8, 16));
        assert_eq!(back.ctime().secs(), sbinit::TIMESTAMP);
    }

    #[test]
    fn disk_round_trip() {
        let d = DiskMem::open(8192);
        let mut sb = Superblock::new(&params("test:1")).unwrap();
        sb.write(d.clone()).unwrap();
        assert_eq!(Superblock::read(d).unwrap(), sb);
    }

    #[test]
    fn bad_records() {
        let mut buf = encode_superblock(&params("test:1")).unwrap();
        assert!(matches!(
            Superblock::decode(&buf[..100]),
            Err(MDError::Format(FormatError::Truncated { needed: 256, got: 100 }))
        ));
        MAJOR_VERSION.put(&mut buf, 0u32);
        assert!(matches!(
            Superblock::decode(&buf),
            Err(MDError::Format(FormatError::Version(0)))
        ));
        MAJOR_VERSION.put(&mut buf, 1u32);
        MAX_DEV.put(&mut buf, 5000u32);
        let mut d = DiskMem::open(8192);
        d.write_at(SUPER_OFFSET_BYTES, &buf).unwrap();
        assert!(matches!(
            Superblock::read_unchecked(d),
            Err(MDError::Format(FormatError::MaxDev(5000)))
        ));
    }
}

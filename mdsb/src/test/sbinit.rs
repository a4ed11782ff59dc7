use crate::{
    operations::{generate, setup_with},
    Disk, DiskFile, DiskMem, MDConfig, PartitionSpec, Superblock,
};

pub const RAID_UUID: &str = "5f2e4c1a-9b3d-4e7f-8a6c-0d1e2f3a4b5c";
pub const DISK_UUID: &str = "0a1b2c3d-4e5f-4a6b-9c7d-8e9fa0b1c2d3";
pub const TIMESTAMP: u64 = 1_700_000_000;

/// Fully pinned options: output depends on nothing but `size`.
pub fn fixed_config(size: u64) -> MDConfig {
    MDConfig {
        label: "test:1".to_string(),
        timestamp: Some(TIMESTAMP),
        raid_uuid: Some(RAID_UUID.to_string()),
        disk_uuid: Some(DISK_UUID.to_string()),
        size: Some(size),
        ..Default::default()
    }
}

pub fn write_sb(cfg: &MDConfig, d: Disk) -> Superblock {
    let plan = setup_with(cfg, |_| Ok(None)).unwrap();
    generate(&plan, d).unwrap()
}

pub fn create_sb_mem(size: u64) -> Disk {
    let d = DiskMem::open(0);
    write_sb(&fixed_config(size), d.clone());
    d
}

pub fn create_sb_file(name: &str, size: u64) -> Disk {
    let d = DiskFile::open(name).unwrap();
    write_sb(&fixed_config(size), d.clone());
    d
}

/// Writes a derived-size image carrying `payload` in its data area.
pub fn create_sb_payload(payload: Vec<u8>) -> (Disk, Superblock) {
    let mut cfg = fixed_config(0);
    cfg.size = None;
    cfg.partitions.push(PartitionSpec {
        name: "data".to_string(),
        image: Some("payload.img".into()),
        ..Default::default()
    });
    let source = DiskMem::from_vec(payload);
    let plan = setup_with(&cfg, |_| Ok(Some(source.clone()))).unwrap();
    let d = DiskMem::open(0);
    let sb = generate(&plan, d.clone()).unwrap();
    (d, sb)
}

use std::fs::File;

use mdsb::{MDConfig, PartitionSpec};

/// Size of every fixed-size test image
pub const IMAGE_SIZE: u64 = 4 * 1024 * 1024;

pub const RAID_UUID: &str = "5f2e4c1a-9b3d-4e7f-8a6c-0d1e2f3a4b5c";
pub const DISK_UUID: &str = "0a1b2c3d-4e5f-4a6b-9c7d-8e9fa0b1c2d3";

pub fn create_file(f: &File, n: u64) {
    f.set_len(0).unwrap();
    f.set_len(n).unwrap();
}

pub fn get_disk(f: &File) -> mdsb::Disk {
    mdsb::DiskFile::open_file(f.try_clone().unwrap()).unwrap()
}

pub fn fixed_config() -> MDConfig {
    MDConfig {
        label: "test:1".to_string(),
        timestamp: Some(1_700_000_000),
        raid_uuid: Some(RAID_UUID.to_string()),
        disk_uuid: Some(DISK_UUID.to_string()),
        size: Some(IMAGE_SIZE),
        ..Default::default()
    }
}

pub fn data_partition() -> PartitionSpec {
    PartitionSpec {
        name: "data".to_string(),
        image: Some("payload.img".into()),
        ..Default::default()
    }
}

/// Bytes `0, 1, .., 250, 0, 1, ..`
pub fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

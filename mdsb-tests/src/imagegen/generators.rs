use std::fs::File;

use mdsb::{
    layout::{MAGIC, MAJOR_VERSION, SET_NAME},
    operations::{generate, setup_with},
    DiskMem, Superblock, MD_SB_MAGIC, MD_SB_MAJOR_VERSION, SUPER_OFFSET_BYTES,
};

use super::utils::*;

/// Zero-filled file
pub fn generate_0000(f: &File) {
    debug!("Generating image 0000");
    create_file(f, IMAGE_SIZE)
}

/// Valid magic and version, nothing else
pub fn generate_0001(f: &File) {
    generate_0000(f);
    debug!("Generating image 0001");

    let mut d = get_disk(f);
    let mut head = [0u8; 8];
    MAGIC.put(&mut head, MD_SB_MAGIC);
    MAJOR_VERSION.put(&mut head, MD_SB_MAJOR_VERSION);
    d.write_at(SUPER_OFFSET_BYTES, &head).unwrap();
}

/// Valid image with every input pinned
pub fn generate_0002(f: &File) {
    debug!("Generating image 0002");
    let plan = setup_with(&fixed_config(), |_| Ok(None)).unwrap();
    generate(&plan, get_disk(f)).unwrap();
}

/// Array name changed behind the checksum's back
pub fn generate_0003(f: &File) {
    generate_0002(f);
    debug!("Generating image 0003");

    let mut d = get_disk(f);
    d.write_at(SUPER_OFFSET_BYTES + SET_NAME.offset as u64, b"evil:2")
        .unwrap();
}

/// Changed array name with a valid checksum
pub fn generate_0004(f: &File) {
    generate_0003(f);
    debug!("Generating image 0004");

    let d = get_disk(f);
    let mut sb = Superblock::read_unchecked(d.clone()).unwrap();
    let stale = sb.checksum();
    sb.write(d).unwrap();
    info!("Checksum {:#010x} replaced by {:#010x}", stale, sb.checksum());
}

/// Image sized after a 10000 byte payload
pub fn generate_0005(f: &File) {
    debug!("Generating image 0005");
    let mut cfg = fixed_config();
    cfg.size = None;
    cfg.partitions.push(data_partition());
    let source = DiskMem::from_vec(pattern(10_000));
    let plan = setup_with(&cfg, |_| Ok(Some(source.clone()))).unwrap();
    generate(&plan, get_disk(f)).unwrap();
}

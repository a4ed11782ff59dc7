#![allow(clippy::all)]

use std::convert::TryFrom;

use mdsb::{operations::examine, uuid::format_uuid, DiskFile, RaidLevel};

fn main() {
    mdsb::test::logging::init_log();

    let path = std::env::args().nth(1).unwrap();
    let d = DiskFile::open_ro(&path).unwrap();
    let (sb, findings) = match examine(d) {
        Ok(res) => res,
        Err(e) => {
            eprintln!("{}: {}", path, e);
            std::process::exit(1);
        }
    };
    println!("          Magic : {:08x}", mdsb::MD_SB_MAGIC);
    println!("        Version : 1.2");
    println!("     Array UUID : {}", format_uuid(sb.set_uuid()));
    println!("           Name : {}", sb.name());
    println!("  Creation Time : {}", sb.ctime());
    match RaidLevel::try_from(sb.level()) {
        Ok(level) => println!("     Raid Level : {}", level),
        Err(_) => println!("     Raid Level : unknown ({})", sb.level()),
    }
    println!("   Raid Devices : {}", sb.raid_disks());
    println!("     Array Size : {} sectors", sb.array_size());
    println!("    Data Offset : {} sectors", sb.data_offset());
    println!("   Super Offset : {} sectors", sb.super_offset());
    println!("    Device UUID : {}", format_uuid(sb.device_uuid()));
    println!("       Checksum : {:08x} - correct", sb.checksum());
    for i in 0..sb.max_dev() {
        if let Some(role) = sb.dev_role(i) {
            println!("    Device Role : {}", role);
        }
    }
    std::process::exit(if findings.is_empty() { 0 } else { 2 });
}

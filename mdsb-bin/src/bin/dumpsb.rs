#![allow(clippy::all)]

use mdsb::*;

use colored::*;
use strum::IntoEnumIterator;

fn main() {
    let path = std::env::args().nth(1).unwrap();
    let mut d = DiskFile::open_ro(&path).unwrap();
    println!("Image is {} bytes long", d.size().unwrap());

    let mut head = vec![0u8; SB_FIXED_SIZE];
    d.read_at(SUPER_OFFSET_BYTES, &mut head).unwrap();
    let max_dev = layout::MAX_DEV.get::<u32>(&head).min(8);
    let mut buf = vec![0u8; SB_FIXED_SIZE + 2 * max_dev as usize];
    d.read_at(SUPER_OFFSET_BYTES, &mut buf).unwrap();

    let magic_ok = layout::MAGIC.get::<u32>(&buf) == MD_SB_MAGIC;
    let csum_ok = verify_checksum(&mut buf).is_ok();
    for field in FIELDS.iter() {
        let hex: String = field
            .bytes(&buf)
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();
        let line = format!("{:>4} {:<20} {}", field.offset, field.name, hex);
        match field.name {
            "magic" if magic_ok => println!("{}", line.green()),
            "magic" => println!("{}", line.red()),
            "sb_csum" if csum_ok => println!("{}", line.green()),
            "sb_csum" => println!("{}", line.red()),
            _ => println!("{}", line),
        }
    }
    for i in 0..max_dev as usize {
        let f = layout::dev_role(i);
        println!(
            "{:>4} {:<20} {}",
            f.offset,
            format!("dev_roles[{}]", i),
            DevRole::from(f.get::<u16>(&buf))
        );
    }

    let map = layout::FEATURE_MAP.get::<u32>(&buf);
    for feat in MDFeatures::iter() {
        let on = MDFeatures::bit2set(map).contains(&feat);
        println!("{:?}: {}", feat, if on { "on".yellow() } else { "off".normal() });
    }
    if MDFeatures::unknown_bits(map) != 0 {
        println!("{}", format!("unknown features {:#x}", MDFeatures::unknown_bits(map)).red());
    }
}

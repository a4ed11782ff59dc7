#![allow(clippy::all)]

use clap::Parser;
use mdsb::{
    config::parse_size, operations::mkraid, DiskFile, MDConfig, MDResult, PartitionSpec,
    Superblock,
};

/// Writes a single-member raid1 image.
#[derive(Parser)]
struct Cli {
    /// INI file with an [mdraid] section
    #[arg(short, long)]
    config: Option<String>,
    /// Output image
    output: String,
    /// Array name
    #[arg(short, long)]
    label: Option<String>,
    /// Image size, e.g. 64M
    #[arg(short, long)]
    size: Option<String>,
    /// Creation time in seconds since the epoch
    #[arg(long)]
    timestamp: Option<u64>,
    /// Array identifier
    #[arg(long)]
    raid_uuid: Option<String>,
    /// Device identifier
    #[arg(long)]
    disk_uuid: Option<String>,
    /// Image to embed in the data area
    #[arg(short, long)]
    data: Option<String>,
}

fn main() {
    mdsb::test::logging::init_log();
    let args = Cli::parse();
    let output = args.output.clone();

    match run(args) {
        Ok(sb) => println!(
            "{}: {} sectors, checksum {:#010x}",
            output,
            sb.array_size(),
            sb.checksum()
        ),
        Err(e) => {
            eprintln!("mkraid: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(args: Cli) -> MDResult<Superblock> {
    let output = args.output.clone();
    let cfg = configure(args)?;
    mkraid(&cfg, DiskFile::open(&output)?)
}

/// Loads the INI file, if any, and applies command line overrides.
fn configure(args: Cli) -> MDResult<MDConfig> {
    let mut cfg = match &args.config {
        Some(path) => MDConfig::load(path)?,
        None => MDConfig::default(),
    };
    if let Some(label) = args.label {
        cfg.label = label;
    }
    if let Some(size) = &args.size {
        cfg.size = Some(parse_size("size", size)?);
    }
    if args.timestamp.is_some() {
        cfg.timestamp = args.timestamp;
    }
    if args.raid_uuid.is_some() {
        cfg.raid_uuid = args.raid_uuid;
    }
    if args.disk_uuid.is_some() {
        cfg.disk_uuid = args.disk_uuid;
    }
    if let Some(data) = args.data {
        cfg.partitions.retain(|p| p.name != "data");
        cfg.partitions.push(PartitionSpec {
            name: "data".to_string(),
            image: Some(data.into()),
            ..Default::default()
        });
    }
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdsb::{ConfigError, MDError};

    #[test]
    fn bad_size_is_an_error() {
        let args = Cli::try_parse_from(["mkraid", "--size", "lots", "out.img"]).unwrap();
        let e = configure(args).unwrap_err();
        assert!(matches!(
            e.as_config(),
            Some(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn missing_config_is_an_error() {
        let args =
            Cli::try_parse_from(["mkraid", "-c", "/nonexistent/mdraid.ini", "out.img"]).unwrap();
        assert!(matches!(configure(args), Err(MDError::Ini(_))));
    }

    #[test]
    fn overrides() {
        let args = Cli::try_parse_from([
            "mkraid", "-l", "test:1", "-s", "4M", "-d", "rootfs.img", "out.img",
        ])
        .unwrap();
        let cfg = configure(args).unwrap();
        assert_eq!(cfg.label, "test:1");
        assert_eq!(cfg.size, Some(4 << 20));
        assert_eq!(cfg.partitions.len(), 1);
        assert_eq!(cfg.partitions[0].name, "data");
    }
}

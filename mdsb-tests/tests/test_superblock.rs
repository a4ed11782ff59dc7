use mdsb::{DevRole, FormatError, MDError, Superblock};
use mdsb_macros::*;
use mdsb_tests::imagegen::generators::*;

#[test_sb]
fn test_err_magic() {
    let img = generate_image!(0);

    let d = load_image!(img);
    assert!(matches!(
        Superblock::read(d),
        Err(MDError::Format(FormatError::Magic(0)))
    ));
}

#[test_sb]
fn test_err_checksum() {
    let img = generate_image!(1);

    let d = load_image!(img);
    match Superblock::read(d) {
        Err(MDError::Format(FormatError::Checksum { stored, computed })) => {
            assert_eq!(stored, 0);
            assert_eq!(computed, 0xa92b_4efd);
        }
        other => panic!("{:?}", other),
    }
}

#[test_sb]
fn test_valid() {
    let img = generate_image!(2);

    let d = load_image!(img);
    let sb = Superblock::read(d).unwrap();
    assert_eq!(sb.name(), "test:1");
    assert_eq!(sb.level(), 1);
    assert_eq!(sb.raid_disks(), 1);
    assert_eq!(sb.array_size(), 6144);
    assert_eq!(sb.data_size(), 6144);
    assert_eq!(sb.data_offset(), 2048);
    assert_eq!(sb.super_offset(), 8);
    assert_eq!(sb.feature_map(), 0);
    assert_eq!(sb.max_dev(), 1);
    assert_eq!(sb.dev_role(0), Some(DevRole::Active(0)));
    assert_eq!(sb.checksum(), 0xb2b5_d419);
    assert_eq!(
        mdsb::uuid::format_uuid(sb.set_uuid()),
        "5f2e4c1a-9b3d-4e7f-8a6c-0d1e2f3a4b5c"
    );
}

#[test_sb]
fn test_err_tampered_name() {
    let img = generate_image!(3);

    let d = load_image!(img);
    assert!(matches!(
        Superblock::read(d.clone()),
        Err(MDError::Format(FormatError::Checksum { .. }))
    ));
    let sb = Superblock::read_unchecked(d).unwrap();
    assert_eq!(sb.name(), "evil:2");
    assert!(!sb.verify_checksum());
}

#[test_sb]
fn test_rechecksummed() {
    let img = generate_image!(4);

    let d = load_image!(img);
    let sb = Superblock::read(d).unwrap();
    assert_eq!(sb.name(), "evil:2");
    assert!(sb.verify_checksum());
}

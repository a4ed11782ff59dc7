pub use self::{
    checksum::{calc_sb_csum, csum_region_len, inject_checksum, verify_checksum},
    geometry::{round_up, Geometry},
    layout::{Field, FIELDS, SB_FIXED_SIZE},
    level::RaidLevel,
    role::DevRole,
    superblock::{encode_superblock, Superblock, SuperblockParams, SB_NAME_LEN},
    time::MDTime,
};

mod checksum;
mod geometry;
/// Byte layout of the version-1 superblock
pub mod layout;
mod level;
mod role;
mod superblock;
mod time;

/// Superblock verification of an existing image
pub mod examine;
/// Image generation
pub mod mkraid;

pub use examine::{examine, Finding};
pub use mkraid::{generate, mkraid, setup, setup_with, Payload, Plan};

//! Error types for MDSB
//!
//! Every failure is fatal to the generation request that raised it. Nothing is
//! retried and nothing is written once an error has been returned.

use thiserror::Error;

/// Result type alias for MDSB operations
pub type MDResult<T> = std::result::Result<T, MDError>;

/// Main error type for MDSB
#[derive(Error, Debug)]
pub enum MDError {
    /// The requested array cannot be expressed by this generator
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The container cannot hold the requested layout
    #[error("Sizing error: {0}")]
    Sizing(#[from] SizingError),

    /// A textual identifier is not in canonical form
    #[error("Malformed identifier: {0:?}")]
    Identifier(String),

    /// On-disk bytes are not a valid superblock
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// The configuration file could not be read
    #[error("Config file error: {0}")]
    Ini(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors. Raised before any bytes are produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Only mirrored arrays are generated
    #[error("only raid level 1 (mirror) is supported, got {0}")]
    UnsupportedLevel(i32),

    /// Only single-member arrays are generated
    #[error("only one member device is supported, got {0}")]
    UnsupportedMembers(u32),

    /// More than one partition named `data`
    #[error("cannot contain more than one data partition")]
    TooManyDataSources,

    /// Neither an image size nor a payload to derive it from
    #[error("image size is unset and there is no payload to derive it from")]
    MissingGeometry,

    /// A required option is absent
    #[error("missing option {0}")]
    MissingValue(&'static str),

    /// An option could not be interpreted
    #[error("invalid value {value:?} for option {key}")]
    InvalidValue {
        /// Option name
        key:   String,
        /// Offending text
        value: String,
    },
}

/// Sizing errors. Raised before any bytes are produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SizingError {
    /// The container cannot fit the reserved region plus the payload
    #[error("image size {size} is too small, at least {needed} bytes are needed")]
    TooSmall {
        /// Requested size in bytes
        size:   u64,
        /// Minimum size in bytes
        needed: u64,
    },

    /// The container size is not a multiple of the alignment
    #[error("image size {size} has to be aligned to {align} bytes")]
    Unaligned {
        /// Requested size in bytes
        size:  u64,
        /// Required alignment in bytes
        align: u64,
    },

    /// The payload range does not lie within its source image
    #[error("payload range {offset}+{len} exceeds source image of {source_len} bytes")]
    PayloadOutOfRange {
        /// Offset into the source image
        offset:     u64,
        /// Length of the range
        len:        u64,
        /// Size of the source image
        source_len: u64,
    },
}

/// Decode-side errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Magic number mismatch
    #[error("bad magic {0:#010x}")]
    Magic(u32),

    /// Major version other than 1
    #[error("unsupported major version {0}")]
    Version(u32),

    /// Stored checksum does not match the contents
    #[error("checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    Checksum {
        /// Value found in the record
        stored:   u32,
        /// Value computed over the record
        computed: u32,
    },

    /// Buffer too short for the declared record
    #[error("superblock needs {needed} bytes, got {got}")]
    Truncated {
        /// Bytes required
        needed: usize,
        /// Bytes available
        got:    usize,
    },

    /// Role table larger than the metadata area can hold
    #[error("max_dev {0} is out of range")]
    MaxDev(u32),
}

impl MDError {
    /// The configuration error, if this is one
    pub fn as_config(&self) -> Option<&ConfigError> {
        match self {
            MDError::Config(e) => Some(e),
            _ => None,
        }
    }
    /// The sizing error, if this is one
    pub fn as_sizing(&self) -> Option<&SizingError> {
        match self {
            MDError::Sizing(e) => Some(e),
            _ => None,
        }
    }
    /// The format error, if this is one
    pub fn as_format(&self) -> Option<&FormatError> {
        match self {
            MDError::Format(e) => Some(e),
            _ => None,
        }
    }
}

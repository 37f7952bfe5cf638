use std::path::PathBuf;

use thiserror::Error;

/// Errors returned to callers that misuse the carousel API.
///
/// Runtime conditions such as missing metrics, empty item lists or stale
/// timer fires are not errors; the engine absorbs them and logs.
#[derive(Error, Debug)]
pub enum CarouselError {
    #[error("Dot navigation is only available on index tracks")]
    JumpUnsupported,

    #[error("Item index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid carousel configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read carousel settings from {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse carousel settings: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, CarouselError>;

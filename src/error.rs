// error.rs - Every error the library view can surface.
//
// RUST NOTE: `thiserror` derives `std::error::Error` and `Display` from the
// `#[error(...)]` attributes, and `#[from]` generates the `From` impls that
// let `?` convert a lower-level error into ours automatically.

use serde::Serialize;

/// Failure of the one-shot library load (network, file or JSON problems).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("HTTP {code} from {url}")]
    Status { code: u16, url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed library JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Load was cancelled before it finished")]
    Cancelled,
}

/// Bucket generation was asked to reduce over an empty game list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot compute playtime buckets for an empty library")]
pub struct EmptyInputError;

/// Problems reading or validating `config.json`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No fetchUrl configured (set it in config.json or STEAMSHELF_FETCH_URL)")]
    MissingFetchUrl,

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Could not resolve the OS config directory")]
    NoConfigDir,
}

/// Umbrella error handed back across the IPC boundary and out of the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Custom(String),
}

// Tauri requires error types to implement Serialize for IPC transport.
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors raised while loading or validating configuration.
pub enum ConfigError {
    /// The port variable did not parse as a number.
    #[error("invalid port value '{value}': {source}")]
    PortParseError {
        /// Raw value.
        value: String,
        /// Parse failure.
        source: std::num::ParseIntError,
    },

    /// Port 0 is not usable.
    #[error("invalid port: {value}")]
    InvalidPort {
        /// Raw value.
        value: String,
    },

    /// The bind address did not parse.
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        /// Raw value.
        value: String,
        /// Parse failure.
        source: std::net::AddrParseError,
    },

    /// A configured path does not exist.
    #[error("path not found: {path}")]
    PathNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Expected a file, found something else.
    #[error("not a file: {path}")]
    NotAFile {
        /// The offending path.
        path: PathBuf,
    },

    /// Expected a directory, found something else.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// Similarity threshold outside `[0, 1]`.
    #[error("similarity threshold must be in [0, 1], got {value}")]
    InvalidThreshold {
        /// Configured value.
        value: f32,
    },

    /// Top-K must be at least 1.
    #[error("top-k must be at least 1")]
    InvalidTopK,

    /// Ingest batch size must be at least 1.
    #[error("ingest batch size must be at least 1")]
    InvalidBatchSize,
}

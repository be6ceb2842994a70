//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `BANDSCORE_*` environment
//! variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::retrieval::{DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOP_K};

/// Default chat model; `genai` routes by model name.
pub const DEFAULT_CHAT_MODEL: &str = "mistral-small-latest";

/// Default embeddings endpoint (OpenAI-compatible).
pub const DEFAULT_EMBED_URL: &str = "https://api.mistral.ai/v1/embeddings";

/// Default embedding model.
pub const DEFAULT_EMBED_MODEL: &str = "mistral-embed";

/// Default Qdrant URL used when `BANDSCORE_QDRANT_URL` is not set.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `BANDSCORE_*` overrides on top of
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Qdrant endpoint URL. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    /// Chat model used for scoring. Default: `mistral-small-latest`.
    pub chat_model: String,

    /// Embeddings endpoint URL.
    pub embed_url: String,

    /// Embedding model name.
    pub embed_model: String,

    /// API key for the embeddings endpoint. Unset means stub embeddings.
    pub embed_api_key: Option<String>,

    /// Path to the labeled essay CSV (required for `--ingest`).
    pub dataset_path: Option<PathBuf>,

    /// Directory for the ingest snapshot. Default: `./.data`.
    pub store_path: PathBuf,

    /// References retrieved per scoring request. Default: `5`.
    pub top_k: u64,

    /// Minimum similarity for a reference to be used. Default: `0.7`.
    pub similarity_threshold: f32,

    /// Rows upserted per ingest batch. Default: `2`.
    pub ingest_batch_size: usize,

    /// Pause between ingest batches, in milliseconds. Default: `3000`.
    pub ingest_delay_ms: u64,

    /// Serve canned completions instead of calling the provider.
    pub mock_provider: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            embed_url: DEFAULT_EMBED_URL.to_string(),
            embed_model: DEFAULT_EMBED_MODEL.to_string(),
            embed_api_key: None,
            dataset_path: None,
            store_path: PathBuf::from("./.data"),
            top_k: DEFAULT_TOP_K,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            ingest_batch_size: crate::ingest::DEFAULT_BATCH_SIZE,
            ingest_delay_ms: crate::ingest::DEFAULT_BATCH_DELAY_MS,
            mock_provider: false,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "BANDSCORE_PORT";
    const ENV_BIND_ADDR: &'static str = "BANDSCORE_BIND_ADDR";
    const ENV_QDRANT_URL: &'static str = "BANDSCORE_QDRANT_URL";
    const ENV_CHAT_MODEL: &'static str = "BANDSCORE_CHAT_MODEL";
    const ENV_EMBED_URL: &'static str = "BANDSCORE_EMBED_URL";
    const ENV_EMBED_MODEL: &'static str = "BANDSCORE_EMBED_MODEL";
    const ENV_EMBED_API_KEY: &'static str = "BANDSCORE_EMBED_API_KEY";
    const ENV_DATASET_PATH: &'static str = "BANDSCORE_DATASET_PATH";
    const ENV_STORE_PATH: &'static str = "BANDSCORE_STORE_PATH";
    const ENV_TOP_K: &'static str = "BANDSCORE_TOP_K";
    const ENV_SIMILARITY_THRESHOLD: &'static str = "BANDSCORE_SIMILARITY_THRESHOLD";
    const ENV_INGEST_BATCH_SIZE: &'static str = "BANDSCORE_INGEST_BATCH_SIZE";
    const ENV_INGEST_DELAY_MS: &'static str = "BANDSCORE_INGEST_DELAY_MS";
    const ENV_MOCK_PROVIDER: &'static str = "BANDSCORE_MOCK_PROVIDER";

    /// Loads configuration from environment variables (falling back to
    /// defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let qdrant_url = Self::parse_string_from_env(Self::ENV_QDRANT_URL, defaults.qdrant_url);
        let chat_model = Self::parse_string_from_env(Self::ENV_CHAT_MODEL, defaults.chat_model);
        let embed_url = Self::parse_string_from_env(Self::ENV_EMBED_URL, defaults.embed_url);
        let embed_model = Self::parse_string_from_env(Self::ENV_EMBED_MODEL, defaults.embed_model);
        let embed_api_key = Self::parse_optional_string_from_env(Self::ENV_EMBED_API_KEY);
        let dataset_path = Self::parse_optional_path_from_env(Self::ENV_DATASET_PATH);
        let store_path = Self::parse_path_from_env(Self::ENV_STORE_PATH, defaults.store_path);
        let top_k = Self::parse_u64_from_env(Self::ENV_TOP_K, defaults.top_k);
        let similarity_threshold = Self::parse_f32_from_env(
            Self::ENV_SIMILARITY_THRESHOLD,
            defaults.similarity_threshold,
        );
        let ingest_batch_size =
            Self::parse_u64_from_env(Self::ENV_INGEST_BATCH_SIZE, defaults.ingest_batch_size as u64)
                as usize;
        let ingest_delay_ms =
            Self::parse_u64_from_env(Self::ENV_INGEST_DELAY_MS, defaults.ingest_delay_ms);
        let mock_provider =
            env::var_os(Self::ENV_MOCK_PROVIDER).is_some_and(|v| !v.is_empty());

        Ok(Self {
            port,
            bind_addr,
            qdrant_url,
            chat_model,
            embed_url,
            embed_model,
            embed_api_key,
            dataset_path,
            store_path,
            top_k,
            similarity_threshold,
            ingest_batch_size,
            ingest_delay_ms,
            mock_provider,
        })
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_path.exists() && !self.store_path.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.store_path.clone(),
            });
        }

        if let Some(ref path) = self.dataset_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ConfigError::InvalidThreshold {
                value: self.similarity_threshold,
            });
        }

        if self.top_k == 0 {
            return Err(ConfigError::InvalidTopK);
        }

        if self.ingest_batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize);
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        Self::parse_optional_string_from_env(var_name).map(PathBuf::from)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn parse_f32_from_env(var_name: &str, default: f32) -> f32 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}

//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `LIT_CANDLE_DATA_DIR` - Directory holding the file store (default: `.lit-candle`)
//! - `LIT_CANDLE_CART_KEY` - Storage key of the cart snapshot (default: `cart`)
//! - `LIT_CANDLE_STORAGE_QUOTA` - Largest storable value in bytes, `0` for no
//!   limit (default: 5 MiB, the usual browser storage allowance)
//!
//! The flat shipping fee is store policy and is not configurable.

use std::path::PathBuf;

use thiserror::Error;

use crate::error::StorageError;
use crate::snapshot::CART_KEY;
use crate::store::{DEFAULT_QUOTA_BYTES, FileStore, validate_key};

const DEFAULT_DATA_DIR: &str = ".lit-candle";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart storage configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Directory of the file-backed store
    pub data_dir: PathBuf,
    /// Key the snapshot is stored under
    pub cart_key: String,
    /// Largest value the store accepts, `None` for unlimited
    pub storage_quota: Option<usize>,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cart_key: CART_KEY.to_string(),
            storage_quota: Some(DEFAULT_QUOTA_BYTES),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_dir = lookup("LIT_CANDLE_DATA_DIR").map_or(defaults.data_dir, PathBuf::from);

        let cart_key = lookup("LIT_CANDLE_CART_KEY").unwrap_or(defaults.cart_key);
        validate_key(&cart_key).map_err(|e| {
            ConfigError::InvalidEnvVar("LIT_CANDLE_CART_KEY".to_string(), e.to_string())
        })?;

        let storage_quota = match lookup("LIT_CANDLE_STORAGE_QUOTA") {
            None => defaults.storage_quota,
            Some(raw) => {
                let bytes = raw.trim().parse::<usize>().map_err(|e| {
                    ConfigError::InvalidEnvVar("LIT_CANDLE_STORAGE_QUOTA".to_string(), e.to_string())
                })?;
                (bytes > 0).then_some(bytes)
            }
        };

        Ok(Self {
            data_dir,
            cart_key,
            storage_quota,
        })
    }

    /// Open the file store described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the data directory cannot be created.
    pub fn open_store(&self) -> Result<FileStore, StorageError> {
        Ok(FileStore::open(&self.data_dir)?.with_quota(self.storage_quota))
    }
}

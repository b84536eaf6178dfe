//! Feed configuration.
//!
//! The batch fetcher's limits are vendor-specific empirical constants —
//! the documented per-call budget and an observed safe retry cadence.
//! They live here as configuration with those constants as defaults,
//! loadable from TOML.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Tunable limits for the batch snapshot fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Vendor budget per intraday batch call: symbols × lookback days must
    /// stay within it.
    pub chunk_budget: u32,

    /// Retries per chunk after the initial attempt.
    pub max_retries: u32,

    /// Fixed delay between chunk attempts, in seconds.
    pub retry_delay_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            chunk_budget: 100,
            max_retries: 3,
            retry_delay_secs: 3,
        }
    }
}

impl FeedConfig {
    /// Delay between chunk attempts.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    /// Symbols per batch chunk: `floor(budget / days)`, floored at one so a
    /// lookback longer than the budget degrades to single-symbol calls
    /// instead of an empty chunk.
    pub fn symbols_per_chunk(&self, lookback_days: u32) -> usize {
        ((self.chunk_budget / lookback_days.max(1)) as usize).max(1)
    }

    /// Parse a config from TOML text. Missing fields take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

/// Failures while loading a [`FeedConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_vendor_constants() {
        let config = FeedConfig::default();
        assert_eq!(config.chunk_budget, 100);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay(), Duration::from_secs(3));
    }

    #[test]
    fn chunk_size_floors_the_division() {
        let config = FeedConfig::default();
        assert_eq!(config.symbols_per_chunk(3), 33);
        assert_eq!(config.symbols_per_chunk(1), 100);
        assert_eq!(config.symbols_per_chunk(7), 14);
    }

    #[test]
    fn chunk_size_never_reaches_zero() {
        let config = FeedConfig::default();
        // Lookbacks past the budget degrade to single-symbol chunks.
        assert_eq!(config.symbols_per_chunk(101), 1);
        assert_eq!(config.symbols_per_chunk(10_000), 1);
        // A zero lookback is treated as one day.
        assert_eq!(config.symbols_per_chunk(0), 100);
    }

    #[test]
    fn toml_overrides_and_defaults_mix() {
        let config = FeedConfig::from_toml_str("chunk_budget = 50").unwrap();
        assert_eq!(config.chunk_budget, 50);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay_secs, 3);
    }

    #[test]
    fn toml_roundtrip() {
        let config = FeedConfig {
            chunk_budget: 120,
            max_retries: 5,
            retry_delay_secs: 1,
        };
        let text = toml::to_string(&config).unwrap();
        let back = FeedConfig::from_toml_str(&text).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = FeedConfig::from_toml_str("chunk_budget = \"lots\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = FeedConfig::from_path("/definitely/not/here.toml").unwrap_err();
        match err {
            ConfigError::Io { path, .. } => {
                assert_eq!(path, PathBuf::from("/definitely/not/here.toml"));
            }
            other => panic!("expected Io error, got: {other:?}"),
        }
    }
}

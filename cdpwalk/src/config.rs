//! Crawler configuration.
//!
//! One fixed credential set is used for every device; there is no per-device
//! credential negotiation. Settings are loaded from a JSON file and validated
//! for presence only.

use std::fs;
use std::path::Path;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::{ConfigError, CrawlError, Result};

fn default_port() -> u16 {
    22
}

fn default_pool_capacity() -> usize {
    15
}

fn default_timeout_secs() -> u64 {
    30
}

/// Crawler configuration.
#[derive(Debug, Deserialize)]
pub struct CrawlerConfig {
    /// Username for SSH authentication.
    pub username: String,

    /// Password for SSH authentication. Redacted in Debug output.
    pub password: SecretString,

    /// Domain appended to hostnames when a device reports no domain-name.
    pub default_domain: String,

    /// SSH port (default: 22).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Worker-pool capacity: the number of devices queried concurrently and
    /// the upper bound on simultaneously open SSH sessions (default: 15).
    #[serde(default = "default_pool_capacity")]
    pub pool_capacity: usize,

    /// Connection timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Per-read timeout for command output in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub command_timeout_secs: u64,
}

impl CrawlerConfig {
    /// Load the configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(ConfigError::Parse)?;
        Ok(config)
    }

    /// Check that every required setting is present.
    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            return Err(ConfigError::Missing { field: "username" }.into());
        }
        if self.password.expose_secret().is_empty() {
            return Err(ConfigError::Missing { field: "password" }.into());
        }
        if self.default_domain.is_empty() {
            return Err(ConfigError::Missing {
                field: "default_domain",
            }
            .into());
        }
        if self.pool_capacity == 0 {
            return Err(ConfigError::NotPositive {
                field: "pool_capacity",
            }
            .into());
        }
        Ok(())
    }

    /// Connection timeout as a `Duration`.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Command read timeout as a `Duration`.
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}

/// Read the seed address from the first line of a file.
pub fn read_seed_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let seed = raw.lines().next().unwrap_or("").trim().to_string();
    if seed.is_empty() {
        return Err(CrawlError::SeedMissing.into());
    }
    Ok(seed)
}

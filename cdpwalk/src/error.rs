//! Error types for cdpwalk.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Main error type for cdpwalk operations.
#[derive(Error, Debug)]
pub enum Error {
    /// SSH transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Channel operation errors
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Crawl-level errors
    #[error("Crawl error: {0}")]
    Crawl(#[from] CrawlError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error writing result files
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Transport layer errors (SSH connection, authentication).
///
/// All of these are per-address and non-fatal: the owning address is marked
/// failed and excluded from further expansion and resolution.
#[derive(Error, Debug)]
pub enum TransportError {
    /// SSH handshake or protocol error
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// Authentication failed
    #[error("Authentication failed for user '{user}'")]
    AuthenticationFailed { user: String },

    /// Connection was closed unexpectedly
    #[error("Connection disconnected")]
    Disconnected,

    /// Operation timed out
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),
}

/// Channel layer errors (mid-session command execution).
///
/// Aborts only the current command or batch for that address; the channel is
/// closed either way.
#[derive(Error, Debug)]
pub enum ChannelError {
    /// SSH protocol error on the channel
    #[error("Channel SSH error: {0}")]
    Ssh(russh::Error),

    /// Channel closed before any output was produced
    #[error("Channel closed")]
    Closed,

    /// Read timed out waiting for the remote side
    #[error("No output within {0:?}")]
    Timeout(Duration),
}

/// Crawl-level errors.
#[derive(Error, Debug)]
pub enum CrawlError {
    /// No `hostname` line in the device's configuration dump. The device is
    /// skipped, not retried.
    #[error("No hostname found for {address}")]
    IdentityUnresolved { address: String },

    /// No seed address was supplied
    #[error("A seed address is required to start the crawl")]
    SeedMissing,
}

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config or seed file could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config file is not valid JSON
    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    /// A required setting is absent or empty
    #[error("Missing required setting '{field}'")]
    Missing { field: &'static str },

    /// A numeric setting has an unusable value
    #[error("Setting '{field}' must be greater than zero")]
    NotPositive { field: &'static str },
}

/// Result type alias using cdpwalk's Error.
pub type Result<T> = std::result::Result<T, Error>;

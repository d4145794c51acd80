//! Session transport layer.
//!
//! The crawl engine talks to devices through the [`SessionGateway`] contract
//! rather than a concrete SSH stack, so tests can substitute an in-memory
//! gateway. [`SshGateway`] is the production implementation over russh.

pub mod ssh;

use async_trait::async_trait;

use crate::error::Result;

/// An open command channel to one device.
///
/// Channels must be closed on every exit path, success or failure; the crawl
/// engine releases them through [`SessionChannel::close`] as soon as a
/// command round-trip finishes.
#[async_trait]
pub trait SessionChannel: Send {
    /// Execute a single command and read its complete output to end of
    /// stream, decoded as text.
    async fn run_once(&mut self, command: &str) -> Result<String>;

    /// Run an ordered command script, terminated by `terminator`, over one
    /// interactive shell, and read everything the session produces until it
    /// closes. Used where multiple dependent commands must share one logical
    /// session (vendor CLIs keep shell-mode echo and paging state across
    /// commands).
    async fn run_script(&mut self, commands: &[String], terminator: &str) -> Result<String>;

    /// Close the channel and its underlying session.
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Opens authenticated command channels to devices by address.
#[async_trait]
pub trait SessionGateway: Send + Sync {
    /// Open a channel to the device at `address`.
    async fn open(&self, address: &str) -> Result<Box<dyn SessionChannel>>;
}

pub use ssh::SshGateway;

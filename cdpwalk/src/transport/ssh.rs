//! SSH session gateway over russh.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use russh::client::{self, Handle, Msg};
use russh::keys::PublicKey;
use russh::{Channel, ChannelMsg};
use secrecy::ExposeSecret;

use super::{SessionChannel, SessionGateway};
use crate::config::CrawlerConfig;
use crate::error::{ChannelError, Result, TransportError};

/// SSH gateway using one fixed credential set for every device.
pub struct SshGateway {
    config: CrawlerConfig,
}

impl SshGateway {
    /// Create a gateway from the crawler configuration.
    pub fn new(config: CrawlerConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SessionGateway for SshGateway {
    async fn open(&self, address: &str) -> Result<Box<dyn SessionChannel>> {
        let connect_timeout = self.config.connect_timeout();
        let ssh_config = Arc::new(client::Config {
            inactivity_timeout: Some(connect_timeout),
            ..Default::default()
        });

        let mut session = tokio::time::timeout(
            connect_timeout,
            client::connect(
                ssh_config,
                (address, self.config.port),
                AcceptAllHandler,
            ),
        )
        .await
        .map_err(|_| TransportError::Timeout(connect_timeout))?
        .map_err(TransportError::Ssh)?;

        let authenticated = session
            .authenticate_password(
                &self.config.username,
                self.config.password.expose_secret(),
            )
            .await
            .map_err(TransportError::Ssh)?
            .success();

        if !authenticated {
            return Err(TransportError::AuthenticationFailed {
                user: self.config.username.clone(),
            }
            .into());
        }

        debug!("connected to {address}:{}", self.config.port);
        Ok(Box::new(SshChannel {
            session,
            command_timeout: self.config.command_timeout(),
        }))
    }
}

/// One authenticated SSH session.
///
/// Each command round-trip opens a fresh channel on the session: `exec` for
/// one-shot commands, PTY + shell for interactive scripts.
struct SshChannel {
    session: Handle<AcceptAllHandler>,
    command_timeout: Duration,
}

impl SshChannel {
    /// Read everything the channel produces until it reaches end of stream.
    /// Each read step is bounded by the command timeout so a stalled device
    /// fails only its own unit of work.
    async fn drain(&self, mut channel: Channel<Msg>) -> Result<String> {
        let mut out: Vec<u8> = Vec::new();
        loop {
            let msg = tokio::time::timeout(self.command_timeout, channel.wait())
                .await
                .map_err(|_| ChannelError::Timeout(self.command_timeout))?;
            match msg {
                Some(ChannelMsg::Data { ref data }) => out.extend_from_slice(data),
                Some(ChannelMsg::ExtendedData { ref data, .. }) => out.extend_from_slice(data),
                Some(ChannelMsg::Eof) | Some(ChannelMsg::Close) | None => break,
                Some(_) => {}
            }
        }
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

#[async_trait]
impl SessionChannel for SshChannel {
    async fn run_once(&mut self, command: &str) -> Result<String> {
        let channel = self
            .session
            .channel_open_session()
            .await
            .map_err(ChannelError::Ssh)?;

        channel.exec(true, command).await.map_err(ChannelError::Ssh)?;
        self.drain(channel).await
    }

    async fn run_script(&mut self, commands: &[String], terminator: &str) -> Result<String> {
        let channel = self
            .session
            .channel_open_session()
            .await
            .map_err(ChannelError::Ssh)?;

        channel
            .request_pty(true, "xterm", 511, 24, 0, 0, &[])
            .await
            .map_err(ChannelError::Ssh)?;
        channel
            .request_shell(true)
            .await
            .map_err(ChannelError::Ssh)?;

        let mut script = String::new();
        for command in commands {
            script.push_str(command);
            script.push('\n');
        }
        script.push_str(terminator);
        script.push('\n');

        tokio::time::timeout(self.command_timeout, channel.data(script.as_bytes()))
            .await
            .map_err(|_| ChannelError::Timeout(self.command_timeout))?
            .map_err(ChannelError::Ssh)?;
        channel.eof().await.map_err(ChannelError::Ssh)?;
        self.drain(channel).await
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.session
            .disconnect(russh::Disconnect::ByApplication, "", "en")
            .await
            .map_err(TransportError::Ssh)?;
        Ok(())
    }
}

/// Accepts any host key. The devices live on a managed segment and are
/// reimaged often enough that pinning keys per address is not practical.
struct AcceptAllHandler;

impl client::Handler for AcceptAllHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        _server_public_key: &PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        Ok(true)
    }
}

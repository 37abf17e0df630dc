//! RCON session wrapper around the external protocol client.
//!
//! Connection setup, authentication and packet framing are the `rcon`
//! crate's concern; this module only adds timeouts and error context.

use anyhow::{anyhow, Context, Result};
use rcon::Connection;
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::debug;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// An authenticated connection to a remote server.
///
/// Dropping the session closes the underlying socket.
pub struct Session {
    connection: Connection<TcpStream>,
}

impl Session {
    /// Connect to `host:port` and authenticate with `password`.
    pub async fn connect(host: &str, port: u16, password: &str) -> Result<Self> {
        let address = format!("{}:{}", host, port);

        let connection = tokio::time::timeout(
            CONNECT_TIMEOUT,
            <Connection<TcpStream>>::builder()
                .enable_minecraft_quirks(true)
                .connect(address.as_str(), password),
        )
        .await
        .map_err(|_| anyhow!("Connection timeout - is the server reachable at {}?", address))?
        .map_err(|error| match error {
            rcon::Error::Auth => anyhow!("Authentication failed - check the password"),
            other => anyhow::Error::new(other)
                .context(format!("Failed to connect to server at {}", address)),
        })?;

        debug!("authenticated against {}", address);
        Ok(Self { connection })
    }

    /// Execute one command on the server and return the raw response text.
    pub async fn run(&mut self, command: &str) -> Result<String> {
        debug!("executing: {}", command);

        let response = tokio::time::timeout(COMMAND_TIMEOUT, self.connection.cmd(command))
            .await
            .map_err(|_| anyhow!("Request timeout - the server did not answer"))?
            .context("Failed to execute command")?;

        Ok(response)
    }
}

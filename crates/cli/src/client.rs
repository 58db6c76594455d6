// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One connection, one command line, one envelope back. The client speaks
//! exactly the line protocol the daemon's line transport implements.

use anyhow::{Context, Result};
use gstd_daemon::config;
use gstd_wire::{read_frame, write_frame, Envelope};
use tokio::net::UnixStream;

pub struct DaemonClient {
    stream: UnixStream,
}

impl DaemonClient {
    /// Connect to the daemon's Unix-domain socket. Fails with a plain
    /// `anyhow::Error` if the daemon isn't running — callers surface that
    /// as "daemon is not running" rather than a raw io error.
    pub async fn connect() -> Result<Self> {
        let path = config::socket_path();
        let stream = UnixStream::connect(&path)
            .await
            .with_context(|| format!("connecting to {}", path.display()))?;
        Ok(DaemonClient { stream })
    }

    pub async fn send(&mut self, line: &str) -> Result<Envelope> {
        write_frame(&mut self.stream, line).await.context("writing command")?;
        let response = read_frame(&mut self.stream)
            .await
            .context("reading response")?
            .context("daemon closed the connection without a response")?;
        serde_json::from_str(&response).context("parsing response envelope")
    }
}

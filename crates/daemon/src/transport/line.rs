// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! NUL-terminated line-protocol transport (spec §6.2): one command line
//! in, one JSON envelope out, over a Unix-domain socket and (opt-in) TCP.
//! Grounded on the teacher's dual Unix+TCP accept loop with a
//! per-connection spawned task per accepted stream.

use std::path::Path;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, UnixListener};
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use gstd_wire::{read_frame, write_frame};

use crate::dispatch::Dispatcher;

/// Listens on a Unix socket and, optionally, a TCP port, dispatching
/// every accepted connection's command lines through the same
/// [`Dispatcher`]. A bounded [`Semaphore`] caps how many connections are
/// actively being served at once (spec §5's "bounded worker pool per
/// transport"); `None` leaves it unbounded.
pub struct LineListener {
    unix: UnixListener,
    tcp: Option<TcpListener>,
    dispatcher: Dispatcher,
    pool: Option<Arc<Semaphore>>,
}

impl LineListener {
    pub fn bind(socket_path: &Path, tcp_port: Option<u16>, dispatcher: Dispatcher, pool_size: Option<usize>) -> std::io::Result<Self> {
        let _ = std::fs::remove_file(socket_path);
        let unix = UnixListener::bind(socket_path)?;
        let tcp = match tcp_port {
            Some(port) => Some(TcpListener::bind(("0.0.0.0", port))?)
                .map(Some)
                .unwrap_or(None),
            None => None,
        };
        let pool = pool_size.map(|n| Arc::new(Semaphore::new(n)));
        Ok(LineListener { unix, tcp, dispatcher, pool })
    }

    pub async fn run(self) {
        loop {
            tokio::select! {
                result = self.unix.accept() => {
                    match result {
                        Ok((stream, _)) => self.spawn_connection(stream),
                        Err(e) => error!("unix accept error: {e}"),
                    }
                }
                result = accept_tcp(self.tcp.as_ref()) => {
                    match result {
                        Some(Ok((stream, addr))) => {
                            debug!("tcp connection from {addr}");
                            self.spawn_connection(stream);
                        }
                        Some(Err(e)) => error!("tcp accept error: {e}"),
                        None => std::future::pending::<()>().await,
                    }
                }
            }
        }
    }

    fn spawn_connection<S>(&self, stream: S)
    where
        S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        let dispatcher = self.dispatcher.clone();
        let pool = self.pool.clone();
        tokio::spawn(async move {
            let _permit = match pool {
                Some(pool) => match pool.acquire_owned().await {
                    Ok(permit) => Some(permit),
                    Err(_) => return,
                },
                None => None,
            };
            if let Err(err) = handle_connection(stream, &dispatcher).await {
                warn!("line connection error: {err}");
            }
        });
    }
}

async fn accept_tcp(tcp: Option<&TcpListener>) -> Option<std::io::Result<(tokio::net::TcpStream, std::net::SocketAddr)>> {
    match tcp {
        Some(listener) => Some(listener.accept().await),
        None => None,
    }
}

async fn handle_connection<S>(mut stream: S, dispatcher: &Dispatcher) -> Result<(), gstd_wire::FramingError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    loop {
        let Some(line) = read_frame(&mut stream).await? else {
            return Ok(());
        };
        let envelope = dispatcher.dispatch(&line);
        let rendered = serde_json::to_string_pretty(&envelope).unwrap_or_else(|_| "{}".to_string());
        write_frame(&mut stream, &rendered).await?;
    }
}

#[cfg(test)]
#[path = "line_tests.rs"]
mod tests;

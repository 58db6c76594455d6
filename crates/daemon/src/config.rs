// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon.

use std::path::PathBuf;

/// Default Unix-domain socket path under the runtime directory.
pub const DEFAULT_SOCKET_NAME: &str = "gstd.sock";

/// Default PID file name under the runtime directory.
pub const DEFAULT_PID_NAME: &str = "gstd.pid";

/// Resolve the runtime directory: `GSTD_RUNTIME_DIR` > `XDG_RUNTIME_DIR` >
/// `/tmp`, adapting the original's hard-coded `/var/run` to a portable
/// default (spec.md's daemon bring-up is out of scope but the ambient
/// stack still needs a real default).
pub fn runtime_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("GSTD_RUNTIME_DIR") {
        return PathBuf::from(dir);
    }
    if let Ok(dir) = std::env::var("XDG_RUNTIME_DIR") {
        return PathBuf::from(dir);
    }
    PathBuf::from("/tmp")
}

pub fn socket_path() -> PathBuf {
    std::env::var("GSTD_SOCKET_PATH").map(PathBuf::from).unwrap_or_else(|_| runtime_dir().join(DEFAULT_SOCKET_NAME))
}

pub fn pid_path() -> PathBuf {
    std::env::var("GSTD_PID_PATH").map(PathBuf::from).unwrap_or_else(|_| runtime_dir().join(DEFAULT_PID_NAME))
}

/// TCP port for the line protocol's opt-in remote listener (spec §6.1).
pub fn tcp_port() -> Option<u16> {
    std::env::var("GSTD_TCP_PORT").ok().and_then(|s| s.parse().ok())
}

/// HTTP transport port, default 5000 matching `gstd_http.c`'s default.
pub fn http_port() -> u16 {
    std::env::var("GSTD_HTTP_PORT").ok().and_then(|s| s.parse().ok()).unwrap_or(5000)
}

pub fn http_enabled() -> bool {
    std::env::var("GSTD_ENABLE_HTTP").map(|v| v != "0").unwrap_or(false)
}

/// Bounded worker-pool size per transport (spec §5: "bounded worker pool
/// per transport"). `None` means unbounded, selected by `-1` or unset.
pub fn worker_pool_size() -> Option<usize> {
    match std::env::var("GSTD_WORKER_POOL_SIZE").ok().and_then(|s| s.parse::<i64>().ok()) {
        Some(n) if n > 0 => Some(n as usize),
        _ => None,
    }
}

pub fn log_dir() -> PathBuf {
    std::env::var("GSTD_LOG_DIR").map(PathBuf::from).unwrap_or_else(|_| runtime_dir())
}

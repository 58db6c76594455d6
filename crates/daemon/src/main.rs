// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gstd-daemon`: bring up the session, start the line and (opt-in) HTTP
//! transports, and run until a shutdown signal arrives.

use std::sync::Arc;

use gstd_core::Session;
use gstd_daemon::transport::http;
use gstd_daemon::transport::line::LineListener;
use gstd_daemon::{bringup, config, Dispatcher};
use gstd_engine::SimEngine;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    let log_dir = bringup::log_dir_path();
    let _guards = match bringup::init_logging(&log_dir) {
        Ok(guards) => guards,
        Err(err) => {
            eprintln!("failed to open log directory {}: {err}", log_dir.display());
            Vec::new()
        }
    };

    let pid_path = bringup::pid_file_path();
    if let Err(err) = bringup::write_pid_file(&pid_path) {
        warn!("failed to write pid file {}: {err}", pid_path.display());
    }

    let session = Session::new(Arc::new(SimEngine::new()));
    let dispatcher = Dispatcher::new(session.clone());

    let socket_path = config::socket_path();
    let tcp_port = config::tcp_port();
    let pool_size = config::worker_pool_size();
    let line_listener = match LineListener::bind(&socket_path, tcp_port, dispatcher.clone(), pool_size) {
        Ok(listener) => listener,
        Err(err) => {
            eprintln!("failed to bind line transport at {}: {err}", socket_path.display());
            bringup::remove_pid_file(&pid_path);
            std::process::exit(1);
        }
    };
    info!("line transport listening on {}", socket_path.display());
    let line_task = tokio::spawn(line_listener.run());

    let http_task = if config::http_enabled() {
        let port = config::http_port();
        let app = http::router(dispatcher);
        match tokio::net::TcpListener::bind(("0.0.0.0", port)).await {
            Ok(tcp) => {
                info!("http transport listening on port {port}");
                Some(tokio::spawn(async move {
                    if let Err(err) = axum::serve(tcp, app).await {
                        warn!("http transport stopped: {err}");
                    }
                }))
            }
            Err(err) => {
                warn!("failed to bind http transport on port {port}: {err}");
                None
            }
        }
    } else {
        None
    };

    bringup::wait_for_shutdown_signal(session).await;

    line_task.abort();
    if let Some(task) = http_task {
        task.abort();
    }
    let _ = std::fs::remove_file(&socket_path);
    bringup::remove_pid_file(&pid_path);
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use gstd_engine::SimEngine;
use gstd_core::Session;

use super::*;

fn dispatcher() -> Dispatcher {
    Dispatcher::new(Session::new(Arc::new(SimEngine::new())))
}

#[tokio::test]
async fn a_single_command_round_trips_an_envelope() {
    let (mut client, server) = tokio::io::duplex(4096);
    let dispatcher = dispatcher();
    tokio::spawn(async move {
        let _ = handle_connection(server, &dispatcher).await;
    });

    write_frame(&mut client, "create /pipelines p0 videotestsrc ! fakesink").await.unwrap();
    let response = read_frame(&mut client).await.unwrap().unwrap();
    let envelope: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(envelope["code"], 0);
}

#[tokio::test]
async fn multiple_commands_on_one_connection_each_get_a_response() {
    let (mut client, server) = tokio::io::duplex(4096);
    let dispatcher = dispatcher();
    tokio::spawn(async move {
        let _ = handle_connection(server, &dispatcher).await;
    });

    write_frame(&mut client, "create /pipelines p0 videotestsrc ! fakesink").await.unwrap();
    read_frame(&mut client).await.unwrap();

    write_frame(&mut client, "read /pipelines/p0/state").await.unwrap();
    let response = read_frame(&mut client).await.unwrap().unwrap();
    let envelope: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(envelope["code"], 0);
}

#[tokio::test]
async fn closing_the_connection_ends_the_loop_cleanly() {
    let (client, server) = tokio::io::duplex(4096);
    let dispatcher = dispatcher();
    drop(client);
    let result = handle_connection(server, &dispatcher).await;
    assert!(result.is_ok());
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn round_trips_a_frame_through_a_duplex_pipe() {
    let (mut client, mut server) = tokio::io::duplex(64);
    write_frame(&mut client, "read /pipelines").await.unwrap();
    let frame = read_frame(&mut server).await.unwrap();
    assert_eq!(frame, Some("read /pipelines".to_string()));
}

#[tokio::test]
async fn clean_close_with_no_bytes_is_none() {
    let (client, mut server) = tokio::io::duplex(64);
    drop(client);
    let frame = read_frame(&mut server).await.unwrap();
    assert_eq!(frame, None);
}

#[tokio::test]
async fn close_mid_frame_is_an_error() {
    let (mut client, mut server) = tokio::io::duplex(64);
    client.write_all(b"read /pipe").await.unwrap();
    drop(client);
    let result = read_frame(&mut server).await;
    assert!(matches!(result, Err(FramingError::UnterminatedFrame)));
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn refusing_creator_returns_no_create() {
    assert_eq!(RefusingCreator.create("x", None).unwrap_err(), ReturnCode::NoCreate);
}

#[test]
fn refusing_reader_returns_no_read() {
    assert_eq!(RefusingReader.read("x").unwrap_err(), ReturnCode::NoRead);
}

#[test]
fn refusing_updater_returns_no_update() {
    assert_eq!(RefusingUpdater.update("x").unwrap_err(), ReturnCode::NoUpdate);
}

#[test]
fn refusing_deleter_returns_no_update() {
    assert_eq!(RefusingDeleter.delete("x").unwrap_err(), ReturnCode::NoUpdate);
}

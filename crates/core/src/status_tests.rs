// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn ok_is_zero_and_success() {
    assert_eq!(ReturnCode::Ok.code(), 0);
    assert_eq!(ReturnCode::Ok.description(), "Success");
    assert!(ReturnCode::Ok.is_ok());
}

#[test]
fn discriminants_match_wire_contract() {
    assert_eq!(ReturnCode::NullArgument.code(), 1);
    assert_eq!(ReturnCode::BadDescription.code(), 2);
    assert_eq!(ReturnCode::ExistingName.code(), 3);
    assert_eq!(ReturnCode::MissingInitialization.code(), 4);
    assert_eq!(ReturnCode::NoPipeline.code(), 5);
    assert_eq!(ReturnCode::NoResource.code(), 6);
    assert_eq!(ReturnCode::NoCreate.code(), 7);
    assert_eq!(ReturnCode::ExistingResource.code(), 8);
    assert_eq!(ReturnCode::NoUpdate.code(), 9);
    assert_eq!(ReturnCode::BadCommand.code(), 10);
    assert_eq!(ReturnCode::NoRead.code(), 11);
    assert_eq!(ReturnCode::NoConnection.code(), 12);
    assert_eq!(ReturnCode::BadValue.code(), 13);
    assert_eq!(ReturnCode::StateError.code(), 14);
    assert_eq!(ReturnCode::IpcError.code(), 15);
    assert_eq!(ReturnCode::EventError.code(), 16);
    assert_eq!(ReturnCode::MissingArgument.code(), 17);
    assert_eq!(ReturnCode::MissingName.code(), 18);
}

#[test]
fn classification_partitions_non_ok_codes() {
    let codes = [
        ReturnCode::NullArgument,
        ReturnCode::BadDescription,
        ReturnCode::ExistingName,
        ReturnCode::MissingInitialization,
        ReturnCode::NoPipeline,
        ReturnCode::NoResource,
        ReturnCode::NoCreate,
        ReturnCode::ExistingResource,
        ReturnCode::NoUpdate,
        ReturnCode::BadCommand,
        ReturnCode::NoRead,
        ReturnCode::NoConnection,
        ReturnCode::BadValue,
        ReturnCode::StateError,
        ReturnCode::IpcError,
        ReturnCode::EventError,
        ReturnCode::MissingArgument,
        ReturnCode::MissingName,
    ];
    for code in codes {
        let buckets = [code.is_client_error(), code.is_engine_error(), code.is_infra_error()];
        let hits = buckets.iter().filter(|b| **b).count();
        assert!(hits <= 1, "{code:?} claims more than one error bucket");
    }
}

#[test]
fn display_matches_description() {
    assert_eq!(ReturnCode::BadValue.to_string(), "Bad value");
}

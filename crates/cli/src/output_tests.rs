// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use gstd_wire::Envelope;

use super::*;

#[test]
fn text_format_prints_description_for_a_null_response() {
    let envelope = Envelope::ok(serde_json::Value::Null);
    let code = print_envelope(&envelope, OutputFormat::Text);
    assert_eq!(code, 0);
}

#[test]
fn text_format_on_error_returns_the_error_code() {
    let envelope = Envelope::error(gstd_core::ReturnCode::NoResource);
    let code = print_envelope(&envelope, OutputFormat::Text);
    assert_eq!(code, 6);
}

#[test]
fn json_format_returns_the_same_code_as_text() {
    let envelope = Envelope::ok(serde_json::json!({"state": "playing"}));
    let code = print_envelope(&envelope, OutputFormat::Json);
    assert_eq!(code, 0);
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `{code, description, response}` envelope every verb answers with
//! (spec §6.2/§6.3), independent of which transport carried the request.

use gstd_core::{NodeDescription, ReturnCode};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    pub code: i32,
    pub description: String,
    pub response: JsonValue,
}

impl Envelope {
    pub fn ok(response: JsonValue) -> Self {
        Envelope { code: ReturnCode::Ok.code(), description: ReturnCode::Ok.description().to_string(), response }
    }

    pub fn error(code: ReturnCode) -> Self {
        Envelope { code: code.code(), description: code.description().to_string(), response: JsonValue::Null }
    }

    pub fn from_result(result: Result<NodeDescription, ReturnCode>) -> Self {
        match result {
            // A description with no properties at all (distinct from a
            // listing that's merely empty of children, which still carries
            // a `count`) renders as a bare `null` response rather than
            // `{"properties":[]}` — the shape a bus-read timeout needs
            // (spec §4.8: a timeout is not an error and carries no
            // message).
            Ok(description) if description.properties.is_empty() => Envelope::ok(JsonValue::Null),
            Ok(description) => Envelope::ok(serde_json::to_value(&description).unwrap_or(JsonValue::Null)),
            Err(code) => Envelope::error(code),
        }
    }

    /// An envelope for a verb that succeeds with no payload (`CREATE`,
    /// `UPDATE`, `DELETE` per spec §6.2: "response is null on success").
    pub fn from_unit_result(result: Result<(), ReturnCode>) -> Self {
        match result {
            Ok(()) => Envelope::ok(JsonValue::Null),
            Err(code) => Envelope::error(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_envelope_carries_zero_code() {
        let env = Envelope::ok(JsonValue::Null);
        assert_eq!(env.code, 0);
        assert_eq!(env.description, "Success");
    }

    #[test]
    fn error_envelope_carries_code_and_description() {
        let env = Envelope::error(ReturnCode::NoResource);
        assert_eq!(env.code, 6);
        assert_eq!(env.description, "Resource requested doesn't exist");
        assert_eq!(env.response, JsonValue::Null);
    }

    #[test]
    fn unit_result_success_has_null_response() {
        let env = Envelope::from_unit_result(Ok(()));
        assert_eq!(env.response, JsonValue::Null);
    }
}

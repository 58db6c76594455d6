// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The closed return-code vocabulary (spec §4.1). Every verb on every node
//! resolves to exactly one of these; there is no escape hatch for a custom
//! error type at the control-plane boundary.

use std::fmt;

/// Outcome of a CRUD verb against a node.
///
/// The numeric discriminants are part of the wire contract (the HTTP and
/// line-protocol transports both surface `code` verbatim) and must not be
/// reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[repr(i32)]
pub enum ReturnCode {
    Ok = 0,
    NullArgument = 1,
    BadDescription = 2,
    ExistingName = 3,
    MissingInitialization = 4,
    NoPipeline = 5,
    NoResource = 6,
    NoCreate = 7,
    ExistingResource = 8,
    NoUpdate = 9,
    BadCommand = 10,
    NoRead = 11,
    NoConnection = 12,
    BadValue = 13,
    StateError = 14,
    IpcError = 15,
    EventError = 16,
    MissingArgument = 17,
    MissingName = 18,
}

impl ReturnCode {
    /// The stable, one-line English description used verbatim in wire
    /// responses (spec §4.1).
    pub const fn description(self) -> &'static str {
        match self {
            ReturnCode::Ok => "Success",
            ReturnCode::NullArgument => "Required argument is NULL",
            ReturnCode::BadDescription => "Bad pipeline description",
            ReturnCode::ExistingName => "Name already exists",
            ReturnCode::MissingInitialization => "Missing initialization",
            ReturnCode::NoPipeline => "Pipeline requested doesn't exist",
            ReturnCode::NoResource => "Resource requested doesn't exist",
            ReturnCode::NoCreate => "Cannot create in this resource",
            ReturnCode::ExistingResource => "Resource already exists",
            ReturnCode::NoUpdate => "Cannot update this resource",
            ReturnCode::BadCommand => "Bad command",
            ReturnCode::NoRead => "Resource not readable",
            ReturnCode::NoConnection => "Cannot connect",
            ReturnCode::BadValue => "Bad value",
            ReturnCode::StateError => "State error",
            ReturnCode::IpcError => "IPC error",
            ReturnCode::EventError => "Event error",
            ReturnCode::MissingArgument => "One or more arguments are missing",
            ReturnCode::MissingName => "Name is missing",
        }
    }

    pub const fn code(self) -> i32 {
        self as i32
    }

    pub const fn is_ok(self) -> bool {
        matches!(self, ReturnCode::Ok)
    }

    /// §7 classification: client errors are logged at most at info level.
    pub const fn is_client_error(self) -> bool {
        matches!(
            self,
            ReturnCode::BadCommand
                | ReturnCode::NoResource
                | ReturnCode::MissingName
                | ReturnCode::MissingArgument
                | ReturnCode::BadValue
                | ReturnCode::NoCreate
                | ReturnCode::NoRead
                | ReturnCode::NoUpdate
                | ReturnCode::ExistingResource
        )
    }

    /// §7 classification: engine/protocol errors are logged as warnings.
    pub const fn is_engine_error(self) -> bool {
        matches!(
            self,
            ReturnCode::BadDescription | ReturnCode::StateError | ReturnCode::EventError
        )
    }

    /// §7 classification: infrastructure errors are logged as errors.
    pub const fn is_infra_error(self) -> bool {
        matches!(self, ReturnCode::NoConnection | ReturnCode::IpcError)
    }
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The single place every transport funnels a parsed [`Command`] through:
//! resolve against the [`Session`] tree, dispatch the verb, wrap the
//! result as an [`Envelope`]. Shared by the line and HTTP transports so
//! neither reimplements verb semantics (spec §6: "Data flow... hands it
//! to C12, which... asks C11 to resolve the path to a node, dispatches
//! the verb to the node's strategy").

use std::sync::Arc;

use gstd_core::{ReturnCode, Session};
use gstd_wire::{Command, CommandError, Envelope, Verb};

/// Binds a [`Session`] to the command grammar. Cheap to clone (wraps an
/// `Arc`), so each transport connection can hold its own handle.
#[derive(Clone)]
pub struct Dispatcher {
    session: Arc<Session>,
}

impl Dispatcher {
    pub fn new(session: Arc<Session>) -> Self {
        Dispatcher { session }
    }

    /// Parse and execute one command line, never returning an error —
    /// every failure mode (bad grammar, unresolved path, refused verb)
    /// becomes an [`Envelope`] (spec §6.4 "Errors are always turned into
    /// response envelopes at the transport boundary").
    pub fn dispatch(&self, line: &str) -> Envelope {
        match Command::parse(line) {
            Ok(command) => self.run(command),
            Err(CommandError::UnknownVerb(_)) => Envelope::error(ReturnCode::BadCommand),
            Err(CommandError::MissingArgument) => Envelope::error(ReturnCode::MissingArgument),
        }
    }

    fn run(&self, command: Command) -> Envelope {
        if command.refcounted {
            return Envelope::from_unit_result(self.run_refcounted(&command));
        }
        match command.verb {
            Verb::Read => Envelope::from_result(self.session.resolve(&command.uri).map(|node| node.describe())),
            Verb::Create => Envelope::from_unit_result(self.run_create(&command)),
            Verb::Update => Envelope::from_unit_result(
                self.session.resolve(&command.uri).and_then(|node| node.update(&command.argument)),
            ),
            Verb::Delete => Envelope::from_unit_result(
                self.session.resolve(&command.uri).and_then(|node| node.delete(&command.argument)),
            ),
        }
    }

    fn run_create(&self, command: &Command) -> Result<(), ReturnCode> {
        let (name, description) = command.argument.split_once(char::is_whitespace).unwrap_or((command.argument.as_str(), ""));
        let description = if description.is_empty() { None } else { Some(description.trim()) };
        if name.is_empty() {
            return Err(ReturnCode::MissingName);
        }
        self.session.resolve(&command.uri)?.create(name, description).map(|_| ())
    }

    fn run_refcounted(&self, command: &Command) -> Result<(), ReturnCode> {
        match command.verb {
            Verb::Create => {
                let (name, description) =
                    command.argument.split_once(char::is_whitespace).unwrap_or((command.argument.as_str(), ""));
                if name.is_empty() {
                    return Err(ReturnCode::MissingName);
                }
                self.session.create_ref(name, description.trim())
            }
            Verb::Delete => self.session.delete_ref(command.argument.trim()),
            Verb::Update => {
                let name = pipeline_name_from_state_uri(&command.uri).ok_or(ReturnCode::BadCommand)?;
                match command.argument.as_str() {
                    "playing" => self.session.play_ref(name),
                    "paused" => self.session.pause_ref(name),
                    "null" => self.session.stop_ref(name),
                    _ => Err(ReturnCode::BadValue),
                }
            }
            Verb::Read => Err(ReturnCode::BadCommand),
        }
    }
}

/// Pull the pipeline name out of a `/pipelines/{name}/state` URI, as
/// produced by the `pipeline_play_ref`/`pipeline_pause_ref`/
/// `pipeline_stop_ref` aliases.
fn pipeline_name_from_state_uri(uri: &str) -> Option<&str> {
    let mut segments = uri.split('/').filter(|s| !s.is_empty());
    match (segments.next(), segments.next(), segments.next()) {
        (Some("pipelines"), Some(name), Some("state")) => Some(name),
        _ => None,
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Textual command grammar (spec §4.11): tokenizes one line into a verb,
//! a resource URI, and an argument string, and expands the convenience
//! alias table (`pipeline_create`, `element_set`, ... per
//! `gst_client.c`'s command list) down to the same four primitives.

use thiserror::Error;

/// One of the four CRUD primitives a resolved node dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Create,
    Read,
    Update,
    Delete,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown verb {0:?}")]
    UnknownVerb(String),
    #[error("missing required argument")]
    MissingArgument,
}

/// A fully parsed command: a verb, the resource it targets, whatever
/// argument string the verb needs (empty for `read`), and whether this
/// came from a `_ref` alias — `gstd-core::session`'s refcounted pipeline
/// methods handle those directly rather than through node resolution
/// (spec.md §9), so the daemon dispatcher branches on this flag before
/// ever calling `Session::resolve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub verb: Verb,
    pub uri: String,
    pub argument: String,
    pub refcounted: bool,
}

impl Command {
    /// Split on whitespace, keeping the first token as the verb, the
    /// second as the URI, and everything after as one argument string —
    /// "at most three logical tokens; further whitespace is part of the
    /// argument" (spec §4.11).
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut parts = line.trim().splitn(3, char::is_whitespace);
        let verb_token = parts.next().unwrap_or("").trim();
        if verb_token.is_empty() {
            return Err(CommandError::MissingArgument);
        }
        let rest = parts.next().unwrap_or("").trim_start();
        if let Some(expanded) = expand_alias(verb_token, rest) {
            return Ok(expanded);
        }

        let mut rest_parts = rest.splitn(2, char::is_whitespace);
        let uri = rest_parts.next().unwrap_or("").trim().to_string();
        let argument = rest_parts.next().unwrap_or("").trim().to_string();

        let verb = match verb_token {
            "create" => Verb::Create,
            "read" => Verb::Read,
            "update" => Verb::Update,
            "delete" => Verb::Delete,
            other => return Err(CommandError::UnknownVerb(other.to_string())),
        };
        if uri.is_empty() {
            return Err(CommandError::MissingArgument);
        }
        Ok(Command { verb, uri, argument, refcounted: false })
    }
}

/// Pull the next whitespace-delimited token off the front of `cursor`,
/// advancing it past the token (and the whitespace that followed it) so
/// whatever remains — including internal whitespace — is available as a
/// single trailing argument.
fn next_token<'a>(cursor: &mut &'a str) -> Option<&'a str> {
    let trimmed = cursor.trim_start();
    if trimmed.is_empty() {
        *cursor = trimmed;
        return None;
    }
    match trimmed.find(char::is_whitespace) {
        Some(at) => {
            let (token, remainder) = trimmed.split_at(at);
            *cursor = remainder;
            Some(token)
        }
        None => {
            *cursor = "";
            Some(trimmed)
        }
    }
}

/// Expand one alias (`rest` is everything after the alias token, not yet
/// split). Returns `None` for tokens that are not recognized aliases so
/// the caller falls through to the plain `create`/`read`/`update`/`delete`
/// grammar.
fn expand_alias(alias: &str, rest: &str) -> Option<Command> {
    let mut cursor = rest;
    match alias {
        "pipeline_create" | "pipeline_create_ref" => {
            let name = next_token(&mut cursor)?;
            let description = cursor.trim();
            Some(Command {
                verb: Verb::Create,
                uri: "/pipelines".to_string(),
                argument: format!("{name} {description}").trim().to_string(),
                refcounted: alias.ends_with("_ref"),
            })
        }
        "pipeline_delete" | "pipeline_delete_ref" => {
            let name = next_token(&mut cursor)?;
            Some(Command { verb: Verb::Delete, uri: "/pipelines".to_string(), argument: name.to_string(), refcounted: alias.ends_with("_ref") })
        }
        "pipeline_play" | "pipeline_play_ref" => {
            let name = next_token(&mut cursor)?;
            Some(Command { verb: Verb::Update, uri: format!("/pipelines/{name}/state"), argument: "playing".to_string(), refcounted: alias.ends_with("_ref") })
        }
        "pipeline_pause" | "pipeline_pause_ref" => {
            let name = next_token(&mut cursor)?;
            Some(Command { verb: Verb::Update, uri: format!("/pipelines/{name}/state"), argument: "paused".to_string(), refcounted: alias.ends_with("_ref") })
        }
        "pipeline_stop" | "pipeline_stop_ref" => {
            let name = next_token(&mut cursor)?;
            Some(Command { verb: Verb::Update, uri: format!("/pipelines/{name}/state"), argument: "null".to_string(), refcounted: alias.ends_with("_ref") })
        }
        "element_set" => {
            let pipeline = next_token(&mut cursor)?;
            let element = next_token(&mut cursor)?;
            let property = next_token(&mut cursor)?;
            let value = cursor.trim();
            Some(Command {
                verb: Verb::Update,
                uri: format!("/pipelines/{pipeline}/elements/{element}/properties/{property}"),
                argument: value.to_string(),
                refcounted: false,
            })
        }
        "element_get" => {
            let pipeline = next_token(&mut cursor)?;
            let element = next_token(&mut cursor)?;
            let property = next_token(&mut cursor)?;
            Some(Command {
                verb: Verb::Read,
                uri: format!("/pipelines/{pipeline}/elements/{element}/properties/{property}"),
                argument: String::new(),
                refcounted: false,
            })
        }
        "bus_filter" => {
            let pipeline = next_token(&mut cursor)?;
            let types = cursor.trim();
            Some(Command { verb: Verb::Update, uri: format!("/pipelines/{pipeline}/bus/types"), argument: types.to_string(), refcounted: false })
        }
        "bus_timeout" => {
            let pipeline = next_token(&mut cursor)?;
            let timeout = cursor.trim();
            Some(Command { verb: Verb::Update, uri: format!("/pipelines/{pipeline}/bus/timeout"), argument: timeout.to_string(), refcounted: false })
        }
        "bus_read" => {
            let pipeline = next_token(&mut cursor)?;
            Some(Command { verb: Verb::Read, uri: format!("/pipelines/{pipeline}/bus/message"), argument: String::new(), refcounted: false })
        }
        "event_eos" => {
            let pipeline = next_token(&mut cursor)?;
            Some(Command { verb: Verb::Create, uri: format!("/pipelines/{pipeline}/event"), argument: "eos".to_string(), refcounted: false })
        }
        "event_seek" => {
            let pipeline = next_token(&mut cursor)?;
            let overrides = cursor.trim();
            Some(Command {
                verb: Verb::Create,
                uri: format!("/pipelines/{pipeline}/event"),
                argument: format!("seek {overrides}").trim().to_string(),
                refcounted: false,
            })
        }
        "event_flush_start" => {
            let pipeline = next_token(&mut cursor)?;
            Some(Command { verb: Verb::Create, uri: format!("/pipelines/{pipeline}/event"), argument: "flush-start".to_string(), refcounted: false })
        }
        "event_flush_stop" => {
            let pipeline = next_token(&mut cursor)?;
            let reset = cursor.trim();
            Some(Command {
                verb: Verb::Create,
                uri: format!("/pipelines/{pipeline}/event"),
                argument: format!("flush-stop {reset}").trim().to_string(),
                refcounted: false,
            })
        }
        "debug_enable" => {
            let value = cursor.trim();
            Some(Command { verb: Verb::Update, uri: "/debug/enable".to_string(), argument: value.to_string(), refcounted: false })
        }
        "debug_color" => {
            let value = cursor.trim();
            Some(Command { verb: Verb::Update, uri: "/debug/color".to_string(), argument: value.to_string(), refcounted: false })
        }
        "debug_reset" => {
            let value = cursor.trim();
            let value = if value.is_empty() { "true" } else { value };
            Some(Command { verb: Verb::Update, uri: "/debug/reset".to_string(), argument: value.to_string(), refcounted: false })
        }
        "debug_threshold" => {
            let value = cursor.trim();
            Some(Command { verb: Verb::Update, uri: "/debug/threshold".to_string(), argument: value.to_string(), refcounted: false })
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;

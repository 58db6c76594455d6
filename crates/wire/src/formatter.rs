// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The builder every response is rendered through (spec §4.2). Kept as a
//! trait, rather than hard-coding `serde_json`, so a future transport
//! could render to a different wire shape without touching the node tree.

use gstd_core::Value;
use serde_json::{Map, Value as JsonValue};

/// An object/array builder. Implementations are expected to be used for
/// exactly one response: a fresh [`JsonFormatter`] already has its root
/// object open, so `finish` can be called with no `start_object` at all.
/// `start_object`/`end_object` and `start_array`/`end_array` nest a named
/// child within the frame currently open, and must balance within a single
/// call sequence ending in [`Formatter::finish`].
pub trait Formatter {
    fn start_object(&mut self, name: &str);
    fn end_object(&mut self);
    fn start_array(&mut self, name: &str);
    fn end_array(&mut self);

    /// Type-directed scalar write (spec §4.2: booleans/ints/doubles/strings
    /// serialize as native JSON scalars).
    fn set_value(&mut self, name: &str, value: &Value);

    /// Fallback for anything outside [`Value`] (flags, caps, structures,
    /// tag-lists): the caller pre-renders it and it goes in as a string,
    /// mirroring `gstd_json_builder.c`'s behavior for unrecognized types.
    fn set_string_value(&mut self, name: &str, value: &str);

    fn finish(self: Box<Self>) -> JsonValue;
}

enum Frame {
    Object(String, Map<String, JsonValue>),
    Array(String, Vec<JsonValue>),
}

/// The canonical implementation: builds a `serde_json::Value` tree and
/// renders it pretty-printed with 4-space indentation.
#[derive(Default)]
pub struct JsonFormatter {
    stack: Vec<Frame>,
}

impl JsonFormatter {
    pub fn new() -> Self {
        JsonFormatter { stack: vec![Frame::Object(String::new(), Map::new())] }
    }

    fn insert(&mut self, name: &str, value: JsonValue) {
        match self.stack.last_mut() {
            Some(Frame::Object(_, map)) => {
                map.insert(name.to_string(), value);
            }
            Some(Frame::Array(_, items)) => items.push(value),
            None => {}
        }
    }

    /// Render the finished tree as pretty JSON with a 4-space indent
    /// (spec §4.2), via `serde_json::Serializer` + `PrettyFormatter`.
    pub fn render(value: &JsonValue) -> String {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        if serde::Serialize::serialize(value, &mut serializer).is_err() {
            return value.to_string();
        }
        String::from_utf8(buf).unwrap_or_else(|_| value.to_string())
    }
}

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::I64(i) => JsonValue::from(*i),
        Value::U64(u) => JsonValue::from(*u),
        Value::F64(f) => serde_json::Number::from_f64(*f).map(JsonValue::Number).unwrap_or(JsonValue::Null),
        Value::Str(s) => JsonValue::String(s.clone()),
        Value::Null => JsonValue::Null,
    }
}

impl Formatter for JsonFormatter {
    fn start_object(&mut self, name: &str) {
        self.stack.push(Frame::Object(name.to_string(), Map::new()));
    }

    fn end_object(&mut self) {
        if let Some(Frame::Object(name, map)) = self.stack.pop() {
            self.insert(&name, JsonValue::Object(map));
        }
    }

    fn start_array(&mut self, name: &str) {
        self.stack.push(Frame::Array(name.to_string(), Vec::new()));
    }

    fn end_array(&mut self) {
        if let Some(Frame::Array(name, items)) = self.stack.pop() {
            self.insert(&name, JsonValue::Array(items));
        }
    }

    fn set_value(&mut self, name: &str, value: &Value) {
        let json = value_to_json(value);
        self.insert(name, json);
    }

    fn set_string_value(&mut self, name: &str, value: &str) {
        self.insert(name, JsonValue::String(value.to_string()));
    }

    fn finish(mut self: Box<Self>) -> JsonValue {
        match self.stack.pop() {
            Some(Frame::Object(_, map)) => JsonValue::Object(map),
            Some(Frame::Array(_, items)) => JsonValue::Array(items),
            None => JsonValue::Null,
        }
    }
}

#[cfg(test)]
#[path = "formatter_tests.rs"]
mod tests;

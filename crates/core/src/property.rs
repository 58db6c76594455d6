// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Element properties (spec §4.6): a leaf node whose value is fetched from
//! the engine on every read (invariant 4) and whose `UPDATE` verb parses
//! the incoming string against a declared [`PropertyType`] before handing
//! it to the engine.

use std::sync::Arc;

use crate::access::AccessMask;
use crate::engine::{PipelineEngine, PipelineHandle};
use crate::node::{DynNode, NodeCore, NodeDescription};
use crate::status::ReturnCode;
use crate::strategy::{Reader, Updater};
use crate::value::Value;

/// The declared type of a property, used to validate `UPDATE` input
/// (spec §4.6 parse-rule table). Integer bounds are carried so the range
/// check in that table has something to check against.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyType {
    Boolean,
    Integer { min: i64, max: i64 },
    Unsigned { max: u64 },
    Float { allow_nan: bool },
    String,
    /// Matched against `values` (nick/name strings); falls back to a plain
    /// integer index when the raw text doesn't name a known value.
    Enum { values: Vec<String> },
    /// `+`-separated tokens, each OR'd against `known` to build the mask;
    /// an unrecognized token is `BAD_VALUE`.
    Flags { known: Vec<String> },
    /// Caps/tags/structure text; carried verbatim since this crate has no
    /// structure deserializer of its own (spec §4.6: "parsed by the
    /// framework's structure deserializer").
    Structured,
}

impl PropertyType {
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyType::Boolean => "bool",
            PropertyType::Integer { .. } => "int",
            PropertyType::Unsigned { .. } => "uint",
            PropertyType::Float { .. } => "float",
            PropertyType::String => "string",
            PropertyType::Enum { .. } => "enum",
            PropertyType::Flags { .. } => "flags",
            PropertyType::Structured => "structured",
        }
    }

    /// Parse and range-check a raw wire value (spec §4.6).
    ///
    /// Boolean parsing recognizes the original's strict `true`/`false`
    /// pair (`gstd_ascii_to_boolean`, case-insensitive) as canonical, with
    /// `yes`/`no`/`1`/`0` accepted as aliases per the widened Rust
    /// redesign described in the Open Questions.
    pub fn parse(&self, raw: &str) -> Result<Value, ReturnCode> {
        match self {
            PropertyType::Boolean => parse_bool(raw).map(Value::Bool).ok_or(ReturnCode::BadValue),
            PropertyType::Integer { min, max } => {
                let v: i64 = raw.trim().parse().map_err(|_| ReturnCode::BadValue)?;
                if v < *min || v > *max {
                    return Err(ReturnCode::BadValue);
                }
                Ok(Value::I64(v))
            }
            PropertyType::Unsigned { max } => {
                let v: u64 = raw.trim().parse().map_err(|_| ReturnCode::BadValue)?;
                if v > *max {
                    return Err(ReturnCode::BadValue);
                }
                Ok(Value::U64(v))
            }
            PropertyType::Float { allow_nan } => {
                let v: f64 = raw.trim().parse().map_err(|_| ReturnCode::BadValue)?;
                if v.is_nan() && !allow_nan {
                    return Err(ReturnCode::BadValue);
                }
                Ok(Value::F64(v))
            }
            PropertyType::String => Ok(Value::Str(raw.to_string())),
            PropertyType::Enum { values } => {
                let raw = raw.trim();
                if let Some(index) = values.iter().position(|v| v.eq_ignore_ascii_case(raw)) {
                    return Ok(Value::U64(index as u64));
                }
                raw.parse::<u64>().map(Value::U64).map_err(|_| ReturnCode::BadValue)
            }
            PropertyType::Flags { known } => {
                let mut mask: u64 = 0;
                for token in raw.split('+') {
                    let token = token.trim();
                    if token.is_empty() {
                        return Err(ReturnCode::BadValue);
                    }
                    let bit = known.iter().position(|k| k.eq_ignore_ascii_case(token)).ok_or(ReturnCode::BadValue)?;
                    mask |= 1 << bit;
                }
                Ok(Value::U64(mask))
            }
            PropertyType::Structured => Ok(Value::Str(raw.to_string())),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

struct PropertyReader;
impl Reader for PropertyReader {
    fn read(&self, _name: &str) -> Result<Arc<dyn DynNode>, ReturnCode> {
        Err(ReturnCode::NoResource)
    }
}

struct PropertyUpdater {
    engine: Arc<dyn PipelineEngine>,
    handle: PipelineHandle,
    element: String,
    property: String,
    prop_type: PropertyType,
}

impl Updater for PropertyUpdater {
    fn update(&self, value: &str) -> Result<(), ReturnCode> {
        let parsed = self.prop_type.parse(value)?;
        self.engine.set_property(self.handle, &self.element, &self.property, &parsed.to_string())
    }
}

/// An element's property, addressed by `<pipeline>/elements/<element>/properties/<name>`.
pub struct Property {
    core: NodeCore,
    engine: Arc<dyn PipelineEngine>,
    handle: PipelineHandle,
    element: String,
    property: String,
    prop_type: PropertyType,
}

impl Property {
    pub fn new(
        name: impl Into<String>,
        prop_type: PropertyType,
        access: AccessMask,
        engine: Arc<dyn PipelineEngine>,
        handle: PipelineHandle,
        element: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let element = element.into();
        let mut core = NodeCore::new(name.clone(), access).with_reader(PropertyReader);
        if access.contains(AccessMask::UPDATE) {
            core = core.with_updater(PropertyUpdater {
                engine: engine.clone(),
                handle,
                element: element.clone(),
                property: name.clone(),
                prop_type: prop_type.clone(),
            });
        }
        Property { core, engine, handle, element, property: name, prop_type }
    }
}

impl DynNode for Property {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    /// Fetches the live value from the engine on every describe, per
    /// invariant 4 ("reads the live current value... on every access").
    fn describe(&self) -> NodeDescription {
        let value = self
            .engine
            .get_property(self.handle, &self.element, &self.property)
            .unwrap_or(Value::Null);
        NodeDescription::new().with(self.core.name.clone(), value, self.prop_type.type_name(), self.core.flags)
    }
}

#[cfg(test)]
#[path = "property_tests.rs"]
mod tests;

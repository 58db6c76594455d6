// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `debug` node (spec §6.1): `{enable, color, threshold, reset,
//! flags}`. This crate has no subscriber to reconfigure directly (that
//! lives in `gstd-daemon`, which depends on `tracing-subscriber`); instead
//! this node owns the shared state, and the daemon's bring-up watches it
//! to rebuild its `EnvFilter` and toggle ANSI color on the fmt layer.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::access::AccessMask;
use crate::node::{DynNode, NodeCore, NodeDescription};
use crate::status::ReturnCode;
use crate::strategy::{Reader, Updater};
use crate::value::Value;

const DEFAULT_THRESHOLD: &str = "*:1";

struct DebugInner {
    enable: bool,
    color: bool,
    threshold: String,
}

impl Default for DebugInner {
    fn default() -> Self {
        DebugInner { enable: false, color: false, threshold: DEFAULT_THRESHOLD.to_string() }
    }
}

/// Shared, lock-guarded debug configuration; cloned into the daemon's
/// bring-up so it can poll for changes made through the tree.
#[derive(Clone)]
pub struct DebugState(Arc<RwLock<DebugInner>>);

impl DebugState {
    pub fn new() -> Self {
        DebugState(Arc::new(RwLock::new(DebugInner::default())))
    }

    pub fn enabled(&self) -> bool {
        self.0.read().enable
    }

    pub fn color(&self) -> bool {
        self.0.read().color
    }

    pub fn threshold(&self) -> String {
        self.0.read().threshold.clone()
    }

    /// `category:level` pairs parsed out of the threshold string, for the
    /// read-only `flags` listing.
    pub fn flag_pairs(&self) -> Vec<String> {
        self.0.read().threshold.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
    }
}

impl Default for DebugState {
    fn default() -> Self {
        Self::new()
    }
}

struct BoolUpdater {
    state: DebugState,
    set: fn(&mut DebugInner, bool),
}

impl Updater for BoolUpdater {
    fn update(&self, value: &str) -> Result<(), ReturnCode> {
        let parsed = crate::property::PropertyType::Boolean.parse(value)?;
        let Value::Bool(b) = parsed else { unreachable!("PropertyType::Boolean always yields Value::Bool") };
        (self.set)(&mut self.state.0.write(), b);
        Ok(())
    }
}

struct ResetUpdater {
    state: DebugState,
}

impl Updater for ResetUpdater {
    fn update(&self, value: &str) -> Result<(), ReturnCode> {
        let parsed = crate::property::PropertyType::Boolean.parse(value)?;
        if parsed == Value::Bool(true) {
            *self.state.0.write() = DebugInner::default();
        }
        Ok(())
    }
}

struct ThresholdUpdater {
    state: DebugState,
}

impl Updater for ThresholdUpdater {
    fn update(&self, value: &str) -> Result<(), ReturnCode> {
        if value.trim().is_empty() {
            return Err(ReturnCode::BadValue);
        }
        self.state.0.write().threshold = value.trim().to_string();
        Ok(())
    }
}

struct LeafReader;
impl Reader for LeafReader {
    fn read(&self, _name: &str) -> Result<Arc<dyn DynNode>, ReturnCode> {
        Err(ReturnCode::NoResource)
    }
}

struct DebugReader {
    state: DebugState,
}

impl Reader for DebugReader {
    fn read(&self, name: &str) -> Result<Arc<dyn DynNode>, ReturnCode> {
        let state = self.state.clone();
        match name {
            "enable" => Ok(Arc::new(leaf(
                "enable",
                Value::Bool(state.enabled()),
                "bool",
                AccessMask::READ_WRITE,
                BoolUpdater { state, set: |inner, b| inner.enable = b },
            ))),
            "color" => Ok(Arc::new(leaf(
                "color",
                Value::Bool(state.color()),
                "bool",
                AccessMask::READ_WRITE,
                BoolUpdater { state, set: |inner, b| inner.color = b },
            ))),
            "threshold" => Ok(Arc::new(leaf(
                "threshold",
                Value::Str(state.threshold()),
                "string",
                AccessMask::READ_WRITE,
                ThresholdUpdater { state },
            ))),
            "reset" => Ok(Arc::new(leaf("reset", Value::Bool(false), "bool", AccessMask::UPDATE, ResetUpdater { state }))),
            "flags" => Ok(Arc::new(FlagsNode {
                core: NodeCore::new("flags", AccessMask::READ_ONLY).with_reader(LeafReader),
                state,
            })),
            _ => Err(ReturnCode::NoResource),
        }
    }
}

struct LeafNode {
    core: NodeCore,
    value: Value,
    type_name: &'static str,
}

fn leaf(name: &str, value: Value, type_name: &'static str, access: AccessMask, updater: impl Updater + 'static) -> LeafNode {
    LeafNode { core: NodeCore::new(name, access).with_reader(LeafReader).with_updater(updater), value, type_name }
}

impl DynNode for LeafNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn describe(&self) -> NodeDescription {
        NodeDescription::new().with(self.core.name.clone(), self.value.clone(), self.type_name, self.core.flags)
    }
}

struct FlagsNode {
    core: NodeCore,
    state: DebugState,
}

impl DynNode for FlagsNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn describe(&self) -> NodeDescription {
        let mut desc = NodeDescription::new();
        for pair in self.state.flag_pairs() {
            desc = desc.with(pair.clone(), pair, "string", AccessMask::READ_ONLY);
        }
        desc
    }
}

/// The `debug` node itself.
pub struct Debug {
    core: NodeCore,
    state: DebugState,
}

impl Debug {
    pub fn new() -> Self {
        let state = DebugState::new();
        let core = NodeCore::new("debug", AccessMask::READ_ONLY).with_reader(DebugReader { state: state.clone() });
        Debug { core, state }
    }

    pub fn state(&self) -> DebugState {
        self.state.clone()
    }
}

impl Default for Debug {
    fn default() -> Self {
        Self::new()
    }
}

impl DynNode for Debug {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn describe(&self) -> NodeDescription {
        NodeDescription::new()
            .with("enable", self.state.enabled(), "bool", AccessMask::READ_WRITE)
            .with("color", self.state.color(), "bool", AccessMask::READ_WRITE)
            .with("threshold", self.state.threshold(), "string", AccessMask::READ_WRITE)
    }
}

#[cfg(test)]
#[path = "debug_tests.rs"]
mod tests;

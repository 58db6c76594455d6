// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The uniformly addressable unit of the resource tree (spec §3.1 "Node",
//! §4.3 "Node base"). Every other entity in this crate *is a* node: it
//! composes a [`NodeCore`] and implements [`DynNode`].

use std::sync::Arc;

use crate::access::AccessMask;
use crate::status::ReturnCode;
use crate::strategy::{Creator, Deleter, RefusingCreator, RefusingDeleter, RefusingReader, RefusingUpdater, Reader, Updater};
use crate::value::Value;

/// One property in a node's self-description (spec §4.3: "name, value,
/// type, access-flag string").
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PropertyDescriptor {
    pub name: String,
    pub value: Value,
    pub type_name: String,
    pub access: String,
}

/// Structured listing produced by a node's default `READ` (spec §4.3,
/// §4.5 "READ without a name returns a structured listing of children").
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct NodeDescription {
    pub properties: Vec<PropertyDescriptor>,
}

impl NodeDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>, type_name: &str, access: AccessMask) -> Self {
        self.properties.push(PropertyDescriptor {
            name: name.into(),
            value: value.into(),
            type_name: type_name.to_string(),
            access: access.as_flag_string(),
        });
        self
    }
}

/// Shared state every node composes: identity, access mask, and the four
/// verb strategies (spec §4.3, §4.4).
pub struct NodeCore {
    pub name: String,
    pub flags: AccessMask,
    pub creator: Box<dyn Creator>,
    pub reader: Box<dyn Reader>,
    pub updater: Box<dyn Updater>,
    pub deleter: Box<dyn Deleter>,
}

impl NodeCore {
    /// A node with no strategies installed refuses every mutating verb and
    /// has nothing to read by name (leaves usually only need a subset of
    /// this; `with_*` below swaps in the real strategy for the verbs a
    /// node actually supports).
    pub fn new(name: impl Into<String>, flags: AccessMask) -> Self {
        NodeCore {
            name: name.into(),
            flags,
            creator: Box::new(RefusingCreator),
            reader: Box::new(RefusingReader),
            updater: Box::new(RefusingUpdater),
            deleter: Box::new(RefusingDeleter),
        }
    }

    pub fn with_creator(mut self, creator: impl Creator + 'static) -> Self {
        self.creator = Box::new(creator);
        self
    }

    pub fn with_reader(mut self, reader: impl Reader + 'static) -> Self {
        self.reader = Box::new(reader);
        self
    }

    pub fn with_updater(mut self, updater: impl Updater + 'static) -> Self {
        self.updater = Box::new(updater);
        self
    }

    pub fn with_deleter(mut self, deleter: impl Deleter + 'static) -> Self {
        self.deleter = Box::new(deleter);
        self
    }
}

/// The uniform node interface every tree entity implements.
///
/// The four verb methods have default bodies: gate on [`NodeCore::flags`],
/// then delegate to the installed strategy (spec §4.3: "Public operations
/// on a Node dispatch to the installed strategy after a flag-mask gate").
/// A concrete node overrides a verb directly only when the generic
/// strategy dispatch isn't expressive enough (spec §4.3: "If the Node
/// class overrides a verb directly... the override takes precedence").
pub trait DynNode: Send + Sync {
    fn core(&self) -> &NodeCore;

    /// Default self-description (spec §4.3). Leaves return a single
    /// property; collections and composite nodes list their children.
    fn describe(&self) -> NodeDescription;

    fn name(&self) -> &str {
        &self.core().name
    }

    fn flags(&self) -> AccessMask {
        self.core().flags
    }

    fn create(&self, name: &str, description: Option<&str>) -> Result<Arc<dyn DynNode>, ReturnCode> {
        if !self.flags().contains(AccessMask::CREATE) {
            return Err(ReturnCode::NoCreate);
        }
        self.core().creator.create(name, description)
    }

    fn read(&self, name: &str) -> Result<Arc<dyn DynNode>, ReturnCode> {
        if !self.flags().contains(AccessMask::READ) {
            return Err(ReturnCode::NoRead);
        }
        self.core().reader.read(name)
    }

    fn update(&self, value: &str) -> Result<(), ReturnCode> {
        if !self.flags().contains(AccessMask::UPDATE) {
            return Err(ReturnCode::NoUpdate);
        }
        self.core().updater.update(value)
    }

    /// The closed vocabulary (spec §4.1) has no dedicated `NO_DELETE` code;
    /// a flag-gated delete refusal reuses `NO_UPDATE`, matching
    /// `gstd_no_deleter.h`'s reuse of the update-refusal code for the
    /// analogous delete-refusal stub in the original.
    fn delete(&self, name: &str) -> Result<(), ReturnCode> {
        if !self.flags().contains(AccessMask::DELETE) {
            return Err(ReturnCode::NoUpdate);
        }
        self.core().deleter.delete(name)
    }
}

/// A leaf node materialized by a successful `READ`: wraps an already
/// fetched scalar value (spec §4.6: Property "hands the resulting typed
/// value to the formatter"). Used both for real properties (state,
/// verbose, element properties) and for synthesized leaves (`count`).
pub struct ValueNode {
    core: NodeCore,
    value: Value,
    type_name: String,
}

impl ValueNode {
    pub fn new(name: impl Into<String>, value: Value, type_name: &str, access: AccessMask) -> Self {
        ValueNode { core: NodeCore::new(name, access), value, type_name: type_name.to_string() }
    }
}

impl DynNode for ValueNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn describe(&self) -> NodeDescription {
        NodeDescription::new().with(self.core.name.clone(), self.value.clone(), &self.type_name, self.core.flags)
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;

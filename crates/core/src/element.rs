// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline elements (spec §4.8): each exposes a read-through `properties`
//! collection and, per Open Question (c), a `signals` collection that
//! reuses the event-handler plumbing for connect/disconnect/wait.

use std::sync::Arc;
use std::time::Duration;

use crate::access::AccessMask;
use crate::engine::{PipelineEngine, PipelineHandle};
use crate::node::{DynNode, NodeCore, NodeDescription};
use crate::property::{Property, PropertyType};
use crate::status::ReturnCode;
use crate::strategy::{Creator, Deleter, Reader};
use crate::value::Value;

/// A property's declared type isn't known to the engine boundary, only its
/// current live value; a type is inferred from that value's variant so the
/// property can still be listed and range-checked on update (documented as
/// a pragmatic simplification of the original's GObject property
/// introspection, which this crate does not have access to).
fn infer_property_type(value: &Value) -> PropertyType {
    match value {
        Value::Bool(_) => PropertyType::Boolean,
        Value::I64(_) => PropertyType::Integer { min: i64::MIN, max: i64::MAX },
        Value::U64(_) => PropertyType::Unsigned { max: u64::MAX },
        Value::F64(_) => PropertyType::Float { allow_nan: false },
        Value::Str(_) | Value::Null => PropertyType::String,
    }
}

struct PropertiesReader {
    engine: Arc<dyn PipelineEngine>,
    handle: PipelineHandle,
    element: String,
}

impl Reader for PropertiesReader {
    fn read(&self, name: &str) -> Result<Arc<dyn DynNode>, ReturnCode> {
        let current = self.engine.get_property(self.handle, &self.element, name)?;
        let prop_type = infer_property_type(&current);
        Ok(Arc::new(Property::new(
            name,
            prop_type,
            AccessMask::READ_WRITE,
            self.engine.clone(),
            self.handle,
            self.element.clone(),
        )))
    }
}

struct SignalsCreator {
    engine: Arc<dyn PipelineEngine>,
    handle: PipelineHandle,
    element: String,
}

impl Creator for SignalsCreator {
    fn create(&self, name: &str, _description: Option<&str>) -> Result<Arc<dyn DynNode>, ReturnCode> {
        self.engine.connect_signal(self.handle, &self.element, name)?;
        Ok(Arc::new(SignalNode {
            core: NodeCore::new(name, AccessMask::READ_ONLY),
            engine: self.engine.clone(),
            handle: self.handle,
            element: self.element.clone(),
            signal: name.to_string(),
        }))
    }
}

struct SignalsDeleter {
    engine: Arc<dyn PipelineEngine>,
    handle: PipelineHandle,
    element: String,
}

impl Deleter for SignalsDeleter {
    fn delete(&self, name: &str) -> Result<(), ReturnCode> {
        self.engine.disconnect_signal(self.handle, &self.element, name)
    }
}

/// One connected signal; `READ` performs a single bounded wait for the
/// next emission (spec Open Question (c)).
struct SignalNode {
    core: NodeCore,
    engine: Arc<dyn PipelineEngine>,
    handle: PipelineHandle,
    element: String,
    signal: String,
}

impl DynNode for SignalNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn describe(&self) -> NodeDescription {
        let value = self
            .engine
            .wait_signal(self.handle, &self.element, &self.signal, Duration::from_secs(5))
            .ok()
            .flatten()
            .unwrap_or(Value::Null);
        NodeDescription::new().with(self.signal.clone(), value, "string", AccessMask::READ_ONLY)
    }
}

struct ElementReader {
    engine: Arc<dyn PipelineEngine>,
    handle: PipelineHandle,
    element: String,
}

impl Reader for ElementReader {
    fn read(&self, name: &str) -> Result<Arc<dyn DynNode>, ReturnCode> {
        match name {
            "properties" => Ok(Arc::new(Properties::new(self.engine.clone(), self.handle, self.element.clone()))),
            "signals" => Ok(Arc::new(Signals::new(self.engine.clone(), self.handle, self.element.clone()))),
            _ => Err(ReturnCode::NoResource),
        }
    }
}

/// Read-through listing of an element's live properties.
pub struct Properties {
    core: NodeCore,
    engine: Arc<dyn PipelineEngine>,
    handle: PipelineHandle,
    element: String,
}

impl Properties {
    pub fn new(engine: Arc<dyn PipelineEngine>, handle: PipelineHandle, element: String) -> Self {
        let core = NodeCore::new("properties", AccessMask::READ_ONLY).with_reader(PropertiesReader {
            engine: engine.clone(),
            handle,
            element: element.clone(),
        });
        Properties { core, engine, handle, element }
    }
}

impl DynNode for Properties {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn describe(&self) -> NodeDescription {
        let names = self.engine.property_names(self.handle, &self.element).unwrap_or_default();
        let mut desc = NodeDescription::new();
        for name in names {
            desc = desc.with(name.clone(), name, "property", AccessMask::READ_ONLY);
        }
        desc
    }
}

/// Connect/disconnect/wait collection over an element's signals.
pub struct Signals {
    core: NodeCore,
    engine: Arc<dyn PipelineEngine>,
    handle: PipelineHandle,
    element: String,
}

impl Signals {
    pub fn new(engine: Arc<dyn PipelineEngine>, handle: PipelineHandle, element: String) -> Self {
        let core = NodeCore::new("signals", AccessMask::FULL)
            .with_creator(SignalsCreator { engine: engine.clone(), handle, element: element.clone() })
            .with_deleter(SignalsDeleter { engine: engine.clone(), handle, element: element.clone() });
        Signals { core, engine, handle, element }
    }
}

impl DynNode for Signals {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn describe(&self) -> NodeDescription {
        let names = self.engine.signal_names(self.handle, &self.element).unwrap_or_default();
        let mut desc = NodeDescription::new();
        for name in names {
            desc = desc.with(name.clone(), name, "signal", AccessMask::READ_ONLY);
        }
        desc
    }
}

/// A pipeline element, addressed by `<pipeline>/elements/<name>`.
pub struct Element {
    core: NodeCore,
    name: String,
}

impl Element {
    pub fn new(name: impl Into<String>, engine: Arc<dyn PipelineEngine>, handle: PipelineHandle) -> Self {
        let name = name.into();
        let core = NodeCore::new(name.clone(), AccessMask::READ_ONLY).with_reader(ElementReader {
            engine,
            handle,
            element: name.clone(),
        });
        Element { core, name }
    }
}

impl DynNode for Element {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn describe(&self) -> NodeDescription {
        NodeDescription::new().with("name", self.name.clone(), "string", AccessMask::READ_ONLY)
    }
}

#[cfg(test)]
#[path = "element_tests.rs"]
mod tests;

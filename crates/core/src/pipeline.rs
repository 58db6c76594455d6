// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A single pipeline instance (spec §4.7). Owns the per-pipeline mutex
//! that serializes state transitions (spec §5 concurrency model) and
//! composes the `elements`, `bus`, and `event` sub-trees.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::access::AccessMask;
use crate::bus::BusNode;
use crate::element::Element;
use crate::engine::{PipelineEngine, PipelineHandle, PipelineState};
use crate::event::EventHandlerNode;
use crate::node::{DynNode, NodeCore, NodeDescription};
use crate::status::ReturnCode;
use crate::strategy::{Reader, Updater};
use crate::value::Value;

/// How long `update state=X` waits for the engine to settle into the
/// requested state before giving up (resolves Open Question (a): a single
/// shared timeout rather than a per-transition budget, matching the
/// original's 5-second bus-pop budget in `gstd_pipeline_bus.c`).
pub const STATE_CHANGE_TIMEOUT: Duration = Duration::from_secs(5);

struct StateUpdater {
    engine: Arc<dyn PipelineEngine>,
    handle: PipelineHandle,
    lock: Arc<Mutex<()>>,
}

impl Updater for StateUpdater {
    fn update(&self, value: &str) -> Result<(), ReturnCode> {
        let target = PipelineState::parse(value.trim()).ok_or(ReturnCode::BadValue)?;
        let _guard = self.lock.lock();
        self.engine.set_state(self.handle, target)?;
        let deadline = Instant::now() + STATE_CHANGE_TIMEOUT;
        loop {
            let current = self.engine.state(self.handle)?;
            if current == target {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(ReturnCode::StateError);
            }
            std::thread::sleep(Duration::from_millis(10));
        }
    }
}

struct LiveLeafReader;
impl Reader for LiveLeafReader {
    fn read(&self, _name: &str) -> Result<Arc<dyn DynNode>, ReturnCode> {
        Err(ReturnCode::NoResource)
    }
}

struct StateNode {
    core: NodeCore,
    engine: Arc<dyn PipelineEngine>,
    handle: PipelineHandle,
}

impl DynNode for StateNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn describe(&self) -> NodeDescription {
        let state = self.engine.state(self.handle).unwrap_or(PipelineState::Null);
        NodeDescription::new().with("state", state.as_str(), "string", self.core.flags)
    }
}

struct GraphNode {
    core: NodeCore,
    engine: Arc<dyn PipelineEngine>,
    handle: PipelineHandle,
}

impl DynNode for GraphNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn describe(&self) -> NodeDescription {
        let graph = self.engine.graph(self.handle).unwrap_or_default();
        NodeDescription::new().with("graph", graph, "string", self.core.flags)
    }
}

struct VerboseUpdater {
    engine: Arc<dyn PipelineEngine>,
    handle: PipelineHandle,
}

impl Updater for VerboseUpdater {
    fn update(&self, value: &str) -> Result<(), ReturnCode> {
        let verbose = crate::property::PropertyType::Boolean.parse(value)?;
        match verbose {
            Value::Bool(verbose) => self.engine.set_verbose(self.handle, verbose),
            _ => Err(ReturnCode::BadValue),
        }
    }
}

struct VerboseNode {
    core: NodeCore,
    engine: Arc<dyn PipelineEngine>,
    handle: PipelineHandle,
}

impl DynNode for VerboseNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn describe(&self) -> NodeDescription {
        let verbose = self.engine.verbose(self.handle).unwrap_or(false);
        NodeDescription::new().with("verbose", verbose, "bool", self.core.flags)
    }
}

struct PipelineReader {
    name: String,
    description: String,
    engine: Arc<dyn PipelineEngine>,
    handle: PipelineHandle,
    lock: Arc<Mutex<()>>,
    bus: Arc<BusNode>,
}

impl Reader for PipelineReader {
    fn read(&self, name: &str) -> Result<Arc<dyn DynNode>, ReturnCode> {
        match name {
            "name" => Ok(Arc::new(crate::node::ValueNode::new(
                "name",
                Value::Str(self.name.clone()),
                "string",
                AccessMask::READ_ONLY,
            ))),
            "description" => Ok(Arc::new(crate::node::ValueNode::new(
                "description",
                Value::Str(self.description.clone()),
                "string",
                AccessMask::READ_ONLY,
            ))),
            "state" => Ok(Arc::new(StateNode {
                core: NodeCore::new("state", AccessMask::READ_WRITE)
                    .with_reader(LiveLeafReader)
                    .with_updater(StateUpdater { engine: self.engine.clone(), handle: self.handle, lock: self.lock.clone() }),
                engine: self.engine.clone(),
                handle: self.handle,
            })),
            "verbose" => Ok(Arc::new(VerboseNode {
                core: NodeCore::new("verbose", AccessMask::READ_WRITE)
                    .with_reader(LiveLeafReader)
                    .with_updater(VerboseUpdater { engine: self.engine.clone(), handle: self.handle }),
                engine: self.engine.clone(),
                handle: self.handle,
            })),
            "graph" => Ok(Arc::new(GraphNode {
                core: NodeCore::new("graph", AccessMask::READ_ONLY).with_reader(LiveLeafReader),
                engine: self.engine.clone(),
                handle: self.handle,
            })),
            "elements" => Ok(Arc::new(ElementsNode::new(self.engine.clone(), self.handle))),
            "bus" => Ok(self.bus.clone() as Arc<dyn DynNode>),
            "event" => Ok(Arc::new(EventHandlerNode::new(self.engine.clone(), self.handle))),
            _ => Err(ReturnCode::NoResource),
        }
    }
}

/// Read-through listing of a pipeline's current elements (spec §4.8): the
/// engine is the source of truth, so (unlike [`crate::Collection`]) this
/// holds no cached child map of its own.
struct ElementsNode {
    core: NodeCore,
    engine: Arc<dyn PipelineEngine>,
    handle: PipelineHandle,
}

impl ElementsNode {
    fn new(engine: Arc<dyn PipelineEngine>, handle: PipelineHandle) -> Self {
        let core = NodeCore::new("elements", AccessMask::READ_ONLY)
            .with_reader(ElementsReader { engine: engine.clone(), handle });
        ElementsNode { core, engine, handle }
    }
}

struct ElementsReader {
    engine: Arc<dyn PipelineEngine>,
    handle: PipelineHandle,
}

impl Reader for ElementsReader {
    fn read(&self, name: &str) -> Result<Arc<dyn DynNode>, ReturnCode> {
        let names = self.engine.elements(self.handle)?;
        if !names.iter().any(|n| n == name) {
            return Err(ReturnCode::NoResource);
        }
        Ok(Arc::new(Element::new(name, self.engine.clone(), self.handle)))
    }
}

impl DynNode for ElementsNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn describe(&self) -> NodeDescription {
        let names = self.engine.elements(self.handle).unwrap_or_default();
        let mut desc = NodeDescription::new();
        for name in &names {
            desc = desc.with(name.clone(), name.clone(), "element", AccessMask::READ_ONLY);
        }
        desc.with("count", names.len() as u64, "uint", AccessMask::READ_ONLY)
    }
}

/// A single pipeline, created from a textual description and torn down
/// when its last reference drops.
pub struct Pipeline {
    core: NodeCore,
    engine: Arc<dyn PipelineEngine>,
    handle: PipelineHandle,
    description: String,
    /// Serializes state transitions against this one pipeline (spec §5:
    /// "one mutex per pipeline guards state transitions").
    lock: Arc<Mutex<()>>,
}

impl Pipeline {
    pub fn new(name: impl Into<String>, description: &str, engine: Arc<dyn PipelineEngine>) -> Result<Self, ReturnCode> {
        let name = name.into();
        let handle = engine.parse(description)?;
        let lock = Arc::new(Mutex::new(()));
        let bus = Arc::new(BusNode::new(engine.clone(), handle));
        let core = NodeCore::new(name.clone(), AccessMask::READ_WRITE).with_reader(PipelineReader {
            name: name.clone(),
            description: description.to_string(),
            engine: engine.clone(),
            handle,
            lock: lock.clone(),
            bus,
        });
        Ok(Pipeline { core, engine, handle, description: description.to_string(), lock })
    }
}

impl DynNode for Pipeline {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn describe(&self) -> NodeDescription {
        let state = self.engine.state(self.handle).unwrap_or(PipelineState::Null);
        NodeDescription::new()
            .with("name", self.core.name.clone(), "string", AccessMask::READ_ONLY)
            .with("description", self.description.clone(), "string", AccessMask::READ_ONLY)
            .with("state", state.as_str(), "string", AccessMask::READ_WRITE)
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        self.engine.release(self.handle);
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;

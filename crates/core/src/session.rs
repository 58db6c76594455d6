// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The resource tree's root (spec §4.10) and URI resolver, plus the
//! refcounted-pipeline convenience layer (spec §9).

use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::access::AccessMask;
use crate::collection::Collection;
use crate::debug::Debug;
use crate::engine::PipelineEngine;
use crate::node::{DynNode, NodeCore, NodeDescription, ValueNode};
use crate::pipeline::Pipeline;
use crate::status::ReturnCode;
use crate::strategy::Reader;
use crate::value::Value;

static SESSION: OnceLock<Arc<Session>> = OnceLock::new();

#[derive(Debug, Clone, Copy, Default)]
struct RefCount {
    create_count: u32,
    play_count: u32,
}

struct SessionReader {
    pipelines: Arc<Collection<Pipeline>>,
    debug: Arc<Debug>,
    pid: u32,
}

impl Reader for SessionReader {
    fn read(&self, name: &str) -> Result<Arc<dyn DynNode>, ReturnCode> {
        match name {
            "pipelines" => Ok(self.pipelines.clone() as Arc<dyn DynNode>),
            "debug" => Ok(self.debug.clone() as Arc<dyn DynNode>),
            "pid" => Ok(Arc::new(ValueNode::new("pid", Value::U64(self.pid as u64), "uint", AccessMask::READ_ONLY))),
            _ => Err(ReturnCode::NoResource),
        }
    }
}

/// The process-wide resource tree (spec §4.10: `GstdSession` equivalent).
/// Root listing is `{pipelines, debug}` plus a read-only `pid`.
pub struct Session {
    core: NodeCore,
    pipelines: Arc<Collection<Pipeline>>,
    debug: Arc<Debug>,
    refcounts: Mutex<IndexMap<String, RefCount>>,
}

impl Session {
    /// Construct a fresh session over `engine`. Prefer this for tests and
    /// for explicit wiring at daemon startup; use [`Session::install`] /
    /// [`Session::get`] only where a genuinely process-wide handle is
    /// needed (e.g. the `debug enable` signal handler).
    pub fn new(engine: Arc<dyn PipelineEngine>) -> Arc<Self> {
        let pid = std::process::id();
        let debug = Arc::new(Debug::new());
        let pipelines_engine = engine.clone();
        let pipelines = Arc::new(Collection::new("pipelines", AccessMask::FULL, "pipeline", move |name, description| {
            let description = description.ok_or(ReturnCode::MissingArgument)?;
            Pipeline::new(name, description, pipelines_engine.clone()).map(Arc::new)
        }));
        let core = NodeCore::new("session", AccessMask::READ_ONLY).with_reader(SessionReader {
            pipelines: pipelines.clone(),
            debug: debug.clone(),
            pid,
        });
        Arc::new(Session { core, pipelines, debug, refcounts: Mutex::new(IndexMap::new()) })
    }

    /// Install `session` as the process-wide singleton. No-op (returns
    /// `false`) if one was already installed.
    pub fn install(session: Arc<Session>) -> bool {
        SESSION.set(session).is_ok()
    }

    pub fn get() -> Option<Arc<Session>> {
        SESSION.get().cloned()
    }

    pub fn pipelines(&self) -> &Collection<Pipeline> {
        &self.pipelines
    }

    pub fn debug(&self) -> &Debug {
        &self.debug
    }

    /// Resolve a `/`-separated URI against the tree, descending one
    /// segment at a time via each node's `READ` (spec §4.10).
    pub fn resolve(self: &Arc<Self>, uri: &str) -> Result<Arc<dyn DynNode>, ReturnCode> {
        let mut current: Arc<dyn DynNode> = self.clone();
        for segment in uri.split('/').filter(|s| !s.is_empty()) {
            current = current.read(segment)?;
        }
        Ok(current)
    }

    /// `pipeline_create_ref` (spec §9): `create_count` 0->1 creates the
    /// pipeline; any higher transition is a no-op that still returns `OK`.
    pub fn create_ref(&self, name: &str, description: &str) -> Result<(), ReturnCode> {
        let mut counts = self.refcounts.lock();
        let entry = counts.entry(name.to_string()).or_default();
        if entry.create_count == 0 {
            self.pipelines.create(name, Some(description))?;
        }
        entry.create_count += 1;
        Ok(())
    }

    /// `pipeline_play_ref`: `play_count` 0->1 plays the pipeline.
    pub fn play_ref(&self, name: &str) -> Result<(), ReturnCode> {
        let needs_play = {
            let mut counts = self.refcounts.lock();
            let entry = counts.get_mut(name).ok_or(ReturnCode::NoPipeline)?;
            entry.play_count += 1;
            entry.play_count == 1
        };
        if needs_play {
            self.pipelines.read(name)?.read("state")?.update("playing")?;
        }
        Ok(())
    }

    /// `pipeline_pause_ref`: `play_count` N->0 pauses the pipeline.
    pub fn pause_ref(&self, name: &str) -> Result<(), ReturnCode> {
        let needs_pause = {
            let mut counts = self.refcounts.lock();
            let entry = counts.get_mut(name).ok_or(ReturnCode::NoPipeline)?;
            entry.play_count = entry.play_count.saturating_sub(1);
            entry.play_count == 0
        };
        if needs_pause {
            self.pipelines.read(name)?.read("state")?.update("paused")?;
        }
        Ok(())
    }

    /// `pipeline_stop_ref`: like [`Session::pause_ref`] but settles the
    /// pipeline to `null` rather than `paused` once `play_count` reaches
    /// zero, matching `pipeline_stop`'s plain (non-refcounted) target state.
    pub fn stop_ref(&self, name: &str) -> Result<(), ReturnCode> {
        let needs_stop = {
            let mut counts = self.refcounts.lock();
            let entry = counts.get_mut(name).ok_or(ReturnCode::NoPipeline)?;
            entry.play_count = entry.play_count.saturating_sub(1);
            entry.play_count == 0
        };
        if needs_stop {
            self.pipelines.read(name)?.read("state")?.update("null")?;
        }
        Ok(())
    }

    /// `pipeline_delete_ref`: `create_count` N->0 deletes the pipeline.
    pub fn delete_ref(&self, name: &str) -> Result<(), ReturnCode> {
        let should_delete = {
            let mut counts = self.refcounts.lock();
            let entry = counts.get_mut(name).ok_or(ReturnCode::NoPipeline)?;
            entry.create_count = entry.create_count.saturating_sub(1);
            let zero = entry.create_count == 0;
            if zero {
                counts.shift_remove(name);
            }
            zero
        };
        if should_delete {
            self.pipelines.delete(name)?;
        }
        Ok(())
    }

    /// Drive every live pipeline to `Null` (spec invariant 6: teardown
    /// cancels in-flight bus reads and settles every pipeline first).
    pub fn shutdown(&self) {
        for name in self.pipelines.names() {
            if let Some(pipeline) = self.pipelines.get(&name) {
                if let Ok(state_node) = pipeline.read("state") {
                    let _ = state_node.update("null");
                }
            }
        }
    }
}

impl DynNode for Session {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn describe(&self) -> NodeDescription {
        NodeDescription::new()
            .with("pipelines", self.pipelines.len() as u64, "pipelines", AccessMask::READ_ONLY)
            .with("pid", std::process::id() as u64, "uint", AccessMask::READ_ONLY)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;

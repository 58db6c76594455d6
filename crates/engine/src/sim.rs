// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use parking_lot::{Condvar, Mutex};
use thiserror::Error;

use gstd_core::{BusMessage, BusPopOutcome, EventKind, MsgTypeMask, PipelineEngine, PipelineHandle, PipelineState, ReturnCode, Value};

/// Internal failure modes specific to the simulation; mapped onto
/// [`ReturnCode`] at the [`PipelineEngine`] boundary rather than leaked
/// through it, matching the crate-boundary error style the rest of this
/// workspace uses `thiserror` for.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown pipeline handle")]
    UnknownPipeline,
    #[error("unknown element {0:?}")]
    UnknownElement(String),
    #[error("invalid pipeline description")]
    InvalidDescription,
}

impl From<EngineError> for ReturnCode {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::UnknownPipeline => ReturnCode::NoPipeline,
            EngineError::UnknownElement(_) => ReturnCode::NoResource,
            EngineError::InvalidDescription => ReturnCode::BadDescription,
        }
    }
}

struct ElementState {
    factory: String,
    properties: IndexMap<String, Value>,
}

struct BusState {
    messages: Mutex<VecDeque<BusMessage>>,
    flushed: Mutex<bool>,
    condvar: Condvar,
    next_seqnum: AtomicU64,
}

impl BusState {
    fn new() -> Self {
        BusState { messages: Mutex::new(VecDeque::new()), flushed: Mutex::new(false), condvar: Condvar::new(), next_seqnum: AtomicU64::new(0) }
    }

    fn push(&self, message: BusMessage) {
        let seqnum = self.next_seqnum.fetch_add(1, Ordering::Relaxed) as u32;
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        self.messages.lock().push_back(message.with_meta(timestamp, seqnum));
        self.condvar.notify_all();
    }

    fn flush(&self) {
        *self.flushed.lock() = true;
        self.condvar.notify_all();
    }

    fn pop(&self, mask: MsgTypeMask, timeout: Duration) -> BusPopOutcome {
        let deadline = Instant::now() + timeout;
        let mut messages = self.messages.lock();
        loop {
            if let Some(index) = messages.iter().position(|m| mask.contains(m.mask())) {
                if let Some(message) = messages.remove(index) {
                    return BusPopOutcome::Message(message);
                }
            }
            if std::mem::take(&mut *self.flushed.lock()) {
                return BusPopOutcome::Flushed;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return BusPopOutcome::Timeout;
            }
            let timed_out = self.condvar.wait_for(&mut messages, remaining).timed_out();
            if timed_out {
                return BusPopOutcome::Timeout;
            }
        }
    }
}

struct PipelineSim {
    state: Mutex<PipelineState>,
    elements: Mutex<IndexMap<String, ElementState>>,
    bus: BusState,
    verbose: Mutex<bool>,
}

/// A deterministic, in-process stand-in for a real media pipeline engine.
/// State transitions are instantaneous (no `Async` phase is ever observed
/// by a caller polling `state()`), which is enough to exercise every
/// control-plane path without needing real media I/O.
pub struct SimEngine {
    pipelines: Mutex<IndexMap<u64, Arc<PipelineSim>>>,
    next_handle: AtomicU64,
}

impl SimEngine {
    pub fn new() -> Self {
        SimEngine { pipelines: Mutex::new(IndexMap::new()), next_handle: AtomicU64::new(1) }
    }

    fn get(&self, handle: PipelineHandle) -> Result<Arc<PipelineSim>, EngineError> {
        self.pipelines.lock().get(&handle.0).cloned().ok_or(EngineError::UnknownPipeline)
    }
}

impl Default for SimEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineEngine for SimEngine {
    fn parse(&self, description: &str) -> Result<PipelineHandle, ReturnCode> {
        let parsed = crate::parse::parse_description(description).ok_or(EngineError::InvalidDescription)?;
        let mut elements = IndexMap::new();
        for element in parsed {
            elements.insert(element.name, ElementState { factory: element.factory, properties: IndexMap::new() });
        }
        let sim = Arc::new(PipelineSim {
            state: Mutex::new(PipelineState::Null),
            elements: Mutex::new(elements),
            bus: BusState::new(),
            verbose: Mutex::new(false),
        });
        let id = self.next_handle.fetch_add(1, Ordering::Relaxed);
        self.pipelines.lock().insert(id, sim);
        Ok(PipelineHandle(id))
    }

    fn release(&self, handle: PipelineHandle) {
        self.pipelines.lock().shift_remove(&handle.0);
    }

    fn set_state(&self, handle: PipelineHandle, state: PipelineState) -> Result<(), ReturnCode> {
        let sim = self.get(handle)?;
        *sim.state.lock() = state;
        if state == PipelineState::Playing {
            sim.bus.push(BusMessage::StateChanged {
                source: "pipeline".to_string(),
                timestamp: 0,
                seqnum: 0,
                old: "paused".to_string(),
                new: "playing".to_string(),
                pending: "void-pending".to_string(),
            });
        }
        Ok(())
    }

    fn state(&self, handle: PipelineHandle) -> Result<PipelineState, ReturnCode> {
        Ok(*self.get(handle)?.state.lock())
    }

    fn graph(&self, handle: PipelineHandle) -> Result<String, ReturnCode> {
        let sim = self.get(handle)?;
        let elements = sim.elements.lock();
        let mut dot = String::from("digraph pipeline {\n");
        let names: Vec<&String> = elements.keys().collect();
        for pair in names.windows(2) {
            dot.push_str(&format!("  \"{}\" -> \"{}\";\n", pair[0], pair[1]));
        }
        dot.push('}');
        Ok(dot)
    }

    fn elements(&self, handle: PipelineHandle) -> Result<Vec<String>, ReturnCode> {
        Ok(self.get(handle)?.elements.lock().keys().cloned().collect())
    }

    fn get_property(&self, handle: PipelineHandle, element: &str, property: &str) -> Result<Value, ReturnCode> {
        let sim = self.get(handle)?;
        let elements = sim.elements.lock();
        let el = elements.get(element).ok_or_else(|| EngineError::UnknownElement(element.to_string()))?;
        el.properties.get(property).cloned().ok_or(ReturnCode::NoResource)
    }

    fn set_property(&self, handle: PipelineHandle, element: &str, property: &str, value: &str) -> Result<(), ReturnCode> {
        let sim = self.get(handle)?;
        let mut elements = sim.elements.lock();
        let el = elements.get_mut(element).ok_or_else(|| EngineError::UnknownElement(element.to_string()))?;
        el.properties.insert(property.to_string(), Value::Str(value.to_string()));
        drop(elements);
        sim.bus.push(BusMessage::PropertyNotify {
            source: element.to_string(),
            timestamp: 0,
            seqnum: 0,
            property_name: property.to_string(),
            value: Value::Str(value.to_string()),
        });
        Ok(())
    }

    fn property_names(&self, handle: PipelineHandle, element: &str) -> Result<Vec<String>, ReturnCode> {
        let sim = self.get(handle)?;
        let elements = sim.elements.lock();
        let el = elements.get(element).ok_or_else(|| EngineError::UnknownElement(element.to_string()))?;
        Ok(el.properties.keys().cloned().collect())
    }

    fn signal_names(&self, handle: PipelineHandle, element: &str) -> Result<Vec<String>, ReturnCode> {
        let sim = self.get(handle)?;
        let elements = sim.elements.lock();
        let el = elements.get(element).ok_or_else(|| EngineError::UnknownElement(element.to_string()))?;
        Ok(match el.factory.as_str() {
            "uridecodebin" | "decodebin" => vec!["pad-added".to_string()],
            _ => Vec::new(),
        })
    }

    fn connect_signal(&self, handle: PipelineHandle, element: &str, _signal: &str) -> Result<(), ReturnCode> {
        self.get(handle).map(|_| ())
    }

    fn disconnect_signal(&self, handle: PipelineHandle, _element: &str, _signal: &str) -> Result<(), ReturnCode> {
        self.get(handle).map(|_| ())
    }

    fn wait_signal(
        &self,
        handle: PipelineHandle,
        _element: &str,
        _signal: &str,
        _timeout: Duration,
    ) -> Result<Option<Value>, ReturnCode> {
        self.get(handle)?;
        Ok(None)
    }

    fn send_event(&self, handle: PipelineHandle, event: EventKind) -> Result<(), ReturnCode> {
        let sim = self.get(handle)?;
        if matches!(event, EventKind::Eos) {
            sim.bus.push(BusMessage::Eos { source: "pipeline".to_string(), timestamp: 0, seqnum: 0 });
        }
        Ok(())
    }

    fn verbose(&self, handle: PipelineHandle) -> Result<bool, ReturnCode> {
        Ok(*self.get(handle)?.verbose.lock())
    }

    fn set_verbose(&self, handle: PipelineHandle, verbose: bool) -> Result<(), ReturnCode> {
        *self.get(handle)?.verbose.lock() = verbose;
        Ok(())
    }

    fn bus_pop(&self, handle: PipelineHandle, mask: MsgTypeMask, timeout: Duration) -> Result<BusPopOutcome, ReturnCode> {
        let sim = self.get(handle)?;
        Ok(sim.bus.pop(mask, timeout))
    }

    fn bus_flush(&self, handle: PipelineHandle) {
        if let Ok(sim) = self.get(handle) {
            sim.bus.flush();
        }
    }
}

#[cfg(test)]
#[path = "sim_tests.rs"]
mod tests;

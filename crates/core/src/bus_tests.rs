// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::engine::PipelineState;

/// Minimal stand-in engine for exercising `BusNode` in isolation; the real
/// deterministic engine lives in a downstream crate that depends on this
/// one, so it can't be used from here.
struct StubEngine {
    outcome: parking_lot::Mutex<BusPopOutcome>,
}

impl PipelineEngine for StubEngine {
    fn parse(&self, _description: &str) -> Result<PipelineHandle, ReturnCode> {
        Ok(PipelineHandle(1))
    }
    fn release(&self, _handle: PipelineHandle) {}
    fn set_state(&self, _handle: PipelineHandle, _state: PipelineState) -> Result<(), ReturnCode> {
        Ok(())
    }
    fn state(&self, _handle: PipelineHandle) -> Result<PipelineState, ReturnCode> {
        Ok(PipelineState::Null)
    }
    fn graph(&self, _handle: PipelineHandle) -> Result<String, ReturnCode> {
        Ok(String::new())
    }
    fn elements(&self, _handle: PipelineHandle) -> Result<Vec<String>, ReturnCode> {
        Ok(Vec::new())
    }
    fn get_property(&self, _handle: PipelineHandle, _element: &str, _property: &str) -> Result<Value, ReturnCode> {
        Err(ReturnCode::NoResource)
    }
    fn set_property(&self, _handle: PipelineHandle, _element: &str, _property: &str, _value: &str) -> Result<(), ReturnCode> {
        Err(ReturnCode::NoResource)
    }
    fn property_names(&self, _handle: PipelineHandle, _element: &str) -> Result<Vec<String>, ReturnCode> {
        Ok(Vec::new())
    }
    fn signal_names(&self, _handle: PipelineHandle, _element: &str) -> Result<Vec<String>, ReturnCode> {
        Ok(Vec::new())
    }
    fn connect_signal(&self, _handle: PipelineHandle, _element: &str, _signal: &str) -> Result<(), ReturnCode> {
        Ok(())
    }
    fn disconnect_signal(&self, _handle: PipelineHandle, _element: &str, _signal: &str) -> Result<(), ReturnCode> {
        Ok(())
    }
    fn wait_signal(
        &self,
        _handle: PipelineHandle,
        _element: &str,
        _signal: &str,
        _timeout: Duration,
    ) -> Result<Option<Value>, ReturnCode> {
        Ok(None)
    }
    fn send_event(&self, _handle: PipelineHandle, _event: crate::engine::EventKind) -> Result<(), ReturnCode> {
        Ok(())
    }
    fn verbose(&self, _handle: PipelineHandle) -> Result<bool, ReturnCode> {
        Ok(false)
    }
    fn set_verbose(&self, _handle: PipelineHandle, _verbose: bool) -> Result<(), ReturnCode> {
        Ok(())
    }
    fn bus_pop(&self, _handle: PipelineHandle, _mask: MsgTypeMask, _timeout: Duration) -> Result<BusPopOutcome, ReturnCode> {
        Ok(self.outcome.lock().clone())
    }
    fn bus_flush(&self, _handle: PipelineHandle) {}
}

#[test]
fn message_read_surfaces_timeout_as_empty_not_an_error() {
    let engine: Arc<dyn PipelineEngine> =
        Arc::new(StubEngine { outcome: parking_lot::Mutex::new(BusPopOutcome::Timeout) });
    let bus = BusNode::new(engine, PipelineHandle(1));
    let node = bus.read("message").unwrap();
    assert!(node.describe().properties.is_empty());
}

#[test]
fn message_read_surfaces_flushed_as_event_error() {
    let engine: Arc<dyn PipelineEngine> =
        Arc::new(StubEngine { outcome: parking_lot::Mutex::new(BusPopOutcome::Flushed) });
    let bus = BusNode::new(engine, PipelineHandle(1));
    assert_eq!(bus.read("message").unwrap_err(), ReturnCode::EventError);
}

#[test]
fn message_read_returns_matched_message() {
    let msg = BusMessage::Eos { source: "pipe0".to_string(), timestamp: 42, seqnum: 7 };
    let engine: Arc<dyn PipelineEngine> =
        Arc::new(StubEngine { outcome: parking_lot::Mutex::new(BusPopOutcome::Message(msg)) });
    let bus = BusNode::new(engine, PipelineHandle(1));
    let node = bus.read("message").unwrap();
    assert_eq!(node.name(), "message");
    let desc = node.describe();
    assert_eq!(desc.properties[0].name, "type");
    assert_eq!(desc.properties[0].value, Value::Str("eos".to_string()));
    assert_eq!(desc.properties[1].name, "source");
    assert_eq!(desc.properties[2].name, "timestamp");
    assert_eq!(desc.properties[2].value, Value::U64(42));
    assert_eq!(desc.properties[3].name, "seqnum");
    assert_eq!(desc.properties[3].value, Value::U64(7));
}

#[test]
fn state_changed_projects_variant_fields_after_common_ones() {
    let msg = BusMessage::StateChanged {
        source: "pipe0".to_string(),
        timestamp: 1,
        seqnum: 1,
        old: "paused".to_string(),
        new: "playing".to_string(),
        pending: "void-pending".to_string(),
    };
    let desc = msg.describe();
    let names: Vec<&str> = desc.properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["type", "source", "timestamp", "seqnum", "old", "new", "pending"]);
}

#[test]
fn types_and_timeout_are_updatable_through_the_tree() {
    let engine: Arc<dyn PipelineEngine> =
        Arc::new(StubEngine { outcome: parking_lot::Mutex::new(BusPopOutcome::Timeout) });
    let bus = BusNode::new(engine, PipelineHandle(1));

    let types = bus.read("types").unwrap();
    types.update("eos+qos").unwrap();
    assert_eq!(bus.config.types(), MsgTypeMask::EOS | MsgTypeMask::QOS);

    let timeout = bus.read("timeout").unwrap();
    timeout.update("1000000").unwrap();
    assert_eq!(bus.config.timeout_nanos(), 1_000_000);
}

#[test]
fn types_update_rejects_unknown_token() {
    let engine: Arc<dyn PipelineEngine> =
        Arc::new(StubEngine { outcome: parking_lot::Mutex::new(BusPopOutcome::Timeout) });
    let bus = BusNode::new(engine, PipelineHandle(1));
    let types = bus.read("types").unwrap();
    assert_eq!(types.update("bogus").unwrap_err(), ReturnCode::BadValue);
}

#[test]
fn negative_timeout_means_wait_forever() {
    let engine: Arc<dyn PipelineEngine> =
        Arc::new(StubEngine { outcome: parking_lot::Mutex::new(BusPopOutcome::Timeout) });
    let bus = BusNode::new(engine, PipelineHandle(1));
    let timeout = bus.read("timeout").unwrap();
    timeout.update("-1").unwrap();
    assert_eq!(bus.config.timeout_nanos(), -1);
    assert_eq!(bus.config.timeout(), Duration::MAX);
}

#[test]
fn set_types_and_set_timeout_are_reachable_and_describe_reflects_them() {
    let engine: Arc<dyn PipelineEngine> =
        Arc::new(StubEngine { outcome: parking_lot::Mutex::new(BusPopOutcome::Timeout) });
    let bus = BusNode::new(engine, PipelineHandle(1));
    bus.set_types(MsgTypeMask::ERROR);
    bus.set_timeout(250);
    let desc = bus.describe();
    assert!(desc.properties.iter().any(|p| p.name == "types" && p.value == Value::Str("error".to_string())));
    assert!(desc.properties.iter().any(|p| p.name == "timeout" && p.value == Value::I64(250)));
}

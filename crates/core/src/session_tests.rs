// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::*;
use crate::bus::BusPopOutcome;
use crate::engine::{EventKind, MsgTypeMask, PipelineState};

struct StubEngine {
    state: Mutex<PipelineState>,
}

impl PipelineEngine for StubEngine {
    fn parse(&self, description: &str) -> Result<crate::engine::PipelineHandle, ReturnCode> {
        if description.is_empty() {
            return Err(ReturnCode::BadDescription);
        }
        Ok(crate::engine::PipelineHandle(1))
    }
    fn release(&self, _handle: crate::engine::PipelineHandle) {}
    fn set_state(&self, _handle: crate::engine::PipelineHandle, state: PipelineState) -> Result<(), ReturnCode> {
        *self.state.lock() = state;
        Ok(())
    }
    fn state(&self, _handle: crate::engine::PipelineHandle) -> Result<PipelineState, ReturnCode> {
        Ok(*self.state.lock())
    }
    fn graph(&self, _handle: crate::engine::PipelineHandle) -> Result<String, ReturnCode> {
        Ok(String::new())
    }
    fn elements(&self, _handle: crate::engine::PipelineHandle) -> Result<Vec<String>, ReturnCode> {
        Ok(Vec::new())
    }
    fn get_property(&self, _handle: crate::engine::PipelineHandle, _element: &str, _property: &str) -> Result<Value, ReturnCode> {
        Err(ReturnCode::NoResource)
    }
    fn set_property(&self, _handle: crate::engine::PipelineHandle, _element: &str, _property: &str, _value: &str) -> Result<(), ReturnCode> {
        Err(ReturnCode::NoResource)
    }
    fn property_names(&self, _handle: crate::engine::PipelineHandle, _element: &str) -> Result<Vec<String>, ReturnCode> {
        Ok(Vec::new())
    }
    fn signal_names(&self, _handle: crate::engine::PipelineHandle, _element: &str) -> Result<Vec<String>, ReturnCode> {
        Ok(Vec::new())
    }
    fn connect_signal(&self, _handle: crate::engine::PipelineHandle, _element: &str, _signal: &str) -> Result<(), ReturnCode> {
        Ok(())
    }
    fn disconnect_signal(&self, _handle: crate::engine::PipelineHandle, _element: &str, _signal: &str) -> Result<(), ReturnCode> {
        Ok(())
    }
    fn wait_signal(
        &self,
        _handle: crate::engine::PipelineHandle,
        _element: &str,
        _signal: &str,
        _timeout: Duration,
    ) -> Result<Option<Value>, ReturnCode> {
        Ok(None)
    }
    fn send_event(&self, _handle: crate::engine::PipelineHandle, _event: EventKind) -> Result<(), ReturnCode> {
        Ok(())
    }
    fn verbose(&self, _handle: crate::engine::PipelineHandle) -> Result<bool, ReturnCode> {
        Ok(false)
    }
    fn set_verbose(&self, _handle: crate::engine::PipelineHandle, _verbose: bool) -> Result<(), ReturnCode> {
        Ok(())
    }
    fn bus_pop(&self, _handle: crate::engine::PipelineHandle, _mask: MsgTypeMask, _timeout: Duration) -> Result<BusPopOutcome, ReturnCode> {
        Ok(BusPopOutcome::Timeout)
    }
    fn bus_flush(&self, _handle: crate::engine::PipelineHandle) {}
}

fn session() -> Arc<Session> {
    Session::new(Arc::new(StubEngine { state: Mutex::new(PipelineState::Null) }))
}

#[test]
fn resolve_descends_through_pipelines_and_state() {
    let session = session();
    session.pipelines().create("p0", Some("videotestsrc ! fakesink")).unwrap();
    let node = session.resolve("pipelines/p0/state").unwrap();
    assert_eq!(node.name(), "state");
}

#[test]
fn resolve_missing_segment_is_no_resource() {
    let session = session();
    assert_eq!(session.resolve("pipelines/missing").unwrap_err(), ReturnCode::NoResource);
}

#[test]
fn refcounted_create_is_idempotent_until_zero() {
    let session = session();
    session.create_ref("p0", "videotestsrc ! fakesink").unwrap();
    session.create_ref("p0", "videotestsrc ! fakesink").unwrap();
    assert_eq!(session.pipelines().len(), 1);
    session.delete_ref("p0").unwrap();
    assert_eq!(session.pipelines().len(), 1, "still referenced once");
    session.delete_ref("p0").unwrap();
    assert_eq!(session.pipelines().len(), 0);
}

#[test]
fn refcounted_play_only_transitions_on_zero_to_one() {
    let session = session();
    session.create_ref("p0", "videotestsrc ! fakesink").unwrap();
    session.play_ref("p0").unwrap();
    let state_node = session.resolve("pipelines/p0/state").unwrap();
    assert_eq!(state_node.describe().properties[0].value, Value::Str("playing".to_string()));
    session.play_ref("p0").unwrap();
    session.pause_ref("p0").unwrap();
    assert_eq!(state_node.describe().properties[0].value, Value::Str("playing".to_string()), "still referenced once");
    session.pause_ref("p0").unwrap();
    assert_eq!(state_node.describe().properties[0].value, Value::Str("paused".to_string()));
}

#[test]
fn refcounted_stop_settles_to_null_not_paused() {
    let session = session();
    session.create_ref("p0", "videotestsrc ! fakesink").unwrap();
    session.play_ref("p0").unwrap();
    let state_node = session.resolve("pipelines/p0/state").unwrap();
    session.stop_ref("p0").unwrap();
    assert_eq!(state_node.describe().properties[0].value, Value::Str("null".to_string()));
}

#[test]
fn install_and_get_round_trip_once() {
    let session = session();
    assert!(Session::install(session.clone()));
}

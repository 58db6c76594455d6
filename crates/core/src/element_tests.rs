// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::*;
use crate::bus::BusPopOutcome;
use crate::engine::{EventKind, MsgTypeMask, PipelineState};

struct StubEngine {
    properties: Mutex<Vec<(String, Value)>>,
    signals: Vec<&'static str>,
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
    fn get_property(&self, _handle: PipelineHandle, _element: &str, property: &str) -> Result<Value, ReturnCode> {
        self.properties.lock().iter().find(|(n, _)| n == property).map(|(_, v)| v.clone()).ok_or(ReturnCode::NoResource)
    }
    fn set_property(&self, _handle: PipelineHandle, _element: &str, property: &str, value: &str) -> Result<(), ReturnCode> {
        let mut props = self.properties.lock();
        if let Some(entry) = props.iter_mut().find(|(n, _)| n == property) {
            entry.1 = Value::Str(value.to_string());
        }
        Ok(())
    }
    fn property_names(&self, _handle: PipelineHandle, _element: &str) -> Result<Vec<String>, ReturnCode> {
        Ok(self.properties.lock().iter().map(|(n, _)| n.clone()).collect())
    }
    fn signal_names(&self, _handle: PipelineHandle, _element: &str) -> Result<Vec<String>, ReturnCode> {
        Ok(self.signals.iter().map(|s| s.to_string()).collect())
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
    fn send_event(&self, _handle: PipelineHandle, _event: EventKind) -> Result<(), ReturnCode> {
        Ok(())
    }
    fn verbose(&self, _handle: PipelineHandle) -> Result<bool, ReturnCode> {
        Ok(false)
    }
    fn set_verbose(&self, _handle: PipelineHandle, _verbose: bool) -> Result<(), ReturnCode> {
        Ok(())
    }
    fn bus_pop(&self, _handle: PipelineHandle, _mask: MsgTypeMask, _timeout: Duration) -> Result<BusPopOutcome, ReturnCode> {
        Ok(BusPopOutcome::Timeout)
    }
    fn bus_flush(&self, _handle: PipelineHandle) {}
}

#[test]
fn properties_lists_live_names_from_engine() {
    let engine: Arc<dyn PipelineEngine> =
        Arc::new(StubEngine { properties: Mutex::new(vec![("volume".to_string(), Value::I64(5))]), signals: vec![] });
    let el = Element::new("vol0", engine, PipelineHandle(1));
    let properties = el.read("properties").unwrap();
    let desc = properties.describe();
    assert!(desc.properties.iter().any(|p| p.name == "volume"));
}

#[test]
fn properties_read_fetches_live_value() {
    let engine: Arc<dyn PipelineEngine> =
        Arc::new(StubEngine { properties: Mutex::new(vec![("volume".to_string(), Value::I64(5))]), signals: vec![] });
    let el = Element::new("vol0", engine, PipelineHandle(1));
    let properties = el.read("properties").unwrap();
    let volume = properties.read("volume").unwrap();
    assert_eq!(volume.describe().properties[0].value, Value::I64(5));
}

#[test]
fn signals_lists_names_and_supports_connect() {
    let engine: Arc<dyn PipelineEngine> =
        Arc::new(StubEngine { properties: Mutex::new(vec![]), signals: vec!["pad-added"] });
    let el = Element::new("demux0", engine, PipelineHandle(1));
    let signals = el.read("signals").unwrap();
    assert!(signals.describe().properties.iter().any(|p| p.name == "pad-added"));
    signals.create("pad-added", None).unwrap();
}

#[test]
fn unknown_child_is_no_resource() {
    let engine: Arc<dyn PipelineEngine> = Arc::new(StubEngine { properties: Mutex::new(vec![]), signals: vec![] });
    let el = Element::new("vol0", engine, PipelineHandle(1));
    assert_eq!(el.read("bogus").unwrap_err(), ReturnCode::NoResource);
}

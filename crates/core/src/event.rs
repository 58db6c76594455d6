// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The pipeline's `event` sub-tree (spec §4.9). Each recognized event name
//! is a child whose `CREATE` pushes that event into the pipeline; the set
//! of names matches `GstdEventType` in `gstd_event_factory.c` restricted
//! to the four the original factory actually builds.

use std::sync::Arc;

use crate::access::AccessMask;
use crate::engine::{EventKind, PipelineEngine, PipelineHandle};
use crate::node::{DynNode, NodeCore, NodeDescription};
use crate::status::ReturnCode;
use crate::strategy::Creator;

struct EventCreator {
    engine: Arc<dyn PipelineEngine>,
    handle: PipelineHandle,
}

impl Creator for EventCreator {
    fn create(&self, name: &str, description: Option<&str>) -> Result<Arc<dyn DynNode>, ReturnCode> {
        let event = match name {
            "eos" => EventKind::Eos,
            "seek" => parse_seek(description)?,
            "flush-start" => EventKind::FlushStart,
            "flush-stop" => parse_flush_stop(description),
            _ => return Err(ReturnCode::BadCommand),
        };
        self.engine.send_event(self.handle, event)?;
        Ok(Arc::new(EventAck { core: NodeCore::new(name, AccessMask::NONE) }))
    }
}

/// Seek arguments are `key=value` pairs separated by whitespace (mirrors
/// the alias table's flattened CLI arguments); any field left unspecified
/// falls back to `EventKind::seek_default()`.
fn parse_seek(description: Option<&str>) -> Result<EventKind, ReturnCode> {
    let EventKind::Seek { mut rate, mut format, mut flags, mut start_type, mut start, mut stop_type, mut stop } =
        EventKind::seek_default()
    else {
        return Err(ReturnCode::EventError);
    };
    if let Some(args) = description {
        for pair in args.split_whitespace() {
            let Some((key, value)) = pair.split_once('=') else { continue };
            match key {
                "rate" => rate = value.parse().map_err(|_| ReturnCode::BadValue)?,
                "format" => format = value.to_string(),
                "flags" => flags = value.to_string(),
                "start-type" => start_type = value.to_string(),
                "start" => start = value.parse().map_err(|_| ReturnCode::BadValue)?,
                "stop-type" => stop_type = value.to_string(),
                "stop" => stop = value.parse().map_err(|_| ReturnCode::BadValue)?,
                _ => return Err(ReturnCode::BadCommand),
            }
        }
    }
    Ok(EventKind::Seek { rate, format, flags, start_type, start, stop_type, stop })
}

fn parse_flush_stop(description: Option<&str>) -> EventKind {
    match description.map(str::trim) {
        Some("false") => EventKind::FlushStop { reset_time: false },
        _ => EventKind::flush_stop_default(),
    }
}

/// `CREATE`'s trivial return value: the event itself carries no further
/// state once dispatched (spec §4.9: event nodes are write-only triggers).
struct EventAck {
    core: NodeCore,
}

impl DynNode for EventAck {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn describe(&self) -> NodeDescription {
        NodeDescription::new()
    }
}

/// The `event` node under a pipeline.
pub struct EventHandlerNode {
    core: NodeCore,
}

impl EventHandlerNode {
    pub fn new(engine: Arc<dyn PipelineEngine>, handle: PipelineHandle) -> Self {
        let core = NodeCore::new("event", AccessMask::CREATE).with_creator(EventCreator { engine, handle });
        EventHandlerNode { core }
    }
}

impl DynNode for EventHandlerNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn describe(&self) -> NodeDescription {
        NodeDescription::new()
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;

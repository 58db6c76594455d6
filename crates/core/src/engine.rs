// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The boundary to the opaque media-pipeline engine (spec §1 "pluggable
//! pipeline engine is out of scope", §4.7/§4.8/§4.9). Every operation a
//! [`crate::Pipeline`], [`crate::Element`], [`crate::BusNode`], or
//! [`crate::EventHandlerNode`] needs from the underlying media framework
//! goes through [`PipelineEngine`]; this crate never talks to a real
//! pipeline library directly. A concrete implementation (a deterministic
//! simulation for tests, or eventually a real binding) lives in a separate
//! crate that depends on this one, never the reverse.

use std::time::Duration;

use bitflags::bitflags;

use crate::bus::BusMessage;
use crate::status::ReturnCode;
use crate::value::Value;

/// Opaque handle to a pipeline instance inside the engine. Carries no
/// meaning outside the engine that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineHandle(pub u64);

/// The four steady states a pipeline can be queried in or asked to reach
/// (spec §4.7). `Async` is reported while a transition is still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineState {
    Null,
    Ready,
    Paused,
    Playing,
    Async,
}

impl PipelineState {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "null" => Some(PipelineState::Null),
            "ready" => Some(PipelineState::Ready),
            "paused" => Some(PipelineState::Paused),
            "playing" => Some(PipelineState::Playing),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PipelineState::Null => "null",
            PipelineState::Ready => "ready",
            PipelineState::Paused => "paused",
            PipelineState::Playing => "playing",
            PipelineState::Async => "async",
        }
    }
}

/// Events an [`crate::EventHandlerNode`] can push into a running pipeline
/// (spec §4.9). Only the four `gstd_event_factory.c` actually builds are
/// modeled; the remaining recognized-but-unimplemented names stay out of
/// scope here too.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Eos,
    Seek {
        rate: f64,
        format: String,
        flags: String,
        start_type: String,
        start: u64,
        stop_type: String,
        /// `u64::MAX` models the original's `GST_CLOCK_TIME_NONE` sentinel.
        stop: u64,
    },
    FlushStart,
    FlushStop {
        reset_time: bool,
    },
}

impl EventKind {
    /// Defaults from `GSTD_EVENT_FACTORY_SEEK_*_DEFAULT` (original_source
    /// `gstd_event_factory.c`).
    pub fn seek_default() -> Self {
        EventKind::Seek {
            rate: 1.0,
            format: "time".to_string(),
            flags: "flush".to_string(),
            start_type: "set".to_string(),
            start: 1_000_000_000,
            stop_type: "set".to_string(),
            stop: u64::MAX,
        }
    }

    pub fn flush_stop_default() -> Self {
        EventKind::FlushStop { reset_time: true }
    }
}

bitflags! {
    /// Bus message type filter, set via the `bus_filter` command and
    /// consulted by [`PipelineEngine::bus_pop`] (spec §4.8 bus-message
    /// mask table).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MsgTypeMask: u32 {
        const ERROR           = 1 << 0;
        const WARNING         = 1 << 1;
        const INFO            = 1 << 2;
        const EOS             = 1 << 3;
        const STATE_CHANGED   = 1 << 4;
        const STREAM_STATUS   = 1 << 5;
        const ELEMENT         = 1 << 6;
        const QOS             = 1 << 7;
        const PROPERTY_NOTIFY = 1 << 8;
        const UNKNOWN         = 1 << 31;
    }
}

impl MsgTypeMask {
    pub const ANY: MsgTypeMask = MsgTypeMask::all();

    fn bit_name(bit: MsgTypeMask) -> &'static str {
        match bit {
            MsgTypeMask::ERROR => "error",
            MsgTypeMask::WARNING => "warning",
            MsgTypeMask::INFO => "info",
            MsgTypeMask::EOS => "eos",
            MsgTypeMask::STATE_CHANGED => "state-changed",
            MsgTypeMask::STREAM_STATUS => "stream-status",
            MsgTypeMask::ELEMENT => "element",
            MsgTypeMask::QOS => "qos",
            MsgTypeMask::PROPERTY_NOTIFY => "property-notify",
            _ => "unknown",
        }
    }

    /// Parse a `+`-separated list of message-type names (spec §4.6 flags
    /// parse rule, applied to the `bus/types` leaf). `"any"` and
    /// `"unknown"` are recognized as the two named sentinels; any other
    /// unrecognized token is a parse failure.
    pub fn parse(s: &str) -> Option<Self> {
        let mut mask = MsgTypeMask::empty();
        for token in s.split('+') {
            let token = token.trim();
            if token.is_empty() {
                return None;
            }
            mask |= match token {
                "error" => MsgTypeMask::ERROR,
                "warning" => MsgTypeMask::WARNING,
                "info" => MsgTypeMask::INFO,
                "eos" => MsgTypeMask::EOS,
                "state-changed" => MsgTypeMask::STATE_CHANGED,
                "stream-status" => MsgTypeMask::STREAM_STATUS,
                "element" => MsgTypeMask::ELEMENT,
                "qos" => MsgTypeMask::QOS,
                "property-notify" => MsgTypeMask::PROPERTY_NOTIFY,
                "unknown" => MsgTypeMask::UNKNOWN,
                "any" => MsgTypeMask::ANY,
                _ => return None,
            };
        }
        Some(mask)
    }

    /// Render as the `+`-joined token list [`Self::parse`] accepts back.
    pub fn as_tokens(self) -> String {
        if self == MsgTypeMask::ANY {
            return "any".to_string();
        }
        self.iter().map(Self::bit_name).collect::<Vec<_>>().join("+")
    }
}

/// Result of one bounded bus pop (spec §4.8).
#[derive(Debug, Clone, PartialEq)]
pub enum BusPopOutcome {
    Message(BusMessage),
    /// No matching message arrived before the timeout elapsed.
    Timeout,
    /// The read was interrupted by a concurrent `flush` (Open Question (b)
    /// resolution: the `UNKNOWN` sentinel is also surfaced this way).
    Flushed,
}

/// The collaborator boundary: everything this crate needs from a concrete
/// media-pipeline implementation.
pub trait PipelineEngine: Send + Sync {
    /// Parse a pipeline description and instantiate it in `Null` state
    /// (spec §4.7 create).
    fn parse(&self, description: &str) -> Result<PipelineHandle, ReturnCode>;

    /// Tear down and release every resource the engine holds for `handle`.
    fn release(&self, handle: PipelineHandle);

    fn set_state(&self, handle: PipelineHandle, state: PipelineState) -> Result<(), ReturnCode>;

    fn state(&self, handle: PipelineHandle) -> Result<PipelineState, ReturnCode>;

    /// A DOT-format graph of the pipeline's element topology (spec §4.7
    /// `graph` property).
    fn graph(&self, handle: PipelineHandle) -> Result<String, ReturnCode>;

    /// Names of every element currently in the pipeline (spec §4.8
    /// `elements` collection listing).
    fn elements(&self, handle: PipelineHandle) -> Result<Vec<String>, ReturnCode>;

    fn get_property(&self, handle: PipelineHandle, element: &str, property: &str) -> Result<Value, ReturnCode>;

    fn set_property(&self, handle: PipelineHandle, element: &str, property: &str, value: &str) -> Result<(), ReturnCode>;

    /// Names of every property the named element exposes (spec §4.8
    /// `properties` collection listing).
    fn property_names(&self, handle: PipelineHandle, element: &str) -> Result<Vec<String>, ReturnCode>;

    /// Names of the signals the named element can be asked to watch
    /// (Open Question (c): element `signals` sub-tree).
    fn signal_names(&self, handle: PipelineHandle, element: &str) -> Result<Vec<String>, ReturnCode>;

    fn connect_signal(&self, handle: PipelineHandle, element: &str, signal: &str) -> Result<(), ReturnCode>;

    fn disconnect_signal(&self, handle: PipelineHandle, element: &str, signal: &str) -> Result<(), ReturnCode>;

    /// Block up to `timeout` for the next emission of `signal`; `Ok(None)`
    /// on timeout.
    fn wait_signal(
        &self,
        handle: PipelineHandle,
        element: &str,
        signal: &str,
        timeout: Duration,
    ) -> Result<Option<Value>, ReturnCode>;

    fn send_event(&self, handle: PipelineHandle, event: EventKind) -> Result<(), ReturnCode>;

    /// Current per-element logging state (spec §4.7 "Verbose").
    fn verbose(&self, handle: PipelineHandle) -> Result<bool, ReturnCode>;

    fn set_verbose(&self, handle: PipelineHandle, verbose: bool) -> Result<(), ReturnCode>;

    /// Block up to `timeout` for the next bus message matching `mask`.
    fn bus_pop(&self, handle: PipelineHandle, mask: MsgTypeMask, timeout: Duration) -> Result<BusPopOutcome, ReturnCode>;

    /// Wake any in-flight `bus_pop` with [`BusPopOutcome::Flushed`].
    fn bus_flush(&self, handle: PipelineHandle);
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;

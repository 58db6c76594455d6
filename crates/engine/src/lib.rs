// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! `gstd-engine`: the one concrete [`gstd_core::PipelineEngine`]
//! implementation carried in this workspace — a deterministic, in-process
//! simulation with no real media I/O. It exists to drive `gstd-core`'s own
//! tests and the end-to-end scenarios against a stable, fast backend; a
//! real binding (to an actual media framework) would be a sibling crate
//! implementing the same trait, never a change to `gstd-core` itself.

mod parse;
mod sim;

pub use sim::{EngineError, SimEngine};

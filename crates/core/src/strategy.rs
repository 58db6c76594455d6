// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Verb strategies (spec §4.4): the four small traits a [`crate::NodeCore`]
//! composes one of each of. Splitting CRUD into four independent strategy
//! objects, rather than one big "handler" trait, lets a node mix and match
//! — e.g. a collection's `Creator` builds children while its `Deleter`
//! removes them by name, with no method either one doesn't need.

use std::sync::Arc;

use crate::node::DynNode;
use crate::status::ReturnCode;

pub trait Creator: Send + Sync {
    fn create(&self, name: &str, description: Option<&str>) -> Result<Arc<dyn DynNode>, ReturnCode>;
}

pub trait Reader: Send + Sync {
    fn read(&self, name: &str) -> Result<Arc<dyn DynNode>, ReturnCode>;
}

pub trait Updater: Send + Sync {
    fn update(&self, value: &str) -> Result<(), ReturnCode>;
}

pub trait Deleter: Send + Sync {
    fn delete(&self, name: &str) -> Result<(), ReturnCode>;
}

/// Default strategy installed by [`crate::NodeCore::new`]: refuses with the
/// matching `NO_*` code (spec §4.4: "A node that does not support a verb
/// installs the corresponding Refusing strategy").
pub struct RefusingCreator;
impl Creator for RefusingCreator {
    fn create(&self, _name: &str, _description: Option<&str>) -> Result<Arc<dyn DynNode>, ReturnCode> {
        Err(ReturnCode::NoCreate)
    }
}

pub struct RefusingReader;
impl Reader for RefusingReader {
    fn read(&self, _name: &str) -> Result<Arc<dyn DynNode>, ReturnCode> {
        Err(ReturnCode::NoRead)
    }
}

pub struct RefusingUpdater;
impl Updater for RefusingUpdater {
    fn update(&self, _value: &str) -> Result<(), ReturnCode> {
        Err(ReturnCode::NoUpdate)
    }
}

pub struct RefusingDeleter;
impl Deleter for RefusingDeleter {
    fn delete(&self, _name: &str) -> Result<(), ReturnCode> {
        Err(ReturnCode::NoUpdate)
    }
}

#[cfg(test)]
#[path = "strategy_tests.rs"]
mod tests;

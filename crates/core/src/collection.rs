// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named, ordered collections of children (spec §4.5). `pipelines`, an
//! element's `properties`, and a pipeline's `elements` are all a
//! [`Collection`] over a different child type.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::access::AccessMask;
use crate::node::{DynNode, NodeCore, NodeDescription};
use crate::status::ReturnCode;
use crate::strategy::{Creator, Deleter, Reader};

type Factory<T> = dyn Fn(&str, Option<&str>) -> Result<Arc<T>, ReturnCode> + Send + Sync;

struct CollectionState<T> {
    children: RwLock<IndexMap<String, Arc<T>>>,
}

impl<T> CollectionState<T> {
    fn new() -> Self {
        CollectionState { children: RwLock::new(IndexMap::new()) }
    }
}

struct CollectionCreator<T> {
    state: Arc<CollectionState<T>>,
    factory: Arc<Factory<T>>,
}

impl<T: DynNode + 'static> Creator for CollectionCreator<T> {
    fn create(&self, name: &str, description: Option<&str>) -> Result<Arc<dyn DynNode>, ReturnCode> {
        if self.state.children.read().contains_key(name) {
            return Err(ReturnCode::ExistingResource);
        }
        let child = (self.factory)(name, description)?;
        self.state.children.write().insert(name.to_string(), child.clone());
        Ok(child as Arc<dyn DynNode>)
    }
}

struct CollectionReader<T> {
    state: Arc<CollectionState<T>>,
}

impl<T: DynNode + 'static> Reader for CollectionReader<T> {
    fn read(&self, name: &str) -> Result<Arc<dyn DynNode>, ReturnCode> {
        self.state
            .children
            .read()
            .get(name)
            .cloned()
            .map(|child| child as Arc<dyn DynNode>)
            .ok_or(ReturnCode::NoResource)
    }
}

struct CollectionDeleter<T> {
    state: Arc<CollectionState<T>>,
}

impl<T: Send + Sync + 'static> Deleter for CollectionDeleter<T> {
    fn delete(&self, name: &str) -> Result<(), ReturnCode> {
        self.state.children.write().shift_remove(name).map(|_| ()).ok_or(ReturnCode::NoResource)
    }
}

/// A `RwLock<IndexMap<..>>`-backed collection node (spec §4.5, §5
/// concurrency model: "one `RwLock` per collection").
pub struct Collection<T: DynNode + 'static> {
    core: NodeCore,
    state: Arc<CollectionState<T>>,
    child_type_name: &'static str,
}

impl<T: DynNode + 'static> Collection<T> {
    /// `child_type_name` is the type string reported for each child in
    /// `describe()` (e.g. `"pipeline"`, `"element"`).
    pub fn new(
        name: impl Into<String>,
        flags: AccessMask,
        child_type_name: &'static str,
        factory: impl Fn(&str, Option<&str>) -> Result<Arc<T>, ReturnCode> + Send + Sync + 'static,
    ) -> Self {
        let state = Arc::new(CollectionState::new());
        let factory = Arc::new(factory);
        let core = NodeCore::new(name, flags)
            .with_creator(CollectionCreator { state: state.clone(), factory })
            .with_reader(CollectionReader { state: state.clone() })
            .with_deleter(CollectionDeleter { state: state.clone() });
        Collection { core, state, child_type_name }
    }

    pub fn len(&self) -> usize {
        self.state.children.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn names(&self) -> Vec<String> {
        self.state.children.read().keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<Arc<T>> {
        self.state.children.read().get(name).cloned()
    }

    /// Insert a child built outside the collection's factory (used by the
    /// session bootstrap for the fixed `pipelines`/`debug` roots).
    pub fn insert(&self, name: impl Into<String>, child: Arc<T>) {
        self.state.children.write().insert(name.into(), child);
    }
}

impl<T: DynNode + 'static> DynNode for Collection<T> {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    /// Listing a collection reports each child's name as a string value
    /// typed by `child_type_name`, plus a synthesized read-only `count`
    /// (spec §4.5: "READ without a name returns a structured listing").
    fn describe(&self) -> NodeDescription {
        let mut desc = NodeDescription::new();
        for name in self.names() {
            desc = desc.with(name.clone(), name, self.child_type_name, AccessMask::READ_ONLY);
        }
        desc.with("count", self.len() as u64, "uint", AccessMask::READ_ONLY)
    }
}

#[cfg(test)]
#[path = "collection_tests.rs"]
mod tests;

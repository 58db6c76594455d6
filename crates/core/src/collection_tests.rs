// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use super::*;
use crate::node::ValueNode;
use crate::value::Value;

fn leaf_collection() -> Collection<ValueNode> {
    Collection::new("things", AccessMask::FULL, "thing", |name, _description| {
        Ok(Arc::new(ValueNode::new(name, Value::Str(name.to_string()), "string", AccessMask::READ_ONLY)))
    })
}

#[test]
fn create_then_read_round_trips() {
    let col = leaf_collection();
    col.create("a", None).unwrap();
    let child = col.read("a").unwrap();
    assert_eq!(child.name(), "a");
    assert_eq!(col.len(), 1);
}

#[test]
fn create_duplicate_name_is_existing_resource() {
    let col = leaf_collection();
    col.create("a", None).unwrap();
    assert_eq!(col.create("a", None).unwrap_err(), ReturnCode::ExistingResource);
}

#[test]
fn read_missing_child_is_no_resource() {
    let col = leaf_collection();
    assert_eq!(col.read("missing").unwrap_err(), ReturnCode::NoResource);
}

#[test]
fn delete_removes_child() {
    let col = leaf_collection();
    col.create("a", None).unwrap();
    col.delete("a").unwrap();
    assert_eq!(col.len(), 0);
    assert_eq!(col.delete("a").unwrap_err(), ReturnCode::NoResource);
}

#[test]
fn describe_lists_children_and_count() {
    let col = leaf_collection();
    col.create("a", None).unwrap();
    col.create("b", None).unwrap();
    let desc = col.describe();
    assert_eq!(desc.properties.len(), 3);
    assert!(desc.properties.iter().any(|p| p.name == "count" && p.value == Value::U64(2)));
}

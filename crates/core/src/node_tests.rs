// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::value::Value;

#[test]
fn refusing_defaults_deny_every_verb_regardless_of_flags() {
    let node = ValueNode::new("pid", Value::I64(42), "int", AccessMask::FULL);
    assert_eq!(node.create("x", None).unwrap_err(), ReturnCode::NoCreate);
    assert_eq!(node.read("x").unwrap_err(), ReturnCode::NoRead);
    assert_eq!(node.update("x").unwrap_err(), ReturnCode::NoUpdate);
    assert_eq!(node.delete("x").unwrap_err(), ReturnCode::NoUpdate);
}

#[test]
fn flag_gate_refuses_before_reaching_strategy() {
    let node = ValueNode::new("pid", Value::I64(42), "int", AccessMask::NONE);
    assert_eq!(node.read("x").unwrap_err(), ReturnCode::NoRead);
}

#[test]
fn describe_reports_single_property_for_leaf() {
    let node = ValueNode::new("pid", Value::I64(42), "int", AccessMask::READ_ONLY);
    let desc = node.describe();
    assert_eq!(desc.properties.len(), 1);
    assert_eq!(desc.properties[0].name, "pid");
    assert_eq!(desc.properties[0].value, Value::I64(42));
    assert_eq!(desc.properties[0].access, "r");
}

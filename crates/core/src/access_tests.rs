// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn flag_string_orders_crud() {
    assert_eq!(AccessMask::FULL.as_flag_string(), "crud");
    assert_eq!(AccessMask::READ_WRITE.as_flag_string(), "ru");
    assert_eq!(AccessMask::READ_ONLY.as_flag_string(), "r");
    assert_eq!(AccessMask::NONE.as_flag_string(), "");
}

#[test]
fn contains_checks_individual_verbs() {
    let mask = AccessMask::READ | AccessMask::DELETE;
    assert!(mask.contains(AccessMask::READ));
    assert!(mask.contains(AccessMask::DELETE));
    assert!(!mask.contains(AccessMask::CREATE));
    assert!(!mask.contains(AccessMask::UPDATE));
}

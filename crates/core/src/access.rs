// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-node access-flag mask (spec §3.1, Glossary "Access mask").

use bitflags::bitflags;

bitflags! {
    /// Bitset drawn from `{CREATE, READ, UPDATE, DELETE}` that gates the
    /// verbs a node accepts. Checked before a verb is dispatched to its
    /// strategy (invariant 2).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AccessMask: u8 {
        const CREATE = 0b0001;
        const READ   = 0b0010;
        const UPDATE = 0b0100;
        const DELETE = 0b1000;
    }
}

impl AccessMask {
    pub const NONE: AccessMask = AccessMask::empty();
    pub const READ_ONLY: AccessMask = AccessMask::READ;
    pub const READ_WRITE: AccessMask = AccessMask::READ.union(AccessMask::UPDATE);
    pub const FULL: AccessMask =
        AccessMask::CREATE.union(AccessMask::READ).union(AccessMask::UPDATE).union(AccessMask::DELETE);

    /// Render as the short `"crud"`-style string used in self-descriptions
    /// (spec §4.3: "access-flag string"), e.g. `"ru"` for read+update.
    pub fn as_flag_string(self) -> String {
        let mut s = String::with_capacity(4);
        if self.contains(AccessMask::CREATE) {
            s.push('c');
        }
        if self.contains(AccessMask::READ) {
            s.push('r');
        }
        if self.contains(AccessMask::UPDATE) {
            s.push('u');
        }
        if self.contains(AccessMask::DELETE) {
            s.push('d');
        }
        s
    }
}

#[cfg(test)]
#[path = "access_tests.rs"]
mod tests;

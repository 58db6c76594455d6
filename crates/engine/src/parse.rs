// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A minimal `gst-launch`-style description parser: `element1 name=n1 !
//! element2 name=n2 ! ...`. Elements without an explicit `name=` get a
//! synthesized `<factory><index>` name, matching GStreamer's own
//! auto-naming convention closely enough for the simulation's purposes.

pub struct ParsedElement {
    pub name: String,
    pub factory: String,
}

pub fn parse_description(description: &str) -> Option<Vec<ParsedElement>> {
    let description = description.trim();
    if description.is_empty() {
        return None;
    }
    let mut elements = Vec::new();
    for (index, segment) in description.split('!').enumerate() {
        let segment = segment.trim();
        if segment.is_empty() {
            return None;
        }
        let mut tokens = segment.split_whitespace();
        let factory = tokens.next()?.to_string();
        let mut name = None;
        for token in tokens {
            if let Some(value) = token.strip_prefix("name=") {
                name = Some(value.trim_matches('"').to_string());
            }
        }
        let name = name.unwrap_or_else(|| format!("{factory}{index}"));
        elements.push(ParsedElement { name, factory });
    }
    Some(elements)
}

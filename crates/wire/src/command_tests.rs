// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn plain_create_splits_into_three_tokens() {
    let cmd = Command::parse("create /pipelines p0 videotestsrc ! fakesink").unwrap();
    assert_eq!(cmd.verb, Verb::Create);
    assert_eq!(cmd.uri, "/pipelines");
    assert_eq!(cmd.argument, "p0 videotestsrc ! fakesink");
    assert!(!cmd.refcounted);
}

#[test]
fn plain_read_has_no_argument_token() {
    let cmd = Command::parse("read /pipelines/p0/state").unwrap();
    assert_eq!(cmd.verb, Verb::Read);
    assert_eq!(cmd.argument, "");
}

#[test]
fn unknown_verb_is_rejected() {
    assert_eq!(Command::parse("frobnicate /pipelines").unwrap_err(), CommandError::UnknownVerb("frobnicate".to_string()));
}

#[test]
fn missing_uri_is_missing_argument() {
    assert_eq!(Command::parse("read").unwrap_err(), CommandError::MissingArgument);
}

#[test]
fn pipeline_create_alias_targets_the_collection() {
    let cmd = Command::parse("pipeline_create p0 videotestsrc ! fakesink").unwrap();
    assert_eq!(cmd.verb, Verb::Create);
    assert_eq!(cmd.uri, "/pipelines");
    assert_eq!(cmd.argument, "p0 videotestsrc ! fakesink");
    assert!(!cmd.refcounted);
}

#[test]
fn pipeline_create_ref_alias_sets_the_refcounted_flag() {
    let cmd = Command::parse("pipeline_create_ref p0 videotestsrc ! fakesink").unwrap();
    assert!(cmd.refcounted);
    assert_eq!(cmd.uri, "/pipelines");
}

#[test]
fn pipeline_play_alias_updates_state_to_playing() {
    let cmd = Command::parse("pipeline_play p0").unwrap();
    assert_eq!(cmd.verb, Verb::Update);
    assert_eq!(cmd.uri, "/pipelines/p0/state");
    assert_eq!(cmd.argument, "playing");
}

#[test]
fn element_set_alias_targets_the_property_leaf() {
    let cmd = Command::parse("element_set p0 src0 pattern snow").unwrap();
    assert_eq!(cmd.verb, Verb::Update);
    assert_eq!(cmd.uri, "/pipelines/p0/elements/src0/properties/pattern");
    assert_eq!(cmd.argument, "snow");
}

#[test]
fn event_seek_alias_carries_overrides_verbatim() {
    let cmd = Command::parse("event_seek p0 rate=2.0 start=0").unwrap();
    assert_eq!(cmd.verb, Verb::Create);
    assert_eq!(cmd.uri, "/pipelines/p0/event");
    assert_eq!(cmd.argument, "seek rate=2.0 start=0");
}

#[test]
fn debug_threshold_alias_targets_the_leaf() {
    let cmd = Command::parse("debug_threshold *:4").unwrap();
    assert_eq!(cmd.verb, Verb::Update);
    assert_eq!(cmd.uri, "/debug/threshold");
    assert_eq!(cmd.argument, "*:4");
}

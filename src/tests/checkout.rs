/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! `spec.md` §8 scenarios 1-4: empty log, a single edit, multiple edits with annotation,
//! and checking out an older revision after the fact.

use crate::LineLog;

#[test]
fn empty_log() {
    let log = LineLog::new();
    assert_eq!(log.max_rev(), 0);
    assert_eq!(log.content(), "");
}

#[test]
fn single_edit() {
    let mut log = LineLog::new();
    let rev = log.record_text("c\nd\ne", Some(42), None);
    assert_eq!(rev, 1);
    assert_eq!(log.max_rev(), 1);
    assert_eq!(log.content(), "c\nd\ne");
    for i in 0..3 {
        assert_eq!(log.get_line_timestamp(i), 42, "line {i}");
    }
    assert_eq!(log.get_line_timestamp(3), 0, "sentinel");
}

#[test]
fn multiple_edits_with_annotation() {
    let mut log = LineLog::new();
    log.record_text("c\nd\ne\n", Some(42), None);
    log.record_text("d\ne\nf\n", Some(52), None);

    assert_eq!(log.max_rev(), 2);
    assert_eq!(log.content(), "d\ne\nf\n");
    assert_eq!(log.get_line_timestamp(0), 42);
    assert_eq!(log.get_line_timestamp(1), 42);
    assert_eq!(log.get_line_timestamp(2), 52);
    assert_eq!(log.get_line_timestamp(3), 0);
}

#[test]
fn checkout_older_revision() {
    let mut log = LineLog::new();
    log.record_text("c\nd\ne\n", Some(42), None);
    log.record_text("d\ne\nf\n", Some(52), None);

    log.check_out(1, None);
    assert_eq!(log.content(), "c\nd\ne\n");

    log.check_out(0, None);
    assert_eq!(log.content(), "");

    log.check_out(2, None);
    assert_eq!(log.content(), "d\ne\nf\n");
}

#[test]
fn checkout_same_revision_is_a_no_op() {
    let mut log = LineLog::new();
    log.record_text("a\nb\n", Some(1), None);
    log.check_out(1, None);
    let before = log.content().to_string();
    log.check_out(1, None);
    assert_eq!(log.content(), before);
}

#[test]
fn checkout_clamps_to_max_rev() {
    let mut log = LineLog::new();
    log.record_text("a\n", Some(1), None);
    log.check_out(9999, None);
    assert_eq!(log.content(), "a\n");
}

#[test]
fn record_text_with_unchanged_content_is_a_no_op() {
    let mut log = LineLog::new();
    let rev = log.record_text("a\nb\n", Some(1), None);
    let rev_again = log.record_text("a\nb\n", Some(2), None);
    assert_eq!(rev, rev_again);
    assert_eq!(log.max_rev(), 1);
    // The no-op path must not have overwritten the timestamp from the first call.
    assert_eq!(log.get_line_timestamp(0), 1);
}

/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Coverage for the editor beyond the worked scenarios in `spec.md` §8: the trivial-update
//! fast path, its disqualifying conditions, and multi-block general edits.

use crate::LineLog;

#[test]
fn trivial_update_does_not_allocate_a_new_revision() {
    let mut log = LineLog::new();
    log.record_text("hello\n", Some(1), None);
    assert_eq!(log.max_rev(), 1);

    let rev = log.record_text("world\n", Some(2), None);
    assert_eq!(rev, 1, "rapid single-line edits should not inflate max_rev");
    assert_eq!(log.max_rev(), 1);
    assert_eq!(log.content(), "world\n");
    assert_eq!(log.get_line_timestamp(0), 2, "timestamp overwritten in place");
}

#[test]
fn trivial_update_is_not_taken_when_line_is_shared_with_other_lines() {
    // Two lines both owned by max_rev -> the "exactly one line owns this revision"
    // condition fails, so this must take the general edit path (a new revision).
    let mut log = LineLog::new();
    log.record_text("a\nb\n", Some(1), None);
    let rev = log.record_text("a\nB\n", Some(2), None);
    assert_eq!(rev, 2);
    assert_eq!(log.max_rev(), 2);
    assert_eq!(log.content(), "a\nB\n");
}

#[test]
fn trivial_update_is_not_taken_when_block_is_not_one_to_one() {
    let mut log = LineLog::new();
    log.record_text("a\n", Some(1), None);
    // One line replaced by two: fails the 1-line-to-1-line shape required for the fast path.
    let rev = log.record_text("x\ny\n", Some(2), None);
    assert_eq!(rev, 2);
    assert_eq!(log.content(), "x\ny\n");
}

#[test]
fn trivial_update_requires_sole_ownership_of_the_head_revision() {
    let mut log = LineLog::new();
    log.record_text("a\nb\n", Some(1), None); // rev 1: both 'a' and 'b' are owned by rev 1

    // 'b' shares rev 1 with 'a', so condition 4 (sole ownership) fails: general edit path.
    let rev2 = log.record_text("a\nc\n", Some(2), None);
    assert_eq!(rev2, 2);
    assert_eq!(log.max_rev(), 2);

    // 'c' is now the sole line owned by rev 2: this qualifies for the fast path.
    let rev3 = log.record_text("a\nC\n", Some(3), None);
    assert_eq!(rev3, 2, "trivial update reuses max_rev instead of allocating rev 3");
    assert_eq!(log.max_rev(), 2);
    assert_eq!(log.content(), "a\nC\n");
    assert_eq!(log.get_line_timestamp(1), 3);
}

#[test]
fn extra_metadata_round_trips_through_annotation() {
    let mut log = LineLog::new();
    let mut extra = crate::Extra::new();
    extra.insert("author".to_string(), "alice".into());
    log.record_text("line one\n", Some(10), Some(extra.clone()));
    assert_eq!(log.get_line_extra(0), extra);
    assert_eq!(log.get_line_extra(1), crate::Extra::default());
}

#[test]
fn multi_line_insert_and_delete_in_one_call() {
    let mut log = LineLog::new();
    log.record_text("1\n2\n3\n4\n5\n", Some(1), None);
    log.record_text("1\nX\nY\n4\nZ\n", Some(2), None);
    assert_eq!(log.content(), "1\nX\nY\n4\nZ\n");

    log.check_out(1, None);
    assert_eq!(log.content(), "1\n2\n3\n4\n5\n");
    log.check_out(2, None);
    assert_eq!(log.content(), "1\nX\nY\n4\nZ\n");
}

#[test]
fn many_sequential_edits_keep_history_recoverable() {
    let mut log = LineLog::new();
    let mut expected = Vec::new();
    let mut text = String::new();
    for i in 0..20 {
        text = format!("{text}line{i}\n");
        log.record_text(&text, Some(100 + i as i64), None);
        expected.push(text.clone());
    }
    for (i, text) in expected.iter().enumerate() {
        log.check_out((i + 1) as u32, None);
        assert_eq!(log.content(), text.as_str(), "revision {}", i + 1);
    }
}

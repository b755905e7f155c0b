/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! `spec.md` §8 scenario 5: range checkouts (union views) overlay lines deleted within the
//! range onto the head-of-range snapshot, flagging them `deleted`.

use crate::LineLog;

fn build() -> LineLog {
    let mut log = LineLog::new();
    log.record_text("c\nd\ne\n", Some(42), None);
    log.record_text("d\ne\nf\n", Some(52), None);
    log.record_text("e\ng\nf\n", Some(62), None);
    log
}

#[test]
fn range_one_to_two() {
    let mut log = build();
    log.check_out(2, Some(1));
    assert_eq!(log.content(), "c\nd\ne\nf\n");
    let deleted: Vec<bool> = log.lines().iter().map(|l| l.deleted).collect();
    assert_eq!(deleted, vec![true, false, false, false]);
}

#[test]
fn range_zero_to_three() {
    let mut log = build();
    log.check_out(3, Some(0));
    assert_eq!(log.content(), "c\nd\ne\ng\nf\n");
    let deleted: Vec<bool> = log.lines().iter().map(|l| l.deleted).collect();
    assert_eq!(deleted, vec![true, true, false, false, false]);
}

#[test]
fn range_two_to_three() {
    let mut log = build();
    log.check_out(3, Some(2));
    assert_eq!(log.content(), "d\ne\ng\nf\n");
    let deleted: Vec<bool> = log.lines().iter().map(|l| l.deleted).collect();
    assert_eq!(deleted, vec![true, false, false, false]);
}

#[test]
fn non_range_checkout_never_marks_deleted() {
    let mut log = build();
    log.check_out(2, None);
    assert!(log.lines().iter().all(|l| !l.deleted));
}

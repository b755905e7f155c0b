/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Reduces two line sequences to an ordered list of non-overlapping change blocks
//! `(a1, a2, b1, b2)`: `a[a1..a2)` is replaced by `b[b1..b2)`. Built on `similar`'s
//! sequence matcher rather than hand-rolled, the same way `max-sixty/worktrunk` and
//! several other tools in this corpus reach for `similar` instead of shelling out to
//! `diff(1)` or reimplementing Myers by hand.

use similar::Algorithm;
use similar::DiffOp;

/// One contiguous replacement: lines `a1..a2` of the old sequence become lines `b1..b2`
/// of the new sequence. `a1 <= a2`, `b1 <= b2`, and at least one side is non-empty.
pub type Block = (usize, usize, usize, usize);

/// Diff two line sequences under the given algorithm, returning change blocks in ascending
/// `a1` order. Equal runs are omitted; adjacent deletions/insertions are already merged into
/// a single `Replace`-shaped block by `similar`'s matcher, so no further coalescing is needed.
pub fn diff_blocks(algorithm: Algorithm, a: &[&str], b: &[&str]) -> Vec<Block> {
    similar::capture_diff_slices(algorithm, a, b)
        .into_iter()
        .filter_map(op_to_block)
        .collect()
}

fn op_to_block(op: DiffOp) -> Option<Block> {
    match op {
        DiffOp::Equal { .. } => None,
        DiffOp::Delete {
            old_index,
            old_len,
            new_index,
        } => Some((old_index, old_index + old_len, new_index, new_index)),
        DiffOp::Insert {
            old_index,
            new_index,
            new_len,
        } => Some((old_index, old_index, new_index, new_index + new_len)),
        DiffOp::Replace {
            old_index,
            old_len,
            new_index,
            new_len,
        } => Some((
            old_index,
            old_index + old_len,
            new_index,
            new_index + new_len,
        )),
    }
}

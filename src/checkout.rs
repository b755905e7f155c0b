/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The cache layer: `check_out` re-executes the program to refresh `lines`/`content`, gated
//! by `last_checkout_rev` so repeated checkouts of the same revision are free. The two
//! annotation accessors (`get_line_timestamp`, `get_line_extra`) read straight off the
//! currently cached `lines` plus the `ts_map`/`extra_map` side tables.

use std::collections::HashSet;

use crate::Extra;
use crate::LineLog;

impl LineLog {
    /// Bring `lines`/`content` up to date for revision `rev` (clamped to `max_rev`).
    ///
    /// With `start = None`, this is a plain snapshot: `content` becomes exactly the text
    /// recorded at `rev`. With `start = Some(s)`, this is a union view across `[s, rev]`:
    /// `content` includes lines that were deleted anywhere in that range, with
    /// `lines[i].deleted` marking which ones aren't part of the `rev` snapshot.
    ///
    /// A call with `start = None` and `rev` already checked out is a no-op.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn check_out(&mut self, rev: u32, start: Option<u32>) {
        let rev = rev.min(self.max_rev);
        if start.is_none() && self.last_checkout_rev == Some(rev) {
            tracing::trace!("already checked out, skipping");
            return;
        }
        self.last_checkout_rev = Some(rev);

        let snapshot = self.execute(rev, rev, None);
        let lines = match start {
            Some(start) => {
                let present: HashSet<usize> = snapshot.iter().map(|l| l.pc).collect();
                self.execute(start, rev, Some(&present))
            }
            None => snapshot,
        };

        self.content = lines.iter().map(|l| l.data.as_str()).collect();
        self.lines = lines.into_iter().collect();
    }

    /// The timestamp (ms) of the revision that last touched line `i`, or `0` if `i` is the
    /// sentinel position or out of range.
    pub fn get_line_timestamp(&self, i: usize) -> i64 {
        match self.lines.get(i) {
            Some(line) if i + 1 < self.lines.len() => {
                self.ts_map.get(&line.rev).copied().unwrap_or(0)
            }
            _ => 0,
        }
    }

    /// The metadata attached to the revision that last touched line `i`, or an empty map if
    /// `i` is the sentinel position, out of range, or no metadata was recorded for that
    /// revision.
    pub fn get_line_extra(&self, i: usize) -> Extra {
        match self.lines.get(i) {
            Some(line) if i + 1 < self.lines.len() => {
                self.extra_map.get(&line.rev).cloned().unwrap_or_default()
            }
            _ => Extra::default(),
        }
    }
}

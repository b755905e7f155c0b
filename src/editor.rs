/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Translates `(old content, new content, rev)` into an in-place patch of the program:
//! [`LineLog::record_text`] diffs the current content against the new text and either takes
//! the trivial-update fast path (rewrite one `LINE` instruction in place) or splices in a
//! new chunk of code per diff block, threading jumps so that old and new readers both land
//! on the right lines depending on which revision they're viewing from.

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use crate::diff::diff_blocks;
use crate::diff::Block;
use crate::inst::Instruction;
use crate::linesplit::split_lines;
use crate::Extra;
use crate::LineInfo;
use crate::LineLog;

impl LineLog {
    /// Record `text` as a new revision, diffed against the currently checked-out content.
    ///
    /// If `text` equals the current content, this is a no-op that returns `max_rev`
    /// unchanged. Otherwise a new revision is assigned (except via the trivial-update fast
    /// path, which reuses `max_rev`) and its content becomes the latest recorded text.
    ///
    /// `timestamp` is the commit time in milliseconds; `None` or `Some(0)` both mean
    /// "unspecified", and the current wall-clock time is recorded instead (`spec.md` §9's
    /// Open Question: a timestamp of `0` is treated the same as absent, not as a real
    /// revision history starting at the Unix epoch). `extra` is arbitrary caller metadata
    /// attached to the revision, readable back via [`LineLog::get_line_extra`].
    #[tracing::instrument(level = "debug", skip(self, text, extra), fields(max_rev = self.max_rev))]
    pub fn record_text(&mut self, text: &str, timestamp: Option<i64>, extra: Option<Extra>) -> u32 {
        self.check_out(self.max_rev, None);
        if text == self.content {
            tracing::trace!("text unchanged, no-op");
            return self.max_rev;
        }

        let old_lines = split_lines(&self.content);
        let new_lines = split_lines(text);
        let blocks = diff_blocks(self.algorithm, &old_lines, &new_lines);

        if let Some(rev) = self.try_trivial_update(&blocks, &new_lines, timestamp) {
            tracing::trace!(rev, "trivial single-line update");
            self.content = text.to_string();
            return rev;
        }

        let rev = self.max_rev + 1;
        let ts = resolve_timestamp(timestamp);
        self.ts_map.insert(rev, ts);
        if let Some(extra) = extra {
            self.extra_map.insert(rev, extra);
        }

        for &block in blocks.iter().rev() {
            self.edit_chunk(block, rev, &new_lines);
        }

        self.max_rev = rev;
        self.last_checkout_rev = Some(rev);
        self.content = text.to_string();
        tracing::debug!(rev, blocks = blocks.len(), "recorded new revision");
        rev
    }

    /// Apply the single-line in-place rewrite described in `spec.md` §4.4, if `blocks`
    /// qualifies. Returns the (unchanged) revision number on success.
    fn try_trivial_update(
        &mut self,
        blocks: &[Block],
        new_lines: &[&str],
        timestamp: Option<i64>,
    ) -> Option<u32> {
        let [(a1, a2, b1, b2)] = blocks else {
            return None;
        };
        let (a1, a2, b1, b2) = (*a1, *a2, *b1, *b2);
        if a2 - a1 != 1 || b2 - b1 != 1 {
            return None;
        }

        let line = self.lines.get(a1)?;
        if line.rev != self.max_rev {
            return None;
        }
        let owners_of_head_rev = self.lines.iter().filter(|l| l.rev == self.max_rev).count();
        if owners_of_head_rev != 1 {
            return None;
        }

        let pc = line.pc;
        let new_data = new_lines[b1].to_string();
        let rev = match &self.code[pc] {
            Instruction::Line { rev, .. } => *rev,
            other => unreachable!(
                "linelog: line cache pc {pc} does not reference a LINE instruction ({other:?})"
            ),
        };
        self.code.set(
            pc,
            Instruction::Line {
                rev,
                data: new_data.clone(),
            },
        );
        let mut updated = self.lines[a1].clone();
        updated.data = new_data;
        self.lines.set(a1, updated);

        self.ts_map.insert(self.max_rev, resolve_timestamp(timestamp));
        Some(self.max_rev)
    }

    /// Splice one diff block into the program at revision `rev`, per `spec.md` §4.4's
    /// general edit path. Blocks must be applied in descending `a1` order (the caller does
    /// this) so that `lines[a1].pc` lookups for not-yet-processed blocks stay valid.
    fn edit_chunk(&mut self, (a1, a2, b1, b2): Block, rev: u32, new_lines: &[&str]) {
        assert!(a1 <= a2 && a2 <= self.lines.len(), "linelog: chunk out of bounds");

        let start = self.code.len();
        let a1_pc = self.lines[a1].pc;
        let original = self.code[a1_pc].clone();

        if b2 > b1 {
            self.code.push_back(Instruction::Jl {
                rev,
                pc: start + (b2 - b1) + 1,
            });
            for data in &new_lines[b1..b2] {
                self.code.push_back(Instruction::Line {
                    rev,
                    data: (*data).to_string(),
                });
            }
        }
        if a1 < a2 {
            let a2_pc = self.lines[a2 - 1].pc + 1;
            self.code.push_back(Instruction::Jge { rev, pc: a2_pc });
        }

        let tail = self.code.len();
        self.code.push_back(original.clone());
        if !matches!(original, Instruction::J { .. } | Instruction::End) {
            self.code.push_back(Instruction::J { pc: a1_pc + 1 });
        }
        self.code.set(a1_pc, Instruction::J { pc: start });

        // A pure insertion (a1 == a2) removes nothing from `lines`, so the entry sitting
        // at `a2` — which may be the trailing END sentinel — survives the splice below
        // unchanged. But its instruction just got relocated from `a1_pc` to `tail`; without
        // updating the cached pc here, the next edit that reads `lines[a2].pc` (or a future
        // `check_out`'s annotation bookkeeping) would dereference a stale `J` redirect
        // instead of the line's real home, and the sentinel's pc would stop pointing at an
        // actual END instruction.
        if a1 == a2 {
            let mut relocated = self.lines[a2].clone();
            relocated.pc = tail;
            self.lines.set(a2, relocated);
        }

        let new_line_infos: im::Vector<LineInfo> = new_lines[b1..b2]
            .iter()
            .enumerate()
            .map(|(i, data)| LineInfo {
                data: (*data).to_string(),
                rev,
                pc: start + 1 + i,
                deleted: false,
            })
            .collect();
        self.splice_lines(a1, a2, new_line_infos);
    }

    fn splice_lines(&mut self, a1: usize, a2: usize, new_infos: im::Vector<LineInfo>) {
        let tail = self.lines.split_off(a2);
        self.lines.split_off(a1);
        self.lines.append(new_infos);
        self.lines.append(tail);
    }
}

fn resolve_timestamp(timestamp: Option<i64>) -> i64 {
    match timestamp {
        Some(ts) if ts != 0 => ts,
        _ => now_ms(),
    }
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

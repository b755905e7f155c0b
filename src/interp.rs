/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Executes a `linelog` program under a pair of revision parameters, producing either a
//! point-in-time snapshot (`start_rev == end_rev`) or a union-of-deletions view
//! (`start_rev < end_rev`, with a `present` membership set telling the interpreter which
//! program counters are visible in the view's head revision).

use std::collections::HashSet;

use crate::inst::Instruction;
use crate::LineInfo;
use crate::LineLog;

impl LineLog {
    /// Run the program from `pc = 0` until `END`, emitting one [`LineInfo`] per visited
    /// `LINE`/`END`. `present`, when given, marks which program counters belong to the
    /// view's head snapshot; anything emitted that isn't in `present` is flagged `deleted`.
    ///
    /// Panics if the program doesn't reach `END` within `2 * code.len()` steps — per
    /// `spec.md` §4.3 this can only happen if the program is corrupt, which is an invariant
    /// violation rather than a condition callers are expected to recover from.
    pub(crate) fn execute(
        &self,
        start_rev: u32,
        end_rev: u32,
        present: Option<&HashSet<usize>>,
    ) -> Vec<LineInfo> {
        let max_steps = 2 * self.code.len().max(1);
        let mut pc = 0usize;
        let mut out = Vec::new();

        for _ in 0..max_steps {
            let deleted_at = |pc: usize| present.is_some_and(|p| !p.contains(&pc));
            match &self.code[pc] {
                Instruction::End => {
                    out.push(LineInfo {
                        data: String::new(),
                        rev: 0,
                        pc,
                        deleted: deleted_at(pc),
                    });
                    return out;
                }
                Instruction::Line { rev, data } => {
                    out.push(LineInfo {
                        data: data.clone(),
                        rev: *rev,
                        pc,
                        deleted: deleted_at(pc),
                    });
                    pc += 1;
                }
                Instruction::J { pc: target } => pc = *target,
                Instruction::Jge { rev, pc: target } => {
                    pc = if start_rev >= *rev { *target } else { pc + 1 };
                }
                Instruction::Jl { rev, pc: target } => {
                    pc = if end_rev < *rev { *target } else { pc + 1 };
                }
            }
        }

        tracing::error!(max_steps, "linelog program exceeded its step budget");
        panic!("linelog: corrupt program, exceeded step budget of {max_steps} steps");
    }
}

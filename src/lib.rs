/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! A compressed, stack-style version-control data structure that stores the complete edit
//! history of a single text file as a small interpreted program.
//!
//! A [`LineLog`] can, given the evolving text of a file across a linear sequence of
//! revisions:
//!
//! - recover the full content at any historical revision ([`LineLog::check_out`]),
//! - report the revision that last touched any given line ([`LineLog::get_line_timestamp`],
//!   [`LineLog::get_line_extra`]), and
//! - produce a union view that overlays deleted lines from earlier revisions onto a later
//!   one, for rendering blame/annotate output ([`LineLog::check_out`] with a range `start`).
//!
//! The structure is a miniature virtual machine: [`record_text`](LineLog::record_text)
//! compiles each new revision's diff against the previous content into a handful of jump
//! instructions threaded into the existing program, and [`check_out`](LineLog::check_out)
//! is a single linear scan of that program parameterized by two revision numbers. The
//! on-disk form ([`LineLog::export`]/[`LineLog::import`]) is a gzip-compressed JSON blob,
//! portable across any conforming implementation.
//!
//! ```
//! use linelog::LineLog;
//!
//! let mut log = LineLog::new();
//! log.record_text("one\ntwo\nthree\n", Some(1), None);
//! log.record_text("one\ntwo\nTHREE\n", Some(2), None);
//!
//! log.check_out(1, None);
//! assert_eq!(log.content(), "one\ntwo\nthree\n");
//!
//! log.check_out(2, None);
//! assert_eq!(log.content(), "one\ntwo\nTHREE\n");
//! ```

mod checkout;
mod diff;
mod editor;
mod error;
mod inst;
mod interp;
mod linesplit;
mod serialize;

#[cfg(test)]
mod tests;

pub use error::DecodeError;
pub use error::Error;
pub use inst::Instruction;
pub use similar::Algorithm;

/// Opaque, caller-defined metadata attached to a revision (e.g. commit author/message).
/// Round-tripped through [`LineLog::export`]/[`LineLog::import`] as a JSON object; values
/// that aren't JSON-representable are outside the serializer's contract.
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// One emitted line from executing a program: its text, the revision that introduced it,
/// the program counter of the `LINE` instruction that produced it, and whether a range
/// checkout ([`LineLog::check_out`] with `start`) considers it deleted by the head revision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineInfo {
    pub data: String,
    pub rev: u32,
    pub pc: usize,
    pub deleted: bool,
}

/// The complete edit history of a single text file, compiled into a small interpreted
/// program. See the crate documentation for the overall model.
#[derive(Clone, Debug)]
pub struct LineLog {
    pub(crate) code: im::Vector<Instruction>,
    pub(crate) ts_map: im::HashMap<u32, i64>,
    pub(crate) extra_map: im::HashMap<u32, Extra>,
    pub(crate) max_rev: u32,
    pub(crate) last_checkout_rev: Option<u32>,
    pub(crate) lines: im::Vector<LineInfo>,
    pub(crate) content: String,
    pub(crate) algorithm: Algorithm,
}

impl Default for LineLog {
    fn default() -> Self {
        Self::new()
    }
}

impl LineLog {
    /// An empty `LineLog`: a single-instruction program (`END`), checked out at revision 0,
    /// with empty content. Uses [`Algorithm::Myers`] for future diffs; see
    /// [`LineLog::with_algorithm`] to pick a different one.
    pub fn new() -> Self {
        Self::with_algorithm(Algorithm::Myers)
    }

    /// Like [`LineLog::new`], but diffs recorded with [`LineLog::record_text`] use `algorithm`
    /// instead of the default. `Patience` tends to produce more human-legible blame on files
    /// with repeated lines at the cost of being slightly more expensive to compute.
    pub fn with_algorithm(algorithm: Algorithm) -> Self {
        let mut log = LineLog {
            code: im::Vector::unit(Instruction::End),
            ts_map: im::HashMap::new(),
            extra_map: im::HashMap::new(),
            max_rev: 0,
            last_checkout_rev: None,
            lines: im::Vector::new(),
            content: String::new(),
            algorithm,
        };
        log.check_out(0, None);
        log
    }

    /// The content of the currently checked-out view (see [`LineLog::check_out`]).
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The lines of the currently checked-out view, in order, including the trailing
    /// sentinel entry produced by `END`. Indexable and iterable like a slice; backed by a
    /// persistent vector so cloning a `LineLog` (or a view of it) doesn't copy line data.
    pub fn lines(&self) -> &im::Vector<LineInfo> {
        &self.lines
    }

    /// The highest revision number ever recorded or imported.
    pub fn max_rev(&self) -> u32 {
        self.max_rev
    }
}

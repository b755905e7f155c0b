/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The instruction set `linelog` programs are compiled to and interpreted from. A tagged
//! enum rather than one struct with optional fields, per the design note in `spec.md` §9:
//! invalid opcode/field combinations are unrepresentable once an `Instruction` exists.

use serde::Deserialize;
use serde::Serialize;

use crate::error::DecodeError;

/// One instruction in a `linelog` program. `pc` fields are indices into the owning
/// `LineLog`'s `code` vector; the crate has no other kind of link between instructions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Unconditional jump to `pc`.
    J { pc: usize },
    /// Jump to `pc` if the view's `start_rev >= rev`, else fall through.
    Jge { rev: u32, pc: usize },
    /// Jump to `pc` if the view's `end_rev < rev`, else fall through.
    Jl { rev: u32, pc: usize },
    /// Emit `data`, tagged with the revision that introduced it, then fall through.
    Line { rev: u32, data: String },
    /// Emit the terminal sentinel line and halt.
    End,
}

impl Instruction {
    /// The jump target this instruction carries, if any. Used by the decoder to bounds-check
    /// every `pc` reference before a freshly imported program is trusted.
    pub(crate) fn jump_target(&self) -> Option<usize> {
        match self {
            Instruction::J { pc } | Instruction::Jge { pc, .. } | Instruction::Jl { pc, .. } => {
                Some(*pc)
            }
            Instruction::Line { .. } | Instruction::End => None,
        }
    }
}

/// Fixed integer opcode encoding for the wire format: `J=0, JGE=1, JL=2, LINE=3, END=4`.
/// Must stay bit-compatible with every other conforming `linelog` implementation.
#[derive(Serialize, Deserialize)]
pub(crate) struct WireInstruction {
    op: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rev: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pc: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<String>,
}

impl Serialize for Instruction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        WireInstruction::from(self).serialize(serializer)
    }
}

// Deliberately no `Deserialize for Instruction`: decoding a `WireInstruction` into an
// `Instruction` can fail with a specific, meaningful cause (unknown opcode, missing field),
// and serde's `Deserialize` trait has no way to propagate that beyond a generic, stringly
// `D::Error::custom(...)` — which `serde_json` then collapses into an opaque
// `serde_json::Error`, indistinguishable from "the JSON itself was malformed". Callers that
// need the precise `DecodeError` (see `crate::error::DecodeError`) must deserialize
// `WireInstruction` (plain derived `Deserialize`, infallible) and call `Instruction::try_from`
// themselves, as `LineLog::import` does in `src/serialize.rs`.

impl From<&Instruction> for WireInstruction {
    fn from(inst: &Instruction) -> Self {
        match inst {
            Instruction::J { pc } => WireInstruction {
                op: 0,
                rev: None,
                pc: Some(*pc),
                data: None,
            },
            Instruction::Jge { rev, pc } => WireInstruction {
                op: 1,
                rev: Some(*rev),
                pc: Some(*pc),
                data: None,
            },
            Instruction::Jl { rev, pc } => WireInstruction {
                op: 2,
                rev: Some(*rev),
                pc: Some(*pc),
                data: None,
            },
            Instruction::Line { rev, data } => WireInstruction {
                op: 3,
                rev: Some(*rev),
                pc: None,
                data: Some(data.clone()),
            },
            Instruction::End => WireInstruction {
                op: 4,
                rev: None,
                pc: None,
                data: None,
            },
        }
    }
}

impl TryFrom<WireInstruction> for Instruction {
    type Error = DecodeError;

    fn try_from(wire: WireInstruction) -> Result<Self, Self::Error> {
        let missing = |field: &'static str| DecodeError::MissingField { field };
        Ok(match wire.op {
            0 => Instruction::J {
                pc: wire.pc.ok_or_else(|| missing("pc"))?,
            },
            1 => Instruction::Jge {
                rev: wire.rev.ok_or_else(|| missing("rev"))?,
                pc: wire.pc.ok_or_else(|| missing("pc"))?,
            },
            2 => Instruction::Jl {
                rev: wire.rev.ok_or_else(|| missing("rev"))?,
                pc: wire.pc.ok_or_else(|| missing("pc"))?,
            },
            3 => Instruction::Line {
                rev: wire.rev.ok_or_else(|| missing("rev"))?,
                data: wire.data.ok_or_else(|| missing("data"))?,
            },
            4 => Instruction::End,
            other => return Err(DecodeError::UnknownOpcode(other)),
        })
    }
}

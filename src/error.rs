/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Error types for the fallible edges of a [`crate::LineLog`]: [`export`](crate::LineLog::export)
//! and [`import`](crate::LineLog::import). Everything else the struct does is treated as an
//! invariant: if it fails, the program that produced the `LineLog` is corrupt, and the failure
//! surfaces as a panic rather than a `Result` (see `SPEC_FULL.md` §4.10 for the rationale).

/// Top-level error type for [`crate::LineLog::export`] and [`crate::LineLog::import`].
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to gzip-compress export payload")]
    Compress(#[source] std::io::Error),

    #[error("failed to decode imported linelog")]
    Decode(#[from] DecodeError),
}

/// Why [`crate::LineLog::import`] rejected a buffer.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("not a valid gzip stream")]
    Gzip(#[source] std::io::Error),

    #[error("not valid UTF-8 after decompression")]
    Utf8(#[source] std::string::FromUtf8Error),

    #[error("malformed linelog JSON payload")]
    Json(#[source] serde_json::Error),

    #[error("unknown instruction opcode {0}")]
    UnknownOpcode(u8),

    #[error("instruction is missing required field {field:?} for its opcode")]
    MissingField { field: &'static str },

    #[error("program counter {pc} is out of range for a program of length {len}")]
    PcOutOfRange { pc: usize, len: usize },

    #[error("revision key {0:?} is not a valid non-negative integer")]
    InvalidRevisionKey(String),

    #[error("program has no instructions (a valid linelog program always ends in END)")]
    EmptyProgram,
}

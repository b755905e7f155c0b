/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Gzip-compressed JSON round-trip of `{ code, tsMap, extraMap }`. The JSON shape and the
//! integer opcode encoding (`J=0, JGE=1, JL=2, LINE=3, END=4`, see `inst.rs`) are a wire
//! contract: any conforming `linelog` implementation must produce and accept the same
//! bytes.

use std::collections::BTreeMap;
use std::io::Read;
use std::io::Write;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::Deserialize;
use serde::Serialize;

use crate::error::DecodeError;
use crate::error::Error;
use crate::inst::Instruction;
use crate::inst::WireInstruction;
use crate::Extra;
use crate::LineLog;

/// Export-direction shape: `code` serializes through `Instruction`'s own `Serialize` impl.
#[derive(Serialize)]
struct WireLineLogOut<'a> {
    code: Vec<&'a Instruction>,
    #[serde(rename = "tsMap")]
    ts_map: BTreeMap<String, i64>,
    #[serde(rename = "extraMap")]
    extra_map: BTreeMap<String, Extra>,
}

/// Import-direction shape: `code` deserializes as the raw, always-succeeds `WireInstruction`
/// rather than `Instruction` directly, so that converting each one to an `Instruction` (which
/// can fail with a specific, meaningful cause) happens in plain Rust code below instead of
/// inside serde's `Deserialize` machinery, where a failure would collapse into an opaque
/// `serde_json::Error` indistinguishable from "the JSON itself was malformed".
#[derive(Deserialize)]
struct WireLineLogIn {
    code: Vec<WireInstruction>,
    #[serde(rename = "tsMap", default)]
    ts_map: BTreeMap<String, i64>,
    #[serde(rename = "extraMap", default)]
    extra_map: BTreeMap<String, Extra>,
}

impl LineLog {
    /// Serialize this `LineLog` to a gzip-compressed JSON blob. The result round-trips
    /// through [`LineLog::import`] on any conforming implementation.
    pub fn export(&self) -> Result<Vec<u8>, Error> {
        let wire = WireLineLogOut {
            code: self.code.iter().collect(),
            ts_map: self
                .ts_map
                .iter()
                .map(|(rev, ts)| (rev.to_string(), *ts))
                .collect(),
            extra_map: self
                .extra_map
                .iter()
                .map(|(rev, extra)| (rev.to_string(), extra.clone()))
                .collect(),
        };
        let json = serde_json::to_vec(&wire).expect("WireLineLogOut serialization cannot fail");

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&json).map_err(Error::Compress)?;
        encoder.finish().map_err(Error::Compress)
    }

    /// Deserialize a `LineLog` from bytes produced by [`LineLog::export`] (by this or any
    /// other conforming implementation). Recomputes `max_rev` from the program's `JGE`/`JL`
    /// instructions and immediately checks out that revision to prime the cache.
    #[tracing::instrument(level = "debug", skip(bytes))]
    pub fn import(bytes: &[u8]) -> Result<LineLog, Error> {
        let mut decoder = GzDecoder::new(bytes);
        let mut json = Vec::new();
        decoder.read_to_end(&mut json).map_err(|e| {
            tracing::warn!(error = %e, "linelog import: not a valid gzip stream");
            DecodeError::Gzip(e)
        })?;
        let json = String::from_utf8(json).map_err(DecodeError::Utf8)?;

        let wire: WireLineLogIn = serde_json::from_str(&json).map_err(|e| {
            tracing::warn!(error = %e, "linelog import: malformed JSON payload");
            DecodeError::Json(e)
        })?;

        let code: im::Vector<Instruction> = wire
            .code
            .into_iter()
            .map(Instruction::try_from)
            .collect::<Result<_, DecodeError>>()?;

        if code.is_empty() {
            return Err(DecodeError::EmptyProgram.into());
        }

        for inst in code.iter() {
            if let Some(pc) = inst.jump_target() {
                if pc >= code.len() {
                    return Err(DecodeError::PcOutOfRange { pc, len: code.len() }.into());
                }
            }
        }

        let ts_map = parse_rev_map(wire.ts_map)?;
        let extra_map = parse_rev_map(wire.extra_map)?;

        let max_rev = code
            .iter()
            .filter_map(|inst| match inst {
                Instruction::Jge { rev, .. } | Instruction::Jl { rev, .. } => Some(*rev),
                _ => None,
            })
            .max()
            .unwrap_or(0);

        let mut log = LineLog {
            code,
            ts_map,
            extra_map,
            max_rev,
            last_checkout_rev: None,
            lines: im::Vector::new(),
            content: String::new(),
            algorithm: similar::Algorithm::Myers,
        };
        log.check_out(max_rev, None);
        tracing::debug!(max_rev, code_len = log.code.len(), "imported linelog");
        Ok(log)
    }
}

fn parse_rev_map<V>(wire: BTreeMap<String, V>) -> Result<im::HashMap<u32, V>, Error>
where
    V: Clone,
{
    wire.into_iter()
        .map(|(k, v)| {
            k.parse::<u32>()
                .map(|rev| (rev, v))
                .map_err(|_| Error::from(DecodeError::InvalidRevisionKey(k)))
        })
        .collect()
}

/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Splits text into lines the way the rest of `linelog` wants them: each line keeps its
//! trailing `'\n'`, and a final line with no trailing newline is kept as-is rather than
//! dropped or padded. This is the tokenization both the diff adapter (`diff.rs`) and the
//! editor (`editor.rs`) build on, so it is the one place "what counts as a line" is decided.

/// Split `s` into an ordered sequence of line slices, each retaining its trailing `'\n'` if
/// it had one. Concatenating the result always reproduces `s` exactly.
pub fn split_lines(s: &str) -> Vec<&str> {
    if s.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(s.matches('\n').count() + 1);
    let mut start = 0;
    for (i, b) in s.bytes().enumerate() {
        if b == b'\n' {
            out.push(&s[start..=i]);
            start = i + 1;
        }
    }
    if start < s.len() {
        out.push(&s[start..]);
    }
    out
}

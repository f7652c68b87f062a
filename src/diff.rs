// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Render diffs between original and corrected sources.
//!
//! Sources are compared line by line (line terminators included, so the
//! rendered diff reconstructs the corrected bytes exactly) and the result
//! is printed in one of three formats: unified (the default, with 3 lines
//! of context), RCS change commands, or context.

use std::ops::Range;

use clap::ValueEnum;
use imara_diff::intern::InternedInput;
use imara_diff::sources::byte_lines_with_terminator;
use imara_diff::{Algorithm, Sink, diff};

/// Number of context lines around each change (unified and context formats).
const CONTEXT_LINES: usize = 3;

/// Diff output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum DiffFormat {
    /// Unified diff with 3 lines of context
    #[default]
    Unified,

    /// RCS change commands
    Rcs,

    /// Context diff with 3 lines of context
    Context,
}

/// Sink collecting the change ranges reported by the diff algorithm,
/// as 0-based line ranges into the two sources.
#[derive(Default)]
struct Changes {
    ranges: Vec<(Range<usize>, Range<usize>)>,
}

impl Sink for Changes {
    type Out = Vec<(Range<usize>, Range<usize>)>;

    fn process_change(&mut self, before: Range<u32>, after: Range<u32>) {
        self.ranges.push((
            before.start as usize..before.end as usize,
            after.start as usize..after.end as usize,
        ));
    }

    fn finish(self) -> Self::Out {
        self.ranges
    }
}

/// A group of nearby changes rendered together, with context lines.
struct Hunk {
    changes: Vec<(Range<usize>, Range<usize>)>,
    before: Range<usize>,
    after: Range<usize>,
}

/// Group changes separated by at most `2 * CONTEXT_LINES` common lines
/// into hunks, then extend each hunk with its context.
fn group_hunks(
    changes: &[(Range<usize>, Range<usize>)],
    old_len: usize,
    new_len: usize,
) -> Vec<Hunk> {
    let mut hunks: Vec<Hunk> = Vec::new();
    for change in changes {
        let merge = hunks.last().is_some_and(|hunk| {
            let last = &hunk.changes[hunk.changes.len() - 1];
            change.0.start - last.0.end <= 2 * CONTEXT_LINES
        });
        if merge {
            if let Some(hunk) = hunks.last_mut() {
                hunk.changes.push(change.clone());
            }
        } else {
            hunks.push(Hunk {
                changes: vec![change.clone()],
                before: 0..0,
                after: 0..0,
            });
        }
    }
    for hunk in &mut hunks {
        let first = &hunk.changes[0];
        let last = &hunk.changes[hunk.changes.len() - 1];
        hunk.before =
            first.0.start.saturating_sub(CONTEXT_LINES)..(last.0.end + CONTEXT_LINES).min(old_len);
        hunk.after =
            first.1.start.saturating_sub(CONTEXT_LINES)..(last.1.end + CONTEXT_LINES).min(new_len);
    }
    hunks
}

/// Append one diff line: prefix, then the source line.
///
/// A line without a terminator can only be the last line of its file; it is
/// completed with the usual `\ No newline at end of file` marker.
fn push_line(out: &mut Vec<u8>, prefix: &[u8], line: &[u8]) {
    out.extend_from_slice(prefix);
    out.extend_from_slice(line);
    if !line.ends_with(b"\n") {
        out.extend_from_slice(b"\n\\ No newline at end of file\n");
    }
}

/// Format a line range for a unified hunk header (1-based, GNU conventions:
/// the count is omitted when 1, the start names the preceding line when 0).
fn unified_range(range: &Range<usize>) -> String {
    match range.len() {
        0 => format!("{},0", range.start),
        1 => format!("{}", range.start + 1),
        len => format!("{},{len}", range.start + 1),
    }
}

fn render_unified(
    changes: &[(Range<usize>, Range<usize>)],
    old: &[&[u8]],
    new: &[&[u8]],
    from: &str,
    to: &str,
) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(format!("--- {from}\n+++ {to}\n").as_bytes());
    for hunk in group_hunks(changes, old.len(), new.len()) {
        out.extend_from_slice(
            format!(
                "@@ -{} +{} @@\n",
                unified_range(&hunk.before),
                unified_range(&hunk.after)
            )
            .as_bytes(),
        );
        let mut old_pos = hunk.before.start;
        for (before, after) in &hunk.changes {
            for line in &old[old_pos..before.start] {
                push_line(&mut out, b" ", line);
            }
            for line in &old[before.clone()] {
                push_line(&mut out, b"-", line);
            }
            for line in &new[after.clone()] {
                push_line(&mut out, b"+", line);
            }
            old_pos = before.end;
        }
        for line in &old[old_pos..hunk.before.end] {
            push_line(&mut out, b" ", line);
        }
    }
    out
}

/// Format a line range for a context hunk header (1-based, inclusive).
fn context_range(range: &Range<usize>) -> String {
    match range.len() {
        0 => format!("{}", range.start),
        1 => format!("{}", range.start + 1),
        _ => format!("{},{}", range.start + 1, range.end),
    }
}

fn render_context(
    changes: &[(Range<usize>, Range<usize>)],
    old: &[&[u8]],
    new: &[&[u8]],
    from: &str,
    to: &str,
) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(format!("*** {from}\n--- {to}\n").as_bytes());
    for hunk in group_hunks(changes, old.len(), new.len()) {
        out.extend_from_slice(b"***************\n");
        out.extend_from_slice(format!("*** {} ****\n", context_range(&hunk.before)).as_bytes());
        // A side with no changed lines keeps only its header.
        if hunk.changes.iter().any(|(before, _)| !before.is_empty()) {
            let mut old_pos = hunk.before.start;
            for (before, after) in &hunk.changes {
                for line in &old[old_pos..before.start] {
                    push_line(&mut out, b"  ", line);
                }
                let marker: &[u8] = if after.is_empty() { b"- " } else { b"! " };
                for line in &old[before.clone()] {
                    push_line(&mut out, marker, line);
                }
                old_pos = before.end;
            }
            for line in &old[old_pos..hunk.before.end] {
                push_line(&mut out, b"  ", line);
            }
        }
        out.extend_from_slice(format!("--- {} ----\n", context_range(&hunk.after)).as_bytes());
        if hunk.changes.iter().any(|(_, after)| !after.is_empty()) {
            let mut new_pos = hunk.after.start;
            for (before, after) in &hunk.changes {
                for line in &new[new_pos..after.start] {
                    push_line(&mut out, b"  ", line);
                }
                let marker: &[u8] = if before.is_empty() { b"+ " } else { b"! " };
                for line in &new[after.clone()] {
                    push_line(&mut out, marker, line);
                }
                new_pos = after.end;
            }
            for line in &new[new_pos..hunk.after.end] {
                push_line(&mut out, b"  ", line);
            }
        }
    }
    out
}

/// Render RCS change commands: `d<line> <count>` and `a<line> <count>`,
/// both against original-file line numbers, added lines following each `a`.
fn render_rcs(changes: &[(Range<usize>, Range<usize>)], new: &[&[u8]]) -> Vec<u8> {
    let mut out = Vec::new();
    for (before, after) in changes {
        if !before.is_empty() {
            out.extend_from_slice(format!("d{} {}\n", before.start + 1, before.len()).as_bytes());
        }
        if !after.is_empty() {
            out.extend_from_slice(format!("a{} {}\n", before.end, after.len()).as_bytes());
            for line in &new[after.clone()] {
                out.extend_from_slice(line);
            }
        }
    }
    out
}

/// Render the differences between `before` and `after` in the given format.
///
/// `from` and `to` name the two sides in the file header (the RCS format
/// carries no header). Equal inputs render to nothing.
pub fn render_diff(
    format: DiffFormat,
    before: &[u8],
    after: &[u8],
    from: &str,
    to: &str,
) -> Vec<u8> {
    let input = InternedInput::new(
        byte_lines_with_terminator(before),
        byte_lines_with_terminator(after),
    );
    let changes = diff(Algorithm::Histogram, &input, Changes::default());
    if changes.is_empty() {
        return Vec::new();
    }
    let old: Vec<&[u8]> = input.before.iter().map(|&tok| input.interner[tok]).collect();
    let new: Vec<&[u8]> = input.after.iter().map(|&tok| input.interner[tok]).collect();
    match format {
        DiffFormat::Unified => render_unified(&changes, &old, &new, from, to),
        DiffFormat::Rcs => render_rcs(&changes, &new),
        DiffFormat::Context => render_context(&changes, &old, &new, from, to),
    }
}

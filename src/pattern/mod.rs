//! # Pattern Engine
//!
//! Parses a `LIKE`-style pattern into a small, testable intermediate
//! representation ([`ParsedPattern`]) and composes bitmaps from the
//! [`crate::positional`] and [`crate::length`] indexes to evaluate it,
//! without ever touching a cached source string.
//!
//! ## Grammar
//!
//! `%` means "any sequence including empty"; `_` means "exactly one byte
//! of any value". Both are structural — there is no escape mechanism in
//! the core (an escape processor, if required, runs before the core).
//!
//! ## Dispatch
//!
//! A pattern with zero or one segment is resolved by a fast path
//! ([`evaluate`]'s match arms); two or more segments fall through to the
//! recursive windowed matcher ([`recursive_match`]). A `_` never
//! contributes a bitmap intersection on its own: it is consumed entirely
//! by position arithmetic in [`match_at`]/[`match_end`].


use tracing::{debug, trace};

use crate::bitmap::CompressedBitmap;
use crate::length::LengthIndex;
use crate::positional::PositionalIndex;

const WILDCARD_ONE: u8 = b'_';
const WILDCARD_ANY: u8 = b'%';

/// The parsed, canonical form of a pattern: an ordered list of literal
/// segments (each possibly containing `_` wildcards) separated by `%`,
/// plus the two boundary flags and the precomputed minimum match length.
///
/// This is the form the engine actually operates on; raw pattern bytes
/// are never inspected again after [`ParsedPattern::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPattern {
    pub starts_any: bool,
    pub ends_any: bool,
    pub segments: Vec<Vec<u8>>,
    pub min_len: usize,
}

impl ParsedPattern {
    /// Splits `pattern` on `%`, recording the boundary flags and dropping
    /// empty segments produced by `%%` runs or a leading/trailing `%`.
    pub fn parse(pattern: &[u8]) -> ParsedPattern {
        let starts_any = pattern.first() == Some(&WILDCARD_ANY);
        let ends_any = pattern.last() == Some(&WILDCARD_ANY) && pattern.len() > 1
            || (pattern.len() == 1 && pattern[0] == WILDCARD_ANY);

        let segments: Vec<Vec<u8>> = pattern
            .split(|&b| b == WILDCARD_ANY)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_vec())
            .collect();

        let min_len = segments.iter().map(|s| s.len()).sum();

        ParsedPattern {
            starts_any,
            ends_any,
            segments,
            min_len,
        }
    }

    fn is_all_wildcards(seg: &[u8]) -> bool {
        !seg.is_empty() && seg.iter().all(|&b| b == WILDCARD_ONE)
    }
}

/// Matches `seg` anchored at absolute position `start_pos` from the start
/// of the string. An all-`_` segment of length `k` is equivalent to
/// requiring a record of length `>= start_pos + k` (the generalisation of
/// "the set of records with length > start_pos" to a multi-byte wildcard
/// run — a single `_` is the `k == 1` special case).
fn match_at(
    seg: &[u8],
    start_pos: usize,
    positional: &PositionalIndex,
    length: &LengthIndex,
) -> CompressedBitmap {
    if ParsedPattern::is_all_wildcards(seg) {
        return length
            .at_least_get(start_pos + seg.len())
            .cloned()
            .unwrap_or_default();
    }

    let mut result: Option<CompressedBitmap> = None;
    for (i, &c) in seg.iter().enumerate() {
        if c == WILDCARD_ONE {
            continue;
        }
        let Some(bitmap) = positional.forward_get(c, start_pos + i) else {
            return CompressedBitmap::new();
        };
        match &mut result {
            None => result = Some(bitmap.copy()),
            Some(r) => r.and_inplace(bitmap),
        }
        if result.as_ref().is_some_and(CompressedBitmap::is_empty) {
            return CompressedBitmap::new();
        }
    }
    result.unwrap_or_default()
}

/// Matches `seg` anchored so its last byte lands on the last byte of the
/// record: symmetric to [`match_at`] but reading the reverse index at
/// `-(len(seg) - i)`. An all-`_` suffix of length `k` is `L_ge[k]`.
fn match_end(seg: &[u8], positional: &PositionalIndex, length: &LengthIndex) -> CompressedBitmap {
    if ParsedPattern::is_all_wildcards(seg) {
        return length.at_least_get(seg.len()).cloned().unwrap_or_default();
    }

    let mut result: Option<CompressedBitmap> = None;
    for (i, &c) in seg.iter().enumerate() {
        if c == WILDCARD_ONE {
            continue;
        }
        let offset = -((seg.len() - i) as i16);
        let Some(bitmap) = positional.reverse_get(c, offset) else {
            return CompressedBitmap::new();
        };
        match &mut result {
            None => result = Some(bitmap.copy()),
            Some(r) => r.and_inplace(bitmap),
        }
        if result.as_ref().is_some_and(CompressedBitmap::is_empty) {
            return CompressedBitmap::new();
        }
    }
    result.unwrap_or_default()
}

/// Evaluates a parsed pattern against the positional and length indexes,
/// returning the matching slot set. `max_len` is the index's current
/// `max_len_observed` (the upper bound any record could possibly reach).
///
/// Does not subtract tombstones — that post-processing step happens in
/// [`crate::index::BiscuitIndex::begin_scan`], once, over the final
/// result, rather than at every intermediate bitmap.
pub fn evaluate(parsed: &ParsedPattern, positional: &PositionalIndex, length: &LengthIndex) -> CompressedBitmap {
    let max_len = length.max_len_observed();

    match parsed.segments.as_slice() {
        [] if parsed.starts_any || parsed.ends_any => {
            debug!("pattern is all wildcards: matching every slot");
            length.at_least_get(0).cloned().unwrap_or_default()
        }
        [] => {
            trace!("empty pattern: matching only the empty string");
            length.equals_get(0).cloned().unwrap_or_default()
        }
        [seg] if !parsed.starts_any && !parsed.ends_any => {
            // Exact match.
            let mut m = match_at(seg, 0, positional, length);
            let eq = length.equals_get(seg.len()).cloned().unwrap_or_default();
            m.and_inplace(&eq);
            m
        }
        [seg] if !parsed.starts_any && parsed.ends_any => {
            // Prefix match.
            let mut m = match_at(seg, 0, positional, length);
            let ge = length.at_least_get(seg.len()).cloned().unwrap_or_default();
            m.and_inplace(&ge);
            m
        }
        [seg] if parsed.starts_any && !parsed.ends_any => {
            // Suffix match.
            let mut m = match_end(seg, positional, length);
            let ge = length.at_least_get(seg.len()).cloned().unwrap_or_default();
            m.and_inplace(&ge);
            m
        }
        [seg] => {
            // Contains: both sides open, slide the window over every
            // possible start position.
            let mut result = CompressedBitmap::new();
            if seg.len() <= max_len {
                for p in 0..=(max_len - seg.len()) {
                    let m = match_at(seg, p, positional, length);
                    if !m.is_empty() {
                        result.or_inplace(&m);
                    }
                }
            }
            result
        }
        segments => recursive_match(
            segments,
            0,
            0,
            length.at_least_get(parsed.min_len).cloned().unwrap_or_default(),
            parsed.starts_any,
            parsed.ends_any,
            max_len,
            positional,
            length,
        ),
    }
}

/// The recursive windowed multi-segment matcher. `candidates`
/// narrows monotonically down each recursion path; a path is abandoned
/// the moment its candidate set goes empty.
///
/// The first segment is anchored to position `0` unless `starts_any`,
/// since segments are only ever separated by `%` — an un-anchored first
/// segment would accept matches a full scan of a non-`%`-prefixed pattern
/// would reject.
#[allow(clippy::too_many_arguments)]
fn recursive_match(
    segments: &[Vec<u8>],
    i: usize,
    min_start: usize,
    candidates: CompressedBitmap,
    starts_any: bool,
    ends_any: bool,
    max_len: usize,
    positional: &PositionalIndex,
    length: &LengthIndex,
) -> CompressedBitmap {
    if candidates.is_empty() {
        return candidates;
    }

    let seg = &segments[i];
    let is_last = i == segments.len() - 1;

    if is_last && !ends_any {
        let mut m = match_end(seg, positional, length);
        m.and_inplace(&candidates);
        return m;
    }

    let remaining: usize = segments[i + 1..].iter().map(|s| s.len()).sum();
    let Some(max_start) = max_len.checked_sub(seg.len()).and_then(|v| v.checked_sub(remaining)) else {
        return CompressedBitmap::new();
    };

    let window_end = if i == 0 && !starts_any {
        min_start.min(max_start)
    } else {
        max_start
    };

    if window_end < min_start {
        return CompressedBitmap::new();
    }

    let mut result = CompressedBitmap::new();
    for p in min_start..=window_end {
        let mut m = match_at(seg, p, positional, length);
        if m.is_empty() {
            continue;
        }
        m.and_inplace(&candidates);
        if m.is_empty() {
            continue;
        }

        if is_last {
            // Last segment, pattern ends with `%`: nothing further
            // constrains the match once this window lands.
            result.or_inplace(&m);
        } else {
            let sub = recursive_match(
                segments,
                i + 1,
                p + seg.len(),
                m,
                starts_any,
                ends_any,
                max_len,
                positional,
                length,
            );
            result.or_inplace(&sub);
        }
    }
    result
}

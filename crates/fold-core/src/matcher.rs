//! Region matching.
//!
//! A matcher scans the canonical (fully expanded) text and reports the spans
//! eligible for folding, together with the placeholder form each span
//! collapses to. The pattern is pluggable: the kernel only fixes the contract
//! here, concrete matchers live in integration crates (e.g.
//! `fold-core-match-simple` for regex-based call matching).
//!
//! Matchers must report spans in ascending, non-overlapping order.
//! [`normalize_matches`] resolves an arbitrary candidate list into that form
//! (leftmost-longest); [`validate_matches`] is the fail-fast check applied
//! before any region set is built.

use crate::error::FoldError;
use crate::text;

/// A single candidate region reported by a matcher.
///
/// Offsets and lengths are char offsets into the canonical text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    /// Start char offset of the match in the canonical text.
    pub start: usize,
    /// The full matched text.
    pub text: String,
}

impl RawMatch {
    /// Create a new raw match.
    pub fn new(start: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            text: text.into(),
        }
    }

    /// Length of the matched text in chars.
    pub fn len(&self) -> usize {
        text::char_len(&self.text)
    }

    /// Returns `true` if the matched text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Exclusive end char offset of the match.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.len())
    }
}

/// Finds foldable regions in canonical text.
///
/// Implementations must be pure: deterministic for a given input, no side
/// effects. [`matches`](RegionMatcher::matches) must return spans in
/// ascending, non-overlapping order; run candidates through
/// [`normalize_matches`] when the underlying scan cannot guarantee that.
pub trait RegionMatcher {
    /// Scan `canonical_text` and return matched regions in ascending,
    /// non-overlapping order.
    fn matches(&self, canonical_text: &str) -> Vec<RawMatch>;

    /// The placeholder form `full_text` collapses to.
    ///
    /// A fixed, matcher-defined shortening (typically a prefix token of the
    /// match). Must not be longer, in chars, than `full_text` itself.
    fn display_text(&self, full_text: &str) -> String;
}

/// Resolve an arbitrary candidate list into ascending, non-overlapping order.
///
/// Overlaps are resolved leftmost-longest: the earliest-starting, then
/// longest, candidate wins, and any candidate overlapping an already-accepted
/// match is dropped. Empty candidates are dropped.
pub fn normalize_matches(mut candidates: Vec<RawMatch>) -> Vec<RawMatch> {
    candidates.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| b.len().cmp(&a.len())));

    let mut accepted: Vec<RawMatch> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if candidate.is_empty() {
            continue;
        }
        let overlaps = accepted
            .last()
            .is_some_and(|last| candidate.start < last.end());
        if !overlaps {
            accepted.push(candidate);
        }
    }
    accepted
}

/// Check that `matches` is ascending, non-overlapping, non-empty, and within
/// the bounds of `canonical_text`.
///
/// Violations are programming errors in the matcher; the caller must not
/// build a partial region set from a list that fails here.
pub fn validate_matches(canonical_text: &str, matches: &[RawMatch]) -> Result<(), FoldError> {
    let text_len = text::char_len(canonical_text);
    let mut previous: Option<(usize, usize)> = None;

    for m in matches {
        if m.is_empty() {
            return Err(FoldError::EmptyMatch { offset: m.start });
        }
        if m.end() > text_len {
            return Err(FoldError::MatchOutOfBounds {
                start: m.start,
                end: m.end(),
                text_len,
            });
        }
        if let Some((prev_start, prev_end)) = previous {
            if m.start < prev_start {
                return Err(FoldError::UnorderedMatch {
                    previous: prev_start,
                    offset: m.start,
                });
            }
            if m.start < prev_end {
                return Err(FoldError::OverlappingMatch {
                    previous_end: prev_end,
                    start: m.start,
                    end: m.end(),
                });
            }
        }
        previous = Some((m.start, m.end()));
    }

    Ok(())
}

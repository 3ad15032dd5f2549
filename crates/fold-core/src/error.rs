//! Kernel error types.
//!
//! The taxonomy is deliberately narrow: every variant indicates a programming
//! error in a matcher, caught fail-fast before any region set is built. None
//! of these are user-visible states in normal operation.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
/// Errors produced by the folding kernel.
pub enum FoldError {
    #[error("match at offset {offset} follows match at offset {previous}")]
    /// A matcher returned matches that are not in ascending start order.
    UnorderedMatch {
        /// Start offset of the preceding match.
        previous: usize,
        /// Start offset of the out-of-order match.
        offset: usize,
    },

    #[error("match at {start}..{end} overlaps match ending at {previous_end}")]
    /// A matcher returned matches with overlapping spans.
    OverlappingMatch {
        /// Exclusive end offset of the preceding match.
        previous_end: usize,
        /// Start offset of the overlapping match.
        start: usize,
        /// Exclusive end offset of the overlapping match.
        end: usize,
    },

    #[error("match at {start}..{end} exceeds text length {text_len}")]
    /// A matched span extends past the end of the canonical text.
    MatchOutOfBounds {
        /// Start offset of the match.
        start: usize,
        /// Exclusive end offset of the match.
        end: usize,
        /// Char length of the canonical text.
        text_len: usize,
    },

    #[error("empty match at offset {offset}")]
    /// A matcher returned a zero-length match.
    EmptyMatch {
        /// Start offset of the empty match.
        offset: usize,
    },

    #[error("display text is {display_len} chars but matched text is only {full_len} at offset {offset}")]
    /// A placeholder longer than the text it replaces would grow the buffer
    /// when "folding".
    DisplayTooLong {
        /// Start offset of the match.
        offset: usize,
        /// Char length of the matched text.
        full_len: usize,
        /// Char length of the placeholder.
        display_len: usize,
    },
}

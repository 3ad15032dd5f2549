//! `fold-core-match-simple` - Simple (regex-based) region matchers for `fold-core`.
//!
//! This crate is intended for lightweight fold patterns (tracing calls, markers,
//! etc.) where full parsing is unnecessary.

use fold_core::matcher::{RawMatch, RegionMatcher, normalize_matches};
use regex::Regex;

/// How a matched span shortens into its placeholder.
#[derive(Debug, Clone)]
pub enum Placeholder {
    /// A fixed placeholder string.
    Fixed(String),
    /// The match truncated at the first occurrence of a delimiter (the
    /// delimiter itself is not kept).
    ///
    /// Example: `console.log('x')` truncated at `(` folds to `console.log`.
    TruncateAt(char),
}

/// A regex-based region matcher.
///
/// Candidate matches are resolved leftmost-longest before they are returned,
/// as the kernel's matcher contract requires.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
    placeholder: Placeholder,
}

impl RegexMatcher {
    pub fn new(pattern: &str, placeholder: Placeholder) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            placeholder,
        })
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl RegionMatcher for RegexMatcher {
    fn matches(&self, canonical_text: &str) -> Vec<RawMatch> {
        let mut candidates = Vec::new();
        for m in self.regex.find_iter(canonical_text) {
            let start = char_offset_at(canonical_text, m.start());
            candidates.push(RawMatch::new(start, m.as_str()));
        }
        normalize_matches(candidates)
    }

    fn display_text(&self, full_text: &str) -> String {
        match &self.placeholder {
            Placeholder::Fixed(text) => text.clone(),
            Placeholder::TruncateAt(delimiter) => match full_text.find(*delimiter) {
                Some(byte) => full_text[..byte].to_string(),
                None => full_text.to_string(),
            },
        }
    }
}

/// A matcher for call expressions with a single quoted literal argument,
/// e.g. `console.log('Hello world!')`.
///
/// The placeholder form is the callee itself: the argument list is what folds
/// away.
#[derive(Debug, Clone)]
pub struct CallMatcher {
    inner: RegexMatcher,
    callee: String,
}

impl CallMatcher {
    /// Match calls to `callee` carrying a single single- or double-quoted
    /// literal argument.
    pub fn new(callee: &str) -> Result<Self, regex::Error> {
        // Non-greedy body so adjacent calls on one line stay separate.
        let pattern = format!(r#"{}\(('|").*?('|")\)"#, regex::escape(callee));
        Ok(Self {
            inner: RegexMatcher::new(&pattern, Placeholder::TruncateAt('('))?,
            callee: callee.to_string(),
        })
    }

    /// The `console.log` tracing-call matcher.
    pub fn console_log() -> Result<Self, regex::Error> {
        Self::new("console.log")
    }

    /// The callee whose calls this matcher folds.
    pub fn callee(&self) -> &str {
        &self.callee
    }
}

impl RegionMatcher for CallMatcher {
    fn matches(&self, canonical_text: &str) -> Vec<RawMatch> {
        self.inner.matches(canonical_text)
    }

    fn display_text(&self, full_text: &str) -> String {
        self.inner.display_text(full_text)
    }
}

/// Char offset of `byte` in `text` (must fall on a char boundary).
fn char_offset_at(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

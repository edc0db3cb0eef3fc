//! Capitalizer rules: substrings of a name component to force-uppercase.
//!
//! Capitalizers are consulted by the name formatter while it rewrites a
//! component. Each rule proposes at most one match interval — its earliest
//! occurrence in the text under consideration — and the formatter picks the
//! proposal that starts leftmost.

use std::fmt;

use regex::Regex;

use crate::core::errors::{BindruneError, Result};

/// A substring interval a capitalizer wants replaced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapitalSpan {
    /// Replacement text (already uppercased).
    pub text: String,
    /// Byte offset where the match starts.
    pub start: usize,
    /// Byte offset one past the end of the match.
    pub end: usize,
}

/// A rule proposing one substring of a component to force-uppercase.
pub trait Capitalizer: fmt::Debug + Send + Sync {
    /// Suggest a capitalization for `text`.
    ///
    /// `has_leading` indicates that `text` is the continuation of a string
    /// that was previously split by the formatter. Returns the earliest
    /// matching interval, or `None` when the rule does not apply.
    fn suggest(&self, text: &str, has_leading: bool) -> Option<CapitalSpan>;
}

/// Capitalizes an occurrence of a fixed word inside a component.
///
/// Matching is ASCII case-insensitive: `WordCapitalizer::new("sse2")` turns
/// the `sse2` in `x86_sse2` into `SSE2`.
#[derive(Clone, Debug)]
pub struct WordCapitalizer {
    word: String,
}

impl WordCapitalizer {
    /// Create a capitalizer for the given word.
    pub fn new(word: impl Into<String>) -> Self {
        Self { word: word.into() }
    }
}

impl Capitalizer for WordCapitalizer {
    fn suggest(&self, text: &str, _has_leading: bool) -> Option<CapitalSpan> {
        let width = self.word.len();
        if width == 0 || text.len() < width {
            return None;
        }

        for start in 0..=text.len() - width {
            if !text.is_char_boundary(start) || !text.is_char_boundary(start + width) {
                continue;
            }

            if text[start..start + width].eq_ignore_ascii_case(&self.word) {
                return Some(CapitalSpan {
                    text: self.word.to_uppercase(),
                    start,
                    end: start + width,
                });
            }
        }

        None
    }
}

/// Capitalizes via a regex, uppercasing the first capture group.
///
/// `PatternCapitalizer::new(r"(?i)rect(i)", false)` capitalizes the `i` in
/// `recti` but leaves `rect` alone.
#[derive(Debug)]
pub struct PatternCapitalizer {
    pattern: Regex,
    skip_leading: bool,
}

impl PatternCapitalizer {
    /// Compile a capitalizer from a regex with at least one capture group.
    ///
    /// With `skip_leading` set, the rule stands down when the text is the
    /// leading piece of a split component.
    pub fn new(pattern: &str, skip_leading: bool) -> Result<Self> {
        let compiled =
            Regex::new(pattern).map_err(|err| BindruneError::pattern(pattern, err.to_string()))?;

        if compiled.captures_len() < 2 {
            return Err(BindruneError::pattern(
                pattern,
                "capitalizer patterns need a capture group to uppercase",
            ));
        }

        Ok(Self {
            pattern: compiled,
            skip_leading,
        })
    }
}

impl Capitalizer for PatternCapitalizer {
    fn suggest(&self, text: &str, has_leading: bool) -> Option<CapitalSpan> {
        if self.skip_leading && !has_leading {
            return None;
        }

        let captures = self.pattern.captures(text)?;
        let group = captures.get(1)?;

        Some(CapitalSpan {
            text: group.as_str().to_uppercase(),
            start: group.start(),
            end: group.end(),
        })
    }
}

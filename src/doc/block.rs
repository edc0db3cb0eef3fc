//! Doc-comment blocks: recovered documentation text with source anchoring.

use std::path::{Path, PathBuf};

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// A block of documentation comment text, with one or more printable lines,
/// anchored to the source position it was recovered from.
///
/// Blocks are immutable values: every transformation returns a new block.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoccommentBlock {
    file: PathBuf,
    line: usize,
    column: usize,
    text: String,
}

impl DoccommentBlock {
    /// Create a block anchored at the given file position (1-based line and
    /// column).
    pub fn new(
        file: impl Into<PathBuf>,
        line: usize,
        column: usize,
        text: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            text: text.into(),
        }
    }

    /// Create a free-floating block from bare text, anchored at 1:1 of an
    /// empty path. Mostly useful in tests and for synthesized comments.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(PathBuf::new(), 1, 1, text)
    }

    /// Path of the file this comment was recovered from.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// 1-based line of the comment's anchor.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the comment's anchor.
    pub fn column(&self) -> usize {
        self.column
    }

    /// The comment text, potentially spanning multiple lines.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of source lines the block covers: embedded newlines plus one.
    pub fn line_span(&self) -> usize {
        self.text.matches('\n').count() + 1
    }

    /// Returns `true` if `line` falls inside this block's span.
    pub fn contains_line(&self, line: usize) -> bool {
        line >= self.line && line < self.line + self.line_span()
    }

    /// Returns `true` if the block covers more than one line.
    pub fn is_multi_line(&self) -> bool {
        self.line_span() > 1
    }

    /// The individual lines of the comment text.
    pub fn lines(&self) -> Vec<&str> {
        self.text.split('\n').collect()
    }

    /// Byte offsets into the text where each line starts.
    pub fn line_break_offsets(&self) -> Vec<usize> {
        let mut offsets = vec![0];
        for (index, _) in self.text.match_indices('\n') {
            offsets.push(index + 1);
        }
        // A trailing newline does not open another line.
        if offsets.len() > 1 && offsets.last() == Some(&self.text.len()) {
            offsets.pop();
        }
        offsets
    }

    /// 1-based line index (within the block) of the given byte offset.
    pub fn line_index_at(&self, offset: usize) -> usize {
        self.text[..offset.min(self.text.len())]
            .matches('\n')
            .count()
            + 1
    }

    /// Returns a copy with different text but the same anchor.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            file: self.file.clone(),
            line: self.line,
            column: self.column,
            text: text.into(),
        }
    }

    /// Returns a copy whose text is the given lines joined with newlines.
    pub fn with_lines<I, S>(&self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = lines
            .into_iter()
            .map(|line| line.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        self.with_text(joined)
    }

    /// Returns a copy with every occurrence of `old` replaced by `new`.
    pub fn replace(&self, old: &str, new: &str) -> Self {
        self.with_text(self.text.replace(old, new))
    }

    /// Returns a copy with every match of `pattern` rewritten by `replacer`.
    pub fn sub<F>(&self, pattern: &Regex, replacer: F) -> Self
    where
        F: FnMut(&Captures<'_>) -> String,
    {
        self.with_text(pattern.replace_all(&self.text, replacer).into_owned())
    }

    /// Merges this block with another by concatenating the texts with a
    /// blank line in between, anchored at whichever side starts first.
    pub fn merging(&self, other: &Self) -> Self {
        let (line, column) = if self.line <= other.line {
            (self.line, self.column)
        } else {
            (other.line, other.column)
        };

        Self {
            file: self.file.clone(),
            line,
            column,
            text: format!("{}\n\n{}", self.text, other.text),
        }
    }

    /// Merges two optional blocks; an absent side yields the other.
    pub fn merge(first: Option<Self>, second: Option<Self>) -> Option<Self> {
        match (first, second) {
            (None, second) => second,
            (first, None) => first,
            (Some(first), Some(second)) => Some(first.merging(&second)),
        }
    }

    /// Merges a sequence of blocks front to back.
    pub fn merge_all<I>(blocks: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut iterator = blocks.into_iter();
        let first = iterator.next()?;
        Some(iterator.fold(first, |merged, next| merged.merging(&next)))
    }

    /// Strips the shallowest shared indentation from every line.
    ///
    /// The minimum indentation is computed over the non-blank lines starting
    /// at `start_offset`; that many leading whitespace characters are then
    /// removed from each line. Single-line blocks are returned unchanged.
    pub fn normalize_indentation(&self, start_offset: usize) -> Self {
        if !self.is_multi_line() {
            return self.clone();
        }

        let lines = self.lines();
        let shallowest = lines
            .iter()
            .skip(start_offset)
            .filter_map(|line| indent_level(line))
            .min();

        let Some(shallowest) = shallowest else {
            return self.clone();
        };

        self.with_lines(lines.iter().map(|line| de_indent(line, shallowest)))
    }
}

/// Leading whitespace width of a line; `None` for blank lines.
fn indent_level(line: &str) -> Option<usize> {
    if line.trim().is_empty() {
        return None;
    }
    Some(line.chars().take_while(|ch| ch.is_whitespace()).count())
}

/// Removes up to `level` leading whitespace characters from a line.
fn de_indent(line: &str, level: usize) -> String {
    let mut rest = line;
    let mut removed = 0;
    while removed < level {
        match rest.chars().next() {
            Some(ch) if ch.is_whitespace() => {
                rest = &rest[ch.len_utf8()..];
                removed += 1;
            }
            _ => break,
        }
    }
    rest.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_span_and_contains_line() {
        let block = DoccommentBlock::new("header.h", 10, 4, "first\nsecond\nthird");
        assert_eq!(block.line_span(), 3);
        assert!(block.contains_line(10));
        assert!(block.contains_line(12));
        assert!(!block.contains_line(9));
        assert!(!block.contains_line(13));

        let single = DoccommentBlock::new("header.h", 10, 4, "only");
        assert_eq!(single.line_span(), 1);
        assert!(!single.is_multi_line());
    }

    #[test]
    fn test_line_break_offsets() {
        let block = DoccommentBlock::from_text("ab\ncd\nef");
        assert_eq!(block.line_break_offsets(), vec![0, 3, 6]);

        let block = DoccommentBlock::from_text("ab\n");
        assert_eq!(block.line_break_offsets(), vec![0]);
    }

    #[test]
    fn test_line_index_at() {
        let block = DoccommentBlock::from_text("ab\ncd\nef");
        assert_eq!(block.line_index_at(0), 1);
        assert_eq!(block.line_index_at(3), 2);
        assert_eq!(block.line_index_at(7), 3);
    }

    #[test]
    fn test_merging_anchors_at_smaller_line() {
        let upper = DoccommentBlock::new("header.h", 4, 5, "upper");
        let lower = DoccommentBlock::new("header.h", 8, 1, "lower");

        let merged = upper.merging(&lower);
        assert_eq!(merged.line(), 4);
        assert_eq!(merged.column(), 5);
        assert_eq!(merged.text(), "upper\n\nlower");

        let merged = lower.merging(&upper);
        assert_eq!(merged.line(), 4);
        assert_eq!(merged.column(), 5);
        assert_eq!(merged.text(), "lower\n\nupper");
    }

    #[test]
    fn test_merge_with_absent_sides() {
        let block = DoccommentBlock::from_text("text");
        assert_eq!(
            DoccommentBlock::merge(Some(block.clone()), None),
            Some(block.clone())
        );
        assert_eq!(
            DoccommentBlock::merge(None, Some(block.clone())),
            Some(block)
        );
        assert_eq!(DoccommentBlock::merge(None, None), None);
    }

    #[test]
    fn test_merge_all() {
        assert_eq!(DoccommentBlock::merge_all(Vec::new()), None);

        let blocks = vec![
            DoccommentBlock::new("h", 1, 1, "a"),
            DoccommentBlock::new("h", 2, 1, "b"),
            DoccommentBlock::new("h", 3, 1, "c"),
        ];
        let merged = DoccommentBlock::merge_all(blocks).unwrap();
        assert_eq!(merged.text(), "a\n\nb\n\nc");
        assert_eq!(merged.line(), 1);
    }

    #[test]
    fn test_normalize_indentation() {
        let block = DoccommentBlock::from_text("    first\n      second\n    third");
        let normalized = block.normalize_indentation(0);
        assert_eq!(normalized.text(), "first\n  second\nthird");
    }

    #[test]
    fn test_normalize_indentation_skips_blank_lines() {
        let block = DoccommentBlock::from_text("  first\n\n   second");
        let normalized = block.normalize_indentation(0);
        assert_eq!(normalized.text(), "first\n\n second");
    }

    #[test]
    fn test_normalize_indentation_start_offset() {
        // The first line's indentation is ignored when computing the level.
        let block = DoccommentBlock::from_text("title\n    body\n    more");
        let normalized = block.normalize_indentation(1);
        assert_eq!(normalized.text(), "title\nbody\nmore");
    }

    #[test]
    fn test_normalize_indentation_single_line() {
        let block = DoccommentBlock::from_text("   text");
        assert_eq!(block.normalize_indentation(0), block);
    }

    #[test]
    fn test_sub() {
        let block = DoccommentBlock::from_text("see `D3D12_OBJECT` here");
        let pattern = Regex::new(r"`([A-Z0-9_]+)`").unwrap();
        let rewritten = block.sub(&pattern, |captures| format!("`{}`", &captures[1].len()));
        assert_eq!(rewritten.text(), "see `12` here");
    }
}

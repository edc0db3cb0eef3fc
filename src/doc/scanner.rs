//! Lexing of documentation comments out of raw source text.
//!
//! The scanner walks a file character by character through four states
//! (normal code, string literal, `//` comment, `/*` comment), tracking line
//! and column. Every closed comment span is tested against the configured
//! opening markers; spans that match none are dropped, matched spans have
//! the marker stripped and become [`DoccommentBlock`]s anchored right after
//! the marker.
//!
//! Scan results and raw file lines are memoized per file path for the
//! lifetime of the scanner, so a file is read and scanned at most once even
//! when many declarations point into it from concurrent passes.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use super::block::DoccommentBlock;

/// Default doc-comment opening markers, longest first.
pub const DEFAULT_MARKERS: &[&str] = &["//!<", "//!", "/**"];

/// Supplies raw source text to the scanner.
///
/// Unreadable files are reported as `None`: the pipeline treats them as
/// "no comments", never as an error.
pub trait SourceReader: Send + Sync {
    /// Returns the full text of the file at `path`, if it can be read.
    fn read(&self, path: &Path) -> Option<String>;
}

/// A [`SourceReader`] backed by the filesystem.
#[derive(Debug, Default)]
pub struct FileReader;

impl SourceReader for FileReader {
    fn read(&self, path: &Path) -> Option<String> {
        fs::read_to_string(path).ok()
    }
}

/// A [`SourceReader`] backed by an in-memory file map.
#[derive(Debug, Default)]
pub struct MemoryReader {
    files: HashMap<PathBuf, String>,
}

impl MemoryReader {
    /// Create an empty in-memory reader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `text` as the contents of `path`.
    pub fn insert(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }
}

impl SourceReader for MemoryReader {
    fn read(&self, path: &Path) -> Option<String> {
        self.files.get(path).cloned()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScanState {
    Normal,
    String,
    SingleLine,
    MultiLine,
}

#[derive(Clone, Copy, Debug)]
struct PendingComment {
    line: usize,
    column: usize,
    offset: usize,
}

/// Lexes `text` into the doc-comment blocks recognized by `markers`.
///
/// `markers` must be ordered longest first so that a longer marker is never
/// shadowed by one of its own prefixes. String literals are tracked naively:
/// an escaped quote inside a literal desynchronizes the state tracking, a
/// known limitation carried by the scanner.
pub fn scan_doccomments(path: &Path, text: &str, markers: &[String]) -> Vec<DoccommentBlock> {
    let mut result = Vec::new();

    if text.len() < 2 {
        return result;
    }

    let chars: Vec<(usize, char)> = text.char_indices().collect();

    let mut state = ScanState::Normal;
    let mut line = 1usize;
    let mut column = 0usize;
    let mut pending = PendingComment {
        line: 1,
        column: 1,
        offset: 0,
    };

    let close = |pending: PendingComment, end_offset: usize, result: &mut Vec<_>| {
        let span = &text[pending.offset..end_offset];
        for marker in markers {
            if let Some(contents) = span.strip_prefix(marker.as_str()) {
                result.push(DoccommentBlock::new(
                    path,
                    pending.line,
                    pending.column + marker.chars().count(),
                    contents,
                ));
                break;
            }
        }
    };

    for index in 0..chars.len() {
        let (offset, ch) = chars[index];

        if ch == '\n' {
            column = 0;
            line += 1;
        } else {
            column += 1;
        }

        match state {
            ScanState::Normal => {
                if ch == '"' {
                    state = ScanState::String;
                    continue;
                }
                if ch != '/' {
                    continue;
                }

                match chars.get(index + 1).map(|&(_, next)| next) {
                    Some('/') => {
                        state = ScanState::SingleLine;
                        pending = PendingComment {
                            line,
                            column,
                            offset,
                        };
                    }
                    Some('*') => {
                        state = ScanState::MultiLine;
                        pending = PendingComment {
                            line,
                            column,
                            offset,
                        };
                    }
                    _ => {}
                }
            }
            ScanState::String => {
                if ch == '"' {
                    state = ScanState::Normal;
                }
            }
            ScanState::SingleLine => {
                // The newline itself is not part of the comment.
                if ch == '\n' {
                    close(pending, offset, &mut result);
                    state = ScanState::Normal;
                }
            }
            ScanState::MultiLine => {
                let next_is_slash = chars.get(index + 1).map(|&(_, next)| next) == Some('/');
                if ch == '*' && next_is_slash {
                    close(pending, offset, &mut result);
                    state = ScanState::Normal;
                }
            }
        }
    }

    // A comment still open at end of input closes with the trailing text.
    if state == ScanState::SingleLine || state == ScanState::MultiLine {
        close(pending, text.len(), &mut result);
    }

    result
}

/// Scans files for doc comments, memoizing per path.
///
/// The caches are keyed by file path and populated lazily on first access;
/// the maps are shard-locked so concurrent passes still read and scan each
/// file at most once.
pub struct DoccommentScanner {
    reader: Box<dyn SourceReader>,
    markers: Vec<String>,
    line_cache: DashMap<PathBuf, Option<Arc<Vec<String>>>>,
    comment_cache: DashMap<PathBuf, Option<Arc<Vec<DoccommentBlock>>>>,
}

impl DoccommentScanner {
    /// Create a scanner with an explicit marker list.
    ///
    /// Markers are re-sorted longest first so a marker is never shadowed by
    /// a shorter marker it starts with.
    pub fn new(reader: Box<dyn SourceReader>, markers: Vec<String>) -> Self {
        let mut markers = markers;
        markers.sort_by_key(|marker| std::cmp::Reverse(marker.len()));

        Self {
            reader,
            markers,
            line_cache: DashMap::new(),
            comment_cache: DashMap::new(),
        }
    }

    /// Create a scanner recognizing the [`DEFAULT_MARKERS`].
    pub fn with_default_markers(reader: Box<dyn SourceReader>) -> Self {
        Self::new(
            reader,
            DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect(),
        )
    }

    /// The marker list in effect, longest first.
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// The raw lines of the file at `path`, or `None` when unreadable.
    pub fn file_lines(&self, path: &Path) -> Option<Arc<Vec<String>>> {
        self.line_cache
            .entry(path.to_path_buf())
            .or_insert_with(|| {
                self.reader
                    .read(path)
                    .map(|text| Arc::new(text.split('\n').map(str::to_string).collect()))
            })
            .clone()
    }

    /// The doc-comment blocks of the file at `path`, or `None` when
    /// unreadable. The file is scanned at most once.
    pub fn doccomments_for(&self, path: &Path) -> Option<Arc<Vec<DoccommentBlock>>> {
        self.comment_cache
            .entry(path.to_path_buf())
            .or_insert_with(|| {
                debug!(path = %path.display(), "scanning for doc comments");
                self.reader
                    .read(path)
                    .map(|text| Arc::new(scan_doccomments(path, &text, &self.markers)))
            })
            .clone()
    }

    /// The block covering `line` of `path`, if any.
    pub fn doccomment_for_line(&self, path: &Path, line: usize) -> Option<DoccommentBlock> {
        let comments = self.doccomments_for(path)?;
        comments
            .iter()
            .find(|comment| comment.contains_line(line))
            .cloned()
    }
}

impl std::fmt::Debug for DoccommentScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DoccommentScanner")
            .field("markers", &self.markers)
            .field("cached_files", &self.comment_cache.len())
            .finish()
    }
}

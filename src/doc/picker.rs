//! Picking markdown-style list entries out of a doc-comment block.
//!
//! Foreign headers often document a type's values as one bullet list on the
//! parent declaration ("- NAME: description"). The picker pulls individual
//! entries out of such a block so they can be re-attached to the generated
//! member they describe, and hands back the remainder comment with the
//! consumed entries removed.

use once_cell::sync::Lazy;
use regex::Regex;

use super::block::DoccommentBlock;

// Title-and-colon form first, bare title as the fallback.
static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)-\s*([^:]+):\s*").expect("list item pattern"));
static LIST_ITEM_NO_COLON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)-\s*(\S+)\s*").expect("bare list item pattern"));

#[derive(Clone, Debug)]
struct ListEntry {
    title: String,
    contents: String,
    start: usize,
    end: usize,
    picked: bool,
}

/// Extracts markdown-style bullet entries from one doc-comment block.
///
/// Entries are discovered up front in document order; [`pick`] consumes
/// them by exact title, and [`remainder`] produces the original comment
/// with every consumed entry deleted.
///
/// [`pick`]: ListPicker::pick
/// [`remainder`]: ListPicker::remainder
#[derive(Clone, Debug)]
pub struct ListPicker {
    original: DoccommentBlock,
    items: Vec<ListEntry>,
}

impl ListPicker {
    /// Discovers the list entries of `comment`.
    pub fn new(comment: &DoccommentBlock) -> Self {
        let items = comment
            .line_break_offsets()
            .into_iter()
            .filter_map(|offset| entry_at(comment.text(), offset))
            .collect();

        Self {
            original: comment.clone(),
            items,
        }
    }

    /// Picks the first not-yet-consumed entry titled exactly `title`.
    ///
    /// The returned block is indentation-normalized (past its opening line)
    /// and anchored at the entry's line. Picking the same title again, or
    /// an unknown title, returns `None` and leaves the other entries
    /// intact.
    pub fn pick(&mut self, title: &str) -> Option<DoccommentBlock> {
        let item = self
            .items
            .iter_mut()
            .find(|item| !item.picked && item.title == title)?;

        item.picked = true;

        let line = self.original.line() + self.original.line_index_at(item.start) - 1;
        let block = DoccommentBlock::new(
            self.original.file(),
            line,
            self.original.column(),
            item.contents.clone(),
        );

        Some(block.normalize_indentation(1))
    }

    /// The original comment with every picked entry's full span deleted,
    /// marker through captured body.
    pub fn remainder(&self) -> DoccommentBlock {
        let mut contents = self.original.text().to_string();

        // Deleting back to front keeps earlier spans valid.
        for item in self.items.iter().rev() {
            if !item.picked {
                continue;
            }

            let head = &contents[..item.start];
            let tail = contents.get(item.end + 1..).unwrap_or("");
            contents = format!("{head}{tail}");
        }

        self.original.with_text(contents)
    }
}

/// Parses a list entry opening at byte `offset` of `text`, if any.
fn entry_at(text: &str, offset: usize) -> Option<ListEntry> {
    let line_end = text[offset..]
        .find('\n')
        .map_or(text.len(), |position| offset + position);
    let line = &text[offset..line_end];

    let captures = LIST_ITEM
        .captures(line)
        .or_else(|| LIST_ITEM_NO_COLON.captures(line))?;

    let whole = captures.get(0)?;
    let indent_level = captures.get(1).map_or(0, |group| group.as_str().len());
    let title = captures.get(2)?.as_str().to_string();

    let content_start = offset + whole.end();
    let span = entry_span(text, content_start, indent_level);

    Some(ListEntry {
        title,
        contents: text[content_start..content_start + span].to_string(),
        start: offset,
        end: content_start + span,
        picked: false,
    })
}

/// Length of an entry body that opens at `start`.
///
/// The body runs past its opening line while following lines are blank
/// (collected tentatively) or indented strictly deeper than the bullet; it
/// ends at the first non-blank line at or below the bullet's indentation,
/// or at the end of the text.
fn entry_span(text: &str, start: usize, indent_level: usize) -> usize {
    let bytes = text.as_bytes();

    let indent_at = |mut index: usize| -> usize {
        let mut level = 0;
        while index < bytes.len() {
            if bytes[index] == b' ' {
                level += 1;
                index += 1;
            } else {
                break;
            }
        }
        level
    };

    let mut end = start;
    while end < bytes.len() {
        if bytes[end] != b'\n' {
            end += 1;
            continue;
        }

        if end < bytes.len() - 1 {
            // Keep collecting blank lines as if they were indented equally.
            if bytes[end + 1] == b'\n' {
                end += 1;
                continue;
            }

            let level = indent_at(end + 1);
            if level <= indent_level {
                break;
            }

            end += level;
            if end == bytes.len() {
                break;
            }
            if bytes[end] != b' ' {
                break;
            }
        }

        end += 1;
    }

    end - start
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker(text: &str) -> ListPicker {
        ListPicker::new(&DoccommentBlock::from_text(text))
    }

    const BASIC: &str = "A list\n\n- Element: A description\n- Other Element: Another Description";

    #[test]
    fn test_pick() {
        let mut picker = picker(BASIC);
        let element = picker.pick("Element").unwrap();
        assert_eq!(element.text(), "A description");
        assert_eq!(element.line(), 3);
    }

    #[test]
    fn test_pick_title_without_colon() {
        let mut picker =
            picker("A list\n\n- Element A description\n- Other Element: Another Description");
        let element = picker.pick("Element").unwrap();
        assert_eq!(element.text(), "A description");
    }

    #[test]
    fn test_pick_unknown_title() {
        let mut picker = picker(BASIC);
        assert!(picker.pick("Nonexisting").is_none());
        // The known entries are still pickable afterwards.
        assert!(picker.pick("Element").is_some());
    }

    #[test]
    fn test_repick_returns_nothing() {
        let mut picker = picker(BASIC);
        assert!(picker.pick("Element").is_some());
        assert!(picker.pick("Element").is_none());
    }

    #[test]
    fn test_remainder_after_picking_all() {
        let mut picker = picker(BASIC);
        assert!(picker.pick("Element").is_some());
        assert!(picker.pick("Other Element").is_some());
        assert_eq!(picker.remainder().text(), "A list\n\n");
    }

    #[test]
    fn test_remainder_after_picking_in_reverse_order() {
        let mut picker = picker(BASIC);
        assert!(picker.pick("Other Element").is_some());
        assert!(picker.pick("Element").is_some());
        assert_eq!(picker.remainder().text(), "A list\n\n");
    }

    #[test]
    fn test_remainder_keeps_unpicked_entries() {
        let mut picker = picker(BASIC);
        assert!(picker.pick("Element").is_some());
        assert_eq!(
            picker.remainder().text(),
            "A list\n\n- Other Element: Another Description"
        );
    }

    #[test]
    fn test_multi_line_entry() {
        let mut picker = picker(
            "A list\n\n- Element: A description\n   Continuation of previous description\n- Other Element: Another Description",
        );
        assert_eq!(
            picker.pick("Element").unwrap().text(),
            "A description\nContinuation of previous description"
        );
    }

    #[test]
    fn test_multi_line_entry_with_blank_break() {
        let mut picker = picker(
            "A list\n\n- Element: A description\n   Continuation of previous description\n\n   Another continuation line with space in between.\n      This line is nested further\n- Other Element: Another Description",
        );
        assert_eq!(
            picker.pick("Element").unwrap().text(),
            "A description\n\
             Continuation of previous description\n\
             \n\
             Another continuation line with space in between.\n\
             \x20\x20\x20This line is nested further"
        );
    }

    #[test]
    fn test_multi_line_entry_followed_by_separated_entry() {
        let mut picker = picker(
            "A list\n\n- Element: A description\n   Continuation line\n\n- Other Element: Another Description",
        );
        assert!(picker.pick("Element").is_some());
        assert_eq!(
            picker.remainder().text(),
            "A list\n\n- Other Element: Another Description"
        );
    }

    #[test]
    fn test_nested_entry_belongs_to_parent() {
        let mut picker = picker("A list\n\n- Element: A description\n   - Sub Element: Another Description");
        assert_eq!(
            picker.pick("Element").unwrap().text(),
            "A description\n- Sub Element: Another Description"
        );
    }

    #[test]
    fn test_indented_items() {
        let mut picker = picker(
            "A list\n \n - Element: A description\n    Continuation line\n \n - Other Element: Another Description",
        );
        assert_eq!(
            picker.pick("Element").unwrap().text(),
            "A description\nContinuation line"
        );
        assert_eq!(
            picker.remainder().text(),
            "A list\n \n \n - Other Element: Another Description"
        );
    }
}

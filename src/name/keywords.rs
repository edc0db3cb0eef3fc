//! Escaping of generated names that collide with target-language keywords.

use std::borrow::Cow;

/// Reserved words in the binding target language that generated code must
/// not use bare.
pub const RESERVED_WORDS: &[&str] = &[
    "actor",
    "as",
    "case",
    "class",
    "default",
    "do",
    "else",
    "extension",
    "for",
    "if",
    "in",
    "is",
    "let",
    "repeat",
    "set",
    "struct",
    "var",
    "while",
];

/// Wraps `term` in backticks when it is a reserved word, so emitters can
/// splice it into generated source unconditionally.
pub fn escape_keyword(term: &str) -> Cow<'_, str> {
    if RESERVED_WORDS.contains(&term) {
        Cow::Owned(format!("`{term}`"))
    } else {
        Cow::Borrowed(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_keyword() {
        assert_eq!(escape_keyword("repeat"), "`repeat`");
        assert_eq!(escape_keyword("version"), "version");
    }
}

//! Post-merge formatting of attached doc comments.
//!
//! Runs after the tree is merged and indexed: comments get their
//! indentation normalized and blank edges trimmed, and formatters that know
//! about the symbol lookup can rewrite embedded foreign symbol references
//! into their generated names.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::decl::lookup::SymbolLookup;
use crate::decl::tree::{ContainerDecl, Declaration, MemberDecl};
use crate::decl::visitor::{walk_declarations, DeclVisitor, VisitResult};

use super::block::DoccommentBlock;

/// Rewrites one attached doc comment.
pub trait DoccommentFormatter {
    /// Produces the formatted counterpart of `comment`.
    fn format(&self, comment: &DoccommentBlock, lookup: &SymbolLookup) -> DoccommentBlock;
}

/// Normalizes indentation and trims blank leading/trailing lines.
pub fn tidy(comment: &DoccommentBlock) -> DoccommentBlock {
    let normalized = comment.normalize_indentation(0);
    let lines = normalized.lines();

    let first = lines.iter().position(|line| !line.trim().is_empty());
    let last = lines.iter().rposition(|line| !line.trim().is_empty());

    match (first, last) {
        (Some(first), Some(last)) => normalized.with_lines(&lines[first..=last]),
        _ => normalized,
    }
}

/// The baseline [`DoccommentFormatter`]: tidy only, no rewriting.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultDoccommentFormatter;

impl DoccommentFormatter for DefaultDoccommentFormatter {
    fn format(&self, comment: &DoccommentBlock, _lookup: &SymbolLookup) -> DoccommentBlock {
        tidy(comment)
    }
}

static SYMBOL_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([A-Za-z_][A-Za-z0-9_]*)`").expect("symbol reference pattern"));

/// A [`DoccommentFormatter`] that also rewrites backtick-quoted foreign
/// symbol references into their generated names.
///
/// References the lookup does not know stay exactly as written.
#[derive(Clone, Copy, Debug, Default)]
pub struct SymbolRewriter;

impl DoccommentFormatter for SymbolRewriter {
    fn format(&self, comment: &DoccommentBlock, lookup: &SymbolLookup) -> DoccommentBlock {
        tidy(comment).sub(&SYMBOL_REF, |captures| {
            match lookup.lookup(&captures[1]) {
                Some(generated) => format!("`{generated}`"),
                None => captures[0].to_string(),
            }
        })
    }
}

/// Returns a copy of `decls` with every attached comment formatted.
///
/// The pass works on private clones; the input trees are never modified.
pub fn format_doccomments(
    decls: &[Declaration],
    formatter: &dyn DoccommentFormatter,
    lookup: &SymbolLookup,
) -> Vec<Declaration> {
    let mut visitor = FormatVisitor { formatter, lookup };

    let mut copies = decls.to_vec();
    walk_declarations(&mut visitor, &mut copies);
    copies
}

struct FormatVisitor<'a> {
    formatter: &'a dyn DoccommentFormatter,
    lookup: &'a SymbolLookup,
}

impl FormatVisitor<'_> {
    fn reformat(&self, comment: &mut Option<DoccommentBlock>) {
        if let Some(current) = comment.take() {
            *comment = Some(self.formatter.format(&current, self.lookup));
        }
    }
}

impl DeclVisitor for FormatVisitor<'_> {
    fn visit_container(&mut self, decl: &mut ContainerDecl) -> VisitResult {
        self.reformat(&mut decl.doccomment);
        VisitResult::Descend
    }

    fn visit_variable(&mut self, decl: &mut MemberDecl) -> VisitResult {
        self.reformat(&mut decl.doccomment);
        VisitResult::Descend
    }

    fn visit_function(&mut self, decl: &mut MemberDecl) -> VisitResult {
        self.reformat(&mut decl.doccomment);
        VisitResult::Descend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::compound::CompoundName;

    fn lookup() -> SymbolLookup {
        let mut container = ContainerDecl::new(CompoundName::from_parts(["DredVersion"]));
        container.original_name = Some(CompoundName::from_snake_case("D3D12_DRED_VERSION"));
        SymbolLookup::build(&[Declaration::Container(container)])
    }

    #[test]
    fn test_tidy_trims_blank_edges() {
        let comment = DoccommentBlock::from_text("\n  first\n  second\n\n");
        assert_eq!(tidy(&comment).text(), "first\nsecond");
    }

    #[test]
    fn test_tidy_keeps_all_blank_comment() {
        let comment = DoccommentBlock::from_text("\n \n");
        assert_eq!(tidy(&comment).text(), "\n \n");
    }

    #[test]
    fn test_symbol_rewriter_rewrites_known_references() {
        let comment = DoccommentBlock::from_text("See `D3D12_DRED_VERSION` for details.");
        let formatted = SymbolRewriter.format(&comment, &lookup());
        assert_eq!(formatted.text(), "See `DredVersion` for details.");
    }

    #[test]
    fn test_symbol_rewriter_leaves_unknown_references() {
        let comment = DoccommentBlock::from_text("See `D3D12_UNKNOWN` for details.");
        let formatted = SymbolRewriter.format(&comment, &lookup());
        assert_eq!(formatted.text(), "See `D3D12_UNKNOWN` for details.");
    }

    #[test]
    fn test_format_pass_is_pure() {
        let mut container = ContainerDecl::new(CompoundName::from_parts(["Sample"]));
        container.doccomment = Some(DoccommentBlock::from_text("\n  docs\n"));
        let input = vec![Declaration::Container(container)];

        let formatted = format_doccomments(&input, &DefaultDoccommentFormatter, &lookup());

        assert_eq!(input[0].doccomment().unwrap().text(), "\n  docs\n");
        assert_eq!(formatted[0].doccomment().unwrap().text(), "docs");
    }
}

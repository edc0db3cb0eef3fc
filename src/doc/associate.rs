//! Attaching scanned doc comments to declarations by line adjacency.
//!
//! A declaration's comment is either inline (a block whose span covers the
//! declaration's own line) or the run of comment blocks on the consecutive
//! lines immediately above it. The upward walk stops at the first line
//! without a comment, or right after consuming a multi-line block — those
//! are self-contained and are not combined with anything above them.

use tracing::debug;

use crate::decl::node::SourceLocation;
use crate::decl::tree::{ContainerDecl, Declaration, MemberDecl};
use crate::decl::visitor::{walk_declarations, DeclVisitor, VisitResult};

use super::block::DoccommentBlock;
use super::scanner::DoccommentScanner;

/// Associates scanned doc comments with declarations.
#[derive(Debug)]
pub struct DoccommentAssociator<'s> {
    scanner: &'s DoccommentScanner,
}

impl<'s> DoccommentAssociator<'s> {
    /// Create an associator over the given scanner.
    pub fn new(scanner: &'s DoccommentScanner) -> Self {
        Self { scanner }
    }

    /// Finds the comment for a declaration.
    ///
    /// Association needs a real foreign declaration behind the node, so
    /// declarations without an original node or source location get
    /// nothing.
    pub fn find_doccomment(&self, decl: &Declaration) -> Option<DoccommentBlock> {
        decl.original_node()?;
        self.find_for_location(decl.origin()?)
    }

    /// Finds the comment for a known source position.
    pub fn find_for_location(&self, origin: &SourceLocation) -> Option<DoccommentBlock> {
        let comments = self.scanner.doccomments_for(&origin.file)?;

        // An inline comment on the declaration's own line wins outright.
        if let Some(inline) = comments
            .iter()
            .find(|comment| comment.contains_line(origin.line))
        {
            return Some(inline.normalize_indentation(0));
        }

        // Collect blocks upward from the line above, one block per
        // consecutive commented line.
        let mut collected: Vec<DoccommentBlock> = Vec::new();
        for line in (1..origin.line).rev() {
            let Some(block) = comments.iter().find(|comment| comment.contains_line(line))
            else {
                break;
            };

            collected.push(block.clone());

            if block.is_multi_line() {
                break;
            }
        }

        let merged = DoccommentBlock::merge_all(collected.into_iter().rev())?;
        Some(merged.normalize_indentation(0))
    }

    /// Returns a copy of `decls` with comments attached where found.
    ///
    /// The pass works on private clones: the input trees are never
    /// modified, and declarations that already carry a comment keep it
    /// unless a better one is found.
    pub fn populate(&self, decls: &[Declaration]) -> Vec<Declaration> {
        let mut visitor = AssociateVisitor { associator: self };

        let mut copies = decls.to_vec();
        walk_declarations(&mut visitor, &mut copies);
        copies
    }
}

struct AssociateVisitor<'a, 's> {
    associator: &'a DoccommentAssociator<'s>,
}

impl AssociateVisitor<'_, '_> {
    fn lookup(
        &self,
        has_node: bool,
        origin: Option<&SourceLocation>,
    ) -> Option<DoccommentBlock> {
        if !has_node {
            return None;
        }
        let origin = origin?;
        let comment = self.associator.find_for_location(origin)?;
        debug!(
            file = %origin.file.display(),
            line = origin.line,
            "attached doc comment"
        );
        Some(comment)
    }
}

impl DeclVisitor for AssociateVisitor<'_, '_> {
    fn visit_container(&mut self, decl: &mut ContainerDecl) -> VisitResult {
        if let Some(comment) = self.lookup(decl.original_node.is_some(), decl.origin.as_ref()) {
            decl.doccomment = Some(comment);
        }
        VisitResult::Descend
    }

    fn visit_variable(&mut self, decl: &mut MemberDecl) -> VisitResult {
        if let Some(comment) = self.lookup(decl.original_node.is_some(), decl.origin.as_ref()) {
            decl.doccomment = Some(comment);
        }
        VisitResult::Descend
    }

    fn visit_function(&mut self, decl: &mut MemberDecl) -> VisitResult {
        if let Some(comment) = self.lookup(decl.original_node.is_some(), decl.origin.as_ref()) {
            decl.doccomment = Some(comment);
        }
        VisitResult::Descend
    }
}

//! Pre/post-order traversal of declaration trees with pluggable visitors.
//!
//! Dispatch is a compile-time-checked exhaustive match over the closed
//! declaration variants; visitors override the per-variant hooks they care
//! about and inherit no-op defaults for the rest.

use super::tree::{ContainerDecl, Declaration, MemberDecl, MemberKind};

/// What a visitor wants done with a declaration's children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisitResult {
    /// Visit the children of the declaration.
    #[default]
    Descend,
    /// Skip the children of the declaration.
    SkipChildren,
}

/// A visitor over declaration trees.
///
/// Each variant has a pre-visit hook returning a [`VisitResult`] and a
/// post-visit hook invoked after the children (container members only —
/// members are leaves). All hooks default to descending no-ops.
pub trait DeclVisitor {
    /// Pre-visit of a container declaration.
    fn visit_container(&mut self, _decl: &mut ContainerDecl) -> VisitResult {
        VisitResult::Descend
    }

    /// Pre-visit of a variable member.
    fn visit_variable(&mut self, _decl: &mut MemberDecl) -> VisitResult {
        VisitResult::Descend
    }

    /// Pre-visit of a function member.
    fn visit_function(&mut self, _decl: &mut MemberDecl) -> VisitResult {
        VisitResult::Descend
    }

    /// Post-visit of a container declaration.
    fn post_container(&mut self, _decl: &mut ContainerDecl) {}

    /// Post-visit of a variable member.
    fn post_variable(&mut self, _decl: &mut MemberDecl) {}

    /// Post-visit of a function member.
    fn post_function(&mut self, _decl: &mut MemberDecl) {}
}

/// Walks a declaration: pre-visit, children, post-visit.
///
/// The post-visit hook runs whether or not children were skipped.
pub fn walk_declaration<V: DeclVisitor + ?Sized>(visitor: &mut V, decl: &mut Declaration) {
    match decl {
        Declaration::Container(container) => {
            if visitor.visit_container(container) == VisitResult::Descend {
                for member in &mut container.members {
                    walk_member(visitor, member);
                }
            }
            visitor.post_container(container);
        }
        Declaration::Member(member) => walk_member(visitor, member),
    }
}

/// Walks a single member declaration (a leaf).
pub fn walk_member<V: DeclVisitor + ?Sized>(visitor: &mut V, member: &mut MemberDecl) {
    match member.kind {
        MemberKind::Variable { .. } => {
            visitor.visit_variable(member);
            visitor.post_variable(member);
        }
        MemberKind::Function { .. } => {
            visitor.visit_function(member);
            visitor.post_function(member);
        }
    }
}

/// Walks every declaration of a list in order.
pub fn walk_declarations<V: DeclVisitor + ?Sized>(visitor: &mut V, decls: &mut [Declaration]) {
    for decl in decls {
        walk_declaration(visitor, decl);
    }
}

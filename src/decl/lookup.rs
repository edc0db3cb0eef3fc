//! Reverse index from foreign identifiers to generated names.
//!
//! One traversal of the final merged tree records, for every declaration
//! that mirrors a foreign symbol, the dot-joined chain of generated names
//! from its outermost container down to itself. Comment formatters use the
//! index to rewrite foreign symbol references embedded in documentation
//! text into their generated counterparts.

use std::collections::HashMap;

use super::tree::{ContainerDecl, Declaration, MemberDecl};
use crate::name::compound::CompoundName;

/// Case-insensitive lookup from original foreign identifiers to
/// fully-qualified generated identifiers.
#[derive(Clone, Debug, Default)]
pub struct SymbolLookup {
    entries: HashMap<String, String>,
}

impl SymbolLookup {
    /// Builds the index in one traversal of `decls`.
    pub fn build(decls: &[Declaration]) -> Self {
        let mut lookup = Self::default();
        let mut ancestors: Vec<String> = Vec::new();

        for decl in decls {
            lookup.index_declaration(decl, &mut ancestors);
        }

        lookup
    }

    /// Resolves a foreign identifier to its generated qualified name.
    ///
    /// A miss means the symbol is unknown to the generated tree; callers
    /// must leave the referencing text unmodified rather than treat the
    /// miss as an error.
    pub fn lookup(&self, original: &str) -> Option<&str> {
        self.entries.get(&original.to_lowercase()).map(String::as_str)
    }

    /// Number of indexed symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no symbols are indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn index_declaration(&mut self, decl: &Declaration, ancestors: &mut Vec<String>) {
        match decl {
            Declaration::Container(container) => self.index_container(container, ancestors),
            Declaration::Member(member) => self.index_member(member, ancestors),
        }
    }

    fn index_container(&mut self, container: &ContainerDecl, ancestors: &mut Vec<String>) {
        self.record(container.original_name.as_ref(), &container.name, ancestors);

        ancestors.push(container.name.render());
        for member in &container.members {
            self.index_member(member, ancestors);
        }
        ancestors.pop();
    }

    fn index_member(&mut self, member: &MemberDecl, ancestors: &[String]) {
        self.record(member.original_name.as_ref(), &member.name, ancestors);
    }

    fn record(
        &mut self,
        original: Option<&CompoundName>,
        generated: &CompoundName,
        ancestors: &[String],
    ) {
        let Some(original) = original else {
            return;
        };

        let mut qualified = ancestors.join(".");
        if !qualified.is_empty() {
            qualified.push('.');
        }
        qualified.push_str(&generated.render());

        self.entries
            .insert(original.render().to_lowercase(), qualified);
    }
}

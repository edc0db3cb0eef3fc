//! The generated declaration tree.
//!
//! Declarations form a closed tagged-variant tree: containers (the
//! extension/type declarations a target file is built from) own an ordered
//! list of members, and members — variables and functions — are leaves.
//! The external generator creates one declaration per discovered foreign
//! declaration; the association pass attaches doc comments; the merger
//! collapses same-named declarations; after merging and indexing the tree
//! is treated as immutable.
//!
//! Cloning a declaration shares the immutable origin data (the source
//! location and the opaque foreign-node handle) while deep-copying owned
//! members, so passes that work on a private clone cannot perturb their
//! input tree.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::doc::block::DoccommentBlock;
use crate::name::compound::CompoundName;

use super::node::{ForeignNode, SourceLocation};

/// A function argument as `(label, name, type)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionArgument {
    /// Optional external argument label.
    pub label: Option<String>,
    /// Argument name.
    pub name: String,
    /// Argument type, already spelled in the target language.
    pub arg_type: String,
}

impl FunctionArgument {
    /// An unlabeled argument.
    pub fn new(name: impl Into<String>, arg_type: impl Into<String>) -> Self {
        Self {
            label: None,
            name: name.into(),
            arg_type: arg_type.into(),
        }
    }
}

/// What kind of member a [`MemberDecl`] is, with its kind-specific payload.
#[derive(Clone, Debug)]
pub enum MemberKind {
    /// A variable member.
    Variable {
        /// Declared type, when one is spelled out.
        var_type: Option<String>,
        /// Initial value expression, when present.
        initial_value: Option<String>,
    },
    /// A function member.
    Function {
        /// Ordered argument list.
        arguments: Vec<FunctionArgument>,
        /// Return type; `None` renders as an implicit void.
        return_type: Option<String>,
        /// Body lines to emit, possibly empty.
        body: Vec<String>,
    },
}

/// A member declaration: a variable or function owned by a container.
#[derive(Clone, Debug)]
pub struct MemberDecl {
    /// Generated name.
    pub name: CompoundName,
    /// Original foreign name, when the member mirrors a foreign symbol.
    pub original_name: Option<CompoundName>,
    /// Source position of the foreign declaration.
    pub origin: Option<SourceLocation>,
    /// Opaque handle onto the foreign node; `None` for synthesized members.
    pub original_node: Option<Arc<dyn ForeignNode>>,
    /// Documentation attached to this member.
    pub doccomment: Option<DoccommentBlock>,
    /// Whether this is a static member.
    pub is_static: bool,
    /// Variable or function payload.
    pub kind: MemberKind,
}

impl MemberDecl {
    /// Create a bare variable member.
    pub fn variable(name: CompoundName) -> Self {
        Self {
            name,
            original_name: None,
            origin: None,
            original_node: None,
            doccomment: None,
            is_static: false,
            kind: MemberKind::Variable {
                var_type: None,
                initial_value: None,
            },
        }
    }

    /// Create a bare function member.
    pub fn function(name: CompoundName) -> Self {
        Self {
            name,
            original_name: None,
            origin: None,
            original_node: None,
            doccomment: None,
            is_static: false,
            kind: MemberKind::Function {
                arguments: Vec::new(),
                return_type: None,
                body: Vec::new(),
            },
        }
    }

    /// Short kind label used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            MemberKind::Variable { .. } => "variable",
            MemberKind::Function { .. } => "function",
        }
    }
}

/// A container declaration: owns members and conformances.
#[derive(Clone, Debug, Default)]
pub struct ContainerDecl {
    /// Generated name.
    pub name: CompoundName,
    /// Original foreign name, when the container mirrors a foreign type.
    pub original_name: Option<CompoundName>,
    /// Source position of the foreign declaration.
    pub origin: Option<SourceLocation>,
    /// Opaque handle onto the foreign node; `None` for synthesized types.
    pub original_node: Option<Arc<dyn ForeignNode>>,
    /// Documentation attached to this container.
    pub doccomment: Option<DoccommentBlock>,
    /// Ordered member list.
    pub members: Vec<MemberDecl>,
    /// Names of capabilities the declaration is declared to satisfy.
    pub conformances: BTreeSet<String>,
}

impl ContainerDecl {
    /// Create an empty container with the given generated name.
    pub fn new(name: CompoundName) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Returns `true` when the container declares nothing: no members and
    /// no conformances.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty() && self.conformances.is_empty()
    }
}

/// A node of the generated declaration tree.
#[derive(Clone, Debug)]
pub enum Declaration {
    /// A container declaration.
    Container(ContainerDecl),
    /// A free-standing member declaration.
    Member(MemberDecl),
}

impl Declaration {
    /// Generated name of the declaration.
    pub fn name(&self) -> &CompoundName {
        match self {
            Declaration::Container(container) => &container.name,
            Declaration::Member(member) => &member.name,
        }
    }

    /// Original foreign name, when present.
    pub fn original_name(&self) -> Option<&CompoundName> {
        match self {
            Declaration::Container(container) => container.original_name.as_ref(),
            Declaration::Member(member) => member.original_name.as_ref(),
        }
    }

    /// Source position of the foreign declaration, when present.
    pub fn origin(&self) -> Option<&SourceLocation> {
        match self {
            Declaration::Container(container) => container.origin.as_ref(),
            Declaration::Member(member) => member.origin.as_ref(),
        }
    }

    /// Opaque foreign node handle, when present.
    pub fn original_node(&self) -> Option<&Arc<dyn ForeignNode>> {
        match self {
            Declaration::Container(container) => container.original_node.as_ref(),
            Declaration::Member(member) => member.original_node.as_ref(),
        }
    }

    /// Documentation attached to the declaration.
    pub fn doccomment(&self) -> Option<&DoccommentBlock> {
        match self {
            Declaration::Container(container) => container.doccomment.as_ref(),
            Declaration::Member(member) => member.doccomment.as_ref(),
        }
    }

    /// Replaces the attached documentation.
    pub fn set_doccomment(&mut self, doccomment: Option<DoccommentBlock>) {
        match self {
            Declaration::Container(container) => container.doccomment = doccomment,
            Declaration::Member(member) => member.doccomment = doccomment,
        }
    }

    /// Short kind label used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Declaration::Container(_) => "container",
            Declaration::Member(member) => member.kind_name(),
        }
    }
}

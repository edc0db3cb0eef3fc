//! Opaque handles onto the foreign declarations behind generated ones.
//!
//! The external parser that discovers declarations in the header owns its
//! own AST. This crate never walks that AST; it only asks coarse questions
//! about the node a declaration came from, through the [`ForeignNode`]
//! capability trait.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A position in a source file.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    /// The file the position refers to.
    pub file: PathBuf,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, when known.
    pub column: Option<usize>,
}

impl SourceLocation {
    /// Create a location with a known column.
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column: Some(column),
        }
    }

    /// Create a location with no column information.
    pub fn line_only(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column: None,
        }
    }
}

/// Coarse shape of a foreign declaration node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForeignShape {
    /// A struct declaration.
    Struct,
    /// A union declaration.
    Union,
    /// An enum declaration.
    Enum,
    /// An array type.
    Array,
    /// Anything the generator has no further interest in.
    Opaque,
}

/// Capability view onto the external parser's node for a declaration.
///
/// Only the questions the pipeline actually asks are exposed, which keeps
/// the merger and its tie-breaking independent of any concrete AST type.
pub trait ForeignNode: std::fmt::Debug + Send + Sync {
    /// The coarse type shape of the node.
    fn shape(&self) -> ForeignShape;

    /// Whether the node carries a name of its own (anonymous structs and
    /// enums do not).
    fn has_name(&self) -> bool;

    /// Whether the node exposes a resolved field list. Forward declarations
    /// of a struct do not; its defining declaration does.
    fn has_resolved_fields(&self) -> bool {
        false
    }

    /// Whether the node is an array type with a constant dimension.
    fn has_constant_dimension(&self) -> bool {
        false
    }
}

/// A plain record implementation of [`ForeignNode`].
///
/// External generators that already know the answers can hand these to the
/// tree instead of implementing the trait on their own AST nodes.
#[derive(Clone, Copy, Debug, Default)]
pub struct ForeignNodeInfo {
    /// Coarse shape of the node.
    pub shape: Option<ForeignShape>,
    /// Whether the node is named.
    pub named: bool,
    /// Whether the node has a resolved field list.
    pub resolved_fields: bool,
    /// Whether the node has a constant array dimension.
    pub constant_dimension: bool,
}

impl ForeignNodeInfo {
    /// A named node of the given shape with no further capabilities.
    pub fn named(shape: ForeignShape) -> Self {
        Self {
            shape: Some(shape),
            named: true,
            resolved_fields: false,
            constant_dimension: false,
        }
    }

    /// Marks the node as exposing a resolved field list.
    pub fn with_resolved_fields(mut self) -> Self {
        self.resolved_fields = true;
        self
    }
}

impl ForeignNode for ForeignNodeInfo {
    fn shape(&self) -> ForeignShape {
        self.shape.unwrap_or(ForeignShape::Opaque)
    }

    fn has_name(&self) -> bool {
        self.named
    }

    fn has_resolved_fields(&self) -> bool {
        self.resolved_fields
    }

    fn has_constant_dimension(&self) -> bool {
        self.constant_dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_info_capabilities() {
        let node = ForeignNodeInfo::named(ForeignShape::Struct).with_resolved_fields();
        assert_eq!(node.shape(), ForeignShape::Struct);
        assert!(node.has_name());
        assert!(node.has_resolved_fields());
        assert!(!node.has_constant_dimension());

        let anonymous = ForeignNodeInfo::default();
        assert_eq!(anonymous.shape(), ForeignShape::Opaque);
        assert!(!anonymous.has_name());
    }
}

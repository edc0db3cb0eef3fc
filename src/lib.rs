//! # Bindrune: Binding-Generator Naming & Documentation Core
//!
//! The naming-and-documentation heart of a C-header-to-target-language
//! binding generator. Given declarations discovered in a foreign header and
//! the header's raw source text, this library provides:
//!
//! - **Compound symbol names**: identifiers modeled as ordered word
//!   components with casing pins, rendered as snake_case, PascalCase, or
//!   camelCase
//! - **Name formatting**: configurable splitting and capitalization rules
//!   that turn raw foreign identifiers into idiomatic target names
//! - **Doc-comment recovery**: a scanner that lexes documentation comments
//!   out of raw source text and an associator that re-attaches them to
//!   generated declarations by line adjacency
//! - **Declaration merging**: partial declarations that resolve to the same
//!   generated name are unified into one declaration tree, with conflict
//!   detection
//! - **Symbol lookup**: a reverse index from foreign identifiers to
//!   fully-qualified generated names, used to rewrite symbol references
//!   embedded in comment text
//!
//! Parsing the foreign header, laying out output files, and rendering
//! source text are left to external collaborators: this crate consumes an
//! already-parsed declaration tree (via opaque [`decl::node::ForeignNode`]
//! handles) plus raw file text, and produces a merged tree and lookup table
//! ready for a downstream emitter.
//!
//! ## Quick Start
//!
//! ```rust
//! use bindrune::pipeline::Pipeline;
//! use bindrune::doc::scanner::{DoccommentScanner, MemoryReader};
//! use bindrune::decl::tree::{ContainerDecl, Declaration};
//! use bindrune::name::compound::CompoundName;
//!
//! let reader = MemoryReader::new();
//! let scanner = DoccommentScanner::with_default_markers(Box::new(reader));
//!
//! let container = ContainerDecl::new(
//!     CompoundName::from_snake_case("DRED_VERSION").pascal_cased(),
//! );
//!
//! let pipeline = Pipeline::new(scanner);
//! let processed = pipeline.run(vec![Declaration::Container(container)])?;
//! assert_eq!(processed.declarations.len(), 1);
//! # Ok::<(), bindrune::BindruneError>(())
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// Core error and configuration types
pub mod core {
    //! Errors and static configuration.

    pub mod config;
    pub mod errors;
}

// Compound symbol names and formatting rules
pub mod name {
    //! Compound symbol names and the split/capitalize/case pipeline.

    pub mod capitalize;
    pub mod compound;
    pub mod formatter;
    pub mod keywords;
}

// Documentation comment recovery and post-processing
pub mod doc {
    //! Doc-comment scanning, association, and post-processing.

    pub mod associate;
    pub mod block;
    pub mod format;
    pub mod picker;
    pub mod scanner;
}

// Generated declaration tree and the passes over it
pub mod decl {
    //! The generated declaration tree: visitors, merging, and lookup.

    pub mod lookup;
    pub mod merge;
    pub mod node;
    pub mod tree;
    pub mod visitor;
}

// Batch orchestration of the passes
pub mod pipeline;

// Re-export primary types for convenience
pub use crate::core::config::{BindruneConfig, NamingConfig, ScannerConfig};
pub use crate::core::errors::{BindruneError, Result};
pub use crate::decl::lookup::SymbolLookup;
pub use crate::decl::merge::DeclMerger;
pub use crate::decl::tree::Declaration;
pub use crate::doc::block::DoccommentBlock;
pub use crate::doc::scanner::DoccommentScanner;
pub use crate::name::compound::{CaseConvention, CompoundName, NameComponent};
pub use crate::name::formatter::{DefaultNameFormatter, NameFormatter};
pub use crate::pipeline::Pipeline;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

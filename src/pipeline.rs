//! Batch orchestration of the documentation and merge passes.
//!
//! The pipeline is a single-threaded, synchronous, in-memory batch: doc
//! comments are associated, same-named declarations merged, the symbol
//! lookup built, and — when a formatter is configured — attached comments
//! reformatted against that lookup. The one fatal condition (a merge
//! conflict) aborts the whole run; there is no partial output.

use tracing::info;

use crate::core::errors::Result;
use crate::decl::lookup::SymbolLookup;
use crate::decl::merge::DeclMerger;
use crate::decl::tree::Declaration;
use crate::doc::associate::DoccommentAssociator;
use crate::doc::format::{format_doccomments, DoccommentFormatter};
use crate::doc::scanner::DoccommentScanner;

/// The merged, indexed output of a pipeline run.
#[derive(Debug)]
pub struct ProcessedDeclarations {
    /// The merged declaration tree, ready for an emitter.
    pub declarations: Vec<Declaration>,
    /// Lookup from foreign identifiers to generated qualified names.
    pub lookup: SymbolLookup,
}

/// Runs the documentation and merge passes over generated declarations.
pub struct Pipeline {
    scanner: DoccommentScanner,
    formatter: Option<Box<dyn DoccommentFormatter>>,
}

impl Pipeline {
    /// Create a pipeline with no comment formatting pass.
    pub fn new(scanner: DoccommentScanner) -> Self {
        Self {
            scanner,
            formatter: None,
        }
    }

    /// Adds a comment formatting pass run after merging and indexing.
    pub fn with_doccomment_formatter(mut self, formatter: Box<dyn DoccommentFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// The scanner backing the association pass.
    pub fn scanner(&self) -> &DoccommentScanner {
        &self.scanner
    }

    /// Processes `decls`: associate comments, merge, index, format.
    pub fn run(&self, decls: Vec<Declaration>) -> Result<ProcessedDeclarations> {
        info!(count = decls.len(), "associating doc comments");
        let associator = DoccommentAssociator::new(&self.scanner);
        let populated = associator.populate(&decls);

        info!("merging declarations");
        let merged = DeclMerger::new().merge(populated)?;
        info!(count = merged.len(), "merged declarations");

        let lookup = SymbolLookup::build(&merged);

        let declarations = match &self.formatter {
            Some(formatter) => {
                info!("formatting doc comments");
                format_doccomments(&merged, formatter.as_ref(), &lookup)
            }
            None => merged,
        };

        Ok(ProcessedDeclarations {
            declarations,
            lookup,
        })
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("scanner", &self.scanner)
            .field("has_formatter", &self.formatter.is_some())
            .finish()
    }
}

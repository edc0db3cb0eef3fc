//! Unification of declarations that share a generated name.
//!
//! Several foreign declarations can resolve to the same generated name —
//! a struct and its typedef, or an enum discovered once per include site.
//! The merger collapses each such group into one declaration. Only
//! container/container pairs can be reconciled; any other pairing means the
//! generator or its configuration produced a genuine name collision, which
//! aborts the whole batch.

use indexmap::map::Entry;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;

use crate::core::errors::{BindruneError, Result};
use crate::doc::block::DoccommentBlock;

use super::node::{ForeignNode, ForeignShape};
use super::tree::{ContainerDecl, Declaration};

/// Merges declarations that share a generated name.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeclMerger;

impl DeclMerger {
    /// Create a merger.
    pub fn new() -> Self {
        Self
    }

    /// Collapses same-named declarations, preserving first-encounter order.
    ///
    /// Groups larger than two are folded pairwise in encounter order. The
    /// only fatal condition in the pipeline is raised here: a group that
    /// contains anything other than containers cannot be reconciled.
    pub fn merge(&self, decls: Vec<Declaration>) -> Result<Vec<Declaration>> {
        let mut by_name: IndexMap<String, Declaration> = IndexMap::new();

        for decl in decls {
            let generated = decl.name().render();

            match by_name.entry(generated) {
                Entry::Occupied(mut existing) => {
                    let merged = Self::try_merge(existing.get(), &decl)?;
                    existing.insert(merged);
                }
                Entry::Vacant(slot) => {
                    slot.insert(decl);
                }
            }
        }

        Ok(by_name.into_values().collect())
    }

    fn try_merge(first: &Declaration, second: &Declaration) -> Result<Declaration> {
        match (first, second) {
            (Declaration::Container(a), Declaration::Container(b)) => {
                debug!(name = %a.name.render(), "merging container declarations");
                Ok(Declaration::Container(Self::merge_containers(a, b)))
            }
            _ => Err(BindruneError::merge_conflict(
                first.name().render(),
                first.kind_name(),
                original_name_of(first),
                second.kind_name(),
                original_name_of(second),
            )),
        }
    }

    fn merge_containers(first: &ContainerDecl, second: &ContainerDecl) -> ContainerDecl {
        let mut members = first.members.clone();
        members.extend(second.members.iter().cloned());

        let mut conformances = first.conformances.clone();
        conformances.extend(second.conformances.iter().cloned());

        ContainerDecl {
            name: first.name.clone(),
            original_name: first.original_name.clone(),
            origin: first.origin.clone(),
            original_node: Self::choose_node(
                first.original_node.clone(),
                second.original_node.clone(),
            ),
            doccomment: DoccommentBlock::merge(
                first.doccomment.clone(),
                second.doccomment.clone(),
            ),
            members,
            conformances,
        }
    }

    /// Picks the representative foreign node of a merged pair.
    ///
    /// A present handle beats an absent one. When both sides are
    /// struct-like, the side that exposes a resolved field list wins, so a
    /// defining declaration is preferred over a forward declaration.
    fn choose_node(
        first: Option<Arc<dyn ForeignNode>>,
        second: Option<Arc<dyn ForeignNode>>,
    ) -> Option<Arc<dyn ForeignNode>> {
        match (first, second) {
            (None, second) => second,
            (first, None) => first,
            (Some(first), Some(second)) => {
                let struct_like = |shape: ForeignShape| {
                    matches!(shape, ForeignShape::Struct | ForeignShape::Union)
                };

                if struct_like(first.shape())
                    && struct_like(second.shape())
                    && !first.has_resolved_fields()
                    && second.has_resolved_fields()
                {
                    return Some(second);
                }

                Some(first)
            }
        }
    }
}

fn original_name_of(decl: &Declaration) -> String {
    decl.original_name()
        .map_or_else(|| "<none>".to_string(), |name| name.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::node::ForeignNodeInfo;
    use crate::decl::tree::MemberDecl;
    use crate::name::compound::CompoundName;

    fn container(name: &str, members: &[&str], conformances: &[&str]) -> ContainerDecl {
        let mut decl = ContainerDecl::new(CompoundName::from_parts([name]));
        decl.original_name = Some(CompoundName::from_parts([name.to_uppercase()]));
        for member in members {
            decl.members
                .push(MemberDecl::variable(CompoundName::from_parts([*member])));
        }
        for conformance in conformances {
            decl.conformances.insert(conformance.to_string());
        }
        decl
    }

    #[test]
    fn test_singletons_pass_through() {
        let merger = DeclMerger::new();
        let merged = merger
            .merge(vec![
                Declaration::Container(container("First", &[], &[])),
                Declaration::Container(container("Second", &[], &[])),
            ])
            .unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].name().render(), "First");
        assert_eq!(merged[1].name().render(), "Second");
    }

    #[test]
    fn test_merge_containers_concatenates_members() {
        let merger = DeclMerger::new();
        let merged = merger
            .merge(vec![
                Declaration::Container(container("Sample", &["a"], &["Equatable"])),
                Declaration::Container(container("Sample", &["b"], &["Hashable"])),
            ])
            .unwrap();

        assert_eq!(merged.len(), 1);
        let Declaration::Container(sample) = &merged[0] else {
            panic!("expected a container");
        };

        let member_names: Vec<String> = sample
            .members
            .iter()
            .map(|member| member.name.render())
            .collect();
        assert_eq!(member_names, vec!["a", "b"]);

        let conformances: Vec<&str> = sample.conformances.iter().map(String::as_str).collect();
        assert_eq!(conformances, vec!["Equatable", "Hashable"]);
    }

    #[test]
    fn test_merge_combines_doccomments() {
        let mut first = container("Sample", &[], &[]);
        first.doccomment = Some(DoccommentBlock::new("h", 10, 1, "first"));
        let mut second = container("Sample", &[], &[]);
        second.doccomment = Some(DoccommentBlock::new("h", 4, 1, "second"));

        let merger = DeclMerger::new();
        let merged = merger
            .merge(vec![
                Declaration::Container(first),
                Declaration::Container(second),
            ])
            .unwrap();

        let doc = merged[0].doccomment().unwrap();
        assert_eq!(doc.text(), "first\n\nsecond");
        assert_eq!(doc.line(), 4);
    }

    #[test]
    fn test_merge_prefers_node_with_resolved_fields() {
        let forward: Arc<dyn ForeignNode> =
            Arc::new(ForeignNodeInfo::named(ForeignShape::Struct));
        let defining: Arc<dyn ForeignNode> =
            Arc::new(ForeignNodeInfo::named(ForeignShape::Struct).with_resolved_fields());

        let mut first = container("Sample", &[], &[]);
        first.original_node = Some(Arc::clone(&forward));
        let mut second = container("Sample", &[], &[]);
        second.original_node = Some(Arc::clone(&defining));

        let merger = DeclMerger::new();
        let merged = merger
            .merge(vec![
                Declaration::Container(first),
                Declaration::Container(second),
            ])
            .unwrap();

        let node = merged[0].original_node().unwrap();
        assert!(Arc::ptr_eq(node, &defining));
    }

    #[test]
    fn test_merge_keeps_only_present_node() {
        let node: Arc<dyn ForeignNode> = Arc::new(ForeignNodeInfo::named(ForeignShape::Enum));

        let first = container("Sample", &[], &[]);
        let mut second = container("Sample", &[], &[]);
        second.original_node = Some(Arc::clone(&node));

        let merger = DeclMerger::new();
        let merged = merger
            .merge(vec![
                Declaration::Container(first),
                Declaration::Container(second),
            ])
            .unwrap();
        assert!(Arc::ptr_eq(merged[0].original_node().unwrap(), &node));
    }

    #[test]
    fn test_container_member_collision_is_fatal() {
        let mut member = MemberDecl::variable(CompoundName::from_parts(["Sample"]));
        member.original_name = Some(CompoundName::from_parts(["SAMPLE_VALUE"]));

        let merger = DeclMerger::new();
        let err = merger
            .merge(vec![
                Declaration::Container(container("Sample", &[], &[])),
                Declaration::Member(member),
            ])
            .unwrap_err();

        let BindruneError::MergeConflict {
            name,
            first_original,
            second_original,
            ..
        } = err
        else {
            panic!("expected a merge conflict");
        };
        assert_eq!(name, "Sample");
        assert_eq!(first_original, "SAMPLE");
        assert_eq!(second_original, "SAMPLE_VALUE");
    }

    #[test]
    fn test_member_member_collision_is_fatal() {
        let merger = DeclMerger::new();
        let err = merger
            .merge(vec![
                Declaration::Member(MemberDecl::variable(CompoundName::from_parts(["x"]))),
                Declaration::Member(MemberDecl::function(CompoundName::from_parts(["x"]))),
            ])
            .unwrap_err();
        assert!(matches!(err, BindruneError::MergeConflict { .. }));
    }

    #[test]
    fn test_three_way_merge_folds_pairwise() {
        let merger = DeclMerger::new();
        let merged = merger
            .merge(vec![
                Declaration::Container(container("Sample", &["a"], &[])),
                Declaration::Container(container("Sample", &["b"], &[])),
                Declaration::Container(container("Sample", &["c"], &[])),
            ])
            .unwrap();

        let Declaration::Container(sample) = &merged[0] else {
            panic!("expected a container");
        };
        let member_names: Vec<String> = sample
            .members
            .iter()
            .map(|member| member.name.render())
            .collect();
        assert_eq!(member_names, vec!["a", "b", "c"]);
    }
}

//! The split/capitalize/case pipeline that shapes raw foreign identifiers.
//!
//! A formatter takes a [`CompoundName`] whose components still carry the
//! foreign header's spelling and rewrites it component by component:
//!
//! 1. each component is split by the first matching split rule, recursively;
//! 2. capitalizer rules pin acronym-like substrings to uppercase;
//! 3. the fragments are rejoined as components inheriting the original's
//!    decorations;
//! 4. a name that started lowercase stays lowercase at its head;
//! 5. configured trigger words force the following component into a
//!    `_snake` tail (`x86Sse2` becomes `x86_sse2`).

use regex::Regex;

use super::capitalize::{CapitalSpan, Capitalizer};
use super::compound::{CaseConvention, CompoundName, NameComponent};

/// Rewrites compound names into their idiomatic target-language shape.
pub trait NameFormatter {
    /// Produces the formatted counterpart of `name`.
    fn format(&self, name: &CompoundName) -> CompoundName;
}

/// The standard [`NameFormatter`]: configurable split rules, capitalizers,
/// and snake-case trigger words.
#[derive(Debug, Default)]
pub struct DefaultNameFormatter {
    split_rules: Vec<Regex>,
    capitalizers: Vec<Box<dyn Capitalizer>>,
    snake_case_after: Vec<String>,
}

impl DefaultNameFormatter {
    /// Create a formatter from its three rule lists.
    ///
    /// Split rules apply in order; the first rule that produces more than
    /// one non-empty piece wins, and pieces are re-split recursively with
    /// the full rule list. A rule that always yields its input back as the
    /// only piece is treated as "no match" — rules must never be written so
    /// that a capture group re-yields the whole input on every pass, since
    /// the recursion would not terminate.
    ///
    /// Capitalizers are consulted per piece; the proposal starting leftmost
    /// wins, ties favoring the earlier-registered rule.
    ///
    /// Snake-case triggers match a component's literal text exactly and
    /// lower the component that follows it behind an `_` joint.
    pub fn new(
        split_rules: Vec<Regex>,
        capitalizers: Vec<Box<dyn Capitalizer>>,
        snake_case_after: Vec<String>,
    ) -> Self {
        Self {
            split_rules,
            capitalizers,
            snake_case_after,
        }
    }

    fn split_and_capitalize(&self, component: &NameComponent) -> Vec<NameComponent> {
        let mut pieces = Vec::new();
        self.split_into(&component.text, &mut pieces);

        let fragments: Vec<(String, CaseConvention)> = pieces
            .iter()
            .enumerate()
            .flat_map(|(i, piece)| self.capitalize_piece(piece, i > 0))
            .collect();

        // Each fragment inherits the original component's decorations; its
        // forced case folds into the original pin, left-biased.
        fragments
            .into_iter()
            .map(|(text, case)| {
                component
                    .clone()
                    .with_text(text)
                    .with_case(component.case | case)
            })
            .collect()
    }

    fn split_into(&self, text: &str, output: &mut Vec<String>) {
        for rule in &self.split_rules {
            let Some(captures) = rule.captures(text) else {
                continue;
            };
            let Some(whole) = captures.get(0) else {
                continue;
            };

            let mut pieces: Vec<&str> = Vec::new();
            pieces.push(&text[..whole.start()]);
            for index in 1..captures.len() {
                if let Some(group) = captures.get(index) {
                    pieces.push(group.as_str());
                }
            }
            pieces.push(&text[whole.end()..]);
            pieces.retain(|piece| !piece.is_empty());

            if pieces.len() == 1 && pieces[0] == text {
                // Matched but did not split anything off; emit unchanged.
                break;
            }

            for piece in pieces {
                self.split_into(piece, output);
            }
            return;
        }

        output.push(text.to_string());
    }

    fn capitalize_piece(&self, text: &str, has_leading: bool) -> Vec<(String, CaseConvention)> {
        let mut leftmost: Option<CapitalSpan> = None;
        for capitalizer in &self.capitalizers {
            if let Some(span) = capitalizer.suggest(text, has_leading) {
                if leftmost.as_ref().is_none_or(|best| span.start < best.start) {
                    leftmost = Some(span);
                }
            }
        }

        let Some(span) = leftmost else {
            let text = if has_leading {
                capitalize_first(text)
            } else {
                text.to_string()
            };
            return vec![(text, CaseConvention::Any)];
        };

        let mut result = Vec::new();
        if span.start > 0 {
            result.extend(self.capitalize_piece(&text[..span.start], has_leading));
        }
        result.push((span.text, CaseConvention::AsIs));
        if span.end < text.len() {
            result.extend(self.capitalize_piece(&text[span.end..], true));
        }
        result
    }

    fn inject_snake_joints(&self, components: Vec<NameComponent>) -> Vec<NameComponent> {
        let mut result = Vec::with_capacity(components.len());
        let mut snake_next = false;

        for component in components {
            let component = if snake_next {
                snake_next = false;
                component.with_joint("_").to_lower(false)
            } else {
                component
            };

            if self
                .snake_case_after
                .iter()
                .any(|trigger| *trigger == component.text)
            {
                snake_next = true;
            }

            result.push(component);
        }

        result
    }
}

impl NameFormatter for DefaultNameFormatter {
    fn format(&self, name: &CompoundName) -> CompoundName {
        let mut components: Vec<NameComponent> = name
            .iter()
            .flat_map(|component| self.split_and_capitalize(component))
            .collect();

        // A name that came in camelCase keeps a lowercase head.
        if let Some(first) = name.components().first() {
            let started_lower = first
                .render(false)
                .chars()
                .next()
                .is_some_and(char::is_lowercase);

            if started_lower {
                if let Some(head) = components.first_mut() {
                    *head = head.clone().with_case(CaseConvention::Lower);
                }
            }
        }

        CompoundName::new(self.inject_snake_joints(components))
    }
}

/// Uppercases only the first character, leaving the rest untouched.
fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::capitalize::WordCapitalizer;

    fn formatter(
        split: &[&str],
        words: &[&str],
        snake_after: &[&str],
    ) -> DefaultNameFormatter {
        DefaultNameFormatter::new(
            split
                .iter()
                .map(|pattern| Regex::new(pattern).unwrap())
                .collect(),
            words
                .iter()
                .map(|word| Box::new(WordCapitalizer::new(*word)) as Box<dyn Capitalizer>)
                .collect(),
            snake_after.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn texts(name: &CompoundName) -> Vec<&str> {
        name.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_split_rule_first_match_wins_and_recurses() {
        let formatter = formatter(&["(?i)(color)(management)"], &[], &[]);

        let name = CompoundName::from_parts(["Colormanagement"]);
        let formatted = formatter.format(&name);
        assert_eq!(texts(&formatted), vec!["Color", "Management"]);
    }

    #[test]
    fn test_split_keeps_decorations_on_every_fragment() {
        let formatter = formatter(&["(?i)(color)(management)"], &[], &[]);

        let component = NameComponent::new("Colormanagement").with_joint("_");
        let formatted = formatter.format(&CompoundName::new(vec![component]));
        assert!(formatted
            .iter()
            .all(|c| c.joint_to_prev.as_deref() == Some("_")));
    }

    #[test]
    fn test_unmatched_rule_leaves_component_alone() {
        let formatter = formatter(&["(?i)(color)(management)"], &[], &[]);

        let name = CompoundName::from_parts(["Version"]);
        assert_eq!(texts(&formatter.format(&name)), vec!["Version"]);
    }

    #[test]
    fn test_capitalizer_pins_match_as_is() {
        let formatter = formatter(&[], &["dred"], &[]);

        let name = CompoundName::from_parts(["DredVersion"]);
        let formatted = formatter.format(&name);
        assert_eq!(texts(&formatted), vec!["DRED", "Version"]);
        assert_eq!(formatted.components()[0].case, CaseConvention::AsIs);
        // The remainder after a match is force-capitalized on its head.
        assert_eq!(formatted.components()[1].case, CaseConvention::Any);
        assert_eq!(formatted.render(), "DREDVersion");
    }

    #[test]
    fn test_leftmost_capitalizer_wins() {
        let formatter = formatter(&[], &["version", "dred"], &[]);

        let name = CompoundName::from_parts(["dredversion"]);
        let formatted = formatter.format(&name);
        // The remainder is reprocessed, so the other rule still fires there.
        assert_eq!(texts(&formatted), vec!["DRED", "VERSION"]);
    }

    #[test]
    fn test_trailing_fragment_is_kept() {
        let formatter = formatter(&[], &["sse2"], &[]);

        let name = CompoundName::from_parts(["sse2x"]);
        let formatted = formatter.format(&name);
        assert_eq!(texts(&formatted), vec!["SSE2", "X"]);
    }

    #[test]
    fn test_camel_case_head_stays_lower() {
        let formatter = formatter(&[], &["sse2"], &[]);

        let name = CompoundName::from_parts(["drawIndexed"]);
        let formatted = formatter.format(&name);
        assert_eq!(formatted.components()[0].case, CaseConvention::Lower);

        let name = CompoundName::from_parts(["DrawIndexed"]);
        let formatted = formatter.format(&name);
        assert_eq!(formatted.components()[0].case, CaseConvention::Any);
    }

    #[test]
    fn test_snake_case_trigger_lowers_next_component() {
        let formatter = formatter(&[], &[], &["x86"]);

        let name = CompoundName::from_parts(["x86", "Sse2"]);
        let formatted = formatter.format(&name);
        assert_eq!(formatted.render(), "x86_sse2");
    }

    #[test]
    fn test_snake_case_trigger_respects_pinned_case() {
        let formatter = formatter(&[], &["sse2"], &["x86"]);

        let name = CompoundName::from_parts(["x86", "sse2"]);
        let formatted = formatter.format(&name);
        // The capitalizer pinned SSE2 as-is, so the snake pass keeps it.
        assert_eq!(formatted.render(), "x86_SSE2");
    }

    #[test]
    fn test_format_is_deterministic() {
        let formatter = formatter(&["(?i)(color)(management)"], &["dred"], &["x86"]);
        let name = CompoundName::from_snake_case("D3D12_DRED_COLORMANAGEMENT");
        assert_eq!(
            formatter.format(&name).render(),
            formatter.format(&name).render()
        );
    }
}

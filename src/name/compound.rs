//! Compound symbol names: identifiers modeled as ordered word components.
//!
//! A [`CompoundName`] describes a symbol as a collection of words that are
//! stitched together into a final identifier string. The same name can be
//! rendered as `lower_snake_case`, `PascalCase`, or `camelCase` without
//! re-splitting, because the word boundaries are kept explicit. Individual
//! components can pin their casing so that later case transforms leave them
//! alone (acronyms such as `SSE2` survive a `camel_cased` pass intact).

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Casing preference for a single [`NameComponent`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseConvention {
    /// Any casing is supported.
    #[default]
    Any,
    /// The component's casing must be maintained as-is during transformations.
    AsIs,
    /// The component is pinned to UPPERCASE.
    Upper,
    /// The component is pinned to lowercase.
    Lower,
    /// The component is pinned to Capitalized.
    Capitalized,
}

impl CaseConvention {
    /// Changes a string to a case matching the one specified by `self`.
    ///
    /// `Any` and `AsIs` return the string unchanged; `Capitalized`
    /// uppercases the first character and lowercases the rest.
    pub fn apply(self, text: &str) -> String {
        match self {
            CaseConvention::Any | CaseConvention::AsIs => text.to_string(),
            CaseConvention::Upper => text.to_uppercase(),
            CaseConvention::Lower => text.to_lowercase(),
            CaseConvention::Capitalized => capitalize(text),
        }
    }

    /// Combines two casing preferences, left-biased: `self` wins unless it
    /// is `Any`.
    pub fn combine(self, other: Self) -> Self {
        if self == CaseConvention::Any {
            other
        } else {
            self
        }
    }
}

impl std::ops::BitOr for CaseConvention {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.combine(rhs)
    }
}

/// Uppercases the first character of `text` and lowercases the rest.
pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// One word of a [`CompoundName`], with optional decorations.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameComponent {
    /// The core text of this component.
    pub text: String,
    /// An optional prefix prepended to this component when rendering.
    pub prefix: Option<String>,
    /// An optional suffix appended to this component when rendering.
    pub suffix: Option<String>,
    /// A joint emitted before this component only when it follows another
    /// component in a rendered name.
    pub joint_to_prev: Option<String>,
    /// The casing preference for this component.
    pub case: CaseConvention,
}

impl NameComponent {
    /// Create a plain component with no decorations and no casing pin.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            prefix: None,
            suffix: None,
            joint_to_prev: None,
            case: CaseConvention::Any,
        }
    }

    /// Returns a copy with the given prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Returns a copy with the given suffix.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Returns a copy with the given joint to the previous component.
    pub fn with_joint(mut self, joint: impl Into<String>) -> Self {
        self.joint_to_prev = Some(joint.into());
        self
    }

    /// Returns a copy with the given core text, keeping decorations.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Returns a copy with the given casing preference.
    pub fn with_case(mut self, case: CaseConvention) -> Self {
        self.case = case;
        self
    }

    /// Returns a copy keeping only the core text, dropping prefix, suffix,
    /// and joint. If `case` is `Some`, the copy uses it, otherwise the
    /// current preference is kept.
    pub fn with_text_only(&self, case: Option<CaseConvention>) -> Self {
        Self {
            text: self.text.clone(),
            prefix: None,
            suffix: None,
            joint_to_prev: None,
            case: case.unwrap_or(self.case),
        }
    }

    /// Returns a copy with any occurrence of `old` within the core text
    /// replaced by `new`.
    pub fn replacing_in_text(&self, old: &str, new: &str) -> Self {
        let mut copy = self.clone();
        copy.text = copy.text.replace(old, new);
        copy
    }

    /// Returns a copy with all strings lowercased.
    ///
    /// A component with a pinned casing is returned unaltered unless
    /// `force` is set, in which case the pin is reset to `Any` and the
    /// strings are lowercased anyway.
    pub fn to_lower(&self, force: bool) -> Self {
        if !force && self.case != CaseConvention::Any {
            return self.clone();
        }

        Self {
            text: self.text.to_lowercase(),
            prefix: self.prefix.as_deref().map(str::to_lowercase),
            suffix: self.suffix.as_deref().map(str::to_lowercase),
            joint_to_prev: self.joint_to_prev.as_deref().map(str::to_lowercase),
            case: CaseConvention::Any,
        }
    }

    /// Returns a copy with all strings uppercased.
    ///
    /// A component with a pinned casing is returned unaltered unless
    /// `force` is set, in which case the pin is reset to `Any` and the
    /// strings are uppercased anyway.
    pub fn to_upper(&self, force: bool) -> Self {
        if !force && self.case != CaseConvention::Any {
            return self.clone();
        }

        Self {
            text: self.text.to_uppercase(),
            prefix: self.prefix.as_deref().map(str::to_uppercase),
            suffix: self.suffix.as_deref().map(str::to_uppercase),
            joint_to_prev: self.joint_to_prev.as_deref().map(str::to_uppercase),
            case: CaseConvention::Any,
        }
    }

    /// Renders this component.
    ///
    /// The joint is emitted only when `has_previous` is set; prefix and
    /// suffix only when present. Every emitted piece goes through the
    /// component's casing preference individually.
    pub fn render(&self, has_previous: bool) -> String {
        let mut result = String::new();

        if has_previous {
            if let Some(joint) = &self.joint_to_prev {
                result.push_str(&self.case.apply(joint));
            }
        }

        if let Some(prefix) = &self.prefix {
            result.push_str(&self.case.apply(prefix));
        }

        result.push_str(&self.case.apply(&self.text));

        if let Some(suffix) = &self.suffix {
            result.push_str(&self.case.apply(suffix));
        }

        result
    }

    /// Returns `true` if the rendering of this component starts with `text`.
    pub fn starts_with(&self, text: &str, has_previous: bool) -> bool {
        self.render(has_previous).starts_with(text)
    }

    /// Returns `true` if the rendering of this component ends with `text`.
    pub fn ends_with(&self, text: &str, has_previous: bool) -> bool {
        self.render(has_previous).ends_with(text)
    }
}

/// An ordered sequence of [`NameComponent`]s forming one identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundName {
    components: Vec<NameComponent>,
}

// Equality is order-sensitive; hashing combines per-component hashes
// commutatively. Equal names always agree on their hash, reordered
// component lists may collide.
impl Hash for CompoundName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut digest: u64 = 0;
        for component in &self.components {
            let mut hasher = DefaultHasher::new();
            component.hash(&mut hasher);
            digest = digest.wrapping_add(hasher.finish());
        }
        state.write_usize(self.components.len());
        state.write_u64(digest);
    }
}

impl CompoundName {
    /// Create a name from an explicit component list.
    pub fn new(components: Vec<NameComponent>) -> Self {
        Self { components }
    }

    /// Create a name with one undecorated component per input string.
    pub fn from_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            components: parts.into_iter().map(NameComponent::new).collect(),
        }
    }

    /// Create a name from a `snake_case` string.
    ///
    /// The string is split on `_` and every non-first component carries
    /// `"_"` as its joint, so the original spelling round-trips through
    /// [`render`].
    ///
    /// [`render`]: CompoundName::render
    pub fn from_snake_case(text: &str) -> Self {
        Self {
            components: text
                .split('_')
                .enumerate()
                .map(|(i, part)| {
                    let component = NameComponent::new(part);
                    if i > 0 {
                        component.with_joint("_")
                    } else {
                        component
                    }
                })
                .collect(),
        }
    }

    /// Create a name from a `PascalCase` or `camelCase` string.
    ///
    /// A word boundary occurs before an uppercase letter that follows a
    /// lowercase letter, and before an uppercase letter that starts a new
    /// capitalized run followed by a lowercase letter (`"ABCDef"` splits as
    /// `ABC` / `Def`).
    pub fn from_pascal_case(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let mut parts: Vec<String> = Vec::new();
        let mut current = String::new();

        for (i, &ch) in chars.iter().enumerate() {
            if i > 0 && ch.is_ascii_uppercase() {
                let after_lower = chars[i - 1].is_ascii_lowercase();
                let run_break = chars[i - 1].is_ascii_uppercase()
                    && chars.get(i + 1).is_some_and(|c| c.is_ascii_lowercase());

                if after_lower || run_break {
                    parts.push(std::mem::take(&mut current));
                }
            }
            current.push(ch);
        }

        if !current.is_empty() {
            parts.push(current);
        }

        Self::from_parts(parts)
    }

    /// The components of this name, in order.
    pub fn components(&self) -> &[NameComponent] {
        &self.components
    }

    /// Mutable access to the components of this name.
    pub fn components_mut(&mut self) -> &mut Vec<NameComponent> {
        &mut self.components
    }

    /// Iterates the components in order.
    pub fn iter(&self) -> std::slice::Iter<'_, NameComponent> {
        self.components.iter()
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if the name has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns `true` if the rendered name starts with `text`.
    ///
    /// An empty name matches only the empty string.
    pub fn starts_with(&self, text: &str) -> bool {
        if self.components.is_empty() {
            return text.is_empty();
        }
        self.render().starts_with(text)
    }

    /// Returns `true` if the rendered name ends with `text`.
    ///
    /// An empty name matches only the empty string.
    pub fn ends_with(&self, text: &str) -> bool {
        if self.components.is_empty() {
            return text.is_empty();
        }
        self.render().ends_with(text)
    }

    /// Returns a copy with `component` appended.
    pub fn adding(&self, component: NameComponent) -> Self {
        let mut copy = self.clone();
        copy.components.push(component);
        copy
    }

    /// Returns a copy with `component` prepended.
    pub fn prepending(&self, component: NameComponent) -> Self {
        let mut copy = self.clone();
        copy.components.insert(0, component);
        copy
    }

    /// Returns a copy where each component is replaced by `mapper(index,
    /// component)`.
    pub fn map_components<F>(&self, mut mapper: F) -> Self
    where
        F: FnMut(usize, &NameComponent) -> NameComponent,
    {
        Self {
            components: self
                .components
                .iter()
                .enumerate()
                .map(|(i, component)| mapper(i, component))
                .collect(),
        }
    }

    /// Returns a copy with every component lowercased.
    ///
    /// Components with a pinned casing keep their pin unless `force` is
    /// set.
    pub fn to_lower(&self, force: bool) -> Self {
        self.map_components(|_, component| component.to_lower(force))
    }

    /// Returns a copy with every component uppercased.
    ///
    /// Components with a pinned casing keep their pin unless `force` is
    /// set.
    pub fn to_upper(&self, force: bool) -> Self {
        self.map_components(|_, component| component.to_upper(force))
    }

    /// Returns a copy with the leading run of components whose text appears
    /// in `prefixes` removed, stopping at the first non-match.
    pub fn removing_prefixes<S: AsRef<str>>(&self, prefixes: &[S], case_sensitive: bool) -> Self {
        let mut index = 0;
        for component in &self.components {
            let matched = prefixes.iter().any(|prefix| {
                if case_sensitive {
                    prefix.as_ref() == component.text
                } else {
                    prefix.as_ref().eq_ignore_ascii_case(&component.text)
                }
            });

            if matched {
                index += 1;
            } else {
                break;
            }
        }

        Self {
            components: self.components[index..].to_vec(),
        }
    }

    /// Removes the longest shared component prefix between `self` and
    /// `other`, returning the remainder together with an optional extra
    /// prefix fragment.
    ///
    /// With `detect_plurals` set, components that differ only by a trailing
    /// `s` (on either side) count as shared. Because target identifiers may
    /// not start with a digit, the boundary is relaxed backwards while the
    /// first remaining component's leading character is a digit; the
    /// components given back by the relaxation are returned as the second
    /// element for the caller to recombine.
    pub fn removing_common(
        &self,
        other: &Self,
        case_sensitive: bool,
        detect_plurals: bool,
    ) -> (Self, Option<Self>) {
        let shared = usize::min(self.components.len(), other.components.len());

        let mut prefix_index = 0;
        for index in 0..shared {
            let ours = &self.components[index].text;
            let theirs = &other.components[index].text;

            if detect_plurals {
                let ours_lower = ours.to_lowercase();
                let theirs_lower = theirs.to_lowercase();

                if format!("{ours_lower}s") == theirs_lower
                    || ours_lower == format!("{theirs_lower}s")
                {
                    prefix_index += 1;
                    continue;
                }
            }

            let same = if case_sensitive {
                ours == theirs
            } else {
                ours.eq_ignore_ascii_case(theirs)
            };

            if !same {
                break;
            }

            prefix_index += 1;
        }

        // Relax the boundary while the component at it starts with a digit.
        let mut extra_prefix_index = prefix_index;
        while extra_prefix_index > 0
            && self
                .components
                .get(extra_prefix_index)
                .and_then(|component| component.text.chars().next())
                .is_some_and(|ch| ch.is_ascii_digit())
        {
            extra_prefix_index -= 1;
        }

        let remainder = Self {
            components: self.components[prefix_index..].to_vec(),
        };

        if extra_prefix_index != prefix_index {
            let extra = Self {
                components: self.components[extra_prefix_index..prefix_index].to_vec(),
            };
            (remainder, Some(extra))
        } else {
            (remainder, None)
        }
    }

    /// Returns a copy that renders as a `lower_snake_cased_string`.
    ///
    /// Components with a pinned casing keep their casing unless `force` is
    /// set.
    pub fn lower_snake_cased(&self, force: bool) -> Self {
        self.map_components(|_, component| {
            component.with_text_only(None).to_lower(force).with_joint("_")
        })
    }

    /// Returns a copy that renders as a `PascalCaseString`.
    pub fn pascal_cased(&self) -> Self {
        self.map_components(|_, component| NameComponent::new(capitalize(&component.text)))
    }

    /// Returns a copy that renders as a `camelCaseString`.
    ///
    /// When two adjacent components have digits on each end,
    /// `digit_separator` is inserted as the joint of the second component,
    /// so `["target", "1", "0"]` renders as `target1_0` rather than the
    /// ambiguous `target10`.
    pub fn camel_cased(&self, digit_separator: &str) -> Self {
        let mut result = Vec::with_capacity(self.components.len());

        for (i, component) in self.components.iter().enumerate() {
            let mut renamed = component.with_text_only(None).to_lower(false);

            if i > 0 {
                renamed.text = capitalize(&renamed.text);

                let starts_digit = renamed
                    .render(true)
                    .chars()
                    .next()
                    .is_some_and(|ch| ch.is_ascii_digit());
                let prev_ends_digit = self.components[i - 1]
                    .render(i > 1)
                    .chars()
                    .last()
                    .is_some_and(|ch| ch.is_ascii_digit());

                if starts_digit && prev_ends_digit {
                    renamed = renamed.with_joint(digit_separator);
                }
            }

            result.push(renamed);
        }

        Self { components: result }
    }

    /// Renders the full name by concatenating each component's rendering in
    /// order. Rendering is pure: two calls on an unmodified name yield
    /// identical output.
    pub fn render(&self) -> String {
        self.components
            .iter()
            .enumerate()
            .map(|(i, component)| component.render(i > 0))
            .collect()
    }
}

impl fmt::Display for CompoundName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl<'a> IntoIterator for &'a CompoundName {
    type Item = &'a NameComponent;
    type IntoIter = std::slice::Iter<'a, NameComponent>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

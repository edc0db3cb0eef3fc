//! Static configuration for the naming and doc-comment passes.
//!
//! Configuration is plain serde-backed data — marker strings, pattern
//! sources, word lists — validated up front and compiled into the runtime
//! rule objects (`Regex`, capitalizers) by the `build_*` constructors.
//! Keeping the string level separate lets callers load the whole
//! configuration from JSON or TOML next to the rest of their generator
//! setup.

use serde::{Deserialize, Serialize};

use crate::core::errors::{BindruneError, Result};
use crate::doc::scanner::{DoccommentScanner, SourceReader, DEFAULT_MARKERS};
use crate::name::capitalize::{Capitalizer, PatternCapitalizer, WordCapitalizer};
use crate::name::formatter::DefaultNameFormatter;

/// Top-level configuration for the pipeline.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BindruneConfig {
    /// Name formatting rules.
    #[serde(default)]
    pub naming: NamingConfig,

    /// Doc-comment scanner settings.
    #[serde(default)]
    pub scanner: ScannerConfig,
}

impl BindruneConfig {
    /// Validates every section.
    pub fn validate(&self) -> Result<()> {
        self.naming.validate()?;
        self.scanner.validate()
    }
}

/// Rules for the identifier formatting pipeline.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NamingConfig {
    /// Ordered regex sources used to split components; capture groups are
    /// kept as pieces.
    #[serde(default)]
    pub split_patterns: Vec<String>,

    /// Words to pin to uppercase wherever they occur inside a component.
    #[serde(default)]
    pub capitalize_words: Vec<String>,

    /// Regex sources with one capture group; the group is pinned to
    /// uppercase where the pattern matches.
    #[serde(default)]
    pub capitalize_patterns: Vec<String>,

    /// Trigger words: the component following an exact match is lowered
    /// behind an underscore joint.
    #[serde(default)]
    pub snake_case_after: Vec<String>,
}

impl NamingConfig {
    /// Validates the rule sources without building them.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.split_patterns {
            regex::Regex::new(pattern)
                .map_err(|err| BindruneError::pattern(pattern, err.to_string()))?;
        }

        for pattern in &self.capitalize_patterns {
            PatternCapitalizer::new(pattern, false)?;
        }

        if self.capitalize_words.iter().any(|word| word.is_empty()) {
            return Err(BindruneError::config_field(
                "capitalized words must not be empty",
                "capitalize_words",
            ));
        }

        Ok(())
    }

    /// Compiles the rules into a ready-to-use formatter.
    ///
    /// Word capitalizers are registered before pattern capitalizers, in
    /// configuration order, which fixes how ties between equally-early
    /// matches resolve.
    pub fn build_formatter(&self) -> Result<DefaultNameFormatter> {
        self.validate()?;

        let split_rules = self
            .split_patterns
            .iter()
            .map(|pattern| {
                regex::Regex::new(pattern)
                    .map_err(|err| BindruneError::pattern(pattern, err.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut capitalizers: Vec<Box<dyn Capitalizer>> = Vec::new();
        for word in &self.capitalize_words {
            capitalizers.push(Box::new(WordCapitalizer::new(word.clone())));
        }
        for pattern in &self.capitalize_patterns {
            capitalizers.push(Box::new(PatternCapitalizer::new(pattern, false)?));
        }

        Ok(DefaultNameFormatter::new(
            split_rules,
            capitalizers,
            self.snake_case_after.clone(),
        ))
    }
}

/// Doc-comment scanner settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Recognized doc-comment opening markers.
    #[serde(default = "default_markers")]
    pub markers: Vec<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            markers: default_markers(),
        }
    }
}

fn default_markers() -> Vec<String> {
    DEFAULT_MARKERS.iter().map(|marker| marker.to_string()).collect()
}

impl ScannerConfig {
    /// Validates the marker list.
    pub fn validate(&self) -> Result<()> {
        if self.markers.is_empty() {
            return Err(BindruneError::config_field(
                "at least one doc-comment marker is required",
                "markers",
            ));
        }

        if self.markers.iter().any(|marker| marker.is_empty()) {
            return Err(BindruneError::config_field(
                "markers must not be empty strings",
                "markers",
            ));
        }

        Ok(())
    }

    /// Builds a scanner over `reader` with these markers.
    pub fn build_scanner(&self, reader: Box<dyn SourceReader>) -> Result<DoccommentScanner> {
        self.validate()?;
        Ok(DoccommentScanner::new(reader, self.markers.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::scanner::MemoryReader;
    use crate::name::compound::CompoundName;
    use crate::name::formatter::NameFormatter;

    #[test]
    fn test_default_config_validates() {
        assert!(BindruneConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_split_pattern_is_rejected() {
        let config = NamingConfig {
            split_patterns: vec!["(unclosed".to_string()],
            ..NamingConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(BindruneError::Pattern { .. })
        ));
    }

    #[test]
    fn test_capitalize_pattern_needs_group() {
        let config = NamingConfig {
            capitalize_patterns: vec!["nogroups".to_string()],
            ..NamingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_marker_list_is_rejected() {
        let config = ScannerConfig {
            markers: Vec::new(),
        };
        assert!(matches!(
            config.validate(),
            Err(BindruneError::Config { .. })
        ));
    }

    #[test]
    fn test_built_formatter_applies_configuration() {
        let config = NamingConfig {
            capitalize_words: vec!["dred".to_string()],
            ..NamingConfig::default()
        };
        let formatter = config.build_formatter().unwrap();

        let formatted = formatter.format(&CompoundName::from_parts(["DredVersion"]));
        assert_eq!(formatted.render(), "DREDVersion");
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = BindruneConfig {
            naming: NamingConfig {
                capitalize_words: vec!["sse2".to_string()],
                snake_case_after: vec!["x86".to_string()],
                ..NamingConfig::default()
            },
            scanner: ScannerConfig::default(),
        };

        let json = serde_json::to_string(&config).unwrap();
        let restored: BindruneConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.naming.capitalize_words, vec!["sse2"]);
        assert_eq!(restored.scanner.markers, default_markers());
    }

    #[test]
    fn test_built_scanner_uses_markers() {
        let mut reader = MemoryReader::new();
        reader.insert("a.h", "//* custom\n");

        let config = ScannerConfig {
            markers: vec!["//*".to_string()],
        };
        let scanner = config.build_scanner(Box::new(reader)).unwrap();
        let blocks = scanner.doccomments_for(std::path::Path::new("a.h")).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text(), " custom");
    }
}

//! Error types for the bindrune library.
//!
//! There is exactly one fatal condition in the whole pipeline: merging two
//! same-named declarations of incompatible kinds. Everything else that can
//! "fail" — a file that cannot be read, a capitalizer that matches nothing,
//! a symbol that is not in the lookup — is modeled as an empty or absent
//! result that callers branch on normally, never as an error.

use thiserror::Error;

/// Main result type for bindrune operations.
pub type Result<T> = std::result::Result<T, BindruneError>;

/// Error type for all bindrune operations.
#[derive(Error, Debug)]
pub enum BindruneError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// An invalid user-supplied text rule (split pattern or capitalizer)
    #[error("Invalid pattern `{pattern}`: {message}")]
    Pattern {
        /// The pattern source text as configured
        pattern: String,
        /// Error description from the regex engine
        message: String,
    },

    /// Two declarations share a generated name but cannot be unified.
    ///
    /// This is the single fatal class: it indicates a defect in the
    /// generator or its configuration, not a transient condition, and it
    /// aborts the whole batch.
    #[error(
        "declarations sharing the generated name `{name}` cannot be merged: \
         {first_kind} `{first_original}` and {second_kind} `{second_original}`"
    )]
    MergeConflict {
        /// The generated name both declarations resolve to
        name: String,
        /// Kind of the declaration encountered first
        first_kind: &'static str,
        /// Original foreign identifier of the declaration encountered first
        first_original: String,
        /// Kind of the declaration encountered second
        second_kind: &'static str,
        /// Original foreign identifier of the declaration encountered second
        second_original: String,
    },
}

impl BindruneError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new pattern error from a failed rule compilation
    pub fn pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create a new merge conflict error naming both offending declarations
    pub fn merge_conflict(
        name: impl Into<String>,
        first_kind: &'static str,
        first_original: impl Into<String>,
        second_kind: &'static str,
        second_original: impl Into<String>,
    ) -> Self {
        Self::MergeConflict {
            name: name.into(),
            first_kind,
            first_original: first_original.into(),
            second_kind,
            second_original: second_original.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = BindruneError::config("missing marker list");
        assert!(matches!(err, BindruneError::Config { .. }));

        let err = BindruneError::pattern("(unclosed", "unclosed group");
        assert!(matches!(err, BindruneError::Pattern { .. }));
    }

    #[test]
    fn test_config_field_error() {
        let err = BindruneError::config_field("must not be empty", "markers");

        if let BindruneError::Config { message, field } = err {
            assert_eq!(message, "must not be empty");
            assert_eq!(field, Some("markers".to_string()));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_merge_conflict_names_both_sides() {
        let err = BindruneError::merge_conflict(
            "Sample",
            "container",
            "D3D12_SAMPLE",
            "variable",
            "D3D12_SAMPLE_VALUE",
        );

        let rendered = err.to_string();
        assert!(rendered.contains("Sample"));
        assert!(rendered.contains("D3D12_SAMPLE"));
        assert!(rendered.contains("D3D12_SAMPLE_VALUE"));
    }
}

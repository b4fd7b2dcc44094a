//! Error types for the catalog crate.

use thiserror::Error;

/// Errors that can occur while building or loading [`PreferenceRules`].
///
/// [`PreferenceRules`]: crate::rules::PreferenceRules
#[derive(Error, Debug)]
pub enum RulesError {
    /// Rules file could not be read
    #[error("Failed to read rules file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Rules file is not valid TOML for the expected shape
    #[error("Failed to parse rules file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A disallowed-title pattern is not a valid regular expression
    #[error("Invalid title pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Rules are structurally valid but unusable
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RulesError>;

//! Error types for the documentation renderer

use std::path::PathBuf;

use thiserror::Error;

/// Result type for renderer operations
pub type Result<T> = std::result::Result<T, DocsError>;

/// Renderer errors
#[derive(Error, Debug)]
pub enum DocsError {
    #[error("No types match the pattern: {pattern}{}", suggestion_hint(.suggestions))]
    NoMatch {
        pattern: String,
        suggestions: Vec<String>,
    },

    #[error("All versions of the type {pattern} are deprecated, nothing to display")]
    AllDeprecated { pattern: String },

    #[error("Invalid type name pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Invalid bit length range: [{min}, {max}]")]
    InvalidRange { min: u64, max: u64 },

    #[error("Invalid metadata format: {0}")]
    InvalidFormat(String),

    #[error("No root namespace directories found in {0}")]
    NoRootNamespaces(PathBuf),

    #[error("DSDL parser `{command}` failed ({status}): {stderr}")]
    Parser {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Cannot read DSDL source {path}: {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Config error: {0}")]
    Config(#[from] config_crate::ConfigError),
}

fn suggestion_hint(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean {}?)", suggestions.join(", "))
    }
}

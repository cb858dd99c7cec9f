// Typed failures for the classification core.
//
// Everything outside the core speaks anyhow; these stay typed so the web
// layer can tell a bad request apart from a broken deployment.

use std::path::PathBuf;

use thiserror::Error;

/// Rejected classification input.
#[derive(Debug, Error, PartialEq)]
pub enum ClassifyError {
    /// The input was neither a string nor a sequence of strings.
    #[error("classification input must be a string or an array of strings, got {found}")]
    InvalidInput { found: &'static str },
}

/// Failure while building a taxonomy.
#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("topic label must not be empty")]
    EmptyLabel,

    #[error("duplicate topic label '{0}'")]
    DuplicateLabel(String),

    #[error("'{0}' is reserved for unmatched text and cannot be a topic")]
    ReservedLabel(String),

    #[error("topic '{topic}' contains a blank keyword")]
    BlankKeyword { topic: String },

    #[error("failed to compile keyword '{keyword}' for topic '{topic}'")]
    Pattern {
        topic: String,
        keyword: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to read taxonomy file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid taxonomy file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

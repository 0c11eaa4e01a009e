//! Error types for templie.
//!
//! Only contract violations are errors. A sentence that yields no triples,
//! a triple that fails an entity-type constraint, a lexicon miss or an
//! unresolved date string are all expected outcomes and are represented by
//! absence in the output, never by a variant here.

use thiserror::Error;

/// Result type for templie operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for templie operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A required upstream annotation layer is missing from a sentence.
    /// The caller ran the pipeline stages out of order; the whole document
    /// fails rather than extracting from absent data.
    #[error("annotation layer '{layer}' missing before stage '{stage}': pipeline stages ran out of order")]
    PipelineSequence { stage: String, layer: String },

    /// Malformed input rejected before any processing starts.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Invalid extraction configuration.
    #[error("config error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse/serialize error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration parse error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a pipeline sequencing error for a stage missing a layer.
    pub fn sequence(stage: impl Into<String>, layer: impl Into<String>) -> Self {
        Error::PipelineSequence {
            stage: stage.into(),
            layer: layer.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}

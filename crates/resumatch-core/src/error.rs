//! Error types for the resumatch-core library.

use thiserror::Error;

/// Main error type for the resumatch library.
#[derive(Error, Debug)]
pub enum ResumatchError {
    /// Document or annotation extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Model training error.
    #[error("training error: {0}")]
    Training(#[from] TrainingError),

    /// Match query error.
    #[error("match error: {0}")]
    Match(#[from] MatchError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid regular expression in a standardization rule.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to reading annotated documents.
///
/// Inside a batch these never abort the run; they become skip reasons.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    /// Line or record is not valid JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// Record is not a JSON object.
    #[error("record is not an object")]
    NotAnObject,

    /// Record has no string `content` field.
    #[error("missing or non-string content")]
    MissingContent,

    /// Record content is empty.
    #[error("empty content")]
    EmptyContent,
}

/// Errors raised while fitting text models.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrainingError {
    /// Nothing to train on.
    #[error("training set is empty")]
    EmptyDataset,

    /// Fewer than two label classes present.
    #[error("training set has {classes} distinct label(s); at least 2 are required")]
    Degenerate { classes: usize },

    /// Feature extraction produced no usable feature.
    #[error("vectorization failed: {0}")]
    Vectorization(String),

    /// Every candidate classifier failed to fit.
    #[error("no classifier could be fitted")]
    NoModel,

    /// A classifier rejected its input.
    #[error("{model} failed: {reason}")]
    Fit { model: String, reason: String },
}

/// Errors returned by match queries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    /// Job title is not in the catalog.
    #[error("job title '{0}' not found in the profile catalog")]
    UnknownJob(String),

    /// Prediction requested before training.
    #[error("matcher has not been trained")]
    NotTrained,
}

/// Result type for the resumatch library.
pub type Result<T> = std::result::Result<T, ResumatchError>;

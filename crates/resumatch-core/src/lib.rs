//! Core library for résumé screening.
//!
//! This crate provides:
//! - Span-annotated document loading (JSON array or newline-delimited JSON)
//! - Field extraction from annotations (skills, designations, degrees, ...)
//! - Text normalization and regex-driven term standardization
//! - Years-of-experience extraction and role categorization
//! - TF-IDF text features, black-box classifiers, and a skill matcher

pub mod error;
pub mod export;
pub mod extract;
pub mod loader;
pub mod matcher;
pub mod ml;
pub mod models;

pub use error::{ExtractionError, MatchError, ResumatchError, Result, TrainingError};
pub use extract::{
    RecordExtractor, RoleCategory, TermStandardizer, categorize_label, extract, extract_years,
    normalize,
};
pub use loader::{DocumentBatch, SkippedRecord, load_documents, parse_documents};
pub use matcher::{SkillMatcher, TrainingExample};
pub use ml::role::RoleClassifier;
pub use models::config::ResumatchConfig;
pub use models::document::{Annotation, Document, EntityLabel, SpanPoint};
pub use models::profile::{JobProfile, MatchResult};
pub use models::record::ExtractedRecord;

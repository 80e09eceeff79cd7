//! Rule-based field extraction from annotated résumés.

pub mod annotations;
pub mod category;
pub mod experience;
pub mod normalize;
pub mod patterns;
mod pipeline;

pub use annotations::{extract, extract_label, first_designation};
pub use category::{RoleCategory, categorize_label};
pub use experience::{ExperienceExtractor, extract_years};
pub use normalize::{TermStandardizer, normalize, normalize_item};
pub use pipeline::{BatchReport, RecordExtractor, RecordOutcome};

/// Trait for free-text field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field, in text order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value found in text, with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

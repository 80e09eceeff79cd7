//! Document-to-record extraction pipeline.

use std::time::Instant;

use tracing::{debug, info, warn};

use super::annotations::extract;
use super::experience::{ExperienceExtractor, extract_years};
use super::normalize::{TermStandardizer, normalize};
use super::FieldExtractor;
use crate::error::Result;
use crate::models::config::ExtractionConfig;
use crate::models::document::{Document, EntityLabel};
use crate::models::record::ExtractedRecord;

/// Outcome for one document of a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Extracted,
    Skipped { reason: String },
}

/// Per-document outcomes of a batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Outcome per input document, by input index.
    pub outcomes: Vec<RecordOutcome>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl BatchReport {
    pub fn extracted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RecordOutcome::Extracted))
            .count()
    }

    /// `(index, reason)` for every skipped document.
    pub fn skipped(&self) -> Vec<(usize, &str)> {
        self.outcomes
            .iter()
            .enumerate()
            .filter_map(|(i, o)| match o {
                RecordOutcome::Skipped { reason } => Some((i, reason.as_str())),
                RecordOutcome::Extracted => None,
            })
            .collect()
    }
}

/// Turns annotated documents into normalized records.
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    skill_terms: TermStandardizer,
    designation_terms: TermStandardizer,
    require_complete: bool,
}

impl RecordExtractor {
    /// Build an extractor from configuration, compiling the term rules.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        Ok(Self {
            skill_terms: TermStandardizer::new(&config.skill_rules)?,
            designation_terms: TermStandardizer::new(&config.designation_rules)?,
            require_complete: config.require_complete_records,
        })
    }

    /// Extractor that normalizes without standardizing terms.
    pub fn plain() -> Self {
        Self {
            skill_terms: TermStandardizer::identity(),
            designation_terms: TermStandardizer::identity(),
            require_complete: false,
        }
    }

    /// Set whether incomplete records are skipped in batches.
    pub fn with_require_complete(mut self, require: bool) -> Self {
        self.require_complete = require;
        self
    }

    /// Extract every field of one document.
    pub fn extract(&self, document: &Document) -> ExtractedRecord {
        let field = |label| normalize(extract(document, label));

        let skills = self.skill_terms.standardize_all(&field(EntityLabel::Skills));
        let designations = self
            .designation_terms
            .standardize_all(&field(EntityLabel::Designation));

        ExtractedRecord {
            names: field(EntityLabel::Name),
            skills,
            degrees: field(EntityLabel::Degree),
            colleges: field(EntityLabel::CollegeName),
            locations: field(EntityLabel::Location),
            companies: field(EntityLabel::CompaniesWorkedAt),
            designations,
            experience_years: extract_years(&document.content),
        }
    }

    /// Extract a batch. Skipped documents are reported, never fatal.
    pub fn extract_batch(&self, documents: &[Document]) -> (Vec<ExtractedRecord>, BatchReport) {
        let start = Instant::now();
        let mut records = Vec::with_capacity(documents.len());
        let mut outcomes = Vec::with_capacity(documents.len());

        info!("Extracting records from {} documents", documents.len());

        for (index, document) in documents.iter().enumerate() {
            let record = self.extract(document);

            if self.require_complete && !record.is_complete() {
                let reason = "no skills or no designations".to_string();
                warn!("Skipping document {}: {}", index, reason);
                outcomes.push(RecordOutcome::Skipped { reason });
                continue;
            }

            debug!(
                "Document {}: {} skills, {} designations, experience {:?}",
                index,
                record.skills.len(),
                record.designations.len(),
                record.experience_years
            );
            records.push(record);
            outcomes.push(RecordOutcome::Extracted);
        }

        let report = BatchReport {
            outcomes,
            processing_time_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            "Extracted {} records, skipped {}",
            report.extracted(),
            report.skipped().len()
        );

        (records, report)
    }

    /// All experience mentions in a document, for inspection.
    pub fn experience_mentions(&self, document: &Document) -> Vec<f64> {
        ExperienceExtractor::new()
            .extract_all(&document.content)
            .into_iter()
            .map(|m| m.value)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::{Annotation, SpanPoint};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn document() -> Document {
        Document::new(
            "Senior Software Developer with 6 years of experience. Later: 9 years.",
            vec![
                Annotation::new(
                    EntityLabel::Skills,
                    vec![SpanPoint::text("Core Java"), SpanPoint::text("MySQL"), SpanPoint::text("Docker")],
                ),
                Annotation::new(EntityLabel::Designation, vec![SpanPoint::text("Senior Software Developer")]),
                Annotation::new(EntityLabel::CompaniesWorkedAt, vec![SpanPoint::text("Acme, Inc.")]),
                Annotation::new(EntityLabel::Skills, vec![SpanPoint::text("java")]),
            ],
        )
    }

    #[test]
    fn test_extract_record() {
        let extractor = RecordExtractor::from_config(&ExtractionConfig::default()).unwrap();
        let record = extractor.extract(&document());

        assert_eq!(record.skills, set(&["docker", "java", "sql"]));
        assert_eq!(record.designations, set(&["software engineer"]));
        assert_eq!(record.companies, set(&["acme inc"]));
        assert!(record.degrees.is_empty());
        assert_eq!(record.experience_years, Some(6.0));
    }

    #[test]
    fn test_plain_extractor_keeps_terms() {
        let record = RecordExtractor::plain().extract(&document());
        assert_eq!(record.skills, set(&["core java", "docker", "java", "mysql"]));
    }

    #[test]
    fn test_batch_skips_incomplete_when_required() {
        let extractor = RecordExtractor::plain().with_require_complete(true);
        let documents = vec![document(), Document::new("nothing annotated", vec![])];

        let (records, report) = extractor.extract_batch(&documents);

        assert_eq!(records.len(), 1);
        assert_eq!(report.extracted(), 1);
        assert_eq!(report.skipped(), vec![(1, "no skills or no designations")]);
    }

    #[test]
    fn test_batch_keeps_everything_by_default() {
        let documents = vec![document(), Document::new("nothing annotated", vec![])];
        let (records, report) = RecordExtractor::plain().extract_batch(&documents);
        assert_eq!(records.len(), 2);
        assert!(report.skipped().is_empty());
    }

    #[test]
    fn test_experience_mentions() {
        let mentions = RecordExtractor::plain().experience_mentions(&document());
        assert_eq!(mentions, vec![6.0, 9.0]);
    }
}

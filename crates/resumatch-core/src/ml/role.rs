//! Role category classifier trained on full résumé content.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use super::model::{TextModel, TrainingReport};
use super::text::clean_content;
use crate::error::{ExtractionError, Result};
use crate::extract::{RoleCategory, categorize_label, first_designation};
use crate::models::config::TrainingConfig;
use crate::models::document::Document;

/// Outcome of training a role classifier.
#[derive(Debug, Clone, Serialize)]
pub struct RoleTrainingReport {
    pub training: TrainingReport,
    /// Documents per category before any resampling.
    pub class_counts: BTreeMap<RoleCategory, usize>,
    /// `(document index, reason)` for documents left out.
    pub skipped: Vec<(usize, String)>,
}

/// Predicts a [`RoleCategory`] from résumé text.
#[derive(Debug)]
pub struct RoleClassifier {
    model: TextModel,
    categories: Vec<RoleCategory>,
    min_text_length: usize,
}

impl RoleClassifier {
    /// Label each document by its first designation and fit a text model.
    pub fn train(documents: &[Document], config: &TrainingConfig) -> Result<(Self, RoleTrainingReport)> {
        let mut texts = Vec::new();
        let mut roles = Vec::new();
        let mut skipped = Vec::new();

        for (index, document) in documents.iter().enumerate() {
            if document.content.trim().is_empty() {
                skipped.push((index, ExtractionError::EmptyContent.to_string()));
                continue;
            }
            let Some(text) = clean_content(&document.content, config.min_text_length) else {
                skipped.push((index, format!("at most {} characters after cleaning", config.min_text_length)));
                continue;
            };

            let role = categorize_label(first_designation(document).as_deref());
            debug!("Document {} labeled {}", index, role);
            texts.push(text);
            roles.push(role);
        }

        let mut class_counts = BTreeMap::new();
        for role in &roles {
            *class_counts.entry(*role).or_insert(0) += 1;
        }

        let categories: Vec<RoleCategory> = class_counts.keys().copied().collect();
        let labels: Vec<usize> = roles
            .iter()
            .map(|role| categories.iter().position(|c| c == role).unwrap_or(0))
            .collect();
        let names = categories.iter().map(|c| c.to_string()).collect();

        info!(
            "Training role classifier on {} documents across {} categories ({} skipped)",
            texts.len(),
            categories.len(),
            skipped.len()
        );

        let (model, training) = TextModel::train(&texts, &labels, names, config)?;

        Ok((
            Self {
                model,
                categories,
                min_text_length: config.min_text_length,
            },
            RoleTrainingReport {
                training,
                class_counts,
                skipped,
            },
        ))
    }

    /// Categories the model can predict.
    pub fn categories(&self) -> &[RoleCategory] {
        &self.categories
    }

    /// Predict the role of raw résumé content with its probability.
    ///
    /// Returns `None` when the cleaned text is not longer than the
    /// configured minimum.
    pub fn predict(&self, content: &str) -> Option<(RoleCategory, f64)> {
        let text = clean_content(content, self.min_text_length)?;
        let (class, confidence) = self.model.predict(&text);
        Some((self.categories.get(class).copied().unwrap_or(RoleCategory::Other), confidence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ResumatchError, TrainingError};
    use crate::models::document::{Annotation, EntityLabel, SpanPoint};

    fn resume(body: &str, designation: &str) -> Document {
        Document::new(
            format!("{designation}\n{body}"),
            vec![Annotation::new(EntityLabel::Designation, vec![SpanPoint::text(designation)])],
        )
    }

    fn corpus() -> Vec<Document> {
        let mut docs = Vec::new();
        for i in 0..8 {
            docs.push(resume(
                &format!("built backend services in java and rust, code reviews, deployments {i}"),
                "Software Engineer",
            ));
            docs.push(resume(
                &format!("taught undergraduate courses, graded exams, supervised theses {i}"),
                "Assistant Professor",
            ));
        }
        docs.push(Document::new("   ", vec![]));
        docs.push(Document::new("tiny", vec![]));
        docs
    }

    #[test]
    fn test_train_role_classifier() {
        let (classifier, report) = RoleClassifier::train(&corpus(), &TrainingConfig::default()).unwrap();

        assert_eq!(classifier.categories(), &[RoleCategory::Engineer, RoleCategory::Educator]);
        assert_eq!(report.class_counts[&RoleCategory::Engineer], 8);
        assert_eq!(report.skipped.len(), 2);

        let (role, confidence) = classifier
            .predict("Experienced engineer writing java services and doing code reviews")
            .unwrap();
        assert_eq!(role, RoleCategory::Engineer);
        assert!(confidence > 0.5);

        assert!(classifier.predict("short").is_none());
    }

    #[test]
    fn test_single_category_is_degenerate() {
        let docs: Vec<_> = (0..4)
            .map(|i| resume(&format!("java services and code reviews number {i}"), "Developer"))
            .collect();

        let err = RoleClassifier::train(&docs, &TrainingConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ResumatchError::Training(TrainingError::Degenerate { classes: 1 })
        ));
    }
}

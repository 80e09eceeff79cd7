//! Vectorizer + classifier pipeline with best-of-N model selection.

use std::collections::BTreeSet;
use std::time::Instant;

use chrono::{DateTime, Utc};
use ndarray::{Array2, Axis};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::classifier::{Classifier, argmax, build_classifier};
use super::metrics::ClassificationReport;
use super::split::{oversample, stratified_split};
use super::vectorizer::{TextVectorizer, Weighting};
use crate::error::TrainingError;
use crate::models::config::TrainingConfig;

/// Summary of a training run.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    /// Name of the selected classifier.
    pub model: String,
    /// Held-out accuracy of every candidate that fitted, in trial order.
    pub candidates: Vec<(String, f64)>,
    /// Evaluation of the selected classifier.
    pub evaluation: ClassificationReport,
    pub train_size: usize,
    pub test_size: usize,
    pub vocabulary_size: usize,
    /// True when the TF-IDF vectorizer failed and raw counts were used.
    pub used_count_fallback: bool,
    /// True when no sample could be held out and the training set was scored.
    pub evaluated_on_training: bool,
    pub processing_time_ms: u64,
    pub trained_at: DateTime<Utc>,
}

impl TrainingReport {
    pub fn accuracy(&self) -> f64 {
        self.evaluation.accuracy
    }
}

/// A fitted text classification pipeline.
#[derive(Debug)]
pub struct TextModel {
    vectorizer: TextVectorizer,
    classifier: Box<dyn Classifier>,
    class_names: Vec<String>,
}

impl TextModel {
    /// Fit on `texts` labeled with class indices into `class_names`.
    ///
    /// Splits stratified by label, fits the vectorizer on the training side,
    /// fits every configured classifier and keeps the one with the best
    /// held-out accuracy (earliest wins ties).
    pub fn train(
        texts: &[String],
        labels: &[usize],
        class_names: Vec<String>,
        config: &TrainingConfig,
    ) -> Result<(Self, TrainingReport), TrainingError> {
        let start = Instant::now();

        if texts.is_empty() {
            return Err(TrainingError::EmptyDataset);
        }
        if texts.len() != labels.len() {
            return Err(TrainingError::Fit {
                model: "pipeline".to_string(),
                reason: format!("{} texts but {} labels", texts.len(), labels.len()),
            });
        }

        let distinct: BTreeSet<usize> = labels.iter().copied().collect();
        if distinct.len() < 2 {
            return Err(TrainingError::Degenerate {
                classes: distinct.len(),
            });
        }
        let n_classes = class_names.len().max(distinct.iter().max().map_or(0, |m| m + 1));

        let (train_idx, test_idx) = stratified_split(labels, config.test_fraction, config.seed);
        let train_texts: Vec<String> = train_idx.iter().map(|&i| texts[i].clone()).collect();

        let (vectorizer, x_train) = fit_vectorizer(&train_texts, config)?;
        let used_count_fallback = vectorizer.weighting() == Weighting::Count;
        let x_all_test = vectorizer.transform(&test_idx.iter().map(|&i| texts[i].clone()).collect::<Vec<_>>());

        let fit_idx = oversample(&train_idx, labels, config.oversample_ratio, config.seed);
        let position: std::collections::HashMap<usize, usize> =
            train_idx.iter().enumerate().map(|(pos, &idx)| (idx, pos)).collect();
        let rows: Vec<usize> = fit_idx.iter().map(|idx| position[idx]).collect();
        let x_fit = x_train.select(Axis(0), &rows);
        let y_fit: Vec<usize> = fit_idx.iter().map(|&i| labels[i]).collect();

        let evaluated_on_training = test_idx.is_empty();
        let (x_eval, y_eval): (Array2<f64>, Vec<usize>) = if evaluated_on_training {
            warn!("No held-out samples; scoring on the training set");
            (x_train.clone(), train_idx.iter().map(|&i| labels[i]).collect())
        } else {
            (x_all_test, test_idx.iter().map(|&i| labels[i]).collect())
        };

        let mut candidates = Vec::new();
        let mut best: Option<(Box<dyn Classifier>, f64, Vec<usize>)> = None;

        for &kind in &config.classifiers {
            let mut classifier = build_classifier(kind, config);
            if let Err(e) = classifier.fit(x_fit.view(), &y_fit, n_classes) {
                warn!("Skipping {}: {}", classifier.name(), e);
                continue;
            }

            let predicted = classifier.predict(x_eval.view());
            let accuracy = ClassificationReport::compute(&y_eval, &predicted, &class_names).accuracy;
            debug!("{} accuracy: {:.2}", classifier.name(), accuracy);
            candidates.push((classifier.name().to_string(), accuracy));

            if best.as_ref().is_none_or(|(_, score, _)| accuracy > *score) {
                best = Some((classifier, accuracy, predicted));
            }
        }

        let (classifier, _, predicted) = best.ok_or(TrainingError::NoModel)?;
        let evaluation = ClassificationReport::compute(&y_eval, &predicted, &class_names);

        info!(
            "Selected {} with accuracy {:.2} ({} train / {} held out)",
            classifier.name(),
            evaluation.accuracy,
            train_idx.len(),
            test_idx.len()
        );

        let report = TrainingReport {
            model: classifier.name().to_string(),
            candidates,
            evaluation,
            train_size: train_idx.len(),
            test_size: test_idx.len(),
            vocabulary_size: vectorizer.vocabulary_size(),
            used_count_fallback,
            evaluated_on_training,
            processing_time_ms: start.elapsed().as_millis() as u64,
            trained_at: Utc::now(),
        };

        Ok((
            Self {
                vectorizer,
                classifier,
                class_names,
            },
            report,
        ))
    }

    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    /// Class probabilities for one text.
    pub fn predict_proba(&self, text: &str) -> Vec<f64> {
        let features = self.vectorizer.transform_one(text).insert_axis(Axis(0));
        self.classifier.predict_proba(features.view()).row(0).to_vec()
    }

    /// Most probable class and its probability.
    pub fn predict(&self, text: &str) -> (usize, f64) {
        let probs = self.predict_proba(text);
        let class = argmax(probs.iter());
        (class, probs.get(class).copied().unwrap_or(0.0))
    }
}

/// Fit TF-IDF; fall back to raw counts only when configured to.
fn fit_vectorizer(
    texts: &[String],
    config: &TrainingConfig,
) -> Result<(TextVectorizer, Array2<f64>), TrainingError> {
    let mut vectorizer = TextVectorizer::from_config(config);
    match vectorizer.fit_transform(texts) {
        Ok(x) => Ok((vectorizer, x)),
        Err(e) if config.allow_count_fallback => {
            warn!("TF-IDF vectorization failed ({}), falling back to term counts", e);
            let mut fallback = TextVectorizer::new(Weighting::Count)
                .with_ngram_range(1, 1)
                .with_max_features(config.max_features);
            let x = fallback.fit_transform(texts)?;
            Ok((fallback, x))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> (Vec<String>, Vec<usize>) {
        let mut texts = Vec::new();
        let mut labels = Vec::new();
        for i in 0..12 {
            texts.push(format!("java spring hibernate sql backend {i}"));
            labels.push(1);
            texts.push(format!("painting sculpture gallery art {i}"));
            labels.push(0);
        }
        (texts, labels)
    }

    fn names() -> Vec<String> {
        vec!["no match".to_string(), "match".to_string()]
    }

    #[test]
    fn test_train_and_predict() {
        let (texts, labels) = corpus();
        let (model, report) = TextModel::train(&texts, &labels, names(), &TrainingConfig::default()).unwrap();

        assert_eq!(report.test_size, 6);
        assert_eq!(report.train_size, 18);
        assert!(!report.evaluated_on_training);
        assert_eq!(report.candidates.len(), 3);
        assert_eq!(report.accuracy(), 1.0);

        let (class, confidence) = model.predict("senior java developer with spring");
        assert_eq!(class, 1);
        assert!(confidence > 0.5 && confidence <= 1.0);
    }

    #[test]
    fn test_single_class_is_degenerate() {
        let texts = vec!["a b c".to_string(), "d e f".to_string()];
        let err = TextModel::train(&texts, &[1, 1], names(), &TrainingConfig::default()).unwrap_err();
        assert_eq!(err, TrainingError::Degenerate { classes: 1 });
    }

    #[test]
    fn test_empty_dataset() {
        let err = TextModel::train(&[], &[], names(), &TrainingConfig::default()).unwrap_err();
        assert_eq!(err, TrainingError::EmptyDataset);
    }

    #[test]
    fn test_vectorization_failure_is_reported() {
        let texts = vec!["the and".to_string(), "of it".to_string(), "the".to_string(), "and".to_string()];
        let err = TextModel::train(&texts, &[0, 1, 0, 1], names(), &TrainingConfig::default()).unwrap_err();
        assert!(matches!(err, TrainingError::Vectorization(_)));
    }

    #[test]
    fn test_count_fallback_is_opt_in() {
        let (texts, labels) = corpus();
        let config = TrainingConfig {
            min_df: 100,
            allow_count_fallback: true,
            ..TrainingConfig::default()
        };
        let (_, report) = TextModel::train(&texts, &labels, names(), &config).unwrap();
        assert!(report.used_count_fallback);
    }
}

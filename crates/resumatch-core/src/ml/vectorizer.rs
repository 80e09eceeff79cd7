//! Word n-gram vectorizer with TF-IDF or raw count weighting.

use std::collections::{BTreeMap, HashMap};

use ndarray::{Array1, Array2};

use super::text::content_tokens;
use crate::error::TrainingError;
use crate::models::config::TrainingConfig;

/// How term counts are turned into feature values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weighting {
    /// Counts scaled by smoothed inverse document frequency, L2-normalized rows.
    TfIdf,
    /// Raw term counts.
    Count,
}

/// Bag-of-n-grams vectorizer.
#[derive(Debug, Clone)]
pub struct TextVectorizer {
    weighting: Weighting,
    ngram_range: (usize, usize),
    min_df: usize,
    max_features: usize,
    vocabulary: HashMap<String, usize>,
    idf: Array1<f64>,
}

impl TextVectorizer {
    pub fn new(weighting: Weighting) -> Self {
        Self {
            weighting,
            ngram_range: (1, 1),
            min_df: 1,
            max_features: 0,
            vocabulary: HashMap::new(),
            idf: Array1::zeros(0),
        }
    }

    /// TF-IDF vectorizer configured from training settings.
    pub fn from_config(config: &TrainingConfig) -> Self {
        Self::new(Weighting::TfIdf)
            .with_ngram_range(config.ngram_min, config.ngram_max)
            .with_min_df(config.min_df)
            .with_max_features(config.max_features)
    }

    pub fn with_ngram_range(mut self, min: usize, max: usize) -> Self {
        self.ngram_range = (min.max(1), max.max(min.max(1)));
        self
    }

    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df.max(1);
        self
    }

    /// Keep only the most frequent terms (0 = unlimited).
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    pub fn weighting(&self) -> Weighting {
        self.weighting
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// N-grams of a text, stop words removed before n-gramming.
    pub fn terms(&self, text: &str) -> Vec<String> {
        let tokens: Vec<&str> = content_tokens(text).collect();
        let (min, max) = self.ngram_range;
        let mut terms = Vec::new();

        for n in min..=max {
            if n > tokens.len() {
                break;
            }
            terms.extend(tokens.windows(n).map(|w| w.join(" ")));
        }

        terms
    }

    /// Learn the vocabulary and IDF weights, then transform `documents`.
    pub fn fit_transform(&mut self, documents: &[String]) -> Result<Array2<f64>, TrainingError> {
        if documents.is_empty() {
            return Err(TrainingError::Vectorization("empty corpus".to_string()));
        }

        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        let mut term_frequency: BTreeMap<String, usize> = BTreeMap::new();

        for doc in documents {
            let terms = self.terms(doc);
            for term in &terms {
                *term_frequency.entry(term.clone()).or_insert(0) += 1;
            }
            let mut unique = terms;
            unique.sort_unstable();
            unique.dedup();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let mut kept: Vec<(&String, usize)> = document_frequency
            .iter()
            .filter(|(_, df)| **df >= self.min_df)
            .map(|(term, _)| (term, term_frequency.get(term).copied().unwrap_or(0)))
            .collect();

        if self.max_features > 0 && kept.len() > self.max_features {
            // Most frequent first, alphabetical among ties.
            kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            kept.truncate(self.max_features);
            kept.sort_by(|a, b| a.0.cmp(b.0));
        }

        if kept.is_empty() {
            return Err(TrainingError::Vectorization(format!(
                "no term reaches min_df={} in {} documents",
                self.min_df,
                documents.len()
            )));
        }

        self.vocabulary = kept
            .iter()
            .enumerate()
            .map(|(idx, (term, _))| ((*term).clone(), idx))
            .collect();

        let n = documents.len() as f64;
        self.idf = kept
            .iter()
            .map(|(term, _)| {
                let df = document_frequency[*term] as f64;
                // Smoothed: ln((1 + n) / (1 + df)) + 1
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        Ok(self.transform(documents))
    }

    /// Transform documents with the fitted vocabulary.
    pub fn transform(&self, documents: &[String]) -> Array2<f64> {
        let mut matrix = Array2::zeros((documents.len(), self.vocabulary.len()));

        for (row, doc) in documents.iter().enumerate() {
            let features = self.transform_one(doc);
            matrix.row_mut(row).assign(&features);
        }

        matrix
    }

    /// Transform one document; unseen terms are ignored.
    pub fn transform_one(&self, document: &str) -> Array1<f64> {
        let mut features = Array1::zeros(self.vocabulary.len());

        for term in self.terms(document) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                features[idx] += 1.0;
            }
        }

        if self.weighting == Weighting::TfIdf {
            features *= &self.idf;
            let norm = features.dot(&features).sqrt();
            if norm > 0.0 {
                features /= norm;
            }
        }

        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<String> {
        vec![
            "java spring sql".to_string(),
            "python machine learning".to_string(),
            "java python".to_string(),
        ]
    }

    #[test]
    fn test_terms_with_bigrams() {
        let vectorizer = TextVectorizer::new(Weighting::TfIdf).with_ngram_range(1, 2);
        assert_eq!(
            vectorizer.terms("the machine learning engineer"),
            vec!["machine", "learning", "engineer", "machine learning", "learning engineer"]
        );
    }

    #[test]
    fn test_fit_transform_shapes_and_norm() {
        let mut vectorizer = TextVectorizer::new(Weighting::TfIdf).with_ngram_range(1, 2);
        let x = vectorizer.fit_transform(&corpus()).unwrap();

        assert_eq!(x.nrows(), 3);
        assert_eq!(x.ncols(), vectorizer.vocabulary_size());
        for row in x.rows() {
            assert!((row.dot(&row) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rare_terms_weigh_more() {
        let mut vectorizer = TextVectorizer::new(Weighting::TfIdf);
        vectorizer.fit_transform(&corpus()).unwrap();

        let features = vectorizer.transform_one("java spring");
        let java = vectorizer.vocabulary["java"];
        let spring = vectorizer.vocabulary["spring"];
        assert!(features[spring] > features[java]);
    }

    #[test]
    fn test_min_df_and_max_features() {
        let mut vectorizer = TextVectorizer::new(Weighting::Count).with_min_df(2);
        vectorizer.fit_transform(&corpus()).unwrap();
        assert_eq!(vectorizer.vocabulary_size(), 2); // java, python

        let mut capped = TextVectorizer::new(Weighting::Count).with_max_features(1);
        capped.fit_transform(&corpus()).unwrap();
        assert_eq!(capped.vocabulary_size(), 1);
        assert!(capped.vocabulary.contains_key("java"));
    }

    #[test]
    fn test_empty_vocabulary_is_an_error() {
        let mut vectorizer = TextVectorizer::new(Weighting::TfIdf);
        let err = vectorizer
            .fit_transform(&["the and of".to_string(), "".to_string()])
            .unwrap_err();
        assert!(matches!(err, TrainingError::Vectorization(_)));

        assert!(vectorizer.fit_transform(&[]).is_err());
    }

    #[test]
    fn test_count_weighting_keeps_raw_counts() {
        let mut vectorizer = TextVectorizer::new(Weighting::Count);
        vectorizer.fit_transform(&corpus()).unwrap();
        let features = vectorizer.transform_one("java java unknown");
        assert_eq!(features[vectorizer.vocabulary["java"]], 2.0);
        assert_eq!(features.sum(), 2.0);
    }
}

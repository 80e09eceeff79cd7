//! Configuration structures for the screening pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the resumatch pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumatchConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Skill matching configuration.
    pub matching: MatchingConfig,

    /// Text model training configuration.
    pub training: TrainingConfig,
}

/// A single `pattern -> canonical` standardization rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermRule {
    /// Regex searched case-insensitively anywhere in the item.
    pub pattern: String,

    /// Replacement for the whole item when the pattern matches.
    pub canonical: String,
}

impl TermRule {
    pub fn new(pattern: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            canonical: canonical.into(),
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Skill standardization rules, most specific first.
    pub skill_rules: Vec<TermRule>,

    /// Designation standardization rules, most specific first.
    pub designation_rules: Vec<TermRule>,

    /// Drop records without at least one skill and one designation.
    pub require_complete_records: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            skill_rules: vec![
                TermRule::new(r"java\s*\w*", "java"),
                TermRule::new(r"python\s*\w*", "python"),
                TermRule::new(r"sql\s*\w*", "sql"),
                TermRule::new(r"aws\s*\w*", "aws"),
                TermRule::new(r"machine\s+learning", "machine learning"),
            ],
            designation_rules: vec![
                TermRule::new(r"senior\s+software", "software engineer"),
                TermRule::new(r"devops", "devops engineer"),
                TermRule::new(r"data\s+scientist", "data scientist"),
                TermRule::new(r"analyst", "data analyst"),
            ],
            require_complete_records: false,
        }
    }
}

/// Skill matching configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum overlap ratio for a positive match label (0.0 - 1.0).
    pub overlap_threshold: f64,

    /// Optional JSON catalog replacing the built-in job profiles.
    pub catalog_path: Option<PathBuf>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            overlap_threshold: 0.6,
            catalog_path: None,
        }
    }
}

/// Candidate classifier families for best-of-N selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    LogisticRegression,
    NaiveBayes,
    NearestCentroid,
}

/// Text model training configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Held-out fraction for evaluation (0.0 - 1.0).
    pub test_fraction: f64,

    /// Seed for splitting and oversampling.
    pub seed: u64,

    /// Smallest word n-gram length.
    pub ngram_min: usize,

    /// Largest word n-gram length.
    pub ngram_max: usize,

    /// Minimum number of documents a term must appear in.
    pub min_df: usize,

    /// Vocabulary size cap (0 = unlimited).
    pub max_features: usize,

    /// Retry with raw term counts when TF-IDF yields no features.
    pub allow_count_fallback: bool,

    /// Oversample minority classes when max/min class count exceeds this.
    pub oversample_ratio: f64,

    /// Cleaned résumé texts of at most this many characters are discarded.
    pub min_text_length: usize,

    /// Candidate classifiers, tried in order.
    pub classifiers: Vec<ClassifierKind>,

    /// Gradient descent epochs for logistic regression.
    pub epochs: usize,

    /// Gradient descent step size for logistic regression.
    pub learning_rate: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.25,
            seed: 42,
            ngram_min: 1,
            ngram_max: 2,
            min_df: 1,
            max_features: 5000,
            allow_count_fallback: false,
            oversample_ratio: 3.0,
            min_text_length: 20,
            classifiers: vec![
                ClassifierKind::LogisticRegression,
                ClassifierKind::NaiveBayes,
                ClassifierKind::NearestCentroid,
            ],
            epochs: 300,
            learning_rate: 0.5,
        }
    }
}

impl ResumatchConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !(0.0..=1.0).contains(&self.matching.overlap_threshold) {
            issues.push(format!(
                "matching.overlap_threshold must be within [0, 1], got {}",
                self.matching.overlap_threshold
            ));
        }
        if !(self.training.test_fraction > 0.0 && self.training.test_fraction < 1.0) {
            issues.push(format!(
                "training.test_fraction must be within (0, 1), got {}",
                self.training.test_fraction
            ));
        }
        if self.training.ngram_min == 0 || self.training.ngram_min > self.training.ngram_max {
            issues.push(format!(
                "training n-gram range {}..={} is invalid",
                self.training.ngram_min, self.training.ngram_max
            ));
        }
        if self.training.classifiers.is_empty() {
            issues.push("training.classifiers must name at least one classifier".to_string());
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ResumatchConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.matching.overlap_threshold, 0.6);
        assert_eq!(config.training.test_fraction, 0.25);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: ResumatchConfig =
            serde_json::from_str(r#"{"matching": {"overlap_threshold": 0.5}}"#).unwrap();
        assert_eq!(config.matching.overlap_threshold, 0.5);
        assert_eq!(config.training.seed, 42);
        assert_eq!(config.extraction.skill_rules.len(), 5);
    }

    #[test]
    fn test_validate_reports_bad_ranges() {
        let mut config = ResumatchConfig::default();
        config.matching.overlap_threshold = 1.5;
        config.training.ngram_min = 3;
        assert_eq!(config.validate().len(), 2);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = ResumatchConfig::default();
        config.training.seed = 7;
        config.save(&path).unwrap();

        assert_eq!(ResumatchConfig::from_file(&path).unwrap(), config);
    }
}

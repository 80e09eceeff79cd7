//! Résumé-to-job skill matching.
//!
//! Training labels come from rule-based skill overlap; predictions come from a
//! text classifier trained on those labels. Both signals are reported side by
//! side in a [`MatchResult`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{MatchError, Result, TrainingError};
use crate::extract::RecordExtractor;
use crate::extract::normalize::normalize_item;
use crate::ml::model::{TextModel, TrainingReport};
use crate::models::config::{MatchingConfig, ResumatchConfig, TrainingConfig};
use crate::models::document::Document;
use crate::models::profile::{JobProfile, MatchResult, default_catalog, load_catalog};
use crate::models::record::ExtractedRecord;

const CLASS_NAMES: [&str; 2] = ["no match", "match"];

/// One labeled sample: a résumé's skill text and whether it fits a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub text: String,
    pub label: bool,
}

impl TrainingExample {
    pub fn new(text: impl Into<String>, label: bool) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// Unigrams and adjacent bigrams of already normalized text.
fn ngram_terms(text: &str, out: &mut BTreeSet<String>) {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    out.extend(tokens.iter().map(|t| t.to_string()));
    out.extend(tokens.windows(2).map(|pair| pair.join(" ")));
}

/// Terms of a free-text résumé for set comparison with required skills.
pub fn skill_terms(text: &str) -> BTreeSet<String> {
    let mut terms = BTreeSet::new();
    ngram_terms(&normalize_item(text), &mut terms);
    terms
}

/// Terms of an extracted record: every skill plus its unigrams and bigrams.
pub fn record_terms(record: &ExtractedRecord) -> BTreeSet<String> {
    let mut terms = BTreeSet::new();
    for skill in &record.skills {
        terms.insert(skill.clone());
        ngram_terms(skill, &mut terms);
    }
    terms
}

/// Fraction of `required` present in `terms`; 0 when nothing is required.
pub fn overlap_ratio<'a>(required: impl IntoIterator<Item = &'a String>, terms: &BTreeSet<String>) -> f64 {
    let mut total = 0usize;
    let mut hits = 0usize;
    for skill in required {
        total += 1;
        if terms.contains(skill) {
            hits += 1;
        }
    }
    if total == 0 { 0.0 } else { hits as f64 / total as f64 }
}

/// Label every (record, profile) pair by skill overlap.
///
/// Produces `records.len() * profiles.len()` examples, record-major.
pub fn build_training_set(
    records: &[ExtractedRecord],
    profiles: &[JobProfile],
    threshold: f64,
) -> Vec<TrainingExample> {
    let mut examples = Vec::with_capacity(records.len() * profiles.len());
    for record in records {
        let terms = record_terms(record);
        let text = record.skill_text();
        for profile in profiles {
            let overlap = overlap_ratio(&profile.required_skills, &terms);
            examples.push(TrainingExample::new(text.clone(), overlap >= threshold));
        }
    }
    examples
}

/// Matches résumés against a job catalog.
///
/// The model is written once per [`SkillMatcher::train`] call and only read
/// by [`SkillMatcher::predict_match`].
#[derive(Debug)]
pub struct SkillMatcher {
    profiles: Vec<JobProfile>,
    matching: MatchingConfig,
    training: TrainingConfig,
    model: Option<TextModel>,
    report: Option<TrainingReport>,
}

impl SkillMatcher {
    pub fn new(profiles: Vec<JobProfile>, config: &ResumatchConfig) -> Self {
        Self {
            profiles,
            matching: config.matching.clone(),
            training: config.training.clone(),
            model: None,
            report: None,
        }
    }

    /// Matcher over the catalog named in the config, or the built-in one.
    pub fn from_config(config: &ResumatchConfig) -> Result<Self> {
        let profiles = match &config.matching.catalog_path {
            Some(path) => {
                let profiles = load_catalog(path)?;
                info!("Loaded {} job profiles from {}", profiles.len(), path.display());
                profiles
            }
            None => default_catalog(),
        };
        Ok(Self::new(profiles, config))
    }

    pub fn with_default_catalog() -> Self {
        Self::new(default_catalog(), &ResumatchConfig::default())
    }

    pub fn profiles(&self) -> &[JobProfile] {
        &self.profiles
    }

    pub fn find_profile(&self, title: &str) -> Option<&JobProfile> {
        self.profiles.iter().find(|p| p.has_title(title))
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Report of the last successful training run.
    pub fn report(&self) -> Option<&TrainingReport> {
        self.report.as_ref()
    }

    /// Training examples for `records` against this matcher's catalog.
    pub fn build_training_set(&self, records: &[ExtractedRecord]) -> Vec<TrainingExample> {
        build_training_set(records, &self.profiles, self.matching.overlap_threshold)
    }

    /// Fit the match classifier, replacing any previous model.
    ///
    /// On failure the previous model, if any, is kept.
    pub fn train(&mut self, examples: &[TrainingExample]) -> Result<&TrainingReport> {
        if examples.is_empty() {
            return Err(TrainingError::EmptyDataset.into());
        }

        let texts: Vec<String> = examples.iter().map(|e| normalize_item(&e.text)).collect();
        let labels: Vec<usize> = examples.iter().map(|e| usize::from(e.label)).collect();
        let positives = labels.iter().filter(|&&l| l == 1).count();
        info!(
            "Training skill matcher on {} examples ({} matching)",
            examples.len(),
            positives
        );

        let names = CLASS_NAMES.iter().map(|s| s.to_string()).collect();
        let (model, report) = TextModel::train(&texts, &labels, names, &self.training)?;

        self.model = Some(model);
        Ok(self.report.insert(report))
    }

    /// Extract records from `documents`, label them against the catalog, and train.
    pub fn fit_documents(
        &mut self,
        documents: &[Document],
        extractor: &RecordExtractor,
    ) -> Result<&TrainingReport> {
        let (records, batch) = extractor.extract_batch(documents);
        debug!(
            "Extracted {} of {} documents for matcher training",
            batch.extracted(),
            documents.len()
        );
        let examples = self.build_training_set(&records);
        self.train(&examples)
    }

    /// Classify `resume_text` against the profile titled `job_title`.
    pub fn predict_match(&self, resume_text: &str, job_title: &str) -> Result<MatchResult> {
        let model = self.model.as_ref().ok_or(MatchError::NotTrained)?;
        let profile = self
            .find_profile(job_title)
            .ok_or_else(|| MatchError::UnknownJob(job_title.to_string()))?;

        let text = normalize_item(resume_text);
        let (class, confidence) = model.predict(&text);

        let terms = skill_terms(&text);
        let required = profile.required_set();
        let matched_skills: BTreeSet<String> = required.intersection(&terms).cloned().collect();
        let missing_skills: BTreeSet<String> = required.difference(&terms).cloned().collect();

        debug!(
            "'{}': class {} ({:.2}), {}/{} skills present",
            profile.title,
            class,
            confidence,
            matched_skills.len(),
            required.len()
        );

        Ok(MatchResult {
            job_title: profile.title.clone(),
            is_match: class == 1,
            confidence,
            overlap: overlap_ratio(&profile.required_skills, &terms),
            matched_skills,
            missing_skills,
            required_skills: profile.required_skills.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResumatchError;
    use pretty_assertions::assert_eq;

    fn record(skills: &[&str]) -> ExtractedRecord {
        ExtractedRecord {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn trained_matcher() -> SkillMatcher {
        let records = vec![
            record(&["java", "spring", "hibernate", "sql"]),
            record(&["java", "spring", "sql", "rest api"]),
            record(&["python", "machine learning", "pandas", "numpy"]),
            record(&["python", "pandas", "numpy", "data analysis"]),
            record(&["docker", "kubernetes", "aws", "terraform"]),
            record(&["javascript", "react", "html", "css"]),
            record(&["sql", "oracle", "performance tuning"]),
            record(&["painting", "pottery"]),
        ];
        let mut matcher = SkillMatcher::with_default_catalog();
        let examples = matcher.build_training_set(&records);
        matcher.train(&examples).unwrap();
        matcher
    }

    #[test]
    fn test_overlap_threshold() {
        let profile = JobProfile::new("Backend", ["java", "sql", "spring"], "");
        let examples = build_training_set(
            &[record(&["java", "sql"]), record(&["java"])],
            &[profile],
            0.6,
        );
        assert_eq!(examples.len(), 2);
        assert!(examples[0].label); // 2/3
        assert!(!examples[1].label); // 1/3
    }

    #[test]
    fn test_training_set_is_records_times_profiles() {
        let records = vec![record(&["java"]), record(&["python"]), record(&[])];
        let examples = build_training_set(&records, &default_catalog(), 0.6);
        assert_eq!(examples.len(), 3 * 5);
    }

    #[test]
    fn test_multi_word_skills_match() {
        let terms = record_terms(&record(&["machine learning", "python"]));
        assert!(terms.contains("machine learning"));
        assert!(terms.contains("machine"));

        let terms = skill_terms("Strong in Machine Learning, Python and NumPy");
        assert!(terms.contains("machine learning"));
        assert!(terms.contains("numpy"));
    }

    #[test]
    fn test_empty_requirements_never_match() {
        let profile = JobProfile::new("Anything", Vec::<String>::new(), "");
        let examples = build_training_set(&[record(&["java"])], &[profile], 0.6);
        assert_eq!(examples.len(), 1);
        assert!(!examples[0].label);
        assert_eq!(overlap_ratio(&Vec::<String>::new(), &set(&["java"])), 0.0);
    }

    #[test]
    fn test_predict_before_training() {
        let matcher = SkillMatcher::with_default_catalog();
        let err = matcher.predict_match("java", "Java Developer").unwrap_err();
        assert!(matches!(err, ResumatchError::Match(MatchError::NotTrained)));

        // state is checked before the title lookup
        let err = matcher.predict_match("java", "Astronaut").unwrap_err();
        assert!(matches!(err, ResumatchError::Match(MatchError::NotTrained)));
    }

    #[test]
    fn test_unknown_job_title() {
        let matcher = trained_matcher();
        let err = matcher.predict_match("java spring", "Astronaut").unwrap_err();
        assert!(matches!(err, ResumatchError::Match(MatchError::UnknownJob(ref t)) if t == "Astronaut"));
    }

    #[test]
    fn test_predict_match_reports_both_signals() {
        let matcher = trained_matcher();
        assert!(matcher.is_trained());
        assert!(matcher.report().is_some());

        let result = matcher
            .predict_match("Java developer: Spring, Hibernate and SQL", "java developer")
            .unwrap();

        assert_eq!(result.job_title, "Java Developer");
        assert_eq!(result.matched_skills, set(&["hibernate", "java", "spring", "sql"]));
        assert_eq!(result.missing_skills, set(&["rest api"]));
        assert!((result.overlap - 0.8).abs() < 1e-12);
        assert!(result.confidence >= 0.5 && result.confidence <= 1.0);
    }

    #[test]
    fn test_single_label_training_fails() {
        let mut matcher = SkillMatcher::with_default_catalog();
        let examples = vec![TrainingExample::new("java", false), TrainingExample::new("python", false)];
        let err = matcher.train(&examples).unwrap_err();
        assert!(matches!(
            err,
            ResumatchError::Training(TrainingError::Degenerate { classes: 1 })
        ));
        assert!(!matcher.is_trained());
    }
}

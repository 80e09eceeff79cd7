//! Job profiles and match results.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extract::normalize::normalize_item;

/// A target job with its required skills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "JobProfileSpec")]
pub struct JobProfile {
    /// Job title, matched case-insensitively.
    pub title: String,

    /// Normalized required skills in declaration order, without duplicates.
    pub required_skills: Vec<String>,

    /// Human-readable description.
    pub description: String,
}

/// Wire shape of a catalog entry before normalization.
#[derive(Debug, Clone, Deserialize)]
struct JobProfileSpec {
    title: String,
    #[serde(default)]
    required_skills: Vec<String>,
    #[serde(default)]
    description: String,
}

impl From<JobProfileSpec> for JobProfile {
    fn from(spec: JobProfileSpec) -> Self {
        JobProfile::new(spec.title, spec.required_skills, spec.description)
    }
}

impl JobProfile {
    /// Build a profile, normalizing and de-duplicating the required skills.
    pub fn new<I, S>(title: impl Into<String>, required_skills: I, description: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = BTreeSet::new();
        let required_skills = required_skills
            .into_iter()
            .map(|s| normalize_item(s.as_ref()))
            .filter(|s| !s.is_empty())
            .filter(|s| seen.insert(s.clone()))
            .collect();

        Self {
            title: title.into(),
            required_skills,
            description: description.into(),
        }
    }

    /// Required skills as a set.
    pub fn required_set(&self) -> BTreeSet<String> {
        self.required_skills.iter().cloned().collect()
    }

    /// Case-insensitive title comparison.
    pub fn has_title(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }
}

/// Built-in job catalog.
pub fn default_catalog() -> Vec<JobProfile> {
    vec![
        JobProfile::new(
            "Java Developer",
            ["java", "spring", "hibernate", "sql", "rest api"],
            "We are looking for a Java developer with experience in Spring framework and database technologies.",
        ),
        JobProfile::new(
            "Data Scientist",
            ["python", "machine learning", "pandas", "numpy", "data analysis"],
            "Seeking a data scientist with strong Python skills and machine learning experience.",
        ),
        JobProfile::new(
            "DevOps Engineer",
            ["docker", "kubernetes", "aws", "ci/cd", "terraform"],
            "Looking for a DevOps engineer with cloud and containerization experience.",
        ),
        JobProfile::new(
            "Web Developer",
            ["javascript", "react", "html", "css", "node.js"],
            "Front-end developer position requiring modern JavaScript frameworks.",
        ),
        JobProfile::new(
            "Database Administrator",
            ["sql", "oracle", "database management", "performance tuning"],
            "DBA position requiring expertise in SQL and database optimization.",
        ),
    ]
}

/// Load a catalog from a JSON array of `{title, required_skills, description}`.
pub fn load_catalog(path: &Path) -> Result<Vec<JobProfile>> {
    let content = std::fs::read_to_string(path)?;
    let profiles: Vec<JobProfile> = serde_json::from_str(&content)?;
    Ok(profiles)
}

/// Outcome of a single match query.
///
/// `is_match`/`confidence` come from the classifier; `matched_skills` and
/// `missing_skills` come from direct set comparison. They may disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub job_title: String,
    #[serde(rename = "match")]
    pub is_match: bool,
    pub confidence: f64,
    pub matched_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
    pub required_skills: Vec<String>,
    /// Fraction of required skills found by the rule-based comparison.
    pub overlap: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_required_skills_are_normalized() {
        let profile = JobProfile::new("Ops", ["AWS ", "aws", "CI/CD", "  "], "");
        assert_eq!(profile.required_skills, vec!["aws".to_string(), "cicd".to_string()]);
    }

    #[test]
    fn test_title_match_ignores_case() {
        let profile = JobProfile::new("Java Developer", ["java"], "");
        assert!(profile.has_title("java developer"));
        assert!(profile.has_title("JAVA DEVELOPER"));
        assert!(!profile.has_title("java"));
    }

    #[test]
    fn test_catalog_deserializes_through_normalizer() {
        let json = r#"[{"title": "Analyst", "required_skills": ["SQL", "Excel!"], "description": "d"}]"#;
        let profiles: Vec<JobProfile> = serde_json::from_str(json).unwrap();
        assert_eq!(profiles[0].required_skills, vec!["sql".to_string(), "excel".to_string()]);
    }

    #[test]
    fn test_default_catalog() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.iter().all(|p| !p.required_skills.is_empty()));
    }
}

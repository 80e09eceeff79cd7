//! Normalized per-document entities.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Fields extracted from one document.
///
/// Every set holds normalized strings, so duplicates are impossible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    pub names: BTreeSet<String>,
    pub skills: BTreeSet<String>,
    pub degrees: BTreeSet<String>,
    pub colleges: BTreeSet<String>,
    pub locations: BTreeSet<String>,
    pub companies: BTreeSet<String>,
    pub designations: BTreeSet<String>,

    /// First years-of-experience mention in the raw content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<f64>,
}

impl ExtractedRecord {
    /// Record has at least one skill and one designation.
    pub fn is_complete(&self) -> bool {
        !self.skills.is_empty() && !self.designations.is_empty()
    }

    /// Skills joined into one whitespace-separated text, in sorted order.
    pub fn skill_text(&self) -> String {
        self.skills
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_is_complete() {
        let mut record = ExtractedRecord {
            skills: set(&["java"]),
            ..Default::default()
        };
        assert!(!record.is_complete());

        record.designations = set(&["software engineer"]);
        assert!(record.is_complete());
    }

    #[test]
    fn test_skill_text_is_sorted() {
        let record = ExtractedRecord {
            skills: set(&["sql", "java", "machine learning"]),
            ..Default::default()
        };
        assert_eq!(record.skill_text(), "java machine learning sql");
    }
}

//! Text normalization and regex-driven term standardization.

use std::collections::BTreeSet;

use regex::{Regex, RegexBuilder};

use super::patterns::{NON_TERM_CHARS, WHITESPACE_RUN};
use crate::models::config::TermRule;

/// Canonicalize one item: lowercase, trim, drop characters other than word
/// chars, whitespace and hyphens, collapse whitespace.
pub fn normalize_item(item: &str) -> String {
    let lowered = item.to_lowercase();
    let stripped = NON_TERM_CHARS.replace_all(lowered.trim(), "");
    WHITESPACE_RUN.replace_all(&stripped, " ").trim().to_string()
}

/// Normalize every item and de-duplicate. Items that normalize to nothing
/// are dropped.
pub fn normalize<I, S>(items: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| normalize_item(item.as_ref()))
        .filter(|item| !item.is_empty())
        .collect()
}

/// Ordered `pattern -> canonical` rules. The first matching rule wins.
#[derive(Debug, Clone)]
pub struct TermStandardizer {
    rules: Vec<(Regex, String)>,
}

impl TermStandardizer {
    /// Compile rules, preserving their order. Canonical terms are normalized
    /// so they merge with already-normalized items.
    pub fn new(rules: &[TermRule]) -> Result<Self, regex::Error> {
        let rules = rules
            .iter()
            .map(|rule| {
                RegexBuilder::new(&rule.pattern)
                    .case_insensitive(true)
                    .build()
                    .map(|re| (re, normalize_item(&rule.canonical)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    /// A standardizer that passes every item through.
    pub fn identity() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Replace `item` with the canonical term of the first matching rule.
    pub fn standardize(&self, item: &str) -> String {
        self.rules
            .iter()
            .find(|(pattern, _)| pattern.is_match(item))
            .map(|(_, canonical)| canonical.clone())
            .unwrap_or_else(|| item.to_string())
    }

    /// Standardize a set of items; collapsed synonyms merge.
    pub fn standardize_all<'a, I>(&self, items: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        items.into_iter().map(|item| self.standardize(item)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::ExtractionConfig;
    use pretty_assertions::assert_eq;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_item_steps() {
        assert_eq!(normalize_item("  Machine   LEARNING!! "), "machine learning");
        assert_eq!(normalize_item("Node.js"), "nodejs");
        assert_eq!(normalize_item("Team-Player"), "team-player");
        assert_eq!(normalize_item("• C++\n"), "c");
        assert_eq!(normalize_item("Database\nManagement\tSystem"), "database management system");
    }

    #[test]
    fn test_normalize_deduplicates() {
        let out = normalize(["Java", "java ", "JAVA", "SQL", "", "!!"]);
        assert_eq!(out, set(&["java", "sql"]));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = ["  Hello,   World ", "-dash-", "résumé écrit", "a\u{a0}b", "x_y z"];
        let once = normalize(inputs);
        let twice = normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_first_rule_wins() {
        let standardizer = TermStandardizer::new(&[
            TermRule::new(r"java\w*", "java"),
            TermRule::new(r".*", "other"),
        ])
        .unwrap();

        assert_eq!(standardizer.standardize("javascript"), "java");
        assert_eq!(standardizer.standardize("rust"), "other");
    }

    #[test]
    fn test_canonical_terms_are_normalized() {
        let standardizer = TermStandardizer::new(&[TermRule::new(r"java", "Java")]).unwrap();

        assert_eq!(standardizer.standardize("core java"), "java");
        assert_eq!(standardizer.standardize_all(&set(&["core java", "java"])), set(&["java"]));
    }

    #[test]
    fn test_rule_order_is_significant() {
        let general_first = TermStandardizer::new(&[
            TermRule::new(r"analyst", "data analyst"),
            TermRule::new(r"business\s+analyst", "business analyst"),
        ])
        .unwrap();
        assert_eq!(general_first.standardize("senior business analyst"), "data analyst");
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let standardizer = TermStandardizer::new(&[TermRule::new(r"python", "python")]).unwrap();
        assert_eq!(standardizer.standardize("Advanced PYTHON scripting"), "python");
        assert_eq!(standardizer.standardize("ruby"), "ruby");
    }

    #[test]
    fn test_default_skill_rules_collapse_synonyms() {
        let standardizer = TermStandardizer::new(&ExtractionConfig::default().skill_rules).unwrap();
        let items = set(&["java ee", "core java", "mysql", "sql server", "excel"]);
        assert_eq!(standardizer.standardize_all(&items), set(&["excel", "java", "sql"]));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        assert!(TermStandardizer::new(&[TermRule::new(r"(unclosed", "x")]).is_err());
    }

    #[test]
    fn test_identity() {
        let standardizer = TermStandardizer::identity();
        assert!(standardizer.is_empty());
        assert_eq!(standardizer.standardize("anything"), "anything");
    }
}

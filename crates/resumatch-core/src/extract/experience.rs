//! Years-of-experience extraction.

use super::patterns::EXPERIENCE;
use super::{ExtractionMatch, FieldExtractor};

/// Experience field extractor.
pub struct ExperienceExtractor;

impl ExperienceExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExperienceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ExperienceExtractor {
    type Output = ExtractionMatch<f64>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        EXPERIENCE
            .captures_iter(text)
            .filter_map(|caps| {
                let full_match = caps.get(0)?;
                let years = parse_years(&caps[1])?;
                Some(
                    ExtractionMatch::new(years, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                )
            })
            .collect()
    }
}

/// First years-of-experience mention in `text`.
///
/// Later mentions are ignored even when they differ.
pub fn extract_years(text: &str) -> Option<f64> {
    ExperienceExtractor::new().extract(text).map(|m| m.value)
}

fn parse_years(s: &str) -> Option<f64> {
    s.trim_end_matches('.').parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_years_basic() {
        assert_eq!(extract_years("5 years of experience in Java"), Some(5.0));
        assert_eq!(extract_years("no mention here"), None);
    }

    #[test]
    fn test_extract_years_units() {
        assert_eq!(extract_years("Worked 3.5 yrs at Acme"), Some(3.5));
        assert_eq!(extract_years("about 1 YEAR"), Some(1.0));
        assert_eq!(extract_years("2yr contract"), Some(2.0));
    }

    #[test]
    fn test_first_mention_wins() {
        let text = "Java (Less than 1 year)\nOverall 12 years of experience";
        assert_eq!(extract_years(text), Some(1.0));

        let all = ExperienceExtractor::new().extract_all(text);
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].value, 12.0);
    }

    #[test]
    fn test_trailing_dot_number() {
        assert_eq!(extract_years("7. years"), Some(7.0));
    }

    #[test]
    fn test_match_position() {
        let m = ExperienceExtractor::new().extract("has 4 years").unwrap();
        assert_eq!(m.position, Some((4, 11)));
        assert_eq!(m.source, "4 years");
    }
}

//! Common regex patterns for résumé text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Years of experience: "5 years", "3.5 yrs of experience", "1yr"
    pub static ref EXPERIENCE: Regex = Regex::new(
        r"(?i)(\d+\.?\d*)\s*(?:years?|yrs?)\s*(?:of\s*experience)?"
    ).unwrap();

    // Anything that is not a word char, whitespace or hyphen
    pub static ref NON_TERM_CHARS: Regex = Regex::new(r"[^\w\s-]").unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    // Contact and profile lines dropped before role classification
    pub static ref CONTACT_LINE: Regex = Regex::new(
        r"(?i)\b(?:email|phone|location|indeed|linkedin|https?://\S+)\b.*?\n"
    ).unwrap();

    pub static ref NON_ALPHA: Regex = Regex::new(r"[^a-zA-Z\s]").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_pattern_variants() {
        for text in ["5 years", "5 Years of Experience", "3.5yrs", "1 yr", "10 YEARS"] {
            assert!(EXPERIENCE.is_match(text), "{text}");
        }
        assert!(!EXPERIENCE.is_match("five years"));
    }

    #[test]
    fn test_contact_line_pattern() {
        let text = "John\nEmail me on Indeed: indeed.com/r/x\nSKILLS\n";
        assert_eq!(CONTACT_LINE.replace_all(text, ""), "John\nSKILLS\n");
    }
}

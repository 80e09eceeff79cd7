//! Text cleanup ahead of vectorization.

use std::collections::HashSet;

use lazy_static::lazy_static;

use crate::extract::patterns::{CONTACT_LINE, NON_ALPHA, WHITESPACE_RUN};

lazy_static! {
    /// English stop words dropped by the vectorizer.
    pub static ref STOP_WORDS: HashSet<&'static str> = [
        "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
        "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
        "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
        "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
        "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself",
        "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on",
        "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same",
        "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
        "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
        "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
        "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
        "yourself", "yourselves",
    ]
    .into_iter()
    .collect();
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

/// Clean full résumé content for role classification.
///
/// Drops contact/profile lines, keeps ASCII letters only, lowercases and
/// collapses whitespace. Only texts longer than `min_length` characters
/// survive.
pub fn clean_content(text: &str, min_length: usize) -> Option<String> {
    let without_contacts = CONTACT_LINE.replace_all(text, "");
    let letters = NON_ALPHA.replace_all(&without_contacts, " ");
    let cleaned = WHITESPACE_RUN
        .replace_all(&letters, " ")
        .trim()
        .to_lowercase();

    if cleaned.len() <= min_length {
        None
    } else {
        Some(cleaned)
    }
}

/// Whitespace tokens with stop words removed.
pub fn content_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace().filter(|t| !is_stop_word(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_content() {
        let text = "Jane Doe\nEmail me on Indeed: indeed.com/r/jane\nSenior C++ Developer, 5 years\n";
        assert_eq!(
            clean_content(text, 10),
            Some("jane doe senior c developer years".to_string())
        );
    }

    #[test]
    fn test_clean_content_too_short() {
        assert_eq!(clean_content("Hi there!", 20), None);
        assert_eq!(clean_content("12345 67890 !!!", 1), None);
    }

    #[test]
    fn test_clean_content_length_is_strict() {
        assert_eq!(clean_content("abcde fghij klmno pq", 20), None);
        assert_eq!(
            clean_content("abcde fghij klmno pqr", 20),
            Some("abcde fghij klmno pqr".to_string())
        );
    }

    #[test]
    fn test_content_tokens_drop_stop_words() {
        let tokens: Vec<_> = content_tokens("the java and the sql of it").collect();
        assert_eq!(tokens, vec!["java", "sql"]);
    }
}

//! Keyword extractor — normalizes raw resume text into a comparable form.
//!
//! Both normalized representations are produced up front: the lower-cased
//! full text (the substring search buffer) and the set of lower-cased tokens
//! (maximal runs of alphanumeric characters and underscore). Which one the
//! scorer consults depends on the configured `MatchMode`.

use std::collections::HashSet;

/// The normalized form of one resume. Pure data, no I/O behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedResume {
    text: String,
    tokens: HashSet<String>,
}

/// Normalizes raw resume text. Deterministic: the same input always yields
/// the same output. Empty or whitespace-only input yields a trivial form,
/// not an error.
pub fn extract(raw: &str) -> ExtractedResume {
    let text = raw.to_lowercase();
    let tokens = text
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect();
    ExtractedResume { text, tokens }
}

impl ExtractedResume {
    /// Substring mode: does the lower-cased keyword appear anywhere as
    /// contiguous text? Matches multi-word phrases, and also matches inside
    /// larger words ("sql" in "mysql").
    pub fn contains_phrase(&self, keyword_lower: &str) -> bool {
        self.text.contains(keyword_lower)
    }

    /// Token-set mode: is the lower-cased keyword one of the whole extracted
    /// tokens? Multi-word keywords can never match here.
    pub fn contains_token(&self, keyword_lower: &str) -> bool {
        self.tokens.contains(keyword_lower)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_split_on_non_word_boundaries() {
        let extracted = extract("Python, SQL; rock-solid C++ (3 yrs)");
        assert!(extracted.contains_token("python"));
        assert!(extracted.contains_token("sql"));
        assert!(extracted.contains_token("rock"));
        assert!(extracted.contains_token("solid"));
        assert!(extracted.contains_token("3"));
        assert!(!extracted.contains_token("rock-solid"));
    }

    #[test]
    fn test_underscore_is_part_of_a_token() {
        let extracted = extract("maintains legacy_etl_job nightly");
        assert!(extracted.contains_token("legacy_etl_job"));
        assert!(!extracted.contains_token("legacy"));
    }

    #[test]
    fn test_lowercases_unicode() {
        let extracted = extract("Später MÜNCHEN");
        assert!(extracted.contains_token("später"));
        assert!(extracted.contains_phrase("münchen"));
    }

    #[test]
    fn test_empty_and_whitespace_input_yield_trivial_form() {
        assert!(extract("").is_empty());
        assert!(extract("   \n\t  ").is_empty());
    }

    #[test]
    fn test_phrase_lookup_spans_token_boundaries() {
        let extracted = extract("Built Machine Learning pipelines");
        assert!(extracted.contains_phrase("machine learning"));
        assert!(!extracted.contains_token("machine learning"));
    }

    #[test]
    fn test_deterministic() {
        let raw = "Senior Engineer — Python, SQL, Kubernetes";
        assert_eq!(extract(raw), extract(raw));
    }
}

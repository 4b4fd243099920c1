//! Scorer — percentage match between a normalized resume and a keyword
//! profile, plus the matched/missing keyword partition.
//!
//! The canonical matching mode is `Substring`: a keyword matches wherever it
//! appears as contiguous lower-cased text, so multi-word phrases work at the
//! cost of matches inside larger words ("sql" in "mysql"). `TokenSet`
//! (whole-token matches only, no full-text fallback) is selectable at
//! startup via `MATCH_MODE` and mirrors the behavior of strict tokenizing
//! screeners. The mode is fixed for the life of the process.

use serde::{Deserialize, Serialize};

use crate::scoring::extractor::ExtractedResume;
use crate::scoring::profile::KeywordProfile;
use crate::scoring::ScoreError;

/// Keyword matching strategy. The two modes are not equivalent; see the
/// module docs for the trade-off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    #[default]
    Substring,
    TokenSet,
}

impl std::str::FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "substring" => Ok(MatchMode::Substring),
            "token_set" | "token-set" => Ok(MatchMode::TokenSet),
            other => Err(format!(
                "unknown match mode '{other}' (expected 'substring' or 'token_set')"
            )),
        }
    }
}

/// Output of one scoring operation. `score` keeps full floating-point
/// precision; two-decimal rounding happens only at presentation time so
/// history averaging does not compound rounding error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub score: f64,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
}

/// Scores a normalized resume against a keyword profile.
///
/// Every keyword is tested independently — a match never consumes text, so
/// overlapping keyword phrases can all match at once. `matched` and
/// `missing` partition the profile's keywords in profile order. A profile
/// with no keywords is refused rather than dividing by zero.
pub fn score_resume(
    extracted: &ExtractedResume,
    profile: &KeywordProfile,
    mode: MatchMode,
) -> Result<ScoreResult, ScoreError> {
    if profile.keywords.is_empty() {
        return Err(ScoreError::InvalidProfile(profile.role.clone()));
    }

    let mut matched = Vec::new();
    let mut missing = Vec::new();

    for keyword in &profile.keywords {
        let keyword_lower = keyword.to_lowercase();
        let hit = match mode {
            MatchMode::Substring => extracted.contains_phrase(&keyword_lower),
            MatchMode::TokenSet => extracted.contains_token(&keyword_lower),
        };
        if hit {
            matched.push(keyword.clone());
        } else {
            missing.push(keyword.clone());
        }
    }

    let score = matched.len() as f64 / profile.keywords.len() as f64 * 100.0;

    Ok(ScoreResult {
        score,
        matched_keywords: matched,
        missing_keywords: missing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::extractor::extract;

    fn profile(keywords: &[&str]) -> KeywordProfile {
        KeywordProfile::new("Data Scientist", keywords.to_vec()).unwrap()
    }

    const SAMPLE: &str = "Experienced in Python and SQL, strong communication skills, \
                          built data analysis pipelines.";

    #[test]
    fn test_substring_scenario_four_of_five() {
        let p = profile(&["python", "sql", "communication", "machine learning", "data analysis"]);
        let result = score_resume(&extract(SAMPLE), &p, MatchMode::Substring).unwrap();
        assert_eq!(
            result.matched_keywords,
            vec!["python", "sql", "communication", "data analysis"]
        );
        assert_eq!(result.missing_keywords, vec!["machine learning"]);
        assert_eq!(result.score, 80.0);
    }

    #[test]
    fn test_case_insensitive_match() {
        let p = profile(&["python"]);
        let result = score_resume(&extract("PYTHON developer"), &p, MatchMode::Substring).unwrap();
        assert_eq!(result.matched_keywords, vec!["python"]);
        assert_eq!(result.score, 100.0);
    }

    #[test]
    fn test_token_set_mode_cannot_match_multiword_phrase() {
        let p = profile(&["machine learning"]);
        let extracted = extract("skilled in machine learning techniques");

        let token_set = score_resume(&extracted, &p, MatchMode::TokenSet).unwrap();
        assert!(token_set.matched_keywords.is_empty());
        assert_eq!(token_set.score, 0.0);

        let substring = score_resume(&extracted, &p, MatchMode::Substring).unwrap();
        assert_eq!(substring.matched_keywords, vec!["machine learning"]);
    }

    #[test]
    fn test_substring_matches_inside_larger_word_token_set_does_not() {
        let p = profile(&["sql"]);
        let extracted = extract("administered MySQL clusters");

        let substring = score_resume(&extracted, &p, MatchMode::Substring).unwrap();
        assert_eq!(substring.score, 100.0);

        let token_set = score_resume(&extracted, &p, MatchMode::TokenSet).unwrap();
        assert_eq!(token_set.score, 0.0);
    }

    #[test]
    fn test_empty_profile_is_refused_never_nan() {
        let empty = KeywordProfile {
            role: "Empty".to_string(),
            keywords: vec![],
        };
        let err = score_resume(&extract(SAMPLE), &empty, MatchMode::Substring).unwrap_err();
        assert_eq!(err, ScoreError::InvalidProfile("Empty".to_string()));
    }

    #[test]
    fn test_empty_text_is_a_valid_zero_result() {
        let p = profile(&["python", "sql"]);
        for mode in [MatchMode::Substring, MatchMode::TokenSet] {
            let result = score_resume(&extract(""), &p, mode).unwrap();
            assert_eq!(result.score, 0.0);
            assert!(result.matched_keywords.is_empty());
            assert_eq!(result.missing_keywords, p.keywords);
        }
    }

    #[test]
    fn test_score_is_bounded() {
        let p = profile(&["python", "sql", "go", "java"]);
        for text in ["", "python", SAMPLE, "python sql go java python"] {
            let result = score_resume(&extract(text), &p, MatchMode::Substring).unwrap();
            assert!((0.0..=100.0).contains(&result.score), "score {}", result.score);
        }
    }

    #[test]
    fn test_matched_and_missing_partition_the_keywords() {
        let p = profile(&["python", "sql", "kafka", "communication"]);
        let result = score_resume(&extract(SAMPLE), &p, MatchMode::Substring).unwrap();

        let mut union: Vec<&String> = result
            .matched_keywords
            .iter()
            .chain(result.missing_keywords.iter())
            .collect();
        union.sort();
        let mut expected: Vec<&String> = p.keywords.iter().collect();
        expected.sort();
        assert_eq!(union, expected);

        for keyword in &result.matched_keywords {
            assert!(!result.missing_keywords.contains(keyword));
        }
    }

    #[test]
    fn test_missing_recomputed_from_matched_agrees() {
        let p = profile(&["python", "sql", "kafka"]);
        let result = score_resume(&extract(SAMPLE), &p, MatchMode::Substring).unwrap();
        let recomputed: Vec<String> = p
            .keywords
            .iter()
            .filter(|k| !result.matched_keywords.contains(k))
            .cloned()
            .collect();
        assert_eq!(recomputed, result.missing_keywords);
    }

    #[test]
    fn test_deterministic_bit_identical() {
        let p = profile(&["python", "sql", "communication"]);
        let a = score_resume(&extract(SAMPLE), &p, MatchMode::Substring).unwrap();
        let b = score_resume(&extract(SAMPLE), &p, MatchMode::Substring).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.score.to_bits(), b.score.to_bits());
    }

    #[test]
    fn test_score_is_not_pre_rounded() {
        let p = profile(&["python", "kafka", "terraform"]);
        let result = score_resume(&extract("python"), &p, MatchMode::Substring).unwrap();
        assert!((result.score - 100.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_match_mode_parses_from_config_strings() {
        assert_eq!("substring".parse::<MatchMode>().unwrap(), MatchMode::Substring);
        assert_eq!("token_set".parse::<MatchMode>().unwrap(), MatchMode::TokenSet);
        assert!("fuzzy".parse::<MatchMode>().is_err());
    }
}

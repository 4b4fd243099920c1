//! Report renderer — turns one scoring result into a Markdown document and
//! stores it to S3.
//!
//! The renderer only ever sees `ReportFields`; it does not reach back into
//! the scorer or the database. The score is shown at two-decimal precision
//! here, at presentation time, while the underlying value stays full
//! precision everywhere else.

use anyhow::{anyhow, Result};
use aws_sdk_s3::primitives::ByteStream;
use uuid::Uuid;

use crate::scoring::scorer::ScoreResult;

/// The stable, named structure the renderer consumes.
pub struct ReportFields<'a> {
    pub owner: &'a str,
    pub role: &'a str,
    pub result: &'a ScoreResult,
    pub grammar_issues: Option<u32>,
}

pub fn render_report(fields: &ReportFields<'_>) -> String {
    let ReportFields {
        owner,
        role,
        result,
        grammar_issues,
    } = fields;

    let mut md = format!("# Resume Score Report — {owner}\n\n");
    md.push_str(&format!("- **Target role:** {role}\n"));
    md.push_str(&format!("- **Score:** {:.2} / 100\n", result.score));
    match grammar_issues {
        Some(count) => md.push_str(&format!("- **Grammar issues:** {count}\n")),
        None => md.push_str("- **Grammar issues:** not available\n"),
    }
    md.push('\n');

    md.push_str("## Matched keywords\n\n");
    if result.matched_keywords.is_empty() {
        md.push_str("_None of the role's keywords were found._\n");
    } else {
        for keyword in &result.matched_keywords {
            md.push_str(&format!("- {keyword}\n"));
        }
    }
    md.push('\n');

    md.push_str("## Missing keywords\n\n");
    if result.missing_keywords.is_empty() {
        md.push_str("_Every keyword for this role was found._\n");
    } else {
        for keyword in &result.missing_keywords {
            md.push_str(&format!("- {keyword}\n"));
        }
    }

    md
}

/// Uploads a rendered report and returns its key.
pub async fn store_report(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    owner: &str,
    submission_id: Uuid,
    document: &str,
) -> Result<String> {
    let key = format!("reports/{owner}/{submission_id}.md");
    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(document.as_bytes().to_vec()))
        .content_type("text/markdown")
        .send()
        .await
        .map_err(|e| anyhow!("S3 upload failed: {e}"))?;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> ScoreResult {
        ScoreResult {
            score: 80.0,
            matched_keywords: vec!["python".into(), "sql".into()],
            missing_keywords: vec!["machine learning".into()],
        }
    }

    #[test]
    fn test_report_shows_two_decimal_score() {
        let result = ScoreResult {
            score: 100.0 / 3.0,
            matched_keywords: vec!["python".into()],
            missing_keywords: vec!["sql".into(), "kafka".into()],
        };
        let md = render_report(&ReportFields {
            owner: "ada@example.com",
            role: "Data Scientist",
            result: &result,
            grammar_issues: Some(3),
        });
        assert!(md.contains("33.33 / 100"));
    }

    #[test]
    fn test_report_lists_matched_and_missing_keywords() {
        let result = sample_result();
        let md = render_report(&ReportFields {
            owner: "ada@example.com",
            role: "Data Scientist",
            result: &result,
            grammar_issues: Some(0),
        });
        assert!(md.contains("ada@example.com"));
        assert!(md.contains("Data Scientist"));
        assert!(md.contains("- python\n"));
        assert!(md.contains("- sql\n"));
        assert!(md.contains("- machine learning\n"));
        assert!(md.contains("**Grammar issues:** 0"));
    }

    #[test]
    fn test_report_marks_grammar_count_unavailable() {
        let result = sample_result();
        let md = render_report(&ReportFields {
            owner: "ada@example.com",
            role: "Data Scientist",
            result: &result,
            grammar_issues: None,
        });
        assert!(md.contains("**Grammar issues:** not available"));
    }
}

//! Grammar checker — an opaque external issue counter.
//!
//! The service only consumes the integer count; what counts as an "issue" is
//! entirely the external checker's business, and the count never feeds the
//! resume score. When no checker is configured, or a check fails, the
//! submission is reported without a count.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("grammar service returned status {0}")]
    Api(u16),
}

/// Carried in `AppState` as `Option<Arc<dyn GrammarChecker>>`; absent when no
/// endpoint is configured.
#[async_trait]
pub trait GrammarChecker: Send + Sync {
    async fn issue_count(&self, text: &str) -> Result<u32, GrammarError>;
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    matches: Vec<IssueMatch>,
}

#[derive(Debug, Deserialize)]
struct IssueMatch {
    message: String,
}

/// Client for a LanguageTool-compatible `/v2/check` endpoint.
pub struct LanguageToolChecker {
    client: Client,
    base_url: String,
}

impl LanguageToolChecker {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
        }
    }
}

#[async_trait]
impl GrammarChecker for LanguageToolChecker {
    async fn issue_count(&self, text: &str) -> Result<u32, GrammarError> {
        let url = format!("{}/v2/check", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .form(&[("language", "en-US"), ("text", text)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GrammarError::Api(status.as_u16()));
        }

        let body: CheckResponse = response.json().await?;
        if let Some(first) = body.matches.first() {
            debug!(
                "grammar check: {} issues (first: {})",
                body.matches.len(),
                first.message
            );
        }
        Ok(body.matches.len() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_response_counts_matches() {
        let body = r#"{
            "software": {"name": "LanguageTool"},
            "matches": [
                {"message": "Possible spelling mistake found.", "offset": 3, "length": 5},
                {"message": "Two consecutive spaces.", "offset": 20, "length": 2}
            ]
        }"#;
        let parsed: CheckResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.matches.len(), 2);
        assert_eq!(parsed.matches[0].message, "Possible spelling mistake found.");
    }

    #[test]
    fn test_check_response_with_no_matches() {
        let parsed: CheckResponse = serde_json::from_str(r#"{"matches": []}"#).unwrap();
        assert!(parsed.matches.is_empty());
    }
}

use anyhow::{Context, Result};

use crate::scoring::scorer::MatchMode;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub smtp_server: String,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub from_email: String,
    /// LanguageTool-compatible endpoint; grammar counting is off when unset.
    pub grammar_api_url: Option<String>,
    /// JSON file with role profiles; built-in defaults when unset.
    pub profiles_path: Option<String>,
    pub match_mode: MatchMode,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            smtp_server: require_env("SMTP_SERVER")?,
            smtp_user: require_env("SMTP_USER")?,
            smtp_pass: require_env("SMTP_PASS")?,
            from_email: require_env("FROM_EMAIL")?,
            grammar_api_url: std::env::var("GRAMMAR_API_URL").ok(),
            profiles_path: std::env::var("PROFILES_PATH").ok(),
            match_mode: match std::env::var("MATCH_MODE") {
                Ok(raw) => raw
                    .parse::<MatchMode>()
                    .map_err(|e| anyhow::anyhow!(e))
                    .context("MATCH_MODE is invalid")?,
                Err(_) => MatchMode::default(),
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

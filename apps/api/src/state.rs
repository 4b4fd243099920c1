use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::grammar::GrammarChecker;
use crate::mailer::Mailer;
use crate::scoring::profile::ProfileRegistry;
use crate::scoring::scorer::MatchMode;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub config: Config,
    /// Read-only role → keyword-profile registry, built once at startup.
    pub profiles: Arc<ProfileRegistry>,
    /// Keyword matching strategy, fixed for the life of the process.
    pub match_mode: MatchMode,
    /// Opaque external grammar checker; None when no endpoint is configured.
    pub grammar: Option<Arc<dyn GrammarChecker>>,
    pub mailer: Mailer,
}

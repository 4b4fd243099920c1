mod auth;
mod config;
mod db;
mod errors;
mod grammar;
mod history;
mod intake;
mod mailer;
mod models;
mod report;
mod routes;
mod scoring;
mod state;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::grammar::{GrammarChecker, LanguageToolChecker};
use crate::mailer::Mailer;
use crate::routes::build_router;
use crate::scoring::profile::ProfileRegistry;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Grader API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    // Build the read-only keyword-profile registry (never mutated afterward,
    // so the scoring path needs no locking)
    let profiles = Arc::new(match &config.profiles_path {
        Some(path) => ProfileRegistry::from_json_file(path)?,
        None => ProfileRegistry::builtin(),
    });
    info!(
        "Keyword profiles loaded: {} roles, {:?} matching",
        profiles.len(),
        config.match_mode
    );

    // Optional external grammar checker
    let grammar: Option<Arc<dyn GrammarChecker>> = config
        .grammar_api_url
        .clone()
        .map(|url| Arc::new(LanguageToolChecker::new(url)) as Arc<dyn GrammarChecker>);
    match &config.grammar_api_url {
        Some(url) => info!("Grammar checker enabled ({url})"),
        None => info!("Grammar checker disabled (GRAMMAR_API_URL not set)"),
    }

    // SMTP mailer for sign-in codes and report delivery
    let mailer = Mailer::new(&config);

    // Build app state
    let state = AppState {
        db,
        s3,
        profiles,
        match_mode: config.match_mode,
        grammar,
        mailer,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "grader-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}

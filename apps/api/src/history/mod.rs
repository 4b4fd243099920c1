//! Submission history — the append-only store of scoring events.
//!
//! One INSERT per scored submission, never UPDATE or DELETE. Raw resume text
//! goes to S3; the row keeps only the key, the owner, the role, and the
//! full-precision score.

use anyhow::{anyhow, Result};
use aws_sdk_s3::primitives::ByteStream;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::submission::SubmissionRow;

pub struct NewSubmission<'a> {
    pub id: Uuid,
    pub owner: &'a str,
    pub role: &'a str,
    pub score: f64,
    pub grammar_issues: Option<i32>,
    pub s3_text_key: Option<&'a str>,
}

/// Records one scoring event. Append-only.
pub async fn record_submission(
    pool: &PgPool,
    submission: NewSubmission<'_>,
) -> Result<SubmissionRow, sqlx::Error> {
    let row = sqlx::query_as::<_, SubmissionRow>(
        r#"
        INSERT INTO submissions (id, owner, role, score, grammar_issues, s3_text_key)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(submission.id)
    .bind(submission.owner)
    .bind(submission.role)
    .bind(submission.score)
    .bind(submission.grammar_issues)
    .bind(submission.s3_text_key)
    .fetch_one(pool)
    .await?;

    info!(
        "Recorded submission {} for {} (role {}, score {:.2})",
        row.id, row.owner, row.role, row.score
    );
    Ok(row)
}

/// All scoring events for an owner, oldest first, for trend display.
pub async fn scores_for_owner(
    pool: &PgPool,
    owner: &str,
) -> Result<Vec<SubmissionRow>, sqlx::Error> {
    sqlx::query_as::<_, SubmissionRow>(
        "SELECT * FROM submissions WHERE owner = $1 ORDER BY created_at ASC",
    )
    .bind(owner)
    .fetch_all(pool)
    .await
}

pub async fn get_submission(
    pool: &PgPool,
    owner: &str,
    id: Uuid,
) -> Result<Option<SubmissionRow>, sqlx::Error> {
    sqlx::query_as::<_, SubmissionRow>("SELECT * FROM submissions WHERE id = $1 AND owner = $2")
        .bind(id)
        .bind(owner)
        .fetch_optional(pool)
        .await
}

/// Stores the decoded resume text alongside the row, keyed by user and
/// submission, and returns the key.
pub async fn store_raw_text(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    user_id: Uuid,
    submission_id: Uuid,
    text: &str,
) -> Result<String> {
    let key = format!("uploads/{user_id}/{submission_id}.txt");
    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(text.as_bytes().to_vec()))
        .content_type("text/plain")
        .send()
        .await
        .map_err(|e| anyhow!("S3 upload failed: {e}"))?;
    Ok(key)
}

/// Fetches previously stored resume text for re-scoring.
pub async fn fetch_raw_text(s3: &aws_sdk_s3::Client, bucket: &str, key: &str) -> Result<String> {
    let object = s3
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| anyhow!("S3 download failed: {e}"))?;
    let data = object
        .body
        .collect()
        .await
        .map_err(|e| anyhow!("S3 body read failed: {e}"))?
        .into_bytes();
    String::from_utf8(data.to_vec()).map_err(|e| anyhow!("stored resume text is not UTF-8: {e}"))
}

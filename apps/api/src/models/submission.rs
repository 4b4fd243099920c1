use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One scoring event. Rows are written once at score time and never mutated
/// or deleted; only the scalar score is kept, the structured result is
/// recomputed from the stored text when needed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SubmissionRow {
    pub id: Uuid,
    pub owner: String,
    pub role: String,
    pub score: f64,
    pub grammar_issues: Option<i32>,
    pub s3_text_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

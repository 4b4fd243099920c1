//! Axum route handlers for the scoring API.

use axum::{
    extract::{Multipart, Path, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::auth::AuthedUser;
use crate::errors::AppError;
use crate::history::{self, NewSubmission};
use crate::intake::{self, DecodeFailure, MAX_UPLOAD_BYTES};
use crate::models::submission::SubmissionRow;
use crate::report::{self, ReportFields};
use crate::scoring::extractor;
use crate::scoring::scorer::{score_resume, ScoreResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RoleSummary {
    pub role: String,
    pub keyword_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub submission_id: Uuid,
    pub role: String,
    pub score: f64,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub grammar_issues: Option<u32>,
    /// Set when the upload could not be decoded; the zero score then refers
    /// to empty text, not to the resume the user meant to send.
    pub decode_failure: Option<DecodeFailure>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct EmailReportRequest {
    pub to: String,
}

#[derive(Debug, Serialize)]
pub struct EmailReportResponse {
    pub status: String,
    pub report_key: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/roles
///
/// Lists the configured job roles a resume can be scored against.
pub async fn handle_list_roles(State(state): State<AppState>) -> Json<Vec<RoleSummary>> {
    let roles = state
        .profiles
        .profiles()
        .iter()
        .map(|p| RoleSummary {
            role: p.role.clone(),
            keyword_count: p.keywords.len(),
        })
        .collect();
    Json(roles)
}

/// POST /api/v1/submissions
///
/// Scores an uploaded resume (multipart `resume` file or `text` field)
/// against the selected `role`, records the event, and returns the result.
pub async fn handle_submit(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
    mut multipart: Multipart,
) -> Result<Json<ScoreResponse>, AppError> {
    let mut role = String::new();
    let mut pasted_text: Option<String> = None;
    let mut upload: Option<(String, Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        match field.name().unwrap_or("") {
            "role" => {
                role = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("unreadable role field: {e}")))?;
            }
            "text" => {
                pasted_text = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("unreadable text field: {e}"))
                })?);
            }
            "resume" => {
                let filename = field.file_name().unwrap_or("resume").to_string();
                let content_type = field.content_type().map(|ct| ct.to_string());
                let data = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("unreadable resume field: {e}"))
                })?;
                if data.len() > MAX_UPLOAD_BYTES {
                    return Err(AppError::Validation(
                        "resume exceeds the 10MB upload limit".to_string(),
                    ));
                }
                upload = Some((filename, content_type, data.to_vec()));
            }
            _ => {
                let _ = field.bytes().await;
            }
        }
    }

    if role.trim().is_empty() {
        return Err(AppError::Validation("role is required".to_string()));
    }
    let profile = state.profiles.lookup(&role)?;

    // Decode problems surface out-of-band; scoring proceeds on empty text.
    let (raw_text, decode_failure) = match (pasted_text, upload) {
        (Some(text), _) => (text, None),
        (None, Some((filename, content_type, data))) => {
            let decoded = intake::decode_upload(&filename, content_type.as_deref(), &data);
            (decoded.text, decoded.failure)
        }
        (None, None) => {
            return Err(AppError::Validation(
                "provide a resume file or a text field".to_string(),
            ))
        }
    };

    let extracted = extractor::extract(&raw_text);
    let result = score_resume(&extracted, profile, state.match_mode)?;

    let grammar_issues = check_grammar(&state, &raw_text).await;

    let submission_id = Uuid::new_v4();
    let s3_text_key = if raw_text.is_empty() {
        None
    } else {
        let key = history::store_raw_text(
            &state.s3,
            &state.config.s3_bucket,
            user.id,
            submission_id,
            &raw_text,
        )
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;
        Some(key)
    };

    let row = history::record_submission(
        &state.db,
        NewSubmission {
            id: submission_id,
            owner: &user.email,
            role: &profile.role,
            score: result.score,
            grammar_issues: grammar_issues.map(|n| n as i32),
            s3_text_key: s3_text_key.as_deref(),
        },
    )
    .await?;

    Ok(Json(ScoreResponse {
        submission_id,
        role: profile.role.clone(),
        score: result.score,
        matched_keywords: result.matched_keywords,
        missing_keywords: result.missing_keywords,
        grammar_issues,
        decode_failure,
        created_at: row.created_at,
    }))
}

/// GET /api/v1/submissions
///
/// The caller's scoring history, oldest first, for trend display.
pub async fn handle_history(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
) -> Result<Json<Vec<SubmissionRow>>, AppError> {
    Ok(Json(history::scores_for_owner(&state.db, &user.email).await?))
}

/// POST /api/v1/submissions/:id/email
///
/// Re-scores the stored resume text (scoring is deterministic, so the result
/// matches the recorded score), renders the report, stores it, and mails it.
pub async fn handle_email_report(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
    Path(submission_id): Path<Uuid>,
    Json(request): Json<EmailReportRequest>,
) -> Result<Json<EmailReportResponse>, AppError> {
    let row = history::get_submission(&state.db, &user.email, submission_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Submission {submission_id} not found")))?;

    let text_key = row.s3_text_key.as_deref().ok_or_else(|| {
        AppError::Validation("submission has no stored resume text".to_string())
    })?;
    let raw_text = history::fetch_raw_text(&state.s3, &state.config.s3_bucket, text_key)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    let profile = state.profiles.lookup(&row.role)?;
    let extracted = extractor::extract(&raw_text);
    let result: ScoreResult = score_resume(&extracted, profile, state.match_mode)?;

    let document = report::render_report(&ReportFields {
        owner: &user.email,
        role: &profile.role,
        result: &result,
        grammar_issues: row.grammar_issues.map(|n| n as u32),
    });
    let report_key = report::store_report(
        &state.s3,
        &state.config.s3_bucket,
        &user.email,
        submission_id,
        &document,
    )
    .await
    .map_err(|e| AppError::Storage(e.to_string()))?;

    state
        .mailer
        .send(
            request.to.trim(),
            &format!("Resume score report — {}", profile.role),
            document,
        )
        .await
        .map_err(|e| AppError::Mail(e.to_string()))?;

    Ok(Json(EmailReportResponse {
        status: "sent".to_string(),
        report_key,
    }))
}

/// Asks the configured checker for an issue count. Absence or failure of the
/// external service degrades to "no count", never to a failed submission.
async fn check_grammar(state: &AppState, raw_text: &str) -> Option<u32> {
    let checker = state.grammar.as_ref()?;
    if raw_text.trim().is_empty() {
        return None;
    }
    match checker.issue_count(raw_text).await {
        Ok(count) => Some(count),
        Err(e) => {
            warn!("grammar check failed: {e}");
            None
        }
    }
}

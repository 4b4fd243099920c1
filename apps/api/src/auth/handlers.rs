//! Axum route handlers for sign-up and code verification.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{issue_code, upsert_user, verify_code};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub user_id: Uuid,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub token: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// POST /api/v1/auth/signup
///
/// Registers (or refreshes) a user and emails them a sign-in code.
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<SignupResponse>, AppError> {
    let email = request.email.trim();
    if !email.contains('@') {
        return Err(AppError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }

    let user = upsert_user(&state.db, email, name).await?;
    let code = issue_code(&state.db, &user).await?;

    state
        .mailer
        .send(
            &user.email,
            "Your Resume Grader sign-in code",
            format!(
                "Hi {},\n\nYour sign-in code is {}. It expires in 15 minutes.\n",
                user.display_name, code
            ),
        )
        .await
        .map_err(|e| AppError::Mail(e.to_string()))?;

    Ok(Json(SignupResponse {
        user_id: user.id,
        status: "code_sent".to_string(),
    }))
}

/// POST /api/v1/auth/verify
///
/// Exchanges an emailed code for a bearer session token.
pub async fn handle_verify(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, AppError> {
    let session = verify_code(&state.db, request.email.trim(), request.code.trim())
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(VerifyResponse {
        token: session.token,
        expires_at: session.expires_at,
    }))
}

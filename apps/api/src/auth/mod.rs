//! Identity: email + one-time-code sign-in, bearer sessions.
//!
//! The scoring core never sees any of this — it only receives the opaque
//! owner string. The middleware resolves the bearer token and threads the
//! authenticated owner through the request as an explicit extension value,
//! so nothing downstream depends on ambient session state.

pub mod handlers;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use rand::Rng;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{AuthCodeRow, SessionRow, User};
use crate::state::AppState;

const CODE_TTL_MINUTES: i64 = 15;
const SESSION_TTL_DAYS: i64 = 7;

/// The authenticated caller, injected as a request extension by
/// `require_session`.
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub id: Uuid,
    pub email: String,
}

pub async fn upsert_user(
    pool: &PgPool,
    email: &str,
    display_name: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email, display_name)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO UPDATE SET display_name = $3
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(display_name)
    .fetch_one(pool)
    .await
}

pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..6).map(|_| rng.gen_range(0..10u32).to_string()).collect()
}

/// Stores a fresh sign-in code for the user and returns it for delivery.
pub async fn issue_code(pool: &PgPool, user: &User) -> Result<String, sqlx::Error> {
    let code = generate_code();
    sqlx::query(
        "INSERT INTO auth_codes (id, user_id, code, expires_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(Uuid::new_v4())
    .bind(user.id)
    .bind(&code)
    .bind(Utc::now() + Duration::minutes(CODE_TTL_MINUTES))
    .execute(pool)
    .await?;
    Ok(code)
}

/// Exchanges an email + code pair for a session. The code is single-use.
pub async fn verify_code(
    pool: &PgPool,
    email: &str,
    code: &str,
) -> Result<Option<SessionRow>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    let user = match user {
        Some(u) => u,
        None => return Ok(None),
    };

    let pending = sqlx::query_as::<_, AuthCodeRow>(
        r#"
        SELECT id, user_id, code, expires_at, consumed FROM auth_codes
        WHERE user_id = $1 AND consumed = FALSE AND expires_at > now()
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .bind(user.id)
    .fetch_optional(pool)
    .await?;

    let pending = match pending {
        Some(row) if row.code == code => row,
        _ => return Ok(None),
    };

    sqlx::query("UPDATE auth_codes SET consumed = TRUE WHERE id = $1")
        .bind(pending.id)
        .execute(pool)
        .await?;

    let session = sqlx::query_as::<_, SessionRow>(
        r#"
        INSERT INTO sessions (token, user_id, expires_at)
        VALUES ($1, $2, $3)
        RETURNING token, user_id, expires_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.id)
    .bind(Utc::now() + Duration::days(SESSION_TTL_DAYS))
    .fetch_one(pool)
    .await?;

    Ok(Some(session))
}

pub async fn session_user(pool: &PgPool, token: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT u.* FROM users u
        JOIN sessions s ON s.user_id = u.id
        WHERE s.token = $1 AND s.expires_at > now()
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await
}

/// Axum middleware guarding the scoring API. Validates the bearer token and
/// injects the authenticated owner into the request.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers()).ok_or(AppError::Unauthorized)?;
    let token: Uuid = token.parse().map_err(|_| AppError::Unauthorized)?;

    let user = session_user(&state.db, token)
        .await?
        .ok_or(AppError::Unauthorized)?;

    request.extensions_mut().insert(AuthedUser {
        id: user.id,
        email: user.email,
    });
    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_generated_code_is_six_digits() {
        for _ in 0..20 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_bearer_token_parses_authorization_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc-123"),
        );
        assert_eq!(bearer_token(&headers), Some("abc-123"));
    }

    #[test]
    fn test_bearer_token_rejects_other_schemes_and_empty_tokens() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Basic abc"),
        );
        assert_eq!(bearer_token(&headers), None);

        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer "),
        );
        assert_eq!(bearer_token(&headers), None);

        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}

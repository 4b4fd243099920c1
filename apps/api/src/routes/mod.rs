pub mod health;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::auth::{self, handlers as auth_handlers};
use crate::scoring::handlers as scoring_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/v1/roles", get(scoring_handlers::handle_list_roles))
        .route(
            "/api/v1/submissions",
            post(scoring_handlers::handle_submit).get(scoring_handlers::handle_history),
        )
        .route(
            "/api/v1/submissions/:id/email",
            post(scoring_handlers::handle_email_report),
        )
        .layer(from_fn_with_state(state.clone(), auth::require_session));

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/auth/signup", post(auth_handlers::handle_signup))
        .route("/api/v1/auth/verify", post(auth_handlers::handle_verify))
        .merge(protected)
        .with_state(state)
}

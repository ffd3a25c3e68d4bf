pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::coaching::handlers as coaching;
use crate::history::handlers as history;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Question catalog
        .route("/api/v1/roles", get(coaching::handle_list_roles))
        .route(
            "/api/v1/roles/:role/questions",
            get(coaching::handle_role_questions),
        )
        .route(
            "/api/v1/questions/random",
            post(coaching::handle_random_question),
        )
        // Model-backed coaching
        .route("/api/v1/answers/auto", post(coaching::handle_sample_answer))
        .route("/api/v1/feedback", post(coaching::handle_feedback))
        // Interview log
        .route("/api/v1/history", get(history::handle_history))
        .route("/api/v1/history/export", get(history::handle_export))
        .with_state(state)
}

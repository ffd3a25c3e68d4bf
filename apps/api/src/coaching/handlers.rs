//! Axum route handlers for roles, questions, sample answers and feedback.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::coaching::coach::{
    generate_sample_answer, request_feedback, FeedbackOutcome, FeedbackRequest, SampleAnswer,
};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RoleSummary {
    pub role: String,
    pub question_count: usize,
}

#[derive(Debug, Serialize)]
pub struct RoleQuestionsResponse {
    pub role: String,
    pub questions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RandomQuestionRequest {
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub role: String,
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct SampleAnswerRequest {
    pub question: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/roles
pub async fn handle_list_roles(State(state): State<AppState>) -> Json<Vec<RoleSummary>> {
    Json(
        state
            .catalog
            .roles()
            .iter()
            .map(|r| RoleSummary {
                role: r.role.clone(),
                question_count: r.questions.len(),
            })
            .collect(),
    )
}

/// GET /api/v1/roles/:role/questions
pub async fn handle_role_questions(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> Result<Json<RoleQuestionsResponse>, AppError> {
    let questions = state
        .catalog
        .questions(&role)
        .ok_or_else(|| AppError::NotFound(format!("Unknown role '{role}'")))?
        .to_vec();
    Ok(Json(RoleQuestionsResponse { role, questions }))
}

/// POST /api/v1/questions/random
///
/// Picks a question for the role; the client clears any previous answer.
pub async fn handle_random_question(
    State(state): State<AppState>,
    Json(request): Json<RandomQuestionRequest>,
) -> Result<Json<QuestionResponse>, AppError> {
    let question = state
        .catalog
        .random_question(&request.role)
        .ok_or_else(|| AppError::NotFound(format!("Unknown role '{}'", request.role)))?
        .to_string();
    Ok(Json(QuestionResponse {
        role: request.role,
        question,
    }))
}

/// POST /api/v1/answers/auto
///
/// Generates a sample answer for a custom question.
pub async fn handle_sample_answer(
    State(state): State<AppState>,
    Json(request): Json<SampleAnswerRequest>,
) -> Result<Json<SampleAnswer>, AppError> {
    let sample = generate_sample_answer(
        state.llm.as_ref(),
        state.config.answer_max_new_tokens,
        &request.question,
    )
    .await?;
    Ok(Json(sample))
}

/// POST /api/v1/feedback
///
/// Full pipeline: prompt → model → parse → append to the interview log.
pub async fn handle_feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<FeedbackOutcome>, AppError> {
    let outcome = request_feedback(
        state.llm.as_ref(),
        state.parser.as_ref(),
        &state.catalog,
        &state.log,
        state.config.feedback_max_new_tokens,
        request,
    )
    .await?;
    Ok(Json(outcome))
}

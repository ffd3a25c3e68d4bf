//! Axum route handlers for browsing and exporting the interview log.

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::history::store::Persistence;
use crate::models::record::InterviewRecord;
use crate::state::AppState;

pub const EXPORT_FILENAME: &str = "interview_log.csv";
const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub total: usize,
    pub records: Vec<InterviewRecord>,
    pub persistence: Persistence,
}

/// GET /api/v1/history?limit=N
///
/// Most recent records (default 50), oldest first.
pub async fn handle_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<HistoryResponse> {
    let log = state.log.lock().await;
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    Json(HistoryResponse {
        total: log.len(),
        records: log.tail(limit).to_vec(),
        persistence: log.persistence().clone(),
    })
}

/// GET /api/v1/history/export
///
/// The whole session log as a CSV download, byte-identical to the durable file.
pub async fn handle_export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let bytes = state.log.lock().await.export()?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        bytes,
    ))
}

//! Coach pipeline: validate → build prompt → model call → parse → append to the log.
//! The model is called once per request; failures propagate, nothing retries here.

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::coaching::catalog::RoleCatalog;
use crate::coaching::parser::ResponseParser;
use crate::coaching::prompts::{build_auto_answer_prompt, build_feedback_prompt};
use crate::errors::AppError;
use crate::history::store::InteractionLog;
use crate::llm_client::TextGenerator;
use crate::models::record::{Category, InterviewRecord};

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub role: String,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct FeedbackOutcome {
    pub feedback: String,
    pub score: String,
    pub category: Category,
    pub record: InterviewRecord,
    /// False when the record only lives in the session (the rewrite failed or is disabled).
    pub persisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SampleAnswer {
    pub question: String,
    pub answer: String,
}

/// Critiques the user's answer and logs the interaction.
/// No record is written if validation or the model call fails.
pub async fn request_feedback(
    llm: &dyn TextGenerator,
    parser: &dyn ResponseParser,
    catalog: &RoleCatalog,
    log: &Mutex<InteractionLog>,
    max_new_tokens: u32,
    request: FeedbackRequest,
) -> Result<FeedbackOutcome, AppError> {
    let question = request.question.trim();
    if question.is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }
    if request.answer.trim().is_empty() {
        return Err(AppError::Validation(
            "Please type your answer before requesting feedback.".to_string(),
        ));
    }
    if !catalog.accepts_role(&request.role) {
        return Err(AppError::Validation(format!(
            "Unknown role '{}'",
            request.role
        )));
    }

    let prompt = build_feedback_prompt(question, &request.answer);
    let raw = llm.generate(&prompt, max_new_tokens).await?;
    let parsed = parser.parse(&raw);

    let record = InterviewRecord::new(
        request.role,
        question,
        request.answer,
        parsed.feedback.clone(),
        parsed.score.clone(),
        parsed.category,
    );

    let (persisted, storage_warning) = {
        let mut log = log.lock().await;
        match log.append(record.clone()) {
            Ok(()) => {
                info!(
                    "Logged interview record #{} (score={}, category={})",
                    log.len(),
                    record.score,
                    record.category
                );
                (true, None)
            }
            Err(e) => {
                warn!("Interview record kept in session only: {e}");
                (false, Some(e.to_string()))
            }
        }
    };

    Ok(FeedbackOutcome {
        feedback: parsed.feedback,
        score: parsed.score,
        category: parsed.category,
        record,
        persisted,
        storage_warning,
    })
}

/// Generates a sample answer for a user-entered question.
pub async fn generate_sample_answer(
    llm: &dyn TextGenerator,
    max_new_tokens: u32,
    question: &str,
) -> Result<SampleAnswer, AppError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }

    let prompt = build_auto_answer_prompt(question);
    let answer = llm.generate(&prompt, max_new_tokens).await?;

    Ok(SampleAnswer {
        question: question.to_string(),
        answer: answer.trim().to_string(),
    })
}

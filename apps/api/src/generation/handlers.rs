//! Axum route handlers for question generation.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{ApiJson, AppError};
use crate::generation::parser::extract_questions;
use crate::generation::prompts::{question_count_for, render_question_prompt, JobSpec};
use crate::models::interview::{deserialize_interview_types, QuestionDraft};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuestionsRequest {
    pub job_position: String,
    pub job_description: String,
    #[serde(alias = "interviewDuration")]
    pub duration: String,
    #[serde(
        rename = "type",
        alias = "interviewType",
        default,
        deserialize_with = "deserialize_interview_types"
    )]
    pub interview_type: Vec<String>,
}

impl GenerateQuestionsRequest {
    fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("jobPosition", &self.job_position),
            ("jobDescription", &self.job_description),
            ("duration", &self.duration),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{field} cannot be empty")));
            }
        }
        Ok(())
    }

    fn job(&self) -> JobSpec<'_> {
        JobSpec {
            job_position: &self.job_position,
            job_description: &self.job_description,
            duration: &self.duration,
            interview_types: &self.interview_type,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateQuestionsResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftQuestionsResponse {
    pub target_count: u32,
    pub questions: Vec<QuestionDraft>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

async fn complete(state: &AppState, request: &GenerateQuestionsRequest) -> Result<String, AppError> {
    request.validate()?;
    let prompt = render_question_prompt(&request.job());
    debug!("Question prompt:\n{prompt}");
    Ok(state.llm.complete(&prompt).await?)
}

/// POST /api/v1/questions/generate
///
/// Returns the raw completion text. Extracting questions from it is up to the caller.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<GenerateQuestionsRequest>,
) -> Result<Json<GenerateQuestionsResponse>, AppError> {
    let message = complete(&state, &request).await?;
    Ok(Json(GenerateQuestionsResponse { message }))
}

/// POST /api/v1/questions/draft
///
/// Generates and strictly parses the question list. Unusable model output is
/// a `MODEL_OUTPUT_INVALID` error rather than an empty list.
pub async fn handle_draft_questions(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<GenerateQuestionsRequest>,
) -> Result<Json<DraftQuestionsResponse>, AppError> {
    let completion = complete(&state, &request).await?;
    let questions = extract_questions(&completion)?;
    let target_count = question_count_for(&request.duration);

    info!(
        "Drafted {} questions (target {target_count}) for {:?}",
        questions.len(),
        request.job_position
    );

    Ok(Json(DraftQuestionsResponse {
        target_count,
        questions,
    }))
}

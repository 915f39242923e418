//! Axum route handlers for interview records.
//!
//! `AuthUser` is always the first extractor after `State`, so unauthenticated
//! calls are rejected before the query string or body is even looked at.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::errors::{ApiJson, AppError};
use crate::models::interview::{
    validate_questions, InterviewForm, InterviewQuestionRow, InterviewRow, InterviewSummaryRow,
    QuestionDraft,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewQuery {
    pub id: Option<String>,
    pub question_id: Option<String>,
}

impl InterviewQuery {
    fn interview_id(&self) -> Result<&str, AppError> {
        non_blank(self.id.as_deref())
            .ok_or_else(|| AppError::Validation("Interview ID missing".to_string()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveInterviewRequest {
    pub form_data: InterviewForm,
    #[serde(default)]
    pub questions: Option<Vec<QuestionDraft>>,
}

impl SaveInterviewRequest {
    /// Validates and splits the request into its two halves.
    fn into_parts(self) -> Result<(InterviewForm, Vec<QuestionDraft>), AppError> {
        self.form_data.validate()?;
        let questions = self.questions.unwrap_or_default();
        validate_questions(&questions)?;
        Ok((self.form_data, questions))
    }
}

#[derive(Debug, Serialize)]
pub struct SaveInterviewResponse {
    pub success: bool,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteInterviewResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InterviewDetailResponse {
    #[serde(flatten)]
    pub interview: InterviewRow,
    pub questions: Vec<InterviewQuestionRow>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/interview?id=
pub async fn handle_get_interview(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<InterviewQuery>,
) -> Result<Json<InterviewDetailResponse>, AppError> {
    let id = query.interview_id()?;

    let record = state
        .interviews
        .find(&user.user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Interview not found".to_string()))?;

    Ok(Json(InterviewDetailResponse {
        interview: record.interview,
        questions: record.questions,
    }))
}

/// GET /api/v1/interviews
pub async fn handle_list_interviews(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<InterviewSummaryRow>>, AppError> {
    Ok(Json(state.interviews.list(&user.user_id).await?))
}

/// POST /api/v1/interview
pub async fn handle_create_interview(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(request): ApiJson<SaveInterviewRequest>,
) -> Result<Json<SaveInterviewResponse>, AppError> {
    let (form, questions) = request.into_parts()?;

    let id = state
        .interviews
        .create(&user.user_id, &form, &questions)
        .await?;

    Ok(Json(SaveInterviewResponse { success: true, id }))
}

/// PUT /api/v1/interview?id=
///
/// Full replace: the submitted batch becomes the interview's entire question list.
pub async fn handle_update_interview(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<InterviewQuery>,
    ApiJson(request): ApiJson<SaveInterviewRequest>,
) -> Result<Json<SaveInterviewResponse>, AppError> {
    let id = query.interview_id()?;
    let (form, questions) = request.into_parts()?;

    let replaced = state
        .interviews
        .replace(&user.user_id, id, &form, &questions)
        .await?;
    if !replaced {
        return Err(AppError::NotFound("Interview not found".to_string()));
    }

    Ok(Json(SaveInterviewResponse {
        success: true,
        id: id.to_string(),
    }))
}

/// DELETE /api/v1/interview?id=[&questionId=]
///
/// With `questionId` only that question goes; otherwise the interview and all
/// of its questions. Absent targets are not an error.
pub async fn handle_delete_interview(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<InterviewQuery>,
) -> Result<Json<DeleteInterviewResponse>, AppError> {
    if let Some(question_id) = non_blank(query.question_id.as_deref()) {
        state
            .interviews
            .delete_question(&user.user_id, question_id)
            .await?;
        return Ok(Json(DeleteInterviewResponse {
            success: true,
            message: Some("Question deleted".to_string()),
        }));
    }

    let id = query.interview_id()?;
    state.interviews.delete(&user.user_id, id).await?;

    Ok(Json(DeleteInterviewResponse {
        success: true,
        message: None,
    }))
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use crate::errors::AppError;

/// Interview categories offered to the model and to clients.
/// Spellings are the stored labels.
pub const INTERVIEW_CATEGORIES: &[&str] = &[
    "Technical",
    "Behavorial",
    "Experience",
    "Problem Solving",
    "Leadership",
];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRow {
    pub id: String,
    pub job_position: String,
    pub job_description: String,
    pub interview_duration: String,
    pub interview_type: Vec<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InterviewQuestionRow {
    pub id: String,
    pub interview_id: String,
    pub question: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub question_type: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InterviewSummaryRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub interview: InterviewRow,
    pub question_count: i64,
}

/// The four editable interview attributes as submitted by clients.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewForm {
    pub job_position: String,
    pub job_description: String,
    pub interview_duration: String,
    #[serde(default, deserialize_with = "deserialize_interview_types")]
    pub interview_type: Vec<String>,
}

impl InterviewForm {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text("jobPosition", &self.job_position)?;
        require_text("jobDescription", &self.job_description)?;
        require_text("interviewDuration", &self.interview_duration)?;
        Ok(())
    }
}

/// A question not yet persisted: what the model drafts and what clients submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub question: String,
    #[serde(rename = "type", default)]
    pub question_type: String,
}

/// Rejects a batch containing a blank question, naming its index.
pub fn validate_questions(questions: &[QuestionDraft]) -> Result<(), AppError> {
    match questions.iter().position(|q| q.question.trim().is_empty()) {
        Some(index) => Err(AppError::Validation(format!(
            "questions[{index}].question cannot be empty"
        ))),
        None => Ok(()),
    }
}

fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Splits the comma-joined wire form of an interview type list.
/// `""` yields an empty list; blank segments are dropped.
pub fn split_interview_types(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InterviewTypesInput {
    List(Vec<String>),
    Joined(String),
}

impl From<InterviewTypesInput> for Vec<String> {
    fn from(input: InterviewTypesInput) -> Self {
        match input {
            InterviewTypesInput::List(list) => list,
            InterviewTypesInput::Joined(joined) => split_interview_types(&joined),
        }
    }
}

/// Accepts an interview type list either as a JSON array or as a comma-joined string.
pub fn deserialize_interview_types<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<InterviewTypesInput>::deserialize(deserializer)
        .map(|input| input.map(Vec::from).unwrap_or_default())
}

//! Extracts the structured question list from a free-text completion.
//!
//! Models often wrap the JSON in prose or code fences. Extraction tries the
//! whole text first, then the outermost `{…}` span, then the outermost `[…]`
//! span. Anything unusable is a [`ParseFailure`], never an empty list.

use serde::Deserialize;
use thiserror::Error;

use crate::models::interview::QuestionDraft;

#[derive(Debug, Error)]
pub enum ParseFailure {
    #[error("model response contains no JSON")]
    NoJson,

    #[error("model response JSON is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("model response contains no questions")]
    Empty,

    #[error("model response question {index} has no text")]
    BlankQuestion { index: usize },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuestionPayload {
    Wrapped {
        #[serde(rename = "interviewQuestions")]
        interview_questions: Vec<QuestionDraft>,
    },
    Bare(Vec<QuestionDraft>),
}

impl QuestionPayload {
    fn into_questions(self) -> Vec<QuestionDraft> {
        match self {
            QuestionPayload::Wrapped {
                interview_questions,
            } => interview_questions,
            QuestionPayload::Bare(questions) => questions,
        }
    }
}

/// Parses the question list out of a completion.
pub fn extract_questions(completion: &str) -> Result<Vec<QuestionDraft>, ParseFailure> {
    let text = strip_json_fences(completion);

    let candidates = [
        Some(text),
        outermost_span(text, '{', '}'),
        outermost_span(text, '[', ']'),
    ];

    let mut last_error = None;
    let mut parsed = None;
    for candidate in candidates.into_iter().flatten() {
        if !(candidate.starts_with('{') || candidate.starts_with('[')) {
            continue;
        }
        match serde_json::from_str::<QuestionPayload>(candidate) {
            Ok(payload) => {
                parsed = Some(payload.into_questions());
                break;
            }
            Err(e) => last_error = Some(e),
        }
    }

    let questions = match (parsed, last_error) {
        (Some(questions), _) => questions,
        (None, Some(e)) => return Err(ParseFailure::Malformed(e)),
        (None, None) => return Err(ParseFailure::NoJson),
    };

    if questions.is_empty() {
        return Err(ParseFailure::Empty);
    }
    if let Some(index) = questions.iter().position(|q| q.question.trim().is_empty()) {
        return Err(ParseFailure::BlankQuestion { index });
    }

    Ok(questions)
}

/// Slice from the first `open` to the last `close`, inclusive.
fn outermost_span(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

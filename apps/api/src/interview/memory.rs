//! In-memory `InterviewStore` with the same ownership and replace semantics
//! as the PostgreSQL store.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::store::{InterviewRecord, InterviewStore};
use crate::models::interview::{
    InterviewForm, InterviewQuestionRow, InterviewRow, InterviewSummaryRow, QuestionDraft,
};

#[derive(Default)]
pub struct MemoryInterviewStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    interviews: Vec<InterviewRow>,
    questions: Vec<InterviewQuestionRow>,
}

impl Tables {
    fn owned(&self, owner_id: &str, id: &str) -> Option<usize> {
        self.interviews
            .iter()
            .position(|i| i.id == id && i.user_id == owner_id)
    }

    fn insert_questions(&mut self, interview_id: &str, questions: &[QuestionDraft]) {
        let now = Utc::now();
        for (position, q) in questions.iter().enumerate() {
            self.questions.push(InterviewQuestionRow {
                id: Uuid::new_v4().to_string(),
                interview_id: interview_id.to_string(),
                question: q.question.clone(),
                question_type: q.question_type.clone(),
                position: position as i32,
                created_at: now,
                updated_at: now,
            });
        }
    }
}

impl MemoryInterviewStore {
    pub fn question_rows(&self) -> usize {
        self.inner.lock().unwrap().questions.len()
    }
}

#[async_trait]
impl InterviewStore for MemoryInterviewStore {
    async fn create(
        &self,
        owner_id: &str,
        form: &InterviewForm,
        questions: &[QuestionDraft],
    ) -> Result<String, AppError> {
        let mut tables = self.inner.lock().unwrap();
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        tables.interviews.push(InterviewRow {
            id: id.clone(),
            job_position: form.job_position.clone(),
            job_description: form.job_description.clone(),
            interview_duration: form.interview_duration.clone(),
            interview_type: form.interview_type.clone(),
            user_id: owner_id.to_string(),
            created_at: now,
            updated_at: now,
        });
        tables.insert_questions(&id, questions);
        Ok(id)
    }

    async fn find(&self, owner_id: &str, id: &str) -> Result<Option<InterviewRecord>, AppError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.owned(owner_id, id).map(|index| {
            let mut questions: Vec<_> = tables
                .questions
                .iter()
                .filter(|q| q.interview_id == id)
                .cloned()
                .collect();
            questions.sort_by_key(|q| q.position);
            InterviewRecord {
                interview: tables.interviews[index].clone(),
                questions,
            }
        }))
    }

    async fn list(&self, owner_id: &str) -> Result<Vec<InterviewSummaryRow>, AppError> {
        let tables = self.inner.lock().unwrap();
        let mut rows: Vec<_> = tables
            .interviews
            .iter()
            .enumerate()
            .filter(|(_, i)| i.user_id == owner_id)
            .map(|(index, i)| {
                let count = tables
                    .questions
                    .iter()
                    .filter(|q| q.interview_id == i.id)
                    .count();
                (
                    index,
                    InterviewSummaryRow {
                        interview: i.clone(),
                        question_count: count as i64,
                    },
                )
            })
            .collect();
        // Insertion order breaks ties between identical timestamps.
        rows.sort_by(|(a_idx, a), (b_idx, b)| {
            b.interview
                .created_at
                .cmp(&a.interview.created_at)
                .then(b_idx.cmp(a_idx))
        });
        Ok(rows.into_iter().map(|(_, row)| row).collect())
    }

    async fn replace(
        &self,
        owner_id: &str,
        id: &str,
        form: &InterviewForm,
        questions: &[QuestionDraft],
    ) -> Result<bool, AppError> {
        let mut tables = self.inner.lock().unwrap();
        let Some(index) = tables.owned(owner_id, id) else {
            return Ok(false);
        };
        let row = &mut tables.interviews[index];
        row.job_position = form.job_position.clone();
        row.job_description = form.job_description.clone();
        row.interview_duration = form.interview_duration.clone();
        row.interview_type = form.interview_type.clone();
        row.updated_at = Utc::now();

        tables.questions.retain(|q| q.interview_id != id);
        tables.insert_questions(id, questions);
        Ok(true)
    }

    async fn delete_question(&self, owner_id: &str, question_id: &str) -> Result<bool, AppError> {
        let mut tables = self.inner.lock().unwrap();
        let Some(position) = tables.questions.iter().position(|q| {
            q.id == question_id
                && tables
                    .interviews
                    .iter()
                    .any(|i| i.id == q.interview_id && i.user_id == owner_id)
        }) else {
            return Ok(false);
        };
        tables.questions.remove(position);
        Ok(true)
    }

    async fn delete(&self, owner_id: &str, id: &str) -> Result<bool, AppError> {
        let mut tables = self.inner.lock().unwrap();
        let Some(index) = tables.owned(owner_id, id) else {
            return Ok(false);
        };
        tables.questions.retain(|q| q.interview_id != id);
        tables.interviews.remove(index);
        Ok(true)
    }
}

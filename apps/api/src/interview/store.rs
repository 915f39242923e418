//! Interview Record Store: persistence for interviews and their question batches.
//!
//! Every operation is scoped to the owning user. Create, replace and delete
//! each run in a single transaction.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::interview::{
    InterviewForm, InterviewQuestionRow, InterviewRow, InterviewSummaryRow, QuestionDraft,
};

/// An interview together with its questions in batch order.
#[derive(Debug, Clone)]
pub struct InterviewRecord {
    pub interview: InterviewRow,
    pub questions: Vec<InterviewQuestionRow>,
}

/// Storage seam for interview records. Carried in `AppState` as `Arc<dyn InterviewStore>`.
#[async_trait]
pub trait InterviewStore: Send + Sync {
    /// Persists a new interview owned by `owner_id` plus its questions. Returns the new id.
    async fn create(
        &self,
        owner_id: &str,
        form: &InterviewForm,
        questions: &[QuestionDraft],
    ) -> Result<String, AppError>;

    /// `None` when the interview does not exist or belongs to someone else.
    async fn find(&self, owner_id: &str, id: &str) -> Result<Option<InterviewRecord>, AppError>;

    /// The owner's interviews, newest first.
    async fn list(&self, owner_id: &str) -> Result<Vec<InterviewSummaryRow>, AppError>;

    /// Overwrites the editable attributes and replaces the whole question batch.
    /// Returns `false` when there is no such interview for this owner.
    async fn replace(
        &self,
        owner_id: &str,
        id: &str,
        form: &InterviewForm,
        questions: &[QuestionDraft],
    ) -> Result<bool, AppError>;

    /// Deletes one question of one of the owner's interviews. Returns whether a row went away.
    async fn delete_question(&self, owner_id: &str, question_id: &str) -> Result<bool, AppError>;

    /// Deletes an interview and all of its questions. Returns whether the interview existed.
    async fn delete(&self, owner_id: &str, id: &str) -> Result<bool, AppError>;
}

pub struct PgInterviewStore {
    pool: PgPool,
}

impl PgInterviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InterviewStore for PgInterviewStore {
    async fn create(
        &self,
        owner_id: &str,
        form: &InterviewForm,
        questions: &[QuestionDraft],
    ) -> Result<String, AppError> {
        let interview_id = Uuid::new_v4().to_string();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO interview
                (id, user_id, job_position, job_description, interview_duration, interview_type)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&interview_id)
        .bind(owner_id)
        .bind(&form.job_position)
        .bind(&form.job_description)
        .bind(&form.interview_duration)
        .bind(&form.interview_type)
        .execute(&mut *tx)
        .await?;

        insert_questions(&mut tx, &interview_id, questions).await?;
        tx.commit().await?;

        info!(
            "Created interview {interview_id} with {} questions for user {owner_id}",
            questions.len()
        );
        Ok(interview_id)
    }

    async fn find(&self, owner_id: &str, id: &str) -> Result<Option<InterviewRecord>, AppError> {
        let interview = sqlx::query_as::<_, InterviewRow>(
            "SELECT * FROM interview WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(interview) = interview else {
            return Ok(None);
        };

        let questions = sqlx::query_as::<_, InterviewQuestionRow>(
            "SELECT * FROM interview_question WHERE interview_id = $1 ORDER BY position, created_at",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(InterviewRecord {
            interview,
            questions,
        }))
    }

    async fn list(&self, owner_id: &str) -> Result<Vec<InterviewSummaryRow>, AppError> {
        Ok(sqlx::query_as::<_, InterviewSummaryRow>(
            r#"
            SELECT i.*, COUNT(q.id) AS question_count
            FROM interview i
            LEFT JOIN interview_question q ON q.interview_id = i.id
            WHERE i.user_id = $1
            GROUP BY i.id
            ORDER BY i.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn replace(
        &self,
        owner_id: &str,
        id: &str,
        form: &InterviewForm,
        questions: &[QuestionDraft],
    ) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE interview
            SET job_position = $1,
                job_description = $2,
                interview_duration = $3,
                interview_type = $4,
                updated_at = NOW()
            WHERE id = $5 AND user_id = $6
            "#,
        )
        .bind(&form.job_position)
        .bind(&form.job_description)
        .bind(&form.interview_duration)
        .bind(&form.interview_type)
        .bind(id)
        .bind(owner_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            // Dropping the transaction rolls it back.
            return Ok(false);
        }

        // Full replace: whatever the new batch omits is gone.
        sqlx::query("DELETE FROM interview_question WHERE interview_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        insert_questions(&mut tx, id, questions).await?;
        tx.commit().await?;

        info!(
            "Replaced interview {id} with {} questions for user {owner_id}",
            questions.len()
        );
        Ok(true)
    }

    async fn delete_question(&self, owner_id: &str, question_id: &str) -> Result<bool, AppError> {
        let deleted = sqlx::query(
            r#"
            DELETE FROM interview_question q
            USING interview i
            WHERE q.id = $1 AND q.interview_id = i.id AND i.user_id = $2
            "#,
        )
        .bind(question_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        info!("Deleted question {question_id} ({deleted} rows) for user {owner_id}");
        Ok(deleted > 0)
    }

    async fn delete(&self, owner_id: &str, id: &str) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM interview_question
            WHERE interview_id IN (SELECT id FROM interview WHERE id = $1 AND user_id = $2)
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .execute(&mut *tx)
        .await?;

        let deleted = sqlx::query("DELETE FROM interview WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        info!("Deleted interview {id} ({deleted} rows) for user {owner_id}");
        Ok(deleted > 0)
    }
}

async fn insert_questions(
    tx: &mut Transaction<'_, Postgres>,
    interview_id: &str,
    questions: &[QuestionDraft],
) -> Result<(), AppError> {
    for (position, question) in questions.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO interview_question (id, interview_id, question, "type", position)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(interview_id)
        .bind(&question.question)
        .bind(&question.question_type)
        .bind(position as i32)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

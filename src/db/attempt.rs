use std::collections::HashMap;

use color_eyre::{eyre::eyre, Result};
use ulid::Ulid;

use super::models::AttemptRow;
use super::Db;

impl Db {
    /// Start a fresh attempt for a course and return its token. Each page
    /// load gets its own attempt, so answers from an earlier load can never
    /// leak into the new one.
    pub async fn create_attempt(&self, course_id: i64) -> Result<String> {
        let token = Ulid::new().to_string();

        sqlx::query("INSERT INTO attempts (attempt_token, course_id) VALUES ($1, $2)")
            .bind(&token)
            .bind(course_id)
            .execute(&self.pool)
            .await?;

        tracing::info!("attempt started for course={course_id}");
        Ok(token)
    }

    pub async fn find_attempt(&self, token: &str) -> Result<Option<AttemptRow>> {
        let attempt = sqlx::query_as::<_, AttemptRow>(
            "SELECT id, course_id, score, submitted_at FROM attempts WHERE attempt_token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(attempt)
    }

    /// Upsert one answer into an open attempt. Re-answering a question
    /// replaces the previous value. The join guarantees the question belongs
    /// to the attempt's own course, so posts carrying a stale token cannot
    /// touch another course's questions.
    pub async fn record_answer(
        &self,
        attempt_id: i64,
        public_id: &str,
        answer: &str,
    ) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO attempt_answers (attempt_id, question_id, answer)
            SELECT a.id, q.id, $3
            FROM attempts a
            JOIN questions q ON q.course_id = a.course_id
            WHERE a.id = $1 AND q.public_id = $2 AND a.submitted_at IS NULL
            ON CONFLICT (attempt_id, question_id) DO UPDATE SET answer = excluded.answer
            "#,
        )
        .bind(attempt_id)
        .bind(public_id)
        .bind(answer)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(eyre!(
                "question '{public_id}' is not open for answering in attempt {attempt_id}"
            ));
        }

        Ok(())
    }

    pub async fn answered_count(&self, attempt_id: i64) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM attempt_answers WHERE attempt_id = $1")
                .bind(attempt_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// All recorded answers of an attempt, keyed by question public id.
    pub async fn answers_map(&self, attempt_id: i64) -> Result<HashMap<String, String>> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            r#"
            SELECT q.public_id, aa.answer
            FROM attempt_answers aa
            JOIN questions q ON q.id = aa.question_id
            WHERE aa.attempt_id = $1
            "#,
        )
        .bind(attempt_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    /// Store the score and close the attempt. Returns false when the attempt
    /// was already submitted, in which case the stored score stands.
    pub async fn finish_attempt(&self, attempt_id: i64, score: f64) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE attempts SET score = $2, submitted_at = CURRENT_TIMESTAMP WHERE id = $1 AND submitted_at IS NULL",
        )
        .bind(attempt_id)
        .bind(score)
        .execute(&self.pool)
        .await?;

        let finished = result.rows_affected() > 0;
        if finished {
            tracing::info!("attempt {attempt_id} submitted with score {score}");
        }

        Ok(finished)
    }
}

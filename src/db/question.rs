use color_eyre::Result;

use super::models::QuestionRow;
use super::Db;
use crate::scoring::AnswerKey;

impl Db {
    pub async fn questions_for_course(&self, course_id: i64) -> Result<Vec<QuestionRow>> {
        let questions = sqlx::query_as::<_, QuestionRow>(
            "SELECT id, public_id, kind, question, answer, position FROM questions WHERE course_id = $1 ORDER BY position",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    pub async fn options_for_question(&self, question_id: i64) -> Result<Vec<String>> {
        let options: Vec<String> = sqlx::query_scalar(
            "SELECT option FROM options WHERE question_id = $1 ORDER BY position",
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(options)
    }

    pub async fn questions_count(&self, course_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions WHERE course_id = $1")
            .bind(course_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// The grading key for a course: every question's public id paired with
    /// its stored correct answer.
    pub async fn answer_key(&self, course_id: i64) -> Result<Vec<AnswerKey>> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            "SELECT public_id, answer FROM questions WHERE course_id = $1 ORDER BY position",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(question_id, correct_answer)| AnswerKey {
                question_id,
                correct_answer,
            })
            .collect())
    }
}

use color_eyre::Result;

use super::models::{CourseOverview, CourseRow, CourseSummary};
use super::Db;
use crate::models::{Language, NewQuestion, QuestionKind, StoredFile};

impl Db {
    /// Insert a course with its stored files, questions and options
    /// atomically in a transaction. Question public ids are assigned from
    /// the insertion order ("q1", "q2", ..) and options keep their order.
    /// Returns the id of the newly created course.
    pub async fn create_course(
        &self,
        name: &str,
        language: Language,
        question_type: QuestionKind,
        num_questions: i32,
        pdf_path: &str,
        attachments: &[StoredFile],
        questions: &[NewQuestion],
    ) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        let course_id: i64 = sqlx::query_scalar(
            "INSERT INTO courses (name, language, question_type, num_questions, pdf_file) VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(name)
        .bind(language.as_str())
        .bind(question_type.as_str())
        .bind(num_questions)
        .bind(pdf_path)
        .fetch_one(&mut *tx)
        .await?;

        for file in attachments {
            sqlx::query(
                "INSERT INTO course_files (course_id, filename, stored_path) VALUES ($1, $2, $3)",
            )
            .bind(course_id)
            .bind(&file.filename)
            .bind(&file.stored_path)
            .execute(&mut *tx)
            .await?;
        }

        for (idx, q) in questions.iter().enumerate() {
            let public_id = format!("q{}", idx + 1);
            let question_id: i64 = sqlx::query_scalar(
                "INSERT INTO questions (course_id, public_id, kind, question, answer, position) VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
            )
            .bind(course_id)
            .bind(&public_id)
            .bind(q.kind.as_str())
            .bind(&q.text)
            .bind(&q.answer)
            .bind(idx as i32)
            .fetch_one(&mut *tx)
            .await?;

            for (opt_idx, option) in q.options.iter().enumerate() {
                sqlx::query(
                    "INSERT INTO options (question_id, option, position) VALUES ($1, $2, $3)",
                )
                .bind(question_id)
                .bind(option)
                .bind(opt_idx as i32)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        tracing::info!(
            "new course created with id: {course_id} ({} questions)",
            questions.len()
        );
        Ok(course_id)
    }

    pub async fn courses(&self) -> Result<Vec<CourseSummary>> {
        let courses = sqlx::query_as::<_, CourseSummary>(
            "SELECT id, name FROM courses ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(courses)
    }

    pub async fn course_overviews(&self) -> Result<Vec<CourseOverview>> {
        let overviews = sqlx::query_as::<_, CourseOverview>(
            r#"
            SELECT
              courses.id AS id,
              courses.name AS name,
              courses.language AS language,
              COUNT(questions.id) AS question_count,
              courses.created_at AS created_at
            FROM courses
            LEFT JOIN questions ON questions.course_id = courses.id
            GROUP BY courses.id, courses.name, courses.language, courses.created_at
            ORDER BY courses.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(overviews)
    }

    pub async fn find_course(&self, course_id: i64) -> Result<Option<CourseRow>> {
        let course = sqlx::query_as::<_, CourseRow>(
            "SELECT id, name, language, question_type, num_questions, pdf_file, created_at FROM courses WHERE id = $1",
        )
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(course)
    }
}

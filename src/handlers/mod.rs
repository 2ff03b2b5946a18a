pub mod admin;
pub mod api;
pub mod student;

use axum::extract::multipart::{Field, Multipart};

use crate::{
    db::Db,
    models::{Language, NewCourseForm, Question, QuestionKind, UploadedFile},
    names,
    rejections::{AppError, ResultExt},
};

/// Pull the course creation fields out of a multipart body. Shared by the
/// admin form and the JSON API, which post the same field names.
pub(crate) async fn parse_course_form(mut multipart: Multipart) -> Result<NewCourseForm, AppError> {
    let mut name = None;
    let mut num_questions = names::DEFAULT_QUESTION_COUNT;
    let mut language = None;
    let mut kind = None;
    let mut pdf = None;
    let mut attachments = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("failed to read multipart field: {e}");
        AppError::Input("failed to read multipart field")
    })? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "courseName" => {
                name = Some(read_text(field).await?);
            }
            "numQuestions" => {
                let text = read_text(field).await?;
                let requested = text
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| AppError::Input("numQuestions must be a number"))?;
                num_questions =
                    requested.clamp(names::MIN_QUESTION_COUNT, names::MAX_QUESTION_COUNT);
            }
            "language" => {
                let text = read_text(field).await?;
                language = Some(
                    text.parse::<Language>()
                        .map_err(|_| AppError::Input("unsupported language"))?,
                );
            }
            "questionType" => {
                let text = read_text(field).await?;
                kind = Some(
                    text.parse::<QuestionKind>()
                        .map_err(|_| AppError::Input("unsupported question type"))?,
                );
            }
            "pdfFile" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                // A file input submitted without a pick arrives with an
                // empty filename.
                if filename.is_empty() {
                    continue;
                }
                if !filename.to_ascii_lowercase().ends_with(".pdf") {
                    return Err(AppError::Input("pdfFile must be a .pdf file"));
                }
                let bytes = read_bytes(field).await?;
                pdf = Some(UploadedFile { filename, bytes });
            }
            other if other.starts_with("additionalFile") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                if filename.is_empty() {
                    continue;
                }
                let bytes = read_bytes(field).await?;
                if bytes.is_empty() {
                    continue;
                }
                attachments.push(UploadedFile { filename, bytes });
            }
            _ => {}
        }
    }

    Ok(NewCourseForm {
        name: name
            .filter(|n| !n.trim().is_empty())
            .ok_or(AppError::Input("missing courseName field"))?,
        num_questions,
        language: language.ok_or(AppError::Input("missing language field"))?,
        kind: kind.ok_or(AppError::Input("missing questionType field"))?,
        pdf: pdf.ok_or(AppError::Input("missing pdfFile field"))?,
        attachments,
    })
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    field.text().await.map_err(|e| {
        tracing::error!("failed to read field data: {e}");
        AppError::Input("failed to read field data")
    })
}

async fn read_bytes(field: Field<'_>) -> Result<Vec<u8>, AppError> {
    let bytes = field.bytes().await.map_err(|e| {
        tracing::error!("failed to read field data: {e}");
        AppError::Input("failed to read field data")
    })?;
    Ok(bytes.to_vec())
}

/// Questions of a course in their stored order, shaped for rendering and
/// for the JSON API. The correct answers stay behind.
pub(crate) async fn load_questions(db: &Db, course_id: i64) -> Result<Vec<Question>, AppError> {
    let rows = db
        .questions_for_course(course_id)
        .await
        .reject("could not load questions")?;

    let mut questions = Vec::with_capacity(rows.len());
    for row in rows {
        let kind = row
            .kind
            .parse::<QuestionKind>()
            .reject("stored question has an unsupported type")?;
        let options = match kind {
            QuestionKind::Mcq => Some(
                db.options_for_question(row.id)
                    .await
                    .reject("could not load question options")?,
            ),
            QuestionKind::Tf => None,
        };
        questions.push(Question {
            id: row.public_id,
            kind,
            text: row.question,
            options,
        });
    }

    Ok(questions)
}

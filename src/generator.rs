//! HTTP client for the external question generation service.
//!
//! The service receives the uploaded course material and answers with a set
//! of questions. Responses are validated here before anything reaches the
//! database; a payload with an unknown question type is an error, never
//! silently skipped.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use color_eyre::{eyre::eyre, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::models::{Language, NewCourseForm, NewQuestion, QuestionKind, UploadedFile};
use crate::utils;

#[derive(Clone)]
pub struct Generator {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl Generator {
    /// Construct the client if we find GENERATOR_URL; otherwise return None.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("GENERATOR_URL").ok()?;
        let api_key = std::env::var("GENERATOR_API_KEY").unwrap_or_default();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .ok()?;

        Some(Self {
            client,
            api_key,
            base_url,
        })
    }

    #[instrument(
        level = "info",
        skip(self, form),
        fields(course = %form.name, kind = %form.kind, requested = form.num_questions)
    )]
    pub async fn generate(&self, form: &NewCourseForm) -> Result<Vec<NewQuestion>> {
        let mut files = Vec::with_capacity(form.attachments.len() + 1);
        files.push(material_file(&form.pdf));
        files.extend(form.attachments.iter().map(material_file));

        let req = GenerationRequest {
            course_name: form.name.clone(),
            language: form.language,
            question_type: form.kind,
            num_questions: form.num_questions,
            files,
        };

        let url = format!("{}/generate-questions", self.base_url);
        let res = self
            .client
            .post(&url)
            .header(USER_AGENT, format!("tast/{}", utils::VERSION))
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            let msg = extract_error(&body).unwrap_or(body);
            return Err(eyre!("generator HTTP {status}: {msg}"));
        }

        let body: GenerationResponse = res.json().await?;
        validate_questions(body.questions, form.kind, form.num_questions)
    }
}

fn material_file(file: &UploadedFile) -> MaterialFile {
    MaterialFile {
        filename: file.filename.clone(),
        content_base64: BASE64.encode(&file.bytes),
    }
}

/// Check every generated question against the requested kind and turn the
/// batch into validated rows. Over-delivery is truncated to the requested
/// count; an empty batch is an error.
fn validate_questions(
    raw: Vec<GeneratedQuestion>,
    expected: QuestionKind,
    requested: i32,
) -> Result<Vec<NewQuestion>> {
    if raw.is_empty() {
        return Err(eyre!("generator returned no questions"));
    }

    let mut questions = Vec::with_capacity(raw.len());
    for (idx, q) in raw.into_iter().enumerate() {
        let n = idx + 1;
        let kind: QuestionKind = q.kind.parse()?;
        if kind != expected {
            return Err(eyre!(
                "question {n} has type '{kind}' but '{expected}' was requested"
            ));
        }
        if q.text.trim().is_empty() {
            return Err(eyre!("question {n} has no text"));
        }

        let options = match kind {
            QuestionKind::Mcq => {
                let options = q.options.unwrap_or_default();
                if options.len() < 2 {
                    return Err(eyre!("question {n} needs at least two options"));
                }
                if !options.contains(&q.answer) {
                    return Err(eyre!("the answer of question {n} is not among its options"));
                }
                options
            }
            QuestionKind::Tf => {
                if q.answer != "true" && q.answer != "false" {
                    return Err(eyre!(
                        "question {n} needs a 'true' or 'false' answer, got '{}'",
                        q.answer
                    ));
                }
                Vec::new()
            }
        };

        questions.push(NewQuestion {
            kind,
            text: q.text,
            options,
            answer: q.answer,
        });
    }

    if questions.len() > requested as usize {
        tracing::warn!(
            "generator returned {} questions, keeping the requested {requested}",
            questions.len()
        );
        questions.truncate(requested as usize);
    }

    Ok(questions)
}

// --- Wire DTOs ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationRequest {
    course_name: String,
    language: Language,
    question_type: QuestionKind,
    num_questions: i32,
    files: Vec<MaterialFile>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MaterialFile {
    filename: String,
    content_base64: String,
}

#[derive(Deserialize)]
struct GenerationResponse {
    questions: Vec<GeneratedQuestion>,
}

#[derive(Deserialize)]
struct GeneratedQuestion {
    #[serde(rename = "type")]
    kind: String,
    text: String,
    options: Option<Vec<String>>,
    answer: String,
}

/// Try to extract a clean error message from a generator error body.
fn extract_error(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: String,
    }
    serde_json::from_str::<ErrorBody>(body).ok().map(|b| b.error)
}

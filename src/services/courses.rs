use color_eyre::Result;

use crate::db::Db;
use crate::generator::Generator;
use crate::models::{Language, NewCourseForm, NewQuestion, QuestionKind, StoredFile};
use crate::storage::Storage;

// ---------------------------------------------------------------------------
// QuestionSource trait (DIP: service defines the abstraction it needs)
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait QuestionSource: Send + Sync {
    fn generate_questions(
        &self,
        form: &NewCourseForm,
    ) -> impl std::future::Future<Output = Result<Vec<NewQuestion>>> + Send;
}

impl QuestionSource for Generator {
    async fn generate_questions(&self, form: &NewCourseForm) -> Result<Vec<NewQuestion>> {
        self.generate(form).await
    }
}

// ---------------------------------------------------------------------------
// CourseRepository trait (DIP: service defines the abstraction it needs)
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait CourseRepository: Send + Sync {
    #[allow(clippy::too_many_arguments)]
    fn persist_course(
        &self,
        name: &str,
        language: Language,
        kind: QuestionKind,
        num_questions: i32,
        pdf_path: &str,
        attachments: &[StoredFile],
        questions: &[NewQuestion],
    ) -> impl std::future::Future<Output = Result<i64>> + Send;
}

impl CourseRepository for Db {
    async fn persist_course(
        &self,
        name: &str,
        language: Language,
        kind: QuestionKind,
        num_questions: i32,
        pdf_path: &str,
        attachments: &[StoredFile],
        questions: &[NewQuestion],
    ) -> Result<i64> {
        self.create_course(
            name,
            language,
            kind,
            num_questions,
            pdf_path,
            attachments,
            questions,
        )
        .await
    }
}

// ---------------------------------------------------------------------------
// Outcome enum
// ---------------------------------------------------------------------------

pub enum CreateCourseOutcome {
    /// Course, files and questions persisted.
    Created { course_id: i64 },
    /// No question generation endpoint is configured.
    GeneratorUnavailable,
    /// The generator failed or returned an unusable payload.
    GenerationFailed,
}

// ---------------------------------------------------------------------------
// CourseService
// ---------------------------------------------------------------------------

pub struct CourseService<G: QuestionSource = Generator, R: CourseRepository = Db> {
    source: Option<G>,
    repo: R,
    storage: Storage,
}

impl<G: QuestionSource + Clone, R: CourseRepository + Clone> Clone for CourseService<G, R> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            repo: self.repo.clone(),
            storage: self.storage.clone(),
        }
    }
}

impl<G: QuestionSource, R: CourseRepository> CourseService<G, R> {
    pub fn new(source: Option<G>, repo: R, storage: Storage) -> Self {
        Self {
            source,
            repo,
            storage,
        }
    }

    /// Whether question generation is configured.
    pub fn generation_enabled(&self) -> bool {
        self.source.is_some()
    }

    /// Run the whole course creation flow: generate questions from the
    /// material, store the files, persist everything. Expected business
    /// failures come back as outcomes; only infrastructure errors are `Err`.
    pub async fn create_course(&self, form: NewCourseForm) -> Result<CreateCourseOutcome> {
        let source = match &self.source {
            Some(source) => source,
            None => {
                tracing::warn!(
                    "course creation for '{}' rejected: no question generator configured",
                    form.name
                );
                return Ok(CreateCourseOutcome::GeneratorUnavailable);
            }
        };

        let questions = match source.generate_questions(&form).await {
            Ok(questions) => questions,
            Err(e) => {
                tracing::error!("question generation failed for '{}': {e}", form.name);
                return Ok(CreateCourseOutcome::GenerationFailed);
            }
        };

        let upload = self
            .storage
            .store_course_files(&form.pdf, &form.attachments)
            .await?;

        let course_id = self
            .repo
            .persist_course(
                &form.name,
                form.language,
                form.kind,
                form.num_questions,
                &upload.pdf_path,
                &upload.attachments,
                &questions,
            )
            .await?;

        Ok(CreateCourseOutcome::Created { course_id })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::UploadedFile;

    fn form() -> NewCourseForm {
        NewCourseForm {
            name: "Math".to_string(),
            num_questions: 2,
            language: Language::Ar,
            kind: QuestionKind::Mcq,
            pdf: UploadedFile {
                filename: "notes.pdf".to_string(),
                bytes: b"pdf bytes".to_vec(),
            },
            attachments: Vec::new(),
        }
    }

    fn questions() -> Vec<NewQuestion> {
        vec![
            NewQuestion {
                kind: QuestionKind::Mcq,
                text: "2+2?".to_string(),
                options: vec!["3".to_string(), "4".to_string()],
                answer: "4".to_string(),
            },
            NewQuestion {
                kind: QuestionKind::Mcq,
                text: "3+3?".to_string(),
                options: vec!["5".to_string(), "6".to_string()],
                answer: "6".to_string(),
            },
        ]
    }

    fn test_storage() -> Storage {
        use std::sync::atomic::{AtomicU32, Ordering};
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        Storage::new(
            std::env::temp_dir().join(format!("tast_svc_{}_{}", std::process::id(), id)),
        )
    }

    #[tokio::test]
    async fn no_generator_reports_unavailable_without_persisting() {
        let repo = MockCourseRepository::new();
        let svc: CourseService<MockQuestionSource, _> =
            CourseService::new(None, repo, test_storage());

        let outcome = svc.create_course(form()).await.unwrap();
        assert!(matches!(outcome, CreateCourseOutcome::GeneratorUnavailable));
    }

    #[tokio::test]
    async fn generation_failure_reports_failed_without_persisting() {
        let mut source = MockQuestionSource::new();
        source
            .expect_generate_questions()
            .returning(|_| Box::pin(async { Err(color_eyre::eyre::eyre!("boom")) }));
        let repo = MockCourseRepository::new();

        let svc = CourseService::new(Some(source), repo, test_storage());
        let outcome = svc.create_course(form()).await.unwrap();
        assert!(matches!(outcome, CreateCourseOutcome::GenerationFailed));
    }

    #[tokio::test]
    async fn successful_generation_persists_and_reports_the_course_id() {
        let mut source = MockQuestionSource::new();
        source
            .expect_generate_questions()
            .returning(|_| Box::pin(async { Ok(questions()) }));

        let mut repo = MockCourseRepository::new();
        repo.expect_persist_course()
            .withf(|name, language, kind, num, pdf_path, _attachments, questions| {
                name == "Math"
                    && *language == Language::Ar
                    && *kind == QuestionKind::Mcq
                    && *num == 2
                    && pdf_path.ends_with("notes.pdf")
                    && questions.len() == 2
            })
            .returning(|_, _, _, _, _, _, _| Box::pin(async { Ok(7) }));

        let svc = CourseService::new(Some(source), repo, test_storage());
        let outcome = svc.create_course(form()).await.unwrap();
        assert!(matches!(outcome, CreateCourseOutcome::Created { course_id: 7 }));
    }
}

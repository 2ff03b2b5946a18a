use axum::{
    extract::{Multipart, Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::{
    models, names,
    rejections::{ApiError, AppError, ResultExt},
    scoring, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::API_COURSES_URL, get(courses))
        .route("/api/course/{course_id}/questions", get(course_questions))
        .route(names::API_SUBMIT_QUIZ_URL, post(submit_quiz))
        .route(names::API_CREATE_COURSE_URL, post(create_course))
}

async fn courses(State(state): State<AppState>) -> Result<Json<models::CourseList>, ApiError> {
    let rows = state.db.courses().await.reject("could not list courses")?;

    let courses = rows
        .into_iter()
        .map(|row| models::Course {
            id: row.id,
            name: row.name,
        })
        .collect();

    Ok(Json(models::CourseList { courses }))
}

async fn course_questions(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<Json<models::QuestionList>, ApiError> {
    let course = state
        .db
        .find_course(course_id)
        .await
        .reject("could not look up course")?
        .ok_or(AppError::NotFound("course not found"))?;

    let questions = super::load_questions(&state.db, course.id).await?;

    Ok(Json(models::QuestionList { questions }))
}

async fn submit_quiz(
    State(state): State<AppState>,
    Json(body): Json<models::SubmitQuizRequest>,
) -> Result<Json<models::QuizResult>, ApiError> {
    let course = state
        .db
        .find_course(body.course_id)
        .await
        .reject("could not look up course")?
        .ok_or(AppError::NotFound("course not found"))?;

    let key = state
        .db
        .answer_key(course.id)
        .await
        .reject("could not load answer key")?;

    let score = match scoring::grade(&key, &body.answers) {
        Ok(score) => score,
        Err(e @ scoring::GradeError::Incomplete { .. }) => {
            tracing::warn!("quiz submission rejected: {e}");
            return Err(AppError::Input("every question must be answered").into());
        }
        Err(e @ scoring::GradeError::UnknownQuestion(_)) => {
            tracing::warn!("quiz submission rejected: {e}");
            return Err(AppError::Input("answer for an unknown question").into());
        }
    };

    Ok(Json(models::QuizResult { score }))
}

async fn create_course(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<models::CreateCourseResult>, ApiError> {
    use crate::services::courses::CreateCourseOutcome;

    let form = super::parse_course_form(multipart).await?;

    let success = match state.courses.create_course(form).await {
        Ok(CreateCourseOutcome::Created { course_id }) => {
            tracing::info!(course_id, "course created via the api");
            true
        }
        Ok(CreateCourseOutcome::GeneratorUnavailable)
        | Ok(CreateCourseOutcome::GenerationFailed) => false,
        Err(e) => {
            tracing::error!("course creation failed: {e:?}");
            false
        }
    };

    Ok(Json(models::CreateCourseResult { success }))
}

use axum::{
    extract::{Form, Path, State},
    http::{header::SET_COOKIE, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::{
    extractors::{AttemptToken, IsHtmx, Locale},
    names,
    rejections::{AppError, ResultExt},
    scoring, utils, views, AppState,
};

use crate::views::student as student_views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog))
        .route("/course/{course_id}", get(course_page))
        .route(names::SUBMIT_ANSWER_URL, post(submit_answer))
        .route(names::SUBMIT_QUIZ_URL, post(submit_quiz))
        .route(names::SET_LOCALE_URL, post(set_locale))
}

async fn catalog(
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
) -> Result<maud::Markup, AppError> {
    let courses = state.db.courses().await.reject("could not list courses")?;

    Ok(views::render(
        is_htmx,
        "Courses",
        student_views::catalog(&courses, &locale),
        &locale,
    ))
}

async fn course_page(
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Path(course_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let course = state
        .db
        .find_course(course_id)
        .await
        .reject("could not look up course")?
        .ok_or(AppError::NotFound("course not found"))?;

    let questions = super::load_questions(&state.db, course.id).await?;

    // A fresh attempt on every load: whatever an earlier visit recorded
    // stays on its own token and never bleeds into this one.
    let token = state
        .db
        .create_attempt(course.id)
        .await
        .reject("could not create attempt")?;

    let body = student_views::quiz(
        student_views::QuizData {
            course_name: course.name.clone(),
            questions,
        },
        &locale,
    );
    let page = views::render(is_htmx, &course.name, body, &locale);

    let cookie = utils::cookie(names::ATTEMPT_COOKIE_NAME, &token, state.secure_cookies)
        .reject("could not build attempt cookie")?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);

    Ok((headers, page))
}

#[derive(Deserialize)]
struct SubmitAnswerForm {
    question_id: String,
    answer: String,
}

async fn submit_answer(
    State(state): State<AppState>,
    AttemptToken(token): AttemptToken,
    Locale(locale): Locale,
    Form(body): Form<SubmitAnswerForm>,
) -> Result<maud::Markup, AppError> {
    let attempt = state
        .db
        .find_attempt(&token)
        .await
        .reject("could not look up attempt")?
        .ok_or(AppError::Input("no active quiz attempt"))?;

    state
        .db
        .record_answer(attempt.id, &body.question_id, &body.answer)
        .await
        .reject_input("could not record answer")?;

    let answered = state
        .db
        .answered_count(attempt.id)
        .await
        .reject("could not count answers")?;
    let total = state
        .db
        .questions_count(attempt.course_id)
        .await
        .reject("could not count questions")?;

    Ok(student_views::submit_controls(answered, total, &locale))
}

async fn submit_quiz(
    State(state): State<AppState>,
    AttemptToken(token): AttemptToken,
    Locale(locale): Locale,
) -> Result<maud::Markup, AppError> {
    let attempt = state
        .db
        .find_attempt(&token)
        .await
        .reject("could not look up attempt")?
        .ok_or(AppError::Input("no active quiz attempt"))?;

    // A repeated submit renders the score that was stored the first time.
    if attempt.submitted_at.is_some() {
        if let Some(score) = attempt.score {
            return Ok(views::titled("Result", student_views::result(score, &locale)));
        }
    }

    let key = state
        .db
        .answer_key(attempt.course_id)
        .await
        .reject("could not load answer key")?;
    let answers = state
        .db
        .answers_map(attempt.id)
        .await
        .reject("could not load answers")?;

    let score = scoring::grade(&key, &answers).map_err(|e| {
        tracing::warn!("quiz submission rejected: {e}");
        AppError::Input("every question must be answered first")
    })?;

    // Answers are frozen once submitted_at is set, so losing this race
    // still leaves the same score on the row.
    state
        .db
        .finish_attempt(attempt.id, score)
        .await
        .reject("could not finish attempt")?;

    Ok(views::titled("Result", student_views::result(score, &locale)))
}

#[derive(Deserialize)]
struct SetLocaleBody {
    locale: String,
}

async fn set_locale(
    State(state): State<AppState>,
    Json(body): Json<SetLocaleBody>,
) -> Result<impl IntoResponse, AppError> {
    let locale = match body.locale.as_str() {
        "en" => "en",
        _ => names::DEFAULT_LOCALE,
    };
    let cookie = utils::cookie(names::LOCALE_COOKIE_NAME, locale, state.secure_cookies)
        .reject("could not build locale cookie")?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    headers.insert("HX-Refresh", HeaderValue::from_static("true"));

    Ok((headers, ""))
}

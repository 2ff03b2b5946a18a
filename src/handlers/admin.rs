use axum::{
    extract::{Multipart, State},
    routing::{get, post},
    Router,
};
use maud::Markup;

use crate::{
    extractors::{IsHtmx, Locale},
    names,
    rejections::{AppError, ResultExt},
    views,
    views::admin as admin_views,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::ADMIN_URL, get(admin_dashboard))
        .route(names::CREATE_COURSE_URL, post(create_course))
}

async fn admin_dashboard(
    IsHtmx(is_htmx): IsHtmx,
    State(state): State<AppState>,
    Locale(locale): Locale,
) -> Result<Markup, AppError> {
    let courses = state
        .db
        .course_overviews()
        .await
        .reject("could not get course overviews")?;

    Ok(views::render(
        is_htmx,
        "Admin",
        admin_views::dashboard(admin_views::CreateState::Blank, &courses, &locale),
        &locale,
    ))
}

async fn create_course(
    State(state): State<AppState>,
    Locale(locale): Locale,
    multipart: Multipart,
) -> Result<Markup, AppError> {
    use crate::services::courses::CreateCourseOutcome;

    let form = super::parse_course_form(multipart).await?;
    let retained = admin_views::CreateState::Failed {
        name: form.name.clone(),
        num_questions: form.num_questions,
        language: form.language,
        kind: form.kind,
    };

    let create_state = match state.courses.create_course(form).await {
        Ok(CreateCourseOutcome::Created { course_id }) => {
            tracing::info!(course_id, "course created from the admin form");
            admin_views::CreateState::Created
        }
        Ok(CreateCourseOutcome::GeneratorUnavailable)
        | Ok(CreateCourseOutcome::GenerationFailed) => retained,
        Err(e) => {
            tracing::error!("course creation failed: {e:?}");
            retained
        }
    };

    let courses = state
        .db
        .course_overviews()
        .await
        .reject("could not get course overviews")?;

    Ok(views::titled(
        "Admin",
        admin_views::dashboard(create_state, &courses, &locale),
    ))
}

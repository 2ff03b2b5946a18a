rust_i18n::i18n!("locales", fallback = "en");

pub mod db;
pub mod extractors;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod names;
pub mod rejections;
pub mod scoring;
pub mod services;
pub mod statics;
pub mod storage;
pub mod utils;
pub mod views;

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub db: db::Db,
    pub courses: services::courses::CourseService,
    pub secure_cookies: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::student::routes())
        .merge(handlers::admin::routes())
        .merge(handlers::api::routes())
        .layer(middleware::from_fn(csrf_check))
        .nest("/static", statics::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn csrf_check(
    req: axum::http::Request<axum::body::Body>,
    next: middleware::Next,
) -> axum::response::Response {
    use axum::http::{Method, StatusCode};
    use axum::response::IntoResponse;

    let state_changing = [Method::POST, Method::PUT, Method::PATCH, Method::DELETE];

    // The `/api` endpoints serve plain JSON clients, which never carry
    // htmx headers.
    let is_api = req.uri().path().starts_with("/api/");

    if state_changing.contains(req.method()) && !is_api && !extractors::htmx_request(req.headers())
    {
        return (StatusCode::FORBIDDEN, "CSRF check failed").into_response();
    }

    next.run(req).await
}

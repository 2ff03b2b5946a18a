mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use tast::db::Db;
use tast::models::{Language, NewQuestion, QuestionKind};
use tast::services::courses::CourseService;
use tast::storage::Storage;
use tast::{names, router, AppState};
use tower::ServiceExt;

async fn app_with_db() -> (Router, Db) {
    let db = common::create_test_db().await;
    let uploads = std::env::temp_dir().join(format!("tast_uploads_{}", std::process::id()));
    let courses: CourseService = CourseService::new(None, db.clone(), Storage::new(uploads));
    let app = router(AppState {
        db: db.clone(),
        courses,
        secure_cookies: false,
    });
    (app, db)
}

async fn seed_course(db: &Db) -> i64 {
    let questions = vec![
        NewQuestion {
            kind: QuestionKind::Mcq,
            text: "What is 2+2?".to_string(),
            options: vec!["3".to_string(), "4".to_string(), "5".to_string()],
            answer: "4".to_string(),
        },
        NewQuestion {
            kind: QuestionKind::Tf,
            text: "The sky is blue.".to_string(),
            options: Vec::new(),
            answer: "true".to_string(),
        },
    ];
    db.create_course(
        "Math",
        Language::Ar,
        QuestionKind::Mcq,
        questions.len() as i32,
        "deadbeef/material.pdf",
        &[],
        &questions,
    )
    .await
    .expect("failed to seed course")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request build should succeed")
}

fn answer_post(cookie: &str, question_id: &str, answer: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(names::SUBMIT_ANSWER_URL)
        .header("HX-Request", "true")
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("question_id={question_id}&answer={answer}")))
        .expect("request build should succeed")
}

fn submit_post(cookie: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(names::SUBMIT_QUIZ_URL)
        .header("HX-Request", "true")
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .expect("request build should succeed")
}

/// The attempt cookie pair (`attempt_token=...`) from a course page response.
fn attempt_cookie(resp: &axum::response::Response) -> String {
    let header = resp
        .headers()
        .get(header::SET_COOKIE)
        .expect("course page should set the attempt cookie")
        .to_str()
        .expect("cookie should be ASCII");
    let pair = header.split(';').next().expect("cookie should have a value");
    assert!(pair.starts_with(names::ATTEMPT_COOKIE_NAME));
    pair.to_string()
}

async fn text_body(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
}

// --- Catalog tests ---

#[tokio::test]
async fn the_catalog_links_to_each_course() {
    let (app, db) = app_with_db().await;
    let course_id = seed_course(&db).await;

    let resp = app.oneshot(get("/")).await.expect("router should respond");
    assert_eq!(resp.status(), StatusCode::OK);

    let page = text_body(resp).await;
    assert!(page.contains("Math"));
    assert!(page.contains(&format!(r#"href="/course/{course_id}""#)));
}

#[tokio::test]
async fn a_missing_course_page_is_not_found() {
    let (app, _db) = app_with_db().await;

    let resp = app
        .oneshot(get("/course/999"))
        .await
        .expect("router should respond");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- Quiz flow tests ---

#[tokio::test]
async fn answering_every_question_unlocks_submission() {
    let (app, db) = app_with_db().await;
    let course_id = seed_course(&db).await;

    let resp = app
        .clone()
        .oneshot(get(&format!("/course/{course_id}")))
        .await
        .expect("router should respond");
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = attempt_cookie(&resp);

    let page = text_body(resp).await;
    assert!(page.contains("What is 2+2?"));
    assert!(page.contains("The sky is blue."));
    assert!(page.contains("disabled"), "submit starts locked: {page}");

    // One of two answered: still locked.
    let resp = app
        .clone()
        .oneshot(answer_post(&cookie, "q1", "4"))
        .await
        .expect("router should respond");
    assert_eq!(resp.status(), StatusCode::OK);
    let controls = text_body(resp).await;
    assert!(controls.contains("disabled"), "submit stays locked at 1 of 2: {controls}");

    // Both answered: unlocked.
    let resp = app
        .clone()
        .oneshot(answer_post(&cookie, "q2", "true"))
        .await
        .expect("router should respond");
    assert_eq!(resp.status(), StatusCode::OK);
    let controls = text_body(resp).await;
    assert!(!controls.contains("disabled"), "submit unlocks at 2 of 2: {controls}");
}

#[tokio::test]
async fn a_finished_quiz_shows_its_score_on_every_submit() {
    let (app, db) = app_with_db().await;
    let course_id = seed_course(&db).await;

    let resp = app
        .clone()
        .oneshot(get(&format!("/course/{course_id}")))
        .await
        .expect("router should respond");
    let cookie = attempt_cookie(&resp);

    for (question_id, answer) in [("q1", "4"), ("q2", "true")] {
        let resp = app
            .clone()
            .oneshot(answer_post(&cookie, question_id, answer))
            .await
            .expect("router should respond");
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = app
        .clone()
        .oneshot(submit_post(&cookie))
        .await
        .expect("router should respond");
    assert_eq!(resp.status(), StatusCode::OK);
    let result = text_body(resp).await;
    assert!(result.contains("100"), "both answers were correct: {result}");

    // Submitting again renders the stored score instead of failing.
    let resp = app
        .clone()
        .oneshot(submit_post(&cookie))
        .await
        .expect("router should respond");
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(text_body(resp).await.contains("100"));
}

#[tokio::test]
async fn an_incomplete_quiz_cannot_be_submitted() {
    let (app, db) = app_with_db().await;
    let course_id = seed_course(&db).await;

    let resp = app
        .clone()
        .oneshot(get(&format!("/course/{course_id}")))
        .await
        .expect("router should respond");
    let cookie = attempt_cookie(&resp);

    let resp = app
        .clone()
        .oneshot(answer_post(&cookie, "q1", "4"))
        .await
        .expect("router should respond");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(submit_post(&cookie))
        .await
        .expect("router should respond");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reloading_the_course_page_resets_progress() {
    let (app, db) = app_with_db().await;
    let course_id = seed_course(&db).await;

    let resp = app
        .clone()
        .oneshot(get(&format!("/course/{course_id}")))
        .await
        .expect("router should respond");
    let first_cookie = attempt_cookie(&resp);

    for (question_id, answer) in [("q1", "4"), ("q2", "true")] {
        app.clone()
            .oneshot(answer_post(&first_cookie, question_id, answer))
            .await
            .expect("router should respond");
    }

    // The reload hands out a fresh attempt with nothing answered yet.
    let resp = app
        .clone()
        .oneshot(get(&format!("/course/{course_id}")))
        .await
        .expect("router should respond");
    let second_cookie = attempt_cookie(&resp);
    assert_ne!(first_cookie, second_cookie);

    let resp = app
        .clone()
        .oneshot(submit_post(&second_cookie))
        .await
        .expect("router should respond");
    assert_eq!(
        resp.status(),
        StatusCode::BAD_REQUEST,
        "the fresh attempt has no answers to submit"
    );
}

#[tokio::test]
async fn posting_an_answer_without_an_attempt_is_rejected() {
    let (app, db) = app_with_db().await;
    seed_course(&db).await;

    let req = Request::builder()
        .method(Method::POST)
        .uri(names::SUBMIT_ANSWER_URL)
        .header("HX-Request", "true")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("question_id=q1&answer=4"))
        .expect("request build should succeed");

    let resp = app.oneshot(req).await.expect("router should respond");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- Locale tests ---

#[tokio::test]
async fn pages_default_to_arabic_and_honor_the_lang_cookie() {
    let (app, _db) = app_with_db().await;

    let resp = app.clone().oneshot(get("/")).await.expect("router should respond");
    let page = text_body(resp).await;
    assert!(page.contains(r#"dir="rtl""#), "Arabic is the default");
    assert!(page.contains(r#"lang="ar""#));

    let req = Request::builder()
        .uri("/")
        .header(header::COOKIE, "lang=en")
        .body(Body::empty())
        .expect("request build should succeed");
    let resp = app.clone().oneshot(req).await.expect("router should respond");
    let page = text_body(resp).await;
    assert!(page.contains(r#"dir="ltr""#));
    assert!(page.contains(r#"lang="en""#));

    let req = Request::builder()
        .uri("/")
        .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
        .body(Body::empty())
        .expect("request build should succeed");
    let resp = app.clone().oneshot(req).await.expect("router should respond");
    assert!(text_body(resp).await.contains(r#"dir="ltr""#));
}

#[tokio::test]
async fn switching_the_locale_sets_the_cookie_and_refreshes() {
    let (app, _db) = app_with_db().await;

    let req = Request::builder()
        .method(Method::POST)
        .uri(names::SET_LOCALE_URL)
        .header("HX-Request", "true")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"locale":"en"}"#))
        .expect("request build should succeed");

    let resp = app.oneshot(req).await.expect("router should respond");
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .expect("locale cookie should be set")
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("lang=en"));
    assert_eq!(
        resp.headers().get("HX-Refresh").map(|v| v.to_str().unwrap()),
        Some("true"),
        "the page reloads to re-render in the new locale"
    );
}

#[tokio::test]
async fn unsupported_locales_fall_back_to_the_default() {
    let (app, _db) = app_with_db().await;

    let req = Request::builder()
        .method(Method::POST)
        .uri(names::SET_LOCALE_URL)
        .header("HX-Request", "true")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"locale":"fr"}"#))
        .expect("request build should succeed");

    let resp = app.oneshot(req).await.expect("router should respond");
    let cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .expect("locale cookie should be set")
        .to_str()
        .unwrap();
    assert!(cookie.starts_with(&format!("lang={}", names::DEFAULT_LOCALE)));
}

// --- Admin page tests ---

#[tokio::test]
async fn the_admin_page_shows_the_form_and_existing_courses() {
    let (app, db) = app_with_db().await;
    seed_course(&db).await;

    let resp = app
        .oneshot(get(names::ADMIN_URL))
        .await
        .expect("router should respond");
    assert_eq!(resp.status(), StatusCode::OK);

    let page = text_body(resp).await;
    assert!(page.contains(r#"name="courseName""#));
    assert!(page.contains(r#"name="pdfFile""#));
    assert!(page.contains("Math"), "existing courses are listed: {page}");
}

// --- Static asset tests ---

#[tokio::test]
async fn the_stylesheet_is_served_with_its_content_type() {
    let (app, _db) = app_with_db().await;

    let resp = app
        .oneshot(get("/static/index.css"))
        .await
        .expect("router should respond");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).map(|v| v.to_str().unwrap()),
        Some("text/css")
    );
}

#[tokio::test]
async fn a_missing_static_file_is_not_found() {
    let (app, _db) = app_with_db().await;

    let resp = app
        .oneshot(get("/static/nope.css"))
        .await
        .expect("router should respond");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

pub const ADMIN_URL: &str = "/admin";
pub const CREATE_COURSE_URL: &str = "/admin/create-course";
pub const SUBMIT_ANSWER_URL: &str = "/attempt/answer";
pub const SUBMIT_QUIZ_URL: &str = "/attempt/submit";

pub const API_COURSES_URL: &str = "/api/courses";
pub const API_SUBMIT_QUIZ_URL: &str = "/api/submit-quiz";
pub const API_CREATE_COURSE_URL: &str = "/api/create-course";

pub const ATTEMPT_COOKIE_NAME: &str = "attempt_token";

pub fn course_page_url(course_id: i64) -> String {
    format!("/course/{course_id}")
}

pub fn api_questions_url(course_id: i64) -> String {
    format!("/api/course/{course_id}/questions")
}

// Course creation bounds
pub const MIN_QUESTION_COUNT: i32 = 1;
pub const MAX_QUESTION_COUNT: i32 = 50;
pub const DEFAULT_QUESTION_COUNT: i32 = 10;

// i18n
pub const LOCALE_COOKIE_NAME: &str = "lang";
pub const DEFAULT_LOCALE: &str = "ar";
pub const SET_LOCALE_URL: &str = "/set-locale";

// Database model structs

#[derive(sqlx::FromRow)]
pub struct CourseSummary {
    pub id: i64,
    pub name: String,
}

#[derive(sqlx::FromRow)]
pub struct CourseRow {
    pub id: i64,
    pub name: String,
    pub language: String,
    pub question_type: String,
    pub num_questions: i32,
    pub pdf_file: String,
    pub created_at: String,
}

#[derive(sqlx::FromRow)]
pub struct CourseOverview {
    pub id: i64,
    pub name: String,
    pub language: String,
    pub question_count: i64,
    pub created_at: String,
}

#[derive(sqlx::FromRow)]
pub struct QuestionRow {
    pub id: i64,
    pub public_id: String,
    pub kind: String,
    pub question: String,
    pub answer: String,
    pub position: i32,
}

#[derive(sqlx::FromRow)]
pub struct AttemptRow {
    pub id: i64,
    pub course_id: i64,
    pub score: Option<f64>,
    pub submitted_at: Option<String>,
}

use std::fmt;
use std::str::FromStr;

use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, PartialEq)]
pub struct Course {
    pub id: i64,
    pub name: String,
}

#[derive(Serialize, Debug)]
pub struct CourseList {
    pub courses: Vec<Course>,
}

// The stored correct answer never leaves the server, so there is no field
// for it here.
#[derive(Serialize, Debug)]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

#[derive(Serialize, Debug)]
pub struct QuestionList {
    pub questions: Vec<Question>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Mcq,
    Tf,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Mcq => "mcq",
            QuestionKind::Tf => "tf",
        }
    }
}

impl FromStr for QuestionKind {
    type Err = color_eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mcq" => Ok(QuestionKind::Mcq),
            "tf" => Ok(QuestionKind::Tf),
            other => Err(eyre!("unsupported question type '{other}'")),
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ar,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Ar => "ar",
            Language::En => "en",
        }
    }
}

impl FromStr for Language {
    type Err = color_eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ar" => Ok(Language::Ar),
            "en" => Ok(Language::En),
            other => Err(eyre!("unsupported language '{other}'")),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    pub course_id: i64,
    pub answers: std::collections::HashMap<String, String>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct QuizResult {
    pub score: f64,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct CreateCourseResult {
    pub success: bool,
}

pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub struct StoredFile {
    pub filename: String,
    pub stored_path: String,
}

// A generated question that has already passed ingest validation.
#[derive(Debug)]
pub struct NewQuestion {
    pub kind: QuestionKind,
    pub text: String,
    pub options: Vec<String>,
    pub answer: String,
}

pub struct NewCourseForm {
    pub name: String,
    pub num_questions: i32,
    pub language: Language,
    pub kind: QuestionKind,
    pub pdf: UploadedFile,
    pub attachments: Vec<UploadedFile>,
}

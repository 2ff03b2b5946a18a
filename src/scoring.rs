use std::collections::HashMap;
use std::fmt;

pub struct AnswerKey {
    pub question_id: String,
    pub correct_answer: String,
}

#[derive(Debug, PartialEq)]
pub enum GradeError {
    Incomplete { answered: usize, total: usize },
    UnknownQuestion(String),
}

impl fmt::Display for GradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeError::Incomplete { answered, total } => {
                write!(f, "submission is incomplete ({answered} of {total} answered)")
            }
            GradeError::UnknownQuestion(id) => {
                write!(f, "answer for unknown question '{id}'")
            }
        }
    }
}

impl std::error::Error for GradeError {}

pub fn percentage(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (correct as f64 * 100.0 / total as f64).round()
}

/// Grades a full answer set against the stored key. Every submitted id must
/// belong to the key and every key question must be answered.
pub fn grade(key: &[AnswerKey], submitted: &HashMap<String, String>) -> Result<f64, GradeError> {
    for id in submitted.keys() {
        if !key.iter().any(|k| k.question_id == *id) {
            return Err(GradeError::UnknownQuestion(id.clone()));
        }
    }
    if submitted.len() != key.len() {
        return Err(GradeError::Incomplete {
            answered: submitted.len(),
            total: key.len(),
        });
    }
    let correct = key
        .iter()
        .filter(|k| submitted.get(&k.question_id).map(String::as_str) == Some(k.correct_answer.as_str()))
        .count();
    Ok(percentage(correct, key.len()))
}

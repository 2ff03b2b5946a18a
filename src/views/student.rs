use maud::{html, Markup};
use rust_i18n::t;

use crate::{
    db::CourseSummary,
    models::{Question, QuestionKind},
    names,
    views::components,
};

pub fn catalog(courses: &[CourseSummary], locale: &str) -> Markup {
    html! {
        h1 { (t!("student.catalog_title", locale = locale)) }

        @if courses.is_empty() {
            p { (t!("student.no_courses", locale = locale)) }
        } @else {
            div."course-grid" {
                @for course in courses {
                    article."course-card" {
                        h3 {
                            (components::nav_link(
                                &names::course_page_url(course.id),
                                html! { (course.name) },
                            ))
                        }
                        p { (t!("student.start_quiz_hint", locale = locale)) }
                    }
                }
            }
        }
    }
}

pub struct QuizData {
    pub course_name: String,
    pub questions: Vec<Question>,
}

pub fn quiz(data: QuizData, locale: &str) -> Markup {
    let total = data.questions.len();

    html! {
        h1 { (data.course_name) }
        p { (t!("student.answer_all_hint", locale = locale)) }

        @for (idx, question) in data.questions.iter().enumerate() {
            (question_card(idx, total, question, locale))
        }

        (submit_controls(0, total as i64, locale))
    }
}

fn question_card(idx: usize, total: usize, question: &Question, locale: &str) -> Markup {
    html! {
        article."question-card" {
            p style="color: #666; font-size: 0.9rem; margin-bottom: 0.5rem;" {
                (t!("student.question_prefix", locale = locale))
                strong { (idx + 1) }
                (t!("student.question_of", locale = locale))
                (total)
            }

            h3 { (question.text) }

            form hx-post=(names::SUBMIT_ANSWER_URL)
                 hx-trigger="change"
                 hx-target="#submit-controls"
                 hx-swap="outerHTML" {
                input type="hidden" name="question_id" value=(question.id);
                fieldset {
                    @match question.kind {
                        QuestionKind::Mcq => {
                            @for (opt_idx, option) in question.options.iter().flatten().enumerate() {
                                label {
                                    input type="radio" name="answer" value=(option);
                                    (opt_idx + 1) ". " (option)
                                }
                            }
                        }
                        QuestionKind::Tf => {
                            label {
                                input type="radio" name="answer" value="true";
                                (t!("student.true_choice", locale = locale))
                            }
                            label {
                                input type="radio" name="answer" value="false";
                                (t!("student.false_choice", locale = locale))
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Progress line plus the submit button. Swapped in place after every
/// recorded answer so the button unlocks exactly when the last question
/// gets one.
pub fn submit_controls(answered: i64, total: i64, locale: &str) -> Markup {
    let complete = answered == total;

    html! {
        div id="submit-controls" style="margin-top: 1rem;" {
            p {
                (t!("student.progress", locale = locale, answered = answered, total = total))
            }
            button hx-post=(names::SUBMIT_QUIZ_URL)
                   hx-target="main"
                   hx-swap="innerHTML"
                   disabled[!complete] {
                (t!("student.submit_quiz", locale = locale))
            }
        }
    }
}

pub fn result(score: f64, locale: &str) -> Markup {
    html! {
        article style="width: fit-content;" {
            h2 { (t!("student.result_label", locale = locale)) " " (score) "%" }
            p {
                (components::nav_link("/", html! {
                    (t!("student.back_to_catalog", locale = locale))
                }))
            }
        }
    }
}

use maud::{html, Markup};
use rust_i18n::t;

use crate::{
    db::CourseOverview,
    models::{Language, QuestionKind},
    names,
    views::components,
};

/// What the creation form should say about the previous submission, if any.
pub enum CreateState {
    Blank,
    Created,
    Failed {
        name: String,
        num_questions: i32,
        language: Language,
        kind: QuestionKind,
    },
}

pub fn dashboard(state: CreateState, courses: &[CourseOverview], locale: &str) -> Markup {
    html! {
        h1 { (t!("admin.title", locale = locale)) }

        @match &state {
            CreateState::Created => {
                (components::success_notice(&t!("admin.create_success", locale = locale)))
            }
            CreateState::Failed { .. } => {
                (components::error_notice(&t!("admin.create_failed", locale = locale)))
            }
            CreateState::Blank => {}
        }

        (create_form(&state, locale))

        (course_table(courses, locale))
    }
}

fn create_form(state: &CreateState, locale: &str) -> Markup {
    // A failed submission keeps its text fields so the admin only has to
    // re-pick the files.
    let (name, num_questions, language, kind) = match state {
        CreateState::Failed {
            name,
            num_questions,
            language,
            kind,
        } => (name.as_str(), *num_questions, *language, *kind),
        _ => (
            "",
            names::DEFAULT_QUESTION_COUNT,
            Language::Ar,
            QuestionKind::Mcq,
        ),
    };

    html! {
        article style="width: fit-content;" {
            h3 { (t!("admin.create_title", locale = locale)) }
            form hx-post=(names::CREATE_COURSE_URL)
                 hx-target="main"
                 hx-swap="innerHTML"
                 enctype="multipart/form-data" {
                label {
                    (t!("admin.course_name", locale = locale))
                    input name="courseName"
                          type="text"
                          required="true"
                          autocomplete="off"
                          value=(name)
                          placeholder=(t!("admin.course_name", locale = locale))
                          aria-label=(t!("admin.course_name", locale = locale));
                }
                label {
                    (t!("admin.num_questions", locale = locale))
                    input name="numQuestions"
                          type="number"
                          min=(names::MIN_QUESTION_COUNT)
                          max=(names::MAX_QUESTION_COUNT)
                          value=(num_questions)
                          aria-label=(t!("admin.num_questions", locale = locale));
                }
                label {
                    (t!("admin.language", locale = locale))
                    select name="language" aria-label=(t!("admin.language", locale = locale)) {
                        option value="ar" selected[language == Language::Ar] {
                            (t!("admin.language_ar", locale = locale))
                        }
                        option value="en" selected[language == Language::En] {
                            (t!("admin.language_en", locale = locale))
                        }
                    }
                }
                label {
                    (t!("admin.question_type", locale = locale))
                    select name="questionType" aria-label=(t!("admin.question_type", locale = locale)) {
                        option value="mcq" selected[kind == QuestionKind::Mcq] {
                            (t!("admin.type_mcq", locale = locale))
                        }
                        option value="tf" selected[kind == QuestionKind::Tf] {
                            (t!("admin.type_tf", locale = locale))
                        }
                    }
                }
                label {
                    (t!("admin.pdf_file", locale = locale))
                    input name="pdfFile"
                          type="file"
                          required="true"
                          accept="application/pdf"
                          aria-label=(t!("admin.pdf_file", locale = locale));
                }
                label {
                    (t!("admin.additional_files", locale = locale))
                    input name="additionalFiles"
                          type="file"
                          multiple
                          aria-label=(t!("admin.additional_files", locale = locale));
                }
                input type="submit" value=(t!("admin.create_btn", locale = locale));
            }
        }
    }
}

fn course_table(courses: &[CourseOverview], locale: &str) -> Markup {
    html! {
        article {
            h3 { (t!("admin.courses_title", locale = locale)) }
            @if courses.is_empty() {
                p { (t!("admin.no_courses", locale = locale)) }
            } @else {
                table {
                    thead { tr {
                        th { (t!("admin.col_name", locale = locale)) }
                        th { (t!("admin.col_language", locale = locale)) }
                        th { (t!("admin.col_questions", locale = locale)) }
                        th { (t!("admin.col_created", locale = locale)) }
                    } }
                    tbody {
                        @for course in courses {
                            tr {
                                td {
                                    (components::nav_link(
                                        &names::course_page_url(course.id),
                                        html! { (course.name) },
                                    ))
                                }
                                td { (course.language) }
                                td { (course.question_count) }
                                td { (course.created_at) }
                            }
                        }
                    }
                }
            }
        }
    }
}

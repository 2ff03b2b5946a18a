use maud::{html, Markup, DOCTYPE};
use rust_i18n::t;

use crate::{names, views::components};

fn css() -> Markup {
    html! {
        link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/@picocss/pico@2.0.6/css/pico.min.css";
        link rel="stylesheet" href="/static/index.css";
    }
}

fn js() -> Markup {
    html! {
        script src="https://unpkg.com/htmx.org@1.9.12/dist/htmx.min.js" {}
        script src="https://unpkg.com/htmx.org@1.9.12/dist/ext/json-enc.js" {}
    }
}

fn locale_switcher(locale: &str) -> Markup {
    // One button that flips to the other supported language.
    let (target, label) = if locale == "ar" {
        ("en", "English")
    } else {
        ("ar", "العربية")
    };
    html! {
        form hx-post=(names::SET_LOCALE_URL)
             hx-ext="json-enc"
             hx-swap="none"
             style="margin: 0;" {
            input type="hidden" name="locale" value=(target);
            button type="submit" class="secondary outline" style="padding: 0.25rem 0.75rem; margin: 0;" {
                (label)
            }
        }
    }
}

fn header(locale: &str) -> Markup {
    html! {
        header {
            nav {
                ul {
                    li {
                        a href="/" {
                            strong { (t!("app.title", locale = locale)) }
                        }
                    }
                }
                ul {
                    li {
                        (components::nav_link(names::ADMIN_URL, html! {
                            (t!("app.admin_link", locale = locale))
                        }))
                    }
                    li { (locale_switcher(locale)) }
                }
            }
        }
    }
}

fn main(body: Markup) -> Markup {
    html! {
        main { (body) }
    }
}

pub fn page(title: &str, body: Markup, locale: &str) -> Markup {
    let dir = if locale == "ar" { "rtl" } else { "ltr" };

    html! {
        (DOCTYPE)
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1";
            meta name="color-scheme" content="light dark";

            (css())
            (js())

            title { (format!("{title} - {}", t!("app.title", locale = locale))) }
        }

        body."container" lang=(locale) dir=(dir) {
            (header(locale))
            (main(body))
        }
    }
}

pub fn titled(title: &str, body: Markup) -> Markup {
    html! {
        title { (title) }
        (body)
    }
}

/// Full page for direct navigation, bare fragment for htmx swaps.
pub fn render(is_htmx: bool, title: &str, body: Markup, locale: &str) -> Markup {
    if is_htmx {
        titled(title, body)
    } else {
        page(title, body, locale)
    }
}

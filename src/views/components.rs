use maud::{html, Markup};

/// htmx navigation link with href fallback + hx-get for in-page swap.
pub fn nav_link(href: &str, body: Markup) -> Markup {
    html! {
        a href=(href)
          hx-get=(href)
          hx-target="main"
          hx-push-url="true"
          hx-swap="innerHTML" {
            (body)
        }
    }
}

/// Colored callout for success and failure notices.
fn notice(color: &str, msg: &str) -> Markup {
    html! {
        article style=(format!("border-inline-start: 4px solid {color}; padding: 0.75rem 1rem; margin-bottom: 1rem;")) {
            p style=(format!("margin: 0; color: {color};")) { (msg) }
        }
    }
}

pub fn success_notice(msg: &str) -> Markup {
    notice("#28a745", msg)
}

pub fn error_notice(msg: &str) -> Markup {
    notice("#dc3545", msg)
}

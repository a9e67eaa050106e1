//! Base layout for standalone page output.
//!
//! This module wraps rendered page elements in the HTML skeleton the site
//! serves, including the Bootstrap stylesheet and bundle the cards expect.

use maud::{html, Markup, DOCTYPE};

const BOOTSTRAP_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css";
const BOOTSTRAP_JS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/js/bootstrap.bundle.min.js";

/// Base page layout builder.
///
/// # Example
///
/// ```ignore
/// use maud::html;
/// use crate::components::layout::BaseLayout;
///
/// let content = html! { div id="main" {} };
/// let page = BaseLayout::new("Discover").render(content);
/// ```
#[derive(Debug, Clone)]
pub struct BaseLayout<'a> {
    title: &'a str,
}

impl<'a> BaseLayout<'a> {
    /// Create a new base layout with the given page title.
    #[must_use]
    pub fn new(title: &'a str) -> Self {
        Self { title }
    }

    /// Render the complete HTML page with the given content.
    ///
    /// The content will be placed inside the `<main class="container">` element.
    #[must_use]
    pub fn render(self, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" data-bs-theme="dark" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (self.title) " - Yells" }
                    link rel="stylesheet" href=(BOOTSTRAP_CSS);
                }
                body {
                    (Self::render_header())
                    main class="container py-3" {
                        (content)
                    }
                    script src=(BOOTSTRAP_JS) {}
                }
            }
        }
    }

    fn render_header() -> Markup {
        html! {
            nav class="navbar bg-body-tertiary mb-3" {
                div class="container" {
                    a class="navbar-brand" href="/" { "Yells" }
                    div class="d-flex gap-3" {
                        a class="nav-link" href="/discover" { "Discover" }
                        a class="nav-link" href="/create" { "Create" }
                    }
                }
            }
        }
    }
}

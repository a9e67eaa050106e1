//! Loading placeholders.

use maud::{html, Markup, Render};

/// The loading spinner placed in a container until its content arrives.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spinner {
    pub label: &'static str,
}

impl Spinner {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            label: "Loading...",
        }
    }
}

impl Render for Spinner {
    fn render(&self) -> Markup {
        html! {
            div class="d-flex justify-content-center my-3 loading-spinner" {
                div class="spinner-border" role="status" {
                    span class="visually-hidden" { (self.label) }
                }
            }
        }
    }
}

//! Button component for card controls.
//!
//! Renders as either a `<button>` or an `<a>` element depending on whether
//! an href is provided.

use maud::{html, Markup, PreEscaped, Render};

/// Button style variants matching the site's Bootstrap classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Outlined primary button (like control).
    #[default]
    OutlinePrimary,
    /// Plain link styled as a button (comments link).
    Link,
    /// Small card floating over the top-right corner of a code block.
    Overlay,
}

impl ButtonVariant {
    /// Returns the CSS class(es) for this variant.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        match self {
            Self::OutlinePrimary => "btn btn-sm btn-outline-primary",
            Self::Link => "btn btn-sm btn-link",
            Self::Overlay => "card position-absolute top-0 end-0 pb-1 m-1",
        }
    }
}

/// A configurable button component.
///
/// # Example
///
/// ```ignore
/// use crate::components::button::Button;
///
/// let like = Button::outline_primary("Like").data_action("like");
/// let replies = Button::link("Comments").href("post/3");
/// ```
#[derive(Debug, Clone)]
pub struct Button<'a> {
    pub label: &'a str,
    pub variant: ButtonVariant,
    /// Renders as `<a>` when set.
    pub href: Option<&'a str>,
    pub class: Option<&'a str>,
    pub onclick: Option<&'a str>,
    /// Marker for the action a click performs.
    pub data_action: Option<&'a str>,
    /// Extra markup rendered after the label (badges).
    pub trailing: Option<Markup>,
}

impl<'a> Button<'a> {
    #[must_use]
    pub fn new(label: &'a str, variant: ButtonVariant) -> Self {
        Self {
            label,
            variant,
            href: None,
            class: None,
            onclick: None,
            data_action: None,
            trailing: None,
        }
    }

    #[must_use]
    pub fn outline_primary(label: &'a str) -> Self {
        Self::new(label, ButtonVariant::OutlinePrimary)
    }

    #[must_use]
    pub fn link(label: &'a str) -> Self {
        Self::new(label, ButtonVariant::Link)
    }

    #[must_use]
    pub fn overlay(label: &'a str) -> Self {
        Self::new(label, ButtonVariant::Overlay)
    }

    /// Sets the href, rendering the button as an `<a>` element.
    #[must_use]
    pub fn href(mut self, href: &'a str) -> Self {
        self.href = Some(href);
        self
    }

    /// Adds additional CSS classes.
    #[must_use]
    pub fn class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }

    /// Sets the onclick handler. The script is emitted unescaped.
    #[must_use]
    pub fn onclick(mut self, onclick: &'a str) -> Self {
        self.onclick = Some(onclick);
        self
    }

    #[must_use]
    pub fn data_action(mut self, action: &'a str) -> Self {
        self.data_action = Some(action);
        self
    }

    #[must_use]
    pub fn trailing(mut self, markup: Markup) -> Self {
        self.trailing = Some(markup);
        self
    }

    fn build_class(&self) -> String {
        let mut classes = self.variant.class().to_string();
        if let Some(extra) = self.class {
            classes.push(' ');
            classes.push_str(extra);
        }
        classes
    }
}

impl Render for Button<'_> {
    fn render(&self) -> Markup {
        let classes = self.build_class();
        let onclick = self.onclick.map(PreEscaped);

        if let Some(href) = self.href {
            html! {
                a class=(classes) href=(href) data-action=[self.data_action] {
                    (self.label)
                    @if let Some(trailing) = &self.trailing {
                        (trailing)
                    }
                }
            }
        } else {
            html! {
                button
                    class=(classes)
                    type="button"
                    onclick=[onclick]
                    data-action=[self.data_action]
                {
                    (self.label)
                    @if let Some(trailing) = &self.trailing {
                        (trailing)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_primary_button() {
        let html = Button::outline_primary("Like").render().into_string();
        assert!(html.contains("btn btn-sm btn-outline-primary"));
        assert!(html.contains("<button"));
        assert!(html.contains(r#"type="button""#));
        assert!(html.contains("Like"));
    }

    #[test]
    fn test_button_with_href() {
        let html = Button::link("Comments").href("post/3").render().into_string();
        assert!(html.contains("<a"));
        assert!(html.contains(r#"href="post/3""#));
        assert!(!html.contains("<button"));
    }

    #[test]
    fn test_button_with_extra_class() {
        let html = Button::overlay("Copy").class("copy-button").render().into_string();
        assert!(html.contains("card position-absolute top-0 end-0 pb-1 m-1 copy-button"));
    }

    #[test]
    fn test_button_onclick_is_not_escaped() {
        let html = Button::overlay("Copy")
            .onclick("setTimeout(() => this.innerHTML='Copy', 2000);")
            .render()
            .into_string();
        assert!(html.contains("() => this"));
    }

    #[test]
    fn test_button_data_action_and_trailing() {
        let html = Button::outline_primary("Unlike")
            .data_action("unlike")
            .trailing(html! { span class="badge" { "2" } })
            .render()
            .into_string();
        assert!(html.contains(r#"data-action="unlike""#));
        assert!(html.contains(r#"Unlike<span class="badge">2</span>"#));
    }
}

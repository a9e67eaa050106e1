//! Collapsible accordion sections used inside post and request cards.
//!
//! Sections are Bootstrap accordion items: a header button toggling a
//! collapse panel whose id is derived from the section name and item id.

use maud::{html, Markup, Render};

/// One collapsible section.
#[derive(Debug, Clone)]
pub struct AccordionItem<'a> {
    /// Button text in the section header.
    pub heading: &'a str,
    /// DOM id of the collapse panel.
    pub panel_id: String,
    /// Whether the panel starts expanded.
    pub expanded: bool,
    /// Extra classes on the collapse panel.
    pub panel_class: Option<&'a str>,
    /// Classes of the panel body.
    pub body_class: &'a str,
    pub body: Markup,
}

impl<'a> AccordionItem<'a> {
    /// Create a collapsed section with panel id `accordionPanel{name}{id}`.
    #[must_use]
    pub fn new(heading: &'a str, name: &str, id: u64, body: Markup) -> Self {
        Self {
            heading,
            panel_id: format!("accordionPanel{name}{id}"),
            expanded: false,
            panel_class: None,
            body_class: "accordion-body",
            body,
        }
    }

    #[must_use]
    pub fn expanded(mut self) -> Self {
        self.expanded = true;
        self
    }

    #[must_use]
    pub fn panel_class(mut self, class: &'a str) -> Self {
        self.panel_class = Some(class);
        self
    }

    #[must_use]
    pub fn body_class(mut self, class: &'a str) -> Self {
        self.body_class = class;
        self
    }
}

impl Render for AccordionItem<'_> {
    fn render(&self) -> Markup {
        let button_class = if self.expanded {
            "accordion-button"
        } else {
            "accordion-button collapsed"
        };
        let mut panel_class = String::from("accordion-collapse collapse");
        if self.expanded {
            panel_class.push_str(" show");
        }
        if let Some(extra) = self.panel_class {
            panel_class.push(' ');
            panel_class.push_str(extra);
        }

        html! {
            div class="accordion-item" {
                h2 class="accordion-header" {
                    button
                        class=(button_class)
                        type="button"
                        data-bs-toggle="collapse"
                        data-bs-target=(format!("#{}", self.panel_id))
                        aria-expanded=(if self.expanded { "true" } else { "false" })
                        aria-controls=(self.panel_id)
                    {
                        (self.heading)
                    }
                }
                div id=(self.panel_id) class=(panel_class) {
                    div class=(self.body_class) {
                        (self.body)
                    }
                }
            }
        }
    }
}

/// A group of sections.
#[derive(Debug, Clone, Default)]
pub struct Accordion<'a> {
    pub items: Vec<AccordionItem<'a>>,
}

impl<'a> Accordion<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn item(mut self, item: AccordionItem<'a>) -> Self {
        self.items.push(item);
        self
    }
}

impl Render for Accordion<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="accordion" {
                @for item in &self.items {
                    (item)
                }
            }
        }
    }
}

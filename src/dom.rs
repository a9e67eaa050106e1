//! In-memory document the loaders render into.
//!
//! A [`Page`] holds the handful of elements a yells page exposes by id
//! (see [`ids`]). Each element keeps its own children as rendered markup,
//! an optional text override, and a display state. The page is cheap to
//! clone and shared between the controller and its spawned card tasks.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use maud::{html, Markup, PreEscaped, Render};
use thiserror::Error;

use crate::components::alert::Spinner;
use crate::components::layout::BaseLayout;
use crate::constants::SLOW_WARNING;

/// Element ids pages provide.
pub mod ids {
    pub const MAIN: &str = "main";
    pub const WARN: &str = "warn";
    pub const SPINNER: &str = "spinner";
    pub const SEARCHUP: &str = "searchup";
    pub const MAIN_SPINNER: &str = "main_spinner";
    pub const COMMENTS_SPINNER: &str = "comments_spinner";
    pub const COMMENTS: &str = "comments";
    pub const HIGHEST_RATED: &str = "highest_rated";
    pub const RECENTLY_UPLOADED: &str = "recently_uploaded";
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("no element with id '{0}'")]
    MissingElement(String),
    #[error("element '{0}' has no data-query attribute")]
    MissingQuery(String),
}

/// CSS display state of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    /// Whatever the stylesheet decides; visible.
    #[default]
    Inherit,
    Block,
    None,
}

impl Display {
    const fn style(self) -> Option<&'static str> {
        match self {
            Self::Inherit => None,
            Self::Block => Some("display: block"),
            Self::None => Some("display: none"),
        }
    }
}

/// One addressable element.
#[derive(Debug, Clone, Default)]
pub struct Element {
    class: Option<String>,
    children: Vec<Markup>,
    text: Option<String>,
    display: Display,
    data_query: Option<String>,
}

impl Element {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.display = Display::None;
        self
    }

    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    #[must_use]
    pub fn child(mut self, markup: Markup) -> Self {
        self.children.push(markup);
        self
    }

    #[must_use]
    pub fn data_query(mut self, query: &str) -> Self {
        self.data_query = Some(query.to_string());
        self
    }

    fn render(&self, id: &str) -> Markup {
        html! {
            div id=(id) class=[self.class.as_deref()] style=[self.display.style()] data-query=[self.data_query.as_deref()] {
                @if let Some(text) = &self.text {
                    (text)
                } @else {
                    @for child in &self.children {
                        (child)
                    }
                }
            }
        }
    }
}

#[derive(Debug, Default)]
struct Document {
    order: Vec<String>,
    elements: HashMap<String, Element>,
}

/// Shared handle to a page's elements.
#[derive(Debug, Clone, Default)]
pub struct Page {
    inner: Arc<RwLock<Document>>,
}

impl Page {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an element. Elements render in insertion order.
    #[must_use]
    pub fn with_element(self, id: &str, element: Element) -> Self {
        {
            let mut doc = self.inner.write().unwrap_or_else(PoisonError::into_inner);
            if doc.elements.insert(id.to_string(), element).is_none() {
                doc.order.push(id.to_string());
            }
        }
        self
    }

    /// Page layout for the discover feed.
    #[must_use]
    pub fn discover() -> Self {
        Self::new()
            .with_element(ids::MAIN, Element::new().class("d-flex flex-column gap-3"))
            .with_element(ids::SPINNER, Element::new().child(Spinner::new().render()))
            .with_element(
                ids::WARN,
                Element::new().class("text-center text-secondary").text(SLOW_WARNING).hidden(),
            )
    }

    /// Page layout for search results, carrying the query on `searchup`.
    #[must_use]
    pub fn search(query: &str) -> Self {
        Self::new()
            .with_element(ids::SEARCHUP, Element::new().data_query(query).text(query))
            .with_element(ids::MAIN, Element::new().class("d-flex flex-column gap-3"))
            .with_element(ids::SPINNER, Element::new().child(Spinner::new().render()))
            .with_element(
                ids::WARN,
                Element::new().class("text-center text-secondary").text(SLOW_WARNING).hidden(),
            )
    }

    /// Page layout for the home page's two featured slots.
    #[must_use]
    pub fn home() -> Self {
        Self::new()
            .with_element(ids::HIGHEST_RATED, Element::new().child(Spinner::new().render()))
            .with_element(ids::RECENTLY_UPLOADED, Element::new().child(Spinner::new().render()))
    }

    /// Page layout for a single item and its comments.
    #[must_use]
    pub fn detail() -> Self {
        Self::new()
            .with_element(ids::MAIN_SPINNER, Element::new().child(Spinner::new().render()))
            .with_element(ids::MAIN, Element::new())
            .with_element(ids::COMMENTS_SPINNER, Element::new().child(Spinner::new().render()))
            .with_element(ids::COMMENTS, Element::new())
    }

    fn with_doc<T>(&self, f: impl FnOnce(&Document) -> T) -> T {
        let doc = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&doc)
    }

    fn update<T>(&self, id: &str, f: impl FnOnce(&mut Element) -> T) -> Result<T, DomError> {
        let mut doc = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let element = doc
            .elements
            .get_mut(id)
            .ok_or_else(|| DomError::MissingElement(id.to_string()))?;
        Ok(f(element))
    }

    fn read<T>(&self, id: &str, f: impl FnOnce(&Element) -> T) -> Result<T, DomError> {
        self.with_doc(|doc| {
            doc.elements
                .get(id)
                .map(f)
                .ok_or_else(|| DomError::MissingElement(id.to_string()))
        })
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.with_doc(|doc| doc.elements.contains_key(id))
    }

    /// Append rendered markup as the element's last child.
    ///
    /// # Errors
    ///
    /// Returns an error if the element does not exist.
    pub fn append(&self, id: &str, markup: Markup) -> Result<(), DomError> {
        self.update(id, |el| {
            el.text = None;
            el.children.push(markup);
        })
    }

    /// Replace the element's contents with plain text.
    ///
    /// # Errors
    ///
    /// Returns an error if the element does not exist.
    pub fn set_text(&self, id: &str, text: &str) -> Result<(), DomError> {
        self.update(id, |el| {
            el.children.clear();
            el.text = Some(text.to_string());
        })
    }

    /// Remove the element's first child, returning whether there was one.
    ///
    /// # Errors
    ///
    /// Returns an error if the element does not exist.
    pub fn remove_first_child(&self, id: &str) -> Result<bool, DomError> {
        self.update(id, |el| {
            if el.children.is_empty() {
                false
            } else {
                el.children.remove(0);
                true
            }
        })
    }

    /// Remove the element from the page.
    ///
    /// # Errors
    ///
    /// Returns an error if the element does not exist.
    pub fn remove(&self, id: &str) -> Result<(), DomError> {
        let mut doc = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if doc.elements.remove(id).is_none() {
            return Err(DomError::MissingElement(id.to_string()));
        }
        doc.order.retain(|existing| existing != id);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the element does not exist.
    pub fn show(&self, id: &str) -> Result<(), DomError> {
        self.update(id, |el| el.display = Display::Block)
    }

    /// # Errors
    ///
    /// Returns an error if the element does not exist.
    pub fn hide(&self, id: &str) -> Result<(), DomError> {
        self.update(id, |el| el.display = Display::None)
    }

    /// # Errors
    ///
    /// Returns an error if the element does not exist.
    pub fn is_visible(&self, id: &str) -> Result<bool, DomError> {
        self.read(id, |el| el.display != Display::None)
    }

    /// # Errors
    ///
    /// Returns an error if the element does not exist.
    pub fn text(&self, id: &str) -> Result<Option<String>, DomError> {
        self.read(id, |el| el.text.clone())
    }

    /// # Errors
    ///
    /// Returns an error if the element does not exist.
    pub fn children(&self, id: &str) -> Result<Vec<Markup>, DomError> {
        self.read(id, |el| el.children.clone())
    }

    /// # Errors
    ///
    /// Returns an error if the element does not exist.
    pub fn child_count(&self, id: &str) -> Result<usize, DomError> {
        self.read(id, |el| el.children.len())
    }

    /// The search query carried on the element's `data-query` attribute.
    ///
    /// # Errors
    ///
    /// Returns an error if the element or its attribute is missing.
    pub fn data_query(&self, id: &str) -> Result<String, DomError> {
        self.read(id, |el| el.data_query.clone())?
            .ok_or_else(|| DomError::MissingQuery(id.to_string()))
    }

    /// Render one element and its contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the element does not exist.
    pub fn element_html(&self, id: &str) -> Result<Markup, DomError> {
        self.read(id, |el| el.render(id))
    }

    /// Render every element in insertion order.
    #[must_use]
    pub fn render_body(&self) -> Markup {
        self.with_doc(|doc| {
            let mut body = String::new();
            for id in &doc.order {
                if let Some(el) = doc.elements.get(id) {
                    body.push_str(&el.render(id).into_string());
                }
            }
            PreEscaped(body)
        })
    }

    /// Render the whole page as a standalone HTML document.
    #[must_use]
    pub fn render_document(&self, title: &str) -> Markup {
        BaseLayout::new(title).render(self.render_body())
    }
}

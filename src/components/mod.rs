//! Maud HTML components for yells pages.
//!
//! - `layout`: standalone document wrapper and navigation
//! - `card`: post, request and comment cards
//! - `accordion`: collapsible card sections
//! - `badge`: tag, count and rating badges
//! - `button`: buttons and link-buttons
//! - `byline`: author and timestamp line
//! - `alert`: loading spinner
//!
//! # Example
//!
//! ```ignore
//! use maud::Render;
//! use crate::components::{BaseLayout, PostCard};
//!
//! let body = PostCard::new(&post, Some(&tags), &like).render();
//! let document = BaseLayout::new("Discover").render(body);
//! ```

pub mod accordion;
pub mod alert;
pub mod badge;
pub mod button;
pub mod byline;
pub mod card;
pub mod layout;

pub use accordion::{Accordion, AccordionItem};
pub use alert::Spinner;
pub use badge::{CountBadge, RatingBadge, TagBadge, TagList};
pub use button::{Button, ButtonVariant};
pub use byline::{format_timestamp, Byline};
pub use card::{request_state_label, CardFooter, CommentCard, PostCard, RequestCard};
pub use layout::BaseLayout;

/// Re-export maud for convenience
pub use maud::{html, Markup, PreEscaped, DOCTYPE};

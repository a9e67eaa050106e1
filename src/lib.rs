//! Yells client library.
//!
//! A headless rendition of the yells site's client-side rendering layer: it
//! fetches posts, requests and comments from the backend API, renders them
//! into HTML cards, and drives the scroll and WebSocket pagination loops
//! that append those cards into a page.

// Allow raw string hashes for safety - they're harmless and prevent issues if content changes
#![allow(clippy::needless_raw_string_hashes)]

pub mod api;
pub mod components;
pub mod config;
pub mod constants;
pub mod dom;
pub mod error;
pub mod feed;
pub mod like;
pub mod model;
pub mod pages;
pub mod queue;
pub mod render;
pub mod search;
pub mod viewport;

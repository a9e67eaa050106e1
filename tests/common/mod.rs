//! Shared fixtures for integration tests: backend records, a mock API and
//! HTML inspection helpers.

#![allow(dead_code)]

use std::time::Duration;

use reqwest::Client;
use scraper::{Html, Selector};
use serde_json::{json, Value};
use url::Url;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use yells_client::api::ApiClient;
use yells_client::dom::Page;
use yells_client::render::CardRenderer;

pub fn post_json(id: u64) -> Value {
    json!({
        "base_type": "post",
        "content_id": id,
        "author": "ana",
        "base_datetime": "2024-01-15T12:00:00",
        "base_title": format!("Post {id}"),
        "base_rating": 1,
        "base_comments": 2,
        "post_filename": "main.rs",
        "post_description": "<p>Prints a greeting</p>",
        "post_code": "<div class=\"highlight\"><pre>fn main() {}</pre></div>",
    })
}

pub fn request_json(id: u64, state: Value) -> Value {
    json!({
        "base_type": "request",
        "content_id": id,
        "author": "bo",
        "base_datetime": "2024-02-01T08:30:00",
        "base_title": format!("Request {id}"),
        "base_rating": 0,
        "base_comments": 0,
        "request_state": state,
        "request_content": "<p>Looking for a parser</p>",
    })
}

pub fn comment_json(id: u64) -> Value {
    json!({
        "base_type": "comment",
        "content_id": id,
        "author": "cy",
        "base_datetime": "2024-02-02T10:00:00",
        "base_title": "",
        "base_rating": 0,
        "base_comments": 0,
        "comment_content": format!("Comment {id}"),
    })
}

/// Answers `/api/{namespace}/{id}` with a post record for that id,
/// optionally delayed per id.
pub struct PostResponder {
    delay: Box<dyn Fn(u64) -> Duration + Send + Sync>,
}

impl PostResponder {
    pub fn new() -> Self {
        Self {
            delay: Box::new(|_| Duration::ZERO),
        }
    }

    pub fn with_delay(delay: impl Fn(u64) -> Duration + Send + Sync + 'static) -> Self {
        Self {
            delay: Box::new(delay),
        }
    }
}

impl Respond for PostResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let id = request
            .url
            .path_segments()
            .and_then(Iterator::last)
            .and_then(|segment| segment.parse::<u64>().ok());
        match id {
            Some(id) => ResponseTemplate::new(200)
                .set_body_json(post_json(id))
                .set_delay((self.delay)(id)),
            None => ResponseTemplate::new(200).set_body_json("404"),
        }
    }
}

/// Start a mock backend that serves tags and a "not liked" status for any
/// item. Tests mount their own item routes on top.
pub async fn mock_backend() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/api/tags/\d+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["rust", "cli"])))
        .with_priority(10)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/(post|request|comment)/\d+/status$"))
        .respond_with(ResponseTemplate::new(200).set_body_string("False"))
        .with_priority(10)
        .mount(&server)
        .await;

    server
}

pub async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub fn api(server: &MockServer) -> ApiClient {
    api_at(&server.uri())
}

pub fn api_at(base: &str) -> ApiClient {
    let client = Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap();
    ApiClient::with_client(client, Url::parse(base).unwrap())
}

pub fn renderer(server: &MockServer) -> CardRenderer {
    CardRenderer::new(api(server))
}

/// `data-id` of every card inside `container`, in document order.
pub fn card_ids(page: &Page, container: &str) -> Vec<u64> {
    let html = page.element_html(container).unwrap().into_string();
    let fragment = Html::parse_fragment(&html);
    let selector = Selector::parse(".yell-card").unwrap();
    fragment
        .select(&selector)
        .filter_map(|card| card.value().attr("data-id"))
        .map(|id| id.parse().unwrap())
        .collect()
}

/// Inner HTML of every element matching `css` in `html`.
pub fn select_inner(html: &str, css: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);
    let selector = Selector::parse(css).unwrap();
    fragment.select(&selector).map(|el| el.inner_html()).collect()
}

/// Text content of every element matching `css` in `html`.
pub fn select_text(html: &str, css: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);
    let selector = Selector::parse(css).unwrap();
    fragment
        .select(&selector)
        .map(|el| el.text().collect::<String>())
        .collect()
}

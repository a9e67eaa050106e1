//! Card components for posts, requests and comments.
//!
//! Text fields the backend already sanitized into HTML (titles, filenames,
//! descriptions, highlighted code, request and comment bodies) are inserted
//! as markup. Author names and tags are escaped.

use maud::{html, Markup, PreEscaped, Render};

use crate::components::accordion::{Accordion, AccordionItem};
use crate::components::badge::{CountBadge, TagList};
use crate::components::button::Button;
use crate::components::byline::Byline;
use crate::like::LikeControl;
use crate::model::{CommentRecord, ContentKind, PostRecord, RecordBase, RequestRecord, RequestState};

const CARD_CLASS: &str = "bg-body-tertiary card p-3 flex-grow-1 yell-card";

/// Copies the code block's text and flashes "Copied" for two seconds.
const COPY_JS: &str = "navigator.clipboard.writeText(this.parentElement.querySelector('.code-content').textContent); this.innerHTML='Copied'; setTimeout(() => this.innerHTML='Copy', 2000);";

/// Label text and CSS class for a request's solved state.
#[must_use]
pub const fn request_state_label(state: RequestState) -> (&'static str, &'static str) {
    match state {
        RequestState::Solved => ("Solved", "text-secondary"),
        RequestState::Open => ("Open", "text-success"),
        RequestState::Unknown => ("Unknown", "text-secondary"),
    }
}

fn title_link(kind: ContentKind, base: &RecordBase) -> Markup {
    html! {
        div class="d-flex align-middle" {
            a class="pe-5 flex-grow-1 fs-3 card-title"
                href=(format!("{kind}/{}", base.content_id))
            {
                (PreEscaped(&base.base_title))
            }
        }
    }
}

/// Footer with the comments link and the like control.
#[derive(Debug, Clone, Copy)]
pub struct CardFooter<'a> {
    pub kind: ContentKind,
    pub base: &'a RecordBase,
    pub like: &'a LikeControl,
}

impl<'a> CardFooter<'a> {
    #[must_use]
    pub const fn new(kind: ContentKind, base: &'a RecordBase, like: &'a LikeControl) -> Self {
        Self { kind, base, like }
    }
}

impl Render for CardFooter<'_> {
    fn render(&self) -> Markup {
        let label = match self.kind {
            ContentKind::Post | ContentKind::Request => "Comments",
            ContentKind::Comment => "Replies",
        };
        let href = format!("{}/{}#comments", self.kind, self.base.content_id);

        html! {
            div class="d-flex justify-content-between align-items-center mt-2 card-footer-bar" {
                (Button::link(label)
                    .href(&href)
                    .class("comments-link")
                    .trailing(CountBadge::new(self.base.base_comments).render()))
                (self.like)
            }
        }
    }
}

/// A code post: filename, collapsible description and code.
#[derive(Debug, Clone, Copy)]
pub struct PostCard<'a> {
    pub post: &'a PostRecord,
    pub tags: Option<&'a [String]>,
    pub like: &'a LikeControl,
}

impl<'a> PostCard<'a> {
    #[must_use]
    pub const fn new(post: &'a PostRecord, tags: Option<&'a [String]>, like: &'a LikeControl) -> Self {
        Self { post, tags, like }
    }
}

impl Render for PostCard<'_> {
    fn render(&self) -> Markup {
        let post = self.post;
        let id = post.base.content_id;

        let description = AccordionItem::new(
            "Description",
            "Description",
            id,
            html! {
                (PreEscaped(&post.post_description))
                (TagList::new(self.tags))
            },
        );

        let code = AccordionItem::new(
            "Code",
            "Code",
            id,
            html! {
                div class="code-content" { (PreEscaped(&post.post_code)) }
                (Button::overlay("Copy").class("copy-button").onclick(COPY_JS))
            },
        )
        .expanded()
        .panel_class("position-relative")
        .body_class("accordion-body overflow-scroll p-0");

        html! {
            div class=(CARD_CLASS) data-kind="post" data-id=(id) {
                (title_link(ContentKind::Post, &post.base))
                div class="d-flex h-1" {
                    (Byline::new(&post.base.author, &post.base.base_datetime))
                    p class="pe-3 align-middle text-info card-filename" {
                        (PreEscaped(&post.post_filename))
                    }
                }
                (Accordion::new().item(description).item(code))
                (CardFooter::new(ContentKind::Post, &post.base, self.like))
            }
        }
    }
}

/// A request: solved-state label and one collapsible body.
#[derive(Debug, Clone, Copy)]
pub struct RequestCard<'a> {
    pub request: &'a RequestRecord,
    pub tags: Option<&'a [String]>,
    pub like: &'a LikeControl,
}

impl<'a> RequestCard<'a> {
    #[must_use]
    pub const fn new(
        request: &'a RequestRecord,
        tags: Option<&'a [String]>,
        like: &'a LikeControl,
    ) -> Self {
        Self { request, tags, like }
    }
}

impl Render for RequestCard<'_> {
    fn render(&self) -> Markup {
        let request = self.request;
        let id = request.base.content_id;
        let (state_label, state_class) = request_state_label(request.request_state);

        let body = AccordionItem::new(
            "Request",
            "body",
            id,
            html! {
                (PreEscaped(&request.request_content))
                (TagList::new(self.tags))
            },
        )
        .expanded()
        .panel_class("position-relative")
        .body_class("accordion-body overflow-scroll");

        html! {
            div class=(CARD_CLASS) data-kind="request" data-id=(id) {
                (title_link(ContentKind::Request, &request.base))
                div class="d-flex h-1" {
                    (Byline::new(&request.base.author, &request.base.base_datetime))
                    p class=(format!("pe-3 align-middle {state_class} card-state")) {
                        (state_label)
                    }
                }
                (Accordion::new().item(body))
                (CardFooter::new(ContentKind::Request, &request.base, self.like))
            }
        }
    }
}

/// A comment: byline and linked content, no accordion.
#[derive(Debug, Clone, Copy)]
pub struct CommentCard<'a> {
    pub comment: &'a CommentRecord,
    pub like: &'a LikeControl,
}

impl<'a> CommentCard<'a> {
    #[must_use]
    pub const fn new(comment: &'a CommentRecord, like: &'a LikeControl) -> Self {
        Self { comment, like }
    }
}

impl Render for CommentCard<'_> {
    fn render(&self) -> Markup {
        let comment = self.comment;
        let id = comment.base.content_id;

        html! {
            div class=(CARD_CLASS) data-kind="comment" data-id=(id) {
                div class="d-flex h-1" {
                    (Byline::new(&comment.base.author, &comment.base.base_datetime))
                }
                a class="card-text comment-content" href=(format!("comment/{id}")) {
                    (PreEscaped(&comment.comment_content))
                }
                (CardFooter::new(ContentKind::Comment, &comment.base, self.like))
            }
        }
    }
}

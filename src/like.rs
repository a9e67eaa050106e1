//! Like/unlike control attached to every card.
//!
//! The control learns the viewer's current state from the status endpoint,
//! then toggles between the like and unlike endpoints on each click. A
//! successful toggle moves the local rating by one; an unauthenticated
//! viewer is sent to the login page with a return path.

use maud::{html, Markup, Render};
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::components::badge::RatingBadge;
use crate::components::button::Button;
use crate::error::ClientError;
use crate::model::{ContentKind, ContentRecord, LikeStatus, ToggleReply};

/// What a click on the control resulted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The toggle was recorded and the control flipped.
    Toggled,
    /// The viewer must log in; navigate to this URL.
    Redirect(String),
    /// The backend answered with something other than `yay`/`unlogged`;
    /// the control is left unchanged.
    Rejected(String),
}

/// Build the login URL that returns the viewer to `current_path`.
#[must_use]
pub fn login_redirect(login_path: &str, current_path: &str) -> String {
    format!("{login_path}?next={}", urlencoding::encode(current_path))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeControl {
    kind: ContentKind,
    id: u64,
    rating: i64,
    status: LikeStatus,
}

impl LikeControl {
    #[must_use]
    pub fn new(record: &ContentRecord, status: LikeStatus) -> Self {
        Self {
            kind: record.kind(),
            id: record.id(),
            rating: record.base().base_rating,
            status,
        }
    }

    /// Fetch the viewer's like status and build the control.
    ///
    /// # Errors
    ///
    /// Returns an error if the status endpoint cannot be reached.
    pub async fn init(api: &ApiClient, record: &ContentRecord) -> Result<Self, ClientError> {
        let status = api.like_status(record.kind(), record.id()).await?;
        debug!(kind = %record.kind(), id = record.id(), ?status, "Like status loaded");
        Ok(Self::new(record, status))
    }

    #[must_use]
    pub const fn status(&self) -> LikeStatus {
        self.status
    }

    #[must_use]
    pub const fn rating(&self) -> i64 {
        self.rating
    }

    /// Button label. An unknown status shows the backend's `404` marker.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self.status {
            LikeStatus::Liked => "Unlike",
            LikeStatus::NotLiked => "Like",
            LikeStatus::Unknown => "404",
        }
    }

    /// Endpoint the next click calls.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self.status {
            LikeStatus::Liked => "unlike",
            LikeStatus::NotLiked | LikeStatus::Unknown => "like",
        }
    }

    /// Handle a click: call the toggle endpoint and update the control.
    ///
    /// `current_path` is where the viewer should return after logging in.
    ///
    /// # Errors
    ///
    /// Returns an error if the toggle endpoint cannot be reached.
    pub async fn click(
        &mut self,
        api: &ApiClient,
        login_path: &str,
        current_path: &str,
    ) -> Result<ClickOutcome, ClientError> {
        let liking = self.status != LikeStatus::Liked;
        let reply = if liking {
            api.like(self.kind, self.id).await?
        } else {
            api.unlike(self.kind, self.id).await?
        };

        match reply {
            ToggleReply::Done => {
                if liking {
                    self.status = LikeStatus::Liked;
                    self.rating += 1;
                } else {
                    self.status = LikeStatus::NotLiked;
                    self.rating -= 1;
                }
                debug!(kind = %self.kind, id = self.id, rating = self.rating, "Like toggled");
                Ok(ClickOutcome::Toggled)
            }
            ToggleReply::Unlogged => Ok(ClickOutcome::Redirect(login_redirect(
                login_path,
                current_path,
            ))),
            ToggleReply::Unexpected(text) => {
                warn!(kind = %self.kind, id = self.id, reply = %text, "Unexpected like reply");
                Ok(ClickOutcome::Rejected(text))
            }
        }
    }
}

impl Render for LikeControl {
    fn render(&self) -> Markup {
        html! {
            div class="d-flex align-items-center like-control" data-kind=(self.kind.as_str()) data-id=(self.id) {
                (Button::outline_primary(self.label())
                    .data_action(self.action())
                    .class("like-button"))
                (RatingBadge::new(self.rating))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PostRecord, RecordBase};

    fn record(rating: i64) -> ContentRecord {
        ContentRecord::Post(PostRecord {
            base: RecordBase {
                content_id: 3,
                author: "ana".to_string(),
                base_datetime: String::new(),
                base_title: "t".to_string(),
                base_rating: rating,
                base_comments: 0,
            },
            post_filename: String::new(),
            post_description: String::new(),
            post_code: String::new(),
        })
    }

    #[test]
    fn test_labels() {
        assert_eq!(LikeControl::new(&record(0), LikeStatus::NotLiked).label(), "Like");
        assert_eq!(LikeControl::new(&record(0), LikeStatus::Liked).label(), "Unlike");
        assert_eq!(LikeControl::new(&record(0), LikeStatus::Unknown).label(), "404");
        assert_eq!(LikeControl::new(&record(0), LikeStatus::Unknown).action(), "like");
    }

    #[test]
    fn test_render_hides_zero_rating() {
        let html = LikeControl::new(&record(0), LikeStatus::NotLiked)
            .render()
            .into_string();
        assert!(html.contains(r#"data-action="like""#));
        assert!(!html.contains("rating-badge"));

        let html = LikeControl::new(&record(4), LikeStatus::Liked)
            .render()
            .into_string();
        assert!(html.contains(r#"data-action="unlike""#));
        assert!(html.contains("rating-badge"));
        assert!(html.contains(r#"data-kind="post" data-id="3""#));
    }

    #[test]
    fn test_login_redirect_preserves_path() {
        assert_eq!(login_redirect("/login", "/post/3"), "/login?next=%2Fpost%2F3");
    }
}

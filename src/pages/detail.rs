//! Item detail page: one card and its comment thread.

use futures_util::future::join_all;
use maud::html;
use tracing::{debug, info, warn};

use crate::constants::DETAIL_PLACEHOLDER;
use crate::dom::{ids, Page};
use crate::error::ClientError;
use crate::model::{ContentKind, ItemRef, Lookup, Namespace};
use crate::render::CardRenderer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetailSummary {
    pub item_found: bool,
    /// Whether the comment set loaded (an empty set still counts).
    pub comments_found: bool,
    pub comments: usize,
}

/// Render the item into `main` and its comments into `comments`.
///
/// # Errors
///
/// Returns an error if the item or its comment set cannot be fetched, or
/// the page lacks the detail elements. Spinners are replaced by the
/// placeholder before an error is returned.
pub async fn load_detail(
    renderer: &CardRenderer,
    page: &Page,
    kind: ContentKind,
    id: u64,
) -> Result<DetailSummary, ClientError> {
    let mut summary = DetailSummary::default();

    match renderer
        .add_card_by_id(Namespace::Kind(kind), ItemRef::Id(id), page, ids::MAIN)
        .await
    {
        Ok(Lookup::Found(())) => {
            page.remove(ids::MAIN_SPINNER)?;
            summary.item_found = true;
        }
        Ok(Lookup::NotFound) => page.set_text(ids::MAIN_SPINNER, DETAIL_PLACEHOLDER)?,
        Err(e) => {
            page.set_text(ids::MAIN_SPINNER, DETAIL_PLACEHOLDER)?;
            page.set_text(ids::COMMENTS_SPINNER, DETAIL_PLACEHOLDER)?;
            return Err(e);
        }
    }

    let comment_set = if summary.item_found {
        renderer.api().fetch_comment_set(id).await
    } else {
        Ok(Lookup::NotFound)
    };
    let comment_set = match comment_set {
        Ok(Lookup::Found(set)) => set,
        Ok(Lookup::NotFound) => {
            info!(%kind, id, "No comments to show");
            page.set_text(ids::COMMENTS_SPINNER, DETAIL_PLACEHOLDER)?;
            return Ok(summary);
        }
        Err(e) => {
            page.set_text(ids::COMMENTS_SPINNER, DETAIL_PLACEHOLDER)?;
            return Err(e);
        }
    };
    summary.comments_found = true;

    let loads = comment_set.comments.iter().map(|comment| {
        renderer.load_card(
            Namespace::Kind(ContentKind::Comment),
            ItemRef::Id(comment.comment_id),
        )
    });
    let mut cards = Vec::with_capacity(comment_set.comments.len());
    for (comment, loaded) in comment_set.comments.iter().zip(join_all(loads).await) {
        match loaded {
            Ok(Lookup::Found(card)) => cards.push(card),
            Ok(Lookup::NotFound) => debug!(id = comment.comment_id, "Skipping missing comment"),
            Err(e) => warn!(id = comment.comment_id, error = %e, "Failed to load comment"),
        }
    }
    summary.comments = cards.len();

    page.append(
        ids::COMMENTS,
        html! {
            div class="d-flex flex-column gap-2 comment-list" {
                @for card in &cards {
                    (card)
                }
            }
        },
    )?;
    page.remove(ids::COMMENTS_SPINNER)?;

    debug!(%kind, id, comments = summary.comments, "Detail page loaded");
    Ok(summary)
}

//! Home page: the highest rated and most recent items.

use tracing::warn;

use crate::constants::HOME_PLACEHOLDER;
use crate::dom::{ids, Page};
use crate::error::ClientError;
use crate::model::{ItemRef, Lookup, Namespace};
use crate::render::CardRenderer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HomeSummary {
    pub highest_rated: bool,
    pub recently_uploaded: bool,
}

/// Fill both featured slots concurrently.
///
/// # Errors
///
/// Returns the first error either slot hit. Both slots are settled (card or
/// placeholder) before returning.
pub async fn load_home(renderer: &CardRenderer, page: &Page) -> Result<HomeSummary, ClientError> {
    let (rated, recent) = tokio::join!(
        fill_slot(renderer, page, ItemRef::Rated, ids::HIGHEST_RATED),
        fill_slot(renderer, page, ItemRef::Last, ids::RECENTLY_UPLOADED),
    );
    Ok(HomeSummary {
        highest_rated: rated?,
        recently_uploaded: recent?,
    })
}

/// Render `item` into `slot`, then drop the slot's spinner; on a miss the
/// slot shows a placeholder instead.
async fn fill_slot(
    renderer: &CardRenderer,
    page: &Page,
    item: ItemRef,
    slot: &str,
) -> Result<bool, ClientError> {
    match renderer.add_card_by_id(Namespace::Yell, item, page, slot).await {
        Ok(Lookup::Found(())) => {
            page.remove_first_child(slot)?;
            Ok(true)
        }
        Ok(Lookup::NotFound) => {
            page.set_text(slot, HOME_PLACEHOLDER)?;
            Ok(false)
        }
        Err(e) => {
            warn!(%item, slot, error = %e, "Failed to load home slot");
            page.set_text(slot, HOME_PLACEHOLDER)?;
            Err(e)
        }
    }
}

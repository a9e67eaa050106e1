//! Single-item renderer shared by every loader.
//!
//! Fetches a record, the supplementary data its card needs (tags, like
//! status), renders the card and appends it where the caller asks.

use maud::{Markup, Render};
use tracing::{debug, info};

use crate::api::ApiClient;
use crate::components::card::{CommentCard, PostCard, RequestCard};
use crate::dom::Page;
use crate::error::ClientError;
use crate::like::LikeControl;
use crate::model::{ContentRecord, ItemRef, Lookup, Namespace};

/// Render a record into its card.
#[must_use]
pub fn render_card(record: &ContentRecord, tags: Option<&[String]>, like: &LikeControl) -> Markup {
    match record {
        ContentRecord::Post(post) => PostCard::new(post, tags, like).render(),
        ContentRecord::Request(request) => RequestCard::new(request, tags, like).render(),
        ContentRecord::Comment(comment) => CommentCard::new(comment, like).render(),
    }
}

#[derive(Debug, Clone)]
pub struct CardRenderer {
    api: ApiClient,
}

impl CardRenderer {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Fetch an item and render its card without placing it anywhere.
    ///
    /// # Errors
    ///
    /// Returns an error if the record, its tags or its like status cannot be
    /// fetched.
    pub async fn load_card(
        &self,
        namespace: Namespace,
        item: ItemRef,
    ) -> Result<Lookup<Markup>, ClientError> {
        let Lookup::Found(record) = self.api.fetch_item(namespace, item).await? else {
            info!(%namespace, %item, "Item not found");
            return Ok(Lookup::NotFound);
        };
        self.render_record(&record).await.map(Lookup::Found)
    }

    /// Render an already fetched record, loading its tags and like status.
    ///
    /// # Errors
    ///
    /// Returns an error if the tags or like status cannot be fetched.
    pub async fn render_record(&self, record: &ContentRecord) -> Result<Markup, ClientError> {
        let tags = match record {
            ContentRecord::Post(_) | ContentRecord::Request(_) => {
                self.api.fetch_tags(record.id()).await?.found()
            }
            ContentRecord::Comment(_) => None,
        };
        self.render_with_tags(record, tags).await
    }

    /// Fetch a yell from the legacy routes and render it.
    ///
    /// # Errors
    ///
    /// Returns an error if the yell, its tags or its like status cannot be
    /// fetched.
    pub async fn load_legacy_card(&self, item: ItemRef) -> Result<Lookup<Markup>, ClientError> {
        let Lookup::Found(record) = self.api.fetch_legacy_yell(item).await? else {
            info!(%item, "Legacy yell not found");
            return Ok(Lookup::NotFound);
        };
        let tags = self.api.fetch_legacy_tags(record.id()).await?.found();
        self.render_with_tags(&record, tags).await.map(Lookup::Found)
    }

    async fn render_with_tags(
        &self,
        record: &ContentRecord,
        tags: Option<Vec<String>>,
    ) -> Result<Markup, ClientError> {
        let like = LikeControl::init(&self.api, record).await?;

        debug!(kind = %record.kind(), id = record.id(), "Rendering card");
        Ok(render_card(record, tags.as_deref(), &like))
    }

    /// Fetch, render and append an item to `container`.
    ///
    /// # Errors
    ///
    /// Returns an error if fetching fails or `container` does not exist.
    pub async fn add_card_by_id(
        &self,
        namespace: Namespace,
        item: ItemRef,
        page: &Page,
        container: &str,
    ) -> Result<Lookup<()>, ClientError> {
        let Lookup::Found(card) = self.load_card(namespace, item).await? else {
            return Ok(Lookup::NotFound);
        };
        page.append(container, card)?;
        Ok(Lookup::Found(()))
    }
}

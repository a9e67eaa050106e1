//! HTTP client for the yells backend.
//!
//! JSON endpoints answer a missing item with the bare body `"404"` (as a JSON
//! string or plain text) instead of an error status; both forms, and a real
//! 404 status, come back as [`Lookup::NotFound`]. The like endpoints answer
//! with bare text tokens.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::constants::{NOT_FOUND_SENTINEL, UNKNOWN_SENTINEL};
use crate::error::ClientError;
use crate::model::{
    CommentSet, ContentKind, ContentRecord, DecodeError, ItemRef, LegacyYell, LikeStatus, Lookup,
    Namespace, TagSet, ToggleReply,
};

#[derive(Deserialize)]
struct RecordId {
    content_id: u64,
}

/// Client for the backend's REST endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(ClientError::Client)?;

        Ok(Self::with_client(client, config.base_url.clone()))
    }

    #[must_use]
    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch one content item from `/api/{namespace}/{item}`.
    ///
    /// Items from the `yell` namespace decode by their own `base_type`; items
    /// fetched from a concrete kind decode as that kind.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a body that is neither the
    /// not-found sentinel nor a valid record.
    pub async fn fetch_item(
        &self,
        namespace: Namespace,
        item: ItemRef,
    ) -> Result<Lookup<ContentRecord>, ClientError> {
        let path = format!("/api/{namespace}/{item}");
        let url = self.endpoint(&path)?;
        let Lookup::Found(value) = self.get_json(&url).await? else {
            return Ok(Lookup::NotFound);
        };

        let record = match namespace {
            Namespace::Yell => ContentRecord::from_json(value),
            Namespace::Kind(kind) => ContentRecord::from_json_as(kind, value),
        }
        .map_err(|source| ClientError::Decode {
            url: url.to_string(),
            source,
        })?;

        Ok(Lookup::Found(record))
    }

    /// Fetch only the id of the newest item in `namespace`.
    ///
    /// The record itself is not decoded, so an item of a kind this client
    /// does not render still yields its id.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a body without a
    /// `content_id`.
    pub async fn fetch_last_id(&self, namespace: Namespace) -> Result<Lookup<u64>, ClientError> {
        let head: Lookup<RecordId> = self
            .get_typed(&format!("/api/{namespace}/{}", ItemRef::Last))
            .await?;
        Ok(head.map(|head| head.content_id))
    }

    /// Fetch a yell from the legacy `/yell/{item}` route.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a malformed body.
    pub async fn fetch_legacy_yell(
        &self,
        item: ItemRef,
    ) -> Result<Lookup<ContentRecord>, ClientError> {
        let yell: Lookup<LegacyYell> = self.get_typed(&format!("/yell/{item}")).await?;
        Ok(yell.map(ContentRecord::from))
    }

    /// Fetch the tags of an item from `/api/tags/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a malformed body.
    pub async fn fetch_tags(&self, id: u64) -> Result<Lookup<TagSet>, ClientError> {
        self.get_typed(&format!("/api/tags/{id}")).await
    }

    /// Fetch tags from the legacy `/tags/{id}` route.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a malformed body.
    pub async fn fetch_legacy_tags(&self, id: u64) -> Result<Lookup<TagSet>, ClientError> {
        self.get_typed(&format!("/tags/{id}")).await
    }

    /// Fetch the comment ids attached to an item.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a malformed body.
    pub async fn fetch_comment_set(&self, id: u64) -> Result<Lookup<CommentSet>, ClientError> {
        self.get_typed(&format!("/api/commentset/{id}")).await
    }

    /// Ask whether the current viewer already liked an item.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure.
    pub async fn like_status(&self, kind: ContentKind, id: u64) -> Result<LikeStatus, ClientError> {
        let text = self.get_text(&format!("/{kind}/{id}/status")).await?;
        Ok(LikeStatus::from_text(&text))
    }

    /// Record a like for the current viewer.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure.
    pub async fn like(&self, kind: ContentKind, id: u64) -> Result<ToggleReply, ClientError> {
        let text = self.get_text(&format!("/{kind}/{id}/like")).await?;
        Ok(ToggleReply::from_text(&text))
    }

    /// Withdraw the current viewer's like.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure.
    pub async fn unlike(&self, kind: ContentKind, id: u64) -> Result<ToggleReply, ClientError> {
        let text = self.get_text(&format!("/{kind}/{id}/unlike")).await?;
        Ok(ToggleReply::from_text(&text))
    }

    /// WebSocket URL of the search channel for `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot carry a WebSocket scheme.
    pub fn search_url(&self, query: &str) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        let scheme = if url.scheme() == "https" { "wss" } else { "ws" };
        url.set_scheme(scheme)
            .map_err(|()| ClientError::SearchUrl(self.base_url.to_string()))?;
        url.set_path(&format!("/api/yell/search/{}", urlencoding::encode(query)));
        url.set_query(None);
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }

    async fn get_typed<T: DeserializeOwned>(&self, path: &str) -> Result<Lookup<T>, ClientError> {
        let url = self.endpoint(path)?;
        let Lookup::Found(value) = self.get_json(&url).await? else {
            return Ok(Lookup::NotFound);
        };
        let decoded = serde_json::from_value(value).map_err(|e| ClientError::Decode {
            url: url.to_string(),
            source: DecodeError::Json(e),
        })?;
        Ok(Lookup::Found(decoded))
    }

    async fn get_json(&self, url: &Url) -> Result<Lookup<Value>, ClientError> {
        debug!(url = %url, "GET");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ClientError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(Lookup::NotFound);
        }
        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|source| ClientError::Http {
            url: url.to_string(),
            source,
        })?;

        parse_json_body(&body).map_err(|source| ClientError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn get_text(&self, path: &str) -> Result<String, ClientError> {
        let url = self.endpoint(path)?;
        debug!(url = %url, "GET");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ClientError::Http {
                url: url.to_string(),
                source,
            })?;

        response.text().await.map_err(|source| ClientError::Http {
            url: url.to_string(),
            source,
        })
    }
}

/// Parse a JSON body, mapping the not-found sentinels to [`Lookup::NotFound`].
fn parse_json_body(body: &str) -> Result<Lookup<Value>, DecodeError> {
    let trimmed = body.trim();
    if is_sentinel(trimmed) {
        return Ok(Lookup::NotFound);
    }

    let value: Value = serde_json::from_str(trimmed)?;
    match &value {
        Value::String(s) if is_sentinel(s) => Ok(Lookup::NotFound),
        _ => Ok(Lookup::Found(value)),
    }
}

fn is_sentinel(text: &str) -> bool {
    text == NOT_FOUND_SENTINEL || text == UNKNOWN_SENTINEL
}

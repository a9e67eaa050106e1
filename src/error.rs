use thiserror::Error;

use crate::dom::DomError;
use crate::model::DecodeError;

/// Failures the client does not recover from.
///
/// A missing item is not an error: the API reports it as
/// [`Lookup::NotFound`](crate::model::Lookup::NotFound).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected status {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: DecodeError,
    },
    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("cannot derive a WebSocket URL from {0}")]
    SearchUrl(String),
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("feed page size must be at least 1")]
    ZeroPageSize,
    #[error(transparent)]
    Dom(#[from] DomError),
}

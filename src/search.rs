//! Search results streamed over a WebSocket.
//!
//! The server pushes matching ids one message at a time and sends more when
//! the client asks with `next`. A `404` message means the results are used
//! up. Cards go through the same ordered appender as the feed.

use std::time::Duration;

use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::constants::{NEXT_PAGE_MESSAGE, NOT_FOUND_SENTINEL, NO_MORE_RESULTS};
use crate::dom::{ids, DomError, Page};
use crate::error::ClientError;
use crate::model::{ItemRef, Namespace};
use crate::queue::OrderedAppender;
use crate::render::CardRenderer;
use crate::viewport::ScrollEvent;

pub type SearchSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub scroll_offset: u32,
    /// Minimum spacing between two `next` requests.
    pub cooldown: Duration,
}

impl SearchConfig {
    #[must_use]
    pub const fn from_config(config: &Config) -> Self {
        Self {
            scroll_offset: config.scroll_offset_px,
            cooldown: config.scroll_debounce,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            scroll_offset: 100,
            cooldown: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSummary {
    pub ids_received: usize,
    pub next_requests: usize,
    pub appended: usize,
    pub missing: usize,
    pub failed: usize,
    /// The server reported the end of the results.
    pub exhausted: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Incoming {
    Id(u64),
    Done,
    Closed,
    Ignored(String),
}

fn classify(message: Message) -> Incoming {
    let text = match message {
        Message::Text(text) => text,
        Message::Binary(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Message::Close(_) => return Incoming::Closed,
        Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {
            return Incoming::Ignored(String::new())
        }
    };
    let text = text.trim();
    if text == NOT_FOUND_SENTINEL {
        return Incoming::Done;
    }
    text.parse()
        .map_or_else(|_| Incoming::Ignored(text.to_string()), Incoming::Id)
}

enum End {
    Exhausted,
    Closed,
    Cancelled,
}

pub struct SearchSession {
    renderer: CardRenderer,
    page: Page,
    config: SearchConfig,
    cancel: CancellationToken,
}

impl SearchSession {
    #[must_use]
    pub fn new(
        renderer: CardRenderer,
        page: Page,
        config: SearchConfig,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            renderer,
            page,
            config,
            cancel,
        }
    }

    /// The query the page was opened for, read from `searchup`.
    ///
    /// # Errors
    ///
    /// Returns an error if the page has no `searchup` element or query.
    pub fn query_from_page(&self) -> Result<String, DomError> {
        self.page.data_query(ids::SEARCHUP)
    }

    /// Open the search channel for `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the handshake fails.
    pub async fn connect(&self, query: &str) -> Result<SearchSocket, ClientError> {
        let url = self.renderer.api().search_url(query)?;
        info!(url = %url, "Opening search channel");
        let (socket, _response) = connect_async(url.as_str()).await?;
        Ok(socket)
    }

    /// Consume the channel until the server runs out of results, the socket
    /// closes, or the session is cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if the page lacks the search elements.
    pub async fn run<S>(
        &self,
        socket: S,
        mut scroll: mpsc::Receiver<ScrollEvent>,
    ) -> Result<SearchSummary, ClientError>
    where
        S: Stream<Item = Result<Message, WsError>> + Sink<Message, Error = WsError> + Unpin,
    {
        let (mut sink, mut stream) = socket.split();
        let appender = OrderedAppender::new(self.page.clone(), ids::MAIN, self.cancel.child_token());
        let mut summary = SearchSummary::default();
        let mut cooldown_until: Option<Instant> = None;
        let mut scroll_open = true;

        let end = loop {
            tokio::select! {
                () = self.cancel.cancelled() => break End::Cancelled,
                message = stream.next() => match message {
                    Some(Ok(message)) => match classify(message) {
                        Incoming::Id(id) => {
                            summary.ids_received += 1;
                            let renderer = self.renderer.clone();
                            appender.push(id, async move {
                                renderer.load_card(Namespace::Yell, ItemRef::Id(id)).await
                            });
                        }
                        Incoming::Done => break End::Exhausted,
                        Incoming::Closed => break End::Closed,
                        Incoming::Ignored(text) => {
                            if !text.is_empty() {
                                warn!(message = %text, "Ignoring unexpected search message");
                            }
                        }
                    },
                    Some(Err(e)) => {
                        warn!(error = %e, "Search channel failed");
                        break End::Closed;
                    }
                    None => break End::Closed,
                },
                event = scroll.recv(), if scroll_open => match event {
                    Some(event) if event.is_near_bottom(self.config.scroll_offset) => {
                        let now = Instant::now();
                        if cooldown_until.map_or(true, |until| now >= until) {
                            if let Err(e) = sink.send(Message::text(NEXT_PAGE_MESSAGE)).await {
                                warn!(error = %e, "Failed to request more results");
                                break End::Closed;
                            }
                            summary.next_requests += 1;
                            cooldown_until = Some(now + self.config.cooldown);
                            debug!(requests = summary.next_requests, "Requested more results");
                        }
                    }
                    Some(_) => {}
                    None => scroll_open = false,
                },
            }
        };

        let stats = appender.finish().await;
        summary.appended = stats.appended;
        summary.missing = stats.missing;
        summary.failed = stats.failed;

        match end {
            End::Exhausted => {
                summary.exhausted = true;
                if let Err(e) = sink.close().await {
                    debug!(error = %e, "Search channel close failed");
                }
                self.page.hide(ids::SPINNER)?;
                self.page.show(ids::WARN)?;
                self.page.set_text(ids::WARN, NO_MORE_RESULTS)?;
                info!(
                    ids = summary.ids_received,
                    appended = summary.appended,
                    "Search results exhausted"
                );
            }
            End::Closed => info!(ids = summary.ids_received, "Search channel closed"),
            End::Cancelled => info!(ids = summary.ids_received, "Search cancelled"),
        }
        Ok(summary)
    }
}

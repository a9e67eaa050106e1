//! Infinite-scroll feed of the newest items.
//!
//! The controller walks ids downward from the newest one, starting a card
//! fetch per id. Every `page_size` ids it waits until the reader scrolls
//! near the bottom of the page, then pauses for the debounce interval
//! before carrying on. When id 1 has been requested and every card has been
//! handled, the spinner is hidden and the "No more results" banner shown.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::Config;
use crate::constants::NO_MORE_RESULTS;
use crate::dom::{ids, Page};
use crate::error::ClientError;
use crate::model::{ItemRef, Lookup, Namespace};
use crate::queue::OrderedAppender;
use crate::render::CardRenderer;
use crate::viewport::ScrollEvent;

#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub namespace: Namespace,
    /// Ids requested between two scroll waits.
    pub page_size: u64,
    /// How close to the bottom, in pixels, counts as "near the bottom".
    pub scroll_offset: u32,
    pub scroll_debounce: Duration,
    /// Delay before the "taking a while" notice appears.
    pub slow_warning: Duration,
}

impl FeedConfig {
    #[must_use]
    pub fn from_config(config: &Config, namespace: Namespace) -> Self {
        Self {
            namespace,
            page_size: config.page_size,
            scroll_offset: config.scroll_offset_px,
            scroll_debounce: config.scroll_debounce,
            slow_warning: config.slow_warning,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            namespace: Namespace::Yell,
            page_size: 15,
            scroll_offset: 100,
            scroll_debounce: Duration::from_millis(500),
            slow_warning: Duration::from_secs(7),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    Loading,
    WaitingForScroll,
    Exhausted,
}

/// What a feed run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedSummary {
    /// Id of the newest item, if the namespace had any.
    pub last_id: Option<u64>,
    pub requested: usize,
    pub scroll_waits: usize,
    pub appended: usize,
    pub missing: usize,
    pub failed: usize,
    /// The run stopped before reaching id 1.
    pub interrupted: bool,
}

pub struct FeedController {
    renderer: CardRenderer,
    page: Page,
    config: FeedConfig,
    cancel: CancellationToken,
    state: watch::Sender<FeedState>,
}

impl FeedController {
    #[must_use]
    pub fn new(
        renderer: CardRenderer,
        page: Page,
        config: FeedConfig,
        cancel: CancellationToken,
    ) -> Self {
        let (state, _) = watch::channel(FeedState::Loading);
        Self {
            renderer,
            page,
            config,
            cancel,
            state,
        }
    }

    #[must_use]
    pub fn state(&self) -> watch::Receiver<FeedState> {
        self.state.subscribe()
    }

    /// Run the feed until every id is requested, the scroll stream closes,
    /// or the controller is cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if the page size is zero, the newest item cannot be
    /// fetched or the page lacks the feed's elements.
    pub async fn run(
        &self,
        mut scroll: mpsc::Receiver<ScrollEvent>,
    ) -> Result<FeedSummary, ClientError> {
        if self.config.page_size == 0 {
            return Err(ClientError::ZeroPageSize);
        }
        let namespace = self.config.namespace;
        self.state.send_replace(FeedState::Loading);

        let last_id = match self.renderer.api().fetch_last_id(namespace).await? {
            Lookup::Found(id) => Some(id),
            Lookup::NotFound => {
                info!(%namespace, "Feed is empty");
                None
            }
        };

        let warning = self.spawn_slow_warning();
        let appender = OrderedAppender::new(self.page.clone(), ids::MAIN, self.cancel.child_token());
        let mut summary = FeedSummary {
            last_id,
            ..FeedSummary::default()
        };

        for id in (1..=last_id.unwrap_or(0)).rev() {
            if id % self.config.page_size == 0 {
                summary.scroll_waits += 1;
                if !self.wait_for_scroll(&mut scroll).await {
                    summary.interrupted = true;
                    break;
                }
            }

            let renderer = self.renderer.clone();
            appender.push(id, async move { renderer.load_card(namespace, ItemRef::Id(id)).await });
            summary.requested += 1;
        }

        let stats = appender.finish().await;
        warning.cancel();
        summary.appended = stats.appended;
        summary.missing = stats.missing;
        summary.failed = stats.failed;

        if summary.interrupted || self.cancel.is_cancelled() {
            summary.interrupted = true;
            info!(%namespace, requested = summary.requested, "Feed interrupted");
            return Ok(summary);
        }

        self.page.hide(ids::SPINNER)?;
        self.page.show(ids::WARN)?;
        self.page.set_text(ids::WARN, NO_MORE_RESULTS)?;
        self.state.send_replace(FeedState::Exhausted);

        info!(
            %namespace,
            requested = summary.requested,
            appended = summary.appended,
            missing = summary.missing,
            failed = summary.failed,
            "Feed exhausted"
        );
        Ok(summary)
    }

    /// Wait for a near-bottom scroll, then the debounce pause. Returns
    /// `false` if the stream closed or the controller was cancelled.
    ///
    /// Only scrolls made while waiting count.
    async fn wait_for_scroll(&self, scroll: &mut mpsc::Receiver<ScrollEvent>) -> bool {
        while scroll.try_recv().is_ok() {}
        self.state.send_replace(FeedState::WaitingForScroll);
        debug!("Waiting for scroll");

        loop {
            let event = tokio::select! {
                () = self.cancel.cancelled() => return false,
                event = scroll.recv() => event,
            };
            match event {
                Some(event) if event.is_near_bottom(self.config.scroll_offset) => break,
                Some(_) => {}
                None => return false,
            }
        }

        tokio::select! {
            () = self.cancel.cancelled() => return false,
            () = tokio::time::sleep(self.config.scroll_debounce) => {}
        }
        self.state.send_replace(FeedState::Loading);
        true
    }

    /// Show the slow-loading notice after the configured delay unless the
    /// returned token is cancelled first.
    fn spawn_slow_warning(&self) -> CancellationToken {
        let token = self.cancel.child_token();
        let page = self.page.clone();
        let delay = self.config.slow_warning;
        let guard = token.clone();

        tokio::spawn(async move {
            tokio::select! {
                () = guard.cancelled() => {}
                () = tokio::time::sleep(delay) => {
                    debug!("Feed is slow, showing notice");
                    if let Err(e) = page.show(ids::WARN) {
                        debug!(error = %e, "No warning element");
                    }
                }
            }
        });
        token
    }
}

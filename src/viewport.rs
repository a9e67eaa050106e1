//! Scroll geometry and the headless viewport.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Viewport geometry at the moment of a scroll, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollEvent {
    pub inner_height: u32,
    pub scroll_y: u32,
    pub body_height: u32,
}

impl ScrollEvent {
    #[must_use]
    pub const fn new(inner_height: u32, scroll_y: u32, body_height: u32) -> Self {
        Self {
            inner_height,
            scroll_y,
            body_height,
        }
    }

    /// A viewport scrolled all the way down.
    #[must_use]
    pub const fn at_bottom() -> Self {
        Self::new(800, 1200, 2000)
    }

    /// A viewport resting at the top of a long page.
    #[must_use]
    pub const fn at_top() -> Self {
        Self::new(800, 0, 10_000)
    }

    /// Whether the bottom of the viewport is within `offset` pixels of the
    /// end of the page.
    #[must_use]
    pub const fn is_near_bottom(&self, offset: u32) -> bool {
        self.inner_height as u64 + self.scroll_y as u64 + offset as u64 >= self.body_height as u64
    }
}

/// Emits a bottom-of-page scroll event on a fixed interval, standing in for
/// a reader who keeps scrolling.
pub struct AutoScroller;

impl AutoScroller {
    /// Spawn the scroller. It stops after `limit` events (if set), when the
    /// receiver goes away, or on cancellation.
    #[must_use]
    pub fn spawn(
        tx: mpsc::Sender<ScrollEvent>,
        interval: Duration,
        limit: Option<usize>,
        cancel: CancellationToken,
    ) -> JoinHandle<usize> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            let mut sent = 0;

            while limit.map_or(true, |max| sent < max) {
                tokio::select! {
                    () = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        if tx.send(ScrollEvent::at_bottom()).await.is_err() {
                            break;
                        }
                        sent += 1;
                    }
                }
            }
            debug!(sent, "Auto-scroller stopped");
            sent
        })
    }
}

//! Ordered card insertion.
//!
//! Card fetches run concurrently, but cards land in the container in the
//! order their fetches were started. Each pushed future is spawned at once;
//! a single worker awaits the handles front to back and appends whatever
//! each one produced before moving on.

use std::future::Future;

use maud::Markup;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::dom::Page;
use crate::error::ClientError;
use crate::model::Lookup;

type CardResult = Result<Lookup<Markup>, ClientError>;

struct Pending {
    id: u64,
    handle: JoinHandle<CardResult>,
}

/// Outcome counts of an appender's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppendStats {
    pub appended: usize,
    /// Ids the backend reported as not found.
    pub missing: usize,
    /// Fetches that errored, panicked or could not be appended.
    pub failed: usize,
}

impl AppendStats {
    #[must_use]
    pub const fn processed(&self) -> usize {
        self.appended + self.missing + self.failed
    }
}

/// Appends cards to one container in initiation order.
pub struct OrderedAppender {
    tx: mpsc::UnboundedSender<Pending>,
    processed: watch::Receiver<usize>,
    worker: JoinHandle<AppendStats>,
}

impl OrderedAppender {
    /// Start the append worker for `target` on `page`.
    ///
    /// Cancelling `cancel` aborts every fetch still queued.
    #[must_use]
    pub fn new(page: Page, target: &str, cancel: CancellationToken) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (processed_tx, processed) = watch::channel(0);
        let worker = tokio::spawn(drain(rx, page, target.to_string(), cancel, processed_tx));
        Self {
            tx,
            processed,
            worker,
        }
    }

    /// Start fetching a card now; it is appended after every earlier one.
    pub fn push<F>(&self, id: u64, card: F)
    where
        F: Future<Output = CardResult> + Send + 'static,
    {
        let handle = tokio::spawn(card);
        if let Err(mpsc::error::SendError(pending)) = self.tx.send(Pending { id, handle }) {
            debug!(id = pending.id, "Appender closed, dropping card");
            pending.handle.abort();
        }
    }

    /// Number of cards handled so far, whether appended, missing or failed.
    #[must_use]
    pub fn processed(&self) -> watch::Receiver<usize> {
        self.processed.clone()
    }

    /// Wait for every pushed card to be handled.
    pub async fn finish(self) -> AppendStats {
        let Self { tx, worker, .. } = self;
        drop(tx);
        worker.await.unwrap_or_else(|e| {
            warn!(error = %e, "Append worker failed");
            AppendStats::default()
        })
    }
}

async fn drain(
    mut rx: mpsc::UnboundedReceiver<Pending>,
    page: Page,
    target: String,
    cancel: CancellationToken,
    processed: watch::Sender<usize>,
) -> AppendStats {
    let mut stats = AppendStats::default();

    loop {
        let next = tokio::select! {
            biased;
            () = cancel.cancelled() => None,
            next = rx.recv() => next,
        };
        let Some(Pending { id, mut handle }) = next else {
            break;
        };

        let joined = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                handle.abort();
                break;
            }
            joined = &mut handle => joined,
        };

        match joined {
            Ok(Ok(Lookup::Found(card))) => match page.append(&target, card) {
                Ok(()) => stats.appended += 1,
                Err(e) => {
                    warn!(id, error = %e, "Failed to append card");
                    stats.failed += 1;
                }
            },
            Ok(Ok(Lookup::NotFound)) => {
                debug!(id, "Skipping missing item");
                stats.missing += 1;
            }
            Ok(Err(e)) => {
                warn!(id, error = %e, "Failed to load card");
                stats.failed += 1;
            }
            Err(e) => {
                warn!(id, error = %e, "Card task did not complete");
                stats.failed += 1;
            }
        }
        processed.send_replace(stats.processed());
    }

    rx.close();
    while let Ok(pending) = rx.try_recv() {
        pending.handle.abort();
    }
    stats
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use maud::html;

    use super::*;
    use crate::dom::ids;

    fn card(n: u64) -> Markup {
        html! { p { (n) } }
    }

    #[tokio::test(start_paused = true)]
    async fn test_appends_in_push_order() {
        let page = Page::discover();
        let appender = OrderedAppender::new(page.clone(), ids::MAIN, CancellationToken::new());

        for (id, delay) in [(3, 300), (2, 10), (1, 150)] {
            appender.push(id, async move {
                tokio::time::sleep(Duration::from_millis(delay)).await;
                Ok(Lookup::Found(card(id)))
            });
        }

        let stats = appender.finish().await;
        assert_eq!(stats.appended, 3);

        let children: Vec<String> = page
            .children(ids::MAIN)
            .unwrap()
            .into_iter()
            .map(Markup::into_string)
            .collect();
        assert_eq!(children, ["<p>3</p>", "<p>2</p>", "<p>1</p>"]);
    }

    #[tokio::test]
    async fn test_missing_and_failed_are_skipped() {
        let page = Page::discover();
        let appender = OrderedAppender::new(page.clone(), ids::MAIN, CancellationToken::new());

        appender.push(3, async { Ok(Lookup::Found(card(3))) });
        appender.push(2, async { Ok(Lookup::NotFound) });
        appender.push(1, async {
            Err(ClientError::SearchUrl("nowhere".to_string()))
        });

        let stats = appender.finish().await;
        assert_eq!(
            stats,
            AppendStats {
                appended: 1,
                missing: 1,
                failed: 1
            }
        );
        assert_eq!(page.child_count(ids::MAIN).unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_cards() {
        let page = Page::discover();
        let cancel = CancellationToken::new();
        let appender = OrderedAppender::new(page.clone(), ids::MAIN, cancel.clone());

        appender.push(2, async { Ok(Lookup::Found(card(2))) });
        appender.push(1, async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Lookup::Found(card(1)))
        });

        let mut processed = appender.processed();
        processed.wait_for(|n| *n >= 1).await.unwrap();
        cancel.cancel();

        let stats = appender.finish().await;
        assert_eq!(stats.appended, 1);
        assert_eq!(page.child_count(ids::MAIN).unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_target_counts_as_failed() {
        let page = Page::home();
        let appender = OrderedAppender::new(page, ids::MAIN, CancellationToken::new());
        appender.push(1, async { Ok(Lookup::Found(card(1))) });
        assert_eq!(appender.finish().await.failed, 1);
    }
}

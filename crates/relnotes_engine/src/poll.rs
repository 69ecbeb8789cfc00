use std::sync::Arc;

use engine_logging::{engine_info, engine_warn};
use relnotes_core::{check_for_update, Notification, Timestamp, UpdateCheck, WatermarkStore};

use crate::schedule::{JobError, PeriodicJob};
use crate::{parse_feed, FeedFetcher, FetchError, Notifier, ParseError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PollError {
    #[error("feed fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("feed parse failed: {0}")]
    Parse(#[from] ParseError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOutcome {
    pub previous_watermark: Timestamp,
    pub check: UpdateCheck,
    /// Whether the new watermark reached storage. `false` on a notify means
    /// the next cycle will notify again.
    pub watermark_stored: bool,
}

/// One background "is there a new release?" check.
pub struct Poller {
    feed_url: String,
    channel_id: String,
    fetcher: Arc<dyn FeedFetcher>,
    store: Box<dyn WatermarkStore>,
    notifier: Arc<dyn Notifier>,
}

impl Poller {
    pub fn new(
        feed_url: impl Into<String>,
        channel_id: impl Into<String>,
        fetcher: Arc<dyn FeedFetcher>,
        store: Box<dyn WatermarkStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            feed_url: feed_url.into(),
            channel_id: channel_id.into(),
            fetcher,
            store,
            notifier,
        }
    }

    pub fn watermark(&self) -> Timestamp {
        self.store.get()
    }

    /// Reads the watermark, fetches and diffs the feed, and on a newer release
    /// notifies first and stores the new watermark second.
    ///
    /// Fetch and parse failures abort the cycle before anything is written.
    pub async fn poll_once(&mut self) -> Result<PollOutcome, PollError> {
        let previous_watermark = self.store.get();
        let output = self.fetcher.fetch(&self.feed_url).await?;
        let feed = parse_feed(&output.text())?;
        let check = check_for_update(&feed, previous_watermark);

        if !check.notify {
            engine_info!(
                "No new release (feed={} watermark={})",
                check.latest_timestamp,
                previous_watermark
            );
            return Ok(PollOutcome {
                previous_watermark,
                check,
                watermark_stored: false,
            });
        }

        let notification = Notification::new_release(&self.channel_id, check.headline.as_ref());
        self.notifier.notify(&notification);

        let watermark_stored = match self.store.set(check.latest_timestamp) {
            Ok(()) => true,
            Err(err) => {
                engine_warn!("Notified but could not store watermark: {}", err);
                false
            }
        };
        engine_info!(
            "New release {:?} (feed={} previous={})",
            notification.subtitle,
            check.latest_timestamp,
            previous_watermark
        );

        Ok(PollOutcome {
            previous_watermark,
            check,
            watermark_stored,
        })
    }
}

#[async_trait::async_trait]
impl PeriodicJob for Poller {
    async fn run(&mut self) -> Result<(), JobError> {
        self.poll_once().await?;
        Ok(())
    }
}

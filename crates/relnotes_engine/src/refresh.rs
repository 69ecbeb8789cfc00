use std::sync::Arc;

use engine_logging::{engine_info, engine_warn};
use relnotes_core::{group, DisplayItem, Generation};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::{parse_feed, FeedFetcher, PollError};

/// Latest published state of the foreground list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RefreshState {
    #[default]
    Idle,
    /// A refresh is running; the visible list is empty.
    Loading { generation: Generation },
    Ready {
        generation: Generation,
        items: Vec<DisplayItem>,
    },
    /// The refresh failed; the list stays empty.
    Failed { generation: Generation },
}

/// Fetches and groups the feed off the render task, publishing into a
/// single-slot channel where a newer value always replaces an older one.
///
/// A new `refresh` aborts the one in flight, and a superseded refresh never
/// publishes. Dropping the worker cancels it.
pub struct RefreshWorker {
    feed_url: String,
    fetcher: Arc<dyn FeedFetcher>,
    slot: Arc<watch::Sender<RefreshState>>,
    in_flight: Option<JoinHandle<()>>,
}

impl RefreshWorker {
    pub fn new(feed_url: impl Into<String>, fetcher: Arc<dyn FeedFetcher>) -> Self {
        let (slot, _) = watch::channel(RefreshState::Idle);
        Self {
            feed_url: feed_url.into(),
            fetcher,
            slot: Arc::new(slot),
            in_flight: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<RefreshState> {
        self.slot.subscribe()
    }

    pub fn current(&self) -> RefreshState {
        self.slot.borrow().clone()
    }

    /// Must be called from within a tokio runtime.
    pub fn refresh(&mut self, generation: Generation) {
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }
        self.slot.send_replace(RefreshState::Loading { generation });

        let slot = Arc::clone(&self.slot);
        let fetcher = Arc::clone(&self.fetcher);
        let url = self.feed_url.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let next = match load_items(fetcher.as_ref(), &url).await {
                Ok(items) => {
                    engine_info!("Refresh {} loaded {} rows", generation, items.len());
                    RefreshState::Ready { generation, items }
                }
                Err(err) => {
                    engine_warn!("Refresh {} failed: {}", generation, err);
                    RefreshState::Failed { generation }
                }
            };
            // An aborted task may already be past its last await on another
            // worker; only the refresh still marked as loading may publish.
            slot.send_if_modified(|state| {
                if *state != (RefreshState::Loading { generation }) {
                    return false;
                }
                *state = next;
                true
            });
        }));
    }
}

impl Drop for RefreshWorker {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

async fn load_items(fetcher: &dyn FeedFetcher, url: &str) -> Result<Vec<DisplayItem>, PollError> {
    let output = fetcher.fetch(url).await?;
    let feed = parse_feed(&output.text())?;
    Ok(group(&feed.entries))
}

use std::sync::Arc;

use engine_logging::engine_info;
use relnotes_core::{Effect, Msg};
use relnotes_engine::{FeedFetcher, RefreshState, RefreshWorker};
use tokio::sync::watch;

/// Carries out the effects returned by `update` and turns refresh results
/// back into messages.
pub struct EffectRunner {
    worker: RefreshWorker,
    updates: watch::Receiver<RefreshState>,
}

impl EffectRunner {
    pub fn new(feed_url: &str, fetcher: Arc<dyn FeedFetcher>) -> Self {
        let worker = RefreshWorker::new(feed_url, fetcher);
        let updates = worker.subscribe();
        Self { worker, updates }
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchFeed { generation } => {
                    engine_info!("FetchFeed generation={}", generation);
                    self.worker.refresh(generation);
                }
                Effect::OpenLink { url } => {
                    engine_info!("OpenLink url={}", url);
                    println!("{url}");
                }
            }
        }
    }

    /// Waits for the next finished refresh. Returns `NoOp` if the worker is gone.
    pub async fn next_msg(&mut self) -> Msg {
        loop {
            if self.updates.changed().await.is_err() {
                return Msg::NoOp;
            }
            let msg = match &*self.updates.borrow_and_update() {
                RefreshState::Ready { generation, items } => Some(Msg::FeedLoaded {
                    generation: *generation,
                    items: items.clone(),
                }),
                RefreshState::Failed { generation } => Some(Msg::RefreshFailed {
                    generation: *generation,
                }),
                RefreshState::Idle | RefreshState::Loading { .. } => None,
            };
            if let Some(msg) = msg {
                return msg;
            }
        }
    }
}

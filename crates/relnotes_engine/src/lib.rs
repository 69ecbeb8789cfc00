//! Relnotes engine: feed fetching, persistence, notification and scheduling.
mod content;
mod fetch;
mod notify;
mod parse;
mod persist;
mod poll;
mod refresh;
mod schedule;
mod types;

pub use content::content_to_text;
pub use fetch::{FeedFetcher, FetchSettings, ReqwestFetcher, DEFAULT_FEED_URL};
pub use notify::{LogNotifier, Notifier, RecordingNotifier};
pub use parse::{parse_feed, ParseError};
pub use persist::{ensure_output_dir, AtomicFileWriter, FileWatermarkStore, PersistError};
pub use poll::{PollError, PollOutcome, Poller};
pub use refresh::{RefreshState, RefreshWorker};
pub use schedule::{Constraint, JobError, PeriodicJob, PeriodicJobSpec, Registration, Scheduler};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};

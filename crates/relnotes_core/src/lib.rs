//! Relnotes core: pure feed diffing, list grouping and sticky-header math.
mod detect;
mod display;
mod effect;
mod feed;
mod group;
mod layout;
mod msg;
mod notification;
mod state;
mod sticky;
mod timestamp;
mod update;
mod view_model;
mod watermark;

pub use detect::{check_for_update, UpdateCheck};
pub use display::{DisplayList, DEFAULT_HEADER_ROWS};
pub use effect::Effect;
pub use feed::{FeedDocument, FeedEntry};
pub use group::{group, DisplayItem};
pub use layout::ListLayout;
pub use msg::Msg;
pub use notification::{Notification, NOTIFICATION_CHANNEL, NOTIFICATION_ID};
pub use state::{AppState, Generation, RefreshStatus, ESTIMATED_ENTRY_ROWS};
pub use sticky::{HeaderOverlay, StickyHeaderPositioner, StickyHeaderSource, ViewportChild};
pub use timestamp::{parse_feed_timestamp, Timestamp, NEVER_UPDATED};
pub use update::update;
pub use view_model::AppViewModel;
pub use watermark::{InMemoryWatermarkStore, WatermarkError, WatermarkStore};

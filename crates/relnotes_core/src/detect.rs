use crate::{parse_feed_timestamp, FeedDocument, FeedEntry, Timestamp, NEVER_UPDATED};

/// Result of comparing a freshly fetched feed against the stored watermark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCheck {
    /// Feed-level `<updated>` in epoch millis, or 0 when absent/unparsable.
    pub latest_timestamp: Timestamp,
    pub notify: bool,
    /// First entry of the feed, present only when `notify` is set.
    pub headline: Option<FeedEntry>,
}

impl UpdateCheck {
    fn quiet(latest_timestamp: Timestamp) -> Self {
        Self {
            latest_timestamp,
            notify: false,
            headline: None,
        }
    }
}

/// Decides whether the feed carries a release newer than `watermark`.
///
/// Pure: persisting `latest_timestamp` after a successful notification is the
/// caller's job. An empty feed or a malformed timestamp never notifies.
pub fn check_for_update(feed: &FeedDocument, watermark: Timestamp) -> UpdateCheck {
    if feed.entries.is_empty() {
        return UpdateCheck::quiet(NEVER_UPDATED);
    }

    let latest_timestamp = feed
        .updated
        .as_deref()
        .and_then(parse_feed_timestamp)
        .unwrap_or(NEVER_UPDATED);

    if latest_timestamp > watermark {
        UpdateCheck {
            latest_timestamp,
            notify: true,
            headline: feed.entries.first().cloned(),
        }
    } else {
        UpdateCheck::quiet(latest_timestamp)
    }
}

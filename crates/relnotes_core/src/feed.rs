/// One release-notes entry as published in the feed.
///
/// Entries are immutable once built; the fetch/parse layer constructs them and
/// hands ownership to whichever consumer asked for the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    date_label: String,
    updated_at: String,
    link: String,
    content: String,
}

impl FeedEntry {
    pub fn new(
        date_label: impl Into<String>,
        updated_at: impl Into<String>,
        link: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            date_label: date_label.into(),
            updated_at: updated_at.into(),
            link: link.into(),
            content: content.into(),
        }
    }

    /// The entry's `<title>`, which the feed uses as a date label.
    pub fn date_label(&self) -> &str {
        &self.date_label
    }

    /// Raw per-entry `<updated>` text in the feed's own format.
    pub fn updated_at(&self) -> &str {
        &self.updated_at
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    /// Raw (possibly escaped) HTML fragment.
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A parsed feed: the document-level `<updated>` text plus entries in feed
/// order (newest first).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedDocument {
    pub updated: Option<String>,
    pub entries: Vec<FeedEntry>,
}

impl FeedDocument {
    pub fn new(updated: Option<String>, entries: Vec<FeedEntry>) -> Self {
        Self { updated, entries }
    }
}

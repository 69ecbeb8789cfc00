use crate::Generation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start fetching the feed; the result must be tagged with `generation`.
    FetchFeed { generation: Generation },
    /// Open an entry's link outside the app.
    OpenLink { url: String },
}

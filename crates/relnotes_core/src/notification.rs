use crate::FeedEntry;

/// Channel the release notifications are posted on.
pub const NOTIFICATION_CHANNEL: &str = "androidxchecker";
/// Fixed id, so a newer release replaces the previous notification.
pub const NOTIFICATION_ID: i32 = 12;

const NEW_RELEASE_TITLE: &str = "New AndroidX Update!";
const NOTIFICATION_ICON: &str = "ic_launcher";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: i32,
    pub channel_id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub icon: String,
}

impl Notification {
    /// Builds the "new release" notification; the subtitle is the headline's
    /// date label when there is one.
    pub fn new_release(channel_id: impl Into<String>, headline: Option<&FeedEntry>) -> Self {
        Self {
            id: NOTIFICATION_ID,
            channel_id: channel_id.into(),
            title: NEW_RELEASE_TITLE.to_string(),
            subtitle: headline.map(|entry| entry.date_label().to_string()),
            icon: NOTIFICATION_ICON.to_string(),
        }
    }
}

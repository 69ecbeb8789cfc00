use crate::FeedEntry;

/// One row unit of the release list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayItem {
    Header(String),
    Entry(FeedEntry),
}

impl DisplayItem {
    pub fn is_header(&self) -> bool {
        matches!(self, DisplayItem::Header(_))
    }

    pub fn date_label(&self) -> &str {
        match self {
            DisplayItem::Header(label) => label,
            DisplayItem::Entry(entry) => entry.date_label(),
        }
    }
}

/// Interleaves a header before every entry, keeping feed order.
///
/// Consecutive entries with the same date label each get their own header.
pub fn group(entries: &[FeedEntry]) -> Vec<DisplayItem> {
    entries
        .iter()
        .flat_map(|entry| {
            [
                DisplayItem::Header(entry.date_label().to_string()),
                DisplayItem::Entry(entry.clone()),
            ]
        })
        .collect()
}

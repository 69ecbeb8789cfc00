use crate::{DisplayItem, Generation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User pulled to refresh, or the screen was opened.
    RefreshRequested,
    /// A refresh finished; `items` is already grouped.
    FeedLoaded {
        generation: Generation,
        items: Vec<DisplayItem>,
    },
    /// A refresh failed. The list stays empty.
    RefreshFailed { generation: Generation },
    /// Scroll by a number of rows (positive = towards older entries).
    ScrolledBy(i32),
    /// Viewport height changed.
    ViewportResized(i32),
    /// Rendered row height of every list item, in list order.
    RowsMeasured(Vec<i32>),
    /// User activated the row at a list position.
    EntryActivated(usize),
    /// Fallback for placeholder wiring.
    NoOp,
}

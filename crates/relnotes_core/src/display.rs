use crate::{DisplayItem, StickyHeaderSource};

/// Rows taken by a rendered group header (label line plus rule line).
pub const DEFAULT_HEADER_ROWS: i32 = 2;

/// The grouped display sequence plus a precomputed position -> header index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayList {
    items: Vec<DisplayItem>,
    anchors: Vec<usize>,
    header_rows: i32,
}

impl Default for DisplayList {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl DisplayList {
    pub fn new(items: Vec<DisplayItem>) -> Self {
        Self::with_header_rows(items, DEFAULT_HEADER_ROWS)
    }

    pub fn with_header_rows(items: Vec<DisplayItem>, header_rows: i32) -> Self {
        let mut last_header = 0;
        let anchors = items
            .iter()
            .enumerate()
            .map(|(position, item)| {
                if item.is_header() {
                    last_header = position;
                }
                last_header
            })
            .collect();
        Self {
            items,
            anchors,
            header_rows,
        }
    }

    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    pub fn get(&self, position: usize) -> Option<&DisplayItem> {
        self.items.get(position)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn header_rows(&self) -> i32 {
        self.header_rows
    }

    pub fn header_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_header()).count()
    }

    pub fn entry_count(&self) -> usize {
        self.items.len() - self.header_count()
    }
}

impl StickyHeaderSource for DisplayList {
    fn is_header(&self, position: usize) -> bool {
        self.items.get(position).is_some_and(DisplayItem::is_header)
    }

    fn header_anchor_position(&self, position: usize) -> usize {
        match self.anchors.get(position) {
            Some(anchor) => *anchor,
            None => self.anchors.last().copied().unwrap_or(0),
        }
    }

    fn header_height(&self, _anchor: usize) -> i32 {
        self.header_rows
    }

    fn header_content(&self, anchor: usize) -> Option<&str> {
        self.items.get(anchor).map(DisplayItem::date_label)
    }
}

#[cfg(test)]
mod tests {
    use super::DisplayList;
    use crate::{group, FeedEntry, StickyHeaderSource};

    fn entry(label: &str) -> FeedEntry {
        FeedEntry::new(label, "", "", "")
    }

    #[test]
    fn anchors_point_at_nearest_preceding_header() {
        let list = DisplayList::new(group(&[entry("A"), entry("B")]));
        let anchors: Vec<usize> = (0..list.len())
            .map(|p| list.header_anchor_position(p))
            .collect();
        assert_eq!(anchors, vec![0, 0, 2, 2]);
    }

    #[test]
    fn list_without_leading_header_anchors_to_zero() {
        let list = DisplayList::new(vec![crate::DisplayItem::Entry(entry("A"))]);
        assert_eq!(list.header_anchor_position(0), 0);
        assert!(!list.is_header(0));
        assert_eq!(list.header_content(0), Some("A"));
    }

    #[test]
    fn out_of_range_positions_do_not_panic() {
        let empty = DisplayList::default();
        assert!(!empty.is_header(3));
        assert_eq!(empty.header_anchor_position(3), 0);
        assert_eq!(empty.header_content(0), None);

        let list = DisplayList::new(group(&[entry("A")]));
        assert_eq!(list.header_anchor_position(9), 0);
    }

    #[test]
    fn counts_headers_and_entries() {
        let list = DisplayList::new(group(&[entry("A"), entry("A"), entry("B")]));
        assert_eq!(list.header_count(), 3);
        assert_eq!(list.entry_count(), 3);
    }
}

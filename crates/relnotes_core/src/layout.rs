use crate::ViewportChild;

/// Vertical layout of a list whose items have known row heights.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListLayout {
    /// Top edge of every item in content coordinates.
    offsets: Vec<i32>,
    heights: Vec<i32>,
    content_height: i32,
}

impl ListLayout {
    /// Negative heights are treated as zero.
    pub fn new(heights: Vec<i32>) -> Self {
        let heights: Vec<i32> = heights.into_iter().map(|h| h.max(0)).collect();
        let mut offsets = Vec::with_capacity(heights.len());
        let mut y = 0;
        for height in &heights {
            offsets.push(y);
            y += height;
        }
        Self {
            offsets,
            heights,
            content_height: y,
        }
    }

    pub fn content_height(&self) -> i32 {
        self.content_height
    }

    /// Largest scroll offset that still fills `viewport_rows`.
    pub fn max_scroll(&self, viewport_rows: i32) -> i32 {
        (self.content_height - viewport_rows.max(0)).max(0)
    }

    pub fn clamp_scroll(&self, scroll: i32, viewport_rows: i32) -> i32 {
        scroll.clamp(0, self.max_scroll(viewport_rows))
    }

    /// Children intersecting `[0, viewport_rows)` after scrolling by `scroll`,
    /// top to bottom, with geometry relative to the viewport top.
    pub fn visible_children(&self, scroll: i32, viewport_rows: i32) -> Vec<ViewportChild> {
        self.offsets
            .iter()
            .zip(&self.heights)
            .enumerate()
            .filter(|(_, (_, height))| **height > 0)
            .map(|(position, (offset, height))| {
                let top = offset - scroll;
                ViewportChild::new(position, top, top + height)
            })
            .skip_while(|child| child.bottom <= 0)
            .take_while(|child| child.top < viewport_rows)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::ListLayout;
    use crate::ViewportChild;

    #[test]
    fn visible_children_are_clipped_to_viewport() {
        let layout = ListLayout::new(vec![2, 5, 2, 5]);
        assert_eq!(layout.content_height(), 14);
        assert_eq!(
            layout.visible_children(3, 6),
            vec![ViewportChild::new(1, -1, 4), ViewportChild::new(2, 4, 6)]
        );
    }

    #[test]
    fn child_ending_at_viewport_top_is_hidden() {
        let layout = ListLayout::new(vec![2, 5]);
        let children = layout.visible_children(2, 10);
        assert_eq!(children.first().and_then(|c| c.position), Some(1));
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let layout = ListLayout::new(vec![2, 5, 2, 5]);
        assert_eq!(layout.clamp_scroll(-4, 6), 0);
        assert_eq!(layout.clamp_scroll(100, 6), 8);
        assert_eq!(layout.clamp_scroll(100, 40), 0);
    }

    #[test]
    fn zero_height_items_are_never_visible() {
        let layout = ListLayout::new(vec![0, 3, -2]);
        assert_eq!(layout.visible_children(0, 10), vec![ViewportChild::new(1, 0, 3)]);
    }
}

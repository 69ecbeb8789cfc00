//! Sticky header positioning.
//!
//! The header of the group owning the topmost visible row stays pinned at the
//! top of the viewport until the next group's header scrolls into it, at
//! which point the pinned header is pushed up and off the screen.

/// What the positioner needs to know about the list it decorates.
pub trait StickyHeaderSource {
    /// Whether the item at `position` is a group header. Out of range is `false`.
    fn is_header(&self, position: usize) -> bool;

    /// Nearest header at or before `position`, or 0 when none exists.
    fn header_anchor_position(&self, position: usize) -> usize;

    /// Rendered height of the header at `anchor`, in rows.
    fn header_height(&self, anchor: usize) -> i32;

    /// Text bound into the header at `anchor`, if the position exists.
    fn header_content(&self, anchor: usize) -> Option<&str>;
}

/// Geometry of one rendered child, relative to the viewport top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportChild {
    /// List position bound to this child; `None` while it is being recycled.
    pub position: Option<usize>,
    pub top: i32,
    pub bottom: i32,
}

impl ViewportChild {
    pub fn new(position: usize, top: i32, bottom: i32) -> Self {
        Self {
            position: Some(position),
            top,
            bottom,
        }
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Where and what to draw over the list for the current frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderOverlay {
    pub anchor: usize,
    pub content: String,
    /// Offset from the viewport top; negative while being pushed off.
    pub top: i32,
    pub height: i32,
}

/// Computes the sticky header overlay once per render pass.
///
/// Holds the height measured for the last materialized header, which the
/// contact scan uses to size up incoming headers.
#[derive(Debug, Clone, Default)]
pub struct StickyHeaderPositioner {
    sticky_header_height: i32,
}

impl StickyHeaderPositioner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sticky_header_height(&self) -> i32 {
        self.sticky_header_height
    }

    /// Returns `None` when nothing is visible or the top child is unbound.
    pub fn compute_overlay<S>(
        &mut self,
        source: &S,
        children: &[ViewportChild],
    ) -> Option<HeaderOverlay>
    where
        S: StickyHeaderSource + ?Sized,
    {
        let top_position = children.first()?.position?;
        let anchor = source.header_anchor_position(top_position);
        let content = source.header_content(anchor)?.to_string();

        // The header is laid out at the viewport top, so its bottom edge is
        // its height.
        self.sticky_header_height = source.header_height(anchor).max(0);
        let contact_point = self.sticky_header_height;

        let top = match self.child_in_contact(source, children, contact_point, anchor) {
            Some(ViewportChild {
                position: Some(position),
                top,
                ..
            }) if source.is_header(*position) => top - self.sticky_header_height,
            _ => 0,
        };

        Some(HeaderOverlay {
            anchor,
            content,
            top,
            height: self.sticky_header_height,
        })
    }

    fn child_in_contact<'a, S>(
        &self,
        source: &S,
        children: &'a [ViewportChild],
        contact_point: i32,
        anchor: usize,
    ) -> Option<&'a ViewportChild>
    where
        S: StickyHeaderSource + ?Sized,
    {
        children.iter().find(|child| {
            // Other headers are measured as if they had the sticky header's height.
            let tolerance = match child.position {
                Some(position) if position != anchor && source.is_header(position) => {
                    self.sticky_header_height - child.height()
                }
                _ => 0,
            };
            let bottom = if child.top > 0 {
                child.bottom + tolerance
            } else {
                child.bottom
            };
            bottom > contact_point && child.top <= contact_point
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        headers: Vec<bool>,
        height: i32,
    }

    impl StickyHeaderSource for Fixed {
        fn is_header(&self, position: usize) -> bool {
            self.headers.get(position).copied().unwrap_or(false)
        }

        fn header_anchor_position(&self, position: usize) -> usize {
            (0..=position.min(self.headers.len().saturating_sub(1)))
                .rev()
                .find(|p| self.headers[*p])
                .unwrap_or(0)
        }

        fn header_height(&self, _anchor: usize) -> i32 {
            self.height
        }

        fn header_content(&self, anchor: usize) -> Option<&str> {
            (anchor < self.headers.len()).then_some("label")
        }
    }

    #[test]
    fn empty_viewport_has_no_overlay() {
        let source = Fixed {
            headers: vec![true, false],
            height: 2,
        };
        let mut positioner = StickyHeaderPositioner::new();
        assert_eq!(positioner.compute_overlay(&source, &[]), None);
    }

    #[test]
    fn unbound_top_child_has_no_overlay() {
        let source = Fixed {
            headers: vec![true, false],
            height: 2,
        };
        let mut positioner = StickyHeaderPositioner::new();
        let children = [ViewportChild {
            position: None,
            top: 0,
            bottom: 3,
        }];
        assert_eq!(positioner.compute_overlay(&source, &children), None);
    }

    #[test]
    fn caches_measured_header_height() {
        let source = Fixed {
            headers: vec![true, false],
            height: 3,
        };
        let mut positioner = StickyHeaderPositioner::new();
        let children = [ViewportChild::new(1, -1, 6)];
        let overlay = positioner.compute_overlay(&source, &children).unwrap();
        assert_eq!(overlay.height, 3);
        assert_eq!(positioner.sticky_header_height(), 3);
    }

    #[test]
    fn header_taller_than_viewport_stays_pinned() {
        let source = Fixed {
            headers: vec![true, false],
            height: 50,
        };
        let mut positioner = StickyHeaderPositioner::new();
        let children = [ViewportChild::new(0, 0, 50)];
        let overlay = positioner.compute_overlay(&source, &children).unwrap();
        assert_eq!(overlay.top, 0);
        assert_eq!(overlay.anchor, 0);
    }
}

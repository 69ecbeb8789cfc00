use crate::view_model::AppViewModel;
use crate::{DisplayItem, DisplayList, ListLayout, DEFAULT_HEADER_ROWS};

/// Rows assumed for an entry until the renderer reports real heights:
/// one line of text plus the separator.
pub const ESTIMATED_ENTRY_ROWS: i32 = 2;

/// Monotonic id of a refresh request. Only the latest one may publish.
pub type Generation = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Foreground screen state: the current list, scroll and refresh bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    generation: Generation,
    status: RefreshStatus,
    list: DisplayList,
    layout: ListLayout,
    header_rows: i32,
    scroll: i32,
    viewport_rows: i32,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_header_rows(DEFAULT_HEADER_ROWS)
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header_rows(header_rows: i32) -> Self {
        Self {
            generation: 0,
            status: RefreshStatus::Idle,
            list: DisplayList::with_header_rows(Vec::new(), header_rows),
            layout: ListLayout::default(),
            header_rows,
            scroll: 0,
            viewport_rows: 0,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            status: self.status,
            list: self.list.clone(),
            scroll: self.scroll,
            viewport_rows: self.viewport_rows,
            dirty: self.dirty,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn list(&self) -> &DisplayList {
        &self.list
    }

    pub fn layout(&self) -> &ListLayout {
        &self.layout
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Clears the visible list and returns the id the new refresh must carry.
    pub(crate) fn begin_refresh(&mut self) -> Generation {
        self.generation += 1;
        self.status = RefreshStatus::Loading;
        self.list = DisplayList::with_header_rows(Vec::new(), self.header_rows);
        self.layout = ListLayout::default();
        self.scroll = 0;
        self.dirty = true;
        self.generation
    }

    pub(crate) fn is_current(&self, generation: Generation) -> bool {
        generation == self.generation && self.status == RefreshStatus::Loading
    }

    /// The whole sequence is replaced; there is no incremental patching.
    pub(crate) fn apply_loaded(&mut self, items: Vec<DisplayItem>) {
        let heights = items
            .iter()
            .map(|item| match item {
                DisplayItem::Header(_) => self.header_rows,
                DisplayItem::Entry(_) => ESTIMATED_ENTRY_ROWS,
            })
            .collect();
        self.list = DisplayList::with_header_rows(items, self.header_rows);
        self.layout = ListLayout::new(heights);
        self.status = RefreshStatus::Loaded;
        self.clamp_scroll();
        self.dirty = true;
    }

    /// Replaces the estimated row heights. Ignored unless there is one
    /// height per list item.
    pub(crate) fn measure(&mut self, heights: Vec<i32>) {
        if heights.len() != self.list.len() {
            return;
        }
        let layout = ListLayout::new(heights);
        if layout != self.layout {
            self.layout = layout;
            self.clamp_scroll();
            self.dirty = true;
        }
    }

    pub(crate) fn apply_failed(&mut self) {
        self.status = RefreshStatus::Failed;
        self.dirty = true;
    }

    pub(crate) fn scroll_by(&mut self, delta: i32) {
        let next = self
            .layout
            .clamp_scroll(self.scroll.saturating_add(delta), self.viewport_rows);
        if next != self.scroll {
            self.scroll = next;
            self.dirty = true;
        }
    }

    pub(crate) fn resize(&mut self, rows: i32) {
        let rows = rows.max(0);
        if rows != self.viewport_rows {
            self.viewport_rows = rows;
            self.clamp_scroll();
            self.dirty = true;
        }
    }

    /// Keeps the offset within `[0, content height - viewport rows]`.
    fn clamp_scroll(&mut self) {
        self.scroll = self.layout.clamp_scroll(self.scroll, self.viewport_rows);
    }
}

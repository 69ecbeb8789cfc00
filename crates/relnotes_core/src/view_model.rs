use crate::{DisplayList, RefreshStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub status: RefreshStatus,
    pub list: DisplayList,
    /// Rows scrolled past the top, kept within the laid-out content height.
    pub scroll: i32,
    pub viewport_rows: i32,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn is_refreshing(&self) -> bool {
        self.status == RefreshStatus::Loading
    }
}

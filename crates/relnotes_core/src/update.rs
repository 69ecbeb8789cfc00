use crate::{AppState, DisplayItem, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::RefreshRequested => {
            // A request while another is in flight supersedes it; the old
            // generation's result is dropped when it arrives.
            let generation = state.begin_refresh();
            vec![Effect::FetchFeed { generation }]
        }
        Msg::FeedLoaded { generation, items } => {
            if state.is_current(generation) {
                state.apply_loaded(items);
            }
            Vec::new()
        }
        Msg::RefreshFailed { generation } => {
            if state.is_current(generation) {
                state.apply_failed();
            }
            Vec::new()
        }
        Msg::ScrolledBy(delta) => {
            state.scroll_by(delta);
            Vec::new()
        }
        Msg::ViewportResized(rows) => {
            state.resize(rows);
            Vec::new()
        }
        Msg::RowsMeasured(heights) => {
            state.measure(heights);
            Vec::new()
        }
        Msg::EntryActivated(position) => match state.list().get(position) {
            Some(DisplayItem::Entry(entry)) if !entry.link().is_empty() => {
                vec![Effect::OpenLink {
                    url: entry.link().to_string(),
                }]
            }
            _ => Vec::new(),
        },
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

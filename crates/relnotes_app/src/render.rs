//! Draws one terminal frame of the grouped list with its sticky header.

use relnotes_core::{
    AppViewModel, DisplayItem, DisplayList, FeedEntry, ListLayout, StickyHeaderPositioner,
};
use relnotes_engine::content_to_text;

const RULE: char = '─';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<String>,
    /// Scroll offset actually used, after clamping to the content.
    pub scroll: i32,
}

/// Row height of every item at `width`, in list order.
pub fn measure(list: &DisplayList, width: usize) -> Vec<i32> {
    item_blocks(list, width)
        .iter()
        .map(|block| block.len() as i32)
        .collect()
}

pub fn render(
    view: &AppViewModel,
    width: usize,
    positioner: &mut StickyHeaderPositioner,
) -> Frame {
    let blocks = item_blocks(&view.list, width);
    let layout = ListLayout::new(blocks.iter().map(|block| block.len() as i32).collect());
    let rows = view.viewport_rows.max(0);
    let scroll = layout.clamp_scroll(view.scroll, rows);
    let children = layout.visible_children(scroll, rows);

    let mut canvas = vec![String::new(); rows as usize];
    for child in &children {
        if let Some(block) = child.position.and_then(|position| blocks.get(position)) {
            paint(&mut canvas, child.top, block);
        }
    }

    if let Some(overlay) = positioner.compute_overlay(&view.list, &children) {
        let block = header_lines(&overlay.content, overlay.height, width);
        paint(&mut canvas, overlay.top, &block);
    }

    let used = (layout.content_height() - scroll).clamp(0, rows) as usize;
    canvas.truncate(used);
    Frame {
        lines: canvas,
        scroll,
    }
}

fn item_blocks(list: &DisplayList, width: usize) -> Vec<Vec<String>> {
    let header_rows = list.header_rows();
    list.items()
        .iter()
        .map(|item| match item {
            DisplayItem::Header(label) => header_lines(label, header_rows, width),
            DisplayItem::Entry(entry) => entry_lines(entry, width),
        })
        .collect()
}

/// Rows above the viewport and below its bottom are clipped.
fn paint(canvas: &mut [String], top: i32, block: &[String]) {
    for (offset, line) in block.iter().enumerate() {
        let row = top + offset as i32;
        if row < 0 {
            continue;
        }
        if let Some(slot) = canvas.get_mut(row as usize) {
            slot.clone_from(line);
        }
    }
}

fn header_lines(label: &str, rows: i32, width: usize) -> Vec<String> {
    let label: String = label.chars().take(width.max(1)).collect();
    let rule = RULE.to_string().repeat(label.chars().count());
    let mut lines = vec![label, rule];
    lines.resize(rows.max(0) as usize, String::new());
    lines
}

fn entry_lines(entry: &FeedEntry, width: usize) -> Vec<String> {
    let text = content_to_text(entry.content());
    let text = if text.is_empty() {
        "(no details)"
    } else {
        text.as_str()
    };
    let mut lines = wrap(text, width);
    lines.push(String::new());
    lines
}

/// Greedy word wrap. Existing line breaks are kept and words longer than
/// `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_len = 0;
        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            if line_len > 0 && line_len + 1 + word_len > width {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if word_len > width {
                let chars: Vec<char> = word.chars().collect();
                for chunk in chars.chunks(width) {
                    if line_len > 0 {
                        lines.push(std::mem::take(&mut line));
                    }
                    line = chunk.iter().collect();
                    line_len = chunk.len();
                }
                continue;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line.push_str(word);
            line_len += word_len;
        }
        lines.push(line);
    }

    lines
}

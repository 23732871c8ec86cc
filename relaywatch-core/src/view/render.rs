use crate::pipeline::DedupEntry;

/// A redraw whose content height is off from the previous estimate by this much
/// is repeated with the corrected height.
pub const CONTENT_HEIGHT_REDRAW_THRESHOLD: usize = 3;

/// One repaint's worth of content.
#[derive(Debug, Clone)]
pub struct Frame {
    pub title: String,
    /// Post-pipeline entries, newest first, with their collapsed duplicate counts.
    pub entries: Vec<DedupEntry>,
    /// First content line to show, already clamped.
    pub scroll: usize,
    pub width: usize,
    pub height: usize,
    /// Most lines a single entry may take up.
    pub max_lines_per_entry: usize,
}

/// Draws frames onto some character grid.
pub trait Renderer: Send + Sync {
    /// `(width, height)` available to the panel, title row included.
    fn size(&self) -> (usize, usize);

    /// Draws the frame and returns the height of the full content, including lines
    /// scrolled out of view.
    fn draw(&self, frame: &Frame) -> usize;
}

/// ` [3 duplicates hidden]`
pub fn duplicate_label(count: usize) -> String {
    let plural = if count > 1 { "s" } else { "" };
    format!(" [{count} duplicate{plural} hidden]")
}

/// Why a frame drawn with the previous content height estimate needs drawing again,
/// if it does.
pub fn redraw_reason(
    previous: usize,
    current: usize,
    scroll: usize,
    height: usize,
) -> Option<&'static str> {
    let page = height.saturating_sub(1);
    let had_scroll_bar = previous > page;

    if previous.abs_diff(current) >= CONTENT_HEIGHT_REDRAW_THRESHOLD {
        Some("content height estimate was off")
    } else if current > height && scroll + page > current {
        Some("scrolled off the bottom of the page")
    } else if !had_scroll_bar && current > page {
        Some("scroll bar wasn't previously visible")
    } else if had_scroll_bar && current <= page {
        Some("scroll bar shouldn't be visible")
    } else {
        None
    }
}

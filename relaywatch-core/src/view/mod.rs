//! Everything the renderer sees, held behind one lock.

mod error;
mod export;
mod log_view;
mod render;
#[cfg(test)]
mod tests;
mod title;

pub use error::ExportError;
pub use export::{expand_home, write_snapshot};
pub use log_view::{FilterOptions, LogView, ViewSettings};
pub use render::{CONTENT_HEIGHT_REDRAW_THRESHOLD, Frame, Renderer, duplicate_label, redraw_reason};
pub use title::{TitleCache, crop, panel_title};

//! Decides when the view is repainted.
//!
//! Events can arrive far faster than a terminal should be redrawn, so bursts are
//! coalesced into at most one refresh per refresh period. When nothing changes the
//! scheduler sleeps until it is woken, or until local midnight so the day markers
//! still move along.

mod constants;
mod redraw;
mod signal;
#[cfg(test)]
mod tests;

pub use constants::MIN_INTERVAL;
pub use redraw::{RedrawScheduler, RefreshTarget};
pub use signal::{RedrawSignal, SchedulerPhase};

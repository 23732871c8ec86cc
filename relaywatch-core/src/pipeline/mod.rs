//! Per-frame transformation of buffer contents: day markers, duplicate collapsing
//! and regex filtering, in that order.

mod cache;
mod daybreak;
mod dedup;
mod error;
mod filter;
mod run;
#[cfg(test)]
mod tests;

pub use cache::PipelineCache;
pub use daybreak::annotate_daybreaks;
pub use dedup::{CommonMessages, DEDUP_BUDGET, DedupEntry, deduplicate};
pub use error::{DedupError, FilterError};
pub use filter::{FilterEngine, MAX_REGEX_FILTERS};
pub use run::{Pipeline, PipelineOptions, PipelineRun};

use crate::buffer::Snapshot;
use crate::pipeline::{
    CommonMessages, DEDUP_BUDGET, DedupEntry, DedupError, FilterEngine, PipelineCache,
};
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub show_dividers: bool,
    pub deduplicate: bool,
    /// Reuse cached day markers across a day change, used while paused.
    pub ignore_time: bool,
    pub current_day: i64,
}

/// Outcome of one pipeline pass.
#[derive(Debug)]
pub struct PipelineRun {
    pub entries: Vec<DedupEntry>,
    /// Set when deduplication ran out of time; `entries` are then undeduplicated.
    pub dedup_failure: Option<DedupError>,
}

pub struct Pipeline {
    cache: PipelineCache,
    common: CommonMessages,
    budget: Duration,
}

impl Pipeline {
    pub fn new(common: CommonMessages) -> Self {
        Self {
            cache: PipelineCache::new(),
            common,
            budget: DEDUP_BUDGET,
        }
    }

    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Dividers, then deduplication, then the filter. Dividers are skipped while a
    /// filter is active since a filtered listing has gaps a day marker can't explain.
    pub fn run(
        &mut self,
        input: &Snapshot,
        filter: &FilterEngine,
        options: PipelineOptions,
    ) -> PipelineRun {
        let listing = if options.show_dividers && !filter.is_active() {
            self.cache
                .daybreaks(input, options.current_day, options.ignore_time)
        } else {
            input.clone()
        };

        let (collapsed, dedup_failure) = if options.deduplicate {
            match self.cache.duplicates(&listing, &self.common, self.budget) {
                Ok(collapsed) => (collapsed.to_vec(), None),
                Err(err) => (singles(&listing), Some(err)),
            }
        } else {
            (singles(&listing), None)
        };

        let entries = collapsed
            .into_iter()
            .filter(|item| filter.apply(&item.entry))
            .collect();

        PipelineRun {
            entries,
            dedup_failure,
        }
    }
}

fn singles(listing: &Snapshot) -> Vec<DedupEntry> {
    listing.iter().cloned().map(DedupEntry::single).collect()
}

use arc_swap::ArcSwap;
use parking_lot::{Mutex, MutexGuard};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Uppercases categories and folds the `ERROR`/`WARNING` spellings into the
/// daemon's `ERR`/`WARN`.
pub fn normalize_categories<I, S>(requested: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    requested
        .into_iter()
        .map(|category| match category.as_ref().to_ascii_uppercase().as_str() {
            "ERROR" => "ERR".to_string(),
            "WARNING" => "WARN".to_string(),
            other => other.to_string(),
        })
        .collect()
}

/// Categories the router accepts.
///
/// Readers get a consistent set without locking. Writers are serialized.
pub struct Subscriptions {
    current: ArcSwap<BTreeSet<String>>,
    writer: Mutex<()>,
}

impl Subscriptions {
    pub fn new(initial: BTreeSet<String>) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
            writer: Mutex::new(()),
        }
    }

    pub fn load(&self) -> Arc<BTreeSet<String>> {
        self.current.load_full()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.current.load().contains(category)
    }

    /// Takes the writer lock. Readers keep seeing the current set until the
    /// writer stores a new one.
    pub fn writer(&self) -> SubscriptionWriter<'_> {
        SubscriptionWriter {
            current: &self.current,
            _guard: self.writer.lock(),
        }
    }
}

/// Exclusive access to replace the subscription set, possibly in several steps.
pub struct SubscriptionWriter<'a> {
    current: &'a ArcSwap<BTreeSet<String>>,
    _guard: MutexGuard<'a, ()>,
}

impl SubscriptionWriter<'_> {
    pub fn store(&self, next: BTreeSet<String>) -> Arc<BTreeSet<String>> {
        let next = Arc::new(next);
        self.current.store(Arc::clone(&next));
        next
    }
}

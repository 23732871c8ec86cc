use crate::entry::today;
use crate::scheduler::RedrawSignal;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// What the scheduler drives.
pub trait RefreshTarget: Send + Sync + 'static {
    fn is_paused(&self) -> bool;

    /// Repaint from current state.
    fn refresh(&self);

    /// Discard buffered entries and backfill them again.
    fn repopulate(&self);
}

/// Background thread coalescing redraw requests.
pub struct RedrawScheduler {
    signal: Arc<RedrawSignal>,
    handle: Option<JoinHandle<()>>,
}

impl RedrawScheduler {
    pub fn spawn(
        signal: Arc<RedrawSignal>,
        target: Arc<dyn RefreshTarget>,
        period: Duration,
    ) -> io::Result<Self> {
        let thread_signal = Arc::clone(&signal);
        let handle = thread::Builder::new()
            .name("redraw-scheduler".to_string())
            .spawn(move || run(&thread_signal, target.as_ref(), period))?;

        Ok(Self {
            signal,
            handle: Some(handle),
        })
    }

    pub fn signal(&self) -> &Arc<RedrawSignal> {
        &self.signal
    }

    /// Stops the thread and waits for it to exit. Idempotent.
    pub fn halt(&mut self) {
        self.signal.halt();

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("redraw scheduler thread panicked");
            }
        }
    }
}

impl Drop for RedrawScheduler {
    fn drop(&mut self) {
        self.halt();
    }
}

fn run(signal: &RedrawSignal, target: &dyn RefreshTarget, period: Duration) {
    tracing::debug!(period_ms = period.as_millis() as u64, "redraw scheduler started");

    let mut last_refresh: Option<Instant> = None;
    let mut last_day = today();
    let is_paused = || target.is_paused();

    while let Some(work) = signal.wait_for_work(period, last_refresh, last_day, &is_paused) {
        if work.repopulate {
            target.repopulate();
        }

        target.refresh();
        last_refresh = Some(Instant::now());
        last_day = today();
    }

    tracing::debug!("redraw scheduler halted");
}

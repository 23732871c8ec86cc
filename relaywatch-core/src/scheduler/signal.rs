use crate::entry::{today, until_next_local_day};
use crate::scheduler::MIN_INTERVAL;
use chrono::Local;
use parking_lot::{Condvar, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SchedulerPhase {
    /// Nothing to draw, sleeping until woken.
    Idle,
    /// A refresh is due or running.
    Refreshing,
    /// Terminal. Nothing leaves this phase.
    Halted,
}

#[derive(Debug)]
struct SignalState {
    phase: SchedulerPhase,
    // new content since the last refresh
    pending: bool,
    // refresh now, ignoring the rate limit
    forced: bool,
    // repopulate before the next refresh
    reconnect: bool,
}

/// What the scheduler thread should do after waking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Work {
    pub repopulate: bool,
}

/// Wake/sleep state shared between event producers and the scheduler thread.
///
/// Lock order: this lock may be held while taking the view lock (to ask whether
/// the view is paused), never the other way around.
pub struct RedrawSignal {
    state: Mutex<SignalState>,
    wake: Condvar,
}

impl Default for RedrawSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl RedrawSignal {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SignalState {
                phase: SchedulerPhase::Idle,
                pending: false,
                forced: false,
                reconnect: false,
            }),
            wake: Condvar::new(),
        }
    }

    pub fn phase(&self) -> SchedulerPhase {
        self.state.lock().phase
    }

    pub fn is_halted(&self) -> bool {
        self.phase() == SchedulerPhase::Halted
    }

    /// New content is available. Subject to the rate limit.
    pub fn notify(&self) {
        self.update(|state| state.pending = true);
    }

    /// Repaint as soon as possible.
    pub fn request_refresh(&self) {
        self.update(|state| state.forced = true);
    }

    /// The daemon was (re)connected: backfill from scratch, then repaint.
    pub fn reconnect(&self) {
        self.update(|state| state.reconnect = true);
    }

    pub fn halt(&self) {
        let mut state = self.state.lock();
        state.phase = SchedulerPhase::Halted;
        self.wake.notify_all();
    }

    fn update(&self, mark: impl FnOnce(&mut SignalState)) {
        let mut state = self.state.lock();
        if state.phase == SchedulerPhase::Halted {
            return;
        }

        mark(&mut state);
        state.phase = SchedulerPhase::Refreshing;
        self.wake.notify_all();
    }

    /// Blocks until a refresh is due. Returns `None` once halted.
    pub(crate) fn wait_for_work(
        &self,
        period: Duration,
        last_refresh: Option<Instant>,
        last_day: i64,
        is_paused: &dyn Fn() -> bool,
    ) -> Option<Work> {
        let mut state = self.state.lock();

        loop {
            if state.phase == SchedulerPhase::Halted {
                return None;
            }

            if state.forced || state.reconnect {
                return Some(begin_refresh(&mut state));
            }

            let unchanged = !state.pending && today() == last_day;
            if unchanged || is_paused() {
                state.phase = SchedulerPhase::Idle;
                let until_midnight = until_next_local_day(Local::now()).max(MIN_INTERVAL);
                self.wake.wait_for(&mut state, until_midnight);
                continue;
            }

            let elapsed = last_refresh.map_or(Duration::MAX, |at| at.elapsed());
            if elapsed >= period {
                return Some(begin_refresh(&mut state));
            }

            state.phase = SchedulerPhase::Refreshing;
            let delay = (period - elapsed).max(MIN_INTERVAL);
            self.wake.wait_for(&mut state, delay);
        }
    }
}

fn begin_refresh(state: &mut SignalState) -> Work {
    state.phase = SchedulerPhase::Refreshing;
    state.pending = false;
    state.forced = false;

    Work {
        repopulate: std::mem::take(&mut state.reconnect),
    }
}

use crate::scheduler::{RedrawScheduler, RedrawSignal, RefreshTarget, SchedulerPhase};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::sleep;
use std::time::Duration;

#[derive(Default)]
struct CountingTarget {
    paused: AtomicBool,
    refreshes: AtomicUsize,
    repopulates: AtomicUsize,
}

impl CountingTarget {
    fn refreshes(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }

    fn repopulates(&self) -> usize {
        self.repopulates.load(Ordering::SeqCst)
    }
}

impl RefreshTarget for CountingTarget {
    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    fn refresh(&self) {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
    }

    fn repopulate(&self) {
        self.repopulates.fetch_add(1, Ordering::SeqCst);
    }
}

fn start(period: Duration) -> (RedrawScheduler, Arc<RedrawSignal>, Arc<CountingTarget>) {
    let signal = Arc::new(RedrawSignal::new());
    let target = Arc::new(CountingTarget::default());
    let refresh_target: Arc<dyn RefreshTarget> = target.clone();
    let scheduler = RedrawScheduler::spawn(Arc::clone(&signal), refresh_target, period).unwrap();
    (scheduler, signal, target)
}

#[test]
fn burst_is_coalesced_into_one_refresh_per_window() {
    // Arrange
    let (mut scheduler, signal, target) = start(Duration::from_millis(300));

    // Act
    signal.notify();
    sleep(Duration::from_millis(20));
    for _ in 0..100 {
        signal.notify();
    }
    sleep(Duration::from_millis(80));
    let within_window = target.refreshes();
    sleep(Duration::from_millis(450));
    let after_window = target.refreshes();
    sleep(Duration::from_millis(400));
    let settled = target.refreshes();
    scheduler.halt();

    // Assert
    assert_eq!(within_window, 1);
    assert_eq!(after_window, 2);
    assert_eq!(settled, 2);
}

#[test]
fn nothing_happens_without_events() {
    let (mut scheduler, _signal, target) = start(Duration::from_millis(50));

    sleep(Duration::from_millis(150));
    scheduler.halt();

    assert_eq!(target.refreshes(), 0);
}

#[test]
fn reconnect_repopulates_and_ignores_rate_limit() {
    // Arrange
    let (mut scheduler, signal, target) = start(Duration::from_secs(5));
    signal.notify();
    sleep(Duration::from_millis(100));

    // Act
    signal.reconnect();
    sleep(Duration::from_millis(100));
    scheduler.halt();

    // Assert
    assert_eq!(target.repopulates(), 1);
    assert_eq!(target.refreshes(), 2);
}

#[test]
fn paused_view_only_refreshes_on_request() {
    let (mut scheduler, signal, target) = start(Duration::from_millis(50));
    target.paused.store(true, Ordering::SeqCst);

    signal.notify();
    sleep(Duration::from_millis(150));
    let while_paused = target.refreshes();
    signal.request_refresh();
    sleep(Duration::from_millis(100));
    scheduler.halt();

    assert_eq!(while_paused, 0);
    assert_eq!(target.refreshes(), 1);
}

#[test]
fn halt_stops_the_thread() {
    let (mut scheduler, signal, target) = start(Duration::from_millis(50));

    scheduler.halt();
    signal.notify();
    sleep(Duration::from_millis(100));

    assert_eq!(signal.phase(), SchedulerPhase::Halted);
    assert_eq!(target.refreshes(), 0);
    scheduler.halt();
}

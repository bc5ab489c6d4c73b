//! Background time sources: the per-second tick clock and one-shot timers.
//!
//! Both run on their own threads and talk to the event loop only through
//! an mpsc channel. Cancellation is cooperative: a flag is checked after
//! each sleep, so a stop never interrupts a sleep in progress. A wake that
//! races a stop may still deliver one event; consumers discard it by
//! comparing epochs (clock) or tokens (one-shot).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Tick period used by the application.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Identity of one clock run. Incremented by every `start`.
pub type Epoch = u64;

// ============================================================================
// TICK CLOCK
// ============================================================================

/// Emits one event per period while started.
pub struct Clock<T> {
    tx: Sender<T>,
    period: Duration,
    make_tick: fn(Epoch) -> T,
    epoch: Epoch,
    stop_flag: Option<Arc<AtomicBool>>,
}

impl<T: Send + 'static> Clock<T> {
    /// `make_tick` wraps an epoch into whatever the channel carries.
    pub fn new(tx: Sender<T>, period: Duration, make_tick: fn(Epoch) -> T) -> Self {
        Clock {
            tx,
            period,
            make_tick,
            epoch: 0,
            stop_flag: None,
        }
    }

    /// Start a fresh run. Any previous run is stopped first.
    pub fn start(&mut self) -> Epoch {
        self.stop();
        self.epoch += 1;
        let flag = Arc::new(AtomicBool::new(false));
        self.stop_flag = Some(Arc::clone(&flag));
        spawn_ticker(self.tx.clone(), self.period, self.epoch, self.make_tick, flag);
        tracing::debug!(epoch = self.epoch, "clock started");
        self.epoch
    }

    /// Request the current run to end. Idempotent.
    pub fn stop(&mut self) {
        if let Some(flag) = self.stop_flag.take() {
            flag.store(true, Ordering::SeqCst);
            tracing::debug!(epoch = self.epoch, "clock stopped");
        }
    }

    /// True if `epoch` belongs to the run in progress.
    pub fn is_current(&self, epoch: Epoch) -> bool {
        self.stop_flag.is_some() && epoch == self.epoch
    }

    pub fn is_active(&self) -> bool {
        self.stop_flag.is_some()
    }
}

impl<T> Drop for Clock<T> {
    fn drop(&mut self) {
        if let Some(flag) = self.stop_flag.take() {
            flag.store(true, Ordering::SeqCst);
        }
    }
}

fn spawn_ticker<T: Send + 'static>(
    tx: Sender<T>,
    period: Duration,
    epoch: Epoch,
    make_tick: fn(Epoch) -> T,
    stop: Arc<AtomicBool>,
) {
    thread::spawn(move || {
        loop {
            thread::sleep(period);
            if stop.load(Ordering::SeqCst) {
                break;
            }
            if tx.send(make_tick(epoch)).is_err() {
                break; // receiver dropped, app is shutting down
            }
        }
    });
}

// ============================================================================
// ONE-SHOT TIMER
// ============================================================================

/// Handle to a scheduled one-shot event. Dropping it does not cancel.
#[derive(Debug)]
pub struct OneShot {
    cancelled: Arc<AtomicBool>,
}

impl OneShot {
    /// Send `event` on `tx` once `delay` has elapsed, unless cancelled.
    pub fn schedule<T: Send + 'static>(delay: Duration, tx: Sender<T>, event: T) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        thread::spawn(move || {
            thread::sleep(delay);
            if !flag.load(Ordering::SeqCst) {
                let _ = tx.send(event);
            }
        });
        OneShot { cancelled }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    const FAST: Duration = Duration::from_millis(20);

    #[test]
    fn clock_delivers_ticks_tagged_with_epoch() {
        let (tx, rx) = mpsc::channel::<Epoch>();
        let mut clock = Clock::new(tx, FAST, |e| e);
        let epoch = clock.start();
        for _ in 0..3 {
            let got = rx.recv_timeout(Duration::from_secs(2)).expect("tick");
            assert_eq!(got, epoch);
        }
        clock.stop();
    }

    #[test]
    fn stopped_clock_goes_quiet() {
        let (tx, rx) = mpsc::channel::<Epoch>();
        let mut clock = Clock::new(tx, FAST, |e| e);
        clock.start();
        rx.recv_timeout(Duration::from_secs(2)).expect("first tick");
        clock.stop();

        // At most one wake can race the stop; let it land, then drain.
        thread::sleep(FAST * 3);
        while rx.try_recv().is_ok() {}
        thread::sleep(FAST * 3);
        assert!(rx.try_recv().is_err(), "no ticks after stop");
    }

    #[test]
    fn restart_opens_a_new_epoch() {
        let (tx, _rx) = mpsc::channel::<Epoch>();
        let mut clock = Clock::new(tx, FAST, |e| e);
        let first = clock.start();
        let second = clock.start();
        assert_ne!(first, second);
        assert!(!clock.is_current(first));
        assert!(clock.is_current(second));
        clock.stop();
        assert!(!clock.is_current(second));
        assert!(!clock.is_active());
    }

    #[test]
    fn one_shot_fires_once() {
        let (tx, rx) = mpsc::channel::<&'static str>();
        let _handle = OneShot::schedule(FAST, tx, "revert");
        assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap(), "revert");
        assert!(rx.recv_timeout(FAST * 3).is_err());
    }

    #[test]
    fn cancelled_one_shot_never_fires() {
        let (tx, rx) = mpsc::channel::<&'static str>();
        let handle = OneShot::schedule(Duration::from_millis(100), tx, "revert");
        handle.cancel();
        assert!(rx.recv_timeout(Duration::from_millis(300)).is_err());
    }
}

//! Search time management.
//!
//! A soft budget: the searcher polls [`SearchClock::check_time`] at
//! cooperative points, so the budget can be overshot by at most a few
//! nodes' worth of work. Once the stop flag is set it stays set until the
//! next [`SearchClock::start`], and every search frame short-circuits.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Wall-clock budget plus a shared cancellation flag.
///
/// The flag is cheap to read (relaxed atomic load), so frames may observe
/// it on entry and after every child without measurable overhead.
#[derive(Debug, Clone)]
pub struct SearchClock {
    stopped: Arc<AtomicBool>,
    start: Instant,
    limit: Option<Duration>,
}

impl SearchClock {
    pub fn new(limit: Option<Duration>) -> Self {
        SearchClock {
            stopped: Arc::new(AtomicBool::new(false)),
            start: Instant::now(),
            limit,
        }
    }

    /// Reset the clock and clear the stop flag. Call when a search begins.
    pub fn start(&mut self) {
        self.start = Instant::now();
        self.stopped.store(false, Ordering::SeqCst);
    }

    /// Force the search to unwind at its next cancellation point.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Compare elapsed time against the budget, latching the stop flag on
    /// expiry. Returns true when the search should stop.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }
        if let Some(limit) = self.limit
            && self.start.elapsed() >= limit
        {
            self.stop();
            return true;
        }
        false
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

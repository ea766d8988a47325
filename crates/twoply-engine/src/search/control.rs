//! Search control: stop flag and hard time limit.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;
use twoply_core::{Deadline, DeadlineExpired};

/// Controls when a search should stop.
///
/// Polled by the search before every move it explores. Supports three modes:
/// - **Infinite**: no time pressure, only responds to the external stop flag
/// - **Timed**: clock starts immediately
/// - **Deferred**: a time limit exists but the clock only starts on
///   [`activate()`](SearchControl::activate), so one control can be re-armed
///   turn after turn
pub struct SearchControl {
    stopped: Arc<AtomicBool>,
    expired: AtomicBool,
    clock_active: AtomicBool,
    start: Mutex<Option<Instant>>,
    hard_limit: Option<Duration>,
}

impl SearchControl {
    /// Create control without a time limit.
    pub fn new_infinite(stopped: Arc<AtomicBool>) -> Self {
        Self {
            stopped,
            expired: AtomicBool::new(false),
            clock_active: AtomicBool::new(false),
            start: Mutex::new(None),
            hard_limit: None,
        }
    }

    /// Create control with a time limit; clock starts immediately.
    pub fn new_timed(stopped: Arc<AtomicBool>, hard: Duration) -> Self {
        Self {
            stopped,
            expired: AtomicBool::new(false),
            clock_active: AtomicBool::new(true),
            start: Mutex::new(Some(Instant::now())),
            hard_limit: Some(hard),
        }
    }

    /// Create control with a time limit whose clock is not running yet.
    ///
    /// Call [`activate()`](Self::activate) at the start of each search.
    pub fn new_deferred(stopped: Arc<AtomicBool>, hard: Duration) -> Self {
        Self {
            stopped,
            expired: AtomicBool::new(false),
            clock_active: AtomicBool::new(false),
            start: Mutex::new(None),
            hard_limit: Some(hard),
        }
    }

    /// (Re)start the clock.
    ///
    /// Records [`Instant::now()`] as the start time, clears a previous time
    /// expiry and enables time checks. The external stop flag is left alone.
    pub fn activate(&self) {
        *self.start.lock().unwrap_or_else(PoisonError::into_inner) = Some(Instant::now());
        self.expired.store(false, Ordering::Release);
        self.clock_active.store(true, Ordering::Release);
    }

    /// Check whether the search should abort immediately.
    ///
    /// Returns `true` if:
    /// - The external stop flag was set, OR
    /// - The clock is active and the hard limit has been exceeded
    ///
    /// Once the hard limit fires, subsequent calls return `true` without
    /// re-reading the clock until the next [`activate()`](Self::activate).
    pub fn should_stop(&self) -> bool {
        if self.stopped.load(Ordering::Relaxed) || self.expired.load(Ordering::Relaxed) {
            return true;
        }

        if !self.clock_active.load(Ordering::Acquire) {
            return false;
        }

        if let Some(hard) = self.hard_limit
            && self.elapsed() >= hard
        {
            debug!(elapsed_ms = self.elapsed().as_millis() as u64, "hard time limit reached");
            self.expired.store(true, Ordering::Release);
            return true;
        }

        false
    }

    /// Elapsed time since the clock was activated.
    ///
    /// Returns [`Duration::ZERO`] if the clock has not been activated.
    pub fn elapsed(&self) -> Duration {
        self.start
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .map_or(Duration::ZERO, |s| s.elapsed())
    }

    /// The configured hard limit, if any.
    pub fn hard_limit(&self) -> Option<Duration> {
        self.hard_limit
    }

    /// Reference to the shared stop flag.
    pub fn stop_flag(&self) -> &Arc<AtomicBool> {
        &self.stopped
    }
}

impl Deadline for SearchControl {
    fn check(&self) -> Result<(), DeadlineExpired> {
        if self.should_stop() {
            Err(DeadlineExpired)
        } else {
            Ok(())
        }
    }
}

impl std::fmt::Debug for SearchControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchControl")
            .field("stopped", &self.stopped.load(Ordering::Relaxed))
            .field("hard_limit", &self.hard_limit)
            .field("elapsed", &self.elapsed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::thread;

    #[test]
    fn infinite_runs_until_stopped() {
        let stopped = Arc::new(AtomicBool::new(false));
        let control = SearchControl::new_infinite(Arc::clone(&stopped));
        assert!(control.check().is_ok());
        stopped.store(true, Ordering::Release);
        assert_eq!(control.check(), Err(DeadlineExpired));
    }

    #[test]
    fn zero_limit_expires_immediately() {
        let control = SearchControl::new_timed(Arc::new(AtomicBool::new(false)), Duration::ZERO);
        assert!(control.should_stop());
        assert!(!control.stop_flag().load(Ordering::Relaxed));
    }

    #[test]
    fn timed_expires_after_limit() {
        let control = SearchControl::new_timed(
            Arc::new(AtomicBool::new(false)),
            Duration::from_millis(20),
        );
        assert!(!control.should_stop());
        thread::sleep(Duration::from_millis(40));
        assert!(control.should_stop());
    }

    #[test]
    fn deferred_clock_waits_for_activation() {
        let control = SearchControl::new_deferred(Arc::new(AtomicBool::new(false)), Duration::ZERO);
        assert_eq!(control.elapsed(), Duration::ZERO);
        assert!(!control.should_stop());
        control.activate();
        assert!(control.should_stop());
    }

    #[test]
    fn activate_rearms_after_expiry() {
        let control = SearchControl::new_deferred(
            Arc::new(AtomicBool::new(false)),
            Duration::from_millis(20),
        );
        control.activate();
        thread::sleep(Duration::from_millis(40));
        assert!(control.should_stop());
        control.activate();
        assert!(!control.should_stop());
    }

    #[test]
    fn activate_keeps_external_stop() {
        let control = SearchControl::new_deferred(
            Arc::new(AtomicBool::new(true)),
            Duration::from_secs(60),
        );
        control.activate();
        assert!(control.should_stop());
    }
}

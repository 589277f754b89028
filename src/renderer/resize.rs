//! Debounced container resize handling
//!
//! Continuous viewport resizes fire many width signals; only the one that
//! survives the delay window is applied. The debouncer is deterministic -
//! callers supply the clock - so behavior is testable without timers.

use std::time::{Duration, Instant};

/// Collapses a burst of width signals into the final settled value
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<Pending>,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    deadline: Instant,
    width: f32,
}

impl Debouncer {
    /// Create a debouncer with the given settle delay
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The configured settle delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a width signal at `now`, restarting the settle window
    pub fn signal(&mut self, now: Instant, width: f32) {
        self.pending = Some(Pending {
            deadline: now + self.delay,
            width,
        });
    }

    /// Take the settled width if the window elapsed without a newer signal
    pub fn settled(&mut self, now: Instant) -> Option<f32> {
        match self.pending {
            Some(pending) if now >= pending.deadline => {
                self.pending = None;
                Some(pending.width)
            }
            _ => None,
        }
    }

    /// True while a signal is waiting out its settle window
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_settles_after_delay() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        let start = Instant::now();
        debouncer.signal(start, 1024.0);

        assert_eq!(debouncer.settled(start + Duration::from_millis(299)), None);
        assert_eq!(
            debouncer.settled(start + Duration::from_millis(300)),
            Some(1024.0)
        );
        // Consumed.
        assert_eq!(debouncer.settled(start + Duration::from_millis(301)), None);
    }

    #[test]
    fn test_newer_signal_restarts_the_window() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        let start = Instant::now();
        debouncer.signal(start, 800.0);
        debouncer.signal(start + Duration::from_millis(200), 1200.0);

        assert_eq!(debouncer.settled(start + Duration::from_millis(350)), None);
        assert_eq!(
            debouncer.settled(start + Duration::from_millis(500)),
            Some(1200.0)
        );
    }

    #[test]
    fn test_idle_debouncer_yields_nothing() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.settled(Instant::now()), None);
    }
}

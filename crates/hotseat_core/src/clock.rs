//! Per-turn countdown.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A single countdown measured in whole seconds.
///
/// The clock knows nothing about sides or positions. It only counts while
/// running and never goes below zero; interpreting zero is the caller's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClock {
    remaining_seconds: u32,
    running: bool,
}

impl SessionClock {
    /// Creates a stopped clock holding `seconds`.
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining_seconds: seconds,
            running: false,
        }
    }

    /// Seconds left on the clock.
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Returns true while counting down.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns true once the countdown reached zero.
    pub fn is_expired(&self) -> bool {
        self.remaining_seconds == 0
    }

    /// Starts counting. Returns false if the clock was already running.
    #[instrument(skip(self), fields(remaining = self.remaining_seconds))]
    pub fn start(&mut self) -> bool {
        if self.running {
            debug!("Clock already running, start ignored");
            return false;
        }
        self.running = true;
        true
    }

    /// Stops counting, keeping the remaining time.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Sets the remaining time without touching the running flag.
    pub fn reset(&mut self, seconds: u32) {
        self.remaining_seconds = seconds;
    }

    /// Counts one second down if running, returning the remaining time.
    pub fn tick(&mut self) -> u32 {
        if self.running {
            self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        }
        self.remaining_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clock_is_stopped() {
        let clock = SessionClock::new(30);
        assert_eq!(clock.remaining_seconds(), 30);
        assert!(!clock.is_running());
    }

    #[test]
    fn test_stopped_clock_does_not_count() {
        let mut clock = SessionClock::new(30);
        assert_eq!(clock.tick(), 30);
    }

    #[test]
    fn test_running_clock_counts_down() {
        let mut clock = SessionClock::new(3);
        clock.start();
        assert_eq!(clock.tick(), 2);
        assert_eq!(clock.tick(), 1);
        assert_eq!(clock.tick(), 0);
        assert!(clock.is_expired());
    }

    #[test]
    fn test_tick_saturates_at_zero() {
        let mut clock = SessionClock::new(0);
        clock.start();
        assert_eq!(clock.tick(), 0);
    }

    #[test]
    fn test_restart_while_running_is_noop() {
        let mut clock = SessionClock::new(10);
        assert!(clock.start());
        assert!(!clock.start());

        // A duplicate start must not double the countdown speed
        assert_eq!(clock.tick(), 9);
    }

    #[test]
    fn test_stop_preserves_remaining() {
        let mut clock = SessionClock::new(10);
        clock.start();
        clock.tick();
        clock.stop();
        clock.tick();
        assert_eq!(clock.remaining_seconds(), 9);

        clock.start();
        assert_eq!(clock.tick(), 8);
    }

    #[test]
    fn test_reset_keeps_running_flag() {
        let mut clock = SessionClock::new(5);
        clock.start();
        clock.reset(30);
        assert!(clock.is_running());
        assert_eq!(clock.remaining_seconds(), 30);

        clock.stop();
        clock.reset(12);
        assert!(!clock.is_running());
        assert_eq!(clock.remaining_seconds(), 12);
    }
}

//! Time sources consumed by the animation engine.
//!
//! The engine reads two clocks: a wall clock, in which start timestamps are expressed, and a
//! monotonic clock, which the host's frame callbacks report. Each engine reconciles them once, at
//! construction, by capturing a fixed time origin.

use std::cell::Cell;
use std::fmt::Debug;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Provides the current time, in milliseconds, on both a wall clock and a monotonic clock.
pub trait Clock: Debug {
    /// Milliseconds since the Unix epoch.
    fn wall_now(&self) -> f64;

    /// Milliseconds since an arbitrary, clock-specific origin. Never decreases.
    fn monotonic_now(&self) -> f64;
}

/// Reads the operating system's clocks.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn wall_now(&self) -> f64 {
        // A system clock set before 1970 reads as the epoch itself.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0.0, |since_epoch| since_epoch.as_secs_f64() * 1000.0)
    }

    fn monotonic_now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Deterministic clock that only moves when told to.
///
/// Both readings advance together; the wall clock is offset from the monotonic clock by a fixed
/// amount, given at construction.
///
/// # Example
///
/// ```
/// use flipbook_core::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::new(1_000.0);
/// clock.advance(16.0);
///
/// assert_eq!(clock.monotonic_now(), 16.0);
/// assert_eq!(clock.wall_now(), 1_016.0);
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    wall_offset: f64,
    monotonic: Cell<f64>,
}

impl ManualClock {
    /// Creates a clock whose monotonic reading starts at `0` and whose wall reading starts at
    /// `wall_offset`.
    pub fn new(wall_offset: f64) -> Self {
        Self {
            wall_offset,
            monotonic: Cell::new(0.0),
        }
    }

    /// Moves both readings forward by `ms`. Negative values are ignored.
    pub fn advance(&self, ms: f64) {
        if ms > 0.0 {
            self.monotonic.set(self.monotonic.get() + ms);
        }
    }

    /// Sets the monotonic reading to `monotonic_ms`, unless that would move it backward.
    pub fn set(&self, monotonic_ms: f64) {
        if monotonic_ms > self.monotonic.get() {
            self.monotonic.set(monotonic_ms);
        }
    }
}

impl Clock for ManualClock {
    fn wall_now(&self) -> f64 {
        self.wall_offset + self.monotonic.get()
    }

    fn monotonic_now(&self) -> f64 {
        self.monotonic.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.monotonic_now();
        let second = clock.monotonic_now();

        assert!(first >= 0.0);
        assert!(second >= first);
        assert!(clock.wall_now() > 0.0);
    }

    #[test]
    fn manual_clock_never_moves_backward() {
        let clock = ManualClock::new(500.0);
        clock.set(100.0);
        clock.set(50.0);
        clock.advance(-10.0);

        assert_eq!(clock.monotonic_now(), 100.0);
        assert_eq!(clock.wall_now(), 600.0);
    }
}

//! Frame clocks.
//!
//! The render loop reads elapsed time through the [`Clock`] trait so the same
//! loop can be driven by the wall clock ([`Timer`]) or stepped
//! deterministically ([`ManualClock`]) in headless runs and tests.

use std::time::{Duration, Instant};

/// A source of monotonically increasing elapsed time, starting at zero.
pub trait Clock {
    /// Seconds elapsed since the clock started.
    fn elapsed_secs(&self) -> f32;
}

/// High-resolution wall-clock timer.
#[derive(Debug)]
pub struct Timer {
    start: Instant,
    last_tick: Instant,
}

impl Timer {
    /// Create a new timer, starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
        }
    }

    /// Get the total elapsed time since the timer was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Get the time elapsed since the last call to `tick()`.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let delta = now - self.last_tick;
        self.last_tick = now;
        delta
    }

    /// Get the delta time in seconds since the last tick.
    pub fn delta_secs(&mut self) -> f32 {
        self.tick().as_secs_f32()
    }

    /// Reset the timer to the current time.
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.start = now;
        self.last_tick = now;
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for Timer {
    fn elapsed_secs(&self) -> f32 {
        self.elapsed().as_secs_f32()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    elapsed: f32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `delta` seconds. Negative deltas are ignored so time never
    /// runs backwards.
    pub fn advance(&mut self, delta: f32) {
        if delta > 0.0 {
            self.elapsed += delta;
        }
    }

    /// Jump to an absolute time, clamped so it never decreases.
    pub fn set(&mut self, elapsed: f32) {
        self.elapsed = self.elapsed.max(elapsed);
    }
}

impl Clock for ManualClock {
    fn elapsed_secs(&self) -> f32 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_starts_at_zero() {
        let clock = ManualClock::new();
        assert_eq!(clock.elapsed_secs(), 0.0);
    }

    #[test]
    fn test_manual_clock_is_monotonic() {
        let mut clock = ManualClock::new();
        clock.advance(0.5);
        clock.advance(-1.0);
        assert_eq!(clock.elapsed_secs(), 0.5);

        clock.set(0.25);
        assert_eq!(clock.elapsed_secs(), 0.5);

        clock.set(2.0);
        assert_eq!(clock.elapsed_secs(), 2.0);
    }

    #[test]
    fn test_timer_elapsed_grows() {
        let timer = Timer::new();
        let first = timer.elapsed_secs();
        std::thread::sleep(Duration::from_millis(2));
        assert!(timer.elapsed_secs() > first);
    }
}

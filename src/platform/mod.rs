//! Platform abstraction layer
//!
//! Handles:
//! - Time (monotonic millisecond clock)
//! - Frame pacing (fixed tick rate)
//! - Keyboard input snapshots and events

pub mod input;

use std::cell::Cell;
use std::time::{Duration, Instant};

pub use input::{FrameInput, InputEvent, InputQueue, Key, KeySet};

/// Monotonic millisecond counter
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock measured from construction
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Clock that only moves when told to (tests, headless runs)
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Fixed-rate tick accumulator.
///
/// Simulation speeds are expressed per tick, so the game runs one tick per
/// 1/fps second of wall time no matter how often frames are presented.
#[derive(Debug, Clone)]
pub struct FramePacer {
    /// Tick length in microseconds
    tick_us: u64,
    accumulator_us: u64,
    max_steps: u32,
    last_ms: Option<u64>,
}

impl FramePacer {
    pub fn new(fps: u32, max_steps: u32) -> Self {
        Self {
            tick_us: 1_000_000 / u64::from(fps.max(1)),
            accumulator_us: 0,
            max_steps: max_steps.max(1),
            last_ms: None,
        }
    }

    /// Feed the current clock time. Returns how many ticks to run now.
    ///
    /// The first call primes the pacer and runs a single tick. Backlog beyond
    /// `max_steps` is dropped so a stall cannot snowball.
    pub fn accumulate(&mut self, now_ms: u64) -> u32 {
        let Some(last) = self.last_ms.replace(now_ms) else {
            return 1;
        };
        self.accumulator_us += now_ms.saturating_sub(last) * 1000;
        let cap = self.tick_us * u64::from(self.max_steps);
        self.accumulator_us = self.accumulator_us.min(cap);
        let steps = self.accumulator_us / self.tick_us;
        self.accumulator_us -= steps * self.tick_us;
        steps as u32
    }

    /// Time left until the next tick is due
    pub fn until_next_tick(&self) -> Duration {
        Duration::from_micros(self.tick_us.saturating_sub(self.accumulator_us))
    }
}

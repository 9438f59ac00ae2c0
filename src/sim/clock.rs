//! Simulated session clock
//!
//! Advances by a fixed step per tick, never by wall-clock time, so spawn
//! cadence is reproducible for a given number of ticks.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    step_ms: u64,
    ticks: u64,
    elapsed_ms: u64,
}

impl Clock {
    pub fn new(step_ms: u64) -> Self {
        Self {
            step_ms,
            ticks: 0,
            elapsed_ms: 0,
        }
    }

    pub fn advance(&mut self) {
        self.ticks += 1;
        self.elapsed_ms += self.step_ms;
    }

    pub fn reset(&mut self) {
        self.ticks = 0;
        self.elapsed_ms = 0;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn step_ms(&self) -> u64 {
        self.step_ms
    }

    /// Whole seconds survived (floored)
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_ms / 1000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_step() {
        let mut clock = Clock::new(16);
        for _ in 0..63 {
            clock.advance();
        }
        assert_eq!(clock.ticks(), 63);
        assert_eq!(clock.elapsed_ms(), 1008);
        assert_eq!(clock.elapsed_secs(), 1);

        clock.reset();
        assert_eq!(clock.elapsed_ms(), 0);
        assert_eq!(clock.step_ms(), 16);
    }
}

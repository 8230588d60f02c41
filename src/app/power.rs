//! Dial → power percentage with a deadband.
//!
//! The dial is an unregulated, hand-turned encoder, so its count jitters.
//! Only a change of more than [`POWER_DEADBAND_PERCENT`] points from the
//! last value actually sent is reported.

use crate::config::{
    COUNTS_PER_PERCENT, INITIAL_POWER_PERCENT, MAX_POWER_PERCENT, POWER_CENTRE_PERCENT,
    POWER_DEADBAND_PERCENT,
};

/// Map a raw dial count to a power percentage in `0..=200`.
///
/// `clamp(counts / 2 + 100, 0, 200)`, dividing toward zero.
pub fn power_percent(counts: i32) -> u8 {
    (counts / COUNTS_PER_PERCENT)
        .saturating_add(POWER_CENTRE_PERCENT)
        .clamp(0, MAX_POWER_PERCENT as i32) as u8
}

/// Remembers the last power value sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerTracker {
    last_sent: u8,
}

impl Default for PowerTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerTracker {
    pub const fn new() -> Self {
        Self {
            last_sent: INITIAL_POWER_PERCENT,
        }
    }

    /// Feed a raw dial count. Returns the new percentage when it should be
    /// sent, and records it as the last value sent.
    pub fn update(&mut self, counts: i32) -> Option<u8> {
        let percent = power_percent(counts);
        if percent.abs_diff(self.last_sent) > POWER_DEADBAND_PERCENT {
            self.last_sent = percent;
            Some(percent)
        } else {
            None
        }
    }

    /// Last power value sent (initially 100).
    pub fn last_sent(&self) -> u8 {
        self.last_sent
    }
}

//! Hardware adapter — bridges the dial and buzzer drivers to port traits.
//!
//! On non-espidf targets the underlying drivers use cfg-gated simulation
//! stubs, so these impls are exercised by host tests too.

use crate::app::ports::{CounterPort, FeedbackPort};
use crate::drivers::buzzer::Buzzer;
use crate::drivers::dial::DialEncoder;

// ── CounterPort implementation ────────────────────────────────

impl CounterPort for DialEncoder {
    fn counts(&mut self) -> i32 {
        self.read()
    }
}

// ── FeedbackPort implementation ───────────────────────────────

impl FeedbackPort for Buzzer {
    fn tone(&mut self, freq_hz: u32, duration_ms: u32) {
        self.play(freq_hz, duration_ms);
    }
}

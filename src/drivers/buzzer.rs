//! Piezo buzzer driver.
//!
//! Single LEDC PWM channel at 50% duty; the tone frequency is the PWM
//! frequency.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the LEDC channel via hw_init and blocks for the tone
//! duration. On host/test: records the tone in memory and returns at once.

use log::debug;

use crate::drivers::hw_init;

pub struct Buzzer {
    last_tone: Option<(u32, u32)>,
    tones_played: u32,
}

impl Default for Buzzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buzzer {
    pub fn new() -> Self {
        Self {
            last_tone: None,
            tones_played: 0,
        }
    }

    /// Sound `freq_hz` for `duration_ms`, then silence. Blocks.
    /// A zero frequency or duration is a no-op.
    pub fn play(&mut self, freq_hz: u32, duration_ms: u32) {
        if freq_hz == 0 || duration_ms == 0 {
            return;
        }
        debug!("Buzzer: {} Hz for {} ms", freq_hz, duration_ms);
        hw_init::buzzer_start(freq_hz);
        Self::hold(duration_ms);
        hw_init::buzzer_stop();

        self.last_tone = Some((freq_hz, duration_ms));
        self.tones_played = self.tones_played.saturating_add(1);
    }

    #[cfg(all(target_os = "espidf", feature = "espidf"))]
    fn hold(duration_ms: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(duration_ms);
    }

    #[cfg(not(all(target_os = "espidf", feature = "espidf")))]
    fn hold(_duration_ms: u32) {}

    /// `(freq_hz, duration_ms)` of the last tone played.
    pub fn last_tone(&self) -> Option<(u32, u32)> {
        self.last_tone
    }

    pub fn tones_played(&self) -> u32 {
        self.tones_played
    }
}

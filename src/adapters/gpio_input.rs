//! GPIO input adapter.
//!
//! Wraps any `embedded_hal::digital::InputPin` (an `esp-idf-hal`
//! `PinDriver` on the device, a fake pin in tests) as an [`InputSource`].
//! The remote's buttons are wired to ground with the internal pull-up
//! enabled, so they are active-low.

use log::warn;

use embedded_hal::digital::InputPin;

use crate::app::ports::InputSource;

pub struct PinInput<P> {
    pin: P,
    active_low: bool,
    read_errors: u32,
}

impl<P: InputPin> PinInput<P> {
    /// Pressed when the pin reads low (button to ground, pull-up).
    pub fn active_low(pin: P) -> Self {
        Self {
            pin,
            active_low: true,
            read_errors: 0,
        }
    }

    /// Pressed when the pin reads high.
    pub fn active_high(pin: P) -> Self {
        Self {
            pin,
            active_low: false,
            read_errors: 0,
        }
    }

    /// Number of failed reads so far.
    pub fn read_errors(&self) -> u32 {
        self.read_errors
    }
}

impl<P: InputPin> InputSource for PinInput<P> {
    fn is_active(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(high) => high != self.active_low,
            Err(e) => {
                if self.read_errors == 0 {
                    warn!("GPIO read failed: {:?}", e);
                }
                self.read_errors = self.read_errors.saturating_add(1);
                false
            }
        }
    }
}

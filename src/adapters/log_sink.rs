//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the ESP-IDF
//! logger (UART / USB-CDC on the device, stderr on host).

use log::{debug, info, warn};

use crate::app::events::{AppEvent, ExitReason};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink {
    events: u32,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self { events: 0 }
    }

    /// Number of events seen so far.
    pub fn events(&self) -> u32 {
        self.events
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events = self.events.saturating_add(1);
        match event {
            AppEvent::LinkPairing(addr) => info!("LINK | pairing with {}", addr),
            AppEvent::LinkUp => info!("LINK | up"),
            // Already logged as TX by the loop.
            AppEvent::PacketSent(p) => debug!("SENT | {}", p),
            AppEvent::PowerChanged(pct) => info!("POWER | {}%", pct),
            AppEvent::EmergencyStop => warn!("ESTOP | pressed"),
            AppEvent::LinkLost => warn!("LINK | lost"),
            AppEvent::Halted(reason) => match reason {
                ExitReason::EmergencyStop => warn!("HALT | emergency stop"),
                ExitReason::Disconnected => warn!("HALT | disconnected"),
            },
        }
    }
}

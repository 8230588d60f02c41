//! Outbound application events.
//!
//! The [`ControlLoop`](super::control_loop::ControlLoop) and the link
//! bring-up emit these through the [`EventSink`](super::ports::EventSink)
//! port. Adapters on the other side decide what to do with them — log to
//! serial, flash an LED, count packets in a test.

use crate::config::BdAddr;
use crate::protocol::Packet;

/// Why the control loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The emergency-stop input was pressed.
    EmergencyStop,
    /// The link reported disconnected.
    Disconnected,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Pairing requested with the robot.
    LinkPairing(BdAddr),

    /// The link is up and the loop is about to start.
    LinkUp,

    /// A packet was handed to the link.
    PacketSent(Packet),

    /// A new power value was sent and the readout refreshed.
    PowerChanged(u8),

    /// The emergency-stop input was pressed; the loop is halting.
    EmergencyStop,

    /// The link reported disconnected.
    LinkLost,

    /// The control loop has exited.
    Halted(ExitReason),
}

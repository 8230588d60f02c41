//! Link abstraction — the wireless byte channel to the robot.
//!
//! Concrete implementations:
//! - HC-05 Bluetooth SPP module on a UART ([`Hc05Link`](crate::adapters::hc05_link::Hc05Link))
//! - [`NullLink`] for bench runs without a robot
//!
//! The control loop is generic over `Link`, so swapping the radio requires
//! zero changes to the command logic.

use crate::config::BdAddr;
use crate::error::LinkError;

/// Outbound byte channel with a live connectivity query.
pub trait Link {
    /// Error type for this link.
    type Error: core::fmt::Debug;

    /// Start pairing with `peer` using `pin`.
    ///
    /// Returns once the request has been accepted; the connection itself
    /// is reported through [`is_connected`](Link::is_connected).
    fn connect(&mut self, peer: &BdAddr, pin: &str) -> Result<(), Self::Error>;

    /// Write `data` to the link. Returns the number of bytes written.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Whether the link to the robot is currently up.
    fn is_connected(&mut self) -> bool;
}

/// A link that is always up and discards every write.
pub struct NullLink;

impl Link for NullLink {
    type Error = LinkError;

    fn connect(&mut self, _peer: &BdAddr, _pin: &str) -> Result<(), LinkError> {
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, LinkError> {
        Ok(data.len())
    }

    fn is_connected(&mut self) -> bool {
        true
    }
}

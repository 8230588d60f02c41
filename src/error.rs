//! Unified error types for the remote firmware.
//!
//! The control loop itself has no error path: link loss ends the loop and
//! an emergency stop is a deliberate exit. Errors only arise while bringing
//! the remote up (peripherals, config, pairing), so every variant is
//! `Copy` and cheap to log.

use core::fmt;

use crate::config::ConfigError;
use crate::drivers::hw_init::HwInitError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible bring-up step funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The radio link could not be established.
    Link(LinkError),
    /// Peripheral initialisation failed.
    Init(HwInitError),
    /// Configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link(e) => write!(f, "link: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Link errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// Write attempted while the radio reports no connection.
    NotConnected,
    /// The radio module did not answer a command in time.
    Timeout,
    /// The radio module answered a command with an error.
    Rejected,
    /// A command or reply did not fit its buffer.
    Overflow,
    /// The underlying serial port failed.
    Io,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => write!(f, "not connected"),
            Self::Timeout => write!(f, "radio module timed out"),
            Self::Rejected => write!(f, "radio module rejected command"),
            Self::Overflow => write!(f, "radio command or reply overflowed buffer"),
            Self::Io => write!(f, "serial I/O error"),
        }
    }
}

impl std::error::Error for LinkError {}

impl From<LinkError> for Error {
    fn from(e: LinkError) -> Self {
        Self::Link(e)
    }
}

//! Remote configuration and tuning constants.
//!
//! The only runtime-configurable values are the robot's Bluetooth address
//! and the pairing PIN. They default to the paired robot and can be
//! overridden at build time with a JSON document in the `REMOTE_CONFIG`
//! environment variable:
//!
//! ```text
//! REMOTE_CONFIG='{"robot_address":"cc:78:ab:54:d7:d0","pin":"1234"}' cargo build --features espidf
//! ```

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Power reporting
// ---------------------------------------------------------------------------

/// Power percentage reported before the dial has moved.
pub const INITIAL_POWER_PERCENT: u8 = 100;
/// Upper bound of the reported power percentage.
pub const MAX_POWER_PERCENT: u8 = 200;
/// Dial offset: zero counts maps to this percentage.
pub const POWER_CENTRE_PERCENT: i32 = 100;
/// Dial counts per percentage point.
pub const COUNTS_PER_PERCENT: i32 = 2;
/// A new power value is only sent when it differs from the last one sent
/// by more than this many points.
pub const POWER_DEADBAND_PERCENT: u8 = 9;

// ---------------------------------------------------------------------------
// Power readout on the display
// ---------------------------------------------------------------------------

/// Corners of the rectangle cleared before redrawing the readout.
pub const READOUT_CLEAR_RECT: (i32, i32, i32, i32) = (20, 20, 38, 28);
/// Top-left position of the readout text.
pub const READOUT_ORIGIN: (i32, i32) = (20, 20);

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Delay between control loop iterations (milliseconds).
pub const CONTROL_LOOP_PERIOD_MS: u32 = 10;
/// Poll interval while waiting for the link to come up (milliseconds).
pub const LINK_POLL_MS: u32 = 10;

// ---------------------------------------------------------------------------
// Connect feedback
// ---------------------------------------------------------------------------

/// A4.
pub const CONNECT_TONE_HZ: u32 = 440;
pub const CONNECT_TONE_MS: u32 = 50;

// ---------------------------------------------------------------------------
// Bluetooth device address
// ---------------------------------------------------------------------------

/// 48-bit Bluetooth device address, most significant byte first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "heapless::String<17>", into = "heapless::String<17>")]
pub struct BdAddr(pub [u8; 6]);

impl BdAddr {
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl fmt::Display for BdAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl FromStr for BdAddr {
    type Err = ConfigError;

    /// Accepts `cc:78:ab:54:d7:d0` or `cc-78-ab-54-d7-d0`, either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut octets = [0u8; 6];
        let mut parts = s.split([':', '-']);
        for octet in &mut octets {
            let part = parts.next().ok_or(ConfigError::InvalidAddress)?;
            if part.len() != 2 {
                return Err(ConfigError::InvalidAddress);
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| ConfigError::InvalidAddress)?;
        }
        if parts.next().is_some() {
            return Err(ConfigError::InvalidAddress);
        }
        Ok(Self(octets))
    }
}

impl TryFrom<heapless::String<17>> for BdAddr {
    type Error = ConfigError;

    fn try_from(s: heapless::String<17>) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<BdAddr> for heapless::String<17> {
    fn from(addr: BdAddr) -> Self {
        use core::fmt::Write;
        let mut s = heapless::String::new();
        // 17 bytes is exactly "xx:xx:xx:xx:xx:xx".
        let _ = write!(s, "{addr}");
        s
    }
}

// ---------------------------------------------------------------------------
// Remote configuration
// ---------------------------------------------------------------------------

/// Link parameters for pairing with the robot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Bluetooth address of the robot's receiver.
    pub robot_address: BdAddr,
    /// Pairing PIN (ASCII digits).
    pub pin: heapless::String<16>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        let mut pin = heapless::String::new();
        let _ = pin.push_str("1234");
        Self {
            robot_address: BdAddr([0xcc, 0x78, 0xab, 0x54, 0xd7, 0xd0]),
            pin,
        }
    }
}

impl RemoteConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    /// Build-time override if one was supplied, defaults otherwise.
    pub fn load() -> Result<Self, ConfigError> {
        match option_env!("REMOTE_CONFIG") {
            Some(json) => Self::from_json(json),
            None => Ok(Self::default()),
        }
    }

    /// Reject values the radio module would refuse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pin.is_empty() || !self.pin.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::InvalidPin);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// JSON did not parse or a field had the wrong shape.
    Malformed,
    /// Address is not six hex octets.
    InvalidAddress,
    /// PIN is empty or contains non-digits.
    InvalidPin,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "config JSON malformed"),
            Self::InvalidAddress => write!(f, "robot address must be six hex octets"),
            Self::InvalidPin => write!(f, "PIN must be 1-16 ASCII digits"),
        }
    }
}

impl std::error::Error for ConfigError {}

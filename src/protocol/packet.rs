//! Command packets sent to the robot.
//!
//! Wire format (one packet per command, no framing, no checksum):
//! ```text
//! ┌──────────────┬──────────────┐
//! │ Command (1B) │ Data (1B)    │
//! │ u8 code      │ u8 payload   │
//! └──────────────┴──────────────┘
//! ```
//!
//! `Data` carries the power percentage (0–200) for [`Command::SetPower`]
//! and is zero for every other command.

use core::fmt;

/// Size of one encoded packet in bytes.
pub const PACKET_LEN: usize = 2;

/// Commands understood by the robot-side receiver.
///
/// The discriminants are the on-air byte values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
    Stop = 4,
    GrabRubbish = 5,
    PlaceRubbish = 6,
    EmergencyStop = 7,
    SetPower = 8,
}

impl Command {
    /// On-air byte value.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Short label used in log lines.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Stop => "STOP",
            Self::GrabRubbish => "GRAB",
            Self::PlaceRubbish => "PLACE",
            Self::EmergencyStop => "ESTOP",
            Self::SetPower => "POWER",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a byte is not a known command code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownCommand(pub u8);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown command code {}", self.0)
    }
}

impl TryFrom<u8> for Command {
    type Error = UnknownCommand;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Self::Up,
            1 => Self::Down,
            2 => Self::Left,
            3 => Self::Right,
            4 => Self::Stop,
            5 => Self::GrabRubbish,
            6 => Self::PlaceRubbish,
            7 => Self::EmergencyStop,
            8 => Self::SetPower,
            other => return Err(UnknownCommand(other)),
        })
    }
}

/// One command plus its data byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    pub command: Command,
    pub data: u8,
}

impl Packet {
    /// A packet with no payload (`data = 0`).
    pub const fn bare(command: Command) -> Self {
        Self { command, data: 0 }
    }

    /// A `SetPower` packet carrying `percent`.
    pub const fn set_power(percent: u8) -> Self {
        Self {
            command: Command::SetPower,
            data: percent,
        }
    }

    /// Encode into the fixed 2-byte wire layout.
    pub const fn encode(&self) -> [u8; PACKET_LEN] {
        [self.command.code(), self.data]
    }

    /// Decode from the wire layout.
    pub fn decode(bytes: [u8; PACKET_LEN]) -> Result<Self, UnknownCommand> {
        Ok(Self {
            command: Command::try_from(bytes[0])?,
            data: bytes[1],
        })
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} data={}", self.command, self.data)
    }
}

//! Remote → robot command protocol.
//!
//! ```text
//! ControlLoop ──▶ Packet::encode ──▶ Link::write ══ radio ══▶ PacketDecoder ──▶ robot
//! ```
//!
//! Fire-and-forget: no acknowledgements, no retransmission. Every packet
//! is exactly [`PACKET_LEN`](packet::PACKET_LEN) bytes.

pub mod codec;
pub mod packet;
pub mod transport;

pub use packet::{Command, PACKET_LEN, Packet};
pub use transport::Link;

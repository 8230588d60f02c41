//! Streaming packet decoder for the receiving end of the link.
//!
//! The remote only ever encodes, but the robot side (and the host-side
//! tests that stand in for it) have to split a raw byte stream back into
//! packets. A single `read` may return half a packet, several packets, or
//! a packet split across two reads, so the decoder accumulates bytes.
//!
//! There is no framing on the wire. When the first byte of a would-be
//! packet is not a known command code the decoder drops that byte and
//! treats the next one as the start of a packet.

use super::packet::{Command, PACKET_LEN, Packet};

/// Decoder state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecoderState {
    /// Waiting for a command byte.
    AwaitCommand,
    /// Command byte seen, waiting for its data byte.
    AwaitData(Command),
}

/// Streaming packet decoder.
pub struct PacketDecoder {
    state: DecoderState,
    dropped: u32,
}

impl Default for PacketDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketDecoder {
    pub const fn new() -> Self {
        Self {
            state: DecoderState::AwaitCommand,
            dropped: 0,
        }
    }

    /// Feed a single byte. Returns a packet when `byte` completes one.
    pub fn push(&mut self, byte: u8) -> Option<Packet> {
        match self.state {
            DecoderState::AwaitCommand => {
                match Command::try_from(byte) {
                    Ok(command) => self.state = DecoderState::AwaitData(command),
                    Err(_) => self.dropped = self.dropped.saturating_add(1),
                }
                None
            }
            DecoderState::AwaitData(command) => {
                self.state = DecoderState::AwaitCommand;
                Some(Packet { command, data: byte })
            }
        }
    }

    /// Feed a chunk of bytes, calling `on_packet` for every complete packet.
    /// Returns the number of packets decoded from this chunk.
    pub fn feed(&mut self, data: &[u8], mut on_packet: impl FnMut(Packet)) -> usize {
        let mut decoded = 0;
        for &byte in data {
            if let Some(packet) = self.push(byte) {
                on_packet(packet);
                decoded += 1;
            }
        }
        decoded
    }

    /// Bytes discarded so far because they were not a valid command code.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// True if a command byte is buffered and its data byte is pending.
    pub fn is_mid_packet(&self) -> bool {
        matches!(self.state, DecoderState::AwaitData(_))
    }

    /// Reset decoder state (e.g. after the link re-pairs).
    pub fn reset(&mut self) {
        self.state = DecoderState::AwaitCommand;
    }
}

/// Decode a complete buffer into a fixed-capacity list of packets.
///
/// Packets beyond `N` are discarded. Trailing partial packets are ignored.
pub fn decode_all<const N: usize>(data: &[u8]) -> heapless::Vec<Packet, N> {
    let mut decoder = PacketDecoder::new();
    let mut out = heapless::Vec::new();
    decoder.feed(data, |p| {
        let _ = out.push(p);
    });
    out
}

const _: () = assert!(PACKET_LEN == 2, "decoder assumes two-byte packets");

//! Fuzz target: `PacketDecoder::feed`
//!
//! Drives arbitrary byte sequences into the streaming packet decoder, first
//! in one piece and then split at a fuzzer-chosen point. Both runs must
//! yield the same packets, every packet must re-encode to a valid command
//! code, and no byte may go unaccounted for.
//!
//! cargo fuzz run fuzz_packet_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use rubbish_remote::protocol::codec::PacketDecoder;
use rubbish_remote::protocol::Packet;

fuzz_target!(|data: &[u8]| {
    let Some((&split, stream)) = data.split_first() else {
        return;
    };

    let mut whole = PacketDecoder::new();
    let mut expected = Vec::new();
    whole.feed(stream, |p| expected.push(p));

    for p in &expected {
        assert_eq!(Packet::decode(p.encode()), Ok(*p));
    }
    let pending = usize::from(whole.is_mid_packet());
    assert_eq!(whole.dropped() as usize + expected.len() * 2 + pending, stream.len());

    let cut = usize::from(split).min(stream.len());
    let mut pieces = PacketDecoder::new();
    let mut got = Vec::new();
    pieces.feed(&stream[..cut], |p| got.push(p));
    pieces.feed(&stream[cut..], |p| got.push(p));
    assert_eq!(got, expected);

    // A reset decoder starts from a clean command boundary.
    pieces.reset();
    assert!(!pieces.is_mid_packet());
});

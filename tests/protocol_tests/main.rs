//! Protocol tests
//!
//! Opcode table, expiration rules, header parsing, the frame assembler and
//! the request encoder.

mod header_tests;
mod opcode_tests;
mod request_tests;

use memframe::protocol::FixedClock;
use memframe::{BinaryDecoder, CommandMessage, Config, DecodeOutcome, ReadBuffer};

/// Unix time every test decoder believes it is
pub const NOW: u64 = 1_700_000_000;

pub fn decoder() -> BinaryDecoder<FixedClock> {
    BinaryDecoder::with_clock(FixedClock(NOW), &Config::default())
}

/// Decode one complete frame, panicking on anything but a message
pub fn decode_one(bytes: &[u8]) -> CommandMessage {
    let mut buffer = ReadBuffer::from(bytes);
    match decoder().decode(&mut buffer) {
        DecodeOutcome::Message(message) => {
            assert!(buffer.is_empty(), "frame not fully consumed");
            message
        }
        other => panic!("Expected a message, got {:?}", other),
    }
}

/// Feed `chunks` one after another, collecting every outcome except
/// `NeedMoreData`
pub fn decode_chunks(decoder: &BinaryDecoder<FixedClock>, chunks: &[&[u8]]) -> Vec<DecodeOutcome> {
    let mut buffer = ReadBuffer::new();
    let mut outcomes = Vec::new();
    for chunk in chunks {
        buffer.extend_from_slice(chunk);
        loop {
            match decoder.decode(&mut buffer) {
                DecodeOutcome::NeedMoreData => break,
                DecodeOutcome::Error(e) if e.is_fatal() => {
                    outcomes.push(DecodeOutcome::Error(e));
                    return outcomes;
                }
                outcome => outcomes.push(outcome),
            }
        }
    }
    outcomes
}

//! Tests for frame header parsing

use memframe::protocol::{FrameHeader, HEADER_SIZE};
use memframe::DecodeError;

fn sample_header() -> Vec<u8> {
    vec![
        0x80, // magic
        0x01, // opcode (SET)
        0x00, 0x03, // key length
        0x08, // extras length
        0x00, // data type
        0x00, 0x00, // reserved
        0x00, 0x00, 0x00, 0x0E, // total body length
        0xDE, 0xAD, 0xBE, 0xEF, // opaque
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x02, // cas
    ]
}

// =============================================================================
// Parsing Tests
// =============================================================================

#[test]
fn test_parse_fields() {
    let header = FrameHeader::parse(&sample_header()).unwrap();

    assert_eq!(header.magic, 0x80);
    assert_eq!(header.opcode, 0x01);
    assert_eq!(header.key_length, 3);
    assert_eq!(header.extra_length, 8);
    assert_eq!(header.total_body_length, 14);
    assert_eq!(header.opaque, 0xDEAD_BEEF);
    assert_eq!(header.cas, 0x0102);
    assert_eq!(header.frame_length(), HEADER_SIZE + 14);
    assert_eq!(header.value_length().unwrap(), 3);
}

#[test]
fn test_parse_ignores_trailing_bytes() {
    let mut bytes = sample_header();
    bytes.extend_from_slice(b"trailing body bytes");

    let header = FrameHeader::parse(&bytes).unwrap();
    assert_eq!(header.total_body_length, 14);
}

#[test]
fn test_big_endian_lengths() {
    let mut bytes = sample_header();
    bytes[2..4].copy_from_slice(&[0x01, 0x00]); // 256
    bytes[8..12].copy_from_slice(&[0x00, 0x01, 0x00, 0x10]); // 65552

    let header = FrameHeader::parse(&bytes).unwrap();
    assert_eq!(header.key_length, 256);
    assert_eq!(header.total_body_length, 65_552);
}

#[test]
fn test_bad_magic() {
    let mut bytes = sample_header();
    bytes[0] = 0x81;

    let err = FrameHeader::parse(&bytes).unwrap_err();
    assert_eq!(err, DecodeError::MalformedHeader { magic: 0x81 });
    assert!(err.is_fatal());
    assert!(err.to_string().contains("magic byte incorrect"));
}

// =============================================================================
// Length Validation Tests
// =============================================================================

#[test]
fn test_value_length_without_value() {
    let mut bytes = sample_header();
    bytes[8..12].copy_from_slice(&11u32.to_be_bytes());

    let header = FrameHeader::parse(&bytes).unwrap();
    assert_eq!(header.value_length().unwrap(), 0);
}

#[test]
fn test_body_shorter_than_extras_and_key() {
    let mut bytes = sample_header();
    bytes[8..12].copy_from_slice(&10u32.to_be_bytes());

    let header = FrameHeader::parse(&bytes).unwrap();
    let err = header.value_length().unwrap_err();
    assert_eq!(
        err,
        DecodeError::InvalidBodyLength {
            total: 10,
            extras: 8,
            key: 3,
            opaque: 0xDEAD_BEEF,
        }
    );
    assert!(!err.is_fatal());
    assert_eq!(err.opaque(), Some(0xDEAD_BEEF));
}

#[test]
fn test_write_to_matches_wire_layout() {
    let bytes = sample_header();
    let header = FrameHeader::parse(&bytes).unwrap();

    let mut written: Vec<u8> = Vec::new();
    header.write_to(&mut written);
    assert_eq!(written, bytes);
}

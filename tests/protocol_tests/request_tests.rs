//! Tests for the request encoder
//!
//! Wire layout checks only; decoding is covered by the decoder tests.

use bytes::BytesMut;
use memframe::protocol::{Opcode, Request};
use memframe::MemframeError;

#[test]
fn test_wire_format_set() {
    let bytes = Request::set("foo", "bar", 0x0102_0304, 60)
        .with_opaque(0xAABB_CCDD)
        .with_cas(5)
        .encode()
        .unwrap();

    // header
    assert_eq!(bytes[0], 0x80); // magic
    assert_eq!(bytes[1], 0x01); // SET
    assert_eq!(&bytes[2..4], &[0x00, 0x03]); // key length
    assert_eq!(bytes[4], 8); // extras length
    assert_eq!(&bytes[5..8], &[0, 0, 0]); // data type + reserved
    assert_eq!(&bytes[8..12], &[0, 0, 0, 14]); // total body
    assert_eq!(&bytes[12..16], &[0xAA, 0xBB, 0xCC, 0xDD]); // opaque
    assert_eq!(&bytes[16..24], &[0, 0, 0, 0, 0, 0, 0, 5]); // cas

    // body
    assert_eq!(&bytes[24..28], &[0x01, 0x02, 0x03, 0x04]); // flags
    assert_eq!(&bytes[28..32], &[0, 0, 0, 60]); // expiration
    assert_eq!(&bytes[32..35], b"foo");
    assert_eq!(&bytes[35..], b"bar");
}

#[test]
fn test_wire_format_noop() {
    let bytes = Request::noop().encode().unwrap();
    assert_eq!(bytes.len(), 24);
    assert_eq!(bytes[1], 0x0A);
    assert!(bytes[2..].iter().all(|&b| b == 0));
}

#[test]
fn test_quiet_switches_opcode() {
    assert_eq!(Request::delete("k").quiet().opcode, Opcode::DeleteQ);
    assert_eq!(Request::flush().quiet().opcode, Opcode::FlushQ);
    // No quiet form: left as is
    assert_eq!(Request::version().quiet().opcode, Opcode::Version);
}

#[test]
fn test_encode_into_appends() {
    let mut dst = BytesMut::new();
    Request::get("a").encode_into(&mut dst).unwrap();
    Request::get("bc").encode_into(&mut dst).unwrap();

    assert_eq!(dst.len(), 25 + 26);
    assert_eq!(dst[25], 0x80);
}

#[test]
fn test_write_to_stream() {
    let mut out: Vec<u8> = Vec::new();
    Request::touch("k", 7).write_to(&mut out).unwrap();

    assert_eq!(out, Request::touch("k", 7).encode().unwrap());
}

#[test]
fn test_oversized_key_is_rejected() {
    let result = Request::get(vec![b'k'; 65_536]).encode();

    match result {
        Err(MemframeError::Protocol(msg)) => assert!(msg.contains("65535")),
        other => panic!("Expected a protocol error, got {:?}", other),
    }
}

#[test]
fn test_oversized_extras_are_rejected() {
    let result = Request::new(Opcode::Set).with_extras(vec![0; 256]).header();
    assert!(matches!(result, Err(MemframeError::Protocol(_))));
}

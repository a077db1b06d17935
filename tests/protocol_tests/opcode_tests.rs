//! Tests for the opcode table
//!
//! These tests verify:
//! - Every implemented code maps to its (operation, quiet, echo_key) row
//! - Every other byte is unsupported
//! - Reverse lookup and quiet variants

use memframe::protocol::{for_command, lookup, reserved_name, Opcode, Operation};

const EXPECTED: [(u8, Opcode, Operation, bool, bool); 31] = [
    (0x00, Opcode::Get, Operation::Get, false, false),
    (0x01, Opcode::Set, Operation::Set, false, false),
    (0x02, Opcode::Add, Operation::Add, false, false),
    (0x03, Opcode::Replace, Operation::Replace, false, false),
    (0x04, Opcode::Delete, Operation::Delete, false, false),
    (0x05, Opcode::Increment, Operation::Incr, false, false),
    (0x06, Opcode::Decrement, Operation::Decr, false, false),
    (0x07, Opcode::Quit, Operation::Quit, false, false),
    (0x08, Opcode::Flush, Operation::FlushAll, false, false),
    (0x09, Opcode::GetQ, Operation::Get, true, false),
    (0x0A, Opcode::Noop, Operation::Noop, false, false),
    (0x0B, Opcode::Version, Operation::Version, false, false),
    (0x0C, Opcode::GetK, Operation::Get, false, true),
    (0x0D, Opcode::GetKQ, Operation::Get, true, true),
    (0x0E, Opcode::Append, Operation::Append, false, false),
    (0x0F, Opcode::Prepend, Operation::Prepend, false, false),
    (0x10, Opcode::Stat, Operation::Stats, false, false),
    (0x11, Opcode::SetQ, Operation::Set, true, false),
    (0x12, Opcode::AddQ, Operation::Add, true, false),
    (0x13, Opcode::ReplaceQ, Operation::Replace, true, false),
    (0x14, Opcode::DeleteQ, Operation::Delete, true, false),
    (0x15, Opcode::IncrementQ, Operation::Incr, true, false),
    (0x16, Opcode::DecrementQ, Operation::Decr, true, false),
    (0x17, Opcode::QuitQ, Operation::Quit, true, false),
    (0x18, Opcode::FlushQ, Operation::FlushAll, true, false),
    (0x19, Opcode::AppendQ, Operation::Append, true, false),
    (0x1A, Opcode::PrependQ, Operation::Prepend, true, false),
    (0x1B, Opcode::Verbosity, Operation::Verbosity, false, false),
    (0x1C, Opcode::Touch, Operation::Touch, false, false),
    (0x1D, Opcode::Gat, Operation::Gat, false, false),
    (0x1E, Opcode::GatQ, Operation::Gatq, true, false),
];

// =============================================================================
// Lookup Tests
// =============================================================================

#[test]
fn test_lookup_every_implemented_code() {
    for (code, opcode, operation, quiet, echo_key) in EXPECTED {
        let entry = lookup(code).unwrap_or_else(|| panic!("0x{:02x} missing", code));
        assert_eq!(entry.opcode, opcode, "opcode for 0x{:02x}", code);
        assert_eq!(entry.opcode.code(), code);
        assert_eq!(entry.operation, operation, "operation for 0x{:02x}", code);
        assert_eq!(entry.quiet, quiet, "quiet for 0x{:02x}", code);
        assert_eq!(entry.echo_key, echo_key, "echo_key for 0x{:02x}", code);
    }
}

#[test]
fn test_lookup_rejects_everything_above_gatq() {
    for code in 0x1F..=0xFF_u8 {
        assert!(lookup(code).is_none(), "0x{:02x} should be unsupported", code);
        assert!(Opcode::from_code(code).is_none());
    }
}

#[test]
fn test_from_code_matches_lookup() {
    assert_eq!(Opcode::from_code(0x0D), Some(Opcode::GetKQ));
    assert_eq!(Opcode::from_code(0x1E), Some(Opcode::GatQ));
}

// =============================================================================
// Reserved Code Tests
// =============================================================================

#[test]
fn test_reserved_names() {
    assert_eq!(reserved_name(0x20), Some("SASLListMechs"));
    assert_eq!(reserved_name(0x30), Some("RGet"));
    assert_eq!(reserved_name(0x3D), Some("SetVBucket"));
    assert_eq!(reserved_name(0x47), Some("TAPCheckpointEnd"));
}

#[test]
fn test_unreserved_codes_have_no_name() {
    assert_eq!(reserved_name(0x00), None);
    assert_eq!(reserved_name(0x1F), None);
    assert_eq!(reserved_name(0x23), None);
    assert_eq!(reserved_name(0x48), None);
    assert_eq!(reserved_name(0xFF), None);
}

// =============================================================================
// Reverse Lookup Tests
// =============================================================================

#[test]
fn test_for_command_finds_each_entry() {
    for (_, opcode, operation, quiet, echo_key) in EXPECTED {
        assert_eq!(for_command(operation, quiet, echo_key), Some(opcode));
    }
}

#[test]
fn test_for_command_unknown_combination() {
    // No operation other than GET echoes its key
    assert_eq!(for_command(Operation::Set, false, true), None);
    assert_eq!(for_command(Operation::Noop, true, false), None);
}

#[test]
fn test_quiet_variants() {
    assert_eq!(Opcode::Get.quiet_variant(), Some(Opcode::GetQ));
    assert_eq!(Opcode::GetK.quiet_variant(), Some(Opcode::GetKQ));
    assert_eq!(Opcode::Set.quiet_variant(), Some(Opcode::SetQ));
    assert_eq!(Opcode::Gat.quiet_variant(), Some(Opcode::GatQ));
    assert_eq!(Opcode::SetQ.quiet_variant(), Some(Opcode::SetQ));
    assert_eq!(Opcode::Noop.quiet_variant(), None);
    assert_eq!(Opcode::Touch.quiet_variant(), None);

    for opcode in EXPECTED.iter().filter_map(|row| row.1.quiet_variant()) {
        assert!(lookup(opcode.code()).unwrap().quiet);
    }
}

#[test]
fn test_operation_families() {
    assert!(Operation::Prepend.is_storage());
    assert!(!Operation::Get.is_storage());
    assert!(Operation::Decr.is_arithmetic());
    assert!(Operation::Gatq.is_touch());
    assert!(!Operation::Delete.is_touch());
}

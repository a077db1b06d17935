//! Extras and body parsing
//!
//! Splits a complete frame body into extras/key/value and interprets the
//! extras according to the operation family.

use bytes::{Buf, Bytes};

use crate::error::DecodeError;
use super::{normalize, CacheElement, Clock, CommandMessage, FrameHeader, OpcodeEntry, Operation};

/// flags (4) + expiration (4)
const STORAGE_EXTRAS: usize = 8;

/// amount (8) + initial (8) + expiration (4)
const ARITHMETIC_EXTRAS: usize = 20;

/// expiration (4)
const TOUCH_EXTRAS: usize = 4;

/// The three regions of a frame body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBody {
    pub extras: Bytes,
    pub key: Bytes,
    pub value: Bytes,
}

impl FrameBody {
    /// Split a complete body (exactly `total_body_length` bytes)
    pub fn split(header: &FrameHeader, mut body: Bytes) -> Result<Self, DecodeError> {
        let value_length = header.value_length()?;
        debug_assert_eq!(body.len(), header.total_body_length as usize);

        let extras = body.split_to(header.extra_length as usize);
        let key = body.split_to(header.key_length as usize);
        debug_assert_eq!(body.len(), value_length);

        Ok(Self {
            extras,
            key,
            value: body,
        })
    }
}

/// Build the command message for one frame
///
/// Frames without a key carry no element and no arithmetic/touch arguments,
/// whatever their extras say.
pub fn parse_body<C: Clock + ?Sized>(
    entry: &OpcodeEntry,
    header: &FrameHeader,
    body: FrameBody,
    clock: &C,
) -> Result<CommandMessage, DecodeError> {
    let mut message = CommandMessage::new(entry, header);
    let FrameBody { extras, key, value } = body;

    if key.is_empty() {
        return Ok(message);
    }
    // Keys outlive the connection buffer; values stay shared with it
    let key = Bytes::copy_from_slice(&key);
    message.keys.push(key.clone());

    let operation = entry.operation;
    if operation.is_storage() {
        let (flags, expiration) = storage_extras(operation, &extras, header.opaque)?;
        message.element = Some(CacheElement {
            key,
            flags,
            expiry: normalize(expiration, clock.now()),
            cas: header.cas,
            data: value,
        });
    } else if operation.is_arithmetic() {
        let mut extras = require(operation, &extras, ARITHMETIC_EXTRAS, header.opaque)?;
        message.incr_amount = extras.get_u64();
        message.incr_initial = extras.get_u64();
        message.incr_expiry = normalize(extras.get_u32(), clock.now());
    } else if operation.is_touch() {
        let mut extras = require(operation, &extras, TOUCH_EXTRAS, header.opaque)?;
        message.incr_expiry = normalize(extras.get_u32(), clock.now());
    }

    Ok(message)
}

/// (flags, raw expiration) of a storage command
///
/// APPEND/PREPEND normally send no extras; both values then default to 0.
fn storage_extras(
    operation: Operation,
    extras: &[u8],
    opaque: u32,
) -> Result<(u32, u32), DecodeError> {
    if extras.is_empty() && matches!(operation, Operation::Append | Operation::Prepend) {
        return Ok((0, 0));
    }
    let mut extras = require(operation, extras, STORAGE_EXTRAS, opaque)?;
    Ok((extras.get_u32(), extras.get_u32()))
}

fn require(
    operation: Operation,
    extras: &[u8],
    expected: usize,
    opaque: u32,
) -> Result<&[u8], DecodeError> {
    if extras.len() < expected {
        return Err(DecodeError::TruncatedExtras {
            operation,
            expected,
            actual: extras.len(),
            opaque,
        });
    }
    Ok(extras)
}

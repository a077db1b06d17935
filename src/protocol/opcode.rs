//! Opcode table
//!
//! Maps the one-byte wire opcode to a logical operation and its reply flags.
//!
//! The table is keyed by the code value itself: it is built at compile time
//! from [`ENTRIES`] into a sparse 256-slot array, so the order of the entries
//! (or gaps between codes) can never shift which operation a byte selects.

/// Logical operation requested by a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Get,
    Set,
    Add,
    Replace,
    Delete,
    Incr,
    Decr,
    Quit,
    FlushAll,
    Noop,
    Version,
    Append,
    Prepend,
    Stats,
    Verbosity,
    Touch,
    Gat,
    Gatq,
}

impl Operation {
    /// SET/ADD/REPLACE/APPEND/PREPEND: frames that carry a cache element
    pub fn is_storage(self) -> bool {
        matches!(
            self,
            Operation::Set
                | Operation::Add
                | Operation::Replace
                | Operation::Append
                | Operation::Prepend
        )
    }

    /// INCR/DECR
    pub fn is_arithmetic(self) -> bool {
        matches!(self, Operation::Incr | Operation::Decr)
    }

    /// TOUCH/GAT/GATQ: frames that only update an expiration
    pub fn is_touch(self) -> bool {
        matches!(self, Operation::Touch | Operation::Gat | Operation::Gatq)
    }
}

/// Opcodes implemented by the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    Get = 0x00,
    Set = 0x01,
    Add = 0x02,
    Replace = 0x03,
    Delete = 0x04,
    Increment = 0x05,
    Decrement = 0x06,
    Quit = 0x07,
    Flush = 0x08,
    GetQ = 0x09,
    Noop = 0x0A,
    Version = 0x0B,
    GetK = 0x0C,
    GetKQ = 0x0D,
    Append = 0x0E,
    Prepend = 0x0F,
    Stat = 0x10,
    SetQ = 0x11,
    AddQ = 0x12,
    ReplaceQ = 0x13,
    DeleteQ = 0x14,
    IncrementQ = 0x15,
    DecrementQ = 0x16,
    QuitQ = 0x17,
    FlushQ = 0x18,
    AppendQ = 0x19,
    PrependQ = 0x1A,
    Verbosity = 0x1B,
    Touch = 0x1C,
    Gat = 0x1D,
    GatQ = 0x1E,
}

impl Opcode {
    /// Wire value of this opcode
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Resolve a wire byte, `None` for anything not in the table
    pub fn from_code(code: u8) -> Option<Opcode> {
        lookup(code).map(|entry| entry.opcode)
    }

    /// The no-reply form of this opcode, if the protocol defines one
    pub fn quiet_variant(self) -> Option<Opcode> {
        use Opcode::*;
        let quiet = match self {
            Get | GetQ => GetQ,
            GetK | GetKQ => GetKQ,
            Set | SetQ => SetQ,
            Add | AddQ => AddQ,
            Replace | ReplaceQ => ReplaceQ,
            Delete | DeleteQ => DeleteQ,
            Increment | IncrementQ => IncrementQ,
            Decrement | DecrementQ => DecrementQ,
            Quit | QuitQ => QuitQ,
            Flush | FlushQ => FlushQ,
            Append | AppendQ => AppendQ,
            Prepend | PrependQ => PrependQ,
            Gat | GatQ => GatQ,
            Noop | Version | Stat | Verbosity | Touch => return None,
        };
        Some(quiet)
    }
}

/// One row of the opcode table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeEntry {
    pub opcode: Opcode,
    pub operation: Operation,
    /// Suppress the success reply
    pub quiet: bool,
    /// Include the key in the reply
    pub echo_key: bool,
}

impl OpcodeEntry {
    const fn new(opcode: Opcode, operation: Operation, quiet: bool) -> Self {
        Self {
            opcode,
            operation,
            quiet,
            echo_key: false,
        }
    }

    const fn with_key(opcode: Opcode, operation: Operation, quiet: bool) -> Self {
        Self {
            opcode,
            operation,
            quiet,
            echo_key: true,
        }
    }
}

// =============================================================================
// Table
// =============================================================================

const ENTRIES: [OpcodeEntry; 31] = [
    OpcodeEntry::new(Opcode::Get, Operation::Get, false),
    OpcodeEntry::new(Opcode::Set, Operation::Set, false),
    OpcodeEntry::new(Opcode::Add, Operation::Add, false),
    OpcodeEntry::new(Opcode::Replace, Operation::Replace, false),
    OpcodeEntry::new(Opcode::Delete, Operation::Delete, false),
    OpcodeEntry::new(Opcode::Increment, Operation::Incr, false),
    OpcodeEntry::new(Opcode::Decrement, Operation::Decr, false),
    OpcodeEntry::new(Opcode::Quit, Operation::Quit, false),
    OpcodeEntry::new(Opcode::Flush, Operation::FlushAll, false),
    OpcodeEntry::new(Opcode::GetQ, Operation::Get, true),
    OpcodeEntry::new(Opcode::Noop, Operation::Noop, false),
    OpcodeEntry::new(Opcode::Version, Operation::Version, false),
    OpcodeEntry::with_key(Opcode::GetK, Operation::Get, false),
    OpcodeEntry::with_key(Opcode::GetKQ, Operation::Get, true),
    OpcodeEntry::new(Opcode::Append, Operation::Append, false),
    OpcodeEntry::new(Opcode::Prepend, Operation::Prepend, false),
    OpcodeEntry::new(Opcode::Stat, Operation::Stats, false),
    OpcodeEntry::new(Opcode::SetQ, Operation::Set, true),
    OpcodeEntry::new(Opcode::AddQ, Operation::Add, true),
    OpcodeEntry::new(Opcode::ReplaceQ, Operation::Replace, true),
    OpcodeEntry::new(Opcode::DeleteQ, Operation::Delete, true),
    OpcodeEntry::new(Opcode::IncrementQ, Operation::Incr, true),
    OpcodeEntry::new(Opcode::DecrementQ, Operation::Decr, true),
    OpcodeEntry::new(Opcode::QuitQ, Operation::Quit, true),
    OpcodeEntry::new(Opcode::FlushQ, Operation::FlushAll, true),
    OpcodeEntry::new(Opcode::AppendQ, Operation::Append, true),
    OpcodeEntry::new(Opcode::PrependQ, Operation::Prepend, true),
    OpcodeEntry::new(Opcode::Verbosity, Operation::Verbosity, false),
    OpcodeEntry::new(Opcode::Touch, Operation::Touch, false),
    OpcodeEntry::new(Opcode::Gat, Operation::Gat, false),
    OpcodeEntry::new(Opcode::GatQ, Operation::Gatq, true),
];

static TABLE: [Option<OpcodeEntry>; 256] = build_table(&ENTRIES);

const fn build_table(entries: &[OpcodeEntry]) -> [Option<OpcodeEntry>; 256] {
    let mut table: [Option<OpcodeEntry>; 256] = [None; 256];
    let mut i = 0;
    while i < entries.len() {
        let entry = entries[i];
        let slot = entry.opcode.code() as usize;
        if table[slot].is_some() {
            panic!("duplicate opcode in table");
        }
        table[slot] = Some(entry);
        i += 1;
    }
    table
}

// =============================================================================
// Lookups
// =============================================================================

/// Look up a wire opcode
///
/// Returns `None` for every byte the decoder does not implement, including
/// the codes the protocol reserves (see [`reserved_name`]).
pub fn lookup(code: u8) -> Option<OpcodeEntry> {
    TABLE[code as usize]
}

/// Name of a code the protocol reserves but this decoder does not implement
///
/// Only used for diagnostics: reserved codes are still unsupported.
pub fn reserved_name(code: u8) -> Option<&'static str> {
    let name = match code {
        0x20 => "SASLListMechs",
        0x21 => "SASLAuth",
        0x22 => "SASLStep",
        0x30 => "RGet",
        0x31 => "RSet",
        0x32 => "RSetQ",
        0x33 => "RAppend",
        0x34 => "RAppendQ",
        0x35 => "RPrepend",
        0x36 => "RPrependQ",
        0x37 => "RDelete",
        0x38 => "RDeleteQ",
        0x39 => "RIncr",
        0x3A => "RIncrQ",
        0x3B => "RDecr",
        0x3C => "RDecrQ",
        0x3D => "SetVBucket",
        0x3E => "GetVBucket",
        0x3F => "DelVBucket",
        0x40 => "TAPConnect",
        0x41 => "TAPMutation",
        0x42 => "TAPDelete",
        0x43 => "TAPFlush",
        0x44 => "TAPOpaque",
        0x45 => "TAPVBucketSet",
        0x46 => "TAPCheckpointStart",
        0x47 => "TAPCheckpointEnd",
        _ => return None,
    };
    Some(name)
}

/// Reverse lookup: the opcode whose entry matches a message's flags
pub fn for_command(operation: Operation, quiet: bool, echo_key: bool) -> Option<Opcode> {
    ENTRIES
        .iter()
        .find(|entry| {
            entry.operation == operation && entry.quiet == quiet && entry.echo_key == echo_key
        })
        .map(|entry| entry.opcode)
}

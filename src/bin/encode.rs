//! memframe Encoder Binary
//!
//! Writes one binary-protocol request frame, e.g. to build captures:
//!
//! ```text
//! memframe-encode set foo bar --exptime 60 >> capture.bin
//! memframe-encode --quiet get foo >> capture.bin
//! memframe-decode capture.bin
//! ```

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use memframe::protocol::Request;

/// memframe request encoder
#[derive(Parser, Debug)]
#[command(name = "memframe-encode")]
#[command(about = "Encode a memcached binary-protocol request frame")]
#[command(version)]
struct Args {
    /// Append to this file instead of writing to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Use the no-reply variant of the opcode
    #[arg(short, long)]
    quiet: bool,

    /// Opaque correlation token
    #[arg(long, default_value = "0")]
    opaque: u32,

    /// CAS token
    #[arg(long, default_value = "0")]
    cas: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        key: String,

        /// Echo the key in the reply (GETK)
        #[arg(short = 'k', long)]
        with_key: bool,
    },

    /// Store a value unconditionally
    Set {
        key: String,
        value: String,
        #[arg(long, default_value = "0")]
        flags: u32,
        #[arg(long, default_value = "0")]
        exptime: u32,
    },

    /// Store a value only if the key is absent
    Add {
        key: String,
        value: String,
        #[arg(long, default_value = "0")]
        flags: u32,
        #[arg(long, default_value = "0")]
        exptime: u32,
    },

    /// Store a value only if the key exists
    Replace {
        key: String,
        value: String,
        #[arg(long, default_value = "0")]
        flags: u32,
        #[arg(long, default_value = "0")]
        exptime: u32,
    },

    /// Append to an existing value
    Append { key: String, value: String },

    /// Prepend to an existing value
    Prepend { key: String, value: String },

    /// Delete a key
    Delete { key: String },

    /// Increment a counter
    Incr {
        key: String,
        amount: u64,
        #[arg(long, default_value = "0")]
        initial: u64,
        #[arg(long, default_value = "0")]
        exptime: u32,
    },

    /// Decrement a counter
    Decr {
        key: String,
        amount: u64,
        #[arg(long, default_value = "0")]
        initial: u64,
        #[arg(long, default_value = "0")]
        exptime: u32,
    },

    /// Update a key's expiration
    Touch { key: String, exptime: u32 },

    /// Get a value and update its expiration
    Gat { key: String, exptime: u32 },

    /// Invalidate all items
    Flush,

    /// No-op (used to end a batch of quiet requests)
    Noop,

    /// Server version
    Version,

    /// Close the connection
    Quit,

    /// Server statistics
    Stat { group: Option<String> },

    /// Set the server's verbosity level
    Verbosity { level: u32 },
}

fn main() {
    let args = Args::parse();

    let request = match args.command {
        Commands::Get { key, with_key: true } => Request::get_key(key),
        Commands::Get { key, with_key: false } => Request::get(key),
        Commands::Set { key, value, flags, exptime } => Request::set(key, value, flags, exptime),
        Commands::Add { key, value, flags, exptime } => Request::add(key, value, flags, exptime),
        Commands::Replace { key, value, flags, exptime } => {
            Request::replace(key, value, flags, exptime)
        }
        Commands::Append { key, value } => Request::append(key, value),
        Commands::Prepend { key, value } => Request::prepend(key, value),
        Commands::Delete { key } => Request::delete(key),
        Commands::Incr { key, amount, initial, exptime } => {
            Request::incr(key, amount, initial, exptime)
        }
        Commands::Decr { key, amount, initial, exptime } => {
            Request::decr(key, amount, initial, exptime)
        }
        Commands::Touch { key, exptime } => Request::touch(key, exptime),
        Commands::Gat { key, exptime } => Request::gat(key, exptime),
        Commands::Flush => Request::flush(),
        Commands::Noop => Request::noop(),
        Commands::Version => Request::version(),
        Commands::Quit => Request::quit(),
        Commands::Stat { group } => Request::stat(group.as_deref()),
        Commands::Verbosity { level } => Request::verbosity(level),
    };

    let mut request = request.with_opaque(args.opaque).with_cas(args.cas);
    if args.quiet {
        request = request.quiet();
    }

    let written = match &args.output {
        Some(path) => OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(memframe::MemframeError::from)
            .and_then(|mut file| request.write_to(&mut file)),
        None => request.write_to(&mut io::stdout().lock()),
    };

    if let Err(e) = written {
        eprintln!("memframe-encode: {}", e);
        std::process::exit(1);
    }
}

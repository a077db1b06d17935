//! memframe Decoder Binary
//!
//! Decodes a capture of binary-protocol requests and prints one line per
//! command.

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use memframe::network::{CommandHandler, Connection};
use memframe::protocol::{Clock, FixedClock, SystemClock};
use memframe::{BinaryDecoder, CommandMessage, Config, DecodeError};
use tracing_subscriber::{fmt, EnvFilter};

/// memframe capture decoder
#[derive(Parser, Debug)]
#[command(name = "memframe-decode")]
#[command(about = "Decode memcached binary-protocol requests from a capture")]
#[command(version)]
struct Args {
    /// Capture file (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Bytes fed to the decoder per read
    #[arg(short, long, default_value = "16384")]
    chunk_size: usize,

    /// Largest accepted frame body in bytes
    #[arg(short, long, default_value = "1049088")]
    max_body: u32,

    /// Fixed Unix time for resolving relative expirations
    #[arg(short, long)]
    now: Option<u64>,
}

/// Prints each command as it is decoded
struct Printer;

impl CommandHandler for Printer {
    fn handle(&mut self, command: CommandMessage) -> memframe::Result<()> {
        println!("{}", command);
        Ok(())
    }

    fn reject(&mut self, error: &DecodeError) -> memframe::Result<()> {
        println!("! {}", error);
        Ok(())
    }
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,memframe=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .read_chunk_size(args.chunk_size)
        .max_body_length(args.max_body)
        .build();

    if let Err(e) = config.validate() {
        tracing::error!("{}", e);
        std::process::exit(2);
    }

    let (input, source): (Box<dyn Read>, String) = match &args.input {
        Some(path) => match File::open(path) {
            Ok(file) => (Box::new(file), path.display().to_string()),
            Err(e) => {
                tracing::error!("Failed to open {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => (Box::new(io::stdin()), "stdin".to_string()),
    };

    tracing::info!("memframe-decode v{}", memframe::VERSION);
    tracing::info!("Decoding {} in chunks of {} bytes", source, config.read_chunk_size);

    let result = match args.now {
        Some(now) => run(input, source, FixedClock(now), &config),
        None => run(input, source, SystemClock, &config),
    };

    if let Err(e) = result {
        tracing::error!("Decoding stopped: {}", e);
        std::process::exit(1);
    }
}

fn run<C: Clock>(input: Box<dyn Read>, source: String, clock: C, config: &Config) -> memframe::Result<()> {
    let decoder = Arc::new(BinaryDecoder::with_clock(clock, config));
    let mut connection = Connection::new(input, decoder, Printer, config).with_peer_addr(source);

    connection.handle()?;

    tracing::info!(
        "Decoded {} commands, rejected {} frames, {} trailing bytes",
        connection.frames_decoded(),
        connection.frames_rejected(),
        connection.pending_bytes()
    );
    Ok(())
}

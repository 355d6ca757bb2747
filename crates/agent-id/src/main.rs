//! `agent-id` — decrypts and parses encrypted agent identifiers.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`](config::Config) from environment variables.
//! 2. Initialise structured JSON logging on stderr.
//! 3. Build the identifier codec from the configured key.
//! 4. Decode each identifier given as an argument (or, with no arguments, each
//!    line of stdin) and write one JSON outcome per identifier to stdout.
//!
//! Exits 0 when every identifier decodes, 65 when any is rejected, and 78 when
//! the key or configuration is invalid.

mod config;
mod decode;
mod telemetry;

use std::io;

use anyhow::Result;
use common::ErrorKind;
use tracing::{error, info};

fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = match config::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            // Telemetry is not yet up; write to stderr directly.
            eprintln!("ERROR: agent-id configuration invalid: {e:#}");
            std::process::exit(ErrorKind::Configuration.exit_code());
        }
    };

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(version = env!("CARGO_PKG_VERSION"), "agent-id starting");

    // -----------------------------------------------------------------------
    // 3. Codec
    // -----------------------------------------------------------------------
    let codec = match cfg.codec() {
        Ok(codec) => codec,
        Err(e) => {
            error!(kind = %e.kind(), error = %e, "identifier key rejected");
            std::process::exit(e.kind().exit_code());
        }
    };

    // -----------------------------------------------------------------------
    // 4. Decode
    // -----------------------------------------------------------------------
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut stdout = io::stdout().lock();
    let summary = if args.is_empty() {
        decode::run(&codec, decode::stdin_lines(), &mut stdout, cfg.output_pretty)?
    } else {
        decode::run(&codec, args.into_iter().map(Ok), &mut stdout, cfg.output_pretty)?
    };

    info!(
        decoded = summary.decoded,
        failed = summary.failed,
        "agent-id finished"
    );

    let code = summary.exit_code();
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

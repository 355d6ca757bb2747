//! Batch decoding of identifiers into JSON outcomes.
//!
//! Each input produces exactly one [`DecodeOutcome`] on the output writer. A
//! rejected identifier is logged and reported, and the batch carries on.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use common::{DecodeOutcome, ErrorKind};
use identifier_codec::IdentifierCodec;
use tracing::{debug, error, warn};

/// Counts for a finished batch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub decoded: usize,
    pub failed: usize,
    /// Kind of the first rejected identifier, if any.
    pub first_failure: Option<ErrorKind>,
}

impl Summary {
    /// Process exit code for this batch: 0 when everything decoded.
    pub fn exit_code(&self) -> i32 {
        self.first_failure.map_or(0, |kind| kind.exit_code())
    }
}

/// Decode every non-blank input, writing one JSON document per identifier.
///
/// Inputs are trimmed; blank inputs are skipped without output.
///
/// # Errors
///
/// Returns an error if an input cannot be read or the output cannot be written.
/// Decode failures are reported in the output, not returned.
pub fn run<I, W>(codec: &IdentifierCodec, inputs: I, out: &mut W, pretty: bool) -> Result<Summary>
where
    I: IntoIterator<Item = io::Result<String>>,
    W: Write,
{
    let mut summary = Summary::default();

    for (line, raw) in inputs.into_iter().enumerate() {
        let raw = raw.with_context(|| format!("failed to read input {}", line + 1))?;
        let input = raw.trim();
        if input.is_empty() {
            continue;
        }

        let result = codec.decode(input);
        if let Err(e) = &result {
            if summary.first_failure.is_none() {
                summary.first_failure = Some(e.kind());
            }
            if e.kind().is_per_request() {
                warn!(line = line + 1, kind = %e.kind(), stage = %e.stage(), error = %e, "identifier rejected");
            } else {
                error!(line = line + 1, kind = %e.kind(), error = %e, "codec misconfigured");
            }
        }

        let outcome = DecodeOutcome::from_result(input, result);
        if outcome.is_ok() {
            summary.decoded += 1;
            debug!(line = line + 1, "identifier decoded");
        } else {
            summary.failed += 1;
        }
        write_outcome(out, &outcome, pretty)?;
    }

    out.flush().context("failed to flush output")?;
    Ok(summary)
}

/// Identifiers read line by line from stdin.
pub fn stdin_lines() -> impl Iterator<Item = io::Result<String>> {
    io::stdin().lock().lines()
}

fn write_outcome<W: Write>(out: &mut W, outcome: &DecodeOutcome, pretty: bool) -> Result<()> {
    let written = if pretty {
        serde_json::to_writer_pretty(&mut *out, outcome)
    } else {
        serde_json::to_writer(&mut *out, outcome)
    };
    written.context("failed to serialise decode outcome")?;
    out.write_all(b"\n").context("failed to write output")?;
    Ok(())
}

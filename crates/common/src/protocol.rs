//! Record and output types exchanged between the codec and its callers.
//!
//! These types are serialised as JSON by the `agent-id` CLI, one document per
//! decoded identifier.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

// ---------------------------------------------------------------------------
// Decoded record
// ---------------------------------------------------------------------------

/// Parsed agent identifier.
///
/// The decrypted plaintext has the shape
/// `<region_id>_<region_name>_<account_id>_<bot_id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentIdentifierRecord {
    /// Numeric region id (first field).
    ///
    /// Limited to the `i64` range and ASCII digits (optional sign, surrounding
    /// whitespace trimmed); larger values or other digit scripts are rejected.
    pub region_id: i64,
    /// Region name (second field), verbatim.
    pub region_name: String,
    /// Regional account id (third field), verbatim.
    pub account_id: String,
    /// Bot id (fourth field), verbatim.
    pub bot_id: String,
    /// The full decrypted text.
    pub unique_identifier: String,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Error body written for an identifier that failed to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error kind (e.g. `"crypto"`).
    pub code: String,
    /// Stage at which decoding stopped (e.g. `"unpad"`).
    pub stage: String,
    /// Human-readable description. Never contains key material.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from its parts.
    pub fn new(
        code: impl Into<String>,
        stage: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            stage: stage.into(),
            message: message.into(),
        }
    }
}

impl From<&CodecError> for ErrorResponse {
    fn from(err: &CodecError) -> Self {
        Self::new(err.kind().as_str(), err.stage().as_str(), err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Per-identifier outcome
// ---------------------------------------------------------------------------

/// Result of decoding one identifier, tagged by `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DecodeOutcome {
    /// The identifier decoded into a record.
    Ok {
        input: String,
        record: AgentIdentifierRecord,
    },
    /// The identifier was rejected.
    Error { input: String, error: ErrorResponse },
}

impl DecodeOutcome {
    /// Build an outcome from a codec result.
    pub fn from_result(
        input: impl Into<String>,
        result: Result<AgentIdentifierRecord, CodecError>,
    ) -> Self {
        let input = input.into();
        match result {
            Ok(record) => DecodeOutcome::Ok { input, record },
            Err(e) => DecodeOutcome::Error {
                input,
                error: ErrorResponse::from(&e),
            },
        }
    }

    /// Returns `true` if the identifier decoded successfully.
    pub fn is_ok(&self) -> bool {
        matches!(self, DecodeOutcome::Ok { .. })
    }
}

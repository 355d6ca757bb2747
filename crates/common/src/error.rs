//! Error taxonomy shared by the codec and its callers.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boxed low-level cause attached to per-request [`CodecError`] variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Pipeline stage at which decoding stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Codec construction: key length check.
    KeyValidation,
    /// Base64 decoding of the normalised, re-padded text.
    Base64Decode,
    /// Splitting the decoded payload into IV and ciphertext.
    EnvelopeSplit,
    /// AES-256-CBC block decryption.
    Decrypt,
    /// PKCS#7 padding removal.
    Unpad,
    /// UTF-8 decoding of the plaintext.
    Utf8Decode,
    /// Splitting the plaintext on `_`.
    FieldSplit,
    /// Parsing the integer region id.
    FieldTyping,
}

impl Stage {
    /// Stable snake_case name, identical to the serialised form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::KeyValidation => "key_validation",
            Stage::Base64Decode => "base64_decode",
            Stage::EnvelopeSplit => "envelope_split",
            Stage::Decrypt => "decrypt",
            Stage::Unpad => "unpad",
            Stage::Utf8Decode => "utf8_decode",
            Stage::FieldSplit => "field_split",
            Stage::FieldTyping => "field_typing",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broad failure class of a [`CodecError`].
///
/// Kinds map to process exit codes used by the CLI:
/// - [`ErrorKind::Configuration`] → 78 (`EX_CONFIG`)
/// - [`ErrorKind::TransportDecode`], [`ErrorKind::Crypto`], [`ErrorKind::Parse`] → 65 (`EX_DATAERR`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The codec was given an unusable key. Deploy-time fault.
    Configuration,
    /// The encoded text is not a well-formed base64 envelope.
    TransportDecode,
    /// Decryption, padding removal, or UTF-8 decoding failed. Usually a wrong key
    /// or tampered ciphertext.
    Crypto,
    /// The plaintext is not a 4-field, integer-prefixed record.
    Parse,
}

impl ErrorKind {
    /// Stable snake_case name, identical to the serialised form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::TransportDecode => "transport_decode",
            ErrorKind::Crypto => "crypto",
            ErrorKind::Parse => "parse",
        }
    }

    /// Returns the process exit code that should be used for this kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorKind::Configuration => 78,
            ErrorKind::TransportDecode => 65,
            ErrorKind::Crypto => 65,
            ErrorKind::Parse => 65,
        }
    }

    /// `true` for failures scoped to a single identifier, which callers should
    /// reject individually without stopping.
    pub fn is_per_request(&self) -> bool {
        !matches!(self, ErrorKind::Configuration)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by identifier codec construction and decoding.
///
/// Never carries key material. [`CodecError::Parse`] carries the decrypted text
/// for diagnostics; it is not part of the `Display` output.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The key is not exactly `expected` bytes long.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    Configuration { expected: usize, actual: usize },

    /// The encoded identifier is not a valid base64 IV + ciphertext envelope.
    #[error("transport decode failed at {stage}: {source}")]
    TransportDecode {
        stage: Stage,
        #[source]
        source: BoxError,
    },

    /// The ciphertext could not be decrypted into valid UTF-8 text.
    #[error("crypto failure at {stage}: {source}")]
    Crypto {
        stage: Stage,
        #[source]
        source: BoxError,
    },

    /// The decrypted text does not have the expected record shape.
    #[error("malformed identifier record at {stage}: {reason}")]
    Parse {
        stage: Stage,
        reason: String,
        decrypted: String,
    },
}

impl CodecError {
    /// Returns the broad failure class.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::Configuration { .. } => ErrorKind::Configuration,
            CodecError::TransportDecode { .. } => ErrorKind::TransportDecode,
            CodecError::Crypto { .. } => ErrorKind::Crypto,
            CodecError::Parse { .. } => ErrorKind::Parse,
        }
    }

    /// Returns the stage at which decoding stopped.
    pub fn stage(&self) -> Stage {
        match self {
            CodecError::Configuration { .. } => Stage::KeyValidation,
            CodecError::TransportDecode { stage, .. }
            | CodecError::Crypto { stage, .. }
            | CodecError::Parse { stage, .. } => *stage,
        }
    }

    /// The decrypted text, when decryption got far enough to produce one.
    pub fn decrypted_text(&self) -> Option<&str> {
        match self {
            CodecError::Parse { decrypted, .. } => Some(decrypted),
            _ => None,
        }
    }
}

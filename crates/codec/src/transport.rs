//! URL-safe transport envelope: `base64url-no-pad([IV][ciphertext])`.
//!
//! The encoded text is mapped back to the standard base64 alphabet and
//! re-padded before decoding, so producers that strip `=` and swap `+`/`/`
//! for `-`/`_` are accepted.

use base64::{
    alphabet,
    engine::{GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use thiserror::Error;

use common::Stage;

use crate::crypto::{BLOCK_LEN, IV_LEN};

/// Standard-alphabet engine that tolerates non-zero trailing bits in the final
/// quantum, matching common permissive decoders.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Errors produced while opening the transport envelope.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The text is not valid base64 after normalisation.
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded payload has no room for an IV.
    #[error("decoded payload is {0} bytes, shorter than the {IV_LEN}-byte IV")]
    TooShort(usize),

    /// Nothing follows the IV.
    #[error("no ciphertext after the IV")]
    EmptyCiphertext,

    /// The ciphertext is not a whole number of cipher blocks.
    #[error("ciphertext length {0} is not a multiple of {BLOCK_LEN}")]
    MisalignedCiphertext(usize),
}

impl TransportError {
    /// Stage at which this error was raised.
    pub fn stage(&self) -> Stage {
        match self {
            TransportError::Base64(_) => Stage::Base64Decode,
            TransportError::TooShort(_)
            | TransportError::EmptyCiphertext
            | TransportError::MisalignedCiphertext(_) => Stage::EnvelopeSplit,
        }
    }
}

/// Decoded payload split into IV and ciphertext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// CBC initialisation vector.
    pub iv: [u8; IV_LEN],
    /// Block-aligned, non-empty ciphertext.
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Decode URL-safe, unpadded text into an [`Envelope`].
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the text is not base64 or the payload is
    /// not `[IV][one or more whole blocks]`.
    pub fn open(encoded: &str) -> Result<Self, TransportError> {
        let padded = restore_padding(normalize_alphabet(encoded));
        let payload = STANDARD_LENIENT.decode(padded)?;
        Self::split(payload)
    }

    /// Split a raw payload into its IV prefix and ciphertext.
    pub fn split(mut payload: Vec<u8>) -> Result<Self, TransportError> {
        if payload.len() < IV_LEN {
            return Err(TransportError::TooShort(payload.len()));
        }
        let ciphertext = payload.split_off(IV_LEN);
        if ciphertext.is_empty() {
            return Err(TransportError::EmptyCiphertext);
        }
        if ciphertext.len() % BLOCK_LEN != 0 {
            return Err(TransportError::MisalignedCiphertext(ciphertext.len()));
        }
        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(&payload);
        Ok(Self { iv, ciphertext })
    }
}

/// Map the URL-safe alphabet back to the standard one (`-` → `+`, `_` → `/`).
pub fn normalize_alphabet(encoded: &str) -> String {
    encoded
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect()
}

/// Append the `=` characters needed to make the length a multiple of 4.
///
/// `padding_needed = 4 - len % 4`; a value of 4 means no padding is added.
pub fn restore_padding(mut text: String) -> String {
    let padding_needed = 4 - text.len() % 4;
    if padding_needed < 4 {
        text.extend(std::iter::repeat('=').take(padding_needed));
    }
    text
}

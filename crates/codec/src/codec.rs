//! [`IdentifierCodec`]: transport decode, decrypt, and parse in one call.

use tracing::debug;

use common::{AgentIdentifierRecord, CodecError, Stage};

use crate::crypto::{decrypt_cbc, CipherError, CodecKey};
use crate::record::{parse_record, RecordError};
use crate::transport::{Envelope, TransportError};

/// Decrypts and parses encrypted agent identifiers with one fixed key.
///
/// Holds only an immutable key after construction, so one instance can be
/// shared across threads and used concurrently.
#[derive(Debug, Clone)]
pub struct IdentifierCodec {
    key: CodecKey,
}

impl IdentifierCodec {
    /// Create a codec from raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Configuration`] unless `key` is exactly 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            key: CodecKey::from_bytes(key)?,
        })
    }

    /// Create a codec from a text key; its UTF-8 byte length must be 32.
    pub fn from_key_str(key: &str) -> Result<Self, CodecError> {
        Ok(Self {
            key: CodecKey::from_text(key)?,
        })
    }

    /// Decrypt an encoded identifier to its plaintext without parsing it.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TransportDecode`] for malformed envelopes and
    /// [`CodecError::Crypto`] when decryption, unpadding, or UTF-8 decoding fails.
    pub fn decrypt(&self, encoded: &str) -> Result<String, CodecError> {
        let envelope = Envelope::open(encoded).map_err(transport_error)?;
        let plaintext =
            decrypt_cbc(&self.key, &envelope.iv, &envelope.ciphertext).map_err(cipher_error)?;
        String::from_utf8(plaintext).map_err(|e| CodecError::Crypto {
            stage: Stage::Utf8Decode,
            source: Box::new(e.utf8_error()),
        })
    }

    /// Decrypt and parse an encoded identifier.
    ///
    /// # Errors
    ///
    /// Any [`Self::decrypt`] error, or [`CodecError::Parse`] if the plaintext is
    /// not a 4-field record with an integer region id.
    pub fn decode(&self, encoded: &str) -> Result<AgentIdentifierRecord, CodecError> {
        let result = self
            .decrypt(encoded)
            .and_then(|text| parse_record(&text).map_err(|e| record_error(e, text)));
        match &result {
            Ok(record) => debug!(region_id = record.region_id, "agent identifier decoded"),
            Err(e) => debug!(kind = %e.kind(), stage = %e.stage(), error = %e, "agent identifier rejected"),
        }
        result
    }
}

fn transport_error(e: TransportError) -> CodecError {
    CodecError::TransportDecode {
        stage: e.stage(),
        source: Box::new(e),
    }
}

fn cipher_error(e: CipherError) -> CodecError {
    match e {
        // Length is validated by the envelope; reaching here is still a transport fault.
        CipherError::Misaligned(_) => CodecError::TransportDecode {
            stage: Stage::EnvelopeSplit,
            source: Box::new(e),
        },
        CipherError::Init => CodecError::Crypto {
            stage: Stage::Decrypt,
            source: Box::new(e),
        },
        CipherError::BadPadding => CodecError::Crypto {
            stage: Stage::Unpad,
            source: Box::new(e),
        },
    }
}

fn record_error(e: RecordError, decrypted: String) -> CodecError {
    CodecError::Parse {
        stage: e.stage(),
        reason: e.to_string(),
        decrypted,
    }
}

//! Decrypt-and-parse codec for encrypted agent identifiers.
//!
//! An agent identifier is `base64url-no-pad([16-byte IV][AES-256-CBC ciphertext])`
//! whose PKCS#7-unpadded UTF-8 plaintext reads
//! `<region_id>_<region_name>_<account_id>_<bot_id>`.
//!
//! ```text
//! encoded ──► transport::Envelope::open ──► crypto::decrypt_cbc ──► UTF-8 ──► record::parse_record
//! ```
//!
//! Every failure is returned as a [`CodecError`] tagged with the [`Stage`] that
//! rejected the input.

pub mod codec;
pub mod crypto;
pub mod record;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use codec::IdentifierCodec;
pub use common::{AgentIdentifierRecord, CodecError, ErrorKind, Stage};

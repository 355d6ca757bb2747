//! AES-256-CBC decryption primitives.
//!
//! This module is free of transport and record concerns. It provides the key
//! type and the block-level decrypt operation used by the codec.
//!
//! # Ciphertext format
//!
//! ```text
//! [16-byte IV][AES-256-CBC(PKCS#7(plaintext))]
//! ```

pub mod cipher;
pub mod key;

pub use cipher::{decrypt_cbc, CipherError, BLOCK_LEN, IV_LEN};
pub use key::{CodecKey, KEY_LEN};

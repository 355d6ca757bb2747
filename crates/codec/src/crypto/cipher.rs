//! AES-256-CBC decryption with PKCS#7 padding removal.
//!
//! Ciphertext is not authenticated. A wrong key or tampered ciphertext is
//! usually caught by the padding check, occasionally only by the UTF-8 or
//! record checks that follow.

use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, KeyIvInit};
use thiserror::Error;

use super::key::CodecKey;

/// AES block size in bytes; also the IV length.
pub const BLOCK_LEN: usize = 16;

/// Byte length of the CBC initialisation vector.
pub const IV_LEN: usize = BLOCK_LEN;

type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// Ciphertext length is zero or not a whole number of blocks.
    #[error("ciphertext length {0} is not a non-zero multiple of {BLOCK_LEN}")]
    Misaligned(usize),

    /// The block cipher rejected the key or IV.
    #[error("cipher initialisation failed")]
    Init,

    /// The final block does not end in valid PKCS#7 padding.
    #[error("invalid PKCS#7 padding")]
    BadPadding,
}

/// Decrypt `ciphertext` with AES-256-CBC and strip its PKCS#7 padding.
///
/// # Errors
///
/// Returns [`CipherError::Misaligned`] for empty or partial-block input,
/// [`CipherError::Init`] if the cipher cannot be keyed, and
/// [`CipherError::BadPadding`] if the last byte is not in `1..=16` or the
/// padding bytes disagree.
pub fn decrypt_cbc(
    key: &CodecKey,
    iv: &[u8; IV_LEN],
    ciphertext: &[u8],
) -> Result<Vec<u8>, CipherError> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(CipherError::Misaligned(ciphertext.len()));
    }
    let cipher =
        Aes256CbcDec::new_from_slices(key.as_bytes(), iv).map_err(|_| CipherError::Init)?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CipherError::BadPadding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::encrypt_cbc;

    fn key(byte: u8) -> CodecKey {
        CodecKey::from_bytes(&[byte; crate::crypto::KEY_LEN]).unwrap()
    }

    #[test]
    fn decrypt_round_trip() {
        let iv = [7u8; IV_LEN];
        let ciphertext = encrypt_cbc(&[0x11; 32], &iv, b"3_apac_acct_bot");
        let plaintext = decrypt_cbc(&key(0x11), &iv, &ciphertext).unwrap();
        assert_eq!(plaintext, b"3_apac_acct_bot");
    }

    #[test]
    fn full_block_plaintext_gets_a_padding_block() {
        let iv = [0u8; IV_LEN];
        let ciphertext = encrypt_cbc(&[0x11; 32], &iv, b"9_region_acct_bt");
        assert_eq!(ciphertext.len(), 2 * BLOCK_LEN);
        let plaintext = decrypt_cbc(&key(0x11), &iv, &ciphertext).unwrap();
        assert_eq!(plaintext, b"9_region_acct_bt");
    }

    #[test]
    fn rejects_empty_and_partial_blocks() {
        let iv = [0u8; IV_LEN];
        assert!(matches!(
            decrypt_cbc(&key(1), &iv, &[]),
            Err(CipherError::Misaligned(0))
        ));
        assert!(matches!(
            decrypt_cbc(&key(1), &iv, &[0u8; 17]),
            Err(CipherError::Misaligned(17))
        ));
    }

    #[test]
    fn tampered_iv_fails_padding() {
        let iv = [3u8; IV_LEN];
        let ciphertext = encrypt_cbc(&[0x22; 32], &iv, b"1_a_b_c");
        // Single block: the last IV byte XORs straight into the 0x09 pad byte.
        let mut tampered_iv = iv;
        tampered_iv[IV_LEN - 1] ^= 0xFF;
        assert!(matches!(
            decrypt_cbc(&key(0x22), &tampered_iv, &ciphertext),
            Err(CipherError::BadPadding)
        ));
    }

    #[test]
    fn wrong_key_fails() {
        let iv = [5u8; IV_LEN];
        let ciphertext = encrypt_cbc(&[0x33; 32], &iv, b"5_uswest_acct123_bot456");
        // Either the padding check or (rarely) UTF-8 decoding catches this; the
        // plaintext never matches.
        match decrypt_cbc(&key(0x44), &iv, &ciphertext) {
            Err(CipherError::BadPadding) => {}
            Ok(bytes) => assert_ne!(bytes, b"5_uswest_acct123_bot456"),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
}

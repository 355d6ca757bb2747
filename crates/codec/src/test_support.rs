//! Encrypting counterpart of the codec, used only to build test fixtures.

use aes::Aes256;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use cbc::cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit};

use crate::crypto::{IV_LEN, KEY_LEN};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;

pub fn random_key() -> [u8; KEY_LEN] {
    rand::random()
}

pub fn random_iv() -> [u8; IV_LEN] {
    rand::random()
}

/// AES-256-CBC with PKCS#7 padding; returns the ciphertext without the IV.
pub fn encrypt_cbc(key: &[u8], iv: &[u8; IV_LEN], plaintext: &[u8]) -> Vec<u8> {
    Aes256CbcEnc::new_from_slices(key, iv)
        .expect("test key and IV lengths")
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

/// Build an identifier the way producers do: `base64url-no-pad(iv || ciphertext)`.
pub fn encode_identifier(key: &[u8], iv: &[u8; IV_LEN], plaintext: &str) -> String {
    let mut payload = iv.to_vec();
    payload.extend(encrypt_cbc(key, iv, plaintext.as_bytes()));
    URL_SAFE_NO_PAD.encode(payload)
}

//! [`CodecKey`]: the AES-256 key held by an identifier codec.

use common::CodecError;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Fixed-size key buffer that holds exactly [`KEY_LEN`] bytes.
///
/// When this type is dropped, the memory is overwritten with zeroes to
/// minimise the window during which key material lives in RAM.
#[derive(Clone)]
pub struct CodecKey(Box<[u8; KEY_LEN]>);

impl CodecKey {
    /// Copy `key_bytes` into a new key buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Configuration`] if the slice is empty or is not
    /// exactly [`KEY_LEN`] bytes.
    pub fn from_bytes(key_bytes: &[u8]) -> Result<Self, CodecError> {
        if key_bytes.len() != KEY_LEN {
            return Err(CodecError::Configuration {
                expected: KEY_LEN,
                actual: key_bytes.len(),
            });
        }
        let mut buf = Box::new([0u8; KEY_LEN]);
        buf.copy_from_slice(key_bytes);
        Ok(Self(buf))
    }

    /// Build a key from text, counting the bytes of its UTF-8 encoding.
    ///
    /// A 32-character key that contains a multi-byte character is longer than
    /// [`KEY_LEN`] bytes and is rejected.
    pub fn from_text(key: &str) -> Result<Self, CodecError> {
        Self::from_bytes(key.as_bytes())
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Drop for CodecKey {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for CodecKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("CodecKey([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{ErrorKind, Stage};

    #[test]
    fn accepts_exact_length() {
        let key = CodecKey::from_bytes(&[0x42u8; KEY_LEN]).unwrap();
        assert_eq!(key.as_bytes(), &[0x42u8; KEY_LEN]);
    }

    #[test]
    fn rejects_wrong_lengths() {
        for len in [0usize, 1, 16, 24, 31, 33, 64] {
            let err = CodecKey::from_bytes(&vec![0u8; len]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration, "len {len}");
            assert_eq!(err.stage(), Stage::KeyValidation);
            assert!(matches!(
                err,
                CodecError::Configuration { expected: KEY_LEN, actual } if actual == len
            ));
        }
    }

    #[test]
    fn text_length_is_counted_in_utf8_bytes() {
        // 32 characters, 33 bytes.
        let key = "é0123456789012345678901234567890";
        assert_eq!(key.chars().count(), 32);
        assert!(CodecKey::from_text(key).is_err());

        // 16 characters, 32 bytes.
        let key = "éééééééééééééééé";
        assert!(CodecKey::from_text(key).is_ok());
    }

    #[test]
    fn redacted_in_debug() {
        let key = CodecKey::from_text("N8oMKbH4JXdT29jVgQWpF2szxL6YT1e5").unwrap();
        let printed = format!("{key:?}");
        assert!(printed.contains("REDACTED"));
        assert!(!printed.contains("N8oM"));
    }
}

//! Envelope encryption of the per-vault content key.
//!
//! A random 32-byte content key encrypts the payload; the password
//! only ever protects that key.  Wrapping is AES-256-GCM over the
//! content key's raw bytes under the password-derived wrapping key,
//! so a wrong password surfaces as an authentication failure on
//! unwrap — there is no separate password-check field to probe.

use aes_gcm::aead::{KeyInit, OsRng};
use aes_gcm::Aes256Gcm;
use zeroize::Zeroize;

use super::cipher::{self, IV_LEN};
use super::kdf::WrappingKey;
use crate::errors::{Result, VaultPackError};

/// Length of the content key in bytes (256 bits).
const KEY_LEN: usize = 32;

/// A random per-vault content key, zeroed on drop.
///
/// Exists in plaintext only transiently: generated during seal and
/// immediately wrapped, or reconstructed during open and used once.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct ContentKey {
    bytes: [u8; KEY_LEN],
}

impl ContentKey {
    /// Access the raw key bytes (to pass to the payload cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

/// Generate a fresh random content key from the OS CSPRNG.
pub fn generate_content_key() -> ContentKey {
    let key = Aes256Gcm::generate_key(&mut OsRng);
    let mut bytes = [0u8; KEY_LEN];
    bytes.copy_from_slice(&key);
    ContentKey { bytes }
}

/// Encrypt the content key under the wrapping key.
///
/// Returns the fresh random IV and the wrapped key (32 bytes of key
/// material plus the 16-byte auth tag).  A new IV is generated on
/// every call; IVs are never reused.
pub fn wrap_content_key(
    content_key: &ContentKey,
    wrapping_key: &WrappingKey,
) -> Result<([u8; IV_LEN], Vec<u8>)> {
    cipher::encrypt(wrapping_key.as_bytes(), content_key.as_bytes())
}

/// Decrypt the content key with the wrapping key.
///
/// Fails with an authentication error if the wrapping key is wrong
/// (wrong password) or the wrapped bytes were tampered with.
pub fn unwrap_content_key(
    wrapped_key: &[u8],
    iv: &[u8],
    wrapping_key: &WrappingKey,
) -> Result<ContentKey> {
    let mut plaintext = cipher::decrypt(wrapping_key.as_bytes(), iv, wrapped_key)?;

    if plaintext.len() != KEY_LEN {
        plaintext.zeroize();
        return Err(VaultPackError::InvalidFormat(format!(
            "wrapped content key must decrypt to {KEY_LEN} bytes"
        )));
    }

    let mut bytes = [0u8; KEY_LEN];
    bytes.copy_from_slice(&plaintext);
    plaintext.zeroize();
    Ok(ContentKey { bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::kdf::{derive_wrapping_key, generate_salt, KdfParams};

    fn test_wrapping_key(password: &[u8], salt: &[u8]) -> WrappingKey {
        let params = KdfParams {
            iterations: 10_000,
            ..KdfParams::default()
        };
        derive_wrapping_key(password, salt, &params).unwrap()
    }

    #[test]
    fn wrap_unwrap_roundtrip() {
        let salt = generate_salt();
        let wrapping = test_wrapping_key(b"correct-horse", &salt);
        let content = generate_content_key();

        let (iv, wrapped) = wrap_content_key(&content, &wrapping).unwrap();
        let recovered = unwrap_content_key(&wrapped, &iv, &wrapping).unwrap();
        assert_eq!(recovered.as_bytes(), content.as_bytes());
    }

    #[test]
    fn unwrap_with_wrong_password_fails() {
        let salt = generate_salt();
        let wrapping = test_wrapping_key(b"correct-horse", &salt);
        let wrong = test_wrapping_key(b"battery-staple", &salt);
        let content = generate_content_key();

        let (iv, wrapped) = wrap_content_key(&content, &wrapping).unwrap();
        assert!(matches!(
            unwrap_content_key(&wrapped, &iv, &wrong),
            Err(VaultPackError::Authentication)
        ));
    }

    #[test]
    fn unwrap_tampered_key_fails() {
        let salt = generate_salt();
        let wrapping = test_wrapping_key(b"correct-horse", &salt);
        let content = generate_content_key();

        let (iv, mut wrapped) = wrap_content_key(&content, &wrapping).unwrap();
        wrapped[3] ^= 0x01;
        assert!(matches!(
            unwrap_content_key(&wrapped, &iv, &wrapping),
            Err(VaultPackError::Authentication)
        ));
    }

    #[test]
    fn content_keys_are_unique() {
        let k1 = generate_content_key();
        let k2 = generate_content_key();
        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }
}

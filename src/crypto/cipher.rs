//! AES-256-GCM authenticated encryption of the vault payload.
//!
//! Each call to `encrypt` generates a fresh random 12-byte IV and
//! returns it next to the ciphertext.  The blob codec is responsible
//! for joining the two into the `iv || ciphertext+tag` wire layout.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultPackError};

/// Size of the AES-GCM IV in bytes.
pub const IV_LEN: usize = 12;

/// Name of the only supported cipher.
pub const CIPHER_ALGORITHM: &str = "AES-GCM";

/// Key length in bits.
pub const CIPHER_KEY_BITS: u32 = 256;

/// Cipher parameters recorded in the key file at seal time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherParams {
    /// Cipher identifier (currently always "AES-GCM").
    pub algorithm: String,

    /// Key length in bits (currently always 256).
    pub key_length: u32,
}

impl Default for CipherParams {
    fn default() -> Self {
        Self {
            algorithm: CIPHER_ALGORITHM.to_string(),
            key_length: CIPHER_KEY_BITS,
        }
    }
}

impl CipherParams {
    /// Check that these parameters name a cipher this build can run.
    pub fn validate(&self) -> Result<()> {
        if self.algorithm != CIPHER_ALGORITHM {
            return Err(VaultPackError::InvalidFormat(format!(
                "unsupported cipher '{}'",
                self.algorithm
            )));
        }
        if self.key_length != CIPHER_KEY_BITS {
            return Err(VaultPackError::InvalidFormat(format!(
                "unsupported key length {} bits",
                self.key_length
            )));
        }
        Ok(())
    }
}

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns the fresh random IV and the ciphertext (auth tag appended
/// by the AEAD) as separate buffers.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<([u8; IV_LEN], Vec<u8>)> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| VaultPackError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| VaultPackError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut iv = [0u8; IV_LEN];
    iv.copy_from_slice(&nonce);
    Ok((iv, ciphertext))
}

/// Decrypt data that was produced by `encrypt`.
///
/// Fails closed on tag mismatch: no partial plaintext ever escapes.
pub fn decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    if iv.len() != IV_LEN {
        return Err(VaultPackError::InvalidFormat(format!(
            "IV must be exactly {IV_LEN} bytes, got {}",
            iv.len()
        )));
    }

    let nonce = Nonce::from_slice(iv);

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| VaultPackError::Authentication)?;

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| VaultPackError::Authentication)
}

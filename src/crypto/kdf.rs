//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The iteration count is deliberately high so brute-forcing a stolen
//! key file stays expensive.  The parameters used at seal time are
//! recorded in the key file (`KdfParams`), and `open` always re-derives
//! with the stored values rather than the compiled-in defaults.

use pbkdf2::pbkdf2_hmac;
use rand::TryRngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroize;

use crate::errors::{Result, VaultPackError};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived wrapping key in bytes (256 bits, for AES-256).
const KEY_LEN: usize = 32;

/// PBKDF2 iteration count used for new vaults.
pub const DEFAULT_ITERATIONS: u32 = 250_000;

/// Minimum iteration count accepted when deriving.
///
/// Rejects key files with dangerously weak work factors while still
/// accepting older vaults sealed with lower-than-current defaults.
pub const MIN_ITERATIONS: u32 = 10_000;

/// Name of the only supported KDF algorithm.
pub const KDF_ALGORITHM: &str = "PBKDF2";

/// Name of the only supported PRF hash.
pub const KDF_HASH: &str = "SHA-256";

/// KDF parameters recorded in the key file at seal time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// KDF algorithm identifier (currently always "PBKDF2").
    pub algorithm: String,

    /// PBKDF2 iteration count.
    pub iterations: u32,

    /// PRF hash identifier (currently always "SHA-256").
    pub hash: String,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            algorithm: KDF_ALGORITHM.to_string(),
            iterations: DEFAULT_ITERATIONS,
            hash: KDF_HASH.to_string(),
        }
    }
}

impl KdfParams {
    /// Check that these parameters name a KDF this build can run.
    ///
    /// Key files are self-describing, so a file produced by a future
    /// version could name an algorithm we do not know — that is a
    /// format error, not an authentication failure.
    pub fn validate(&self) -> Result<()> {
        if self.algorithm != KDF_ALGORITHM {
            return Err(VaultPackError::InvalidFormat(format!(
                "unsupported KDF algorithm '{}'",
                self.algorithm
            )));
        }
        if self.hash != KDF_HASH {
            return Err(VaultPackError::InvalidFormat(format!(
                "unsupported KDF hash '{}'",
                self.hash
            )));
        }
        if self.iterations < MIN_ITERATIONS {
            return Err(VaultPackError::InvalidFormat(format!(
                "KDF iterations must be at least {MIN_ITERATIONS} (got {})",
                self.iterations
            )));
        }
        Ok(())
    }
}

/// A 32-byte password-derived wrapping key, zeroed on drop.
///
/// The wrapping key only ever encrypts the content key, never the
/// payload itself.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct WrappingKey {
    bytes: [u8; KEY_LEN],
}

impl WrappingKey {
    /// Access the raw key bytes (to pass to the envelope layer).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

/// Derive a 32-byte wrapping key from a password and salt.
///
/// Deterministic: the same password + salt + params always produce the
/// same key, which is what makes `open` possible at all.
pub fn derive_wrapping_key(
    password: &[u8],
    salt: &[u8],
    params: &KdfParams,
) -> Result<WrappingKey> {
    params.validate()?;

    if salt.len() != SALT_LEN {
        return Err(VaultPackError::KeyDerivationFailed(format!(
            "salt must be exactly {SALT_LEN} bytes, got {}",
            salt.len()
        )));
    }

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password, salt, params.iterations, &mut key);

    Ok(WrappingKey { bytes: key })
}

/// Generate a cryptographically random 16-byte salt.
///
/// An OS RNG failure is unrecoverable, so this panics rather than
/// returning a salt that was never filled.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng
        .try_fill_bytes(&mut salt)
        .expect("OS RNG failure");
    salt
}

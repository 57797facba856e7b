//! The key file: a human-inspectable JSON record holding everything
//! `open` needs to rebuild the content key — except the password.
//!
//! Example:
//!
//! ```json
//! {
//!   "version": 1,
//!   "salt": "qL5...base64...",
//!   "key_wrap_iv": "Jd2...base64...",
//!   "wrapped_content_key": "X0f...base64...",
//!   "kdf_params": { "algorithm": "PBKDF2", "iterations": 250000, "hash": "SHA-256" },
//!   "cipher_params": { "algorithm": "AES-GCM", "key_length": 256 }
//! }
//! ```
//!
//! The KDF and cipher parameters are stored per artifact rather than
//! compiled in, so old vaults keep opening after defaults change.

use serde::{Deserialize, Serialize};

use crate::crypto::{CipherParams, KdfParams, IV_LEN, SALT_LEN};
use crate::errors::{Result, VaultPackError};

use super::codec::{base64_decode, base64_encode};

/// Current key file format version.
pub const CURRENT_VERSION: u8 = 1;

/// The persisted key file record.  Write-once: a new vault always gets
/// a fresh key file, never an updated one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFile {
    /// Format version.
    pub version: u8,

    /// The salt used for PBKDF2 key derivation (base64 in JSON).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub salt: Vec<u8>,

    /// IV used when wrapping the content key (base64 in JSON).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub key_wrap_iv: Vec<u8>,

    /// The content key encrypted under the wrapping key (base64 in JSON).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub wrapped_content_key: Vec<u8>,

    /// KDF parameters used at seal time.
    pub kdf_params: KdfParams,

    /// Cipher parameters used at seal time.
    pub cipher_params: CipherParams,
}

impl KeyFile {
    /// Render the key file as pretty-printed JSON for the user to store.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| VaultPackError::SerializationError(format!("key file: {e}")))
    }

    /// Parse and structurally validate a key file.
    ///
    /// All checks here are purely structural and run before any key
    /// derivation or decryption is attempted.
    pub fn from_json(text: &str) -> Result<Self> {
        let keyfile: KeyFile = serde_json::from_str(text)
            .map_err(|e| VaultPackError::InvalidFormat(format!("key file JSON: {e}")))?;
        keyfile.validate()?;
        Ok(keyfile)
    }

    fn validate(&self) -> Result<()> {
        if self.version != CURRENT_VERSION {
            return Err(VaultPackError::InvalidFormat(format!(
                "unsupported key file version {}, expected {CURRENT_VERSION}",
                self.version
            )));
        }
        if self.salt.len() != SALT_LEN {
            return Err(VaultPackError::InvalidFormat(format!(
                "salt must be {SALT_LEN} bytes, got {}",
                self.salt.len()
            )));
        }
        if self.key_wrap_iv.len() != IV_LEN {
            return Err(VaultPackError::InvalidFormat(format!(
                "key wrap IV must be {IV_LEN} bytes, got {}",
                self.key_wrap_iv.len()
            )));
        }
        if self.wrapped_content_key.is_empty() {
            return Err(VaultPackError::InvalidFormat(
                "wrapped content key is empty".into(),
            ));
        }
        self.kdf_params.validate()?;
        self.cipher_params.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> KeyFile {
        KeyFile {
            version: CURRENT_VERSION,
            salt: vec![1u8; SALT_LEN],
            key_wrap_iv: vec![2u8; IV_LEN],
            wrapped_content_key: vec![3u8; 48],
            kdf_params: KdfParams::default(),
            cipher_params: CipherParams::default(),
        }
    }

    #[test]
    fn json_roundtrip() {
        let kf = sample();
        let json = kf.to_json().unwrap();
        let parsed = KeyFile::from_json(&json).unwrap();
        assert_eq!(parsed, kf);
    }

    #[test]
    fn json_is_human_inspectable() {
        let json = sample().to_json().unwrap();
        assert!(json.contains("\"kdf_params\""));
        assert!(json.contains("\"iterations\": 250000"));
        assert!(json.contains("\"algorithm\": \"AES-GCM\""));
    }

    #[test]
    fn missing_salt_is_a_format_error() {
        let mut value: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        value.as_object_mut().unwrap().remove("salt");
        let text = value.to_string();

        assert!(matches!(
            KeyFile::from_json(&text),
            Err(VaultPackError::InvalidFormat(_))
        ));
    }

    #[test]
    fn invalid_base64_is_a_format_error() {
        let mut value: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        value["wrapped_content_key"] = serde_json::json!("not base64!!!");
        let text = value.to_string();

        assert!(matches!(
            KeyFile::from_json(&text),
            Err(VaultPackError::InvalidFormat(_))
        ));
    }

    #[test]
    fn wrong_salt_length_is_a_format_error() {
        let mut kf = sample();
        kf.salt = vec![1u8; 8];
        let json = kf.to_json().unwrap();
        assert!(KeyFile::from_json(&json).is_err());
    }

    #[test]
    fn unsupported_version_is_a_format_error() {
        let mut kf = sample();
        kf.version = 2;
        let json = kf.to_json().unwrap();
        assert!(KeyFile::from_json(&json).is_err());
    }

    #[test]
    fn unknown_kdf_algorithm_is_a_format_error() {
        let mut kf = sample();
        kf.kdf_params.algorithm = "bcrypt".into();
        let json = kf.to_json().unwrap();
        assert!(KeyFile::from_json(&json).is_err());
    }
}

//! Cryptographic primitives for VaultPack.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 password-based key derivation (`kdf`)
//! - Content-key generation and envelope wrap/unwrap (`envelope`)
//! - AES-256-GCM payload encryption and decryption (`cipher`)

pub mod cipher;
pub mod envelope;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{derive_wrapping_key, generate_content_key, ...};
pub use cipher::{decrypt, encrypt, CipherParams, IV_LEN};
pub use envelope::{generate_content_key, unwrap_content_key, wrap_content_key, ContentKey};
pub use kdf::{derive_wrapping_key, generate_salt, KdfParams, WrappingKey, SALT_LEN};

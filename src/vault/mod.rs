//! Vault sealing and opening.
//!
//! `seal` and `open` are the only two entry points and the inverse of
//! each other.  Both are single linear pipelines with no shared state:
//! a failure at any stage aborts the whole call, and nothing partial
//! is ever returned.  Concurrent calls are independent — every seal
//! generates a fresh salt, content key, and IVs.

pub mod codec;
pub mod content;
pub mod keyfile;

pub use content::{VaultContent, VaultFile};
pub use keyfile::KeyFile;

use zeroize::Zeroize;

use crate::crypto::{
    cipher, derive_wrapping_key, generate_content_key, generate_salt, unwrap_content_key,
    wrap_content_key, CipherParams, KdfParams,
};
use crate::errors::{Result, VaultPackError};

/// Seal vault content under a password, using the default KDF work
/// factor.
///
/// Returns the encrypted blob and the key file JSON.  Both artifacts
/// are required to open the vault again, along with the password.
pub fn seal(content: &VaultContent, password: &str) -> Result<(Vec<u8>, String)> {
    seal_with_params(content, password, &KdfParams::default())
}

/// Seal vault content with explicit KDF parameters.
///
/// The parameters end up in the key file, so a vault sealed with a
/// higher (or lower) work factor still opens correctly later.
pub fn seal_with_params(
    content: &VaultContent,
    password: &str,
    kdf_params: &KdfParams,
) -> Result<(Vec<u8>, String)> {
    if password.is_empty() {
        return Err(VaultPackError::InvalidInput(
            "password must not be empty".into(),
        ));
    }

    // 1. Derive the wrapping key from the password and a fresh salt.
    let salt = generate_salt();
    let wrapping_key = derive_wrapping_key(password.as_bytes(), &salt, kdf_params)?;

    // 2. Generate the content key and wrap it under the wrapping key.
    let content_key = generate_content_key();
    let (key_wrap_iv, wrapped_content_key) = wrap_content_key(&content_key, &wrapping_key)?;

    // 3. Encrypt the serialized payload with the content key.
    let mut payload = codec::serialize_content(content)?;
    let encrypted = cipher::encrypt(content_key.as_bytes(), &payload);
    payload.zeroize();
    let (data_iv, ciphertext) = encrypted?;

    // 4. Frame both artifacts.
    let blob = codec::frame_blob(&data_iv, &ciphertext);
    let key_file = KeyFile {
        version: keyfile::CURRENT_VERSION,
        salt: salt.to_vec(),
        key_wrap_iv: key_wrap_iv.to_vec(),
        wrapped_content_key,
        kdf_params: kdf_params.clone(),
        cipher_params: CipherParams::default(),
    };

    Ok((blob, key_file.to_json()?))
}

/// Open an encrypted blob with its key file and password.
///
/// Format checks run first; only then does the (slow) key derivation
/// start.  A wrong password and a tampered key file both surface as
/// the same authentication error.
pub fn open(blob: &[u8], key_file_json: &str, password: &str) -> Result<VaultContent> {
    if password.is_empty() {
        return Err(VaultPackError::InvalidInput(
            "password must not be empty".into(),
        ));
    }

    // 1. Parse both artifacts before touching any crypto.
    let key_file = KeyFile::from_json(key_file_json)?;
    let (data_iv, ciphertext) = codec::parse_blob(blob)?;

    // 2. Re-derive the wrapping key with the stored salt and params.
    let wrapping_key =
        derive_wrapping_key(password.as_bytes(), &key_file.salt, &key_file.kdf_params)?;

    // 3. Unwrap the content key.  This is where a wrong password fails.
    let content_key = unwrap_content_key(
        &key_file.wrapped_content_key,
        &key_file.key_wrap_iv,
        &wrapping_key,
    )?;

    // 4. Decrypt and deserialize the payload.
    let mut payload = cipher::decrypt(content_key.as_bytes(), data_iv, ciphertext)?;
    let content = codec::deserialize_content(&payload);
    payload.zeroize();
    content
}

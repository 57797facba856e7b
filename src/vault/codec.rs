//! Payload serialization and encrypted-blob framing.
//!
//! The plaintext payload is the `VaultContent` serialized as JSON with
//! file bytes base64-encoded.  The encrypted blob on disk is framed as:
//!
//! ```text
//! [ 12-byte data IV | ciphertext + 16-byte auth tag ]
//! ```
//!
//! No length field is needed: the ciphertext is everything after the
//! IV prefix.

use crate::crypto::IV_LEN;
use crate::errors::{Result, VaultPackError};

use super::content::VaultContent;

/// Serialize vault content to the plaintext payload bytes.
pub fn serialize_content(content: &VaultContent) -> Result<Vec<u8>> {
    serde_json::to_vec(content)
        .map_err(|e| VaultPackError::SerializationError(format!("vault content: {e}")))
}

/// Deserialize the decrypted payload bytes back into vault content.
///
/// Only ever called on authenticated plaintext, so a parse failure here
/// means the sealing side produced an incompatible payload.
pub fn deserialize_content(payload: &[u8]) -> Result<VaultContent> {
    serde_json::from_slice(payload)
        .map_err(|e| VaultPackError::InvalidFormat(format!("vault payload JSON: {e}")))
}

/// Join the data IV and ciphertext into the on-disk blob layout.
pub fn frame_blob(iv: &[u8; IV_LEN], ciphertext: &[u8]) -> Vec<u8> {
    let mut blob = Vec::with_capacity(IV_LEN + ciphertext.len());
    blob.extend_from_slice(iv);
    blob.extend_from_slice(ciphertext);
    blob
}

/// Split an encrypted blob into its IV prefix and ciphertext.
///
/// Fails if the blob is shorter than the IV — such a file cannot have
/// been produced by `seal` and is rejected before any crypto runs.
pub fn parse_blob(blob: &[u8]) -> Result<(&[u8], &[u8])> {
    if blob.len() < IV_LEN {
        return Err(VaultPackError::InvalidFormat(format!(
            "encrypted blob is truncated: {} bytes, need at least {IV_LEN}",
            blob.len()
        )));
    }
    Ok(blob.split_at(IV_LEN))
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::content::VaultFile;

    #[test]
    fn content_roundtrip_with_binary_file() {
        let content = VaultContent {
            note: "multi\nline\nnote".into(),
            files: vec![VaultFile {
                name: "blob.bin".into(),
                mime_type: "application/octet-stream".into(),
                bytes: (0u8..=255).collect(),
            }],
        };

        let payload = serialize_content(&content).unwrap();
        let recovered = deserialize_content(&payload).unwrap();
        assert_eq!(recovered, content);
    }

    #[test]
    fn content_json_uses_wire_field_names() {
        let content = VaultContent {
            note: "n".into(),
            files: vec![VaultFile {
                name: "a.txt".into(),
                mime_type: "text/plain".into(),
                bytes: b"hi".to_vec(),
            }],
        };

        let json = String::from_utf8(serialize_content(&content).unwrap()).unwrap();
        assert!(json.contains("\"type\":\"text/plain\""));
        assert!(json.contains("\"data\":\"aGk=\""));
    }

    #[test]
    fn blob_framing_roundtrip() {
        let iv = [7u8; IV_LEN];
        let ct = vec![1, 2, 3, 4];

        let blob = frame_blob(&iv, &ct);
        let (parsed_iv, parsed_ct) = parse_blob(&blob).unwrap();
        assert_eq!(parsed_iv, iv);
        assert_eq!(parsed_ct, ct.as_slice());
    }

    #[test]
    fn blob_shorter_than_iv_is_a_format_error() {
        let result = parse_blob(&[0u8; IV_LEN - 1]);
        assert!(matches!(result, Err(VaultPackError::InvalidFormat(_))));
    }

    #[test]
    fn blob_of_exactly_iv_length_parses_with_empty_ciphertext() {
        let (iv, ct) = parse_blob(&[9u8; IV_LEN]).unwrap();
        assert_eq!(iv.len(), IV_LEN);
        assert!(ct.is_empty());
    }
}

//! The logical content of a vault: one note plus embedded files.

use serde::{Deserialize, Serialize};

// Re-use the base64 serde helpers from codec.rs (no duplication).
use super::codec::{base64_decode, base64_encode};

/// A file embedded in a vault.
///
/// Files are stored by value — name, MIME type, and raw bytes — not as
/// filesystem references, so a vault is fully self-contained.  Names
/// are carried verbatim: the core neither sanitizes nor deduplicates
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultFile {
    /// Original file name (e.g. "photo.jpg").
    pub name: String,

    /// MIME type (e.g. "image/jpeg").
    #[serde(rename = "type")]
    pub mime_type: String,

    /// The file's raw bytes.  Serialized as a base64 string in JSON.
    #[serde(
        rename = "data",
        serialize_with = "base64_encode",
        deserialize_with = "base64_decode"
    )]
    pub bytes: Vec<u8>,
}

/// Everything sealed into a vault: a free-form note and a list of files.
///
/// The core accepts any combination, including an empty note with no
/// files; callers that want "at least something" enforce it themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultContent {
    /// Free-form text note (possibly empty).
    pub note: String,

    /// Embedded files, in the order they were added.
    pub files: Vec<VaultFile>,
}

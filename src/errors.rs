use thiserror::Error;

/// All errors that can occur in VaultPack.
#[derive(Debug, Error)]
pub enum VaultPackError {
    // --- Caller precondition errors ---
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // --- Format errors ---
    #[error("Invalid vault format: {0}")]
    InvalidFormat(String),

    // --- Crypto errors ---
    //
    // Authentication intentionally carries no detail: the caller must not
    // be able to tell a wrong password apart from tampered ciphertext.
    #[error("Decryption failed — wrong password or corrupted data")]
    Authentication,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for VaultPack results.
pub type Result<T> = std::result::Result<T, VaultPackError>;

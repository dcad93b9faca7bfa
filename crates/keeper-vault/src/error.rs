//! # Vault Error Types
//!
//! Errors at the storage boundary. The codec surfaces failures explicitly as
//! `Err` values; the *store* owns the degrade-to-default policy for loads, so
//! silent plaintext fallback is a visible decision there, not something baked
//! into the codec.

use thiserror::Error;

/// Storage boundary errors.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Encryption failed.
    #[error("Encryption failed: {0}")]
    Encrypt(String),

    /// Decryption failed (wrong key, truncated payload, tampered data).
    #[error("Decryption failed: {0}")]
    Decrypt(String),

    /// The payload does not carry the codec's envelope prefix.
    #[error("Payload is not ciphertext (missing envelope prefix)")]
    NotCiphertext,

    /// The base64 envelope could not be decoded.
    #[error("Malformed ciphertext envelope: {0}")]
    MalformedEnvelope(String),

    /// JSON (de)serialization failed.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Underlying file I/O failed.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for vault operations.
pub type VaultResult<T> = Result<T, VaultError>;

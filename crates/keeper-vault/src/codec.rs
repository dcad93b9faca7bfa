//! # Secure Storage Codec
//!
//! Symmetric encryption applied to serialized values at the storage boundary.
//!
//! ## Key Derivation
//! The AES-256 key is derived deterministically: SHA-256 over the application
//! secret concatenated with ambient machine signals (OS, architecture, user
//! name). The same machine/user context always re-derives the same key, so
//! nothing key-shaped is ever persisted.
//!
//! **Security note**: the inputs to the derivation are not secrets. Any code
//! running in the same context can reproduce the key, so this provides
//! obfuscation of data at rest, not confidentiality against a local attacker.
//!
//! ## Envelope
//! ```text
//! kv1:<base64( nonce[12] || ciphertext )>
//! ```
//! The `kv1:` prefix is how [`SecureCodec::is_ciphertext`] recognizes encoded
//! payloads; it is a heuristic, not a guarantee.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha256};

use crate::error::{VaultError, VaultResult};

/// Envelope prefix marking a codec-produced payload.
pub const CIPHERTEXT_PREFIX: &str = "kv1:";

/// AES-256-GCM nonce length in bytes.
const NONCE_LEN: usize = 12;

/// AES-256-GCM codec with a deterministically derived key.
#[derive(Clone)]
pub struct SecureCodec {
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for SecureCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureCodec").field("key", &"[REDACTED]").finish()
    }
}

impl SecureCodec {
    /// Builds a codec keyed from the application secret plus ambient machine
    /// signals.
    pub fn new(app_secret: &str) -> Self {
        let signals = machine_signals();
        Self::with_signals(app_secret, &signals)
    }

    /// Builds a codec from explicit derivation inputs.
    ///
    /// Exposed so tests can pin the context instead of depending on the
    /// machine they run on.
    pub fn with_signals(app_secret: &str, signals: &[String]) -> Self {
        let key_bytes = derive_key(app_secret, signals);
        let key = Key::<Aes256Gcm>::from_slice(&key_bytes);
        SecureCodec {
            cipher: Aes256Gcm::new(key),
        }
    }

    /// Encrypts a plaintext string into the `kv1:` envelope.
    pub fn encrypt(&self, plaintext: &str) -> VaultResult<String> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| VaultError::Encrypt(e.to_string()))?;

        let mut payload = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        payload.extend_from_slice(&nonce);
        payload.extend_from_slice(&ciphertext);

        Ok(format!("{}{}", CIPHERTEXT_PREFIX, BASE64.encode(payload)))
    }

    /// Decrypts a `kv1:` envelope back into the plaintext string.
    pub fn decrypt(&self, payload: &str) -> VaultResult<String> {
        let encoded = payload
            .strip_prefix(CIPHERTEXT_PREFIX)
            .ok_or(VaultError::NotCiphertext)?;

        let bytes = BASE64
            .decode(encoded)
            .map_err(|e| VaultError::MalformedEnvelope(e.to_string()))?;

        if bytes.len() < NONCE_LEN {
            return Err(VaultError::MalformedEnvelope(format!(
                "payload too short: {} bytes",
                bytes.len()
            )));
        }

        let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);

        let plaintext = self
            .cipher
            .decrypt(nonce, ciphertext)
            .map_err(|e| VaultError::Decrypt(e.to_string()))?;

        String::from_utf8(plaintext)
            .map_err(|e| VaultError::Decrypt(format!("plaintext is not UTF-8: {e}")))
    }

    /// Reports whether a string looks like a codec-produced payload.
    ///
    /// Prefix check only; a plaintext value starting with `kv1:` would be
    /// misclassified.
    pub fn is_ciphertext(payload: &str) -> bool {
        payload.starts_with(CIPHERTEXT_PREFIX)
    }
}

/// Ambient, reproducible machine signals mixed into the key.
fn machine_signals() -> Vec<String> {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    vec![
        std::env::consts::OS.to_string(),
        std::env::consts::ARCH.to_string(),
        user,
    ]
}

/// SHA-256 over secret and signals, length-prefixed so adjacent inputs
/// cannot collide by concatenation.
fn derive_key(app_secret: &str, signals: &[String]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update((app_secret.len() as u64).to_le_bytes());
    hasher.update(app_secret.as_bytes());
    for signal in signals {
        hasher.update((signal.len() as u64).to_le_bytes());
        hasher.update(signal.as_bytes());
    }
    hasher.finalize().into()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_codec() -> SecureCodec {
        SecureCodec::with_signals("test-secret", &["linux".to_string(), "tester".to_string()])
    }

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let codec = test_codec();
        let plaintext = r#"[{"id":"1","title":"Email"}]"#;

        let encrypted = codec.encrypt(plaintext).unwrap();
        assert_ne!(encrypted, plaintext);

        let decrypted = codec.decrypt(&encrypted).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_key_derivation_is_deterministic() {
        // A second codec built from the same inputs must decrypt payloads
        // produced by the first: nothing key-shaped is persisted between runs.
        let first = test_codec();
        let second = test_codec();

        let encrypted = first.encrypt("hello").unwrap();
        assert_eq!(second.decrypt(&encrypted).unwrap(), "hello");
    }

    #[test]
    fn test_different_context_cannot_decrypt() {
        let codec = test_codec();
        let other = SecureCodec::with_signals("test-secret", &["darwin".to_string()]);

        let encrypted = codec.encrypt("hello").unwrap();
        assert!(matches!(other.decrypt(&encrypted), Err(VaultError::Decrypt(_))));
    }

    #[test]
    fn test_is_ciphertext_heuristic() {
        let codec = test_codec();
        let encrypted = codec.encrypt("hello").unwrap();

        assert!(SecureCodec::is_ciphertext(&encrypted));
        assert!(!SecureCodec::is_ciphertext("hello"));
        assert!(!SecureCodec::is_ciphertext(r#"{"plain":"json"}"#));
    }

    #[test]
    fn test_decrypt_rejects_plain_text() {
        let codec = test_codec();
        assert!(matches!(
            codec.decrypt("not an envelope"),
            Err(VaultError::NotCiphertext)
        ));
    }

    #[test]
    fn test_decrypt_rejects_truncated_envelope() {
        let codec = test_codec();
        let payload = format!("{}{}", CIPHERTEXT_PREFIX, BASE64.encode([1u8, 2, 3]));
        assert!(matches!(
            codec.decrypt(&payload),
            Err(VaultError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn test_decrypt_rejects_tampered_payload() {
        let codec = test_codec();
        let encrypted = codec.encrypt("hello").unwrap();

        // Flip a character in the body of the envelope.
        let mut tampered: Vec<char> = encrypted.chars().collect();
        let last = tampered.len() - 1;
        tampered[last] = if tampered[last] == 'A' { 'B' } else { 'A' };
        let tampered: String = tampered.into_iter().collect();

        assert!(codec.decrypt(&tampered).is_err());
    }
}

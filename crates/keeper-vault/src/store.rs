//! # Keyed Persistence Store
//!
//! Generic save/load of named, optionally-encrypted values. One file per key
//! under the vault root; every write replaces the previous value entirely
//! (no partial merge).
//!
//! ## Failure Policy
//! - `save` propagates errors: the caller decides whether losing a write is
//!   acceptable.
//! - `load` never fails: a missing key, an undecryptable payload, or corrupt
//!   JSON all degrade to the caller-supplied default, with a `warn!` so the
//!   loss is visible in logs rather than silent.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::codec::SecureCodec;
use crate::config::VaultConfig;
use crate::error::VaultResult;

/// File-backed key-value store with transparent encryption.
///
/// Cheap to clone; both the activity log and the state container hold one.
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
    codec: SecureCodec,
}

impl Vault {
    /// Opens (creating if necessary) a vault rooted at `config.root`.
    pub fn open(config: VaultConfig) -> VaultResult<Self> {
        fs::create_dir_all(&config.root)?;
        let codec = SecureCodec::new(&config.app_secret);

        debug!(root = %config.root.display(), "Vault opened");

        Ok(Vault {
            root: config.root,
            codec,
        })
    }

    /// Serializes `value`, optionally encrypts it, and writes it under `key`,
    /// replacing any previous value.
    pub fn save<T: Serialize>(&self, key: &str, value: &T, encrypt: bool) -> VaultResult<()> {
        let text = serde_json::to_string(value)?;
        let payload = if encrypt {
            self.codec.encrypt(&text)?
        } else {
            text
        };

        fs::write(self.path_for(key), payload)?;
        debug!(key = %key, encrypted = encrypt, "Vault value saved");
        Ok(())
    }

    /// Loads the value under `key`, or `default` if the key is absent or any
    /// step (read, decrypt, parse) fails.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T, encrypted: bool) -> T {
        let path = self.path_for(key);

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return default,
            Err(e) => {
                warn!(key = %key, error = %e, "Vault read failed, using default");
                return default;
            }
        };

        let text = if encrypted {
            if SecureCodec::is_ciphertext(&raw) {
                match self.codec.decrypt(&raw) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(key = %key, error = %e, "Vault decrypt failed, using default");
                        return default;
                    }
                }
            } else {
                // A plaintext value under an encrypted key: an earlier write
                // degraded. Read it rather than dropping the user's data.
                warn!(key = %key, "Expected ciphertext but found plaintext");
                raw
            }
        } else {
            raw
        };

        match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "Vault parse failed, using default");
                default
            }
        }
    }

    /// Whether a value exists under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }

    /// Removes the value under `key`, if present.
    pub fn remove(&self, key: &str) -> VaultResult<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// The vault root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.dat"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: i64,
    }

    fn test_vault(dir: &Path) -> Vault {
        Vault::open(VaultConfig::new(dir)).unwrap()
    }

    #[test]
    fn test_save_load_round_trip_plain() {
        let dir = tempdir().unwrap();
        let vault = test_vault(dir.path());

        let value = Sample {
            name: "widget".to_string(),
            count: 3,
        };
        vault.save("sample", &value, false).unwrap();

        let loaded: Sample = vault.load(
            "sample",
            Sample {
                name: String::new(),
                count: 0,
            },
            false,
        );
        assert_eq!(loaded, value);
    }

    #[test]
    fn test_save_load_round_trip_encrypted() {
        let dir = tempdir().unwrap();
        let vault = test_vault(dir.path());

        let value = vec!["a".to_string(), "b".to_string()];
        vault.save("list", &value, true).unwrap();

        // On-disk payload must be the codec envelope, not JSON.
        let raw = fs::read_to_string(dir.path().join("list.dat")).unwrap();
        assert!(SecureCodec::is_ciphertext(&raw));

        let loaded: Vec<String> = vault.load("list", Vec::new(), true);
        assert_eq!(loaded, value);
    }

    #[test]
    fn test_load_missing_key_returns_default() {
        let dir = tempdir().unwrap();
        let vault = test_vault(dir.path());

        let loaded: Vec<String> = vault.load("absent", vec!["fallback".to_string()], true);
        assert_eq!(loaded, vec!["fallback".to_string()]);
    }

    #[test]
    fn test_load_corrupt_payload_returns_default() {
        let dir = tempdir().unwrap();
        let vault = test_vault(dir.path());

        fs::write(dir.path().join("bad.dat"), "kv1:!!!not-base64!!!").unwrap();
        let loaded: i64 = vault.load("bad", 42, true);
        assert_eq!(loaded, 42);

        fs::write(dir.path().join("bad2.dat"), "{ not json").unwrap();
        let loaded: i64 = vault.load("bad2", 7, false);
        assert_eq!(loaded, 7);
    }

    #[test]
    fn test_load_reads_plaintext_under_encrypted_key() {
        let dir = tempdir().unwrap();
        let vault = test_vault(dir.path());

        // Simulate an earlier degraded write: plaintext JSON where ciphertext
        // was expected.
        fs::write(dir.path().join("tasks.dat"), r#"["left over"]"#).unwrap();
        let loaded: Vec<String> = vault.load("tasks", Vec::new(), true);
        assert_eq!(loaded, vec!["left over".to_string()]);
    }

    #[test]
    fn test_save_overwrites_entirely() {
        let dir = tempdir().unwrap();
        let vault = test_vault(dir.path());

        vault.save("k", &vec![1, 2, 3], true).unwrap();
        vault.save("k", &vec![9], true).unwrap();

        let loaded: Vec<i64> = vault.load("k", Vec::new(), true);
        assert_eq!(loaded, vec![9]);
    }

    #[test]
    fn test_remove() {
        let dir = tempdir().unwrap();
        let vault = test_vault(dir.path());

        vault.save("k", &1, false).unwrap();
        assert!(vault.contains("k"));
        vault.remove("k").unwrap();
        assert!(!vault.contains("k"));
    }
}

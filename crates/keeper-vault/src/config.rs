//! # Vault Configuration
//!
//! Where the vault lives on disk and which application secret feeds the key
//! derivation.

use std::path::PathBuf;

/// Default application secret mixed into key derivation.
///
/// This is a build-time constant, not a user secret; see the note on
/// [`crate::codec::SecureCodec`] about what the derived key does and does not
/// protect against.
pub const DEFAULT_APP_SECRET: &str = "keeper-vault-v1";

/// Vault configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = VaultConfig::new("/home/me/.local/share/keeper")
///     .app_secret("my-app-build-secret");
/// let vault = Vault::open(config)?;
/// ```
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Directory holding one file per key. Created if missing.
    pub root: PathBuf,

    /// Application secret mixed into the key derivation.
    pub app_secret: String,
}

impl VaultConfig {
    /// Creates a configuration rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        VaultConfig {
            root: root.into(),
            app_secret: DEFAULT_APP_SECRET.to_string(),
        }
    }

    /// Overrides the application secret.
    pub fn app_secret(mut self, secret: impl Into<String>) -> Self {
        self.app_secret = secret.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = VaultConfig::new("/tmp/vault").app_secret("s3cret");
        assert_eq!(config.root, PathBuf::from("/tmp/vault"));
        assert_eq!(config.app_secret, "s3cret");
    }
}

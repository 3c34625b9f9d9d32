//! Secret Key Provider
//!
//! Supplies signing and encryption keys by named purpose
//! (e.g. `"jwt_secret_key"`, `"data_encryption_key"`).
//!
//! Key file layout: a JSON array whose first object maps purpose to key text.
//! ```json
//! [{ "jwt_secret_key": "…", "data_encryption_key": "…" }]
//! ```
//! Storage and rotation of the file itself are outside this crate.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{random_bytes, to_base64};

/// Secret lookup errors
#[derive(Debug, Error)]
pub enum SecretError {
    /// No key registered under the purpose
    #[error("No secret key configured for purpose '{0}'")]
    Missing(String),

    /// Key file could not be read
    #[error("Failed to read key file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Key file is not in the expected layout
    #[error("Malformed key file {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },
}

/// Secret key material, zeroized on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Key text as stored (keys in key files are UTF-8 strings)
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SecretKey").field(&"[REDACTED]").finish()
    }
}

/// Source of secret keys by purpose
pub trait SecretKeyProvider: Send + Sync {
    fn secret_key(&self, purpose: &str) -> Result<SecretKey, SecretError>;
}

/// In-memory keyring
///
/// Backs both key files (after loading) and development setups with freshly
/// generated keys.
#[derive(Clone, Default)]
pub struct Keyring {
    keys: HashMap<String, SecretKey>,
}

impl Keyring {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key under a purpose, replacing any previous one
    pub fn with_key(mut self, purpose: impl Into<String>, key: SecretKey) -> Self {
        self.keys.insert(purpose.into(), key);
        self
    }

    /// Create a keyring with a random base64 key (32 bytes) for every purpose
    ///
    /// Keys only live for the process; anything sealed with them is unreadable
    /// after restart.
    pub fn random(purposes: &[&str]) -> Self {
        purposes.iter().fold(Self::new(), |ring, purpose| {
            ring.with_key(*purpose, SecretKey::new(to_base64(&random_bytes(32))))
        })
    }

    /// Load keys from a JSON key file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SecretError> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SecretError::Unreadable {
                path: path.to_path_buf(),
                source,
            })?;

        let keyring = Self::parse(&text).map_err(|reason| SecretError::Malformed {
            path: path.to_path_buf(),
            reason,
        })?;

        tracing::debug!(path = %path.display(), keys = keyring.keys.len(), "Loaded key file");
        Ok(keyring)
    }

    fn parse(text: &str) -> Result<Self, String> {
        let value: serde_json::Value = serde_json::from_str(text).map_err(|e| e.to_string())?;

        let entries = value
            .as_array()
            .and_then(|items| items.first())
            .and_then(|first| first.as_object())
            .ok_or_else(|| "expected an array whose first element is an object".to_string())?;

        entries.iter().try_fold(Self::new(), |ring, (purpose, key)| {
            let key = key
                .as_str()
                .ok_or_else(|| format!("key '{purpose}' is not a string"))?;
            Ok(ring.with_key(purpose.clone(), SecretKey::new(key)))
        })
    }

    pub fn contains(&self, purpose: &str) -> bool {
        self.keys.contains_key(purpose)
    }
}

impl SecretKeyProvider for Keyring {
    fn secret_key(&self, purpose: &str) -> Result<SecretKey, SecretError> {
        self.keys
            .get(purpose)
            .cloned()
            .ok_or_else(|| SecretError::Missing(purpose.to_string()))
    }
}

impl fmt::Debug for Keyring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut purposes: Vec<&str> = self.keys.keys().map(String::as_str).collect();
        purposes.sort_unstable();
        f.debug_struct("Keyring").field("purposes", &purposes).finish()
    }
}

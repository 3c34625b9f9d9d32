//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::path::{Path, PathBuf};

use crate::domain::value_object::security_mode::SecurityMode;

/// Key purpose for session token signing
pub const JWT_KEY_PURPOSE: &str = "jwt_secret_key";

/// Key purpose for profile field encryption
pub const DATA_KEY_PURPOSE: &str = "data_encryption_key";

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secure or insecure behavior, fixed for the process
    pub security_mode: SecurityMode,
    /// Accounts JSON file
    pub accounts_path: PathBuf,
    /// Known-weak password list used by the brute-force simulation
    pub wordlist_path: PathBuf,
    /// Secret-key purpose for token signing
    pub jwt_key_purpose: String,
    /// Secret-key purpose for profile encryption
    pub data_key_purpose: String,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::with_data_dir("data")
    }
}

impl AuthConfig {
    /// Secure configuration with data files under `dir`
    pub fn with_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            security_mode: SecurityMode::Secure,
            accounts_path: dir.join("accounts.json"),
            wordlist_path: dir.join("known_weak_passwords.txt"),
            jwt_key_purpose: JWT_KEY_PURPOSE.to_string(),
            data_key_purpose: DATA_KEY_PURPOSE.to_string(),
            password_pepper: None,
        }
    }

    /// Switch the security mode
    pub fn with_mode(self, security_mode: SecurityMode) -> Self {
        Self {
            security_mode,
            ..self
        }
    }

    /// Key purposes this configuration needs from the secret-key provider
    pub fn key_purposes(&self) -> Vec<&str> {
        match self.security_mode {
            SecurityMode::Secure => vec![
                self.jwt_key_purpose.as_str(),
                self.data_key_purpose.as_str(),
            ],
            SecurityMode::Insecure => vec![self.jwt_key_purpose.as_str()],
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

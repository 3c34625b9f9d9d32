//! Account Password Value Objects
//!
//! `RawPassword` is user input (zeroized on drop). `PasswordMaterial` is what
//! a stored account holds for the active mode: an Argon2id hash in secure
//! mode, the plaintext in insecure mode.

use platform::password::{ClearTextPassword, HashedPassword};
use std::fmt;

use super::security_mode::SecurityMode;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// No rules are enforced on construction. Strength depends on the mode and is
/// decided by the password policy.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(ClearTextPassword::new(raw))
    }

    pub fn as_str(&self) -> &str {
        self.0.expose()
    }

    pub fn char_count(&self) -> usize {
        self.0.char_count()
    }

    pub fn as_clear_text(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Stored Password Material
// ============================================================================

#[derive(Clone, PartialEq, Eq)]
pub enum PasswordMaterial {
    /// Salted Argon2id hash (secure mode)
    Hashed(HashedPassword),
    /// Plaintext (insecure mode)
    Plain(String),
}

impl PasswordMaterial {
    /// Mode this material belongs to
    pub fn mode(&self) -> SecurityMode {
        match self {
            PasswordMaterial::Hashed(_) => SecurityMode::Secure,
            PasswordMaterial::Plain(_) => SecurityMode::Insecure,
        }
    }

    /// Text as persisted
    pub fn as_stored_str(&self) -> &str {
        match self {
            PasswordMaterial::Hashed(hash) => hash.as_phc_string(),
            PasswordMaterial::Plain(plain) => plain,
        }
    }
}

impl fmt::Debug for PasswordMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordMaterial::Hashed(hash) => f.debug_tuple("Hashed").field(hash).finish(),
            PasswordMaterial::Plain(_) => f.debug_tuple("Plain").field(&"[REDACTED]").finish(),
        }
    }
}

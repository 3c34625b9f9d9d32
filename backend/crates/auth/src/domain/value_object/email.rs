//! Email Value Object
//!
//! Represents an email address accepted by the active security mode's
//! pattern. The two modes use different patterns; the insecure one is the
//! backtracking-prone form kept for demonstration (the `regex` crate matches
//! it in linear time, so it is not actually exploitable here).

use std::sync::LazyLock;

use kernel::error::app_error::{AppError, AppResult};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::security_mode::SecurityMode;

/// Pattern enforced in secure mode
pub const SECURE_EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// Nested-quantifier pattern used in insecure mode
pub const INSECURE_EMAIL_PATTERN: &str =
    r"^([0-9a-za-z]([-.\w]*[0-9a-za-z])*@([0-9a-za-z][-\w]*[0-9a-za-z]\.)+[a-za-z]{2,9})$";

static SECURE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SECURE_EMAIL_PATTERN).expect("secure email pattern compiles"));

static INSECURE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(INSECURE_EMAIL_PATTERN).expect("insecure email pattern compiles"));

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Validate against the mode's pattern
    ///
    /// Surrounding whitespace is trimmed; case is preserved.
    pub fn parse(email: impl Into<String>, mode: SecurityMode) -> AppResult<Self> {
        let email = email.into().trim().to_string();

        if !Self::is_valid(&email, mode) {
            return Err(AppError::validation(format!("Invalid email address: {email}")));
        }

        Ok(Self(email))
    }

    /// Full-string match against the mode's pattern
    pub fn is_valid(email: &str, mode: SecurityMode) -> bool {
        match mode {
            SecurityMode::Secure => SECURE_EMAIL.is_match(email),
            SecurityMode::Insecure => INSECURE_EMAIL.is_match(email),
        }
    }

    /// Create from a stored value (not re-validated)
    pub fn from_stored(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

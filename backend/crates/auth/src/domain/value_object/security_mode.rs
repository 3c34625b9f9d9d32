//! Security Mode
//!
//! Process-wide toggle between the hardened behavior and the deliberately
//! vulnerable teaching variant. Every mode-dependent rule asks this type.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::account_role::AccountRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityMode {
    #[default]
    Secure,
    Insecure,
}

impl SecurityMode {
    /// Total password attempts allowed per login in secure mode
    pub const SECURE_LOGIN_ATTEMPTS: u32 = 4;

    /// Total password attempts allowed per login in insecure mode
    pub const INSECURE_LOGIN_ATTEMPTS: u32 = 1000;

    #[inline]
    pub const fn from_secure_flag(secure: bool) -> Self {
        if secure {
            SecurityMode::Secure
        } else {
            SecurityMode::Insecure
        }
    }

    #[inline]
    pub const fn is_secure(&self) -> bool {
        matches!(self, SecurityMode::Secure)
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            SecurityMode::Secure => "secure",
            SecurityMode::Insecure => "insecure",
        }
    }

    #[inline]
    pub const fn login_attempt_limit(&self) -> u32 {
        match self {
            SecurityMode::Secure => Self::SECURE_LOGIN_ATTEMPTS,
            SecurityMode::Insecure => Self::INSECURE_LOGIN_ATTEMPTS,
        }
    }

    /// Profile fields are sealed at rest only in secure mode
    #[inline]
    pub const fn encrypts_profile(&self) -> bool {
        self.is_secure()
    }

    #[inline]
    pub const fn allows_brute_force(&self) -> bool {
        !self.is_secure()
    }

    /// Role attached to an account loaded under this mode
    ///
    /// Insecure mode grants `admin` to every loaded account.
    #[inline]
    pub const fn effective_role(&self, stored: AccountRole) -> AccountRole {
        match self {
            SecurityMode::Secure => stored,
            SecurityMode::Insecure => AccountRole::Admin,
        }
    }
}

impl fmt::Display for SecurityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

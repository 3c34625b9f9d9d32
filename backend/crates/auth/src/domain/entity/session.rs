//! Session Entity
//!
//! Result of a successful login. Only the authenticator creates sessions, so
//! holding one means the password was verified in this process.

use chrono::{DateTime, Utc};

use crate::domain::entity::account::Account;
use crate::domain::value_object::{
    account_role::AccountRole, email::Email, security_mode::SecurityMode,
    session_token::SessionToken,
};

#[derive(Debug, Clone)]
pub struct Session {
    account: Account,
    role: AccountRole,
    mode: SecurityMode,
    token: SessionToken,
    authenticated_at: DateTime<Utc>,
}

impl Session {
    pub(crate) fn new(
        account: Account,
        role: AccountRole,
        mode: SecurityMode,
        token: SessionToken,
        authenticated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            account,
            role,
            mode,
            token,
            authenticated_at,
        }
    }

    /// Working copy of the authenticated account
    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn email(&self) -> &Email {
        &self.account.email
    }

    /// Role used for authorization (after mode resolution)
    pub fn role(&self) -> AccountRole {
        self.role
    }

    pub fn mode(&self) -> SecurityMode {
        self.mode
    }

    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    pub fn authenticated_at(&self) -> DateTime<Utc> {
        self.authenticated_at
    }
}

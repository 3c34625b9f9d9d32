//! Account Entity
//!
//! A registered shop account. Password material for both modes may coexist
//! in one stored account; each mode reads only its own.

use platform::password::HashedPassword;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::{
    account_number::AccountNumber,
    account_password::PasswordMaterial,
    account_role::AccountRole,
    email::Email,
    security_mode::SecurityMode,
};

/// Postal address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub line1: String,
    #[serde(default)]
    pub line2: String,
    #[serde(default)]
    pub postcode: String,
}

/// Personal details attached to an account
///
/// Sealed field by field when the account was registered in secure mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub surname: String,
    pub address: Address,
    pub phone: String,
}

impl Profile {
    /// Apply a fallible transformation to every field
    pub fn try_map<E>(self, mut f: impl FnMut(String) -> Result<String, E>) -> Result<Self, E> {
        Ok(Self {
            name: f(self.name)?,
            surname: f(self.surname)?,
            address: Address {
                line1: f(self.address.line1)?,
                line2: f(self.address.line2)?,
                postcode: f(self.address.postcode)?,
            },
            phone: f(self.phone)?,
        })
    }
}

/// Account entity
#[derive(Debug, Clone)]
pub struct Account {
    pub email: Email,
    /// Unique, assigned as max + 1
    pub account_number: AccountNumber,
    /// Stored role (missing roles load as `user`)
    pub role: AccountRole,
    pub secure_password: Option<HashedPassword>,
    pub insecure_password: Option<String>,
    pub profile: Profile,
    /// Mode the account was registered under
    pub registered_mode: SecurityMode,
}

impl Account {
    /// Create a newly registered account with the default role
    pub fn new(
        email: Email,
        account_number: AccountNumber,
        password: PasswordMaterial,
        profile: Profile,
    ) -> Self {
        let registered_mode = password.mode();
        let (secure_password, insecure_password) = match password {
            PasswordMaterial::Hashed(hash) => (Some(hash), None),
            PasswordMaterial::Plain(plain) => (None, Some(plain)),
        };

        Self {
            email,
            account_number,
            role: AccountRole::default(),
            secure_password,
            insecure_password,
            profile,
            registered_mode,
        }
    }

    /// Set the stored role
    pub fn with_role(mut self, role: AccountRole) -> Self {
        self.role = role;
        self
    }

    /// Password material the given mode verifies against
    pub fn credential(&self, mode: SecurityMode) -> Option<PasswordMaterial> {
        match mode {
            SecurityMode::Secure => self.secure_password.clone().map(PasswordMaterial::Hashed),
            SecurityMode::Insecure => self.insecure_password.clone().map(PasswordMaterial::Plain),
        }
    }

    /// Whether the stored profile fields are ciphertext
    pub fn has_sealed_profile(&self) -> bool {
        self.registered_mode.encrypts_profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile {
            name: "Anda".into(),
            surname: "Ziemele".into(),
            address: Address {
                line1: "1 Market Street".into(),
                line2: String::new(),
                postcode: "LV-1050".into(),
            },
            phone: "+37120000000".into(),
        }
    }

    #[test]
    fn test_new_insecure_account() {
        let account = Account::new(
            Email::from_stored("shopper@example.com"),
            AccountNumber::FIRST,
            PasswordMaterial::Plain("abc".into()),
            profile(),
        );

        assert_eq!(account.role, AccountRole::User);
        assert_eq!(account.registered_mode, SecurityMode::Insecure);
        assert!(!account.has_sealed_profile());
        assert_eq!(
            account.credential(SecurityMode::Insecure),
            Some(PasswordMaterial::Plain("abc".into()))
        );
        assert_eq!(account.credential(SecurityMode::Secure), None);
    }

    #[test]
    fn test_with_role() {
        let account = Account::new(
            Email::from_stored("clerk@example.com"),
            AccountNumber::new(2),
            PasswordMaterial::Plain("abc".into()),
            Profile::default(),
        )
        .with_role(AccountRole::Clerk);
        assert_eq!(account.role, AccountRole::Clerk);
    }

    #[test]
    fn test_profile_try_map_touches_every_field() {
        let mapped = profile()
            .try_map(|field| Ok::<_, ()>(format!("<{field}>")))
            .unwrap();
        assert_eq!(mapped.name, "<Anda>");
        assert_eq!(mapped.address.line2, "<>");
        assert_eq!(mapped.phone, "<+37120000000>");
    }
}

//! Profile Sealing
//!
//! In secure mode every profile field is sealed with AES-256-GCM before it is
//! stored. Insecure mode stores the fields as entered.

use platform::crypto::{CipherError, FieldCipher};
use platform::secrets::SecretKeyProvider;

use crate::domain::entity::account::{Account, Profile};
use crate::domain::value_object::security_mode::SecurityMode;
use crate::error::AuthResult;

#[derive(Debug, Clone, Default)]
pub struct ProfileSealer {
    cipher: Option<FieldCipher>,
}

impl ProfileSealer {
    /// Sealer for the mode; secure mode requires a base64 AES-256 key under `purpose`
    pub fn for_mode(
        mode: SecurityMode,
        provider: &dyn SecretKeyProvider,
        purpose: &str,
    ) -> AuthResult<Self> {
        if !mode.encrypts_profile() {
            return Ok(Self::plain());
        }

        let key = provider.secret_key(purpose)?;
        let text = key.as_text().ok_or(CipherError::InvalidKey)?;
        Ok(Self::with_cipher(FieldCipher::from_base64_key(text)?))
    }

    pub fn with_cipher(cipher: FieldCipher) -> Self {
        Self {
            cipher: Some(cipher),
        }
    }

    /// Sealer that stores profiles unchanged
    pub fn plain() -> Self {
        Self { cipher: None }
    }

    pub fn is_sealing(&self) -> bool {
        self.cipher.is_some()
    }

    /// Prepare a profile for storage
    pub fn seal(&self, profile: Profile) -> AuthResult<Profile> {
        match &self.cipher {
            Some(cipher) => Ok(profile.try_map(|field| cipher.seal(&field))?),
            None => Ok(profile),
        }
    }

    /// Readable profile of a stored account
    ///
    /// Sealed profiles stay sealed when no key is available.
    pub fn open(&self, account: &Account) -> AuthResult<Profile> {
        match (&self.cipher, account.has_sealed_profile()) {
            (Some(cipher), true) => Ok(account
                .profile
                .clone()
                .try_map(|field| cipher.open(&field))?),
            _ => Ok(account.profile.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::account::Address;
    use crate::domain::value_object::{
        account_number::AccountNumber, account_password::PasswordMaterial, email::Email,
    };
    use platform::password::ClearTextPassword;
    use platform::secrets::{Keyring, SecretKey};

    fn profile() -> Profile {
        Profile {
            name: "Anda".into(),
            surname: "Ziemele".into(),
            address: Address {
                line1: "1 Market Street".into(),
                line2: "Flat 2".into(),
                postcode: "LV-1050".into(),
            },
            phone: "+37120000000".into(),
        }
    }

    fn secure_account(profile: Profile) -> Account {
        let hash = ClearTextPassword::new("SsDMoDuLe123!.").hash(None).unwrap();
        Account::new(
            Email::from_stored("anda@example.com"),
            AccountNumber::FIRST,
            PasswordMaterial::Hashed(hash),
            profile,
        )
    }

    #[test]
    fn test_secure_seal_and_open() {
        let ring = Keyring::random(&["data_encryption_key"]);
        let sealer =
            ProfileSealer::for_mode(SecurityMode::Secure, &ring, "data_encryption_key").unwrap();
        assert!(sealer.is_sealing());

        let sealed = sealer.seal(profile()).unwrap();
        assert_ne!(sealed.name, "Anda");
        assert_ne!(sealed.address.postcode, "LV-1050");

        let opened = sealer.open(&secure_account(sealed)).unwrap();
        assert_eq!(opened, profile());
    }

    #[test]
    fn test_insecure_stores_plain() {
        let sealer =
            ProfileSealer::for_mode(SecurityMode::Insecure, &Keyring::new(), "data_encryption_key")
                .unwrap();
        assert!(!sealer.is_sealing());
        assert_eq!(sealer.seal(profile()).unwrap(), profile());
    }

    #[test]
    fn test_secure_requires_valid_key() {
        let missing = ProfileSealer::for_mode(SecurityMode::Secure, &Keyring::new(), "data_encryption_key");
        assert!(missing.is_err());

        let ring = Keyring::new().with_key("data_encryption_key", SecretKey::new("short"));
        let invalid = ProfileSealer::for_mode(SecurityMode::Secure, &ring, "data_encryption_key");
        assert!(invalid.is_err());
    }
}

//! Argon2id password hashing
//!
//! Hash input is the NFKC form of the password followed by an optional
//! pepper. Each hash gets a fresh salt and is stored as a PHC string, so the
//! algorithm and its parameters travel with the value. Strength rules belong
//! to the caller.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Argon2 could not hash the password: {0}")]
    Hashing(String),

    #[error("Stored value is not an Argon2 PHC string")]
    Malformed,
}

/// A password as typed, wiped from memory on drop
///
/// Not `Clone`. The text is kept verbatim; normalization happens only on the
/// way into the hasher.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Length in Unicode scalar values
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    fn argon_input(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut input: Zeroizing<Vec<u8>> =
            Zeroizing::new(self.0.nfkc().collect::<String>().into_bytes());
        input.extend_from_slice(pepper.unwrap_or_default());
        input
    }

    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let input = self.argon_input(pepper);
        let salt = SaltString::generate(&mut OsRng);

        let phc = Argon2::default()
            .hash_password(&input, &salt)
            .map_err(|e| PasswordHashError::Hashing(e.to_string()))?
            .to_string();

        Ok(HashedPassword(phc))
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClearTextPassword(..)")
    }
}

/// Argon2id digest in PHC form
///
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let typed = ClearTextPassword::new("Counter&Till9");
/// let stored = typed.hash(None).unwrap();
/// assert!(stored.verify(&typed, None));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Accept a stored PHC string after checking that it parses
    pub fn from_phc_string(phc: impl Into<String>) -> Result<Self, PasswordHashError> {
        let phc = phc.into();
        PasswordHash::new(&phc).map_err(|_| PasswordHashError::Malformed)?;
        Ok(Self(phc))
    }

    pub fn as_phc_string(&self) -> &str {
        &self.0
    }

    /// Constant-time check of `password` against this digest
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.0) else {
            return false;
        };
        Argon2::default()
            .verify_password(&password.argon_input(pepper), &parsed)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_the_original_password_verifies() {
        let typed = ClearTextPassword::new("Basket.Ready7");
        let stored = typed.hash(None).unwrap();

        assert!(stored.as_phc_string().starts_with("$argon2id$"));
        assert!(stored.verify(&typed, None));
        assert!(!stored.verify(&ClearTextPassword::new("basket.ready7"), None));
    }

    #[test]
    fn test_salts_differ_per_hash() {
        let typed = ClearTextPassword::new("Basket.Ready7");
        assert_ne!(
            typed.hash(None).unwrap().as_phc_string(),
            typed.hash(None).unwrap().as_phc_string()
        );
    }

    #[test]
    fn test_pepper_must_match() {
        let typed = ClearTextPassword::new("Checkout$42x");
        let stored = typed.hash(Some(b"shop-pepper")).unwrap();

        assert!(stored.verify(&typed, Some(b"shop-pepper")));
        assert!(!stored.verify(&typed, None));
        assert!(!stored.verify(&typed, Some(b"other-pepper")));
    }

    #[test]
    fn test_compatibility_forms_hash_alike() {
        let ascii = ClearTextPassword::new("Cart9!item");
        let full_width = ClearTextPassword::new("Ｃａｒｔ9!item");
        assert!(ascii.hash(None).unwrap().verify(&full_width, None));
        assert_ne!(ascii.expose(), full_width.expose());
    }

    #[test]
    fn test_stored_strings() {
        let typed = ClearTextPassword::new("Checkout$42x");
        let phc = typed.hash(None).unwrap().as_phc_string().to_string();
        assert!(HashedPassword::from_phc_string(phc).unwrap().verify(&typed, None));

        assert!(matches!(
            HashedPassword::from_phc_string("letmein"),
            Err(PasswordHashError::Malformed)
        ));
    }

    #[test]
    fn test_debug_hides_values() {
        let typed = ClearTextPassword::new("Checkout$42x");
        assert!(!format!("{typed:?}").contains("Checkout"));
        let stored = typed.hash(None).unwrap();
        assert!(!format!("{stored:?}").contains("argon2"));
    }

    #[test]
    fn test_char_count() {
        assert_eq!(ClearTextPassword::new("パスワード").char_count(), 5);
    }
}

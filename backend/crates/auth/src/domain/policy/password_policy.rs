//! Password Policy
//!
//! Strength rules, protection at rest, and verification, all keyed on the
//! security mode.
//!
//! Secure mode requires at least 8 characters with an uppercase letter, a
//! lowercase letter, a digit, and one of `@ ! $ & .`. Insecure mode accepts
//! anything, the empty string included.

use platform::password::HashedPassword;
use std::fmt;

use crate::domain::value_object::{
    account_password::{PasswordMaterial, RawPassword},
    security_mode::SecurityMode,
};
use crate::error::AuthResult;

/// Minimum password length in secure mode (code points)
pub const MIN_SECURE_LENGTH: usize = 8;

/// Symbols that satisfy the symbol rule
pub const ACCEPTED_SYMBOLS: [char; 5] = ['@', '!', '$', '&', '.'];

// ============================================================================
// Strength Rules
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthViolation {
    TooShort,
    MissingUppercase,
    MissingLowercase,
    MissingDigit,
    MissingSymbol,
}

impl fmt::Display for StrengthViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrengthViolation::TooShort => {
                write!(f, "at least {MIN_SECURE_LENGTH} characters")
            }
            StrengthViolation::MissingUppercase => f.write_str("an uppercase letter"),
            StrengthViolation::MissingLowercase => f.write_str("a lowercase letter"),
            StrengthViolation::MissingDigit => f.write_str("a digit"),
            StrengthViolation::MissingSymbol => f.write_str("one of the symbols @ ! $ & ."),
        }
    }
}

/// Every secure-mode rule the password breaks
pub fn strength_violations(password: &str) -> Vec<StrengthViolation> {
    let mut violations = Vec::new();

    if password.chars().count() < MIN_SECURE_LENGTH {
        violations.push(StrengthViolation::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push(StrengthViolation::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        violations.push(StrengthViolation::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push(StrengthViolation::MissingDigit);
    }
    if !password.chars().any(|c| ACCEPTED_SYMBOLS.contains(&c)) {
        violations.push(StrengthViolation::MissingSymbol);
    }

    violations
}

/// Whether a password is acceptable under the mode
pub fn meets_strength(password: &str, mode: SecurityMode) -> bool {
    match mode {
        SecurityMode::Secure => strength_violations(password).is_empty(),
        SecurityMode::Insecure => true,
    }
}

/// Compare a candidate against stored material (no pepper)
///
/// Material from the other mode never verifies.
pub fn verify(password: &RawPassword, stored: &PasswordMaterial, mode: SecurityMode) -> bool {
    PasswordPolicy::new(mode).verify(password, stored)
}

// ============================================================================
// Policy
// ============================================================================

/// Mode-bound password policy with an optional pepper
#[derive(Clone)]
pub struct PasswordPolicy {
    mode: SecurityMode,
    pepper: Option<Vec<u8>>,
}

impl PasswordPolicy {
    pub fn new(mode: SecurityMode) -> Self {
        Self { mode, pepper: None }
    }

    pub fn with_pepper(mut self, pepper: Option<Vec<u8>>) -> Self {
        self.pepper = pepper;
        self
    }

    pub fn mode(&self) -> SecurityMode {
        self.mode
    }

    pub fn meets_strength(&self, password: &RawPassword) -> bool {
        meets_strength(password.as_str(), self.mode)
    }

    /// Reasons a password is rejected under this mode (empty if accepted)
    pub fn violations(&self, password: &RawPassword) -> Vec<StrengthViolation> {
        match self.mode {
            SecurityMode::Secure => strength_violations(password.as_str()),
            SecurityMode::Insecure => Vec::new(),
        }
    }

    /// Turn a password into storable material for this mode
    pub fn protect(&self, password: &RawPassword) -> AuthResult<PasswordMaterial> {
        match self.mode {
            SecurityMode::Secure => {
                let hashed = password
                    .as_clear_text()
                    .hash(self.pepper.as_deref())?;
                Ok(PasswordMaterial::Hashed(hashed))
            }
            SecurityMode::Insecure => Ok(PasswordMaterial::Plain(password.as_str().to_string())),
        }
    }

    pub fn verify(&self, password: &RawPassword, stored: &PasswordMaterial) -> bool {
        match (self.mode, stored) {
            (SecurityMode::Secure, PasswordMaterial::Hashed(hash)) => {
                self.verify_hash(password, hash)
            }
            (SecurityMode::Insecure, PasswordMaterial::Plain(plain)) => {
                password.as_str() == plain
            }
            _ => false,
        }
    }

    fn verify_hash(&self, password: &RawPassword, hash: &HashedPassword) -> bool {
        hash.verify(password.as_clear_text(), self.pepper.as_deref())
    }
}

impl fmt::Debug for PasswordPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordPolicy")
            .field("mode", &self.mode)
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_strength() {
        assert!(meets_strength("SsDMoDuLe123!.", SecurityMode::Secure));
        assert!(!meets_strength("SsDMoDuLe123#", SecurityMode::Secure));
        assert!(!meets_strength("SsDMoDuLe", SecurityMode::Secure));
        assert!(!meets_strength("Az.!12", SecurityMode::Secure));
        assert!(!meets_strength("jfjhsjkhfjhgkdskfl", SecurityMode::Secure));
    }

    #[test]
    fn test_insecure_accepts_anything() {
        assert!(meets_strength("Az.!12", SecurityMode::Insecure));
        assert!(meets_strength("", SecurityMode::Insecure));
        assert!(meets_strength("password", SecurityMode::Insecure));
    }

    #[test]
    fn test_violations_listed() {
        assert_eq!(
            strength_violations("Az.!12"),
            vec![StrengthViolation::TooShort]
        );
        assert_eq!(
            strength_violations("jfjhsjkhfjhgkdskfl"),
            vec![
                StrengthViolation::MissingUppercase,
                StrengthViolation::MissingDigit,
                StrengthViolation::MissingSymbol,
            ]
        );
        assert!(strength_violations("Abcdefg1$").is_empty());
    }

    #[test]
    fn test_each_missing_class_rejected() {
        assert!(meets_strength("Abcdefg1$", SecurityMode::Secure));

        let cases = [
            ("abcdefg1$", StrengthViolation::MissingUppercase),
            ("ABCDEFG1$", StrengthViolation::MissingLowercase),
            ("Abcdefgh$", StrengthViolation::MissingDigit),
            ("Abcdefg12", StrengthViolation::MissingSymbol),
            ("Abcd1$x", StrengthViolation::TooShort),
        ];
        for (password, expected) in cases {
            assert!(!meets_strength(password, SecurityMode::Secure), "{password}");
            assert_eq!(strength_violations(password), vec![expected], "{password}");
        }
    }

    #[test]
    fn test_length_counts_characters() {
        // Seven characters, eight bytes
        assert!(!meets_strength("Ab1!cdé", SecurityMode::Secure));
        assert!(meets_strength("Ab1!cdéf", SecurityMode::Secure));
    }

    #[test]
    fn test_secure_protect_and_verify() {
        let policy = PasswordPolicy::new(SecurityMode::Secure);
        let password = RawPassword::new("SsDMoDuLe123!.");
        let material = policy.protect(&password).unwrap();

        assert!(matches!(material, PasswordMaterial::Hashed(_)));
        assert_ne!(material.as_stored_str(), "SsDMoDuLe123!.");
        assert!(policy.verify(&password, &material));
        assert!(!policy.verify(&RawPassword::new("SsDMoDuLe123!,"), &material));
    }

    #[test]
    fn test_insecure_protect_stores_plaintext() {
        let policy = PasswordPolicy::new(SecurityMode::Insecure);
        let material = policy.protect(&RawPassword::new("letmein")).unwrap();
        assert_eq!(material, PasswordMaterial::Plain("letmein".into()));
        assert!(policy.verify(&RawPassword::new("letmein"), &material));
        assert!(!policy.verify(&RawPassword::new("LetMeIn"), &material));
    }

    #[test]
    fn test_mode_mismatch_never_verifies() {
        let plain = PasswordMaterial::Plain("letmein".into());
        assert!(!verify(&RawPassword::new("letmein"), &plain, SecurityMode::Secure));

        let hashed = PasswordPolicy::new(SecurityMode::Secure)
            .protect(&RawPassword::new("SsDMoDuLe123!."))
            .unwrap();
        assert!(!verify(
            &RawPassword::new("SsDMoDuLe123!."),
            &hashed,
            SecurityMode::Insecure
        ));
    }

    #[test]
    fn test_pepper_must_match() {
        let peppered = PasswordPolicy::new(SecurityMode::Secure).with_pepper(Some(b"pepper".to_vec()));
        let password = RawPassword::new("SsDMoDuLe123!.");
        let material = peppered.protect(&password).unwrap();

        assert!(peppered.verify(&password, &material));
        assert!(!PasswordPolicy::new(SecurityMode::Secure).verify(&password, &material));
    }
}

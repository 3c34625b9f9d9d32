//! Credential Input Sources
//!
//! The authenticator never reads a terminal itself. Passwords and
//! registration details come from these sources, supplied by the caller
//! (console prompts, a wordlist, or scripted values in tests).

use std::collections::VecDeque;

use crate::domain::entity::account::Profile;
use crate::domain::policy::password_policy::StrengthViolation;
use crate::domain::value_object::{account_password::RawPassword, email::Email};
use crate::error::AuthResult;

/// Context for one password request during login
#[derive(Debug, Clone, Copy)]
pub struct PasswordPrompt<'a> {
    pub email: &'a Email,
    /// 1-based attempt number
    pub attempt: u32,
    /// Attempts left including this one
    pub remaining: u32,
}

/// Supplies candidate passwords during login
pub trait PasswordSource {
    /// Next candidate; `None` when the source has nothing more to offer
    fn next_password(&mut self, prompt: &PasswordPrompt<'_>) -> AuthResult<Option<RawPassword>>;
}

/// Supplies details for a new account
pub trait RegistrationSource {
    /// Password for the new account; `rejected` lists why the previous one failed
    fn choose_password(
        &mut self,
        email: &Email,
        rejected: &[StrengthViolation],
    ) -> AuthResult<Option<RawPassword>>;

    /// Personal details; `None` aborts registration
    fn profile(&mut self, email: &Email) -> AuthResult<Option<Profile>>;
}

// ============================================================================
// Scripted Sources
// ============================================================================

/// Fixed sequence of passwords
#[derive(Debug, Default)]
pub struct ScriptedPasswords {
    queue: VecDeque<String>,
    requested: u32,
}

impl ScriptedPasswords {
    pub fn new<I, S>(passwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: passwords.into_iter().map(Into::into).collect(),
            requested: 0,
        }
    }

    /// Number of passwords handed out so far
    pub fn requested(&self) -> u32 {
        self.requested
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl PasswordSource for ScriptedPasswords {
    fn next_password(&mut self, _prompt: &PasswordPrompt<'_>) -> AuthResult<Option<RawPassword>> {
        let next = self.queue.pop_front().map(RawPassword::new);
        if next.is_some() {
            self.requested += 1;
        }
        Ok(next)
    }
}

/// Fixed registration answers
#[derive(Debug, Default)]
pub struct ScriptedRegistration {
    passwords: VecDeque<String>,
    profile: Option<Profile>,
    rejections: Vec<Vec<StrengthViolation>>,
}

impl ScriptedRegistration {
    pub fn new<I, S>(passwords: I, profile: Profile) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            passwords: passwords.into_iter().map(Into::into).collect(),
            profile: Some(profile),
            rejections: Vec::new(),
        }
    }

    /// Rejection feedback received for each non-first password request
    pub fn rejections(&self) -> &[Vec<StrengthViolation>] {
        &self.rejections
    }
}

impl RegistrationSource for ScriptedRegistration {
    fn choose_password(
        &mut self,
        _email: &Email,
        rejected: &[StrengthViolation],
    ) -> AuthResult<Option<RawPassword>> {
        if !rejected.is_empty() {
            self.rejections.push(rejected.to_vec());
        }
        Ok(self.passwords.pop_front().map(RawPassword::new))
    }

    fn profile(&mut self, _email: &Email) -> AuthResult<Option<Profile>> {
        Ok(self.profile.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_passwords_in_order() {
        let email = Email::from_stored("a@example.com");
        let prompt = PasswordPrompt {
            email: &email,
            attempt: 1,
            remaining: 4,
        };
        let mut source = ScriptedPasswords::new(["first", "second"]);

        assert_eq!(source.next_password(&prompt).unwrap().unwrap().as_str(), "first");
        assert_eq!(source.next_password(&prompt).unwrap().unwrap().as_str(), "second");
        assert!(source.next_password(&prompt).unwrap().is_none());
        assert_eq!(source.requested(), 2);
    }
}

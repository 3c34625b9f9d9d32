//! Login Attempt Counter
//!
//! Counts password attempts within one login. The budget is total attempts
//! (not retries) and is never persisted.

use crate::domain::value_object::security_mode::SecurityMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginAttempt {
    limit: u32,
    used: u32,
}

impl LoginAttempt {
    pub fn new(mode: SecurityMode) -> Self {
        Self::with_limit(mode.login_attempt_limit())
    }

    pub fn with_limit(limit: u32) -> Self {
        Self { limit, used: 0 }
    }

    /// Count one attempt; returns attempts remaining
    pub fn record(&mut self) -> u32 {
        self.used = self.used.saturating_add(1).min(self.limit);
        self.remaining()
    }

    pub fn used(&self) -> u32 {
        self.used
    }

    pub fn remaining(&self) -> u32 {
        self.limit - self.used
    }

    pub fn is_exhausted(&self) -> bool {
        self.used >= self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_budget_is_four_total() {
        let mut attempt = LoginAttempt::new(SecurityMode::Secure);
        assert_eq!(attempt.record(), 3);
        assert_eq!(attempt.record(), 2);
        assert_eq!(attempt.record(), 1);
        assert!(!attempt.is_exhausted());
        assert_eq!(attempt.record(), 0);
        assert!(attempt.is_exhausted());
        assert_eq!(attempt.used(), 4);
    }

    #[test]
    fn test_record_saturates_at_limit() {
        let mut attempt = LoginAttempt::with_limit(1);
        attempt.record();
        attempt.record();
        assert_eq!(attempt.used(), 1);
        assert_eq!(attempt.remaining(), 0);
    }

    #[test]
    fn test_insecure_budget() {
        let attempt = LoginAttempt::new(SecurityMode::Insecure);
        assert_eq!(attempt.remaining(), 1000);
    }
}

//! Register Account Use Case
//!
//! Creates a new account for an unknown email. The password is requested
//! until it meets the mode's strength rules; the account is stored with the
//! `user` role and the next account number.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::input::RegistrationSource;
use crate::application::profile::ProfileSealer;
use crate::domain::entity::account::Account;
use crate::domain::policy::password_policy::{PasswordPolicy, StrengthViolation};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_number::AccountNumber, account_password::RawPassword, email::Email,
};
use crate::error::{AuthError, AuthResult};

/// Register account use case
pub struct RegisterAccountUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
    policy: PasswordPolicy,
    sealer: ProfileSealer,
}

impl<R> RegisterAccountUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>, sealer: ProfileSealer) -> Self {
        let policy = PasswordPolicy::new(config.security_mode)
            .with_pepper(config.password_pepper.clone());

        Self {
            repo,
            config,
            policy,
            sealer,
        }
    }

    /// Validate a raw email and register it
    pub async fn execute_raw<G>(&self, email: &str, source: &mut G) -> AuthResult<AccountNumber>
    where
        G: RegistrationSource + ?Sized,
    {
        let email = Email::parse(email, self.config.security_mode)
            .map_err(|_| AuthError::InvalidEmail(email.trim().to_string()))?;
        self.execute(&email, source).await
    }

    pub async fn execute<G>(&self, email: &Email, source: &mut G) -> AuthResult<AccountNumber>
    where
        G: RegistrationSource + ?Sized,
    {
        if self.repo.exists_by_email(email).await? {
            tracing::warn!(email = %email, "E-mail already registered");
            return Err(AuthError::EmailTaken(email.to_string()));
        }

        let password = self.accepted_password(email, source)?;
        let material = self.policy.protect(&password)?;

        let profile = source
            .profile(email)?
            .ok_or(AuthError::RegistrationAborted)?;
        let profile = self.sealer.seal(profile)?;

        let account_number = self.repo.next_account_number().await?;
        let account = Account::new(email.clone(), account_number, material, profile);
        self.repo.create(&account).await?;

        tracing::info!(
            email = %email,
            account_number = %account_number,
            mode = %self.config.security_mode,
            "Account registered"
        );

        Ok(account_number)
    }

    /// Ask until the source gives a password the policy accepts
    fn accepted_password<G>(&self, email: &Email, source: &mut G) -> AuthResult<RawPassword>
    where
        G: RegistrationSource + ?Sized,
    {
        let mut rejected: Vec<StrengthViolation> = Vec::new();

        loop {
            let password = source
                .choose_password(email, &rejected)?
                .ok_or(AuthError::RegistrationAborted)?;

            rejected = self.policy.violations(&password);
            if rejected.is_empty() {
                return Ok(password);
            }

            tracing::info!(
                email = %email,
                violations = rejected.len(),
                "Password does not meet strength requirements"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::input::ScriptedRegistration;
    use crate::domain::entity::account::{Address, Profile};
    use crate::domain::value_object::{account_role::AccountRole, security_mode::SecurityMode};
    use crate::infra::json_store::JsonAccountRepository;
    use platform::secrets::Keyring;

    fn profile() -> Profile {
        Profile {
            name: "Test".into(),
            surname: "Shopper".into(),
            address: Address {
                line1: "1 Market Street".into(),
                line2: String::new(),
                postcode: "AB1 2CD".into(),
            },
            phone: "0123456789".into(),
        }
    }

    async fn use_case(
        mode: SecurityMode,
    ) -> (tempfile::TempDir, Arc<JsonAccountRepository>, RegisterAccountUseCase<JsonAccountRepository>) {
        let dir = tempfile::tempdir().unwrap();
        let config = Arc::new(AuthConfig::with_data_dir(dir.path()).with_mode(mode));
        let repo = Arc::new(JsonAccountRepository::new(&config.accounts_path));
        repo.initialize().await.unwrap();

        let ring = Keyring::random(&config.key_purposes());
        let sealer = ProfileSealer::for_mode(mode, &ring, &config.data_key_purpose).unwrap();
        let use_case = RegisterAccountUseCase::new(repo.clone(), config, sealer);
        (dir, repo, use_case)
    }

    #[tokio::test]
    async fn test_secure_registration_retries_weak_password() {
        let (_dir, repo, use_case) = use_case(SecurityMode::Secure).await;
        let mut source = ScriptedRegistration::new(["Az.!12", "SsDMoDuLe123!."], profile());

        let number = use_case
            .execute_raw("testemail1@gmail.com", &mut source)
            .await
            .unwrap();

        assert_eq!(number, AccountNumber::FIRST);
        assert_eq!(source.rejections(), &[vec![StrengthViolation::TooShort]]);

        let stored = repo.list().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].role, AccountRole::User);
        assert!(stored[0].secure_password.is_some());
        assert!(stored[0].insecure_password.is_none());
        assert_ne!(stored[0].profile.name, "Test");
    }

    #[tokio::test]
    async fn test_insecure_registration_accepts_weak_password() {
        let (_dir, repo, use_case) = use_case(SecurityMode::Insecure).await;
        let mut source = ScriptedRegistration::new(["Az.!12"], profile());

        use_case
            .execute_raw("testemail1@gmail.com", &mut source)
            .await
            .unwrap();

        let stored = repo.list().await.unwrap();
        assert_eq!(stored[0].insecure_password.as_deref(), Some("Az.!12"));
        assert_eq!(stored[0].profile, profile());
    }

    #[tokio::test]
    async fn test_invalid_email_commits_nothing() {
        let (_dir, repo, use_case) = use_case(SecurityMode::Secure).await;
        let mut source = ScriptedRegistration::new(["SsDMoDuLe123!."], profile());

        let result = use_case.execute_raw("testemail1@gmail", &mut source).await;
        assert!(matches!(result, Err(AuthError::InvalidEmail(_))));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let (_dir, _repo, use_case) = use_case(SecurityMode::Insecure).await;
        let mut first = ScriptedRegistration::new(["abc"], profile());
        use_case.execute_raw("dupe.mail@shop.com", &mut first).await.unwrap();

        let mut second = ScriptedRegistration::new(["abc"], profile());
        let result = use_case.execute_raw("dupe.mail@shop.com", &mut second).await;
        assert!(matches!(result, Err(AuthError::EmailTaken(_))));
    }

    #[tokio::test]
    async fn test_exhausted_source_aborts() {
        let (_dir, repo, use_case) = use_case(SecurityMode::Secure).await;
        let mut source = ScriptedRegistration::new(["weak"], profile());

        let result = use_case.execute_raw("testemail1@gmail.com", &mut source).await;
        assert!(matches!(result, Err(AuthError::RegistrationAborted)));
        assert!(repo.list().await.unwrap().is_empty());
    }
}

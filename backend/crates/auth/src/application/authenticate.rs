//! Authenticator
//!
//! Login state machine:
//!
//! ```text
//! START -> LOOKUP -> VERIFY -> SUCCESS
//!            |         |  ^
//!            |         v  |
//!            |        RETRY  (until the mode's attempt budget is spent) -> FAIL
//!            v
//!         REGISTER (unknown email; no session this round)
//! ```
//!
//! The attempt budget counts total attempts: 4 in secure mode, 1000 in
//! insecure mode. A password source that runs dry also ends in FAIL.

use std::sync::Arc;

use chrono::Utc;
use platform::secrets::SecretKeyProvider;

use crate::application::config::AuthConfig;
use crate::application::input::{PasswordPrompt, PasswordSource, RegistrationSource};
use crate::application::profile::ProfileSealer;
use crate::application::register::RegisterAccountUseCase;
use crate::application::token::{SessionClaims, TokenIssuer};
use crate::domain::entity::{account::Account, login_attempt::LoginAttempt, session::Session};
use crate::domain::policy::password_policy::PasswordPolicy;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_number::AccountNumber, email::Email, security_mode::SecurityMode,
};
use crate::error::{AuthError, AuthResult};

/// Terminal state of one login
#[derive(Debug)]
pub enum LoginOutcome {
    /// Password verified; token issued
    Authenticated(Session),
    /// Email was unknown and a new account was created (not logged in)
    Registered(AccountNumber),
    /// Attempt budget spent or password source exhausted
    Failed { attempts: u32 },
}

impl LoginOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, LoginOutcome::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            LoginOutcome::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn into_session(self) -> Option<Session> {
        match self {
            LoginOutcome::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

/// Authenticator
pub struct Authenticator<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
    policy: PasswordPolicy,
    issuer: TokenIssuer,
    registrar: RegisterAccountUseCase<R>,
}

impl<R> Authenticator<R>
where
    R: AccountRepository,
{
    pub fn new(
        repo: Arc<R>,
        config: Arc<AuthConfig>,
        issuer: TokenIssuer,
        sealer: ProfileSealer,
    ) -> Self {
        let policy = PasswordPolicy::new(config.security_mode)
            .with_pepper(config.password_pepper.clone());
        let registrar = RegisterAccountUseCase::new(repo.clone(), config.clone(), sealer);

        Self {
            repo,
            config,
            policy,
            issuer,
            registrar,
        }
    }

    /// Build with keys for the configured purposes
    pub fn from_provider(
        repo: Arc<R>,
        config: Arc<AuthConfig>,
        provider: &dyn SecretKeyProvider,
    ) -> AuthResult<Self> {
        let issuer = TokenIssuer::from_provider(provider, &config.jwt_key_purpose)?;
        let sealer =
            ProfileSealer::for_mode(config.security_mode, provider, &config.data_key_purpose)?;
        Ok(Self::new(repo, config, issuer, sealer))
    }

    pub fn mode(&self) -> SecurityMode {
        self.config.security_mode
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Run one login for `email`
    ///
    /// Known accounts are verified with passwords from `passwords`. Unknown
    /// emails go to registration using `registration`.
    pub async fn login<P, G>(
        &self,
        email: &str,
        passwords: &mut P,
        registration: &mut G,
    ) -> AuthResult<LoginOutcome>
    where
        P: PasswordSource + ?Sized,
        G: RegistrationSource + ?Sized,
    {
        let email = self.parse_email(email)?;

        match self.lookup(&email).await? {
            Some(account) => self.verify_account(account, passwords),
            None => self.register(&email, registration).await.map(LoginOutcome::Registered),
        }
    }

    /// Check a token's signature and read its claims
    pub fn verify_token(&self, token: &str) -> AuthResult<SessionClaims> {
        self.issuer.verify(token)
    }

    /// Whether an account is stored for `email`
    pub async fn email_registered(&self, email: &str) -> AuthResult<bool> {
        let email = self.parse_email(email)?;
        self.repo.exists_by_email(&email).await
    }

    /// REGISTER state: create the account, no session this round
    pub(crate) async fn register<G>(
        &self,
        email: &Email,
        registration: &mut G,
    ) -> AuthResult<AccountNumber>
    where
        G: RegistrationSource + ?Sized,
    {
        self.registrar.execute(email, registration).await
    }

    pub(crate) fn parse_email(&self, email: &str) -> AuthResult<Email> {
        Email::parse(email, self.mode())
            .map_err(|_| AuthError::InvalidEmail(email.trim().to_string()))
    }

    pub(crate) async fn lookup(&self, email: &Email) -> AuthResult<Option<Account>> {
        let account = self.repo.find_by_email(email).await?;
        tracing::info!(email = %email, found = account.is_some(), "Account lookup");
        Ok(account)
    }

    /// VERIFY/RETRY loop for an existing account
    pub(crate) fn verify_account<P>(
        &self,
        account: Account,
        passwords: &mut P,
    ) -> AuthResult<LoginOutcome>
    where
        P: PasswordSource + ?Sized,
    {
        let mode = self.mode();
        let material = account.credential(mode);
        if material.is_none() {
            tracing::warn!(
                email = %account.email,
                mode = %mode,
                "Account has no password for this mode"
            );
        }

        let mut attempt = LoginAttempt::new(mode);
        while !attempt.is_exhausted() {
            let prompt = PasswordPrompt {
                email: &account.email,
                attempt: attempt.used() + 1,
                remaining: attempt.remaining(),
            };
            let Some(password) = passwords.next_password(&prompt)? else {
                tracing::debug!(email = %account.email, "Password source exhausted");
                break;
            };

            let verified = material
                .as_ref()
                .is_some_and(|stored| self.policy.verify(&password, stored));
            if verified {
                return self.open_session(account).map(LoginOutcome::Authenticated);
            }

            let remaining = attempt.record();
            tracing::info!(email = %account.email, remaining, "Password incorrect");
        }

        tracing::warn!(
            email = %account.email,
            attempts = attempt.used(),
            "Login failed"
        );
        Ok(LoginOutcome::Failed {
            attempts: attempt.used(),
        })
    }

    fn open_session(&self, account: Account) -> AuthResult<Session> {
        let mode = self.mode();
        let role = mode.effective_role(account.role);
        if role != account.role {
            tracing::warn!(
                email = %account.email,
                stored = %account.role,
                granted = %role,
                "Insecure mode grants elevated role"
            );
        }

        let now = Utc::now();
        let token = self.issuer.issue(&account.email, role, now)?;

        tracing::info!(email = %account.email, role = %role, mode = %mode, "Login successful");
        Ok(Session::new(account, role, mode, token, now))
    }
}

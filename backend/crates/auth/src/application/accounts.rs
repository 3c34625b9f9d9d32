//! Account Operations
//!
//! Protected account operations. Every call passes the access gate first.

use std::sync::Arc;

use platform::secrets::SecretKeyProvider;

use crate::application::access_gate::AccessGate;
use crate::application::config::AuthConfig;
use crate::application::profile::ProfileSealer;
use crate::domain::entity::{account::Profile, session::Session};
use crate::domain::policy::access_policy::Operation;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_number::AccountNumber, account_role::AccountRole, email::Email,
};
use crate::error::{AuthError, AuthResult};

/// The caller's own account with a readable profile
#[derive(Debug, Clone)]
pub struct AccountView {
    pub email: Email,
    pub account_number: AccountNumber,
    pub role: AccountRole,
    pub profile: Profile,
    /// Fields could not be opened with the current data key and are shown sealed
    pub profile_sealed: bool,
}

/// One line of the staff account listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub email: Email,
    pub account_number: AccountNumber,
    pub role: AccountRole,
}

pub struct AccountService<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    sealer: ProfileSealer,
    gate: AccessGate,
}

impl<R> AccountService<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, sealer: ProfileSealer) -> Self {
        Self {
            repo,
            sealer,
            gate: AccessGate::new(),
        }
    }

    pub fn from_provider(
        repo: Arc<R>,
        config: &AuthConfig,
        provider: &dyn SecretKeyProvider,
    ) -> AuthResult<Self> {
        let sealer =
            ProfileSealer::for_mode(config.security_mode, provider, &config.data_key_purpose)?;
        Ok(Self::new(repo, sealer))
    }

    /// Current stored state of the session's account
    pub async fn view_own(&self, session: &Session) -> AuthResult<AccountView> {
        self.gate
            .run(session, Operation::ViewOwnAccount, || async {
                let account = self
                    .repo
                    .find_by_email(session.email())
                    .await?
                    .ok_or_else(|| AuthError::AccountNotFound(session.email().to_string()))?;

                let (profile, profile_sealed) = match self.sealer.open(&account) {
                    Ok(profile) => (profile, false),
                    Err(AuthError::Cipher(e)) => {
                        tracing::warn!(
                            email = %account.email,
                            error = %e,
                            "Profile cannot be opened with the current data key"
                        );
                        (account.profile.clone(), true)
                    }
                    Err(e) => return Err(e),
                };

                Ok(AccountView {
                    profile,
                    profile_sealed,
                    email: account.email,
                    account_number: account.account_number,
                    role: session.role(),
                })
            })
            .await
    }

    /// Every stored account (staff only)
    pub async fn list_all(&self, session: &Session) -> AuthResult<Vec<AccountSummary>> {
        self.gate
            .run(session, Operation::ViewAllAccounts, || async {
                let accounts = self.repo.list().await?;
                Ok(accounts
                    .into_iter()
                    .map(|account| AccountSummary {
                        email: account.email,
                        account_number: account.account_number,
                        role: account.role,
                    })
                    .collect())
            })
            .await
    }

    /// Remove an account from the store (admin only)
    pub async fn delete(&self, session: &Session, number: AccountNumber) -> AuthResult<Email> {
        self.gate
            .run(session, Operation::DeleteAccount, || async {
                let removed = self
                    .repo
                    .delete_by_number(number)
                    .await?
                    .ok_or_else(|| AuthError::AccountNotFound(format!("account number {number}")))?;

                tracing::info!(
                    account_number = %number,
                    email = %removed.email,
                    by = %session.email(),
                    "Account removed"
                );
                Ok(removed.email)
            })
            .await
    }
}

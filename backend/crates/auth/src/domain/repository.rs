//! Repository Traits
//!
//! Interfaces for account persistence. Implementation is in infrastructure layer.

use crate::domain::entity::account::Account;
use crate::domain::value_object::{account_number::AccountNumber, email::Email};
use crate::error::AuthResult;

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Find account by email (exact match)
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>>;

    /// Check if email is registered
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// All accounts in stored order
    async fn list(&self) -> AuthResult<Vec<Account>>;

    /// Number the next created account should get
    async fn next_account_number(&self) -> AuthResult<AccountNumber>;

    /// Append a new account (email must be unused)
    async fn create(&self, account: &Account) -> AuthResult<()>;

    /// Remove an account; returns the removed account if it existed
    async fn delete_by_number(&self, number: AccountNumber) -> AuthResult<Option<Account>>;
}

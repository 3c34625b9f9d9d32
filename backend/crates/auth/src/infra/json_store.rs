//! JSON File Repository
//!
//! Accounts live in one JSON array. Every mutation reads the whole file,
//! changes the collection, and overwrites the file. There is no locking:
//! two writers racing (e.g. simultaneous registrations) can lose an update.

use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use platform::password::HashedPassword;
use serde::{Deserialize, Serialize};

use crate::domain::entity::account::{Account, Address, Profile};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_number::AccountNumber, account_role::AccountRole, email::Email,
    security_mode::SecurityMode,
};
use crate::error::{AuthError, AuthResult};

/// JSON-file-backed account repository
#[derive(Debug, Clone)]
pub struct JsonAccountRepository {
    path: PathBuf,
}

impl JsonAccountRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty accounts file if none exists
    ///
    /// Returns `true` when a file was created.
    pub async fn initialize(&self) -> AuthResult<bool> {
        if tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| AuthError::data_access(&self.path, e))?
        {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AuthError::data_access(parent, e))?;
        }

        self.write_records(&[]).await?;
        tracing::info!(path = %self.path.display(), "Created empty accounts file");
        Ok(true)
    }

    async fn read_records(&self) -> AuthResult<Vec<AccountRecord>> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                IoErrorKind::NotFound => AuthError::data_access(&self.path, "file not found"),
                _ => AuthError::data_access(&self.path, e),
            })?;

        serde_json::from_str(&text)
            .map_err(|e| AuthError::data_access(&self.path, format!("malformed JSON: {e}")))
    }

    async fn write_records(&self, records: &[AccountRecord]) -> AuthResult<()> {
        let text = serde_json::to_string_pretty(records)
            .map_err(|e| AuthError::Internal(format!("Failed to serialize accounts: {e}")))?;

        tokio::fs::write(&self.path, text)
            .await
            .map_err(|e| AuthError::data_access(&self.path, e))
    }

    async fn read_accounts(&self) -> AuthResult<Vec<Account>> {
        self.read_records()
            .await?
            .into_iter()
            .map(|record| record.into_account(&self.path))
            .collect()
    }
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

impl AccountRepository for JsonAccountRepository {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>> {
        let account = self
            .read_accounts()
            .await?
            .into_iter()
            .find(|account| account.email == *email);

        tracing::debug!(email = %email, found = account.is_some(), "Account lookup");
        Ok(account)
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self
            .read_records()
            .await?
            .iter()
            .any(|record| record.email_address == email.as_str()))
    }

    async fn list(&self) -> AuthResult<Vec<Account>> {
        self.read_accounts().await
    }

    async fn next_account_number(&self) -> AuthResult<AccountNumber> {
        let records = self.read_records().await?;
        AccountNumber::next_after(records.iter().map(|record| &record.account_number))
            .ok_or_else(|| AuthError::data_access(&self.path, "no account numbers left"))
    }

    async fn create(&self, account: &Account) -> AuthResult<()> {
        let mut records = self.read_records().await?;

        if records
            .iter()
            .any(|record| record.email_address == account.email.as_str())
        {
            return Err(AuthError::EmailTaken(account.email.to_string()));
        }
        if records
            .iter()
            .any(|record| record.account_number == account.account_number)
        {
            return Err(AuthError::Internal(format!(
                "Account number {} already assigned",
                account.account_number
            )));
        }

        records.push(AccountRecord::from_account(account));
        self.write_records(&records).await?;

        tracing::info!(
            account_number = %account.account_number,
            mode = %account.registered_mode,
            "Account saved"
        );
        Ok(())
    }

    async fn delete_by_number(&self, number: AccountNumber) -> AuthResult<Option<Account>> {
        let mut records = self.read_records().await?;

        let Some(position) = records
            .iter()
            .position(|record| record.account_number == number)
        else {
            return Ok(None);
        };

        let removed = records.remove(position);
        self.write_records(&records).await?;

        tracing::info!(account_number = %number, "Account deleted");
        removed.into_account(&self.path).map(Some)
    }
}

// ============================================================================
// Record Types
// ============================================================================

/// Persisted account layout
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AccountRecord {
    email_address: String,
    account_number: AccountNumber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    secure_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    insecure_password: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    surname: String,
    #[serde(default)]
    address: Address,
    #[serde(default)]
    phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    secure: Option<bool>,
}

impl AccountRecord {
    fn from_account(account: &Account) -> Self {
        Self {
            email_address: account.email.as_str().to_string(),
            account_number: account.account_number,
            secure_password: account
                .secure_password
                .as_ref()
                .map(|hash| hash.as_phc_string().to_string()),
            insecure_password: account.insecure_password.clone(),
            name: account.profile.name.clone(),
            surname: account.profile.surname.clone(),
            address: account.profile.address.clone(),
            phone: account.profile.phone.clone(),
            role: Some(account.role.code().to_string()),
            secure: Some(account.registered_mode.is_secure()),
        }
    }

    fn into_account(self, path: &Path) -> AuthResult<Account> {
        let role = match self.role.as_deref() {
            None | Some("") => AccountRole::default(),
            Some(code) => AccountRole::from_code(code).ok_or_else(|| {
                AuthError::data_access(
                    path,
                    format!("unknown role '{code}' for account {}", self.account_number),
                )
            })?,
        };

        let secure_password = self
            .secure_password
            .filter(|hash| !hash.is_empty())
            .map(HashedPassword::from_phc_string)
            .transpose()
            .map_err(|e| {
                AuthError::data_access(
                    path,
                    format!("account {}: {e}", self.account_number),
                )
            })?;

        let registered_mode = SecurityMode::from_secure_flag(
            self.secure.unwrap_or(secure_password.is_some()),
        );

        Ok(Account {
            email: Email::from_stored(self.email_address),
            account_number: self.account_number,
            role,
            secure_password,
            insecure_password: self.insecure_password,
            profile: Profile {
                name: self.name,
                surname: self.surname,
                address: self.address,
                phone: self.phone,
            },
            registered_mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::account_password::PasswordMaterial;

    fn insecure_account(email: &str, number: u64) -> Account {
        Account::new(
            Email::from_stored(email),
            AccountNumber::new(number),
            PasswordMaterial::Plain("password1".into()),
            Profile {
                name: "Test".into(),
                surname: "Shopper".into(),
                address: Address {
                    line1: "1 Market Street".into(),
                    line2: String::new(),
                    postcode: "AB1 2CD".into(),
                },
                phone: "0123456789".into(),
            },
        )
    }

    async fn empty_store() -> (tempfile::TempDir, JsonAccountRepository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonAccountRepository::new(dir.path().join("accounts.json"));
        assert!(repo.initialize().await.unwrap());
        (dir, repo)
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let (_dir, repo) = empty_store().await;
        let account = insecure_account("shopper@example.com", 1);
        repo.create(&account).await.unwrap();

        let found = repo
            .find_by_email(&Email::from_stored("shopper@example.com"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.account_number, AccountNumber::new(1));
        assert_eq!(found.role, AccountRole::User);
        assert_eq!(found.insecure_password.as_deref(), Some("password1"));
        assert_eq!(found.profile.address.postcode, "AB1 2CD");
        assert_eq!(found.registered_mode, SecurityMode::Insecure);

        assert!(
            repo.find_by_email(&Email::from_stored("other@example.com"))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let (_dir, repo) = empty_store().await;
        repo.create(&insecure_account("dup@example.com", 1)).await.unwrap();

        let result = repo.create(&insecure_account("dup@example.com", 2)).await;
        assert!(matches!(result, Err(AuthError::EmailTaken(_))));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_next_account_number() {
        let (_dir, repo) = empty_store().await;
        assert_eq!(repo.next_account_number().await.unwrap(), AccountNumber::FIRST);

        repo.create(&insecure_account("one@example.com", 1)).await.unwrap();
        repo.create(&insecure_account("five@example.com", 5)).await.unwrap();
        assert_eq!(repo.next_account_number().await.unwrap(), AccountNumber::new(6));
    }

    #[tokio::test]
    async fn test_next_account_number_exhausted() {
        let (_dir, repo) = empty_store().await;
        repo.create(&insecure_account("last@example.com", u64::MAX))
            .await
            .unwrap();

        let result = repo.next_account_number().await;
        assert!(matches!(result, Err(AuthError::DataAccess { .. })));
    }

    #[tokio::test]
    async fn test_delete_by_number() {
        let (_dir, repo) = empty_store().await;
        repo.create(&insecure_account("keep@example.com", 1)).await.unwrap();
        repo.create(&insecure_account("drop@example.com", 2)).await.unwrap();

        let removed = repo.delete_by_number(AccountNumber::new(2)).await.unwrap();
        assert_eq!(removed.unwrap().email.as_str(), "drop@example.com");
        assert!(repo.delete_by_number(AccountNumber::new(2)).await.unwrap().is_none());

        let remaining = repo.list().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].email.as_str(), "keep@example.com");
    }

    #[tokio::test]
    async fn test_loads_legacy_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.json");
        std::fs::write(
            &path,
            r#"[
                {"email_address": "legacy@example.com", "account_number": "7",
                 "insecure_password": "abc", "name": "L", "surname": "E",
                 "address": {"line1": "x", "line2": "", "postcode": "y"},
                 "phone": "1"}
            ]"#,
        )
        .unwrap();

        let repo = JsonAccountRepository::new(&path);
        let accounts = repo.list().await.unwrap();
        assert_eq!(accounts[0].account_number, AccountNumber::new(7));
        assert_eq!(accounts[0].role, AccountRole::User);
        assert_eq!(accounts[0].registered_mode, SecurityMode::Insecure);
    }

    #[tokio::test]
    async fn test_missing_file_is_data_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonAccountRepository::new(dir.path().join("absent.json"));
        assert!(matches!(repo.list().await, Err(AuthError::DataAccess { .. })));
    }

    #[tokio::test]
    async fn test_malformed_file_is_data_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.json");
        std::fs::write(&path, "{ not json").unwrap();
        let repo = JsonAccountRepository::new(&path);
        assert!(matches!(
            repo.exists_by_email(&Email::from_stored("a@b.com")).await,
            Err(AuthError::DataAccess { .. })
        ));

        std::fs::write(
            &path,
            r#"[{"email_address": "a@b.com", "account_number": 1, "secure_password": "plain"}]"#,
        )
        .unwrap();
        assert!(matches!(repo.list().await, Err(AuthError::DataAccess { .. })));
    }

    #[tokio::test]
    async fn test_initialize_keeps_existing_file() {
        let (_dir, repo) = empty_store().await;
        repo.create(&insecure_account("kept@example.com", 1)).await.unwrap();
        assert!(!repo.initialize().await.unwrap());
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }
}

//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use std::path::PathBuf;

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::crypto::CipherError;
use platform::password::PasswordHashError;
use platform::secrets::SecretError;
use thiserror::Error;

use crate::domain::policy::access_policy::Operation;
use crate::domain::value_object::account_role::AccountRole;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email does not match the active mode's pattern
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// Generic input validation failure
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Email is already registered
    #[error("E-mail already registered: {0}")]
    EmailTaken(String),

    /// Account lookup failed where an account is required
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Registration input ended before an acceptable password was given
    #[error("Registration aborted before a valid password was provided")]
    RegistrationAborted,

    /// Role is not permitted to run the operation
    #[error("Role '{role}' is not allowed to {operation}")]
    AccessDenied {
        operation: Operation,
        role: AccountRole,
    },

    /// Brute-force simulation requested outside insecure mode
    #[error("Brute-force simulation is only available in insecure mode")]
    BruteForceDisabled,

    /// Session token failed signature or format checks
    #[error("Invalid session token")]
    InvalidToken,

    /// Persisted data missing or malformed
    #[error("Data access failed for {path}: {reason}")]
    DataAccess { path: PathBuf, reason: String },

    /// Secret-key provider failure
    #[error("Secret key error: {0}")]
    Secret(#[from] SecretError),

    /// Field encryption failure
    #[error("Profile encryption error: {0}")]
    Cipher(#[from] CipherError),

    /// Password hashing failure
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordHashError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Build a data-access error for a file path
    pub fn data_access(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        AuthError::DataAccess {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidEmail(_)
            | AuthError::Validation(_)
            | AuthError::RegistrationAborted => ErrorKind::Validation,
            AuthError::EmailTaken(_) => ErrorKind::Conflict,
            AuthError::AccountNotFound(_) => ErrorKind::NotFound,
            AuthError::AccessDenied { .. } | AuthError::BruteForceDisabled => {
                ErrorKind::Forbidden
            }
            AuthError::InvalidToken => ErrorKind::Unauthenticated,
            AuthError::DataAccess { .. } => ErrorKind::DataAccess,
            AuthError::Secret(_) => ErrorKind::Configuration,
            AuthError::Cipher(_) | AuthError::PasswordHash(_) | AuthError::Internal(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Whether this is an authorization denial (recoverable, never fatal)
    pub fn is_denial(&self) -> bool {
        matches!(self, AuthError::AccessDenied { .. })
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::DataAccess { path, reason } => {
                tracing::error!(path = %path.display(), reason = %reason, "Data access error");
            }
            AuthError::Secret(e) => {
                tracing::error!(error = %e, "Secret key error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::AccessDenied { operation, role } => {
                tracing::warn!(operation = %operation, role = %role, "Access denied");
            }
            AuthError::InvalidToken => {
                tracing::warn!("Invalid session token presented");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::Validation => AuthError::Validation(err.message().to_string()),
            ErrorKind::NotFound => AuthError::AccountNotFound(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind as JwtErrorKind;

        match err.kind() {
            JwtErrorKind::InvalidToken
            | JwtErrorKind::InvalidSignature
            | JwtErrorKind::InvalidAlgorithm
            | JwtErrorKind::Base64(_)
            | JwtErrorKind::Json(_)
            | JwtErrorKind::Utf8(_) => AuthError::InvalidToken,
            _ => AuthError::Internal(format!("Token processing failed: {err}")),
        }
    }
}

//! Auth (Authentication and Access Control) Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, policies, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - JSON file persistence
//!
//! ## Features
//! - Email + password login with a per-login attempt budget
//! - Registration fallback for unknown emails
//! - HS256 session tokens `{email, role, issued_at}`
//! - Role-based access gate (user, clerk, admin)
//! - Brute-force demonstration against a known-weak wordlist
//!
//! ## Security Modes
//! - Secure: Argon2id hashes, strict email pattern, 4 attempts, profile
//!   fields sealed with AES-256-GCM
//! - Insecure: plaintext passwords, loose email pattern, 1000 attempts,
//!   every loaded account acts as admin

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::json_store::JsonAccountRepository;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod models {
    pub use crate::domain::entity::{
        account::{Account, Address, Profile},
        session::Session,
    };
    pub use crate::domain::policy::access_policy::{AllowedRoles, Operation, authorize};
    pub use crate::domain::policy::password_policy::{
        PasswordPolicy, StrengthViolation, meets_strength, verify,
    };
    pub use crate::domain::value_object::{
        account_number::AccountNumber,
        account_password::{PasswordMaterial, RawPassword},
        account_role::AccountRole,
        email::Email,
        security_mode::SecurityMode,
        session_token::SessionToken,
    };
}

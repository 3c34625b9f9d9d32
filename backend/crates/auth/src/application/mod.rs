//! Application Layer
//!
//! Use cases and application services.

pub mod access_gate;
pub mod accounts;
pub mod authenticate;
pub mod brute_force;
pub mod config;
pub mod input;
pub mod profile;
pub mod register;
pub mod token;

// Re-exports
pub use access_gate::{AccessGate, guarded};
pub use accounts::{AccountService, AccountSummary, AccountView};
pub use authenticate::{Authenticator, LoginOutcome};
pub use brute_force::{BruteForceOutcome, BruteForceReport, BruteForceSimulator, Wordlist};
pub use config::AuthConfig;
pub use input::{
    PasswordPrompt, PasswordSource, RegistrationSource, ScriptedPasswords, ScriptedRegistration,
};
pub use profile::ProfileSealer;
pub use register::RegisterAccountUseCase;
pub use token::{SessionClaims, TokenIssuer};

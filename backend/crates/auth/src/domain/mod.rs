//! Domain Layer
//!
//! Contains entities, value objects, policies, and repository traits.

pub mod entity;
pub mod policy;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{account::Account, session::Session};
pub use repository::AccountRepository;

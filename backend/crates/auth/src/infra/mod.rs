//! Infrastructure Layer
//!
//! File-backed persistence.

pub mod json_store;

pub use json_store::JsonAccountRepository;

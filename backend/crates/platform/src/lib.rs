//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random bytes, Base64, AES-256-GCM field sealing)
//! - Password hashing (Argon2id with zeroized clear text)
//! - Secret-key provider (signing / encryption keys by purpose)

pub mod crypto;
pub mod password;
pub mod secrets;

//! Value Object Module

pub mod account_number;
pub mod account_password;
pub mod account_role;
pub mod email;
pub mod security_mode;
pub mod session_token;

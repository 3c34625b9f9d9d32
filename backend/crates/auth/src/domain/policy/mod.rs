//! Policy Module
//!
//! Mode-aware password rules and the role-to-operation access table.

pub mod access_policy;
pub mod password_policy;

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    #[default]
    User,
    Clerk,
    Admin,
}

impl AccountRole {
    pub const ALL: [AccountRole; 3] = [AccountRole::User, AccountRole::Clerk, AccountRole::Admin];

    #[inline]
    pub const fn code(&self) -> &'static str {
        use AccountRole::*;
        match self {
            User => "user",
            Clerk => "clerk",
            Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_staff(&self) -> bool {
        matches!(self, AccountRole::Clerk | AccountRole::Admin)
    }

    /// Parse a stored role code; unknown codes yield `None`
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use AccountRole::*;
        match code.trim() {
            "user" => Some(User),
            "clerk" => Some(Clerk),
            "admin" => Some(Admin),
            _ => None,
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

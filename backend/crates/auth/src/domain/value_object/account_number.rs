//! Account Number Value Object
//!
//! Sequential identifier: the first account gets 1, every later one gets the
//! current maximum plus one. Stored files may carry it as an integer or as a
//! numeric string; both load.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AccountNumber(u64);

impl AccountNumber {
    pub const FIRST: AccountNumber = AccountNumber(1);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Number following this one; `None` once `u64` is used up
    pub const fn next(&self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Number for the next account given everything already stored
    pub fn next_after<'a>(existing: impl IntoIterator<Item = &'a AccountNumber>) -> Option<Self> {
        match existing.into_iter().max() {
            Some(highest) => highest.next(),
            None => Some(Self::FIRST),
        }
    }
}

impl FromStr for AccountNumber {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Ok(Self(s.trim().parse::<u64>()?))
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for AccountNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self(n)),
            Raw::Text(s) => s
                .trim()
                .parse::<u64>()
                .map(Self)
                .map_err(serde::de::Error::custom),
        }
    }
}

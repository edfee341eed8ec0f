//! Expense identifiers
//!
//! Ids are time-ordered UUIDv7 values: unique across imports and roughly
//! monotonic in creation order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const DISPLAY_PREFIX: &str = "exp-";

/// Identifier of a single expense record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(Uuid);

impl ExpenseId {
    /// Create a new time-ordered ID
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Short form used in listings, e.g. `exp-9c41d2e7`
    ///
    /// Taken from the random tail; the leading bits are a timestamp and
    /// repeat for ids created close together.
    pub fn short(&self) -> String {
        format!("{}{}", DISPLAY_PREFIX, &self.0.simple().to_string()[24..])
    }

    /// Whether a short form (with or without `exp-`) refers to this id
    pub fn matches_short(&self, fragment: &str) -> bool {
        let fragment = fragment.trim();
        let fragment = fragment.strip_prefix(DISPLAY_PREFIX).unwrap_or(fragment);
        !fragment.is_empty() && self.0.simple().to_string().ends_with(&fragment.to_lowercase())
    }
}

impl Default for ExpenseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ExpenseId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for ExpenseId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix(DISPLAY_PREFIX).unwrap_or(s);
        Ok(Self(Uuid::parse_str(s)?))
    }
}

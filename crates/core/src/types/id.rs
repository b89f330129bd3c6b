//! Newtype ids for type-safe entity references.
//!
//! `PurchaseId` is the primary key of a purchase record, generated by the
//! recorder at creation and immutable afterwards. `UserId` is an opaque
//! caller-supplied identifier used as the secondary-index partition key;
//! the only constraint it carries is non-emptiness.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a purchase record.
///
/// Wraps a UUID v4. Two generated ids never collide in practice; the
/// recorder relies on this instead of coordinating with the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseId(Uuid);

impl PurchaseId {
    /// Generate a fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for PurchaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for PurchaseId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Errors that can occur when parsing a [`UserId`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum UserIdError {
    /// The input string is empty.
    #[error("user id cannot be empty")]
    Empty,
}

/// An opaque user identifier.
///
/// Not validated beyond presence: any non-empty string the caller supplies
/// is accepted as-is and used verbatim as the partition key of the
/// `UserId` secondary index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Parse a `UserId` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`UserIdError::Empty`] if the input is empty.
    pub fn parse(s: &str) -> Result<Self, UserIdError> {
        if s.is_empty() {
            return Err(UserIdError::Empty);
        }
        Ok(Self(s.to_owned()))
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_purchase_id_unique_across_many_generations() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(PurchaseId::generate()));
        }
    }

    #[test]
    fn test_purchase_id_serializes_as_plain_string() {
        let id = PurchaseId::generate();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }

    #[test]
    fn test_user_id_rejects_empty() {
        assert!(UserId::parse("").is_err());
    }

    #[test]
    fn test_user_id_accepts_arbitrary_nonempty_strings() {
        let id = UserId::parse("u1").unwrap();
        assert_eq!(id.as_str(), "u1");
        // No format is imposed beyond presence
        assert!(UserId::parse("  spaced  ").is_ok());
    }
}

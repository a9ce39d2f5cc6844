//! Normalised kanban status keys.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const STATUS_KEY_MAX_CHARS: usize = 64;

/// Upper-case status key with underscores for whitespace, such as
/// `IN_REVIEW`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StatusKey(String);

impl StatusKey {
    /// Status of the default "To do" column.
    pub const TODO: &'static str = "TODO";
    /// Status of the default "In progress" column.
    pub const IN_PROGRESS: &'static str = "IN_PROGRESS";
    /// Status of the default "Done" column.
    pub const DONE: &'static str = "DONE";

    /// Normalises `value` into a status key.
    ///
    /// Leading and trailing whitespace is dropped, inner whitespace runs and
    /// hyphens become a single `_`, and letters are upper-cased.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidStatusKey`] when the normalised key
    /// is empty or longer than 64 characters.
    pub fn normalise(value: &str) -> Result<Self, BoardDomainError> {
        let key = value
            .split(|c: char| c.is_whitespace() || c == '-')
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("_")
            .to_uppercase();
        if key.is_empty() || key.chars().count() > STATUS_KEY_MAX_CHARS {
            return Err(BoardDomainError::InvalidStatusKey(value.to_owned()));
        }
        Ok(Self(key))
    }

    /// Returns the `TODO` key.
    #[must_use]
    pub fn todo() -> Self {
        Self::from_static(Self::TODO)
    }

    /// Wraps one of the built-in keys, which are already normalised.
    #[must_use]
    pub(crate) fn from_static(key: &'static str) -> Self {
        Self(key.to_owned())
    }

    /// Returns the key as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StatusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for StatusKey {
    type Error = BoardDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::normalise(&value)
    }
}

impl From<StatusKey> for String {
    fn from(value: StatusKey) -> Self {
        value.0
    }
}

//! Field types shared by user stories and tasks.

use super::{DescriptionTooLong, ParsePriorityError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum description length in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 2000;

/// Work item priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority.
    #[default]
    Medium,
    /// High priority.
    High,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// Free-form description limited to [`DESCRIPTION_MAX_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    /// Creates a description.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionTooLong`] when the value has more than
    /// [`DESCRIPTION_MAX_CHARS`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, DescriptionTooLong> {
        let text = value.into();
        let actual = text.chars().count();
        if actual > DESCRIPTION_MAX_CHARS {
            return Err(DescriptionTooLong {
                max: DESCRIPTION_MAX_CHARS,
                actual,
            });
        }
        Ok(Self(text))
    }

    /// Validates an optional description, treating blank text as absent.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionTooLong`] for an over-long value.
    pub fn optional(value: Option<String>) -> Result<Option<Self>, DescriptionTooLong> {
        value
            .filter(|text| !text.trim().is_empty())
            .map(Self::new)
            .transpose()
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

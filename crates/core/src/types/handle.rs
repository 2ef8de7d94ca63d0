//! URL handle type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Handle`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HandleError {
    /// The input is empty or only whitespace.
    #[error("handle cannot be empty")]
    Empty,
    /// The input is too long.
    #[error("handle must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character that can never appear in a handle.
    #[error("handle contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// A Shopify handle: the URL slug that identifies a product, collection or
/// page within a store.
///
/// Handles are the external key used for routing, so the gateway refuses to
/// dispatch an upstream query with an empty or malformed one.
///
/// ## Constraints
///
/// - Surrounding whitespace is trimmed
/// - Length: 1-255 characters
/// - No whitespace, control characters or `/`
///
/// ## Examples
///
/// ```
/// use shopfront_core::Handle;
///
/// assert!(Handle::parse("summer-sale").is_ok());
/// assert!(Handle::parse("  classic-tee ").is_ok());
///
/// assert!(Handle::parse("").is_err());
/// assert!(Handle::parse("   ").is_err());
/// assert!(Handle::parse("a/b").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Handle(String);

impl Handle {
    /// Maximum length of a handle accepted by Shopify.
    pub const MAX_LENGTH: usize = 255;

    /// Parse a `Handle` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, longer than
    /// 255 characters, or contains whitespace, control characters or `/`.
    pub fn parse(s: &str) -> Result<Self, HandleError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(HandleError::Empty);
        }

        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(HandleError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = trimmed
            .chars()
            .find(|c| c.is_whitespace() || c.is_control() || *c == '/')
        {
            return Err(HandleError::InvalidCharacter(c));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the handle as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Handle` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Handle {
    type Error = HandleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Handle> for String {
    fn from(handle: Handle) -> Self {
        handle.0
    }
}

impl core::str::FromStr for Handle {
    type Err = HandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

//! Page size (`first`) for connection queries.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PageSize`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PageSizeError {
    /// The input is not an integer.
    #[error("page size must be an integer, got {0:?}")]
    NotANumber(String),
    /// The input is outside `1..=250`.
    #[error("page size must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// The rejected value.
        value: i64,
        /// Smallest accepted value.
        min: u16,
        /// Largest accepted value.
        max: u16,
    },
}

/// Number of edges requested from a Shopify connection.
///
/// Shopify rejects connection queries asking for more than 250 nodes, and a
/// page of zero is never useful, so only `1..=250` is representable.
///
/// ```
/// use shopfront_core::PageSize;
///
/// let default = PageSize::saturating(12);
/// assert_eq!(PageSize::parse(None, default).unwrap().get(), 12);
/// assert_eq!(PageSize::parse(Some("3"), default).unwrap().get(), 3);
/// assert!(PageSize::parse(Some("0"), default).is_err());
/// assert!(PageSize::parse(Some("lots"), default).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PageSize(u16);

impl PageSize {
    /// Smallest page size.
    pub const MIN: u16 = 1;
    /// Largest page size accepted by Shopify connections.
    pub const MAX: u16 = 250;

    /// Create a page size, rejecting values outside `1..=250`.
    ///
    /// # Errors
    ///
    /// Returns [`PageSizeError::OutOfRange`] for values outside the range.
    pub fn new(value: i64) -> Result<Self, PageSizeError> {
        match u16::try_from(value) {
            Ok(n) if (Self::MIN..=Self::MAX).contains(&n) => Ok(Self(n)),
            _ => Err(PageSizeError::OutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            }),
        }
    }

    /// Create a page size, clamping into `1..=250`.
    #[must_use]
    pub const fn saturating(value: u16) -> Self {
        if value < Self::MIN {
            Self(Self::MIN)
        } else if value > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(value)
        }
    }

    /// Parse an optional query-string value, falling back to `default` when
    /// the parameter was omitted or left blank.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is present but is not an integer in range.
    pub fn parse(raw: Option<&str>, default: Self) -> Result<Self, PageSizeError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(default),
            Some(s) => {
                let value = s
                    .parse::<i64>()
                    .map_err(|_| PageSizeError::NotANumber(s.to_owned()))?;
                Self::new(value)
            }
        }
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Get the value as a `usize` for slicing.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for PageSize {
    type Error = PageSizeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for i64 {
    fn from(size: PageSize) -> Self {
        Self::from(size.0)
    }
}

//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (a usable notice lookup key, a
//! supported rows-per-page step) so that once a value reaches the service
//! layer it can be treated as trusted.
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Requested rows-per-page value is not one of the offered steps.
    #[error("unsupported page size: {0}")]
    UnsupportedPageSize(u32),
}

/// Lookup key of a bid notice.
///
/// Upstream stores `bid_ntce_no_list` as the notice number concatenated with
/// a three character notice order, while the detail endpoint is keyed by the
/// bare notice number. The suffix has to be stripped before a lookup.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NoticeNo(String);

impl NoticeNo {
    /// Wraps an already derived notice number, rejecting empty input.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Derives the lookup key from a raw `bid_ntce_no_list` value by dropping
    /// the trailing three characters (the notice order).
    ///
    /// Returns `None` when the value holds nothing besides the suffix; such
    /// rows have no notice to look up yet.
    pub fn from_list_field(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let chars = trimmed.chars().count();
        if chars <= 3 {
            return None;
        }
        let cut = trimmed.char_indices().nth(chars - 3).map(|(idx, _)| idx)?;
        Some(Self(trimmed[..cut].to_string()))
    }

    /// Borrow the notice number as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NoticeNo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for NoticeNo {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for NoticeNo {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NoticeNo> for String {
    fn from(value: NoticeNo) -> Self {
        value.0
    }
}

/// Rows-per-page step offered by the result table.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "u32")]
pub struct PageSize(u32);

impl PageSize {
    /// Steps offered by the UI, in display order.
    pub const STEPS: [u32; 4] = [10, 20, 50, 100];

    /// Creates a page size ensuring it is one of the offered steps.
    pub fn new(value: u32) -> Result<Self, TypeConstraintError> {
        if Self::STEPS.contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::UnsupportedPageSize(value))
        }
    }

    /// Returns the raw `u32` backing this page size.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(10)
    }
}

impl Display for PageSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for PageSize {
    type Error = TypeConstraintError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for u32 {
    fn from(value: PageSize) -> Self {
        value.0
    }
}

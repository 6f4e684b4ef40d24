//! Validated page coordinates.
//!
//! Page numbers are 1-indexed and page sizes come from a fixed enumerated
//! set, so an out-of-range value is rejected at the edge instead of leaking
//! into offset arithmetic.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors raised when constructing page coordinates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageValidationError {
    /// Page numbers start at 1.
    #[error("page numbers are 1-indexed; 0 is not a valid page")]
    ZeroPage,
    /// The value is not one of the supported page sizes.
    #[error("{value} is not a supported page size (expected one of 10, 50, 100)")]
    UnsupportedPageSize {
        /// The rejected raw value.
        value: u32,
    },
}

/// 1-indexed page number.
///
/// Serialises as a plain integer; deserialisation rejects 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageNumber(u32);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(1);

    /// Validate and construct a page number.
    ///
    /// # Errors
    ///
    /// Returns [`PageValidationError::ZeroPage`] for 0.
    pub fn new(value: u32) -> Result<Self, PageValidationError> {
        if value == 0 {
            return Err(PageValidationError::ZeroPage);
        }
        Ok(Self(value))
    }

    /// The raw 1-indexed value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The preceding page, saturating at the first page.
    #[must_use]
    pub const fn previous(self) -> Self {
        if self.0 <= 1 { Self(1) } else { Self(self.0 - 1) }
    }

    /// The following page.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u32> for PageNumber {
    type Error = PageValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageNumber> for u32 {
    fn from(value: PageNumber) -> Self {
        value.get()
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Enumerated page size offered by listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageSize {
    /// Ten records per page (the default).
    Ten,
    /// Fifty records per page.
    Fifty,
    /// One hundred records per page.
    Hundred,
}

impl PageSize {
    /// All supported sizes, in the order they are offered to users.
    pub const ALL: [Self; 3] = [Self::Ten, Self::Fifty, Self::Hundred];

    /// Validate and construct a page size from a raw value.
    ///
    /// # Errors
    ///
    /// Returns [`PageValidationError::UnsupportedPageSize`] when `value` is
    /// not in the enumerated set.
    pub fn new(value: u32) -> Result<Self, PageValidationError> {
        match value {
            10 => Ok(Self::Ten),
            50 => Ok(Self::Fifty),
            100 => Ok(Self::Hundred),
            other => Err(PageValidationError::UnsupportedPageSize { value: other }),
        }
    }

    /// The number of records per page.
    #[must_use]
    pub const fn get(self) -> u32 {
        match self {
            Self::Ten => 10,
            Self::Fifty => 50,
            Self::Hundred => 100,
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::Ten
    }
}

impl TryFrom<u32> for PageSize {
    type Error = PageValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for u32 {
    fn from(value: PageSize) -> Self {
        value.get()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// A page coordinate pair ready to translate into offset/limit SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageRequest {
    /// Requested page, 1-indexed.
    pub page: PageNumber,
    /// Requested page size.
    pub per_page: PageSize,
}

impl PageRequest {
    /// Construct a request from validated coordinates.
    #[must_use]
    pub const fn new(page: PageNumber, per_page: PageSize) -> Self {
        Self { page, per_page }
    }

    /// Zero-based record offset for the requested page.
    #[must_use]
    pub const fn offset(self) -> i64 {
        (self.page.get() as i64 - 1) * self.per_page.get() as i64
    }

    /// Record limit for the requested page.
    #[must_use]
    pub const fn limit(self) -> i64 {
        self.per_page.get() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn zero_page_is_rejected() {
        assert_eq!(PageNumber::new(0), Err(PageValidationError::ZeroPage));
    }

    #[test]
    fn previous_saturates_at_the_first_page() {
        assert_eq!(PageNumber::FIRST.previous(), PageNumber::FIRST);
        let third = PageNumber::new(3).expect("valid page");
        assert_eq!(third.previous().get(), 2);
    }

    #[rstest]
    #[case(10, Some(PageSize::Ten))]
    #[case(50, Some(PageSize::Fifty))]
    #[case(100, Some(PageSize::Hundred))]
    #[case(0, None)]
    #[case(25, None)]
    fn page_sizes_come_from_the_enumerated_set(
        #[case] raw: u32,
        #[case] expected: Option<PageSize>,
    ) {
        assert_eq!(PageSize::new(raw).ok(), expected);
    }

    #[rstest]
    #[case(1, PageSize::Ten, 0, 10)]
    #[case(2, PageSize::Ten, 10, 10)]
    #[case(3, PageSize::Fifty, 100, 50)]
    fn offsets_are_zero_based(
        #[case] page: u32,
        #[case] per_page: PageSize,
        #[case] offset: i64,
        #[case] limit: i64,
    ) {
        let page = PageNumber::new(page).expect("valid page");
        let request = PageRequest::new(page, per_page);
        assert_eq!(request.offset(), offset);
        assert_eq!(request.limit(), limit);
    }

    #[test]
    fn page_number_deserialisation_rejects_zero() {
        let error = serde_json::from_str::<PageNumber>("0").expect_err("0 must fail");
        assert!(error.to_string().contains("1-indexed"));
    }
}

//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// The reserved fallback category.
///
/// It always exists in the store, cannot be deleted, and its keyword list is
/// never matched against.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryName] if `name` is
    /// empty after trimming.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-empty invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Whether this is the reserved [UNCATEGORIZED] category.
    pub fn is_reserved(&self) -> bool {
        self.0 == UNCATEGORIZED
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Form data for category creation.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryFormData {
    /// The name for the new category.
    pub name: String,
    /// The page to redirect back to once the category has been created.
    #[serde(default)]
    pub redirect_to: Option<String>,
}

/// Form data for adding or removing a keyword.
#[derive(Debug, Serialize, Deserialize)]
pub struct KeywordFormData {
    /// The keyword text.
    pub keyword: String,
}

#[cfg(test)]
mod category_name_tests {
    use crate::Error;

    use super::{CategoryName, UNCATEGORIZED};

    #[test]
    fn trims_whitespace() {
        let name = CategoryName::new("  Food  ").unwrap();

        assert_eq!(name.as_ref(), "Food");
    }

    #[test]
    fn rejects_empty_name() {
        assert_eq!(CategoryName::new(""), Err(Error::EmptyCategoryName));
        assert_eq!(CategoryName::new("   "), Err(Error::EmptyCategoryName));
    }

    #[test]
    fn detects_reserved_name() {
        assert!(CategoryName::new_unchecked(UNCATEGORIZED).is_reserved());
        assert!(!CategoryName::new_unchecked("Food").is_reserved());
    }
}

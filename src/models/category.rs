//! Category model
//!
//! A user-facing label used to classify expenses and budgets.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// A spending category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,
}

impl Category {
    /// Create a new category
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Find a category by id in a fetched list
pub fn find_category(categories: &[Category], id: CategoryId) -> Option<&Category> {
    categories.iter().find(|c| c.id == id)
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
}

impl CategoryValidationError {
    /// Name of the rejected field
    pub fn field(&self) -> &'static str {
        "name"
    }
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(Category::new(CategoryId::new(1), "Alimentação").validate().is_ok());
        assert_eq!(
            Category::new(CategoryId::new(2), "   ").validate(),
            Err(CategoryValidationError::EmptyName)
        );
    }

    #[test]
    fn test_find_category() {
        let categories = vec![
            Category::new(CategoryId::new(1), "Renda"),
            Category::new(CategoryId::new(2), "Transporte"),
        ];
        assert_eq!(
            find_category(&categories, CategoryId::new(2)).map(|c| c.name.as_str()),
            Some("Transporte")
        );
        assert!(find_category(&categories, CategoryId::new(9)).is_none());
    }
}

//! Categories

use std::fmt;

use serde::Deserialize;

/// Product category of a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryType {
    /// Food and everyday consumables
    Groceries,

    /// Apparel
    Clothing,

    /// Electronics
    Electronics,

    /// Household goods
    Household,

    /// Anything not covered by another category
    Other,
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CategoryType::Groceries => "groceries",
            CategoryType::Clothing => "clothing",
            CategoryType::Electronics => "electronics",
            CategoryType::Household => "household",
            CategoryType::Other => "other",
        };

        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_deserializes_from_snake_case() -> Result<(), serde_norway::Error> {
        let category: CategoryType = serde_norway::from_str("groceries")?;

        assert_eq!(category, CategoryType::Groceries);

        Ok(())
    }

    #[test]
    fn category_rejects_unknown_name() {
        let result: Result<CategoryType, _> = serde_norway::from_str("furniture");

        assert!(result.is_err());
    }

    #[test]
    fn category_display_matches_config_name() {
        assert_eq!(CategoryType::Clothing.to_string(), "clothing");
        assert_eq!(CategoryType::Household.to_string(), "household");
    }
}

//! Generic Discount
//!
//! Value, type and category exclusions shared by every discount rule.

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;

use crate::{
    categories::CategoryType,
    discounts::{DiscountError, DiscountType, round_amount},
};

/// A percentage or flat amount, optionally excluded from some categories.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericDiscount {
    kind: DiscountType,
    value: Decimal,
    excluded_categories: Option<FxHashSet<CategoryType>>,
}

impl GenericDiscount {
    /// Create a discount from possibly incomplete configuration.
    ///
    /// A missing `kind` defaults to [`DiscountType::Percentage`]; missing
    /// exclusions mean the discount applies to every category.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::MissingValue`] if `value` is `None`.
    pub fn new(
        kind: Option<DiscountType>,
        value: Option<Decimal>,
        excluded_categories: Option<FxHashSet<CategoryType>>,
    ) -> Result<Self, DiscountError> {
        let value = value.ok_or(DiscountError::MissingValue)?;

        Ok(Self {
            kind: kind.unwrap_or_default(),
            value,
            excluded_categories,
        })
    }

    /// A percentage discount, in percentage points (30 means 30%).
    pub fn percentage(value: Decimal) -> Self {
        Self {
            kind: DiscountType::Percentage,
            value,
            excluded_categories: None,
        }
    }

    /// A flat amount discount.
    pub fn amount(value: Decimal) -> Self {
        Self {
            kind: DiscountType::Amount,
            value,
            excluded_categories: None,
        }
    }

    /// Exclude the given categories from this discount.
    #[must_use]
    pub fn excluding(mut self, categories: impl IntoIterator<Item = CategoryType>) -> Self {
        self.excluded_categories
            .get_or_insert_with(FxHashSet::default)
            .extend(categories);

        self
    }

    /// How `value` is interpreted
    pub fn kind(&self) -> DiscountType {
        self.kind
    }

    /// Configured value
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Excluded categories, `None` when unrestricted
    pub fn excluded_categories(&self) -> Option<&FxHashSet<CategoryType>> {
        self.excluded_categories.as_ref()
    }

    /// Return whether the discount may apply to `category`.
    pub fn is_category_applicable(&self, category: Option<CategoryType>) -> bool {
        match (&self.excluded_categories, category) {
            (Some(excluded), Some(category)) => !excluded.contains(&category),
            _ => true,
        }
    }

    /// Deduction for `running_net`, rounded half-up to two places.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::Overflow`] if the percentage cannot be applied.
    pub fn amount_for(&self, running_net: Decimal) -> Result<Decimal, DiscountError> {
        let amount = match self.kind {
            DiscountType::Percentage => self
                .value
                .checked_div(Decimal::ONE_HUNDRED)
                .and_then(|rate| rate.checked_mul(running_net))
                .ok_or(DiscountError::Overflow)?,
            DiscountType::Amount => self.value,
        };

        Ok(round_amount(amount))
    }
}

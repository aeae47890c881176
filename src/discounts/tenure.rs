//! Tenure Discount
//!
//! A loyalty discount for customers of at least a minimum number of months.

use rust_decimal::Decimal;

use crate::discounts::{DiscountError, Discountable, GenericDiscount};

/// A discount granted after a minimum customer tenure
#[derive(Debug, Clone, PartialEq)]
pub struct TenureDiscount {
    name: String,
    minimum_months: i32,
    discount: GenericDiscount,
}

impl TenureDiscount {
    /// Create a new tenure discount.
    pub fn new(name: impl Into<String>, minimum_months: i32, discount: GenericDiscount) -> Self {
        Self {
            name: name.into(),
            minimum_months,
            discount,
        }
    }

    /// Return the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the tenure required, in whole months
    pub fn minimum_months(&self) -> i32 {
        self.minimum_months
    }

    /// Return the shared discount configuration
    pub fn generic(&self) -> &GenericDiscount {
        &self.discount
    }

    /// Return whether the user has been a customer for at least
    /// `minimum_months` on the evaluation date, in a non-excluded category.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::Date`] if the tenure cannot be computed.
    pub fn is_applicable<D>(&self, discountable: &D) -> Result<bool, DiscountError>
    where
        D: Discountable + ?Sized,
    {
        if !self.discount.is_category_applicable(discountable.category()) {
            return Ok(false);
        }

        let months = discountable
            .user()
            .tenure_months(discountable.evaluated_on())?;

        Ok(months >= self.minimum_months)
    }

    /// Calculate the deduction, or `None` when not applicable.
    ///
    /// # Errors
    ///
    /// Returns an error if the tenure cannot be computed or the amount overflows.
    pub fn calculate<D>(&self, discountable: &D) -> Result<Option<Decimal>, DiscountError>
    where
        D: Discountable + ?Sized,
    {
        if !self.is_applicable(discountable)? {
            return Ok(None);
        }

        self.discount.amount_for(discountable.running_net()).map(Some)
    }
}

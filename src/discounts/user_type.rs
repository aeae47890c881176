//! User Type Discount
//!
//! A discount granted purely by membership tier, e.g. 30% for employees.

use rust_decimal::Decimal;

use crate::{
    discounts::{DiscountError, Discountable, GenericDiscount},
    users::UserType,
};

/// A discount for users of one membership tier
#[derive(Debug, Clone, PartialEq)]
pub struct UserTypeDiscount {
    name: String,
    user_type: UserType,
    discount: GenericDiscount,
}

impl UserTypeDiscount {
    /// Create a new user type discount.
    pub fn new(name: impl Into<String>, user_type: UserType, discount: GenericDiscount) -> Self {
        Self {
            name: name.into(),
            user_type,
            discount,
        }
    }

    /// Return the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the tier this discount is granted to
    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    /// Return the shared discount configuration
    pub fn generic(&self) -> &GenericDiscount {
        &self.discount
    }

    /// Return whether the bill's user has the configured tier and the
    /// bill's category is not excluded.
    pub fn is_applicable<D>(&self, discountable: &D) -> bool
    where
        D: Discountable + ?Sized,
    {
        discountable.user().user_type() == self.user_type
            && self.discount.is_category_applicable(discountable.category())
    }

    /// Calculate the deduction, or `None` when not applicable.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::Overflow`] if the amount cannot be represented.
    pub fn calculate<D>(&self, discountable: &D) -> Result<Option<Decimal>, DiscountError>
    where
        D: Discountable + ?Sized,
    {
        if !self.is_applicable(discountable) {
            return Ok(None);
        }

        self.discount.amount_for(discountable.running_net()).map(Some)
    }
}

//! Per Multiple Amount Discount
//!
//! A fixed amount off for every whole multiple of the running net, e.g. $5
//! off for every $100.

use rust_decimal::Decimal;

use crate::discounts::{DiscountError, Discountable, GenericDiscount, round_amount};

/// A fixed amount granted per whole `net_multiple` of the running net
#[derive(Debug, Clone, PartialEq)]
pub struct PerMultipleAmountDiscount {
    name: String,
    net_multiple: Decimal,
    discount: GenericDiscount,
}

impl PerMultipleAmountDiscount {
    /// Create a new per-multiple discount.
    ///
    /// The value of `discount` is the amount granted per multiple; its type
    /// is not consulted.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::InvalidNetMultiple`] if `net_multiple` is not positive.
    pub fn new(
        name: impl Into<String>,
        discount: GenericDiscount,
        net_multiple: Decimal,
    ) -> Result<Self, DiscountError> {
        if net_multiple <= Decimal::ZERO {
            return Err(DiscountError::InvalidNetMultiple(net_multiple));
        }

        Ok(Self {
            name: name.into(),
            net_multiple,
            discount,
        })
    }

    /// Return the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the divisor used to count multiples
    pub fn net_multiple(&self) -> Decimal {
        self.net_multiple
    }

    /// Return the shared discount configuration
    pub fn generic(&self) -> &GenericDiscount {
        &self.discount
    }

    /// Return whether the bill's category is not excluded.
    pub fn is_applicable<D>(&self, discountable: &D) -> bool
    where
        D: Discountable + ?Sized,
    {
        self.discount.is_category_applicable(discountable.category())
    }

    /// Deduction for `running_net`: the configured amount times the number
    /// of whole multiples, rounded half-up to two places.
    ///
    /// A running net below zero counts as zero multiples.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::Overflow`] if the amount cannot be represented.
    pub fn amount_for(&self, running_net: Decimal) -> Result<Decimal, DiscountError> {
        let multiples = running_net
            .checked_div(self.net_multiple)
            .ok_or(DiscountError::Overflow)?
            .floor()
            .max(Decimal::ZERO);

        let amount = multiples
            .checked_mul(self.discount.value())
            .ok_or(DiscountError::Overflow)?;

        Ok(round_amount(amount))
    }

    /// Calculate the deduction, or `None` when not applicable.
    ///
    /// Fewer than one multiple is an applied deduction of zero.
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

        self.amount_for(discountable.running_net()).map(Some)
    }
}

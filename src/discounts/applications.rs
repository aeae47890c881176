//! Discount Applications

use std::fmt;

use rust_decimal::Decimal;

/// Rule family a deduction was applied from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscountPhase {
    /// At most one discount of this family applies, in list order
    MutuallyExclusive,

    /// Every eligible discount of this family applies, chained in list order
    AlwaysApplicable,
}

impl fmt::Display for DiscountPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountPhase::MutuallyExclusive => f.write_str("mutually exclusive"),
            DiscountPhase::AlwaysApplicable => f.write_str("always applicable"),
        }
    }
}

/// Result of applying a discount to a bill
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountApplication {
    /// Name of the discount that was applied
    pub name: String,

    /// Family the discount belongs to
    pub phase: DiscountPhase,

    /// Running net before the deduction
    pub net_before: Decimal,

    /// Amount deducted, possibly zero
    pub amount: Decimal,

    /// Running net after the deduction
    pub net_after: Decimal,
}

impl DiscountApplication {
    /// The deduction as a percentage of the net it was taken from.
    ///
    /// Returns zero when the net before the deduction was zero.
    pub fn percent_of_net(&self) -> Decimal {
        if self.net_before.is_zero() {
            return Decimal::ZERO;
        }

        self.amount
            .checked_div(self.net_before)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map_or(Decimal::ZERO, |percent| percent.round_dp(2))
    }
}

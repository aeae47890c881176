//! Discounts
//!
//! A discount is a configured rule that can decide whether it applies to a
//! [`Discountable`] and, if so, how much it takes off the running net.

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::{categories::CategoryType, users::User};

pub mod applications;
pub mod generic;
pub mod per_multiple;
pub mod tenure;
pub mod user_type;

pub use self::{
    generic::GenericDiscount, per_multiple::PerMultipleAmountDiscount, tenure::TenureDiscount,
    user_type::UserTypeDiscount,
};

/// Number of decimal places every deduction is rounded to.
pub const AMOUNT_SCALE: u32 = 2;

/// Errors specific to discount configuration and calculation.
#[derive(Debug, Error)]
pub enum DiscountError {
    /// A discount was configured without a value.
    #[error("discount value is required")]
    MissingValue,

    /// The discount type is neither a percentage nor an amount.
    #[error("invalid discount type: {0}")]
    InvalidConfiguration(String),

    /// The per-multiple divisor must be strictly positive.
    #[error("net multiple must be greater than zero, got {0}")]
    InvalidNetMultiple(Decimal),

    /// Decimal arithmetic overflowed.
    #[error("discount calculation overflowed")]
    Overflow,

    /// Tenure could not be computed from the configured dates.
    #[error(transparent)]
    Date(#[from] jiff::Error),
}

/// How a discount's value is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DiscountType {
    /// `value` is in percentage points of the running net (e.g. 30 for 30%)
    #[default]
    Percentage,

    /// `value` is a flat amount
    Amount,
}

impl FromStr for DiscountType {
    type Err = DiscountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("percentage") {
            Ok(DiscountType::Percentage)
        } else if s.eq_ignore_ascii_case("amount") {
            Ok(DiscountType::Amount)
        } else {
            Err(DiscountError::InvalidConfiguration(s.to_string()))
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountType::Percentage => f.write_str("percentage"),
            DiscountType::Amount => f.write_str("amount"),
        }
    }
}

/// The view of a bill that discounts are evaluated against.
pub trait Discountable {
    /// Net amount as it stands at this point of the evaluation.
    fn running_net(&self) -> Decimal;

    /// Category of the bill, if known.
    fn category(&self) -> Option<CategoryType>;

    /// The customer the bill belongs to.
    fn user(&self) -> &User;

    /// Date tenure is measured against.
    fn evaluated_on(&self) -> Date;
}

/// A configured discount rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Discount {
    /// Granted by membership tier
    UserType(UserTypeDiscount),

    /// Granted after a minimum customer tenure
    Tenure(TenureDiscount),

    /// A fixed amount for every whole multiple of the running net
    PerMultipleAmount(PerMultipleAmountDiscount),
}

impl Discount {
    /// Display name of the rule.
    pub fn name(&self) -> &str {
        match self {
            Discount::UserType(discount) => discount.name(),
            Discount::Tenure(discount) => discount.name(),
            Discount::PerMultipleAmount(discount) => discount.name(),
        }
    }

    /// Shared value, type and exclusion configuration.
    pub fn generic(&self) -> &GenericDiscount {
        match self {
            Discount::UserType(discount) => discount.generic(),
            Discount::Tenure(discount) => discount.generic(),
            Discount::PerMultipleAmount(discount) => discount.generic(),
        }
    }

    /// Return whether this discount applies to the given bill.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError::Date`] if tenure cannot be computed.
    pub fn is_applicable<D>(&self, discountable: &D) -> Result<bool, DiscountError>
    where
        D: Discountable + ?Sized,
    {
        match self {
            Discount::UserType(discount) => Ok(discount.is_applicable(discountable)),
            Discount::Tenure(discount) => discount.is_applicable(discountable),
            Discount::PerMultipleAmount(discount) => Ok(discount.is_applicable(discountable)),
        }
    }

    /// Calculate the deduction against the bill's running net.
    ///
    /// Returns `None` when the discount does not apply, which is distinct from
    /// an applied deduction of zero.
    ///
    /// # Errors
    ///
    /// Returns an error if eligibility cannot be decided or the amount overflows.
    pub fn calculate<D>(&self, discountable: &D) -> Result<Option<Decimal>, DiscountError>
    where
        D: Discountable + ?Sized,
    {
        match self {
            Discount::UserType(discount) => discount.calculate(discountable),
            Discount::Tenure(discount) => discount.calculate(discountable),
            Discount::PerMultipleAmount(discount) => discount.calculate(discountable),
        }
    }
}

impl From<UserTypeDiscount> for Discount {
    fn from(discount: UserTypeDiscount) -> Self {
        Discount::UserType(discount)
    }
}

impl From<TenureDiscount> for Discount {
    fn from(discount: TenureDiscount) -> Self {
        Discount::Tenure(discount)
    }
}

impl From<PerMultipleAmountDiscount> for Discount {
    fn from(discount: PerMultipleAmountDiscount) -> Self {
        Discount::PerMultipleAmount(discount)
    }
}

/// Round a deduction half-up to [`AMOUNT_SCALE`] places, padding the scale.
pub(crate) fn round_amount(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);

    rounded.rescale(AMOUNT_SCALE);

    rounded
}


#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::users::UserType;

    use super::{test_support::TestBill, *};

    fn employee_discount() -> Discount {
        UserTypeDiscount::new(
            "Employee discount",
            UserType::Employee,
            GenericDiscount::percentage(dec!(30)).excluding([CategoryType::Groceries]),
        )
        .into()
    }

    #[test]
    fn discount_type_parses_known_names() -> TestResult {
        assert_eq!("percentage".parse::<DiscountType>()?, DiscountType::Percentage);
        assert_eq!("AMOUNT".parse::<DiscountType>()?, DiscountType::Amount);

        Ok(())
    }

    #[test]
    fn discount_type_rejects_unknown_names() {
        let result = "bogo".parse::<DiscountType>();

        assert!(matches!(
            result,
            Err(DiscountError::InvalidConfiguration(name)) if name == "bogo"
        ));
    }

    #[test]
    fn discount_type_defaults_to_percentage() {
        assert_eq!(DiscountType::default(), DiscountType::Percentage);
    }

    #[test]
    fn round_amount_is_half_up_with_two_places() {
        assert_eq!(round_amount(dec!(1.005)).to_string(), "1.01");
        assert_eq!(round_amount(dec!(1.004)).to_string(), "1.00");
        assert_eq!(round_amount(dec!(50)).to_string(), "50.00");
    }

    #[test]
    fn enum_delegates_name_and_generic() {
        let discount = employee_discount();

        assert_eq!(discount.name(), "Employee discount");
        assert_eq!(discount.generic().value(), dec!(30));
    }

    #[test]
    fn calculate_distinguishes_not_applicable_from_zero() -> TestResult {
        let per_hundred: Discount =
            PerMultipleAmountDiscount::new("$5 off every $100", GenericDiscount::amount(dec!(5)), dec!(100))?
                .into();

        let customer = TestBill::new(dec!(99.99), UserType::Customer);

        assert_eq!(employee_discount().calculate(&customer)?, None);
        assert_eq!(per_hundred.calculate(&customer)?, Some(Decimal::ZERO));

        Ok(())
    }

    #[test]
    fn excluded_category_is_never_applicable() -> TestResult {
        let bill = TestBill::new(dec!(1450), UserType::Employee)
            .with_category(Some(CategoryType::Groceries));

        assert!(!employee_discount().is_applicable(&bill)?);
        assert_eq!(employee_discount().calculate(&bill)?, None);

        Ok(())
    }

    #[test]
    fn discounts_can_be_shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}

        assert_send_sync::<Discount>();
    }
}

//! Catalog
//!
//! Supplies the two ordered discount lists a bill is evaluated with.

use rust_decimal::Decimal;

use crate::{
    categories::CategoryType,
    discounts::{
        Discount, DiscountError, GenericDiscount, PerMultipleAmountDiscount, TenureDiscount,
        UserTypeDiscount,
    },
    users::UserType,
};

/// A source of ordered discount lists.
pub trait DiscountCatalog {
    /// Discounts of which at most one applies per bill; order is priority.
    fn load_mutually_exclusive_discounts(&self) -> &[Discount];

    /// Discounts that all apply when eligible; order is chaining order.
    fn load_always_applicable_discounts(&self) -> &[Discount];
}

/// An in-memory discount catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    mutually_exclusive: Vec<Discount>,
    always_applicable: Vec<Discount>,
}

impl Catalog {
    /// Create a catalog from the two ordered lists.
    pub fn new(mutually_exclusive: Vec<Discount>, always_applicable: Vec<Discount>) -> Self {
        Self {
            mutually_exclusive,
            always_applicable,
        }
    }

    /// The store's standard rules.
    ///
    /// Mutually exclusive, in priority order: 30% for employees, 10% for
    /// affiliates, 5% for customers of at least 24 months, none of them on
    /// groceries. Always applicable: 5 off for every 100 of the net.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if a rule fails validation.
    pub fn standard() -> Result<Self, DiscountError> {
        let mutually_exclusive = vec![
            UserTypeDiscount::new(
                "Employee discount",
                UserType::Employee,
                GenericDiscount::percentage(Decimal::from(30)).excluding([CategoryType::Groceries]),
            )
            .into(),
            UserTypeDiscount::new(
                "Affiliate discount",
                UserType::Affiliate,
                GenericDiscount::percentage(Decimal::TEN).excluding([CategoryType::Groceries]),
            )
            .into(),
            TenureDiscount::new(
                "Loyalty discount",
                24,
                GenericDiscount::percentage(Decimal::from(5)).excluding([CategoryType::Groceries]),
            )
            .into(),
        ];

        let always_applicable = vec![
            PerMultipleAmountDiscount::new(
                "5 off every 100",
                GenericDiscount::amount(Decimal::from(5)),
                Decimal::ONE_HUNDRED,
            )?
            .into(),
        ];

        Ok(Self::new(mutually_exclusive, always_applicable))
    }

    /// Append a mutually exclusive discount with the lowest priority.
    pub fn push_mutually_exclusive(&mut self, discount: impl Into<Discount>) {
        self.mutually_exclusive.push(discount.into());
    }

    /// Append an always applicable discount at the end of the chain.
    pub fn push_always_applicable(&mut self, discount: impl Into<Discount>) {
        self.always_applicable.push(discount.into());
    }

    /// Total number of discounts in both lists
    pub fn len(&self) -> usize {
        self.mutually_exclusive.len() + self.always_applicable.len()
    }

    /// Check if the catalog has no discounts.
    pub fn is_empty(&self) -> bool {
        self.mutually_exclusive.is_empty() && self.always_applicable.is_empty()
    }
}

impl DiscountCatalog for Catalog {
    fn load_mutually_exclusive_discounts(&self) -> &[Discount] {
        &self.mutually_exclusive
    }

    fn load_always_applicable_discounts(&self) -> &[Discount] {
        &self.always_applicable
    }
}

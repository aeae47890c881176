//! Receipt

use std::io;

use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    bill::Bill,
    discounts::{Discountable, applications::DiscountApplication},
};

/// Errors that can occur when building or writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Summary of an evaluated bill.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    /// Deductions in the order they were applied
    applications: SmallVec<[DiscountApplication; 4]>,

    /// Net amount before any discount
    subtotal: Money<'a, Currency>,

    /// Net payable after every discount
    total: Money<'a, Currency>,

    /// Currency used for all monetary values
    currency: &'a Currency,
}

impl<'a> Receipt<'a> {
    /// Create a receipt from the last evaluation of `bill`.
    ///
    /// A bill that was never evaluated yields a receipt with no savings.
    pub fn from_bill(bill: &Bill<'_>, currency: &'a Currency) -> Self {
        Self {
            applications: bill.applications().iter().cloned().collect(),
            subtotal: Money::from_decimal(bill.net_amount(), currency),
            total: Money::from_decimal(bill.running_net(), currency),
            currency,
        }
    }

    /// Net amount before any discount
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Net payable
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Deductions in the order they were applied
    pub fn applications(&self) -> &[DiscountApplication] {
        &self.applications
    }

    /// Currency of the receipt
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    /// Calculate the total deducted by discounts.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction operation fails.
    pub fn savings(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.subtotal.sub(self.total)
    }

    /// Calculate the savings as percentage points of the subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction operation fails.
    pub fn savings_percent(&self) -> Result<Decimal, MoneyError> {
        let savings = self.savings()?;
        let subtotal = *self.subtotal.amount();

        if subtotal.is_zero() {
            return Ok(Decimal::ZERO);
        }

        Ok(savings
            .amount()
            .checked_div(subtotal)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map_or(Decimal::ZERO, |percent| percent.round_dp(2)))
    }

    /// Writes the receipt as a table followed by a summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Discount", "Phase", "Net Before", "Deduction", "Net After"]);

        for app in &self.applications {
            builder.push_record([
                app.name.clone(),
                app.phase.to_string(),
                self.money(app.net_before).to_string(),
                format!("-{}", self.money(app.amount)),
                self.money(app.net_after).to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Alignment::center());
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "\n{table}")?;

        let savings = self.savings()?;
        let savings_percent = self.savings_percent()?;

        writeln!(out, " Subtotal: {}", self.subtotal)?;
        writeln!(out, " Savings:  ({savings_percent:.2}%) {savings}")?;
        writeln!(out, " Total:    {}", self.total)?;

        Ok(())
    }

    fn money(&self, amount: Decimal) -> Money<'a, Currency> {
        Money::from_decimal(amount, self.currency)
    }
}

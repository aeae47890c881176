//! Bill

use jiff::{Zoned, civil::Date};
use rust_decimal::Decimal;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::DiscountCatalog,
    categories::CategoryType,
    discounts::{
        Discount, DiscountError, Discountable,
        applications::{DiscountApplication, DiscountPhase},
    },
    users::User,
};

/// Errors related to bill construction or evaluation.
#[derive(Debug, Error)]
pub enum BillError {
    /// A bill needs a user.
    #[error("bill requires a user")]
    MissingUser,

    /// A bill needs a net amount.
    #[error("bill requires a net amount")]
    MissingNetAmount,

    /// A discount could not be evaluated.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// Bill
///
/// Borrows its discount lists, so one catalog can serve any number of bills.
#[derive(Debug, Clone)]
pub struct Bill<'a> {
    user: User,
    net_amount: Decimal,
    category: Option<CategoryType>,
    evaluated_on: Date,
    running_net: Decimal,
    mutually_exclusive: &'a [Discount],
    always_applicable: &'a [Discount],
    applications: SmallVec<[DiscountApplication; 4]>,
}

impl<'a> Bill<'a> {
    /// Create a new bill, evaluated against today's date, with no discounts.
    pub fn new(user: User, net_amount: Decimal, category: Option<CategoryType>) -> Self {
        Self {
            user,
            net_amount,
            category,
            evaluated_on: Zoned::now().date(),
            running_net: net_amount,
            mutually_exclusive: &[],
            always_applicable: &[],
            applications: SmallVec::new(),
        }
    }

    /// Start building a bill from optional parts.
    pub fn builder() -> BillBuilder {
        BillBuilder::default()
    }

    /// Attach both discount lists from a catalog.
    #[must_use]
    pub fn with_catalog<C>(mut self, catalog: &'a C) -> Self
    where
        C: DiscountCatalog + ?Sized,
    {
        self.attach_catalog(catalog);
        self
    }

    /// Attach both discount lists from a catalog.
    pub fn attach_catalog<C>(&mut self, catalog: &'a C)
    where
        C: DiscountCatalog + ?Sized,
    {
        self.mutually_exclusive = catalog.load_mutually_exclusive_discounts();
        self.always_applicable = catalog.load_always_applicable_discounts();
    }

    /// Replace the mutually exclusive discounts; list order is priority.
    pub fn set_mutually_exclusive(&mut self, discounts: &'a [Discount]) {
        self.mutually_exclusive = discounts;
    }

    /// Replace the always applicable discounts; list order is chaining order.
    pub fn set_always_applicable(&mut self, discounts: &'a [Discount]) {
        self.always_applicable = discounts;
    }

    /// Replace the net amount, discarding any previous evaluation.
    pub fn set_net_amount(&mut self, net_amount: Decimal) {
        self.net_amount = net_amount;
        self.reset();
    }

    /// Replace the category.
    pub fn set_category(&mut self, category: Option<CategoryType>) {
        self.category = category;
    }

    /// Replace the date tenure is measured against.
    pub fn set_evaluated_on(&mut self, evaluated_on: Date) {
        self.evaluated_on = evaluated_on;
    }

    /// Mutable access to the user.
    pub fn user_mut(&mut self) -> &mut User {
        &mut self.user
    }

    /// Net amount before any discount
    pub fn net_amount(&self) -> Decimal {
        self.net_amount
    }

    /// Mutually exclusive discounts, in priority order
    pub fn mutually_exclusive(&self) -> &'a [Discount] {
        self.mutually_exclusive
    }

    /// Always applicable discounts, in chaining order
    pub fn always_applicable(&self) -> &'a [Discount] {
        self.always_applicable
    }

    /// Deductions recorded by the last evaluation
    pub fn applications(&self) -> &[DiscountApplication] {
        &self.applications
    }

    /// Restore the running net to the net amount and forget past deductions.
    pub fn reset(&mut self) {
        self.running_net = self.net_amount;
        self.applications.clear();
    }

    /// Apply the discounts and return the net payable.
    ///
    /// The first applicable mutually exclusive discount is deducted, then
    /// every applicable always-applicable discount is deducted in order, each
    /// against the net left by the deductions before it. Evaluation always
    /// starts from the net amount, and the bill is left untouched on error.
    ///
    /// # Errors
    ///
    /// Returns a [`BillError::Discount`] if any discount fails to evaluate.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(net_amount = %self.net_amount, category = ?self.category)
    )]
    pub fn apply_discounts(&mut self) -> Result<Decimal, BillError> {
        let (running_net, applications) = {
            let mut evaluation = Evaluation::new(self);

            evaluation.apply_mutually_exclusive()?;
            evaluation.apply_always_applicable()?;

            (evaluation.running_net, evaluation.applications)
        };

        debug!(net_payable = %running_net, "discounts applied");

        self.running_net = running_net;
        self.applications = applications;

        Ok(running_net)
    }
}

impl Discountable for Bill<'_> {
    fn running_net(&self) -> Decimal {
        self.running_net
    }

    fn category(&self) -> Option<CategoryType> {
        self.category
    }

    fn user(&self) -> &User {
        &self.user
    }

    fn evaluated_on(&self) -> Date {
        self.evaluated_on
    }
}

/// Working state of a single `apply_discounts` call.
struct Evaluation<'b, 'a> {
    bill: &'b Bill<'a>,
    running_net: Decimal,
    applications: SmallVec<[DiscountApplication; 4]>,
}

impl<'b, 'a> Evaluation<'b, 'a> {
    fn new(bill: &'b Bill<'a>) -> Self {
        Self {
            bill,
            running_net: bill.net_amount,
            applications: SmallVec::new(),
        }
    }

    fn apply_mutually_exclusive(&mut self) -> Result<(), DiscountError> {
        let discounts = self.bill.mutually_exclusive;

        for discount in discounts {
            if !discount.is_applicable(&*self)? {
                continue;
            }

            if let Some(amount) = discount.calculate(&*self)? {
                self.deduct(discount, DiscountPhase::MutuallyExclusive, amount)?;
            }

            return Ok(());
        }

        debug!("no mutually exclusive discount applies");

        Ok(())
    }

    fn apply_always_applicable(&mut self) -> Result<(), DiscountError> {
        let discounts = self.bill.always_applicable;

        for discount in discounts {
            if !discount.is_applicable(&*self)? {
                continue;
            }

            if let Some(amount) = discount.calculate(&*self)? {
                self.deduct(discount, DiscountPhase::AlwaysApplicable, amount)?;
            }
        }

        Ok(())
    }

    fn deduct(
        &mut self,
        discount: &Discount,
        phase: DiscountPhase,
        amount: Decimal,
    ) -> Result<(), DiscountError> {
        let net_before = self.running_net;
        let net_after = net_before
            .checked_sub(amount)
            .ok_or(DiscountError::Overflow)?;

        debug!(
            discount = discount.name(),
            %phase,
            %amount,
            %net_after,
            "applied discount"
        );

        self.running_net = net_after;
        self.applications.push(DiscountApplication {
            name: discount.name().to_string(),
            phase,
            net_before,
            amount,
            net_after,
        });

        Ok(())
    }
}

impl Discountable for Evaluation<'_, '_> {
    fn running_net(&self) -> Decimal {
        self.running_net
    }

    fn category(&self) -> Option<CategoryType> {
        self.bill.category
    }

    fn user(&self) -> &User {
        &self.bill.user
    }

    fn evaluated_on(&self) -> Date {
        self.bill.evaluated_on
    }
}

/// Builder for bills whose parts may be missing.
#[derive(Debug, Default, Clone)]
pub struct BillBuilder {
    user: Option<User>,
    net_amount: Option<Decimal>,
    category: Option<CategoryType>,
    evaluated_on: Option<Date>,
}

impl BillBuilder {
    /// Set the user.
    #[must_use]
    pub fn user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    /// Set the net amount.
    #[must_use]
    pub fn net_amount(mut self, net_amount: Decimal) -> Self {
        self.net_amount = Some(net_amount);
        self
    }

    /// Set the category.
    #[must_use]
    pub fn category(mut self, category: CategoryType) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the evaluation date; defaults to today.
    #[must_use]
    pub fn evaluated_on(mut self, evaluated_on: Date) -> Self {
        self.evaluated_on = Some(evaluated_on);
        self
    }

    /// Build the bill.
    ///
    /// # Errors
    ///
    /// Returns [`BillError::MissingUser`] or [`BillError::MissingNetAmount`]
    /// if either was never set.
    pub fn build<'a>(self) -> Result<Bill<'a>, BillError> {
        let user = self.user.ok_or(BillError::MissingUser)?;
        let net_amount = self.net_amount.ok_or(BillError::MissingNetAmount)?;

        let mut bill = Bill::new(user, net_amount, self.category);

        if let Some(evaluated_on) = self.evaluated_on {
            bill.set_evaluated_on(evaluated_on);
        }

        Ok(bill)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::{
        discounts::{GenericDiscount, PerMultipleAmountDiscount, TenureDiscount, UserTypeDiscount},
        users::UserType,
    };

    use super::*;

    fn bill<'a>(user_type: UserType, net_amount: Decimal) -> Result<Bill<'a>, BillError> {
        Bill::builder()
            .user(User::new(date(2023, 10, 18), user_type))
            .net_amount(net_amount)
            .category(CategoryType::Clothing)
            .evaluated_on(date(2026, 10, 18))
            .build()
    }

    fn employee(percent: Decimal) -> Discount {
        UserTypeDiscount::new(
            format!("Employee {percent}%"),
            UserType::Employee,
            GenericDiscount::percentage(percent).excluding([CategoryType::Groceries]),
        )
        .into()
    }

    fn per_multiple(amount: Decimal, multiple: Decimal) -> Result<Discount, DiscountError> {
        Ok(PerMultipleAmountDiscount::new(
            format!("{amount} per {multiple}"),
            GenericDiscount::amount(amount),
            multiple,
        )?
        .into())
    }

    #[test]
    fn builder_requires_user() {
        let result = Bill::builder().net_amount(dec!(450)).build();

        assert!(matches!(result, Err(BillError::MissingUser)));
    }

    #[test]
    fn builder_requires_net_amount() {
        let result = Bill::builder()
            .user(User::new(date(2023, 10, 18), UserType::Employee))
            .build();

        assert!(matches!(result, Err(BillError::MissingNetAmount)));
    }

    #[test]
    fn no_discounts_returns_net_amount_exactly() -> TestResult {
        let mut bill = bill(UserType::Employee, dec!(99.990))?;

        let payable = bill.apply_discounts()?;

        assert_eq!(payable.to_string(), "99.990");
        assert!(bill.applications().is_empty());

        Ok(())
    }

    #[test]
    fn mutually_exclusive_applies_only_the_first_eligible() -> TestResult {
        let discounts = [employee(dec!(30)), employee(dec!(10))];
        let mut bill = bill(UserType::Employee, dec!(1000))?;

        bill.set_mutually_exclusive(&discounts);

        assert_eq!(bill.apply_discounts()?, dec!(700.00));
        assert_eq!(bill.applications().len(), 1);

        Ok(())
    }

    #[test]
    fn mutually_exclusive_skips_ineligible_entries() -> TestResult {
        let discounts: [Discount; 2] = [
            UserTypeDiscount::new(
                "Affiliate",
                UserType::Affiliate,
                GenericDiscount::percentage(dec!(10)),
            )
            .into(),
            TenureDiscount::new("Loyalty", 24, GenericDiscount::percentage(dec!(5))).into(),
        ];
        let mut bill = bill(UserType::Customer, dec!(1000))?;

        bill.set_mutually_exclusive(&discounts);

        assert_eq!(bill.apply_discounts()?, dec!(950.00));
        assert_eq!(
            bill.applications().first().map(|app| app.name.as_str()),
            Some("Loyalty")
        );

        Ok(())
    }

    #[test]
    fn always_applicable_discounts_chain_on_the_running_net() -> TestResult {
        let discounts = [per_multiple(dec!(5), dec!(100))?, per_multiple(dec!(1), dec!(10))?];
        let mut bill = bill(UserType::Customer, dec!(1450))?;

        bill.set_always_applicable(&discounts);

        // 1450 - 70 = 1380, then 138 multiples of 10 on 1380
        assert_eq!(bill.apply_discounts()?, dec!(1242.00));

        let amounts: Vec<Decimal> = bill.applications().iter().map(|app| app.amount).collect();

        assert_eq!(amounts, vec![dec!(70.00), dec!(138.00)]);

        Ok(())
    }

    #[test]
    fn always_applicable_sees_the_mutually_exclusive_deduction() -> TestResult {
        let exclusive = [employee(dec!(30))];
        let always = [per_multiple(dec!(5), dec!(100))?];
        let mut bill = bill(UserType::Employee, dec!(1450.00))?;

        bill.set_mutually_exclusive(&exclusive);
        bill.set_always_applicable(&always);

        assert_eq!(bill.apply_discounts()?, dec!(965.00));

        Ok(())
    }

    #[test]
    fn zero_deductions_are_recorded() -> TestResult {
        let always = [per_multiple(dec!(5), dec!(100))?];
        let mut bill = bill(UserType::Customer, dec!(99.99))?;

        bill.set_always_applicable(&always);

        assert_eq!(bill.apply_discounts()?, dec!(99.99));
        assert_eq!(
            bill.applications().first().map(|app| app.amount),
            Some(Decimal::ZERO)
        );

        Ok(())
    }

    #[test]
    fn apply_discounts_can_be_repeated() -> TestResult {
        let exclusive = [employee(dec!(30))];
        let mut bill = bill(UserType::Employee, dec!(1000))?;

        bill.set_mutually_exclusive(&exclusive);

        assert_eq!(bill.apply_discounts()?, dec!(700.00));
        assert_eq!(bill.apply_discounts()?, dec!(700.00));
        assert_eq!(bill.applications().len(), 1);

        Ok(())
    }

    #[test]
    fn failed_evaluation_leaves_the_bill_untouched() -> TestResult {
        let exclusive = [employee(dec!(10))];
        let always: [Discount; 1] = [UserTypeDiscount::new(
            "Runaway",
            UserType::Employee,
            GenericDiscount::percentage(dec!(300)),
        )
        .into()];
        let mut bill = bill(UserType::Employee, Decimal::MAX)?;

        bill.set_mutually_exclusive(&exclusive);
        bill.set_always_applicable(&always);

        let result = bill.apply_discounts();

        assert!(matches!(result, Err(BillError::Discount(DiscountError::Overflow))));
        assert_eq!(bill.running_net(), Decimal::MAX);
        assert!(bill.applications().is_empty());

        Ok(())
    }

    #[test]
    fn set_net_amount_resets_the_evaluation() -> TestResult {
        let exclusive = [employee(dec!(30))];
        let mut bill = bill(UserType::Employee, dec!(1000))?;

        bill.set_mutually_exclusive(&exclusive);
        bill.apply_discounts()?;
        bill.set_net_amount(dec!(200));

        assert_eq!(bill.running_net(), dec!(200));
        assert!(bill.applications().is_empty());
        assert_eq!(bill.apply_discounts()?, dec!(140.00));

        Ok(())
    }

    #[test]
    fn user_changes_are_seen_by_the_next_evaluation() -> TestResult {
        let exclusive = [employee(dec!(30))];
        let mut bill = bill(UserType::Employee, dec!(1000))?;

        bill.set_mutually_exclusive(&exclusive);
        bill.user_mut().set_user_type(UserType::Customer);

        assert_eq!(bill.apply_discounts()?, dec!(1000));

        Ok(())
    }
}

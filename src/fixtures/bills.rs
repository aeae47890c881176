//! Bill Fixtures

use jiff::civil::Date;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    bill::Bill,
    categories::CategoryType,
    users::{User, UserType},
};

/// Wrapper for bills in YAML
#[derive(Debug, Deserialize)]
pub struct BillsFixture {
    /// Map of bill key -> bill fixture
    pub bills: FxHashMap<String, BillFixture>,
}

/// Bill fixture from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct BillFixture {
    /// Membership tier of the customer
    pub user_type: UserType,

    /// Date the customer joined
    pub customer_since: Date,

    /// Net amount before discounts
    pub net: Decimal,

    /// Bill category
    #[serde(default)]
    pub category: Option<CategoryType>,

    /// Date tenure is measured against
    pub evaluated_on: Date,

    /// Expected net payable, when the scenario asserts one
    #[serde(default)]
    pub expected: Option<Decimal>,
}

impl From<&BillFixture> for Bill<'_> {
    fn from(fixture: &BillFixture) -> Self {
        let user = User::new(fixture.customer_since, fixture.user_type);
        let mut bill = Bill::new(user, fixture.net, fixture.category);

        bill.set_evaluated_on(fixture.evaluated_on);

        bill
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::discounts::Discountable;

    use super::*;

    #[test]
    fn bill_fixture_parses_dates_and_amounts() -> TestResult {
        let yaml = r#"
user_type: customer
customer_since: 2023-10-18
net: "1450.00"
category: clothing
evaluated_on: 2026-10-18
expected: "1312.50"
"#;
        let fixture: BillFixture = serde_norway::from_str(yaml)?;

        assert_eq!(fixture.customer_since, date(2023, 10, 18));
        assert_eq!(fixture.net, dec!(1450.00));
        assert_eq!(fixture.expected, Some(dec!(1312.50)));

        let bill = Bill::from(&fixture);

        assert_eq!(bill.evaluated_on(), date(2026, 10, 18));
        assert_eq!(bill.category(), Some(CategoryType::Clothing));
        assert_eq!(bill.user().user_type(), UserType::Customer);

        Ok(())
    }

    #[test]
    fn bill_fixture_category_is_optional() -> TestResult {
        let yaml = r#"
user_type: employee
customer_since: 2020-01-01
net: "10"
evaluated_on: 2026-10-18
"#;
        let fixture: BillFixture = serde_norway::from_str(yaml)?;

        assert!(fixture.category.is_none());
        assert!(fixture.expected.is_none());

        Ok(())
    }
}

//! Discount Fixtures

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use serde::Deserialize;

use crate::{
    catalog::Catalog,
    categories::CategoryType,
    discounts::{
        Discount, DiscountError, DiscountType, GenericDiscount, PerMultipleAmountDiscount,
        TenureDiscount, UserTypeDiscount,
    },
    users::UserType,
};

/// Wrapper for a catalog in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Mutually exclusive discounts, in priority order
    #[serde(default)]
    pub mutually_exclusive: Vec<DiscountFixture>,

    /// Always applicable discounts, in chaining order
    #[serde(default)]
    pub always_applicable: Vec<DiscountFixture>,
}

impl TryFrom<CatalogFixture> for Catalog {
    type Error = DiscountError;

    fn try_from(fixture: CatalogFixture) -> Result<Self, Self::Error> {
        let mutually_exclusive = fixture
            .mutually_exclusive
            .into_iter()
            .map(Discount::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let always_applicable = fixture
            .always_applicable
            .into_iter()
            .map(Discount::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Catalog::new(mutually_exclusive, always_applicable))
    }
}

/// Discount fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountFixture {
    /// Discount by membership tier
    UserType {
        /// Discount name
        name: String,

        /// Tier the discount is granted to
        user_type: UserType,

        /// Value configuration
        discount: GenericDiscountFixture,
    },

    /// Discount by customer tenure
    Tenure {
        /// Discount name
        name: String,

        /// Required tenure in whole months
        minimum_months: i32,

        /// Value configuration
        discount: GenericDiscountFixture,
    },

    /// Fixed amount per whole multiple of the net
    PerMultipleAmount {
        /// Discount name
        name: String,

        /// Divisor used to count multiples
        net_multiple: Decimal,

        /// Value configuration; `value` is the amount per multiple
        discount: GenericDiscountFixture,
    },
}

impl TryFrom<DiscountFixture> for Discount {
    type Error = DiscountError;

    fn try_from(fixture: DiscountFixture) -> Result<Self, Self::Error> {
        match fixture {
            DiscountFixture::UserType {
                name,
                user_type,
                discount,
            } => Ok(UserTypeDiscount::new(name, user_type, discount.try_into()?).into()),
            DiscountFixture::Tenure {
                name,
                minimum_months,
                discount,
            } => Ok(TenureDiscount::new(name, minimum_months, discount.try_into()?).into()),
            DiscountFixture::PerMultipleAmount {
                name,
                net_multiple,
                discount,
            } => Ok(PerMultipleAmountDiscount::new(name, discount.try_into()?, net_multiple)?.into()),
        }
    }
}

/// Value, type and exclusions from YAML; every field may be omitted
#[derive(Debug, Default, Deserialize)]
pub struct GenericDiscountFixture {
    /// `percentage` or `amount`; defaults to percentage
    #[serde(default)]
    pub kind: Option<String>,

    /// Percentage points or flat amount
    #[serde(default)]
    pub value: Option<Decimal>,

    /// Categories the discount never applies to
    #[serde(default)]
    pub exclude: Option<Vec<CategoryType>>,
}

impl TryFrom<GenericDiscountFixture> for GenericDiscount {
    type Error = DiscountError;

    fn try_from(fixture: GenericDiscountFixture) -> Result<Self, Self::Error> {
        let kind = fixture
            .kind
            .as_deref()
            .map(str::parse::<DiscountType>)
            .transpose()?;

        let excluded = fixture
            .exclude
            .map(|categories| categories.into_iter().collect::<FxHashSet<_>>());

        GenericDiscount::new(kind, fixture.value, excluded)
    }
}

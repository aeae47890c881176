//! Retail Discounts prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    bill::{Bill, BillBuilder, BillError},
    catalog::{Catalog, DiscountCatalog},
    categories::CategoryType,
    discounts::{
        Discount, DiscountError, DiscountType, Discountable, GenericDiscount,
        PerMultipleAmountDiscount, TenureDiscount, UserTypeDiscount,
        applications::{DiscountApplication, DiscountPhase},
    },
    fixtures::{Fixture, FixtureError},
    receipt::{Receipt, ReceiptError},
    users::{User, UserType},
};

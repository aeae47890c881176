//! Users

use jiff::{Unit, civil::Date};
use serde::Deserialize;

/// Membership tier of the customer on a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    /// Store employee
    Employee,

    /// Affiliate of the store
    Affiliate,

    /// Regular customer
    Customer,
}

/// The customer a bill is evaluated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct User {
    customer_since: Date,
    user_type: UserType,
}

impl User {
    /// Create a new user.
    pub fn new(customer_since: Date, user_type: UserType) -> Self {
        Self {
            customer_since,
            user_type,
        }
    }

    /// Date the user became a customer
    pub fn customer_since(&self) -> Date {
        self.customer_since
    }

    /// Membership tier
    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    /// Replace the customer-since date.
    pub fn set_customer_since(&mut self, customer_since: Date) {
        self.customer_since = customer_since;
    }

    /// Replace the membership tier.
    pub fn set_user_type(&mut self, user_type: UserType) {
        self.user_type = user_type;
    }

    /// Whole months between the customer-since date and `on`.
    ///
    /// Negative when the customer-since date lies after `on`.
    ///
    /// # Errors
    ///
    /// Returns a [`jiff::Error`] if the span between the two dates cannot be represented.
    pub fn tenure_months(&self, on: Date) -> Result<i32, jiff::Error> {
        let span = self.customer_since.until((Unit::Month, on))?;

        Ok(span.get_months())
    }
}

//! Retail Discounts
//!
//! Computes the net payable on a retail bill from two ordered discount lists:
//! a mutually exclusive list, of which only the first applicable discount is
//! deducted, and an always applicable list, whose discounts are all deducted
//! in order against the progressively reduced net.

pub mod bill;
pub mod catalog;
pub mod categories;
pub mod discounts;
pub mod fixtures;
pub mod prelude;
pub mod receipt;
pub mod users;

//! Core types for Handset Hub.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod catalog;
pub mod id;
pub mod price;

pub use catalog::{Brand, Category, Contact, Product, Release, Review, Settings};
pub use id::*;
pub use price::{
    CurrencyFormat, DEFAULT_CURRENCY_SYMBOL, DigitGrouping, PriceBreakdown, discounted_price,
};

//! Handset Hub storefront library.
//!
//! Selection lists (cart, wishlist, compare) over a durable key-value
//! store, the read-only product catalog they reference, derived views for
//! rendering, and the session service that keeps views in sync after each
//! change.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod notify;
pub mod selection;
pub mod session;
pub mod storage;
pub mod sync;
pub mod views;

pub use catalog::Catalog;
pub use config::StorefrontConfig;
pub use error::{AppError, Result};
pub use session::Storefront;
pub use sync::StorefrontView;

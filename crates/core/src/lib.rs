//! Handset Hub Core - Shared types library.
//!
//! This crate provides common types used across all Handset Hub components:
//! - `storefront` - Selection lists (cart, wishlist, compare) and their views
//! - `cli` - Command-line driver for the storefront session
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no storage
//! access, no rendering. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers, money formatting, and catalog records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

//! Unified error handling.
//!
//! Provides a unified `AppError` type for session operations. Persisted-state
//! corruption never reaches this type (it resets to empty inside the storage
//! layer), and a full compare list is an outcome rather than an error.

use thiserror::Error;

use handset_hub_core::ProductId;

use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Durable record could not be written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog data failed to load.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Checkout link could not be built.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Configuration is invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Comparison needs exactly two products that exist in the catalog.
    #[error("Select two products to compare")]
    CompareIncomplete,
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

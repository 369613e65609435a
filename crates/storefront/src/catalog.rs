//! Catalog data loaded from the storefront's static JSON files.
//!
//! All six files are read concurrently and must all succeed before anything
//! that depends on them runs. A failure is reported once; there is no
//! partial catalog and no retry.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use handset_hub_core::{Brand, Category, Product, ProductId, Release, Review, Settings};

/// Filter value that matches every brand or category.
pub const ALL: &str = "All";

/// File names inside the data directory.
pub mod files {
    pub const PRODUCTS: &str = "products.json";
    pub const BRANDS: &str = "brands.json";
    pub const CATEGORIES: &str = "categories.json";
    pub const REVIEWS: &str = "reviews.json";
    pub const SETTINGS: &str = "settings.json";
    pub const RELEASES: &str = "new-releases.json";
}

/// Errors loading catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A data file could not be read.
    #[error("Failed to load {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data file did not match its expected shape.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Brand and category selection plus free-text search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilter {
    /// Exact brand name, or [`ALL`].
    pub brand: String,
    /// Exact category name, or [`ALL`].
    pub category: String,
    /// Case-insensitive substring matched against name or brand.
    pub search: String,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            brand: ALL.to_string(),
            category: ALL.to_string(),
            search: String::new(),
        }
    }
}

impl ProductFilter {
    /// Whether `product` passes every criterion.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let brand_ok = self.brand == ALL || product.brand == self.brand;
        let category_ok = self.category == ALL || product.category == self.category;
        let search_ok = self.search.is_empty() || {
            let needle = self.search.to_lowercase();
            product.name.to_lowercase().contains(&needle)
                || product.brand.to_lowercase().contains(&needle)
        };
        brand_ok && category_ok && search_ok
    }
}

/// A release joined with the product it promotes.
#[derive(Debug, Clone)]
pub struct FeaturedRelease<'a> {
    pub release: &'a Release,
    pub product: &'a Product,
}

/// Read-only catalog shared by every component of a session.
#[derive(Debug, Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

#[derive(Debug)]
struct CatalogInner {
    products: Vec<Product>,
    brands: Vec<Brand>,
    categories: Vec<Category>,
    reviews: Vec<Review>,
    settings: Settings,
    releases: Vec<Release>,
}

impl Catalog {
    /// Build a catalog from already-loaded parts.
    #[must_use]
    pub fn new(products: Vec<Product>, settings: Settings) -> Self {
        Self::from_parts(products, Vec::new(), Vec::new(), Vec::new(), settings, Vec::new())
    }

    fn from_parts(
        products: Vec<Product>,
        brands: Vec<Brand>,
        categories: Vec<Category>,
        reviews: Vec<Review>,
        settings: Settings,
        releases: Vec<Release>,
    ) -> Self {
        Self {
            inner: Arc::new(CatalogInner {
                products,
                brands,
                categories,
                reviews,
                settings,
                releases,
            }),
        }
    }

    /// Load every catalog file from `dir` concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first `CatalogError` encountered; nothing is returned if
    /// any file fails.
    #[instrument]
    pub async fn load(dir: &Path) -> Result<Self, CatalogError> {
        let (products, brands, categories, reviews, settings, releases) = tokio::try_join!(
            read_json::<Vec<Product>>(dir.join(files::PRODUCTS)),
            read_json::<Vec<Brand>>(dir.join(files::BRANDS)),
            read_json::<Vec<Category>>(dir.join(files::CATEGORIES)),
            read_json::<Vec<Review>>(dir.join(files::REVIEWS)),
            read_json::<Settings>(dir.join(files::SETTINGS)),
            read_json::<Vec<Release>>(dir.join(files::RELEASES)),
        )?;

        tracing::info!(
            products = products.len(),
            brands = brands.len(),
            categories = categories.len(),
            reviews = reviews.len(),
            releases = releases.len(),
            "Catalog loaded"
        );

        Ok(Self::from_parts(
            products, brands, categories, reviews, settings, releases,
        ))
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.inner.products
    }

    /// All brands.
    #[must_use]
    pub fn brands(&self) -> &[Brand] {
        &self.inner.brands
    }

    /// All categories.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.inner.categories
    }

    /// All reviews.
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.inner.reviews
    }

    /// Site settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    /// Hero releases.
    #[must_use]
    pub fn releases(&self) -> &[Release] {
        &self.inner.releases
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.inner.products.iter().find(|p| &p.id == id)
    }

    /// Resolve ids to products, skipping ids that are not in the catalog.
    pub fn resolve<'a>(&'a self, ids: &'a [ProductId]) -> impl Iterator<Item = &'a Product> + 'a {
        ids.iter().filter_map(|id| self.product(id))
    }

    /// Products passing `filter`, in catalog order.
    #[must_use]
    pub fn filter(&self, filter: &ProductFilter) -> Vec<&Product> {
        self.inner
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .collect()
    }

    /// Products flagged as new arrivals.
    #[must_use]
    pub fn new_arrivals(&self) -> Vec<&Product> {
        self.inner.products.iter().filter(|p| p.is_new).collect()
    }

    /// Releases whose product exists, in release order.
    #[must_use]
    pub fn featured_releases(&self) -> Vec<FeaturedRelease<'_>> {
        self.inner
            .releases
            .iter()
            .filter_map(|release| {
                self.product(&release.product_id)
                    .map(|product| FeaturedRelease { release, product })
            })
            .collect()
    }
}

async fn read_json<T: DeserializeOwned>(path: PathBuf) -> Result<T, CatalogError> {
    let raw = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| CatalogError::Read {
            path: path.clone(),
            source,
        })?;
    serde_json::from_str(&raw).map_err(|source| CatalogError::Parse { path, source })
}

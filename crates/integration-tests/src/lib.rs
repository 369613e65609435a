//! Integration tests for Handset Hub.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p handset-hub-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_loading` - Loading the sample catalog and load-failure reporting
//! - `session_persistence` - Selection lists surviving a restart on disk
//! - `checkout_flow` - Cart to order link, end to end
//!
//! Every test runs against a private temporary directory holding a copy of
//! the sample catalog from the repository's `data/` directory and an empty
//! state directory.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use handset_hub_storefront::catalog::files;
use handset_hub_storefront::{Result, Storefront, StorefrontConfig, StorefrontView};

/// Sample catalog shipped with the repository.
pub const SAMPLE_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data");

const CATALOG_FILES: [&str; 6] = [
    files::PRODUCTS,
    files::BRANDS,
    files::CATEGORIES,
    files::REVIEWS,
    files::SETTINGS,
    files::RELEASES,
];

/// Temporary data and state directories for one test.
#[derive(Debug)]
pub struct TestContext {
    dir: TempDir,
    pub config: StorefrontConfig,
}

impl TestContext {
    /// Copy the sample catalog into a fresh temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be prepared.
    pub fn new() -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        let data_dir = dir.path().join("data");
        std::fs::create_dir_all(&data_dir)?;
        for name in CATALOG_FILES {
            std::fs::copy(Path::new(SAMPLE_DATA_DIR).join(name), data_dir.join(name))?;
        }

        let config = StorefrontConfig {
            data_dir,
            state_dir: dir.path().join("state"),
            ..StorefrontConfig::default()
        };
        Ok(Self { dir, config })
    }

    /// Root of the temporary directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a catalog file in the temporary data directory.
    #[must_use]
    pub fn data_file(&self, name: &str) -> PathBuf {
        self.config.data_dir.join(name)
    }

    /// Path of a durable selection-list record.
    #[must_use]
    pub fn state_file(&self, key: &str) -> PathBuf {
        self.config.state_dir.join(format!("{key}.json"))
    }

    /// Open a session with no views.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub async fn open(&self) -> Result<Storefront> {
        Storefront::open(&self.config, Vec::new()).await
    }

    /// Open a session with the given views attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub async fn open_with(
        &self,
        views: Vec<std::sync::Arc<dyn StorefrontView>>,
    ) -> Result<Storefront> {
        Storefront::open(&self.config, views).await
    }
}

//! Fixtures
//!
//! Discount catalogs and bill scenarios described in YAML files under a base
//! path (`./fixtures` by default):
//!
//! - `catalogs/{name}.yml`
//! - `bills/{name}.yml`

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use crate::{
    bill::{Bill, BillError},
    catalog::Catalog,
    discounts::DiscountError,
    fixtures::{
        bills::{BillFixture, BillsFixture},
        discounts::CatalogFixture,
    },
};

pub mod bills;
pub mod discounts;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid discount configuration
    #[error("Invalid discount: {0}")]
    Discount(#[from] DiscountError),

    /// Invalid bill
    #[error("Invalid bill: {0}")]
    Bill(#[from] BillError),

    /// Bill not found
    #[error("Bill not found: {0}")]
    BillNotFound(String),

    /// No catalog loaded yet
    #[error("No catalog loaded")]
    NoCatalog,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Loaded catalog
    catalog: Option<Catalog>,

    /// Bill scenarios by key
    bills: FxHashMap<String, BillFixture>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: None,
            bills: FxHashMap::default(),
        }
    }

    /// Load a discount catalog from a YAML fixture file, replacing any
    /// previously loaded catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a discount is invalid.
    pub fn load_catalog(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("catalogs").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CatalogFixture = serde_norway::from_str(&contents)?;
        let catalog = Catalog::try_from(fixture)?;

        debug!(catalog = name, discounts = catalog.len(), "loaded catalog");

        self.catalog = Some(catalog);

        Ok(self)
    }

    /// Load bill scenarios from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_bills(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("bills").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: BillsFixture = serde_norway::from_str(&contents)?;

        debug!(bills = name, count = fixture.bills.len(), "loaded bills");

        self.bills.extend(fixture.bills);

        Ok(self)
    }

    /// Load a catalog and bills with the same name
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_catalog(name)?.load_bills(name)?;

        Ok(fixture)
    }

    /// Get the loaded catalog
    ///
    /// # Errors
    ///
    /// Returns an error if no catalog has been loaded.
    pub fn catalog(&self) -> Result<&Catalog, FixtureError> {
        self.catalog.as_ref().ok_or(FixtureError::NoCatalog)
    }

    /// Get a bill scenario by its key
    ///
    /// # Errors
    ///
    /// Returns an error if the bill is not found.
    pub fn bill_fixture(&self, key: &str) -> Result<&BillFixture, FixtureError> {
        self.bills
            .get(key)
            .ok_or_else(|| FixtureError::BillNotFound(key.to_string()))
    }

    /// Build a bill from a scenario, wired to the loaded catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the bill is not found or no catalog is loaded.
    pub fn bill(&self, key: &str) -> Result<Bill<'_>, FixtureError> {
        let fixture = self.bill_fixture(key)?;
        let catalog = self.catalog()?;

        Ok(Bill::from(fixture).with_catalog(catalog))
    }

    /// Keys of all loaded bill scenarios, sorted
    pub fn bill_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.bills.keys().map(String::as_str).collect();

        keys.sort_unstable();

        keys
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

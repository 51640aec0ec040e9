//! Warehouse configuration: database location and connection-pool sizing.
//!
//! The database string is required -- building a [`SalesMart`](crate::SalesMart)
//! with an empty location fails up front rather than on the first query.

use crate::error::{MartError, Result};

/// Special database location for an in-memory DuckDB instance.
pub const IN_MEMORY: &str = ":memory:";

/// Star-schema table names, as materialized in the warehouse.
pub const FACT_SALES: &str = "fact_sales";
pub const DIM_CUSTOMERS: &str = "dim_customers";
pub const DIM_SELLERS: &str = "dim_sellers";
pub const DIM_PRODUCTS: &str = "dim_products";
pub const DIM_CALENDAR: &str = "dim_calendar";

/// Connection-pool sizing parameters.
///
/// The pool itself is supplied by the embedding runtime; these knobs are
/// carried in the config so callers have one place to read them from.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Base number of pooled connections.
    pub size: usize,
    /// Extra connections allowed beyond `size` under load.
    pub max_overflow: usize,
    /// Seconds to wait for a connection before failing.
    pub timeout_secs: u64,
    /// Seconds after which an idle connection is recycled.
    pub recycle_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            size: 5,
            max_overflow: 10,
            timeout_secs: 30,
            recycle_secs: 3600,
        }
    }
}

/// Configuration for connecting to the sales warehouse.
#[derive(Debug, Clone)]
pub struct WarehouseConfig {
    /// DuckDB database location: a filesystem path, or [`IN_MEMORY`].
    pub database: String,
    /// Pool sizing, passed through to the embedding runtime.
    pub pool: PoolConfig,
}

impl WarehouseConfig {
    /// Create a config for the given database location with default pool sizing.
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            pool: PoolConfig::default(),
        }
    }

    /// Create a config for an in-memory database (useful for tests and demos).
    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY)
    }

    /// Validate the configuration.
    ///
    /// A missing database location is a fatal startup error: the core must
    /// never proceed with a null data source.
    pub fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(MartError::Config(
                "database location is empty; set a DuckDB path or use \":memory:\"".into(),
            ));
        }
        if self.pool.size == 0 {
            return Err(MartError::Config("pool size must be at least 1".into()));
        }
        Ok(())
    }
}

//! Analytics core for an e-commerce sales data mart.
//!
//! Provides a high-level client for querying a star-schema sales warehouse
//! (fact_sales joined to customer, seller, product, and calendar dimensions)
//! in-process via DuckDB. Query results are memoized behind
//! parameter-derived cache keys so repeated UI interactions don't re-hit the
//! warehouse; the cache is cleared wholesale whenever a global filter
//! changes.
//!
//! # Quick start
//!
//! ```no_run
//! use salesmart::{FilterSet, Metric, SalesMart};
//!
//! let mart = SalesMart::builder().database("warehouse.duckdb").build().unwrap();
//!
//! let filters = FilterSet::from_ui("2018-01-01", "2018-01-31", "SP", "Todas");
//! let kpis = mart.overview().metrics(&filters).unwrap();
//! let top = mart.rankings().top_states(&filters, 10).unwrap();
//!
//! // A filter change invalidates everything at once.
//! mart.clear_cache();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod config;
pub mod connection;
pub mod error;
pub mod filters;
pub mod metrics;
pub mod queries;
pub mod sql_builder;
pub mod stats;

#[cfg(feature = "async")]
pub use async_client::AsyncSalesMart;
pub use cache::QueryCache;
pub use config::{PoolConfig, WarehouseConfig};
pub use connection::{Connection, Row, Rows};
pub use error::{MartError, Result};
pub use filters::FilterSet;
pub use metrics::{clamp_limit, Metric, StatColumn, StatGroup, TemporalMetric, MIN_LIMIT};
pub use queries::Dimension;
pub use sql_builder::SqlBuilder;
pub use stats::Statistics;

use std::fmt;

// ---------------------------------------------------------------------------
// SalesMartBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`SalesMart`] instance.
///
/// Use [`SalesMart::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](SalesMartBuilder::build) to create the
/// client.
#[derive(Default)]
pub struct SalesMartBuilder {
    database: Option<String>,
    pool: PoolConfig,
}

impl SalesMartBuilder {
    /// Set the DuckDB database location (a path, or `":memory:"`).
    ///
    /// Required: building without one fails with a configuration error
    /// rather than proceeding with a null data source.
    pub fn database(mut self, location: impl Into<String>) -> Self {
        self.database = Some(location.into());
        self
    }

    /// Override the connection-pool sizing passed through to the runtime.
    pub fn pool(mut self, pool: PoolConfig) -> Self {
        self.pool = pool;
        self
    }

    /// Build the client, validating the configuration and opening the
    /// warehouse connection.
    pub fn build(self) -> Result<SalesMart> {
        let config = WarehouseConfig {
            database: self.database.unwrap_or_default(),
            pool: self.pool,
        };
        let conn = Connection::open(config)?;
        Ok(SalesMart {
            conn,
            cache: QueryCache::new(),
        })
    }
}

// ---------------------------------------------------------------------------
// SalesMart
// ---------------------------------------------------------------------------

/// The main entry point for the sales-mart analytics core.
///
/// Owns the warehouse [`Connection`] and the [`QueryCache`], and exposes the
/// operation families as lightweight borrowing wrappers. Created via
/// [`SalesMart::builder()`].
#[derive(Debug)]
pub struct SalesMart {
    conn: Connection,
    cache: QueryCache,
}

impl SalesMart {
    /// Create a new builder for configuring the client.
    pub fn builder() -> SalesMartBuilder {
        SalesMartBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the overview KPI query interface.
    pub fn overview(&self) -> queries::OverviewQuery<'_> {
        queries::OverviewQuery::new(&self.conn, &self.cache)
    }

    /// Access the rankings and top-performer query interface.
    pub fn rankings(&self) -> queries::RankingQuery<'_> {
        queries::RankingQuery::new(&self.conn, &self.cache)
    }

    /// Access the dynamic by-dimension chart query interface.
    pub fn charts(&self) -> queries::ChartQuery<'_> {
        queries::ChartQuery::new(&self.conn, &self.cache)
    }

    /// Access the time-series query interface.
    pub fn timeseries(&self) -> queries::TimeSeriesQuery<'_> {
        queries::TimeSeriesQuery::new(&self.conn, &self.cache)
    }

    /// Access the descriptive-statistics query interface.
    pub fn stats(&self) -> queries::StatsQuery<'_> {
        queries::StatsQuery::new(&self.conn, &self.cache)
    }

    /// Access the filter-option lookup interface (states, cities,
    /// categories, date range).
    pub fn dimensions(&self) -> queries::DimensionQuery<'_> {
        queries::DimensionQuery::new(&self.conn, &self.cache)
    }

    // -- Cache control -----------------------------------------------------

    /// Clear the whole memoization store.
    ///
    /// Must be called on any global-filter-changing action (date range,
    /// state, category) before the next batch of queries is issued;
    /// otherwise results from the previous filter configuration would be
    /// served. An in-flight computation started before the clear completes
    /// normally but is never stored.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Number of memoized query results currently held.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    // -- Utility methods ---------------------------------------------------

    /// Execute a raw SQL query against the warehouse.
    ///
    /// Provides escape-hatch access for queries not covered by the
    /// operation interfaces. Not memoized.
    ///
    /// # Arguments
    ///
    /// * `query` - SQL string with `?` positional placeholders.
    /// * `params` - Parameter values corresponding to the placeholders.
    pub fn sql(&self, query: &str, params: &[String]) -> Result<Rows> {
        self.conn.execute(query, params)
    }

    /// Return a reference to the underlying [`Connection`] for advanced
    /// usage (e.g. loading fixture tables).
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Consume the client and release all resources.
    ///
    /// This is called automatically when the client is dropped, but can be
    /// invoked explicitly for deterministic cleanup.
    pub fn close(self) {
        drop(self);
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for SalesMart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SalesMart(database={}, cached_results={}, filter_generation={})",
            self.conn.config.database,
            self.cache.len(),
            self.cache.generation()
        )
    }
}

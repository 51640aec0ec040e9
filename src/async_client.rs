//! Async wrapper around [`SalesMart`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//! DuckDB queries are CPU-bound but fast, making this approach efficient.
//!
//! # Example
//!
//! ```no_run
//! use salesmart::{AsyncSalesMart, FilterSet};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let mart = AsyncSalesMart::builder()
//!         .database("warehouse.duckdb")
//!         .build()
//!         .await
//!         .unwrap();
//!
//!     // Run any sync operation via closure
//!     let kpis = mart
//!         .run(|m| m.overview().metrics(&FilterSet::unfiltered()))
//!         .await
//!         .unwrap();
//!
//!     // Convenience method for raw SQL
//!     let rows = mart.sql("SELECT COUNT(*) FROM fact_sales", &[]).await.unwrap();
//! }
//! ```

use std::sync::{Arc, Mutex};

use crate::config::PoolConfig;
use crate::connection::Rows;
use crate::error::{MartError, Result};
use crate::SalesMart;

// ---------------------------------------------------------------------------
// AsyncSalesMartBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncSalesMart`] instance.
#[derive(Default)]
pub struct AsyncSalesMartBuilder {
    database: Option<String>,
    pool: PoolConfig,
}

impl AsyncSalesMartBuilder {
    /// Set the DuckDB database location (a path, or `":memory:"`).
    pub fn database(mut self, location: impl Into<String>) -> Self {
        self.database = Some(location.into());
        self
    }

    /// Override the connection-pool sizing passed through to the runtime.
    pub fn pool(mut self, pool: PoolConfig) -> Self {
        self.pool = pool;
        self
    }

    /// Build the async client, validating the configuration and opening the
    /// warehouse connection.
    ///
    /// Initialization runs on the blocking thread pool so it won't block
    /// the async event loop.
    pub async fn build(self) -> Result<AsyncSalesMart> {
        tokio::task::spawn_blocking(move || {
            let mut builder = SalesMart::builder().pool(self.pool);
            if let Some(database) = self.database {
                builder = builder.database(database);
            }
            let mart = builder.build()?;
            Ok(AsyncSalesMart {
                inner: Arc::new(Mutex::new(mart)),
            })
        })
        .await
        .map_err(|e| MartError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncSalesMart
// ---------------------------------------------------------------------------

/// Async wrapper around [`SalesMart`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`SalesMart`] is
/// protected by a [`Mutex`] since the DuckDB connection is not `Sync`.
pub struct AsyncSalesMart {
    inner: Arc<Mutex<SalesMart>>,
}

impl AsyncSalesMart {
    /// Create a new builder for configuring the async client.
    pub fn builder() -> AsyncSalesMartBuilder {
        AsyncSalesMartBuilder::default()
    }

    /// Run a sync operation on the blocking thread pool.
    ///
    /// The closure receives a `&SalesMart` reference and should return a
    /// `Result<T>`. The operation runs on a dedicated blocking thread,
    /// keeping the async event loop free.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use salesmart::{AsyncSalesMart, FilterSet};
    /// # async fn example() -> salesmart::Result<()> {
    /// # let mart = AsyncSalesMart::builder().database(":memory:").build().await?;
    /// let top = mart
    ///     .run(|m| m.rankings().top_states(&FilterSet::unfiltered(), 10))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&SalesMart) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let mart = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = mart
                .lock()
                .map_err(|_| MartError::InvalidArgument("client lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| MartError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Execute a raw SQL query asynchronously.
    ///
    /// Convenience wrapper around [`run()`](Self::run) for
    /// [`SalesMart::sql()`].
    pub async fn sql(&self, query: &str, params: &[String]) -> Result<Rows> {
        let query = query.to_string();
        let params = params.to_vec();
        self.run(move |m| m.sql(&query, &params)).await
    }

    /// Clear the memoization store asynchronously.
    ///
    /// Call on any global-filter-changing action before issuing the next
    /// batch of queries.
    pub async fn clear_cache(&self) -> Result<()> {
        self.run(|m| {
            m.clear_cache();
            Ok(())
        })
        .await
    }

    /// Close the client, releasing all resources.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || {
            let mart = self
                .inner
                .lock()
                .map_err(|_| MartError::InvalidArgument("client lock poisoned".into()))?;
            // Dropping the MutexGuard drops the client
            drop(mart);
            Ok(())
        })
        .await
        .map_err(|e| MartError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

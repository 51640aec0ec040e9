//! Generation-tagged memoization of query results.
//!
//! Every query operation is keyed by its name plus its normalized parameter
//! set; repeated UI interactions (metric switch, top-N change) hit the store
//! instead of the warehouse. The store has no per-entry expiry: staleness is
//! handled wholesale by [`QueryCache::clear`], which the caller must invoke
//! on any global-filter-changing action.
//!
//! Keys are tagged with a generation counter. A computation that was in
//! flight when `clear()` ran completes and returns its (old-filter) result to
//! its caller, but is never stored -- the store can't be repopulated with
//! results from a superseded filter configuration.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::connection::Rows;
use crate::error::Result;
use crate::stats::Statistics;

/// A memoized query outcome.
#[derive(Debug, Clone)]
pub enum CachedResult {
    /// A tabular result.
    Rows(Rows),
    /// A descriptive-statistics record.
    Stats(Statistics),
}

/// Memoization store for query and statistics results.
///
/// Owned by the [`SalesMart`](crate::SalesMart) entry point and injected into
/// the query wrappers -- there is no global store, so sessions and tests are
/// isolated.
///
/// Concurrent `get_or_compute` calls on different keys never corrupt each
/// other; concurrent calls on the same key may both run the compute closure
/// (at-most-once is not required) but entries are inserted atomically under
/// the store lock.
#[derive(Debug)]
pub struct QueryCache {
    store: Mutex<HashMap<u64, CachedResult>>,
    generation: AtomicU64,
}

impl QueryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            store: Mutex::new(HashMap::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// Return the cached rows for `(operation, params)`, or run `compute`,
    /// store its result, and return it.
    ///
    /// `compute` must be deterministic for the captured parameters; cache
    /// correctness depends entirely on that. It runs outside the store lock,
    /// so a slow warehouse query never blocks unrelated lookups.
    pub fn rows_or_compute<F>(
        &self,
        operation: &str,
        params: &[(&str, String)],
        compute: F,
    ) -> Result<Rows>
    where
        F: FnOnce() -> Result<Rows>,
    {
        let generation = self.generation.load(Ordering::Acquire);
        let key = cache_key(generation, operation, params);

        if let Some(CachedResult::Rows(rows)) = self.lock_store().get(&key) {
            return Ok(rows.clone());
        }

        let rows = compute()?;
        self.store_if_current(generation, key, CachedResult::Rows(rows.clone()));
        Ok(rows)
    }

    /// Statistics counterpart of [`rows_or_compute`](Self::rows_or_compute).
    pub fn stats_or_compute<F>(
        &self,
        operation: &str,
        params: &[(&str, String)],
        compute: F,
    ) -> Result<Statistics>
    where
        F: FnOnce() -> Result<Statistics>,
    {
        let generation = self.generation.load(Ordering::Acquire);
        let key = cache_key(generation, operation, params);

        if let Some(CachedResult::Stats(stats)) = self.lock_store().get(&key) {
            return Ok(stats.clone());
        }

        let stats = compute()?;
        self.store_if_current(generation, key, CachedResult::Stats(stats.clone()));
        Ok(stats)
    }

    /// Empty the entire store and advance the filter generation.
    ///
    /// Must be called before the first query of a new global filter
    /// configuration. The generation bump happens-before the store is
    /// emptied, so an in-flight computation keyed under the old generation
    /// can never be stored as valid for the new one.
    pub fn clear(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.lock_store().clear();
    }

    /// Number of memoized entries.
    pub fn len(&self) -> usize {
        self.lock_store().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.lock_store().is_empty()
    }

    /// The current filter generation (advanced by [`clear`](Self::clear)).
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    fn store_if_current(&self, generation: u64, key: u64, value: CachedResult) {
        // Re-check after compute: a clear() that raced the computation means
        // the result belongs to a superseded filter configuration.
        if self.generation.load(Ordering::Acquire) == generation {
            self.lock_store().insert(key, value);
        }
    }

    fn lock_store(&self) -> std::sync::MutexGuard<'_, HashMap<u64, CachedResult>> {
        // A poisoned lock only means a panic mid-insert on another thread;
        // the map itself is always in a consistent state.
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive a deterministic key from the operation name and its parameters.
///
/// Parameters are sorted by name before hashing, so call sites don't have to
/// agree on an argument order. The hash only needs determinism and practical
/// collision avoidance, not cryptographic strength.
pub fn cache_key(generation: u64, operation: &str, params: &[(&str, String)]) -> u64 {
    let mut sorted: Vec<&(&str, String)> = params.iter().collect();
    sorted.sort_by_key(|(name, _)| *name);

    let mut hasher = DefaultHasher::new();
    generation.hash(&mut hasher);
    operation.hash(&mut hasher);
    for (name, value) in sorted {
        name.hash(&mut hasher);
        value.hash(&mut hasher);
    }
    hasher.finish()
}

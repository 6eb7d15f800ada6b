use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Search(String),
    Description(String),
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // Search keys are matched on the exact query string; two
            // queries differing only in case are different searches.
            CacheKey::Search(query) => write!(f, "search:{}", query),
            CacheKey::Description(volume_id) => write!(f, "desc:{}", volume_id),
        }
    }
}

/// In-process cache for catalog responses
///
/// Values are stored as serialized JSON keyed by [`CacheKey`], so one map
/// serves every cached shape. Entries live for the lifetime of the
/// process; there is no eviction.
#[derive(Clone, Default)]
pub struct Cache {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves a value from the cache by key
    ///
    /// Returns `None` on a miss. An entry that no longer deserializes to
    /// the requested type is treated as a miss as well.
    pub fn get_from_cache<T: serde::de::DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let entries = self.entries.read().ok()?;
        let json = entries.get(&format!("{}", key))?;

        match serde_json::from_str(json) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(key = %key, error = %e, "Discarding unreadable cache entry");
                None
            }
        }
    }

    /// Stores a value in the cache
    ///
    /// Serialization failures are logged and the entry is skipped; the
    /// caller already holds the computed value either way.
    pub fn store<T: serde::Serialize>(&self, key: &CacheKey, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(j) => j,
            Err(e) => {
                tracing::error!(error = %e, "Cache serialization error");
                return;
            }
        };

        if let Ok(mut entries) = self.entries.write() {
            entries.insert(format!("{}", key), json);
        }
    }
}

/// A macro to simplify caching logic.
///
/// This macro checks if a value is present in the cache.
/// If found, it returns the cached value.
/// If not found, it executes the provided block to compute the value,
/// stores it in the cache, and then returns the computed value.
///
/// # Arguments
/// * `$cache`: The cache instance to use for retrieval and storage. The cache must have
///   `get_from_cache` and `store` methods.
/// * `$key`: The key to use for caching the value.
/// * `$block`: The block of code to execute if the value is not found in cache.
///
/// # Example
/// ```ignore
/// let cached_value = cached!(cache, cache_key, async move {
///    // Compute the value if not in cache
///   compute_expensive_value()
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $block:expr) => {{
        // Attempt to get the value from cache
        if let Some(cached) = $cache.get_from_cache(&$key) {
            Ok(cached)
        } else {
            // If not in cache, execute the block to compute the value
            let value = $block.await?;
            // Store the computed value in cache
            $cache.store(&$key, &value);
            Ok(value)
        }
    }};
}

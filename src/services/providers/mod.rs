use std::collections::HashMap;

/// Book catalog provider abstraction
///
/// This module provides a pluggable architecture for different book catalog
/// data sources. Each provider implements volume search plus a single-volume
/// lookup used to enrich results that came back without a description.
use crate::{error::AppResult, models::ApiVolume, services::query::CatalogQuery};

pub mod google_books;

/// Trait for book catalog providers
///
/// Providers must implement both volume search (by query) and single-volume
/// lookup (by volume ID). Using the same provider for both keeps IDs
/// consistent: a volume ID from a search result is always valid for the
/// follow-up lookup.
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Search for volumes matching a query
    ///
    /// Returns raw catalog volumes capped at `max_results`; normalization
    /// happens downstream.
    async fn search(&self, query: &CatalogQuery, max_results: u32) -> AppResult<Vec<ApiVolume>>;

    /// Fetch the full description for a single volume
    ///
    /// Search responses often omit or truncate descriptions that the
    /// volume detail endpoint carries in full. Returns `None` when the
    /// volume has no description at all.
    async fn fetch_description(&self, volume_id: &str) -> AppResult<Option<String>>;

    /// Fetch descriptions for multiple volumes in parallel
    ///
    /// Default implementation calls fetch_description for each ID in
    /// parallel. Lookup failures are logged and skipped; enrichment must
    /// never fail a search that already succeeded.
    async fn fetch_description_batch(&self, volume_ids: Vec<String>) -> HashMap<String, String> {
        let mut tasks = Vec::new();

        for volume_id in volume_ids {
            let provider = self.clone_for_task();
            let task = tokio::spawn(async move {
                let description = provider.fetch_description(&volume_id).await;
                (volume_id, description)
            });
            tasks.push(task);
        }

        let mut descriptions = HashMap::new();
        let mut errors = 0usize;

        for task in tasks {
            match task.await {
                Ok((volume_id, Ok(Some(description)))) => {
                    descriptions.insert(volume_id, description);
                }
                Ok((_, Ok(None))) => {}
                Ok((volume_id, Err(e))) => {
                    tracing::debug!(volume_id = %volume_id, error = %e, "Description fetch failed");
                    errors += 1;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Task join error");
                    errors += 1;
                }
            }
        }

        if errors > 0 {
            tracing::warn!(
                fetched = descriptions.len(),
                errors = errors,
                "Partial description enrichment failure"
            );
        }

        descriptions
    }

    /// Clone provider for parallel task execution
    ///
    /// Required because providers need to be moved into tokio tasks.
    fn clone_for_task(&self) -> Box<dyn CatalogProvider>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

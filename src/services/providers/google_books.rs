/// Google Books API provider
///
/// Backs both catalog search and description enrichment.
///
/// API Flow:
/// 1. Search: /volumes?q=... → returns up to maxResults volumes
/// 2. Enrichment: /volumes/{volume_id} → returns one volume with the full
///    description the search response may have omitted
///
/// The query string arrives pre-encoded, so URLs are assembled by hand
/// instead of through the client's query builder, which would encode the
/// percent signs a second time.
use crate::{
    cache::{Cache, CacheKey},
    cached,
    error::{AppError, AppResult},
    models::{ApiSearchResponse, ApiVolume},
    services::{providers::CatalogProvider, query::CatalogQuery},
};
use reqwest::Client as HttpClient;
use std::time::Duration;

#[derive(Clone)]
pub struct GoogleBooksProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    cache: Cache,
}

impl GoogleBooksProvider {
    /// Creates a new Google Books provider with a bounded request timeout
    pub fn new(
        cache: Cache,
        api_key: String,
        api_url: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
            cache,
        })
    }

    /// Full volumes-search URL with the pre-encoded query spliced in
    fn volumes_url(&self, query: &CatalogQuery, max_results: u32) -> String {
        let mut url = format!(
            "{}/volumes?q={}&maxResults={}",
            self.api_url,
            query.q(),
            max_results
        );
        if let Some(lang) = query.lang_restrict() {
            url.push_str("&langRestrict=");
            url.push_str(lang);
        }
        url.push_str("&key=");
        url.push_str(&self.api_key);
        url
    }
}

#[async_trait::async_trait]
impl CatalogProvider for GoogleBooksProvider {
    async fn search(&self, query: &CatalogQuery, max_results: u32) -> AppResult<Vec<ApiVolume>> {
        if query.q().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        cached!(
            self.cache,
            CacheKey::Search(format!("{}", query)),
            async move {
                let url = self.volumes_url(query, max_results);

                let response = self.http_client.get(&url).send().await?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(AppError::ProviderUnavailable(format!(
                        "Books API returned status {}: {}",
                        status, body
                    )));
                }

                let search_response: ApiSearchResponse = response.json().await?;
                let total = search_response.total_items.unwrap_or_default();
                let volumes = search_response.items.unwrap_or_default();

                tracing::info!(
                    query = %query,
                    results = volumes.len(),
                    catalog_total = total,
                    provider = "google_books",
                    "Catalog search completed"
                );

                Ok(volumes)
            }
        )
    }

    async fn fetch_description(&self, volume_id: &str) -> AppResult<Option<String>> {
        cached!(
            self.cache,
            CacheKey::Description(volume_id.to_string()),
            async move {
                let url = format!("{}/volumes/{}?key={}", self.api_url, volume_id, self.api_key);

                let response = self.http_client.get(&url).send().await?;

                if !response.status().is_success() {
                    // Best-effort lookup; a missing volume keeps its placeholder
                    tracing::debug!(
                        volume_id = %volume_id,
                        status = %response.status(),
                        "Volume lookup returned non-success status"
                    );
                    return Ok::<_, AppError>(None);
                }

                let volume: ApiVolume = response.json().await?;
                let description = volume
                    .volume_info
                    .description
                    .map(|d| d.trim().to_string())
                    .filter(|d| !d.is_empty());

                Ok(description)
            }
        )
    }

    fn clone_for_task(&self) -> Box<dyn CatalogProvider> {
        Box::new(self.clone())
    }

    fn name(&self) -> &'static str {
        "google_books"
    }
}

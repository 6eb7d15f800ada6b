use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    error::AppResult,
    models::{PreferenceInput, SearchOutcome},
    services::recommend,
    state::AppState,
};

/// Rendered when the filters left nothing to show
const NO_MATCHES_MESSAGE: &str = "No books matched your preferences. Try widening the filters.";

#[derive(Debug, Serialize)]
pub struct DiscoveryResponse {
    /// Advisory rephrasing of the preferences from the model; null when
    /// the model was unavailable
    pub refined_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// `status` plus `books` on a found outcome
    #[serde(flatten)]
    pub outcome: SearchOutcome,
    pub generated_at: DateTime<Utc>,
}

/// Handler for the catalog discovery endpoint
pub async fn discover(
    State(state): State<AppState>,
    Json(prefs): Json<PreferenceInput>,
) -> AppResult<Json<DiscoveryResponse>> {
    let result = recommend::discover_books(
        state.catalog.as_ref(),
        state.llm.as_ref(),
        &prefs,
        state.config.max_results,
        state.config.enrich_descriptions,
    )
    .await?;

    let message = result
        .outcome
        .is_empty()
        .then(|| NO_MATCHES_MESSAGE.to_string());

    Ok(Json(DiscoveryResponse {
        refined_query: result.refined_query,
        message,
        outcome: result.outcome,
        generated_at: Utc::now(),
    }))
}

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{error::AppResult, models::PreferenceInput, services::recommend, state::AppState};

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    /// Model that produced the suggestions
    pub model: String,
    /// One display-ready text chunk per suggested book
    pub suggestions: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

/// Handler for the direct suggestion-generation endpoint
pub async fn generate(
    State(state): State<AppState>,
    Json(prefs): Json<PreferenceInput>,
) -> AppResult<Json<SuggestionsResponse>> {
    let suggestions =
        recommend::generate_suggestions(state.llm.as_ref(), state.parser.as_ref(), &prefs).await?;

    Ok(Json(SuggestionsResponse {
        model: state.llm.model().to_string(),
        suggestions,
        generated_at: Utc::now(),
    }))
}

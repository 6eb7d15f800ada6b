//! Request orchestration for both discovery modes.
//!
//! Each request moves through the same phases: validate the preferences,
//! call the external collaborators, render an outcome. The two modes
//! differ in which collaborators they call and how failures propagate:
//! the direct mode depends on the model, while the catalog mode treats
//! the model as optional garnish and only fails with the catalog.

use std::fmt;

use crate::{
    error::{AppError, AppResult},
    models::{ApiVolume, BookSummary, PreferenceInput, SearchOutcome},
    services::{
        llm::{parse::SuggestionParser, prompt, LlmClient},
        providers::CatalogProvider,
        query::build_query,
        ranking,
    },
};

/// Phase of one request, used as a structured logging field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Validating,
    RejectedInput,
    Calling,
    Rendered,
    Failed,
}

impl fmt::Display for RequestPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self {
            RequestPhase::Validating => "validating",
            RequestPhase::RejectedInput => "rejected_input",
            RequestPhase::Calling => "calling",
            RequestPhase::Rendered => "rendered",
            RequestPhase::Failed => "failed",
        };
        write!(f, "{}", phase)
    }
}

/// Direct-generation mode: one model call, chunked into suggestions.
///
/// The model's reply is passed through as display text; the only
/// processing is the parser's blank-line chunking. Requires at least one
/// filled preference field.
pub async fn generate_suggestions(
    llm: &dyn LlmClient,
    parser: &dyn SuggestionParser,
    prefs: &PreferenceInput,
) -> AppResult<Vec<String>> {
    tracing::debug!(phase = %RequestPhase::Validating, "Validating preferences");

    if !prefs.has_any_field() {
        tracing::warn!(phase = %RequestPhase::RejectedInput, "No preference fields filled");
        return Err(AppError::InvalidInput(
            "Fill in at least one preference to get suggestions".to_string(),
        ));
    }
    if let Err(reason) = prefs.validate() {
        tracing::warn!(phase = %RequestPhase::RejectedInput, reason = %reason, "Preferences out of bounds");
        return Err(AppError::InvalidInput(reason));
    }

    tracing::debug!(
        phase = %RequestPhase::Calling,
        model = %llm.model(),
        "Requesting suggestions from model"
    );

    let reply = match llm.generate(&prompt::suggestion_prompt(prefs)).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!(phase = %RequestPhase::Failed, error = %e, "Model call failed");
            return Err(e);
        }
    };

    let suggestions = parser.parse(&reply);

    tracing::info!(
        phase = %RequestPhase::Rendered,
        suggestions = suggestions.len(),
        "Suggestions generated"
    );

    Ok(suggestions)
}

/// Outcome of one catalog discovery request
#[derive(Debug)]
pub struct DiscoveryResult {
    /// Advisory search phrase from the model, shown to the user as
    /// context. `None` when the model was unavailable.
    pub refined_query: Option<String>,
    pub outcome: SearchOutcome,
}

/// Catalog mode: search, normalize, filter, rank.
///
/// The catalog query is always built from the raw preferences. The
/// model's refinement runs alongside it and is carried as display text
/// only, so a broken model never breaks the catalog path. Requires a
/// non-empty genre, which anchors the catalog query.
pub async fn discover_books(
    catalog: &dyn CatalogProvider,
    llm: &dyn LlmClient,
    prefs: &PreferenceInput,
    max_results: u32,
    enrich: bool,
) -> AppResult<DiscoveryResult> {
    tracing::debug!(phase = %RequestPhase::Validating, "Validating preferences");

    if prefs.genre.trim().is_empty() {
        tracing::warn!(phase = %RequestPhase::RejectedInput, "Missing genre");
        return Err(AppError::InvalidInput(
            "Enter a genre to search the catalog".to_string(),
        ));
    }
    if let Err(reason) = prefs.validate() {
        tracing::warn!(phase = %RequestPhase::RejectedInput, reason = %reason, "Preferences out of bounds");
        return Err(AppError::InvalidInput(reason));
    }

    let query = build_query(
        &prefs.genre,
        prefs.authors.as_deref(),
        prefs.language.as_deref(),
    );

    tracing::debug!(
        phase = %RequestPhase::Calling,
        query = %query,
        provider = catalog.name(),
        "Searching catalog"
    );

    // Bound here so the borrow in the join arm below stays valid
    let refinement = prompt::refinement_prompt(prefs);
    let (volumes_result, refined_result) = tokio::join!(
        catalog.search(&query, max_results),
        llm.generate(&refinement)
    );

    let mut volumes = match volumes_result {
        Ok(volumes) => volumes,
        Err(e) => {
            tracing::error!(phase = %RequestPhase::Failed, error = %e, "Catalog search failed");
            return Err(e);
        }
    };

    let refined_query = match refined_result {
        Ok(text) => {
            let text = text.trim().to_string();
            (!text.is_empty()).then_some(text)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Query refinement unavailable, continuing without it");
            None
        }
    };

    if enrich {
        enrich_descriptions(catalog, &mut volumes).await;
    }

    let books: Vec<BookSummary> = volumes.into_iter().map(BookSummary::from).collect();
    let outcome = ranking::filter_and_rank(
        books,
        Some(prefs.minimum_rating),
        prefs.prefers_english(),
    );

    tracing::info!(
        phase = %RequestPhase::Rendered,
        found = !outcome.is_empty(),
        "Discovery completed"
    );

    Ok(DiscoveryResult {
        refined_query,
        outcome,
    })
}

/// Fills empty descriptions from the volume detail endpoint.
///
/// Runs before normalization so the placeholder default still applies to
/// volumes whose lookup came back empty.
async fn enrich_descriptions(catalog: &dyn CatalogProvider, volumes: &mut [ApiVolume]) {
    let missing: Vec<String> = volumes
        .iter()
        .filter(|volume| {
            volume
                .volume_info
                .description
                .as_deref()
                .map(|d| d.trim().is_empty())
                .unwrap_or(true)
        })
        .filter_map(|volume| volume.id.clone())
        .collect();

    if missing.is_empty() {
        return;
    }

    tracing::debug!(volumes = missing.len(), "Enriching missing descriptions");

    let mut descriptions = catalog.fetch_description_batch(missing).await;

    for volume in volumes.iter_mut() {
        if let Some(id) = &volume.id {
            if let Some(description) = descriptions.remove(id) {
                volume.volume_info.description = Some(description);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::llm::parse::BlankLineChunker;
    use crate::services::query::CatalogQuery;
    use mockall::mock;
    use serde_json::json;
    use std::collections::HashMap;

    mock! {
        Catalog {}

        #[async_trait::async_trait]
        impl CatalogProvider for Catalog {
            async fn search(
                &self,
                query: &CatalogQuery,
                max_results: u32,
            ) -> AppResult<Vec<ApiVolume>>;
            async fn fetch_description(&self, volume_id: &str) -> AppResult<Option<String>>;
            async fn fetch_description_batch(
                &self,
                volume_ids: Vec<String>,
            ) -> HashMap<String, String>;
            fn clone_for_task(&self) -> Box<dyn CatalogProvider>;
            fn name(&self) -> &'static str;
        }
    }

    mock! {
        Llm {}

        #[async_trait::async_trait]
        impl LlmClient for Llm {
            async fn generate(&self, prompt: &str) -> AppResult<String>;
            fn model(&self) -> &str;
        }
    }

    fn create_test_prefs(genre: &str) -> PreferenceInput {
        PreferenceInput {
            genre: genre.to_string(),
            ..Default::default()
        }
    }

    fn volume(id: &str, title: &str, rating: Option<f32>) -> ApiVolume {
        let mut info = json!({
            "title": title,
            "authors": ["Test Author"],
            "description": "A story about the sea and the people who sail it."
        });
        if let Some(r) = rating {
            info["averageRating"] = json!(r);
        }
        serde_json::from_value(json!({ "id": id, "volumeInfo": info })).unwrap()
    }

    fn ready_llm(reply: &str) -> MockLlm {
        let reply = reply.to_string();
        let mut llm = MockLlm::new();
        llm.expect_model().return_const("gemini-test".to_string());
        llm.expect_generate()
            .returning(move |_| Ok(reply.clone()));
        llm
    }

    #[tokio::test]
    async fn test_generate_requires_at_least_one_field() {
        let llm = MockLlm::new();
        let prefs = PreferenceInput::default();

        let result = generate_suggestions(&llm, &BlankLineChunker, &prefs).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_generate_accepts_any_single_field() {
        let llm = ready_llm("Book one\n\nBook two");
        let prefs = PreferenceInput {
            mood: Some("adventurous".to_string()),
            ..Default::default()
        };

        let suggestions = generate_suggestions(&llm, &BlankLineChunker, &prefs)
            .await
            .unwrap();
        assert_eq!(suggestions.len(), 2);
    }

    #[tokio::test]
    async fn test_generate_rejects_out_of_bounds_rating() {
        let llm = MockLlm::new();
        let mut prefs = create_test_prefs("mystery");
        prefs.minimum_rating = 0.5;

        let result = generate_suggestions(&llm, &BlankLineChunker, &prefs).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_generate_propagates_model_failure() {
        let mut llm = MockLlm::new();
        llm.expect_model().return_const("gemini-test".to_string());
        llm.expect_generate()
            .returning(|_| Err(AppError::LlmUnavailable("down".to_string())));

        let result =
            generate_suggestions(&llm, &BlankLineChunker, &create_test_prefs("mystery")).await;
        assert!(matches!(result, Err(AppError::LlmUnavailable(_))));
    }

    #[tokio::test]
    async fn test_discovery_with_genre_only_reaches_the_catalog() {
        let mut catalog = MockCatalog::new();
        catalog.expect_name().return_const("test_catalog");
        catalog
            .expect_search()
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let llm = ready_llm("classic mystery novels");

        let result = discover_books(&catalog, &llm, &create_test_prefs("mystery"), 20, false)
            .await
            .unwrap();

        assert!(matches!(result.outcome, SearchOutcome::Empty));
        assert_eq!(
            result.refined_query,
            Some("classic mystery novels".to_string())
        );
    }

    #[tokio::test]
    async fn test_discovery_sends_preferences_in_the_refinement_prompt() {
        let mut catalog = MockCatalog::new();
        catalog.expect_name().return_const("test_catalog");
        catalog.expect_search().returning(|_, _| Ok(vec![]));

        let mut llm = MockLlm::new();
        llm.expect_generate()
            .withf(|prompt| prompt.contains("- Genre: adventure"))
            .times(1)
            .returning(|_| Ok("adventure stories".to_string()));

        let result = discover_books(&catalog, &llm, &create_test_prefs("adventure"), 20, false)
            .await
            .unwrap();

        assert_eq!(result.refined_query, Some("adventure stories".to_string()));
    }

    #[tokio::test]
    async fn test_discovery_rejects_missing_genre() {
        let catalog = MockCatalog::new();
        let llm = MockLlm::new();
        let prefs = PreferenceInput {
            mood: Some("curious".to_string()),
            ..Default::default()
        };

        let result = discover_books(&catalog, &llm, &prefs, 20, false).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_discovery_filters_and_ranks_results() {
        let mut catalog = MockCatalog::new();
        catalog.expect_name().return_const("test_catalog");
        catalog.expect_search().returning(|_, _| {
            Ok(vec![
                volume("v1", "The Long Way", Some(4.2)),
                volume("v2", "High Tide", Some(4.8)),
                volume("v3", "Unrated Story", None),
            ])
        });

        let llm = ready_llm("seafaring adventure fiction");

        let result = discover_books(&catalog, &llm, &create_test_prefs("adventure"), 20, false)
            .await
            .unwrap();

        match result.outcome {
            SearchOutcome::Found { books } => {
                let titles: Vec<&str> = books.iter().map(|b| b.title.as_str()).collect();
                // Unrated falls below the default 3.0 minimum
                assert_eq!(titles, vec!["High Tide", "The Long Way"]);
            }
            SearchOutcome::Empty => panic!("expected results"),
        }
    }

    #[tokio::test]
    async fn test_discovery_drops_non_finite_rating_strings() {
        let mut catalog = MockCatalog::new();
        catalog.expect_name().return_const("test_catalog");
        catalog.expect_search().returning(|_, _| {
            let drifting: ApiVolume = serde_json::from_value(json!({
                "id": "v2",
                "volumeInfo": {
                    "title": "Driftwood",
                    "averageRating": "NaN",
                    "description": "A story about the sea and the people who sail it."
                }
            }))
            .unwrap();

            Ok(vec![
                volume("v1", "Starlight", Some(4.9)),
                drifting,
                volume("v3", "Breakwater", Some(2.0)),
            ])
        });

        let llm = ready_llm("coastal fiction");

        let mut prefs = create_test_prefs("adventure");
        prefs.minimum_rating = 4.0;

        let result = discover_books(&catalog, &llm, &prefs, 20, false)
            .await
            .unwrap();

        match result.outcome {
            SearchOutcome::Found { books } => {
                let titles: Vec<&str> = books.iter().map(|b| b.title.as_str()).collect();
                assert_eq!(titles, vec!["Starlight"]);
            }
            SearchOutcome::Empty => panic!("expected results"),
        }
    }

    #[tokio::test]
    async fn test_discovery_survives_model_failure() {
        let mut catalog = MockCatalog::new();
        catalog.expect_name().return_const("test_catalog");
        catalog
            .expect_search()
            .returning(|_, _| Ok(vec![volume("v1", "The Long Way", Some(4.2))]));

        let mut llm = MockLlm::new();
        llm.expect_generate()
            .returning(|_| Err(AppError::LlmUnavailable("down".to_string())));

        let result = discover_books(&catalog, &llm, &create_test_prefs("adventure"), 20, false)
            .await
            .unwrap();

        assert_eq!(result.refined_query, None);
        assert!(matches!(result.outcome, SearchOutcome::Found { .. }));
    }

    #[tokio::test]
    async fn test_discovery_propagates_catalog_failure() {
        let mut catalog = MockCatalog::new();
        catalog.expect_name().return_const("test_catalog");
        catalog
            .expect_search()
            .returning(|_, _| Err(AppError::ProviderUnavailable("503".to_string())));

        let llm = ready_llm("anything");

        let result = discover_books(&catalog, &llm, &create_test_prefs("adventure"), 20, false).await;
        assert!(matches!(result, Err(AppError::ProviderUnavailable(_))));
    }

    #[tokio::test]
    async fn test_discovery_enriches_missing_descriptions() {
        let mut bare = volume("v1", "The Long Way", Some(4.5));
        bare.volume_info.description = None;

        let mut catalog = MockCatalog::new();
        catalog.expect_name().return_const("test_catalog");
        catalog
            .expect_search()
            .returning(move |_, _| Ok(vec![bare.clone()]));
        catalog
            .expect_fetch_description_batch()
            .withf(|ids| *ids == ["v1".to_string()])
            .times(1)
            .returning(|_| {
                let mut found = HashMap::new();
                found.insert(
                    "v1".to_string(),
                    "A tale about the sea and the crew that crossed it.".to_string(),
                );
                found
            });

        let llm = ready_llm("seafaring fiction");

        let result = discover_books(&catalog, &llm, &create_test_prefs("adventure"), 20, true)
            .await
            .unwrap();

        match result.outcome {
            SearchOutcome::Found { books } => {
                assert!(books[0].description.starts_with("A tale about the sea"));
            }
            SearchOutcome::Empty => panic!("expected results"),
        }
    }

    #[test]
    fn test_request_phase_display() {
        assert_eq!(RequestPhase::RejectedInput.to_string(), "rejected_input");
        assert_eq!(RequestPhase::Calling.to_string(), "calling");
    }
}

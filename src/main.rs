use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bookscout_api::{
    cache::Cache,
    config::Config,
    routes::create_router,
    services::{
        llm::{gemini::GeminiClient, parse::BlankLineChunker},
        providers::google_books::GoogleBooksProvider,
    },
    state::AppState,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookscout_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Secrets are read once here; request handling never touches the
    // environment. Missing keys stop the process before it binds.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Set GEMINI_API_KEY and BOOKS_API_KEY in the environment or a .env file.");
            std::process::exit(1);
        }
    };

    let timeout = Duration::from_secs(config.request_timeout_secs);
    let cache = Cache::new();

    let catalog = GoogleBooksProvider::new(
        cache,
        config.books_api_key.clone(),
        config.books_api_url.clone(),
        timeout,
    )
    .unwrap();

    let llm = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_api_url.clone(),
        config.gemini_model.clone(),
        timeout,
    )
    .unwrap();

    tracing::info!(
        model = %config.gemini_model,
        catalog_url = %config.books_api_url,
        max_results = config.max_results,
        "Collaborators initialized"
    );

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(
        Arc::new(catalog),
        Arc::new(llm),
        Arc::new(BlankLineChunker),
        config,
    );

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    tracing::info!(addr = %addr, "Server listening");
    axum::serve(listener, app).await.unwrap();
}

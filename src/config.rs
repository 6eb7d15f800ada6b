use serde::Deserialize;

/// Application configuration loaded from environment variables
///
/// Both API keys are required; everything else has a sensible default.
/// Loading fails before the server binds when a required key is absent,
/// so a misconfigured deployment never accepts a request it cannot serve.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Gemini (LLM) API key
    pub gemini_api_key: String,

    /// Books catalog API key
    pub books_api_key: String,

    /// Gemini API base URL
    #[serde(default = "default_gemini_api_url")]
    pub gemini_api_url: String,

    /// Gemini model used for both flows
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Books catalog API base URL
    #[serde(default = "default_books_api_url")]
    pub books_api_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-call timeout for both external collaborators, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Fixed cap on catalog results per search
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Fetch extended descriptions from the volume detail endpoint
    #[serde(default)]
    pub enrich_descriptions: bool,
}

fn default_gemini_api_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_books_api_url() -> String {
    "https://www.googleapis.com/books/v1".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_max_results() -> u32 {
    20
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

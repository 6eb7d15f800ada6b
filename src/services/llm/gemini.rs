/// Google Gemini client
///
/// Calls the generateContent endpoint with a single user turn and pulls
/// the first candidate's text out of the reply. Every failure on this
/// path, transport included, surfaces as `LlmUnavailable` so callers can
/// tell a broken model apart from a broken catalog.
use crate::{
    error::{AppError, AppResult},
    services::llm::LlmClient,
};
use reqwest::Client as HttpClient;
use std::time::Duration;

#[derive(Clone)]
pub struct GeminiClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl GeminiClient {
    /// Creates a new Gemini client with a bounded request timeout
    pub fn new(
        api_key: String,
        api_url: String,
        model: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
            model,
        })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url, self.model
        )
    }
}

/// First candidate's text, if the reply carries one
fn extract_text(payload: &serde_json::Value) -> Option<&str> {
    payload["candidates"][0]["content"]["parts"][0]["text"].as_str()
}

#[async_trait::async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let body = serde_json::json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        });

        let response = self
            .http_client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::LlmUnavailable(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::LlmUnavailable(format!(
                "Gemini API returned status {}: {}",
                status, body
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::LlmUnavailable(format!("Gemini response unreadable: {}", e)))?;

        let text = extract_text(&payload)
            .ok_or_else(|| AppError::LlmUnavailable("No text in Gemini response".to_string()))?
            .to_string();

        tracing::info!(
            model = %self.model,
            reply_chars = text.len(),
            provider = "gemini",
            "Model reply received"
        );

        Ok(text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

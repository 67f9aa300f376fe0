/*!
 * HTTP translation provider.
 *
 * Client for a LibreTranslate-compatible JSON endpoint: a POST to
 * `/translate` with the source text and language pair, returning the
 * translated string. One request is issued per text leaf.
 */

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::TranslationProvider;

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Translation client for a LibreTranslate-style API
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    /// Base URL of the translation API
    base_url: String,
    /// API key, empty if the endpoint is unauthenticated
    api_key: String,
    /// Source language code (e.g., "en")
    source_language: String,
    /// Target language code (e.g., "ja")
    target_language: String,
    /// HTTP client for making requests
    client: Client,
}

/// Request payload for the translate endpoint
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    /// Text to translate
    q: &'a str,
    /// Source language code
    source: &'a str,
    /// Target language code
    target: &'a str,
    /// Payload format; always plain text, markup stays in the tree
    format: &'a str,
    /// API key if required by the endpoint
    #[serde(skip_serializing_if = "str::is_empty")]
    api_key: &'a str,
}

/// Response payload from the translate endpoint
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    /// Translated text
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Error body some endpoints return alongside a non-success status
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

impl HttpTranslator {
    /// Create a new client for the given endpoint and language pair.
    pub fn new(
        base_url: &str,
        api_key: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl TranslationProvider for HttpTranslator {
    async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        let request = TranslateRequest {
            q: text,
            source: &self.source_language,
            target: &self.target_language,
            format: "text",
            api_key: &self.api_key,
        };

        let response = self
            .client
            .post(self.endpoint("translate"))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| status.to_string());
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(ProviderError::AuthenticationError(message));
            }
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;
        Ok(body.translated_text)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let response = self
            .client
            .get(self.endpoint("languages"))
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ProviderError::ApiError {
                status_code: response.status().as_u16(),
                message: "languages endpoint not available".to_string(),
            });
        }
        Ok(())
    }
}

use crate::config::ProviderConfig;
use crate::error::{GenerationError, RasoiError};
use crate::providers::LlmProvider;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::{json, Value};

const UNKNOWN_API_ERROR: &str = "Unknown API error";

pub struct GoogleProvider {
    client: Client,
    base_url: String,
    model: String,
    max_output_tokens: u32,
}

impl GoogleProvider {
    /// Create a new Google Gemini provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, RasoiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(GoogleProvider {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_output_tokens: config.max_output_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String, model: String) -> Self {
        GoogleProvider {
            client: Client::new(),
            base_url,
            model,
            max_output_tokens: 2048,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl LlmProvider for GoogleProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    // The key travels in the query string, so transport errors are stripped
    // of their URL before they reach messages or logs.
    async fn generate(&self, prompt: &str, api_key: &str) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&json!({
                "contents": [{
                    "parts": [{ "text": prompt }]
                }],
                "generationConfig": {
                    "maxOutputTokens": self.max_output_tokens
                }
            }))
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            warn!("Gemini API error response ({}): {:?}", status, body);
            let message = body["error"]["message"]
                .as_str()
                .unwrap_or(UNKNOWN_API_ERROR)
                .to_string();
            return Err(GenerationError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)?;
        debug!("{:?}", response_body);

        let text = response_body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .filter(|text| !text.trim().is_empty())
            .ok_or(GenerationError::EmptyGeneration)?;

        Ok(text.to_string())
    }
}

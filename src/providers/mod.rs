mod google;
pub mod prompt;

pub use google::GoogleProvider;
pub use prompt::{build_recipe_prompt, RECIPE_GENERATION_PROMPT};

use crate::error::GenerationError;
use async_trait::async_trait;

/// A remote text-generation service
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "google")
    fn provider_name(&self) -> &str;

    /// Send `prompt` and return the generated text. `api_key` is the
    /// caller's session credential.
    async fn generate(&self, prompt: &str, api_key: &str) -> Result<String, GenerationError>;
}

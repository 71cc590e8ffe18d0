use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::model::RecipeId;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Text-generation provider settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Cooking mode timing
    #[serde(default)]
    pub cooking: CookingConfig,
    /// Recipe shown as the featured pick on the browse view
    #[serde(default = "default_featured_recipe_id")]
    pub featured_recipe_id: RecipeId,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            cooking: CookingConfig::default(),
            featured_recipe_id: default_featured_recipe_id(),
        }
    }
}

/// Configuration for the Gemini text-generation endpoint
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Model identifier (e.g., "gemini-2.0-flash")
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL for the API endpoint (for proxies and tests)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Maximum tokens to generate
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// API key (can also be set via GOOGLE_API_KEY)
    pub api_key: Option<String>,
    /// Request timeout in seconds; the transport default applies when unset
    pub timeout_secs: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            max_output_tokens: default_max_output_tokens(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

impl ProviderConfig {
    /// API key from configuration, falling back to the environment
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Configuration for the cooking-mode step timer
#[derive(Debug, Deserialize, Clone)]
pub struct CookingConfig {
    /// Period of one timer tick in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// How long the completion celebration stays visible
    #[serde(default = "default_celebration_secs")]
    pub celebration_secs: u64,
}

impl Default for CookingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            celebration_secs: default_celebration_secs(),
        }
    }
}

impl CookingConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn celebration(&self) -> Duration {
        Duration::from_secs(self.celebration_secs)
    }
}

// Default value functions
fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_max_output_tokens() -> u32 {
    2048
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_celebration_secs() -> u64 {
    4
}

fn default_featured_recipe_id() -> RecipeId {
    4
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RASOI__ prefix
    /// 2. rasoi.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RASOI__PROVIDER__MODEL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// Environment variable format: RASOI__COOKING__TICK_INTERVAL_MS
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("rasoi").required(false))
        // Use double underscore for nested: RASOI__PROVIDER__API_KEY
        .add_source(
            Environment::with_prefix("RASOI")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

//! State and request types for AI recipe generation.

use crate::error::GenerationError;
use crate::model::RecipeId;
use crate::providers::{build_recipe_prompt, LlmProvider};
use log::debug;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The AI search box: query, session credential, in-flight flag and the
/// last error message.
#[derive(Default)]
pub struct AiSearch {
    query: String,
    api_key: Option<String>,
    in_flight: Arc<AtomicBool>,
    error: Option<String>,
    credential_prompt: bool,
}

impl AiSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Whether the submit control should be enabled
    pub fn can_submit(&self) -> bool {
        !self.is_generating() && !self.query.trim().is_empty()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Whether the user should be asked for an API key
    pub fn needs_credential(&self) -> bool {
        self.credential_prompt
    }

    pub fn request_credential(&mut self) {
        self.credential_prompt = true;
    }

    pub fn dismiss_credential_prompt(&mut self) {
        self.credential_prompt = false;
    }

    /// Store the session API key. Blank input is ignored.
    pub fn set_api_key(&mut self, key: &str) -> bool {
        let key = key.trim();
        if key.is_empty() {
            return false;
        }
        self.api_key = Some(key.to_string());
        self.credential_prompt = false;
        self.error = None;
        true
    }

    /// Request for the current query, in flight until the request is
    /// dropped. `None` without a session API key.
    pub(crate) fn start_request(&self) -> Option<GenerationRequest> {
        let api_key = self.api_key.as_deref()?;
        Some(GenerationRequest {
            query: self.query.trim().to_string(),
            api_key: api_key.to_string(),
            prompt: build_recipe_prompt(&self.query),
            _in_flight: InFlight::acquire(&self.in_flight),
        })
    }

    pub(crate) fn set_error(&mut self, message: Option<String>) {
        self.error = message;
    }
}

/// Holds the in-flight flag up for as long as it lives.
struct InFlight(Arc<AtomicBool>);

impl InFlight {
    fn acquire(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        InFlight(Arc::clone(flag))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Everything needed to call the provider, detached from the app state so
/// the app stays usable while the call is pending. The search box reports a
/// generation in progress until the request is dropped.
#[must_use = "the search box stays busy until the request is finished or dropped"]
pub struct GenerationRequest {
    query: String,
    api_key: String,
    prompt: String,
    _in_flight: InFlight,
}

// The credential never shows up in logs or panics.
impl fmt::Debug for GenerationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

impl GenerationRequest {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Make the single network call for this request.
    pub async fn send(&self, provider: &dyn LlmProvider) -> Result<String, GenerationError> {
        debug!(
            "Requesting recipe for '{}' from {}",
            self.query,
            provider.provider_name()
        );
        provider.generate(&self.prompt, &self.api_key).await
    }
}

/// How a generation attempt began
#[derive(Debug)]
pub enum GenerationStart {
    /// Blank query or a request already in flight
    Ignored,
    /// No API key for this session yet
    CredentialRequired,
    Ready(GenerationRequest),
}

/// Final result of a generation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Ignored,
    CredentialRequired,
    /// The recipe was added under this id and is now selected
    Created(RecipeId),
    /// The attempt failed with this user-facing message
    Failed(String),
}

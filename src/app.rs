//! The application controller: one owner for the catalog, view state, AI
//! search box and the active cooking session.

use crate::catalog::{Catalog, ViewState};
use crate::config::AppConfig;
use crate::cooking::CookingSession;
use crate::error::{GenerationError, RasoiError};
use crate::generator::{AiSearch, GenerationOutcome, GenerationRequest, GenerationStart};
use crate::model::{Recipe, RecipeId};
use crate::parser::parse_recipe_text;
use crate::providers::LlmProvider;
use log::{error, info};

pub struct App {
    config: AppConfig,
    catalog: Catalog,
    view: ViewState,
    search: AiSearch,
    cooking: Option<CookingSession>,
}

impl App {
    /// App over the bundled seed recipes
    pub fn new(config: AppConfig) -> Result<Self, RasoiError> {
        Ok(Self::with_catalog(config, Catalog::with_seed_recipes()?))
    }

    pub fn with_catalog(config: AppConfig, catalog: Catalog) -> Self {
        App {
            config,
            catalog,
            view: ViewState::new(),
            search: AiSearch::new(),
            cooking: None,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn ai_search(&self) -> &AiSearch {
        &self.search
    }

    // --- browsing ---

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.view.set_search_term(term);
    }

    pub fn set_tag_filter(&mut self, tag: impl Into<String>) {
        self.view.set_tag_filter(tag);
    }

    pub fn filtered_recipes(&self) -> Vec<&Recipe> {
        self.catalog.filtered(&self.view)
    }

    pub fn tags(&self) -> Vec<String> {
        self.catalog.tags()
    }

    pub fn featured_recipe(&self) -> Option<&Recipe> {
        self.catalog.featured(self.config.featured_recipe_id)
    }

    /// Recipe shown by the current detail or cooking view
    pub fn current_recipe(&self) -> Option<&Recipe> {
        let id = self
            .view
            .cooking_recipe()
            .or_else(|| self.view.selected_recipe())?;
        self.catalog.get(id)
    }

    // --- navigation ---

    /// Open a recipe's detail view. Any cooking session is discarded.
    pub fn select_recipe(&mut self, id: RecipeId) -> Result<&Recipe, RasoiError> {
        if self.catalog.get(id).is_none() {
            return Err(RasoiError::RecipeNotFound(id));
        }
        self.cooking = None;
        self.view.select(id);
        self.catalog.get(id).ok_or(RasoiError::RecipeNotFound(id))
    }

    pub fn go_back(&mut self) {
        self.view.deselect();
    }

    /// Enter cooking mode for a recipe with at least one instruction.
    pub fn start_cooking(&mut self, id: RecipeId) -> Result<&mut CookingSession, RasoiError> {
        let recipe = self.catalog.get(id).ok_or(RasoiError::RecipeNotFound(id))?;
        let session = CookingSession::new(recipe, &self.config.cooking)?;
        self.view.enter_cooking(id);
        Ok(self.cooking.insert(session))
    }

    pub fn cooking_session(&self) -> Option<&CookingSession> {
        self.cooking.as_ref()
    }

    pub fn cooking_session_mut(&mut self) -> Option<&mut CookingSession> {
        self.cooking.as_mut()
    }

    /// Leave cooking mode for the same recipe's detail view. The session and
    /// its ticker are dropped.
    pub fn exit_cooking(&mut self) {
        if self.cooking.take().is_some() {
            info!("Cooking session ended");
        }
        self.view.exit_cooking();
    }

    // --- AI generation ---

    pub fn set_ai_query(&mut self, query: impl Into<String>) {
        self.search.set_query(query);
    }

    /// Store the session API key. Returns false for blank input.
    pub fn set_api_key(&mut self, key: &str) -> bool {
        self.search.set_api_key(key)
    }

    pub fn dismiss_credential_prompt(&mut self) {
        self.search.dismiss_credential_prompt();
    }

    /// Validate the query and credential and mark a request as in flight.
    ///
    /// The request stays in flight until it is handed back to
    /// [`App::finish_generation`] or dropped.
    pub fn begin_generation(&mut self) -> GenerationStart {
        if self.search.is_generating() || self.search.query().trim().is_empty() {
            return GenerationStart::Ignored;
        }

        self.search.set_error(None);

        match self.search.start_request() {
            Some(request) => GenerationStart::Ready(request),
            None => {
                info!("No API key for this session, asking the user for one");
                self.search.request_credential();
                GenerationStart::CredentialRequired
            }
        }
    }

    /// Apply the provider's answer for `request`. The catalog and navigation
    /// only change on full success.
    pub fn finish_generation(
        &mut self,
        request: GenerationRequest,
        response: Result<String, GenerationError>,
    ) -> GenerationOutcome {
        let draft = response.and_then(|text| {
            parse_recipe_text(&text, request.query()).map_err(|e| {
                error!("Error parsing AI response: {}", e);
                error!("Raw AI response text: {}", text);
                GenerationError::from(e)
            })
        });
        drop(request);

        match draft {
            Ok(draft) => {
                let id = self.catalog.add_generated(draft);
                self.cooking = None;
                self.view.select(id);
                self.search.set_query("");
                GenerationOutcome::Created(id)
            }
            Err(e) => {
                error!("Error fetching or processing AI recipe: {}", e);
                let message = e.user_message();
                self.search.set_error(Some(message.clone()));
                GenerationOutcome::Failed(message)
            }
        }
    }

    /// Run one complete generation attempt for the current AI query.
    pub async fn generate(&mut self, provider: &dyn LlmProvider) -> GenerationOutcome {
        let request = match self.begin_generation() {
            GenerationStart::Ignored => return GenerationOutcome::Ignored,
            GenerationStart::CredentialRequired => return GenerationOutcome::CredentialRequired,
            GenerationStart::Ready(request) => request,
        };
        let response = request.send(provider).await;
        self.finish_generation(request, response)
    }
}

pub mod app;
pub mod catalog;
pub mod config;
pub mod cooking;
pub mod display;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod providers;

pub use app::App;
pub use catalog::{collect_tags, filter, Catalog, Selection, ViewState};
pub use config::{AppConfig, CookingConfig, ProviderConfig};
pub use cooking::{CookingSession, StepChange, StepPace, StepStatus, StepTimer};
pub use error::{GenerationError, ParseError, RasoiError};
pub use generator::{AiSearch, GenerationOutcome, GenerationRequest, GenerationStart};
pub use model::{Difficulty, Ingredient, Instruction, Recipe, RecipeDraft, RecipeId, RecipeType};
pub use parser::parse_recipe_text;
pub use providers::{GoogleProvider, LlmProvider};

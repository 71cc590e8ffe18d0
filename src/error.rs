use thiserror::Error;

use crate::model::RecipeId;

/// Errors raised by catalog, cooking and configuration operations
#[derive(Error, Debug)]
pub enum RasoiError {
    /// No recipe with this id exists in the catalog
    #[error("Recipe {0} not found")]
    RecipeNotFound(RecipeId),

    /// Cooking mode needs at least one instruction
    #[error("Recipe {0} has no instructions to cook")]
    NothingToCook(RecipeId),

    /// The bundled seed data could not be loaded
    #[error("Invalid seed data: {0}")]
    SeedData(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Failed to build the HTTP client
    #[error("HTTP client error: {0}")]
    ClientError(#[from] reqwest::Error),

    /// Terminal I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of a single AI generation attempt
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The request never produced an HTTP response
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("API Error ({status}): {message}")]
    Remote { status: u16, message: String },

    /// The response envelope carried no generated text
    #[error("No recipe content found in AI response.")]
    EmptyGeneration,

    /// The generated text could not be turned into a recipe
    #[error("{0}")]
    Parse(#[from] ParseError),
}

impl GenerationError {
    /// Message shown to the user in place of any previous error
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::Parse(e) => {
                format!("Failed to understand AI response format. {}", e)
            }
            other => format!(
                "An error occurred: {}. Check your API key and network connection.",
                other
            ),
        }
    }
}

/// Reasons the tolerant parser rejects model output
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no JSON object found in response")]
    NoJsonFound,

    #[error("malformed JSON: {0}")]
    MalformedJson(String),

    #[error("AI response missing essential recipe fields (title, description, ingredients, instructions)")]
    MissingEssentialFields,

    #[error("ingredient format invalid: first ingredient has no name")]
    IngredientFormat,

    #[error("instruction format invalid: expected strings or objects with text")]
    InstructionFormat,
}

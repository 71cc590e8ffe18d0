/// The template used to ask the model for a recipe.
///
/// Loaded from `prompt.txt` at compile time using `include_str!` so it can
/// be edited without dealing with Rust string syntax. `{query}` is replaced
/// with the user's request.
pub const RECIPE_GENERATION_PROMPT: &str = include_str!("prompt.txt");

const QUERY_PLACEHOLDER: &str = "{query}";

/// Build the generation prompt for a user request.
pub fn build_recipe_prompt(query: &str) -> String {
    RECIPE_GENERATION_PROMPT.replace(QUERY_PLACEHOLDER, query.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_embedded() {
        assert!(!RECIPE_GENERATION_PROMPT.is_empty());
        assert!(RECIPE_GENERATION_PROMPT.contains(QUERY_PLACEHOLDER));
    }

    #[test]
    fn test_prompt_describes_recipe_shape() {
        for field in [
            "\"title\"",
            "\"description\"",
            "\"prepTime\"",
            "\"cookTime\"",
            "\"totalTime\"",
            "\"servings\"",
            "\"difficulty\"",
            "\"rating\"",
            "\"tags\"",
            "\"ingredients\"",
            "\"instructions\"",
            "\"estimatedTime\"",
            "\"image\"",
        ] {
            assert!(RECIPE_GENERATION_PROMPT.contains(field), "missing {}", field);
        }
    }

    #[test]
    fn test_build_recipe_prompt_inserts_query() {
        let prompt = build_recipe_prompt("  spicy chicken tacos ");
        assert!(prompt.contains("\"spicy chicken tacos\""));
        assert!(!prompt.contains(QUERY_PLACEHOLDER));
    }
}

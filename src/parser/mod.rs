//! Tolerant conversion of model-generated text into a recipe draft.

mod extract;

pub use self::extract::{
    find_candidate, BraceSpan, ExtractionStrategy, FencedJsonBlock, DEFAULT_STRATEGIES,
};

use crate::error::ParseError;
use crate::model::{Difficulty, Ingredient, Instruction, RecipeDraft};
use log::debug;
use serde_json::{Map, Value};

const NOT_AVAILABLE: &str = "N/A";
const DEFAULT_SERVINGS: u32 = 2;
const DEFAULT_RATING: f32 = 4.0;
const AI_TAG: &str = "AI Generated";
const UNKNOWN_INGREDIENT: &str = "Unknown Ingredient";
const MISSING_INSTRUCTION: &str = "Missing instruction text";

/// Parse generated text into a draft using the default extraction strategies.
///
/// `query` is the user's request; its first word becomes a tag when the
/// model supplies no tags.
pub fn parse_recipe_text(text: &str, query: &str) -> Result<RecipeDraft, ParseError> {
    parse_recipe_text_with(text, query, DEFAULT_STRATEGIES)
}

pub fn parse_recipe_text_with(
    text: &str,
    query: &str,
    strategies: &[&dyn ExtractionStrategy],
) -> Result<RecipeDraft, ParseError> {
    let (strategy, candidate) = find_candidate(text, strategies).ok_or(ParseError::NoJsonFound)?;
    debug!("Found JSON candidate with {}", strategy);

    let parsed: Value =
        serde_json::from_str(candidate).map_err(|e| ParseError::MalformedJson(e.to_string()))?;
    let object = parsed
        .as_object()
        .ok_or(ParseError::MissingEssentialFields)?;

    let title = truthy_str(object, "title");
    let description = truthy_str(object, "description");
    let ingredients = object.get("ingredients").and_then(Value::as_array);
    let instructions = object.get("instructions").and_then(Value::as_array);

    let (Some(title), Some(description), Some(ingredients), Some(instructions)) =
        (title, description, ingredients, instructions)
    else {
        return Err(ParseError::MissingEssentialFields);
    };

    if let Some(first) = ingredients.first() {
        if first.get("name").is_none() {
            return Err(ParseError::IngredientFormat);
        }
    }

    let instructions = normalize_instructions(instructions)?;

    Ok(RecipeDraft {
        title: title.to_string(),
        description: description.to_string(),
        image: truthy_str(object, "image").unwrap_or_default().to_string(),
        prep_time: display_time(object, "prepTime"),
        cook_time: display_time(object, "cookTime"),
        total_time: display_time(object, "totalTime"),
        servings: servings(object.get("servings")),
        difficulty: object
            .get("difficulty")
            .and_then(Value::as_str)
            .and_then(Difficulty::from_label)
            .unwrap_or_default(),
        rating: rating(object.get("rating")),
        tags: tags(object.get("tags"), query),
        ingredients: ingredients.iter().map(ingredient).collect(),
        instructions,
    })
}

fn truthy_str<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn normalize_instructions(raw: &[Value]) -> Result<Vec<Instruction>, ParseError> {
    let Some(first) = raw.first() else {
        return Ok(Vec::new());
    };

    match first {
        Value::String(_) => Ok(raw
            .iter()
            .map(|step| match step {
                Value::String(text) => Instruction::new(text.clone()),
                other => Instruction::new(instruction_text(other)),
            })
            .collect()),
        Value::Object(map) if map.contains_key("text") => Ok(raw
            .iter()
            .map(|step| Instruction {
                text: instruction_text(step),
                estimated_time: step.get("estimatedTime").and_then(estimated_seconds),
            })
            .collect()),
        _ => Err(ParseError::InstructionFormat),
    }
}

fn instruction_text(step: &Value) -> String {
    step.get("text")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(MISSING_INSTRUCTION)
        .to_string()
}

fn estimated_seconds(value: &Value) -> Option<u32> {
    let seconds = value.as_f64()?;
    if seconds.is_finite() && seconds >= 0.0 {
        Some(seconds.round() as u32)
    } else {
        None
    }
}

fn display_time(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn servings(value: Option<&Value>) -> u32 {
    number(value)
        .filter(|n| n.is_finite() && *n >= 1.0)
        .map(|n| n.round() as u32)
        .unwrap_or(DEFAULT_SERVINGS)
}

fn rating(value: Option<&Value>) -> f32 {
    number(value)
        .filter(|n| n.is_finite() && *n > 0.0)
        .map(|n| n.min(5.0) as f32)
        .unwrap_or(DEFAULT_RATING)
}

fn tags(value: Option<&Value>, query: &str) -> Vec<String> {
    match value.and_then(Value::as_array) {
        Some(tags) => tags
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        None => {
            let mut tags = vec![AI_TAG.to_string()];
            if let Some(word) = query.split_whitespace().next() {
                tags.push(word.to_string());
            }
            tags
        }
    }
}

fn ingredient(value: &Value) -> Ingredient {
    Ingredient {
        quantity: quantity(value.get("quantity")),
        unit: value
            .get("unit")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        name: value
            .get("name")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(UNKNOWN_INGREDIENT)
            .to_string(),
    }
}

/// Numbers, numeric strings, fractions ("1/2") and mixed numbers ("1 1/2").
/// Anything else counts as zero.
fn quantity(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_quantity_str(s),
        _ => None,
    };
    parsed
        .filter(|q| q.is_finite() && *q >= 0.0)
        .unwrap_or(0.0)
}

fn parse_quantity_str(s: &str) -> Option<f64> {
    let s = s.trim();
    if let Ok(n) = s.parse::<f64>() {
        return Some(n);
    }
    let mut total = 0.0;
    for part in s.split_whitespace() {
        total += match part.split_once('/') {
            Some((num, den)) => {
                let num: f64 = num.parse().ok()?;
                let den: f64 = den.parse().ok()?;
                if den == 0.0 {
                    return None;
                }
                num / den
            }
            None => part.parse::<f64>().ok()?,
        };
    }
    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "title": "Paneer Tikka",
        "description": "Charred paneer skewers.",
        "image": "https://example.com/tikka.jpg",
        "prepTime": "20 min",
        "cookTime": "15 min",
        "totalTime": "35 min",
        "servings": 3,
        "difficulty": "Hard",
        "rating": 4.5,
        "tags": ["Indian", "Grill"],
        "ingredients": [{"quantity": 250, "unit": "g", "name": "paneer"}],
        "instructions": [{"text": "Marinate", "estimatedTime": 600}, {"text": "Grill"}]
    }"#;

    #[test]
    fn test_plain_json_needs_no_defaults() {
        let draft = parse_recipe_text(FULL, "paneer").unwrap();
        assert_eq!(draft.title, "Paneer Tikka");
        assert_eq!(draft.image, "https://example.com/tikka.jpg");
        assert_eq!(draft.prep_time, "20 min");
        assert_eq!(draft.servings, 3);
        assert_eq!(draft.difficulty, Difficulty::Hard);
        assert_eq!(draft.rating, 4.5);
        assert_eq!(draft.tags, vec!["Indian", "Grill"]);
        assert_eq!(draft.ingredients[0].quantity, 250.0);
        assert_eq!(draft.instructions[0].estimated_time, Some(600));
        assert_eq!(draft.instructions[1], Instruction::new("Grill"));
    }

    #[test]
    fn test_fenced_block_with_surrounding_prose() {
        let text = "Here is your recipe: ```json\n{\"title\":\"T\",\"description\":\"D\",\"ingredients\":[{\"name\":\"Salt\"}],\"instructions\":[\"Step one\"]}\n``` Enjoy!";
        let draft = parse_recipe_text(text, "salty snack").unwrap();
        assert_eq!(draft.title, "T");
        assert_eq!(draft.instructions, vec![Instruction::new("Step one")]);
        assert_eq!(draft.servings, 2);
        assert_eq!(draft.difficulty, Difficulty::Medium);
        assert_eq!(draft.rating, 4.0);
        assert_eq!(draft.image, "");
        assert_eq!(draft.total_time, "N/A");
        assert_eq!(draft.tags, vec!["AI Generated", "salty"]);
        assert_eq!(draft.ingredients[0].quantity, 0.0);
        assert_eq!(draft.ingredients[0].unit, "");
    }

    #[test]
    fn test_no_braces_is_rejected() {
        let err = parse_recipe_text("I cannot help with that.", "x").unwrap_err();
        assert_eq!(err, ParseError::NoJsonFound);
        assert_eq!(err.to_string(), "no JSON object found in response");
    }

    #[test]
    fn test_missing_essential_fields() {
        let err = parse_recipe_text(r#"{"title":"T"}"#, "x").unwrap_err();
        assert_eq!(err, ParseError::MissingEssentialFields);
        assert!(err.to_string().contains("essential recipe fields"));
    }

    #[test]
    fn test_blank_title_is_not_truthy() {
        let text = r#"{"title":"","description":"D","ingredients":[],"instructions":[]}"#;
        assert_eq!(
            parse_recipe_text(text, "x").unwrap_err(),
            ParseError::MissingEssentialFields
        );
    }

    #[test]
    fn test_malformed_json_carries_parser_message() {
        let err = parse_recipe_text("{\"title\": \"T\",, }", "x").unwrap_err();
        match err {
            ParseError::MalformedJson(msg) => assert!(!msg.is_empty()),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_sequences_pass_validation() {
        let text = r#"{"title":"T","description":"D","ingredients":[],"instructions":[]}"#;
        let draft = parse_recipe_text(text, "x").unwrap();
        assert!(draft.ingredients.is_empty());
        assert!(draft.instructions.is_empty());
    }

    #[test]
    fn test_first_ingredient_needs_name() {
        let text = r#"{"title":"T","description":"D","ingredients":[{"quantity":1}],"instructions":["a"]}"#;
        assert_eq!(
            parse_recipe_text(text, "x").unwrap_err(),
            ParseError::IngredientFormat
        );

        let strings = r#"{"title":"T","description":"D","ingredients":["2 eggs"],"instructions":["a"]}"#;
        assert_eq!(
            parse_recipe_text(strings, "x").unwrap_err(),
            ParseError::IngredientFormat
        );
    }

    #[test]
    fn test_later_ingredients_get_defaults() {
        let text = r#"{"title":"T","description":"D",
            "ingredients":[{"name":"Flour","quantity":"1 1/2","unit":"cups"},{"unit":"g"},{"name":"Milk","quantity":"a splash"}],
            "instructions":["a"]}"#;
        let draft = parse_recipe_text(text, "x").unwrap();
        assert_eq!(draft.ingredients[0].quantity, 1.5);
        assert_eq!(draft.ingredients[1].name, "Unknown Ingredient");
        assert_eq!(draft.ingredients[1].unit, "g");
        assert_eq!(draft.ingredients[2].quantity, 0.0);
    }

    #[test]
    fn test_first_instruction_object_needs_text() {
        let text = r#"{"title":"T","description":"D","ingredients":[],"instructions":[{"step":"a"}]}"#;
        assert_eq!(
            parse_recipe_text(text, "x").unwrap_err(),
            ParseError::InstructionFormat
        );
    }

    #[test]
    fn test_instruction_of_unexpected_type() {
        let text = r#"{"title":"T","description":"D","ingredients":[],"instructions":[42]}"#;
        assert_eq!(
            parse_recipe_text(text, "x").unwrap_err(),
            ParseError::InstructionFormat
        );
    }

    #[test]
    fn test_non_numeric_estimated_time_is_dropped() {
        let text = r#"{"title":"T","description":"D","ingredients":[],
            "instructions":[{"text":"a","estimatedTime":"5 min"},{"text":"b","estimatedTime":90.4},{"estimatedTime":-3}]}"#;
        let draft = parse_recipe_text(text, "x").unwrap();
        assert_eq!(draft.instructions[0].estimated_time, None);
        assert_eq!(draft.instructions[1].estimated_time, Some(90));
        assert_eq!(draft.instructions[2].text, "Missing instruction text");
        assert_eq!(draft.instructions[2].estimated_time, None);
    }

    #[test]
    fn test_numeric_strings_and_unknown_difficulty() {
        let text = r#"{"title":"T","description":"D","ingredients":[],"instructions":["a"],
            "servings":"6","rating":9,"difficulty":"Legendary","prepTime":15}"#;
        let draft = parse_recipe_text(text, "x").unwrap();
        assert_eq!(draft.servings, 6);
        assert_eq!(draft.rating, 5.0);
        assert_eq!(draft.difficulty, Difficulty::Medium);
        assert_eq!(draft.prep_time, "15");
    }

    #[test]
    fn test_custom_strategy_list() {
        let text = "```json\n{\"title\":\"T\"}\n``` {\"title\":\"T\",\"description\":\"D\",\"ingredients\":[],\"instructions\":[]}";
        // Brace scan alone spans both objects and fails to parse.
        let only_braces: &[&dyn ExtractionStrategy] = &[&BraceSpan];
        assert!(matches!(
            parse_recipe_text_with(text, "x", only_braces),
            Err(ParseError::MalformedJson(_))
        ));
        let only_fence: &[&dyn ExtractionStrategy] = &[&FencedJsonBlock];
        assert_eq!(
            parse_recipe_text_with(text, "x", only_fence).unwrap_err(),
            ParseError::MissingEssentialFields
        );
    }
}

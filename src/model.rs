use serde::{Deserialize, Serialize};
use std::fmt;

pub type RecipeId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Case-insensitive lookup; `None` for anything that is not a known level.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}

/// Where a recipe came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecipeType {
    Seed,
    #[serde(rename = "AI Generated")]
    AiGenerated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub quantity: f64,
    pub unit: String,
    pub name: String,
}

impl Ingredient {
    /// Quantity, unit and name as shown in an ingredient list. Zero
    /// quantities are left out.
    pub fn display_line(&self) -> String {
        let mut parts = Vec::new();
        if self.quantity > 0.0 {
            parts.push(format_quantity(self.quantity));
        }
        if !self.unit.is_empty() {
            parts.push(self.unit.clone());
        }
        parts.push(self.name.clone());
        parts.join(" ")
    }
}

fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{}", quantity as u64)
    } else {
        let rounded = format!("{:.2}", quantity);
        rounded.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u32>,
}

impl Instruction {
    pub fn new(text: impl Into<String>) -> Self {
        Instruction {
            text: text.into(),
            estimated_time: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: String,
    pub prep_time: String,
    pub cook_time: String,
    pub total_time: String,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub rating: f32,
    pub tags: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<Instruction>,
    pub recipe_type: RecipeType,
}

impl Recipe {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn is_ai_generated(&self) -> bool {
        self.recipe_type == RecipeType::AiGenerated
    }

    /// Whether the recipe can be walked through step by step
    pub fn is_cookable(&self) -> bool {
        !self.instructions.is_empty()
    }
}

/// A parsed recipe that has not been given an id yet
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    pub image: String,
    pub prep_time: String,
    pub cook_time: String,
    pub total_time: String,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub rating: f32,
    pub tags: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<Instruction>,
}

impl RecipeDraft {
    /// Stamp the draft with its catalog id and the AI provenance tag.
    pub fn into_recipe(self, id: RecipeId) -> Recipe {
        Recipe {
            id,
            title: self.title,
            description: self.description,
            image: self.image,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            total_time: self.total_time,
            servings: self.servings,
            difficulty: self.difficulty,
            rating: self.rating,
            tags: self.tags,
            ingredients: self.ingredients,
            instructions: self.instructions,
            recipe_type: RecipeType::AiGenerated,
        }
    }
}

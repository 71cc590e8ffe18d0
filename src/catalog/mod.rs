mod view;

pub use self::view::{Selection, ViewState};

use crate::error::RasoiError;
use crate::model::{Recipe, RecipeDraft, RecipeId};
use log::info;

/// Recipes bundled with the binary. Loaded once at catalog construction.
const SEED_RECIPES: &str = include_str!("seed_recipes.json");

/// In-memory collection of seed and AI-generated recipes.
#[derive(Debug, Clone)]
pub struct Catalog {
    recipes: Vec<Recipe>,
    next_id: RecipeId,
}

impl Catalog {
    /// Build a catalog from an initial set of recipes. The id counter starts
    /// right after the seed recipes.
    pub fn new(recipes: Vec<Recipe>) -> Self {
        let seed_count = recipes.len() as RecipeId;
        let highest = recipes.iter().map(|r| r.id).max().unwrap_or(0);
        Catalog {
            next_id: seed_count.max(highest) + 1,
            recipes,
        }
    }

    /// Catalog holding the bundled seed recipes
    pub fn with_seed_recipes() -> Result<Self, RasoiError> {
        let recipes: Vec<Recipe> = serde_json::from_str(SEED_RECIPES)?;
        Ok(Catalog::new(recipes))
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// The recipe highlighted at the top of the browse view, if it exists.
    pub fn featured(&self, id: RecipeId) -> Option<&Recipe> {
        self.get(id)
    }

    /// Id the next generated recipe will receive
    pub fn next_id(&self) -> RecipeId {
        self.next_id
    }

    /// Assign the next id to a draft and append it. Consumes exactly one id.
    pub fn add_generated(&mut self, draft: RecipeDraft) -> RecipeId {
        let id = self.next_id;
        self.next_id += 1;
        let recipe = draft.into_recipe(id);
        info!("Added AI generated recipe {} ({})", id, recipe.title);
        self.recipes.push(recipe);
        id
    }

    /// Recipes matching the view's search term and tag filter
    pub fn filtered(&self, view: &ViewState) -> Vec<&Recipe> {
        filter(&self.recipes, view.search_term(), view.tag_filter())
    }

    pub fn tags(&self) -> Vec<String> {
        collect_tags(&self.recipes)
    }
}

/// Stable filter by case-insensitive search term over title and description,
/// and by exact tag. Empty criteria match everything.
pub fn filter<'a>(recipes: &'a [Recipe], search_term: &str, tag: &str) -> Vec<&'a Recipe> {
    let needle = search_term.to_lowercase();
    recipes
        .iter()
        .filter(|recipe| {
            let matches_search = needle.is_empty()
                || recipe.title.to_lowercase().contains(&needle)
                || recipe.description.to_lowercase().contains(&needle);
            let matches_tag = tag.is_empty() || recipe.has_tag(tag);
            matches_search && matches_tag
        })
        .collect()
}

/// Every tag used by any recipe, deduplicated and sorted.
pub fn collect_tags(recipes: &[Recipe]) -> Vec<String> {
    let mut tags: Vec<String> = recipes
        .iter()
        .flat_map(|recipe| recipe.tags.iter().cloned())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

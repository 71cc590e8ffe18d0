use crate::model::RecipeId;

/// Which screen the catalog is showing. Detail and cooking are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Browsing,
    Detail(RecipeId),
    Cooking(RecipeId),
}

/// Filters and navigation state for the catalog. Derived, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    search_term: String,
    tag_filter: String,
    selection: Selection,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn tag_filter(&self) -> &str {
        &self.tag_filter
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Set the active tag; an empty string clears the filter.
    pub fn set_tag_filter(&mut self, tag: impl Into<String>) {
        self.tag_filter = tag.into();
    }

    pub fn selected_recipe(&self) -> Option<RecipeId> {
        match self.selection {
            Selection::Detail(id) => Some(id),
            _ => None,
        }
    }

    pub fn cooking_recipe(&self) -> Option<RecipeId> {
        match self.selection {
            Selection::Cooking(id) => Some(id),
            _ => None,
        }
    }

    /// Show a recipe's detail view, leaving cooking mode if active.
    pub fn select(&mut self, id: RecipeId) {
        self.selection = Selection::Detail(id);
    }

    /// Back to browsing from the detail view.
    pub fn deselect(&mut self) {
        if let Selection::Detail(_) = self.selection {
            self.selection = Selection::Browsing;
        }
    }

    pub fn enter_cooking(&mut self, id: RecipeId) {
        self.selection = Selection::Cooking(id);
    }

    /// Leave cooking mode for the detail view of the same recipe.
    pub fn exit_cooking(&mut self) {
        if let Selection::Cooking(id) = self.selection {
            self.selection = Selection::Detail(id);
        }
    }

    /// Title of the recipe grid
    pub fn heading(&self) -> String {
        if self.tag_filter.is_empty() {
            "All Recipes".to_string()
        } else {
            format!("{} Recipes", self.tag_filter)
        }
    }

    /// Shown when no recipe matches the current filters
    pub fn empty_message(&self) -> String {
        let mut message = "No recipes found".to_string();
        if !self.tag_filter.is_empty() {
            message.push_str(&format!(" for \"{}\"", self.tag_filter));
        }
        if !self.search_term.is_empty() {
            message.push_str(&format!(" matching \"{}\"", self.search_term));
        }
        message.push_str(". Try adjusting your filters!");
        message
    }
}

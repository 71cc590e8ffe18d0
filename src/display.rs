//! Plain-text rendering of catalog, detail and cooking views.

use crate::catalog::ViewState;
use crate::cooking::{CookingSession, StepPace, StepStatus};
use crate::model::Recipe;
use std::fmt;

/// Seconds as `m:ss`.
pub fn format_time(total_seconds: u32) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Rating as five stars, rounding half up.
pub fn star_rating(rating: f32) -> String {
    let full = (rating.clamp(0.0, 5.0) + 0.5).floor() as usize;
    format!("{}{}", "★".repeat(full), "☆".repeat(5 - full))
}

/// One line per recipe for list views
pub fn recipe_line(recipe: &Recipe) -> String {
    let mut line = format!(
        "[{}] {} ({}, {}, {})",
        recipe.id,
        recipe.title,
        recipe.total_time,
        recipe.difficulty,
        star_rating(recipe.rating)
    );
    if recipe.is_ai_generated() {
        line.push_str(" [AI]");
    }
    line
}

/// Heading plus the filtered recipes, or the empty-state message.
pub fn recipe_list(view: &ViewState, recipes: &[&Recipe]) -> String {
    let mut out = format!("{} ({})\n", view.heading(), recipes.len());
    if recipes.is_empty() {
        out.push_str(&view.empty_message());
        out.push('\n');
    }
    for recipe in recipes {
        out.push_str(&recipe_line(recipe));
        out.push('\n');
    }
    out
}

pub fn featured(recipe: &Recipe) -> String {
    format!(
        "Featured Recipe: {}\n{}\n{} | Serves {}\n",
        recipe.title, recipe.description, recipe.total_time, recipe.servings
    )
}

/// Full recipe page: metadata, ingredients and numbered steps.
pub struct RecipeDetail<'a>(pub &'a Recipe);

impl fmt::Display for RecipeDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let recipe = self.0;
        writeln!(f, "{}", recipe.title)?;
        if recipe.is_ai_generated() {
            writeln!(f, "(AI Generated)")?;
        }
        writeln!(f, "{}", recipe.description)?;
        writeln!(f)?;
        writeln!(
            f,
            "Prep: {}  Cook: {}  Total: {}  Serves: {}",
            recipe.prep_time, recipe.cook_time, recipe.total_time, recipe.servings
        )?;
        writeln!(
            f,
            "Difficulty: {}  Rating: {} ({:.1})",
            recipe.difficulty,
            star_rating(recipe.rating),
            recipe.rating
        )?;
        if !recipe.tags.is_empty() {
            writeln!(f, "Tags: {}", recipe.tags.join(", "))?;
        }

        writeln!(f, "\nIngredients")?;
        for ingredient in &recipe.ingredients {
            writeln!(f, "  - {}", ingredient.display_line())?;
        }

        writeln!(f, "\nInstructions")?;
        for (i, step) in recipe.instructions.iter().enumerate() {
            write!(f, "  {}. {}", i + 1, step.text)?;
            if let Some(seconds) = step.estimated_time {
                write!(f, " (~{})", format_time(seconds))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

pub fn recipe_detail(recipe: &Recipe) -> String {
    RecipeDetail(recipe).to_string()
}

fn pace_label(pace: StepPace) -> &'static str {
    match pace {
        StepPace::OnTrack => "on track",
        StepPace::Approaching => "almost there",
        StepPace::Exceeded => "over time",
    }
}

/// The cooking-mode screen for a session's current state
pub struct CookingView<'a>(pub &'a CookingSession);

impl fmt::Display for CookingView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.0;
        let timer = session.timer();
        writeln!(f, "Cooking: {}", session.title())?;
        writeln!(
            f,
            "{}  |  {}% Complete",
            timer.step_label(),
            timer.progress_percent()
        )?;

        let Some(step) = session.current_step() else {
            if session.is_celebrating() {
                writeln!(f, "\n*** All steps done! ***")?;
            }
            return writeln!(
                f,
                "\nBon appétit! We hope you enjoyed making {}.",
                session.title()
            );
        };

        writeln!(f, "\n{}\n", step.text)?;
        if let Some(estimate) = step.estimated_time {
            writeln!(f, "Estimated: {}", format_time(estimate))?;
        }
        let state = match session.status() {
            StepStatus::Timing => "running",
            StepStatus::Paused => "paused",
            StepStatus::Idle => "not started",
        };
        write!(f, "Timer: {} ({})", format_time(session.elapsed()), state)?;
        if let Some((percent, pace)) = session.step_progress() {
            write!(f, "  {}% of estimate, {}", percent, pace_label(pace))?;
        }
        writeln!(f)
    }
}

pub fn cooking_view(session: &CookingSession) -> String {
    CookingView(session).to_string()
}

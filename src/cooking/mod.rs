//! Cooking mode: a step-by-step walk through a recipe's instructions with a
//! stopwatch per step.

mod ticker;
mod timer;

pub use self::ticker::Ticker;
pub use self::timer::{step_progress_percent, StepChange, StepPace, StepStatus, StepTimer};

use crate::config::CookingConfig;
use crate::error::RasoiError;
use crate::model::{Instruction, Recipe, RecipeId};
use log::{debug, info};
use std::time::Duration;
use tokio::time::Instant;

/// One cooking-mode activation.
///
/// The session owns the ticker: it runs exactly while the step timer is
/// timing and is dropped with the session.
pub struct CookingSession {
    recipe_id: RecipeId,
    title: String,
    steps: Vec<Instruction>,
    timer: StepTimer,
    ticker: Option<Ticker>,
    tick_interval: Duration,
    celebration: Duration,
    celebrating_since: Option<Instant>,
}

impl CookingSession {
    pub fn new(recipe: &Recipe, config: &CookingConfig) -> Result<Self, RasoiError> {
        if !recipe.is_cookable() {
            return Err(RasoiError::NothingToCook(recipe.id));
        }
        info!("Cooking session started for recipe {}", recipe.id);
        Ok(CookingSession {
            recipe_id: recipe.id,
            title: recipe.title.clone(),
            steps: recipe.instructions.clone(),
            timer: StepTimer::new(recipe.instructions.len()),
            ticker: None,
            tick_interval: config.tick_interval(),
            celebration: config.celebration(),
            celebrating_since: None,
        })
    }

    pub fn recipe_id(&self) -> RecipeId {
        self.recipe_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn timer(&self) -> &StepTimer {
        &self.timer
    }

    pub fn status(&self) -> StepStatus {
        self.timer.status()
    }

    pub fn elapsed(&self) -> u32 {
        self.timer.elapsed()
    }

    pub fn is_complete(&self) -> bool {
        self.timer.is_complete()
    }

    /// Whether a background ticker is currently running
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// The instruction being worked on; `None` once complete.
    pub fn current_step(&self) -> Option<&Instruction> {
        self.steps.get(self.timer.index())
    }

    /// Elapsed time against the current step's estimate, when it has one.
    pub fn step_progress(&self) -> Option<(u32, StepPace)> {
        let estimate = self.current_step()?.estimated_time.filter(|e| *e > 0)?;
        let elapsed = self.timer.elapsed();
        Some((
            step_progress_percent(elapsed, estimate),
            StepPace::classify(elapsed, estimate),
        ))
    }

    /// True for a short while after the last step is completed.
    pub fn is_celebrating(&self) -> bool {
        self.celebrating_since
            .is_some_and(|since| since.elapsed() < self.celebration)
    }

    /// Start or resume the current step's timer. Needs a tokio runtime.
    pub fn start(&mut self) {
        self.timer.start();
        self.sync_ticker();
    }

    pub fn pause(&mut self) {
        self.timer.pause();
        self.sync_ticker();
    }

    /// Start/pause control. Needs a tokio runtime.
    pub fn toggle(&mut self) {
        self.timer.toggle();
        self.sync_ticker();
    }

    pub fn complete_step(&mut self) -> StepChange {
        let change = self.timer.complete_step();
        self.after_step_change(change);
        change
    }

    pub fn previous_step(&mut self) -> StepChange {
        let change = self.timer.previous_step();
        self.after_step_change(change);
        change
    }

    fn after_step_change(&mut self, change: StepChange) {
        match change {
            StepChange::Finished => {
                info!("Finished cooking recipe {}", self.recipe_id);
                self.celebrating_since = Some(Instant::now());
            }
            // Celebration belongs to the complete state only
            StepChange::Moved(_) => self.celebrating_since = None,
            StepChange::Ignored => {}
        }
        self.sync_ticker();
    }

    /// Wait for the next timer tick and apply it, returning the new elapsed
    /// seconds. Never resolves while the timer is not running.
    pub async fn next_tick(&mut self) -> u32 {
        match self.ticker.as_mut() {
            Some(ticker) => {
                if ticker.tick().await.is_some() {
                    self.timer.tick();
                }
                self.timer.elapsed()
            }
            None => std::future::pending().await,
        }
    }

    fn sync_ticker(&mut self) {
        match (self.timer.is_timing(), self.ticker.is_some()) {
            (true, false) => {
                debug!("Starting step ticker");
                self.ticker = Some(Ticker::start(self.tick_interval));
            }
            (false, true) => {
                debug!("Stopping step ticker");
                self.ticker = None;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::recipe;

    fn three_step_recipe() -> Recipe {
        let mut r = recipe(7, "Dal", "Lentils", &["Indian"]);
        r.instructions = vec![
            Instruction {
                text: "Rinse".to_string(),
                estimated_time: Some(10),
            },
            Instruction::new("Boil"),
            Instruction::new("Temper"),
        ];
        r
    }

    fn session() -> CookingSession {
        CookingSession::new(&three_step_recipe(), &CookingConfig::default()).unwrap()
    }

    #[test]
    fn test_recipe_without_instructions_cannot_be_cooked() {
        let mut r = three_step_recipe();
        r.instructions.clear();
        let result = CookingSession::new(&r, &CookingConfig::default());
        assert!(matches!(result, Err(RasoiError::NothingToCook(7))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_pause_and_resume() {
        let mut session = session();
        session.start();
        for _ in 0..5 {
            session.next_tick().await;
        }
        session.pause();
        assert!(!session.is_ticking());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(session.elapsed(), 5);

        session.start();
        session.next_tick().await;
        let elapsed = session.next_tick().await;
        assert_eq!(elapsed, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_runs_only_while_timing() {
        let mut session = session();
        assert!(!session.is_ticking());
        session.toggle();
        assert!(session.is_ticking());
        session.toggle();
        assert!(!session.is_ticking());
        session.toggle();
        session.complete_step();
        assert!(!session.is_ticking());
        assert_eq!(session.status(), StepStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_step_progress_against_estimate() {
        let mut session = session();
        assert_eq!(session.step_progress(), Some((0, StepPace::OnTrack)));
        session.start();
        for _ in 0..8 {
            session.next_tick().await;
        }
        assert_eq!(session.step_progress(), Some((80, StepPace::Approaching)));
        for _ in 0..4 {
            session.next_tick().await;
        }
        assert_eq!(session.step_progress(), Some((100, StepPace::Exceeded)));
        assert_eq!(session.current_step().unwrap().text, "Rinse");

        session.complete_step();
        assert_eq!(session.step_progress(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_celebration_clears_after_duration() {
        let mut session = session();
        session.complete_step();
        session.complete_step();
        assert!(!session.is_celebrating());
        assert_eq!(session.complete_step(), StepChange::Finished);
        assert!(session.is_celebrating());
        assert!(session.current_step().is_none());

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert!(!session.is_celebrating());
        assert_eq!(session.complete_step(), StepChange::Ignored);
    }

    #[tokio::test(start_paused = true)]
    async fn test_going_back_from_complete_ends_celebration() {
        let mut session = session();
        for _ in 0..3 {
            session.complete_step();
        }
        assert!(session.is_celebrating());

        assert_eq!(session.previous_step(), StepChange::Moved(2));
        assert!(!session.is_celebrating());
        assert_eq!(session.current_step().unwrap().text, "Temper");

        assert_eq!(session.complete_step(), StepChange::Finished);
        assert!(session.is_celebrating());
    }
}

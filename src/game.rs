//! Game driver: the router state plus the level being played.
//!
//! UI events come in here, get forwarded to the active [`LevelRunner`], and a
//! finished level is turned into `Action::LevelComplete` for the router.

use crate::app::{Action, AppState, Screen, SideTool};
use crate::config::GameConfig;
use crate::content::{self, Level};
use crate::error::QuizError;
use crate::level::{LevelOutcome, LevelRunner};
use crate::question::PairOutcome;

/// Wall-clock source for attempt timestamps (`Date.now()` in the browser).
pub type WallClock = fn() -> f64;

#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    state: AppState,
    runner: Option<LevelRunner>,
    wall_clock: WallClock,
}

impl Game {
    pub fn new(config: GameConfig, wall_clock: WallClock) -> Self {
        Self::with_levels(content::levels(), config, wall_clock)
    }

    pub fn with_levels(
        levels: &'static [&'static Level],
        config: GameConfig,
        wall_clock: WallClock,
    ) -> Self {
        Self {
            state: AppState::new(levels, config.dev_mode),
            config,
            runner: None,
            wall_clock,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn screen(&self) -> Screen {
        self.state.screen()
    }

    pub fn runner(&self) -> Option<&LevelRunner> {
        self.runner.as_ref()
    }

    fn dispatch(&mut self, action: Action) {
        let blank = AppState::new(self.state.levels(), self.state.dev_mode());
        let state = std::mem::replace(&mut self.state, blank);
        self.state = state.reduce(action);
    }

    fn runner_mut(&mut self) -> Result<&mut LevelRunner, QuizError> {
        self.runner.as_mut().ok_or(QuizError::NotPlaying)
    }

    /// Returns false when the router refused the level: unknown, completed, or
    /// requested off the menu. A refused start leaves the current runner alone.
    pub fn start_level(&mut self, level_id: u32) -> bool {
        if !self.state.can_start(level_id) {
            log::debug!("level {level_id} cannot start on {}", self.screen().name());
            return false;
        }
        self.dispatch(Action::StartLevel(level_id));
        let Some(level) = self.state.active_level() else {
            return false;
        };
        match LevelRunner::start(level, &self.config) {
            Ok(runner) => {
                self.runner = Some(runner);
                true
            }
            Err(e) => {
                log::warn!("cannot play level {level_id}: {e}");
                self.dispatch(Action::Back);
                false
            }
        }
    }

    pub fn choose(&mut self, option_id: &str, now_ms: f64) -> Result<(), QuizError> {
        self.runner_mut()?.choose(option_id, now_ms)
    }

    pub fn select_left(&mut self, id: &str) -> Result<PairOutcome, QuizError> {
        self.runner_mut()?.select_left(id)
    }

    pub fn select_right(&mut self, id: &str, now_ms: f64) -> Result<PairOutcome, QuizError> {
        self.runner_mut()?.select_right(id, now_ms)
    }

    pub fn submit_match(&mut self, now_ms: f64) -> Result<(), QuizError> {
        self.runner_mut()?.submit_match(now_ms)
    }

    pub fn confirm_next(&mut self) -> Result<(), QuizError> {
        if let Some(outcome) = self.runner_mut()?.confirm_next()? {
            self.complete(outcome);
        }
        Ok(())
    }

    /// Drive timers. Safe to call on every animation frame, on any screen.
    pub fn tick(&mut self, now_ms: f64) {
        let outcome = self.runner.as_mut().and_then(|r| r.tick(now_ms));
        if let Some(outcome) = outcome {
            self.complete(outcome);
        }
    }

    fn complete(&mut self, outcome: LevelOutcome) {
        self.runner = None;
        let timestamp_ms = (self.wall_clock)();
        self.dispatch(Action::LevelComplete {
            outcome,
            timestamp_ms,
        });
    }

    /// Leaving the level drops its runner, and with it any pending timer.
    pub fn back(&mut self) {
        self.runner = None;
        self.dispatch(Action::Back);
    }

    pub fn open_side_tool(&mut self, tool: SideTool) {
        self.dispatch(Action::OpenSideTool(tool));
    }

    pub fn restart(&mut self) {
        self.runner = None;
        self.dispatch(Action::Restart);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> f64 {
        1_700_000_000_000.0
    }

    #[test]
    fn refused_level_leaves_no_runner() {
        let mut game = Game::new(GameConfig::default(), clock);
        assert!(!game.start_level(77));
        assert!(game.runner().is_none());
        assert_eq!(game.choose("a", 0.0), Err(QuizError::NotPlaying));
    }

    #[test]
    fn second_start_keeps_the_level_in_progress() {
        let mut game = Game::new(GameConfig::default(), clock);
        assert!(game.start_level(1));
        game.choose("a", 0.0).unwrap();
        game.tick(1_200.0);
        game.confirm_next().unwrap();

        assert!(!game.start_level(2));
        assert!(!game.start_level(1));
        let runner = game.runner().unwrap();
        assert_eq!(runner.level().id, 1);
        assert_eq!(runner.index(), 1);
        assert_eq!(runner.results().len(), 1);
        assert_eq!(game.screen(), Screen::Playing);
    }

    #[test]
    fn back_cancels_the_level() {
        let mut game = Game::new(GameConfig::default(), clock);
        assert!(game.start_level(1));
        game.choose("a", 0.0).unwrap();
        game.back();
        game.tick(5_000.0);
        assert_eq!(game.screen(), Screen::Menu);
        assert!(game.state().progress().attempts().is_empty());
    }

    #[test]
    fn finished_level_is_logged_with_wall_clock() {
        let mut game = Game::new(GameConfig::default(), clock);
        assert!(game.start_level(1));
        let mut now = 0.0;
        while game.screen() == Screen::Playing {
            let answer = game.runner().unwrap().current_question().answer;
            let crate::content::Expected::Single(id) = answer else {
                unreachable!("level 1 has no matching question")
            };
            game.choose(id, now).unwrap();
            now += 1_200.0;
            game.tick(now);
            game.confirm_next().unwrap();
        }
        assert_eq!(game.screen(), Screen::Menu);
        let attempts = game.state().progress().attempts();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].stars, 3);
        assert_eq!(attempts[0].timestamp_ms, clock());
    }
}

//! Application router: screen selection as a pure reducer over [`AppState`].

use crate::content::Level;
use crate::level::LevelOutcome;
use crate::progress::{LevelAttempt, ProgressStore};

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    Reward,
    ImageEditor,
    DeveloperDashboard,
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Menu => "menu",
            Screen::Playing => "playing",
            Screen::Reward => "reward",
            Screen::ImageEditor => "image_editor",
            Screen::DeveloperDashboard => "developer_dashboard",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SideTool {
    ImageEditor,
    DeveloperDashboard,
}

impl SideTool {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "image_editor" => Some(SideTool::ImageEditor),
            "developer_dashboard" => Some(SideTool::DeveloperDashboard),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    StartLevel(u32),
    LevelComplete {
        outcome: LevelOutcome,
        timestamp_ms: f64,
    },
    Back,
    OpenSideTool(SideTool),
    Restart,
}

#[derive(Clone, Debug)]
pub struct AppState {
    screen: Screen,
    active_level: Option<&'static Level>,
    progress: ProgressStore,
    levels: &'static [&'static Level],
    dev_mode: bool,
}

impl AppState {
    pub fn new(levels: &'static [&'static Level], dev_mode: bool) -> Self {
        Self {
            screen: Screen::Menu,
            active_level: None,
            progress: ProgressStore::new(),
            levels,
            dev_mode,
        }
    }

    /// Current screen. `Playing` without an active level falls back to the menu.
    pub fn screen(&self) -> Screen {
        match (self.screen, self.active_level) {
            (Screen::Playing, None) => {
                log::warn!("playing screen without an active level, showing menu");
                Screen::Menu
            }
            (screen, _) => screen,
        }
    }

    pub fn active_level(&self) -> Option<&'static Level> {
        self.active_level
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn levels(&self) -> &'static [&'static Level] {
        self.levels
    }

    pub fn dev_mode(&self) -> bool {
        self.dev_mode
    }

    pub fn all_completed(&self) -> bool {
        !self.levels.is_empty() && self.levels.iter().all(|l| self.progress.is_completed(l.id))
    }

    pub fn total_stars(&self) -> u32 {
        self.progress.total_stars()
    }

    /// A level can be started from the menu if it exists and is not yet completed.
    pub fn can_start(&self, level_id: u32) -> bool {
        self.screen() == Screen::Menu
            && self.levels.iter().any(|l| l.id == level_id)
            && !self.progress.is_completed(level_id)
    }

    #[must_use]
    pub fn reduce(mut self, action: Action) -> Self {
        match action {
            Action::StartLevel(id) => {
                if !self.can_start(id) {
                    log::debug!("ignoring start of level {id} on {}", self.screen().name());
                    return self;
                }
                self.active_level = self.levels.iter().copied().find(|l| l.id == id);
                self.screen = Screen::Playing;
            }
            Action::LevelComplete {
                outcome,
                timestamp_ms,
            } => {
                if self.screen() != Screen::Playing {
                    log::warn!("level {} completed off the playing screen", outcome.level_id);
                    return self;
                }
                self.progress.record(LevelAttempt {
                    level_id: outcome.level_id,
                    timestamp_ms,
                    stars: outcome.stars,
                    questions: outcome.results,
                });
                self.active_level = None;
                // judged after this level's own progress is recorded
                self.screen = if self.all_completed() {
                    log::info!("all levels completed, {} stars", self.total_stars());
                    Screen::Reward
                } else {
                    Screen::Menu
                };
            }
            Action::Back => {
                self.active_level = None;
                self.screen = Screen::Menu;
            }
            Action::OpenSideTool(tool) => {
                if self.screen() != Screen::Menu {
                    return self;
                }
                self.screen = match tool {
                    SideTool::ImageEditor => Screen::ImageEditor,
                    SideTool::DeveloperDashboard if self.dev_mode => Screen::DeveloperDashboard,
                    SideTool::DeveloperDashboard => {
                        log::debug!("developer dashboard needs dev mode");
                        Screen::Menu
                    }
                };
            }
            Action::Restart => {
                self.progress.clear();
                self.active_level = None;
                self.screen = Screen::Menu;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::levels;

    fn complete(state: AppState, level_id: u32, stars: u8) -> AppState {
        state.reduce(Action::StartLevel(level_id)).reduce(Action::LevelComplete {
            outcome: LevelOutcome {
                level_id,
                stars,
                results: Vec::new(),
            },
            timestamp_ms: 0.0,
        })
    }

    #[test]
    fn unknown_level_stays_on_menu() {
        let state = AppState::new(levels(), false).reduce(Action::StartLevel(999));
        assert_eq!(state.screen(), Screen::Menu);
        assert!(state.active_level().is_none());
    }

    #[test]
    fn start_enters_playing() {
        let state = AppState::new(levels(), false).reduce(Action::StartLevel(1));
        assert_eq!(state.screen(), Screen::Playing);
        assert_eq!(state.active_level().map(|l| l.id), Some(1));
    }

    #[test]
    fn completion_returns_to_menu_until_all_done() {
        let state = complete(AppState::new(levels(), false), 1, 3);
        assert_eq!(state.screen(), Screen::Menu);
        let state = complete(state, 2, 2);
        assert_eq!(state.screen(), Screen::Menu);
        let state = complete(state, 3, 1);
        assert_eq!(state.screen(), Screen::Reward);
        assert_eq!(state.total_stars(), 6);
        assert_eq!(state.progress().attempts().len(), 3);
    }

    #[test]
    fn completed_level_cannot_be_replayed() {
        let state = complete(AppState::new(levels(), false), 1, 3);
        let state = state.reduce(Action::StartLevel(1));
        assert_eq!(state.screen(), Screen::Menu);
    }

    #[test]
    fn back_from_anywhere_goes_to_menu() {
        let state = AppState::new(levels(), false)
            .reduce(Action::StartLevel(2))
            .reduce(Action::Back);
        assert_eq!(state.screen(), Screen::Menu);
        assert!(state.active_level().is_none());
        let state = state
            .reduce(Action::OpenSideTool(SideTool::ImageEditor))
            .reduce(Action::Back);
        assert_eq!(state.screen(), Screen::Menu);
    }

    #[test]
    fn dashboard_requires_dev_mode() {
        let plain = AppState::new(levels(), false)
            .reduce(Action::OpenSideTool(SideTool::DeveloperDashboard));
        assert_eq!(plain.screen(), Screen::Menu);
        let dev = AppState::new(levels(), true)
            .reduce(Action::OpenSideTool(SideTool::DeveloperDashboard));
        assert_eq!(dev.screen(), Screen::DeveloperDashboard);
    }

    #[test]
    fn restart_clears_progress() {
        let mut state = AppState::new(levels(), false);
        for id in [1, 2, 3] {
            state = complete(state, id, 2);
        }
        assert_eq!(state.screen(), Screen::Reward);
        let state = state.reduce(Action::Restart);
        assert_eq!(state.screen(), Screen::Menu);
        assert_eq!(state.progress().completed_count(), 0);
        assert!(state.progress().attempts().is_empty());
        assert!(state.can_start(1));
    }

    #[test]
    fn stray_completion_is_ignored() {
        let state = AppState::new(levels(), false).reduce(Action::LevelComplete {
            outcome: LevelOutcome {
                level_id: 1,
                stars: 3,
                results: Vec::new(),
            },
            timestamp_ms: 0.0,
        });
        assert_eq!(state.screen(), Screen::Menu);
        assert_eq!(state.progress().attempts().len(), 0);
    }
}

//! Hanzi Quest core crate.
//!
//! A level-based quiz game for young learners of Chinese: each level groups
//! sound (音), shape (形) and meaning (义) questions. The quiz logic is plain
//! Rust and runs natively under `cargo test`; [`web`] exposes it to the JS
//! front end through `wasm-bindgen`.
//!
//! Data flows one way during play: [`content`] → [`question`] → [`level`] →
//! [`app`] / [`progress`]. [`game`] ties the pieces together for the front end.

use wasm_bindgen::prelude::*;

pub mod app;
pub mod config;
pub mod content;
pub mod dashboard;
pub mod error;
pub mod game;
pub mod image_edit;
pub mod level;
pub mod progress;
pub mod question;
pub mod speech;
pub mod timer;
pub mod web;

pub use app::{Action, AppState, Screen, SideTool};
pub use config::GameConfig;
pub use error::QuizError;
pub use game::Game;
pub use level::{LevelOutcome, LevelRunner, QuestionResult, star_rating};
pub use progress::{LevelAttempt, LevelProgress, ProgressStore};
pub use question::{Answer, QuestionSession, Submission};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

//! `wasm-bindgen` surface for the JS front end.
//!
//! Game state lives in a thread-local, driven by a `requestAnimationFrame`
//! loop for timers and by the exported functions below for clicks. The front
//! end re-renders from `state_json()` after each call.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::app::SideTool;
use crate::config::{self, GameConfig};
use crate::game::Game;
use crate::image_edit::{ImageData, ImageEditSession};
use crate::question::PairOutcome;
use crate::speech;

struct WebState {
    game: Game,
    editor: ImageEditSession,
}

thread_local! {
    static WEB_STATE: RefCell<Option<WebState>> = const { RefCell::new(None) };
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn with_state<R>(f: impl FnOnce(&mut WebState) -> Result<R, JsValue>) -> Result<R, JsValue> {
    WEB_STATE.with(|cell| match cell.borrow_mut().as_mut() {
        Some(state) => f(state),
        None => Err(JsValue::from_str("game not started; call start_game() first")),
    })
}

fn outcome_name(outcome: PairOutcome) -> &'static str {
    match outcome {
        PairOutcome::Selected(_) => "selected",
        PairOutcome::Deselected => "deselected",
        PairOutcome::Locked { .. } => "locked",
        PairOutcome::Mismatch { .. } => "mismatch",
        PairOutcome::Ignored => "ignored",
    }
}

/// Dev flag read through the browser's `URLSearchParams`, so percent-encoded
/// queries decode the same way the page sees them.
pub fn dev_mode_from_search(search: &str) -> bool {
    match web_sys::UrlSearchParams::new_with_str(search) {
        Ok(params) => config::dev_mode_from_value(params.get("dev").as_deref()),
        Err(_) => config::dev_mode_from_query(search),
    }
}

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let search = win.location().search().unwrap_or_default();
    let config = GameConfig {
        dev_mode: dev_mode_from_search(&search),
        ..GameConfig::default()
    };
    log::info!("starting game (dev mode: {})", config.dev_mode);

    let already_running = WEB_STATE.with(|cell| {
        cell.replace(Some(WebState {
            game: Game::new(config, js_sys::Date::now),
            editor: ImageEditSession::new(),
        }))
        .is_some()
    });
    if !already_running {
        start_frame_loop();
    }
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        WEB_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                state.game.tick(ts);
            }
        });
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

#[wasm_bindgen]
pub fn current_screen() -> Result<String, JsValue> {
    with_state(|s| Ok(s.game.screen().name().to_string()))
}

#[wasm_bindgen]
pub fn start_level(level_id: u32) -> Result<bool, JsValue> {
    with_state(|s| Ok(s.game.start_level(level_id)))
}

#[wasm_bindgen]
pub fn choose_option(option_id: &str) -> Result<(), JsValue> {
    with_state(|s| Ok(s.game.choose(option_id, now_ms())?))
}

#[wasm_bindgen]
pub fn select_left(id: &str) -> Result<String, JsValue> {
    with_state(|s| Ok(outcome_name(s.game.select_left(id)?).to_string()))
}

#[wasm_bindgen]
pub fn select_right(id: &str) -> Result<String, JsValue> {
    with_state(|s| Ok(outcome_name(s.game.select_right(id, now_ms())?).to_string()))
}

#[wasm_bindgen]
pub fn submit_match() -> Result<(), JsValue> {
    with_state(|s| Ok(s.game.submit_match(now_ms())?))
}

#[wasm_bindgen]
pub fn next_question() -> Result<(), JsValue> {
    with_state(|s| Ok(s.game.confirm_next()?))
}

#[wasm_bindgen]
pub fn back_to_menu() -> Result<(), JsValue> {
    with_state(|s| {
        s.game.back();
        Ok(())
    })
}

#[wasm_bindgen]
pub fn restart() -> Result<(), JsValue> {
    with_state(|s| {
        s.game.restart();
        Ok(())
    })
}

/// `"image_editor"` or `"developer_dashboard"`. Returns the resulting screen.
#[wasm_bindgen]
pub fn open_side_tool(name: &str) -> Result<String, JsValue> {
    let tool = SideTool::from_name(name)
        .ok_or_else(|| JsValue::from_str(&format!("unknown side tool '{name}'")))?;
    with_state(|s| {
        s.game.open_side_tool(tool);
        Ok(s.game.screen().name().to_string())
    })
}

/// Play the current question's audio cue, or its target word when it has none.
#[wasm_bindgen]
pub fn speak_prompt() -> Result<(), JsValue> {
    with_state(|s| {
        let runner = s
            .game
            .runner()
            .ok_or_else(|| JsValue::from_str("no level is being played"))?;
        let question = runner.current_question();
        let text = question.kind.audio_cue().unwrap_or(question.target_word);
        Ok(speech::speak(text, &s.game.config().speech)?)
    })
}

#[wasm_bindgen]
pub fn speak_text(text: &str) -> Result<(), JsValue> {
    with_state(|s| Ok(speech::speak(text, &s.game.config().speech)?))
}

/// Returns the trimmed prompt the host should send to the generation API.
#[wasm_bindgen]
pub fn begin_image_edit(bytes: Vec<u8>, mime_type: String, prompt: &str) -> Result<String, JsValue> {
    with_state(|s| {
        let image = (!bytes.is_empty()).then(|| ImageData { mime_type, bytes });
        s.editor
            .begin(image, prompt)
            .map(|request| request.prompt)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    })
}

#[wasm_bindgen]
pub fn finish_image_edit(bytes: Vec<u8>, mime_type: String) -> Result<(), JsValue> {
    with_state(|s| {
        s.editor.finish(Ok(ImageData { mime_type, bytes }));
        Ok(())
    })
}

#[wasm_bindgen]
pub fn fail_image_edit(message: String) -> Result<(), JsValue> {
    with_state(|s| {
        s.editor.finish(Err(message));
        Ok(())
    })
}

#[wasm_bindgen]
pub fn image_edit_busy() -> Result<bool, JsValue> {
    with_state(|s| Ok(s.editor.is_busy()))
}

#[wasm_bindgen]
pub fn image_edit_output() -> Result<Option<String>, JsValue> {
    with_state(|s| Ok(s.editor.output().map(|o| o.data_url())))
}

#[wasm_bindgen]
pub fn image_edit_error() -> Result<Option<String>, JsValue> {
    with_state(|s| Ok(s.editor.error_message()))
}

#[cfg(feature = "serde_json")]
mod snapshot {
    use serde::Serialize;

    use crate::app::AppState;
    use crate::content::{Palette, Question};
    use crate::dashboard::{self, AttemptSummary};
    use crate::level::{LevelRunner, Stage};

    #[derive(Serialize)]
    struct LevelCard {
        id: u32,
        title: &'static str,
        focus: &'static str,
        palette: Palette,
        completed: bool,
        stars: u8,
    }

    #[derive(Serialize)]
    struct PlayView {
        level_id: u32,
        index: usize,
        total: usize,
        progress: f64,
        is_last: bool,
        question: &'static Question,
        stage: &'static str,
        feedback: Option<bool>,
        revealed_answer: Option<String>,
        selected_left: Option<&'static str>,
        matched: Vec<(&'static str, &'static str)>,
        wrong_right: Option<&'static str>,
        all_paired: bool,
    }

    #[derive(Serialize)]
    pub(super) struct Snapshot {
        screen: &'static str,
        dev_mode: bool,
        total_stars: u32,
        levels: Vec<LevelCard>,
        playing: Option<PlayView>,
    }

    fn play_view(runner: &LevelRunner) -> PlayView {
        let session = runner.session();
        let (stage, feedback) = match runner.stage() {
            Stage::Answering => ("answering", None),
            Stage::Feedback { correct } => ("feedback", Some(correct)),
            Stage::Revealing => ("revealing", None),
            Stage::Finished => ("finished", None),
        };
        PlayView {
            level_id: runner.level().id,
            index: runner.index(),
            total: runner.level().questions.len(),
            progress: runner.progress(),
            is_last: runner.is_last_question(),
            question: runner.current_question(),
            stage,
            feedback,
            revealed_answer: runner.revealed_answer(),
            selected_left: session.selected_left(),
            matched: session.matched_pairs().collect(),
            wrong_right: session.wrong_right(),
            all_paired: session.all_paired(),
        }
    }

    pub(super) fn snapshot(state: &AppState, runner: Option<&LevelRunner>) -> Snapshot {
        let progress = state.progress();
        Snapshot {
            screen: state.screen().name(),
            dev_mode: state.dev_mode(),
            total_stars: state.total_stars(),
            levels: state
                .levels()
                .iter()
                .map(|l| LevelCard {
                    id: l.id,
                    title: l.title,
                    focus: l.focus.glyph(),
                    palette: l.palette,
                    completed: progress.is_completed(l.id),
                    stars: progress.stars_for(l.id),
                })
                .collect(),
            playing: runner.map(play_view),
        }
    }

    pub(super) fn dashboard(state: &AppState) -> Vec<AttemptSummary> {
        dashboard::summaries(state.progress(), state.levels())
    }
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn state_json() -> Result<String, JsValue> {
    with_state(|s| {
        let snap = snapshot::snapshot(s.game.state(), s.game.runner());
        serde_json::to_string(&snap).map_err(|e| JsValue::from_str(&e.to_string()))
    })
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn dashboard_json() -> Result<String, JsValue> {
    with_state(|s| {
        if !s.game.state().dev_mode() {
            return Err(JsValue::from_str("developer dashboard needs ?dev=true"));
        }
        serde_json::to_string(&snapshot::dashboard(s.game.state()))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    })
}

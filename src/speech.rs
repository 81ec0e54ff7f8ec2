//! Read text aloud with the browser's speech synthesis.

use web_sys::{SpeechSynthesisUtterance, window};

use crate::config::SpeechConfig;
use crate::error::QuizError;

pub fn speak(text: &str, config: &SpeechConfig) -> Result<(), QuizError> {
    let synth = window()
        .and_then(|w| w.speech_synthesis().ok())
        .ok_or(QuizError::SpeechUnavailable)?;
    let utterance =
        SpeechSynthesisUtterance::new_with_text(text).map_err(|_| QuizError::SpeechUnavailable)?;
    utterance.set_lang(config.lang);
    utterance.set_rate(config.rate);
    synth.speak(&utterance);
    Ok(())
}

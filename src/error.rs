//! Error types shared by the quiz core and the wasm surface.

use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("question {question} has no option '{option}'")]
    UnknownOption { question: String, option: String },

    #[error("question {0} was already answered")]
    AlreadySubmitted(String),

    #[error("question {question} does not accept {interaction}")]
    WrongInteraction {
        question: String,
        interaction: &'static str,
    },

    #[error("question {0} still has unpaired items")]
    IncompleteMatch(String),

    #[error("question {question} is malformed: {reason}")]
    InvalidQuestion { question: String, reason: String },

    #[error("level {level} is malformed: {reason}")]
    InvalidLevel { level: u32, reason: String },

    #[error("no level is being played")]
    NotPlaying,

    #[error("level is not waiting for {0}")]
    UnexpectedStage(&'static str),

    /// User-facing notice shown when the browser has no speech synthesis.
    #[error("抱歉，您的浏览器不支持语音功能。")]
    SpeechUnavailable,
}

impl From<QuizError> for JsValue {
    fn from(err: QuizError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

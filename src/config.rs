//! Runtime tuning for the game: feedback timings, speech settings and dev mode.

/// Delay between an answer and the end of its correct/incorrect overlay.
pub const FEEDBACK_MS: f64 = 1200.0;
/// How long a wrong matching pair flashes before it resets.
pub const MISMATCH_FLASH_MS: f64 = 820.0;

#[derive(Clone, Debug, PartialEq)]
pub struct SpeechConfig {
    pub lang: &'static str,
    pub rate: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            lang: "zh-CN",
            rate: 0.8,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub feedback_ms: f64,
    pub mismatch_flash_ms: f64,
    pub speech: SpeechConfig,
    /// Unlocks the developer dashboard (`?dev=true`).
    pub dev_mode: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            feedback_ms: FEEDBACK_MS,
            mismatch_flash_ms: MISMATCH_FLASH_MS,
            speech: SpeechConfig::default(),
            dev_mode: false,
        }
    }
}

impl GameConfig {
    /// Defaults, with dev mode taken from a `location.search` string.
    pub fn from_query(search: &str) -> Self {
        Self {
            dev_mode: dev_mode_from_query(search),
            ..Self::default()
        }
    }
}

/// Only the exact value `true` turns dev mode on.
pub fn dev_mode_from_value(value: Option<&str>) -> bool {
    value == Some("true")
}

/// True when the query string carries `dev=true`. Accepts a leading `?`.
/// Keys and values are compared as written, without percent-decoding; the
/// browser build decodes through `URLSearchParams` first.
pub fn dev_mode_from_query(search: &str) -> bool {
    let value = search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "dev")
        .map(|(_, value)| value);
    dev_mode_from_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_flag_is_parsed_from_search() {
        assert!(dev_mode_from_query("?dev=true"));
        assert!(dev_mode_from_query("lang=zh&dev=true"));
        assert!(!dev_mode_from_query("?dev=false"));
        assert!(!dev_mode_from_query("?developer=true"));
        assert!(!dev_mode_from_query(""));
    }

    #[test]
    fn only_exact_true_enables_dev_mode() {
        assert!(dev_mode_from_value(Some("true")));
        assert!(!dev_mode_from_value(Some("True")));
        assert!(!dev_mode_from_value(Some("")));
        assert!(!dev_mode_from_value(None));
        assert!(dev_mode_from_query("?dev=true&dev=false"));
    }

    #[test]
    fn from_query_keeps_default_timings() {
        let cfg = GameConfig::from_query("?dev=true");
        assert!(cfg.dev_mode);
        assert_eq!(cfg.feedback_ms, FEEDBACK_MS);
        assert_eq!(cfg.speech.lang, "zh-CN");
    }
}

//! Static quiz content: the word list, question and level descriptors.
//!
//! Everything here is immutable and `'static`. Level files live next to this
//! module (`level1.rs` .. `level3.rs`) and are collected by [`levels()`].
//! Each question variant carries its own auxiliary data so that the shape of
//! a question is checked by `match` rather than by optional fields.

use crate::error::QuizError;

mod level1;
mod level2;
mod level3;

pub use level1::LEVEL1;
pub use level2::LEVEL2;
pub use level3::LEVEL3;

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Word {
    pub character: &'static str,
    pub pinyin: &'static str,
    pub meaning: &'static str,
}

/// Every word the built-in levels ask about.
pub static WORDS: &[Word] = &[
    Word { character: "猫", pinyin: "māo", meaning: "cat" },
    Word { character: "山", pinyin: "shān", meaning: "mountain" },
    Word { character: "水", pinyin: "shuǐ", meaning: "water" },
    Word { character: "月", pinyin: "yuè", meaning: "moon" },
    Word { character: "火", pinyin: "huǒ", meaning: "fire" },
    Word { character: "河", pinyin: "hé", meaning: "river" },
    Word { character: "人", pinyin: "rén", meaning: "person" },
    Word { character: "明", pinyin: "míng", meaning: "bright" },
    Word { character: "鱼", pinyin: "yú", meaning: "fish" },
    Word { character: "木", pinyin: "mù", meaning: "wood" },
    Word { character: "米饭", pinyin: "mǐfàn", meaning: "rice" },
    Word { character: "喝水", pinyin: "hē shuǐ", meaning: "to drink water" },
    Word { character: "太阳", pinyin: "tàiyáng", meaning: "sun" },
    Word { character: "朋友", pinyin: "péngyou", meaning: "friend" },
];

pub fn lookup_word(character: &str) -> Option<&'static Word> {
    WORDS.iter().find(|w| w.character == character)
}

/// One clickable answer. Named `Choice` to stay clear of `std::option::Option`.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Choice {
    pub id: &'static str,
    pub text: &'static str,
    pub image: Option<&'static str>,
    pub pinyin: Option<&'static str>,
}

impl Choice {
    pub const fn new(id: &'static str, text: &'static str) -> Self {
        Self { id, text, image: None, pinyin: None }
    }

    pub const fn pictured(id: &'static str, text: &'static str, image: &'static str) -> Self {
        Self { id, text, image: Some(image), pinyin: None }
    }

    pub const fn voiced(id: &'static str, text: &'static str, pinyin: &'static str) -> Self {
        Self { id, text, image: None, pinyin: Some(pinyin) }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionKind {
    ListenChooseWord { audio_pinyin: &'static str },
    MatchPinyinChar,
    ListenChooseChar { audio_pinyin: &'static str },
    MatchRadical { radical: &'static str },
    StrokeCount,
    FillInBlankChar { sentence_parts: [&'static str; 2] },
    /// Click-to-match: `Question::options` are the left column, these the right.
    MatchMeaning { right_items: &'static [Choice] },
    ChooseImage,
    FillSentence { sentence_parts: [&'static str; 2] },
    ChooseCorrectPinyin,
    ChooseCorrectSentence,
}

impl QuestionKind {
    pub fn name(&self) -> &'static str {
        match self {
            QuestionKind::ListenChooseWord { .. } => "listen_choose_word",
            QuestionKind::MatchPinyinChar => "match_pinyin_char",
            QuestionKind::ListenChooseChar { .. } => "listen_choose_char",
            QuestionKind::MatchRadical { .. } => "match_radical",
            QuestionKind::StrokeCount => "stroke_count",
            QuestionKind::FillInBlankChar { .. } => "fill_in_blank_char",
            QuestionKind::MatchMeaning { .. } => "match_meaning",
            QuestionKind::ChooseImage => "choose_image",
            QuestionKind::FillSentence { .. } => "fill_sentence",
            QuestionKind::ChooseCorrectPinyin => "choose_correct_pinyin",
            QuestionKind::ChooseCorrectSentence => "choose_correct_sentence",
        }
    }

    pub fn is_matching(&self) -> bool {
        matches!(self, QuestionKind::MatchMeaning { .. })
    }

    /// Text handed to speech synthesis by the "play sound" button.
    pub fn audio_cue(&self) -> Option<&'static str> {
        match self {
            QuestionKind::ListenChooseWord { audio_pinyin }
            | QuestionKind::ListenChooseChar { audio_pinyin } => Some(audio_pinyin),
            _ => None,
        }
    }

    pub fn sentence_parts(&self) -> Option<[&'static str; 2]> {
        match self {
            QuestionKind::FillInBlankChar { sentence_parts }
            | QuestionKind::FillSentence { sentence_parts } => Some(*sentence_parts),
            _ => None,
        }
    }
}

/// Expected answer. Matching questions list `"leftId-rightId"` pairs.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expected {
    Single(&'static str),
    Pairs(&'static [&'static str]),
}

/// True when `pair` is written as `a-b`.
pub(crate) fn is_pair(pair: &str, a: &str, b: &str) -> bool {
    pair.strip_prefix(a).and_then(|rest| rest.strip_prefix('-')) == Some(b)
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Question {
    pub id: &'static str,
    pub kind: QuestionKind,
    pub prompt: &'static str,
    pub target_word: &'static str,
    pub options: &'static [Choice],
    pub answer: Expected,
}

impl Question {
    pub fn option(&self, id: &str) -> Option<&'static Choice> {
        self.options.iter().find(|o| o.id == id)
    }

    /// Right-hand column of a matching question; empty for every other kind.
    pub fn right_items(&self) -> &'static [Choice] {
        match self.kind {
            QuestionKind::MatchMeaning { right_items } => right_items,
            _ => &[],
        }
    }

    /// Order-insensitive check of a left/right click against the expected pairs.
    pub fn accepts_pair(&self, left: &str, right: &str) -> bool {
        match self.answer {
            Expected::Pairs(pairs) => pairs
                .iter()
                .any(|p| is_pair(p, left, right) || is_pair(p, right, left)),
            Expected::Single(_) => false,
        }
    }

    /// Canonical answer as shown on the reveal panel.
    pub fn answer_text(&self) -> String {
        match self.answer {
            Expected::Single(id) => self
                .option(id)
                .map(|o| o.text.to_string())
                .unwrap_or_else(|| id.to_string()),
            Expected::Pairs(pairs) => pairs.join(", "),
        }
    }

    pub fn validate(&self) -> Result<(), QuizError> {
        let invalid = |reason: String| QuizError::InvalidQuestion {
            question: self.id.to_string(),
            reason,
        };
        if self.options.is_empty() {
            return Err(invalid("no options".into()));
        }
        match (self.kind, self.answer) {
            (QuestionKind::MatchMeaning { right_items }, Expected::Pairs(pairs)) => {
                if right_items.is_empty() {
                    return Err(invalid("matching question has no right items".into()));
                }
                if pairs.len() != right_items.len() {
                    return Err(invalid(format!(
                        "{} pairs for {} right items",
                        pairs.len(),
                        right_items.len()
                    )));
                }
                for right in right_items {
                    let covering = pairs
                        .iter()
                        .filter(|p| {
                            self.options.iter().any(|left| {
                                is_pair(p, left.id, right.id) || is_pair(p, right.id, left.id)
                            })
                        })
                        .count();
                    if covering != 1 {
                        return Err(invalid(format!(
                            "right item {} is covered by {covering} pairs",
                            right.id
                        )));
                    }
                }
                Ok(())
            }
            (QuestionKind::MatchMeaning { .. }, Expected::Single(_)) => {
                Err(invalid("matching question expects pairs".into()))
            }
            (_, Expected::Pairs(_)) => Err(invalid("single-answer question lists pairs".into())),
            (_, Expected::Single(id)) => match self.option(id) {
                Some(_) => Ok(()),
                None => Err(invalid(format!("answer '{id}' is not an option"))),
            },
        }
    }
}

/// Thematic focus of a level: 音 (sound), 形 (shape) or 义 (meaning).
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Sound,
    Shape,
    Meaning,
}

impl Focus {
    pub fn glyph(&self) -> &'static str {
        match self {
            Focus::Sound => "音",
            Focus::Shape => "形",
            Focus::Meaning => "义",
        }
    }
}

/// Styling tags handed through to the front end untouched.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub color: &'static str,
    pub bg_color: &'static str,
    pub border_color: &'static str,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Level {
    pub id: u32,
    pub title: &'static str,
    pub focus: Focus,
    pub palette: Palette,
    pub questions: &'static [Question],
}

impl Level {
    pub fn question(&self, index: usize) -> Option<&'static Question> {
        self.questions.get(index)
    }

    pub fn validate(&self) -> Result<(), QuizError> {
        if self.questions.is_empty() {
            return Err(QuizError::InvalidLevel {
                level: self.id,
                reason: "no questions".into(),
            });
        }
        for (i, q) in self.questions.iter().enumerate() {
            if self.questions[..i].iter().any(|other| other.id == q.id) {
                return Err(QuizError::InvalidLevel {
                    level: self.id,
                    reason: format!("duplicate question id {}", q.id),
                });
            }
            q.validate()?;
        }
        Ok(())
    }
}

/// Built-in levels in menu order.
pub fn levels() -> &'static [&'static Level] {
    static LEVELS: [&Level; 3] = [&LEVEL1, &LEVEL2, &LEVEL3];
    &LEVELS
}

pub fn find_level(id: u32) -> Option<&'static Level> {
    levels().iter().copied().find(|l| l.id == id)
}

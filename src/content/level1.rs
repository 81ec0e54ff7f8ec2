// Level 1: 音 (sound). Listening and pinyin questions.
use super::{Choice, Expected, Focus, Level, Palette, Question, QuestionKind};

pub static LEVEL1: Level = Level {
    id: 1,
    title: "听音识字",
    focus: Focus::Sound,
    palette: Palette {
        color: "bg-sky-500",
        bg_color: "bg-sky-100",
        border_color: "border-sky-400",
    },
    questions: &[
        Question {
            id: "l1q1",
            kind: QuestionKind::ListenChooseWord { audio_pinyin: "māo" },
            prompt: "听一听，选出你听到的字",
            target_word: "猫",
            options: &[
                Choice::voiced("a", "猫", "māo"),
                Choice::voiced("b", "鱼", "yú"),
                Choice::voiced("c", "木", "mù"),
            ],
            answer: Expected::Single("a"),
        },
        Question {
            id: "l1q2",
            kind: QuestionKind::MatchPinyinChar,
            prompt: "“shān” 是哪个字？",
            target_word: "山",
            options: &[
                Choice::new("a", "水"),
                Choice::new("b", "山"),
                Choice::new("c", "火"),
            ],
            answer: Expected::Single("b"),
        },
        Question {
            id: "l1q3",
            kind: QuestionKind::ListenChooseChar { audio_pinyin: "shuǐ" },
            prompt: "听一听，哪个字读 shuǐ？",
            target_word: "水",
            options: &[
                Choice::new("a", "火"),
                Choice::new("b", "木"),
                Choice::new("c", "水"),
            ],
            answer: Expected::Single("c"),
        },
        Question {
            id: "l1q4",
            kind: QuestionKind::ChooseCorrectPinyin,
            prompt: "选出正确的拼音",
            target_word: "月",
            options: &[
                Choice::new("a", "yuē"),
                Choice::new("b", "yuè"),
                Choice::new("c", "yǔ"),
            ],
            answer: Expected::Single("b"),
        },
        Question {
            id: "l1q5",
            kind: QuestionKind::ListenChooseWord { audio_pinyin: "huǒ" },
            prompt: "听一听，选出你听到的字",
            target_word: "火",
            options: &[
                Choice::voiced("a", "山", "shān"),
                Choice::voiced("b", "火", "huǒ"),
                Choice::voiced("c", "人", "rén"),
            ],
            answer: Expected::Single("b"),
        },
    ],
};

// Level 2: 形 (shape). Radicals, strokes and character composition.
use super::{Choice, Expected, Focus, Level, Palette, Question, QuestionKind};

pub static LEVEL2: Level = Level {
    id: 2,
    title: "看形认字",
    focus: Focus::Shape,
    palette: Palette {
        color: "bg-amber-500",
        bg_color: "bg-amber-100",
        border_color: "border-amber-400",
    },
    questions: &[
        Question {
            id: "l2q1",
            kind: QuestionKind::MatchRadical { radical: "氵" },
            prompt: "哪个字有三点水？",
            target_word: "河",
            options: &[
                Choice::new("a", "林"),
                Choice::new("b", "河"),
                Choice::new("c", "明"),
            ],
            answer: Expected::Single("b"),
        },
        Question {
            id: "l2q2",
            kind: QuestionKind::StrokeCount,
            prompt: "“人”一共有几画？",
            target_word: "人",
            options: &[
                Choice::new("a", "1"),
                Choice::new("b", "2"),
                Choice::new("c", "3"),
            ],
            answer: Expected::Single("b"),
        },
        Question {
            id: "l2q3",
            kind: QuestionKind::FillInBlankChar { sentence_parts: ["日 + 月 = ", "？"] },
            prompt: "两个字合起来是什么字？",
            target_word: "明",
            options: &[
                Choice::new("a", "朋"),
                Choice::new("b", "明"),
                Choice::new("c", "胆"),
            ],
            answer: Expected::Single("b"),
        },
        Question {
            id: "l2q4",
            kind: QuestionKind::ChooseImage,
            prompt: "哪一个是“鱼”？",
            target_word: "鱼",
            options: &[
                Choice::pictured("a", "猫", "🐱"),
                Choice::pictured("b", "鱼", "🐟"),
                Choice::pictured("c", "月", "🌙"),
            ],
            answer: Expected::Single("b"),
        },
        Question {
            id: "l2q5",
            kind: QuestionKind::MatchPinyinChar,
            prompt: "“mù” 是哪个字？",
            target_word: "木",
            options: &[
                Choice::new("a", "本"),
                Choice::new("b", "术"),
                Choice::new("c", "木"),
            ],
            answer: Expected::Single("c"),
        },
    ],
};

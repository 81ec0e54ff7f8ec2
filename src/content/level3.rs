// Level 3: 义 (meaning). Sentences, pictures and the click-to-match board.
use super::{Choice, Expected, Focus, Level, Palette, Question, QuestionKind};

pub static LEVEL3: Level = Level {
    id: 3,
    title: "明白字义",
    focus: Focus::Meaning,
    palette: Palette {
        color: "bg-emerald-500",
        bg_color: "bg-emerald-100",
        border_color: "border-emerald-400",
    },
    questions: &[
        Question {
            id: "l3q1",
            kind: QuestionKind::FillSentence { sentence_parts: ["我爱吃", "。"] },
            prompt: "选一个词填进句子里",
            target_word: "米饭",
            options: &[
                Choice::new("a", "米饭"),
                Choice::new("b", "朋友"),
                Choice::new("c", "太阳"),
            ],
            answer: Expected::Single("a"),
        },
        Question {
            id: "l3q2",
            kind: QuestionKind::ChooseCorrectSentence,
            prompt: "哪一句话是对的？",
            target_word: "喝水",
            options: &[
                Choice::new("a", "水喝我。"),
                Choice::new("b", "我喝饭。"),
                Choice::new("c", "我喝水。"),
            ],
            answer: Expected::Single("c"),
        },
        Question {
            id: "l3q3",
            kind: QuestionKind::ChooseImage,
            prompt: "哪一个是“太阳”？",
            target_word: "太阳",
            options: &[
                Choice::pictured("a", "月亮", "🌙"),
                Choice::pictured("b", "太阳", "☀️"),
                Choice::pictured("c", "星星", "⭐"),
            ],
            answer: Expected::Single("b"),
        },
        Question {
            id: "l3q4",
            kind: QuestionKind::MatchMeaning {
                right_items: &[
                    Choice::new("water_r", "water"),
                    Choice::new("cat_r", "cat"),
                    Choice::new("mountain_r", "mountain"),
                ],
            },
            prompt: "连一连：汉字和意思",
            target_word: "猫",
            options: &[
                Choice::voiced("cat_l", "猫", "māo"),
                Choice::voiced("mountain_l", "山", "shān"),
                Choice::voiced("water_l", "水", "shuǐ"),
            ],
            answer: Expected::Pairs(&["cat_l-cat_r", "mountain_l-mountain_r", "water_l-water_r"]),
        },
        Question {
            id: "l3q5",
            kind: QuestionKind::ChooseCorrectPinyin,
            prompt: "选出正确的拼音",
            target_word: "朋友",
            options: &[
                Choice::new("a", "pēngyǒu"),
                Choice::new("b", "péngyou"),
                Choice::new("c", "péngyòu"),
            ],
            answer: Expected::Single("b"),
        },
    ],
};

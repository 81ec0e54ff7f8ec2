//! Per-question state machine.
//!
//! A [`QuestionSession`] collects the learner's clicks for one question and
//! produces a single [`Submission`]. Single-answer kinds submit on the first
//! click; the matching kind locks pairs one by one and submits explicitly.
//! What happens after submission (feedback, reveal, advancing) belongs to the
//! level runner.

use crate::content::{Expected, Question};
use crate::error::QuizError;

/// What the learner handed in. Owned so results outlive the question session.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Answer {
    Choice(String),
    Pairs(Vec<String>),
}

impl From<Expected> for Answer {
    fn from(expected: Expected) -> Self {
        match expected {
            Expected::Single(id) => Answer::Choice(id.to_string()),
            Expected::Pairs(pairs) => Answer::Pairs(pairs.iter().map(|p| p.to_string()).collect()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub is_correct: bool,
    pub answer: Answer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    AwaitingSelection,
    AwaitingPairing,
    Submitted,
}

/// Result of one click on the matching board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairOutcome {
    Selected(&'static str),
    Deselected,
    Locked {
        left: &'static str,
        right: &'static str,
    },
    /// Wrong pair; the right item flashes until `clear_mismatch`.
    Mismatch { right: &'static str },
    Ignored,
}

#[derive(Debug)]
pub struct QuestionSession {
    question: &'static Question,
    phase: Phase,
    selected_left: Option<&'static str>,
    // (right, left) in the order pairs were locked
    matched: Vec<(&'static str, &'static str)>,
    wrong_right: Option<&'static str>,
    mismatches: u32,
}

impl QuestionSession {
    pub fn new(question: &'static Question) -> Self {
        let phase = if question.kind.is_matching() {
            Phase::AwaitingPairing
        } else {
            Phase::AwaitingSelection
        };
        Self {
            question,
            phase,
            selected_left: None,
            matched: Vec::new(),
            wrong_right: None,
            mismatches: 0,
        }
    }

    pub fn question(&self) -> &'static Question {
        self.question
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected_left(&self) -> Option<&'static str> {
        self.selected_left
    }

    /// Right item currently flashing as a wrong pair.
    pub fn wrong_right(&self) -> Option<&'static str> {
        self.wrong_right
    }

    /// Wrong pairs tried so far. Does not affect correctness.
    pub fn mismatches(&self) -> u32 {
        self.mismatches
    }

    pub fn is_left_matched(&self, id: &str) -> bool {
        self.matched.iter().any(|(_, l)| *l == id)
    }

    pub fn is_right_matched(&self, id: &str) -> bool {
        self.matched.iter().any(|(r, _)| *r == id)
    }

    /// Locked `(left, right)` pairs, oldest first.
    pub fn matched_pairs(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.matched.iter().map(|&(right, left)| (left, right))
    }

    pub fn all_paired(&self) -> bool {
        let rights = self.question.right_items();
        !rights.is_empty() && rights.iter().all(|r| self.is_right_matched(r.id))
    }

    fn ensure_open(&self) -> Result<(), QuizError> {
        match self.phase {
            Phase::Submitted => Err(QuizError::AlreadySubmitted(self.question.id.to_string())),
            _ => Ok(()),
        }
    }

    fn ensure_phase(&self, wanted: Phase, interaction: &'static str) -> Result<(), QuizError> {
        self.ensure_open()?;
        if self.phase != wanted {
            return Err(QuizError::WrongInteraction {
                question: self.question.id.to_string(),
                interaction,
            });
        }
        Ok(())
    }

    /// Single-answer kinds: one click submits.
    pub fn choose(&mut self, option_id: &str) -> Result<Submission, QuizError> {
        self.ensure_phase(Phase::AwaitingSelection, "a single choice")?;
        let option = self
            .question
            .option(option_id)
            .ok_or_else(|| QuizError::UnknownOption {
                question: self.question.id.to_string(),
                option: option_id.to_string(),
            })?;
        let is_correct = matches!(self.question.answer, Expected::Single(id) if id == option.id);
        self.phase = Phase::Submitted;
        log::debug!(
            "question {} answered with {} (correct: {is_correct})",
            self.question.id,
            option.id
        );
        Ok(Submission {
            is_correct,
            answer: Answer::Choice(option.id.to_string()),
        })
    }

    /// Toggle the left-column selection. Already matched items are ignored.
    pub fn select_left(&mut self, id: &str) -> Result<PairOutcome, QuizError> {
        self.ensure_phase(Phase::AwaitingPairing, "matching")?;
        let left = self.lookup(self.question.options, id)?;
        if self.is_left_matched(left) {
            return Ok(PairOutcome::Ignored);
        }
        if self.selected_left == Some(left) {
            self.selected_left = None;
            return Ok(PairOutcome::Deselected);
        }
        self.selected_left = Some(left);
        Ok(PairOutcome::Selected(left))
    }

    /// Pair the selected left item with `id`. The selection always clears.
    pub fn select_right(&mut self, id: &str) -> Result<PairOutcome, QuizError> {
        self.ensure_phase(Phase::AwaitingPairing, "matching")?;
        let right = self.lookup(self.question.right_items(), id)?;
        let Some(left) = self.selected_left else {
            return Ok(PairOutcome::Ignored);
        };
        if self.is_right_matched(right) {
            return Ok(PairOutcome::Ignored);
        }
        self.selected_left = None;
        if self.question.accepts_pair(left, right) {
            self.matched.push((right, left));
            Ok(PairOutcome::Locked { left, right })
        } else {
            self.mismatches += 1;
            self.wrong_right = Some(right);
            log::debug!("question {}: {left}-{right} is not a pair", self.question.id);
            Ok(PairOutcome::Mismatch { right })
        }
    }

    pub fn clear_mismatch(&mut self) {
        self.wrong_right = None;
    }

    /// Finish a fully paired board. Always reported as correct; wrong pairs
    /// never lock.
    pub fn submit_match(&mut self) -> Result<Submission, QuizError> {
        self.ensure_phase(Phase::AwaitingPairing, "a match submission")?;
        if !self.all_paired() {
            return Err(QuizError::IncompleteMatch(self.question.id.to_string()));
        }
        self.phase = Phase::Submitted;
        self.selected_left = None;
        self.wrong_right = None;
        let pairs = self
            .matched
            .iter()
            .map(|(right, left)| format!("{left}-{right}"))
            .collect();
        Ok(Submission {
            is_correct: true,
            answer: Answer::Pairs(pairs),
        })
    }

    fn lookup(
        &self,
        items: &'static [crate::content::Choice],
        id: &str,
    ) -> Result<&'static str, QuizError> {
        items
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.id)
            .ok_or_else(|| QuizError::UnknownOption {
                question: self.question.id.to_string(),
                option: id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::LEVEL3;

    fn matching_question() -> &'static Question {
        LEVEL3
            .questions
            .iter()
            .find(|q| q.kind.is_matching())
            .expect("level 3 has a matching question")
    }

    #[test]
    fn single_choice_submits_immediately() {
        let q = &LEVEL3.questions[0];
        let mut s = QuestionSession::new(q);
        assert_eq!(s.phase(), Phase::AwaitingSelection);
        let sub = s.choose("a").unwrap();
        assert!(sub.is_correct);
        assert_eq!(sub.answer, Answer::Choice("a".into()));
        assert_eq!(s.phase(), Phase::Submitted);
        assert_eq!(s.choose("b"), Err(QuizError::AlreadySubmitted("l3q1".into())));
    }

    #[test]
    fn wrong_choice_is_reported_incorrect() {
        let mut s = QuestionSession::new(&LEVEL3.questions[0]);
        let sub = s.choose("b").unwrap();
        assert!(!sub.is_correct);
    }

    #[test]
    fn unknown_option_is_rejected_without_submitting() {
        let mut s = QuestionSession::new(&LEVEL3.questions[0]);
        assert!(matches!(s.choose("zz"), Err(QuizError::UnknownOption { .. })));
        assert_eq!(s.phase(), Phase::AwaitingSelection);
    }

    #[test]
    fn matching_calls_on_single_question_are_refused() {
        let mut s = QuestionSession::new(&LEVEL3.questions[0]);
        assert!(matches!(s.select_left("a"), Err(QuizError::WrongInteraction { .. })));
        let mut m = QuestionSession::new(matching_question());
        assert!(matches!(m.choose("cat_l"), Err(QuizError::WrongInteraction { .. })));
    }

    #[test]
    fn left_selection_toggles() {
        let mut s = QuestionSession::new(matching_question());
        assert_eq!(s.select_left("cat_l").unwrap(), PairOutcome::Selected("cat_l"));
        assert_eq!(s.select_left("cat_l").unwrap(), PairOutcome::Deselected);
        assert_eq!(s.selected_left(), None);
    }

    #[test]
    fn right_click_without_left_is_ignored() {
        let mut s = QuestionSession::new(matching_question());
        assert_eq!(s.select_right("cat_r").unwrap(), PairOutcome::Ignored);
    }

    #[test]
    fn wrong_pair_flashes_and_keeps_going() {
        let mut s = QuestionSession::new(matching_question());
        s.select_left("cat_l").unwrap();
        assert_eq!(
            s.select_right("water_r").unwrap(),
            PairOutcome::Mismatch { right: "water_r" }
        );
        assert_eq!(s.wrong_right(), Some("water_r"));
        assert_eq!(s.selected_left(), None);
        assert_eq!(s.mismatches(), 1);
        s.clear_mismatch();
        assert_eq!(s.wrong_right(), None);
        assert_eq!(s.phase(), Phase::AwaitingPairing);
    }

    #[test]
    fn locked_items_cannot_be_reused() {
        let mut s = QuestionSession::new(matching_question());
        s.select_left("cat_l").unwrap();
        assert!(matches!(s.select_right("cat_r").unwrap(), PairOutcome::Locked { .. }));
        assert_eq!(s.select_left("cat_l").unwrap(), PairOutcome::Ignored);
        s.select_left("water_l").unwrap();
        assert_eq!(s.select_right("cat_r").unwrap(), PairOutcome::Ignored);
        // the selection survives an ignored click on a locked right item
        assert_eq!(s.selected_left(), Some("water_l"));
    }

    #[test]
    fn incomplete_board_cannot_be_submitted() {
        let mut s = QuestionSession::new(matching_question());
        s.select_left("cat_l").unwrap();
        s.select_right("cat_r").unwrap();
        assert!(!s.all_paired());
        assert_eq!(s.submit_match(), Err(QuizError::IncompleteMatch("l3q4".into())));
    }

    #[test]
    fn complete_board_is_correct_despite_detours() {
        let mut s = QuestionSession::new(matching_question());
        for (left, wrong) in [("cat_l", "water_r"), ("water_l", "mountain_r")] {
            s.select_left(left).unwrap();
            s.select_right(wrong).unwrap();
        }
        for (left, right) in [
            ("water_l", "water_r"),
            ("cat_l", "cat_r"),
            ("mountain_l", "mountain_r"),
        ] {
            s.select_left(left).unwrap();
            s.select_right(right).unwrap();
        }
        assert!(s.all_paired());
        assert_eq!(s.mismatches(), 2);
        let sub = s.submit_match().unwrap();
        assert!(sub.is_correct);
        assert_eq!(
            sub.answer,
            Answer::Pairs(vec![
                "water_l-water_r".into(),
                "cat_l-cat_r".into(),
                "mountain_l-mountain_r".into(),
            ])
        );
        assert_eq!(s.phase(), Phase::Submitted);
    }
}

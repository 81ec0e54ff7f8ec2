//! Level runner: walks a level's questions from first to last.
//!
//! After each submission the runner shows feedback for `feedback_ms`. Matching
//! questions then advance on their own; every other kind waits on the answer
//! reveal until the learner confirms. All delays are [`Timers`] events, and a
//! question change cancels whatever is still pending.

use crate::config::GameConfig;
use crate::content::{Level, Question};
use crate::error::QuizError;
use crate::question::{Answer, PairOutcome, QuestionSession, Submission};
use crate::timer::Timers;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionResult {
    pub question_id: String,
    pub prompt: String,
    pub is_correct: bool,
    pub submitted: Answer,
    pub expected: Answer,
}

/// Emitted exactly once, when the last question of an attempt is done.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelOutcome {
    pub level_id: u32,
    pub stars: u8,
    pub results: Vec<QuestionResult>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Answering,
    Feedback { correct: bool },
    Revealing,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RunnerEvent {
    FeedbackElapsed,
    MismatchElapsed,
}

/// 3 stars for a perfect run, 2 from 70% accuracy, otherwise 1. Never 0.
pub fn star_rating(correct: usize, total: usize) -> u8 {
    if total > 0 && correct >= total {
        3
    } else if total > 0 && correct * 10 >= total * 7 {
        2
    } else {
        1
    }
}

#[derive(Debug)]
pub struct LevelRunner {
    level: &'static Level,
    feedback_ms: f64,
    mismatch_flash_ms: f64,
    index: usize,
    session: QuestionSession,
    results: Vec<QuestionResult>,
    stage: Stage,
    timers: Timers<RunnerEvent>,
}

impl LevelRunner {
    pub fn start(level: &'static Level, config: &GameConfig) -> Result<Self, QuizError> {
        level.validate()?;
        log::info!("starting level {} ({})", level.id, level.title);
        Ok(Self {
            level,
            feedback_ms: config.feedback_ms,
            mismatch_flash_ms: config.mismatch_flash_ms,
            index: 0,
            session: QuestionSession::new(&level.questions[0]),
            results: Vec::with_capacity(level.questions.len()),
            stage: Stage::Answering,
            timers: Timers::new(),
        })
    }

    /// Back to the first question with nothing recorded.
    pub fn restart(&mut self) {
        let level = self.level;
        self.index = 0;
        self.session = QuestionSession::new(&level.questions[0]);
        self.results.clear();
        self.stage = Stage::Answering;
        self.timers.cancel_all();
    }

    pub fn level(&self) -> &'static Level {
        self.level
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn current_question(&self) -> &'static Question {
        self.session.question()
    }

    pub fn session(&self) -> &QuestionSession {
        &self.session
    }

    pub fn results(&self) -> &[QuestionResult] {
        &self.results
    }

    pub fn is_last_question(&self) -> bool {
        self.index + 1 >= self.level.questions.len()
    }

    /// Fraction for the progress bar, counting the current question.
    pub fn progress(&self) -> f64 {
        (self.index + 1) as f64 / self.level.questions.len() as f64
    }

    /// Canonical answer text, available while the answer is revealed.
    pub fn revealed_answer(&self) -> Option<String> {
        match self.stage {
            Stage::Revealing => Some(self.current_question().answer_text()),
            _ => None,
        }
    }

    fn ensure_answering(&self) -> Result<(), QuizError> {
        match self.stage {
            Stage::Answering => Ok(()),
            _ => Err(QuizError::UnexpectedStage("an answer")),
        }
    }

    pub fn choose(&mut self, option_id: &str, now_ms: f64) -> Result<(), QuizError> {
        self.ensure_answering()?;
        let Submission { is_correct, answer } = self.session.choose(option_id)?;
        self.submit_answer(is_correct, answer, now_ms)
    }

    pub fn select_left(&mut self, id: &str) -> Result<PairOutcome, QuizError> {
        self.ensure_answering()?;
        self.session.select_left(id)
    }

    pub fn select_right(&mut self, id: &str, now_ms: f64) -> Result<PairOutcome, QuizError> {
        self.ensure_answering()?;
        let outcome = self.session.select_right(id)?;
        if let PairOutcome::Mismatch { .. } = outcome {
            self.timers
                .schedule(now_ms + self.mismatch_flash_ms, RunnerEvent::MismatchElapsed);
        }
        Ok(outcome)
    }

    pub fn submit_match(&mut self, now_ms: f64) -> Result<(), QuizError> {
        self.ensure_answering()?;
        let Submission { is_correct, answer } = self.session.submit_match()?;
        self.submit_answer(is_correct, answer, now_ms)
    }

    /// Record the result for the current question and start its feedback.
    pub fn submit_answer(
        &mut self,
        is_correct: bool,
        answer: Answer,
        now_ms: f64,
    ) -> Result<(), QuizError> {
        self.ensure_answering()?;
        let question = self.current_question();
        self.results.push(QuestionResult {
            question_id: question.id.to_string(),
            prompt: question.prompt.to_string(),
            is_correct,
            submitted: answer,
            expected: question.answer.into(),
        });
        self.stage = Stage::Feedback { correct: is_correct };
        self.timers
            .schedule(now_ms + self.feedback_ms, RunnerEvent::FeedbackElapsed);
        Ok(())
    }

    /// Leave the answer reveal. Returns the outcome after the last question.
    pub fn confirm_next(&mut self) -> Result<Option<LevelOutcome>, QuizError> {
        match self.stage {
            Stage::Revealing => Ok(self.advance()),
            _ => Err(QuizError::UnexpectedStage("the next-question confirmation")),
        }
    }

    /// Fire due timers. Returns the outcome if a matching question was the
    /// last one and its feedback just ended.
    pub fn tick(&mut self, now_ms: f64) -> Option<LevelOutcome> {
        for event in self.timers.take_due(now_ms) {
            match event {
                RunnerEvent::MismatchElapsed => self.session.clear_mismatch(),
                RunnerEvent::FeedbackElapsed if matches!(self.stage, Stage::Feedback { .. }) => {
                    if self.current_question().kind.is_matching() {
                        // events left in this batch belong to the old question
                        return self.advance();
                    }
                    self.stage = Stage::Revealing;
                }
                RunnerEvent::FeedbackElapsed => {}
            }
        }
        None
    }

    fn advance(&mut self) -> Option<LevelOutcome> {
        self.timers.cancel_all();
        if self.is_last_question() {
            return Some(self.finalize());
        }
        self.index += 1;
        let level = self.level;
        self.session = QuestionSession::new(&level.questions[self.index]);
        self.stage = Stage::Answering;
        None
    }

    fn finalize(&mut self) -> LevelOutcome {
        let correct = self.results.iter().filter(|r| r.is_correct).count();
        let stars = star_rating(correct, self.level.questions.len());
        self.stage = Stage::Finished;
        log::info!(
            "level {} finished: {correct}/{} correct, {stars} stars",
            self.level.id,
            self.level.questions.len()
        );
        LevelOutcome {
            level_id: self.level.id,
            stars,
            results: std::mem::take(&mut self.results),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Choice, Expected, Focus, Palette, QuestionKind, LEVEL3};

    const FEEDBACK: f64 = 1200.0;

    static OPTS: [Choice; 2] = [Choice::new("a", "对"), Choice::new("b", "错")];

    fn single(id: &'static str) -> Question {
        Question {
            id,
            kind: QuestionKind::StrokeCount,
            prompt: "选一选",
            target_word: "人",
            options: &OPTS,
            answer: Expected::Single("a"),
        }
    }

    // Leaked level of `n` single-answer questions
    fn make_level(n: usize) -> &'static Level {
        let ids = ["q1", "q2", "q3", "q4", "q5", "q6", "q7", "q8", "q9", "q10"];
        let questions: Vec<Question> = ids[..n].iter().map(|&id| single(id)).collect();
        let questions: &'static [Question] = Box::leak(questions.into_boxed_slice());
        Box::leak(Box::new(Level {
            id: 42,
            title: "test-level",
            focus: Focus::Shape,
            palette: Palette {
                color: "",
                bg_color: "",
                border_color: "",
            },
            questions,
        }))
    }

    /// Answer every question, `correct` of them right, returning the outcome.
    fn play(runner: &mut LevelRunner, correct: usize) -> LevelOutcome {
        let mut now = 0.0;
        for i in 0.. {
            let pick = if i < correct { "a" } else { "b" };
            runner.choose(pick, now).unwrap();
            now += FEEDBACK;
            assert_eq!(runner.tick(now), None);
            assert_eq!(runner.stage(), Stage::Revealing);
            if let Some(outcome) = runner.confirm_next().unwrap() {
                return outcome;
            }
        }
        unreachable!()
    }

    #[test]
    fn star_thresholds() {
        assert_eq!(star_rating(5, 5), 3);
        assert_eq!(star_rating(4, 5), 2);
        assert_eq!(star_rating(7, 10), 2);
        assert_eq!(star_rating(69, 100), 1);
        assert_eq!(star_rating(3, 5), 1);
        assert_eq!(star_rating(0, 5), 1);
        assert_eq!(star_rating(0, 0), 1);
    }

    #[test]
    fn perfect_run_earns_three_stars() {
        let mut runner = LevelRunner::start(make_level(5), &GameConfig::default()).unwrap();
        let outcome = play(&mut runner, 5);
        assert_eq!(outcome.stars, 3);
        assert_eq!(outcome.results.len(), 5);
        assert!(outcome.results.iter().all(|r| r.is_correct));
        assert_eq!(runner.stage(), Stage::Finished);
    }

    #[test]
    fn three_of_five_earns_one_star() {
        let mut runner = LevelRunner::start(make_level(5), &GameConfig::default()).unwrap();
        assert_eq!(play(&mut runner, 3).stars, 1);
    }

    #[test]
    fn results_follow_question_order() {
        let mut runner = LevelRunner::start(make_level(4), &GameConfig::default()).unwrap();
        let outcome = play(&mut runner, 2);
        let ids: Vec<_> = outcome.results.iter().map(|r| r.question_id.as_str()).collect();
        assert_eq!(ids, ["q1", "q2", "q3", "q4"]);
        assert_eq!(outcome.results[3].submitted, Answer::Choice("b".into()));
        assert_eq!(outcome.results[3].expected, Answer::Choice("a".into()));
    }

    #[test]
    fn feedback_blocks_input_until_reveal() {
        let mut runner = LevelRunner::start(make_level(2), &GameConfig::default()).unwrap();
        runner.choose("a", 0.0).unwrap();
        assert_eq!(runner.stage(), Stage::Feedback { correct: true });
        assert!(runner.choose("a", 10.0).is_err());
        assert!(runner.confirm_next().is_err());
        assert_eq!(runner.tick(FEEDBACK - 1.0), None);
        assert_eq!(runner.revealed_answer(), None);
        runner.tick(FEEDBACK);
        assert_eq!(runner.revealed_answer().as_deref(), Some("对"));
        assert_eq!(runner.confirm_next().unwrap(), None);
        assert_eq!(runner.index(), 1);
        assert_eq!(runner.stage(), Stage::Answering);
    }

    #[test]
    fn matching_question_advances_on_its_own() {
        let mut runner = LevelRunner::start(&LEVEL3, &GameConfig::default()).unwrap();
        let mut now = 0.0;
        for _ in 0..3 {
            runner.choose("a", now).unwrap();
            now += FEEDBACK;
            runner.tick(now);
            runner.confirm_next().unwrap();
        }
        assert!(runner.current_question().kind.is_matching());
        for (l, r) in [("cat_l", "cat_r"), ("water_l", "water_r"), ("mountain_l", "mountain_r")] {
            runner.select_left(l).unwrap();
            runner.select_right(r, now).unwrap();
        }
        runner.submit_match(now).unwrap();
        now += FEEDBACK;
        assert_eq!(runner.tick(now), None);
        assert_eq!(runner.index(), 4);
        assert_eq!(runner.stage(), Stage::Answering);
    }

    #[test]
    fn mismatch_flash_clears_on_timer() {
        let mut runner = LevelRunner::start(&LEVEL3, &GameConfig::default()).unwrap();
        let mut now = 0.0;
        for _ in 0..3 {
            runner.choose("a", now).unwrap();
            now += FEEDBACK;
            runner.tick(now);
            runner.confirm_next().unwrap();
        }
        runner.select_left("cat_l").unwrap();
        runner.select_right("water_r", now).unwrap();
        assert_eq!(runner.session().wrong_right(), Some("water_r"));
        runner.tick(now + 500.0);
        assert_eq!(runner.session().wrong_right(), Some("water_r"));
        runner.tick(now + 820.0);
        assert_eq!(runner.session().wrong_right(), None);
    }

    fn to_matching_question(runner: &mut LevelRunner) -> f64 {
        let mut now = 0.0;
        for _ in 0..3 {
            runner.choose("a", now).unwrap();
            now += runner.feedback_ms;
            runner.tick(now);
            runner.confirm_next().unwrap();
        }
        now
    }

    fn pair_all(runner: &mut LevelRunner, now: f64) {
        for (l, r) in [("cat_l", "cat_r"), ("water_l", "water_r"), ("mountain_l", "mountain_r")] {
            runner.select_left(l).unwrap();
            runner.select_right(r, now).unwrap();
        }
    }

    #[test]
    fn next_question_cancels_pending_flash() {
        let config = GameConfig {
            feedback_ms: 300.0,
            ..GameConfig::default()
        };
        let mut runner = LevelRunner::start(&LEVEL3, &config).unwrap();
        let now = to_matching_question(&mut runner);
        runner.select_left("cat_l").unwrap();
        runner.select_right("water_r", now).unwrap();
        pair_all(&mut runner, now);
        runner.submit_match(now).unwrap();

        assert_eq!(runner.tick(now + 300.0), None);
        assert_eq!(runner.index(), 4);
        assert_eq!(runner.stage(), Stage::Answering);
        assert_eq!(runner.session().wrong_right(), None);
        assert!(runner.timers.is_empty());
        assert_eq!(runner.tick(now + 820.0), None);
        assert_eq!(runner.index(), 4);
    }

    #[test]
    fn matching_as_last_question_finishes_the_level() {
        let level: &'static Level = Box::leak(Box::new(Level {
            id: 43,
            title: "match-last",
            focus: Focus::Meaning,
            palette: Palette {
                color: "",
                bg_color: "",
                border_color: "",
            },
            questions: &LEVEL3.questions[3..4],
        }));
        let mut runner = LevelRunner::start(level, &GameConfig::default()).unwrap();
        assert!(runner.current_question().kind.is_matching());
        assert!(runner.is_last_question());
        pair_all(&mut runner, 0.0);
        runner.submit_match(0.0).unwrap();
        assert_eq!(runner.tick(FEEDBACK - 1.0), None);

        let outcome = runner.tick(FEEDBACK).unwrap();
        assert_eq!(outcome.level_id, 43);
        assert_eq!(outcome.stars, 3);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(runner.stage(), Stage::Finished);
        assert_eq!(runner.tick(FEEDBACK * 2.0), None);
    }

    #[test]
    fn restart_clears_results() {
        let mut runner = LevelRunner::start(make_level(3), &GameConfig::default()).unwrap();
        runner.choose("a", 0.0).unwrap();
        runner.restart();
        assert!(runner.results().is_empty());
        assert_eq!(runner.index(), 0);
        assert_eq!(runner.tick(10_000.0), None);
        assert_eq!(runner.stage(), Stage::Answering);
    }

    #[test]
    fn empty_level_is_rejected() {
        let level = make_level(0);
        assert!(matches!(
            LevelRunner::start(level, &GameConfig::default()),
            Err(QuizError::InvalidLevel { .. })
        ));
    }
}

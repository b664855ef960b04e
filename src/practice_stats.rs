//! Defines how the results of the questions answered during a game session are recorded.
//!
//! Only the number of questions and the number of correct answers are kept. Nothing is stored
//! once the session ends.


use indoc::formatdoc;

/// Contains functions to record the result of each question and summarize them.
pub trait PracticeStats {
    /// Records whether the answer to a question was correct.
    fn record_answer(&mut self, correct: bool);

    /// Returns the number of questions answered so far.
    fn total_questions(&self) -> usize;

    /// Returns the number of questions answered correctly so far.
    fn correct_answers(&self) -> usize;

    /// Returns the percentage of correct answers, truncated to an integer. It's zero if no
    /// question was answered.
    fn correct_percentage(&self) -> usize {
        match self.total_questions() {
            0 => 0,
            total => self.correct_answers() * 100 / total,
        }
    }

    /// Returns a printable summary of the results.
    fn summary(&self) -> String {
        formatdoc! {"
            =======================
            [Game Stats]
            Num of questions: {}
            Correct Answers: {}
            Result: {}%
            =======================
            ",
            self.total_questions(),
            self.correct_answers(),
            self.correct_percentage(),
        }
    }
}

/// An implementation of [`PracticeStats`] that keeps the counters in memory for the duration of
/// a session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// The number of questions answered.
    total_questions: usize,

    /// The number of questions answered correctly.
    correct_answers: usize,
}

impl SessionStats {
    /// Creates a new set of stats with no answers.
    #[must_use]
    pub fn new() -> SessionStats {
        SessionStats::default()
    }
}

impl PracticeStats for SessionStats {
    fn record_answer(&mut self, correct: bool) {
        self.total_questions += 1;
        if correct {
            self.correct_answers += 1;
        }
    }

    fn total_questions(&self) -> usize {
        self.total_questions
    }

    fn correct_answers(&self) -> usize {
        self.correct_answers
    }
}

//! Contains utilities common to the tests of the fretboard games.
//!
//! Questions are built from random choices, which makes their content impossible to predict in a
//! test. The types in this module replace the random number generator with a fixed sequence so
//! that the tests can check the exact text shown to the user.

use crate::{game::IndexSource, practice_stats::PracticeStats};

/// An [`IndexSource`] that returns a fixed sequence of values, starting over once all of them have
/// been returned. Each value is reduced modulo the requested upper bound so that it is always
/// valid. An empty sequence always returns zero.
#[derive(Clone, Debug, Default)]
pub struct ScriptedIndices {
    /// The values to return, in order.
    values: Vec<usize>,

    /// The position of the next value to return.
    next: usize,
}

impl ScriptedIndices {
    /// Creates a source that returns the given values in order.
    #[must_use]
    pub fn new(values: &[usize]) -> ScriptedIndices {
        ScriptedIndices {
            values: values.to_vec(),
            next: 0,
        }
    }
}

impl IndexSource for ScriptedIndices {
    fn next_index(&mut self, upper: usize) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value % upper
    }
}

/// An implementation of [`PracticeStats`] that keeps every recorded result in order.
#[derive(Clone, Debug, Default)]
pub struct RecordedAnswers {
    /// Whether each answer was correct.
    pub answers: Vec<bool>,
}

impl PracticeStats for RecordedAnswers {
    fn record_answer(&mut self, correct: bool) {
        self.answers.push(correct);
    }

    fn total_questions(&self) -> usize {
        self.answers.len()
    }

    fn correct_answers(&self) -> usize {
        self.answers.iter().filter(|correct| **correct).count()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Verifies that the scripted values are returned in order and repeated.
    #[test]
    fn scripted_indices() {
        let mut source = ScriptedIndices::new(&[1, 7, 3]);
        assert_eq!(source.next_index(10), 1);
        assert_eq!(source.next_index(5), 2);
        assert_eq!(source.next_index(10), 3);
        assert_eq!(source.next_index(10), 1);

        let mut empty = ScriptedIndices::default();
        assert_eq!(empty.next_index(10), 0);
    }

    /// Verifies recording answers in order.
    #[test]
    fn recorded_answers() {
        let mut stats = RecordedAnswers::default();
        stats.record_answer(true);
        stats.record_answer(false);
        assert_eq!(stats.answers, vec![true, false]);
        assert_eq!(stats.correct_percentage(), 50);
    }
}

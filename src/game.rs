//! Defines the interface shared by the fretboard games and the types they use to describe
//! questions and answers.

pub mod find_note;


use rand::{Rng, rngs::StdRng};
use std::collections::BTreeMap;

use crate::{data::music::notes::Note, error::GameError};

/// The positions of the notes that answer a question. Maps each string number to a map of fret
/// numbers to the note found at that fret.
pub type Answer = BTreeMap<usize, BTreeMap<usize, Note>>;

/// A game played one question at a time.
pub trait Game {
    /// Asks the user how the game should be played and validates the choices.
    fn configure(&mut self) -> Result<(), GameError>;

    /// Asks one question, reads the answer, and reports whether it was correct.
    fn run_step(&mut self) -> Result<(), GameError>;

    /// Prints the results of the questions asked so far.
    fn summary(&mut self) -> Result<(), GameError>;

    /// Ends the game and prints its summary. No steps can be run afterwards.
    fn quit(&mut self);
}

/// The stages a game goes through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    /// The game has not been configured yet.
    Unconfigured,

    /// The game is configured and ready to ask its first question.
    Configured,

    /// A question was asked and the game is waiting for the answer.
    AwaitingAnswer,

    /// The last answer was verified and the game is ready to ask another question.
    Verified,

    /// The game has ended.
    Finished,
}

/// The source of randomness used to generate questions. Games draw every random choice from it so
/// that tests can replace it with a predictable sequence.
pub trait IndexSource {
    /// Returns an index in the range `0..upper`. The value of `upper` is always positive.
    fn next_index(&mut self, upper: usize) -> usize;
}

impl IndexSource for StdRng {
    fn next_index(&mut self, upper: usize) -> usize {
        self.random_range(0..upper)
    }
}

/// Returns whether the submitted answer matches the expected one. Every expected string must be
/// present in the submission with the same number of frets and the same note at each of them.
/// Submitted strings that are not expected are not checked.
#[must_use]
pub fn verify_answer(expected: &Answer, submitted: &Answer) -> bool {
    expected.iter().all(|(string_number, expected_frets)| {
        submitted
            .get(string_number)
            .is_some_and(|submitted_frets| {
                submitted_frets.len() == expected_frets.len()
                    && expected_frets
                        .iter()
                        .all(|(fret, note)| submitted_frets.get(fret) == Some(note))
            })
    })
}

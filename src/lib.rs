//! Fretboard Games is a collection of interactive training games that help guitarists learn the
//! fretboard and recognize notes on it.
//!
//! The library models the twelve notes of the chromatic scale, including the enharmonic spellings
//! of each of them, and builds the fretboard of a stringed instrument from a tuning by moving up
//! one half step per fret. Games use this model to ask questions about the positions of notes and
//! check the answers typed by the user.
//!
//! The only game at the moment is the "find note" game, in which the user is asked to find every
//! position of one or more notes on one or more strings. Wrong answers are followed by a drawing of
//! the fretboard with the correct positions, and the results of all the questions are summarized
//! when the session ends.

pub mod data;
pub mod error;
pub mod game;
pub mod instrument;
pub mod practice_stats;
pub mod session;
pub mod testutil;

pub use data::{GameOptions, GameOptionsBuilder, music::notes::Note};
pub use game::{Game, find_note::FindNoteGame};
pub use instrument::{Fretboard, Tuning};

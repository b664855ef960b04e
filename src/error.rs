//! Contains the errors returned by the fretboard games.

use std::io;

use thiserror::Error;

use crate::data::music::notes::{Accidental, NaturalNote};

/// An error returned when dealing with the notes of the chromatic scale.
#[derive(Debug, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum NoteError {
    #[error("note '{0}{1}' not found")]
    NotFound(NaturalNote, Accidental),

    #[error("cannot parse '{0}' as a note")]
    Parse(String),
}

/// An error returned when dealing with the strings and frets of an instrument.
#[derive(Debug, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum FretboardError {
    #[error("string '{0}' doesn't exist, strings are numbered from 1 to {1}")]
    InvalidString(i64, usize),

    #[error("fret '{0}' doesn't exist, frets are numbered from 0 to {1}")]
    InvalidFret(i64, usize),

    #[error("fretboard has no strings or frets")]
    EmptyFretboard,

    #[error("invalid tuning '{0}': {1}")]
    InvalidTuning(String, #[source] NoteError),

    #[error("a tuning needs at least one string")]
    EmptyTuning,
}

/// An error returned while running a game.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum GameError {
    #[error("invalid {0} amount {1}, has to be between 1 and {2}")]
    InvalidConfig(&'static str, i64, usize),

    #[error("error note not found at fret number '{0}': {1}")]
    NoteNotFound(i64, #[source] FretboardError),

    #[error("error parsing user-provided answer '{0}': {1}")]
    ParseError(String, #[source] std::num::ParseIntError),

    #[error("error reading answer provided by user: {0}")]
    IO(#[source] io::Error),

    #[error("the input stream was closed")]
    EndOfInput,

    #[error(transparent)]
    Fretboard(#[from] FretboardError),

    #[error("the game must be configured before running a step")]
    NotConfigured,

    #[error("the game has already finished")]
    GameFinished,
}

//! Defines the fretboard of a stringed instrument and the tunings used to build it.
//!
//! Strings are numbered the way guitarists number them: string 1 is the first entry of the
//! tuning, which in standard tuning is the high E string. Frets are numbered from 0, the open
//! string, up to the number of frets.

pub mod string;

use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt::Write, str::FromStr};

use crate::{data::music::notes::Note, error::FretboardError};
use string::GuitarString;

/// The open notes of each string, starting with string 1.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Tuning(pub Vec<Note>);

impl Tuning {
    /// Returns the standard tuning of a six-string guitar: E B G D A E, from the highest string to
    /// the lowest.
    #[must_use]
    pub fn standard() -> Tuning {
        Tuning(vec![Note::E, Note::B, Note::G, Note::D, Note::A, Note::E])
    }

    /// Returns drop D tuning, with the lowest string tuned down a whole step.
    #[must_use]
    pub fn drop_d() -> Tuning {
        Tuning(vec![Note::E, Note::B, Note::G, Note::D, Note::A, Note::D])
    }

    /// Returns open G tuning.
    #[must_use]
    pub fn open_g() -> Tuning {
        Tuning(vec![Note::D, Note::B, Note::G, Note::D, Note::G, Note::D])
    }

    /// Returns DADGAD tuning. The name lists the strings from the lowest to the highest.
    #[must_use]
    pub fn dadgad() -> Tuning {
        Tuning(vec![Note::D, Note::A, Note::G, Note::D, Note::A, Note::D])
    }

    /// Returns the standard tuning of a four-string bass: G D A E.
    #[must_use]
    pub fn bass_standard() -> Tuning {
        Tuning(vec![Note::G, Note::D, Note::A, Note::E])
    }

    /// Returns the open notes of the strings.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.0
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning::standard()
    }
}

impl FromStr for Tuning {
    type Err = FretboardError;

    /// Parses a comma-separated list of open notes, starting with string 1. For example,
    /// `E,B,G,D,A,D` is drop D tuning.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let notes = s
            .split(',')
            .filter(|token| !token.trim().is_empty())
            .map(|token| {
                token
                    .parse::<Note>()
                    .map_err(|e| FretboardError::InvalidTuning(s.to_string(), e))
            })
            .collect::<Result<Vec<Note>, FretboardError>>()?;
        if notes.is_empty() {
            return Err(FretboardError::EmptyTuning);
        }
        Ok(Tuning(notes))
    }
}

/// The strings of an instrument, all of them sharing the same number of frets.
#[derive(Clone, Debug)]
pub struct Fretboard {
    /// The number of frets of every string, not counting the open string.
    num_frets: usize,

    /// The strings in the order of the tuning.
    strings: Vec<GuitarString>,
}

impl Fretboard {
    /// Creates a fretboard with one string per note in the tuning.
    pub fn new(num_frets: usize, tuning: &Tuning) -> Result<Fretboard, FretboardError> {
        let strings = tuning
            .notes()
            .iter()
            .map(|open_note| {
                GuitarString::new(*open_note, num_frets)
                    .map_err(|e| FretboardError::InvalidTuning(open_note.to_string(), e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Fretboard { num_frets, strings })
    }

    /// Returns the number of strings.
    #[must_use]
    pub fn num_strings(&self) -> usize {
        self.strings.len()
    }

    /// Returns the number of frets of each string, not counting the open string.
    #[must_use]
    pub fn num_frets(&self) -> usize {
        self.num_frets
    }

    /// Returns the number of positions on each string, including the open string.
    #[must_use]
    pub fn string_length(&self) -> usize {
        self.num_frets + 1
    }

    /// Returns the string with the given 1-based number.
    #[must_use]
    pub fn string(&self, string_number: usize) -> Option<&GuitarString> {
        string_number
            .checked_sub(1)
            .and_then(|index| self.strings.get(index))
    }

    /// Returns the note at the given string and fret. Strings are numbered from 1 and frets from 0.
    /// The numbers are signed so that values typed by the user can be checked as they are.
    pub fn get_note_at(&self, string_number: i64, fret_number: i64) -> Result<Note, FretboardError> {
        let string = usize::try_from(string_number)
            .ok()
            .and_then(|number| self.string(number))
            .ok_or(FretboardError::InvalidString(
                string_number,
                self.num_strings(),
            ))?;
        usize::try_from(fret_number)
            .ok()
            .and_then(|fret| string.note_at(fret))
            .ok_or(FretboardError::InvalidFret(fret_number, self.num_frets))
    }

    /// Draws the fretboard as a text grid. The first row lists the fret numbers and each of the
    /// following rows is a string, in order. A cell contains an `X` when its note is one of the
    /// highlighted notes and its string is not ignored, and a `-` otherwise.
    pub fn draw(
        &self,
        highlight_notes: &[Note],
        ignore_strings: &BTreeSet<usize>,
    ) -> Result<String, FretboardError> {
        if self.strings.is_empty() || self.num_frets == 0 {
            return Err(FretboardError::EmptyFretboard);
        }

        // Writing to a string never fails, so the results of `write!` are ignored.
        let mut output = String::from("|");
        for fret in 0..self.string_length() {
            let _ = write!(output, " {fret:<3}|");
        }

        for (index, string) in self.strings.iter().enumerate() {
            output.push_str("\n|");
            let ignored = ignore_strings.contains(&(index + 1));
            for note in string.notes() {
                let cell = if !ignored && highlight_notes.contains(note) {
                    "X"
                } else {
                    "-"
                };
                let _ = write!(output, " {cell:<3}|");
            }
        }
        Ok(output)
    }
}

//! Defines a single string of a fretted instrument.

use std::collections::BTreeMap;

use crate::{data::music::notes::Note, error::NoteError};

/// The notes along one string, indexed by fret number. Fret 0 is the open string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuitarString {
    /// The note at every fret, each one a half step above the previous one.
    notes: Vec<Note>,
}

impl GuitarString {
    /// Creates a string tuned to the given note with the given number of frets. The returned
    /// string has `num_frets + 1` positions because the open string is included. Enharmonic
    /// spellings of the open note are resolved to their entry in the chromatic scale.
    pub fn new(open_note: Note, num_frets: usize) -> Result<GuitarString, NoteError> {
        let mut notes = Vec::with_capacity(num_frets + 1);
        let mut current = open_note.canonical()?;
        notes.push(current);
        for _ in 0..num_frets {
            current = current.next_half_step()?;
            notes.push(current);
        }
        Ok(GuitarString { notes })
    }

    /// Returns the note played on the open string.
    #[must_use]
    pub fn open_note(&self) -> Note {
        self.notes[0]
    }

    /// Returns the notes of the string, starting with the open string.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Returns the number of positions in the string, which is the number of frets plus one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Returns the note at the given fret, if it exists.
    #[must_use]
    pub fn note_at(&self, fret: usize) -> Option<Note> {
        self.notes.get(fret).copied()
    }

    /// Returns every fret at which the given note is found, mapped to the note itself. A note
    /// usually appears more than once, e.g. at frets 0 and 12 of an E string.
    #[must_use]
    pub fn find_note(&self, target: Note) -> BTreeMap<usize, Note> {
        let target = target.canonical().unwrap_or(target);
        self.notes
            .iter()
            .enumerate()
            .filter(|(_, note)| **note == target)
            .map(|(fret, note)| (fret, *note))
            .collect()
    }
}

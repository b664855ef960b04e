//! Defines the notes of the chromatic scale and the enharmonic spellings that resolve to them.
//!
//! The twelve pitch classes are stored in a constant table ordered by half steps starting at C.
//! Moving by half steps is an index walk over that table that wraps at both ends, and looking up a
//! note by any of its spellings is a scan of the primary spellings and their aliases.

use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};
use strum::EnumIter;

use crate::error::NoteError;

/// Defines the names of the natural notes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum NaturalNote {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Display for NaturalNote {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NaturalNote::A => write!(f, "A"),
            NaturalNote::B => write!(f, "B"),
            NaturalNote::C => write!(f, "C"),
            NaturalNote::D => write!(f, "D"),
            NaturalNote::E => write!(f, "E"),
            NaturalNote::F => write!(f, "F"),
            NaturalNote::G => write!(f, "G"),
        }
    }
}

/// Defines the pitch accidentals that can be applied to a note.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum Accidental {
    Natural,
    Flat,
    Sharp,
}

impl Display for Accidental {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Accidental::Natural => Ok(()),
            Accidental::Flat => write!(f, "b"),
            Accidental::Sharp => write!(f, "#"),
        }
    }
}

/// Defines the union of a natural note and an accidental that describes a note. Two notes are
/// equal only if they are spelled the same way. Use [`Note::canonical`] to compare enharmonic
/// spellings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Note(pub NaturalNote, pub Accidental);

/// An entry of the chromatic scale: the spelling used by the games and its enharmonic aliases.
struct PitchClass {
    note: Note,
    aliases: &'static [Note],
}

/// The twelve pitch classes in ascending half steps starting at C.
const CHROMATIC_SCALE: [PitchClass; 12] = [
    PitchClass {
        note: Note::C,
        aliases: &[Note::B_SHARP],
    },
    PitchClass {
        note: Note::C_SHARP,
        aliases: &[Note::D_FLAT],
    },
    PitchClass {
        note: Note::D,
        aliases: &[],
    },
    PitchClass {
        note: Note::D_SHARP,
        aliases: &[Note::E_FLAT],
    },
    PitchClass {
        note: Note::E,
        aliases: &[Note::F_FLAT],
    },
    PitchClass {
        note: Note::F,
        aliases: &[Note::E_SHARP],
    },
    PitchClass {
        note: Note::F_SHARP,
        aliases: &[Note::G_FLAT],
    },
    PitchClass {
        note: Note::G,
        aliases: &[],
    },
    PitchClass {
        note: Note::G_SHARP,
        aliases: &[Note::A_FLAT],
    },
    PitchClass {
        note: Note::A,
        aliases: &[],
    },
    PitchClass {
        note: Note::A_SHARP,
        aliases: &[Note::B_FLAT],
    },
    PitchClass {
        note: Note::B,
        aliases: &[Note::C_FLAT],
    },
];

#[allow(missing_docs)]
impl Note {
    pub const A: Note = Note(NaturalNote::A, Accidental::Natural);
    pub const A_FLAT: Note = Note(NaturalNote::A, Accidental::Flat);
    pub const A_SHARP: Note = Note(NaturalNote::A, Accidental::Sharp);
    pub const B: Note = Note(NaturalNote::B, Accidental::Natural);
    pub const B_FLAT: Note = Note(NaturalNote::B, Accidental::Flat);
    pub const B_SHARP: Note = Note(NaturalNote::B, Accidental::Sharp);
    pub const C: Note = Note(NaturalNote::C, Accidental::Natural);
    pub const C_FLAT: Note = Note(NaturalNote::C, Accidental::Flat);
    pub const C_SHARP: Note = Note(NaturalNote::C, Accidental::Sharp);
    pub const D: Note = Note(NaturalNote::D, Accidental::Natural);
    pub const D_FLAT: Note = Note(NaturalNote::D, Accidental::Flat);
    pub const D_SHARP: Note = Note(NaturalNote::D, Accidental::Sharp);
    pub const E: Note = Note(NaturalNote::E, Accidental::Natural);
    pub const E_FLAT: Note = Note(NaturalNote::E, Accidental::Flat);
    pub const E_SHARP: Note = Note(NaturalNote::E, Accidental::Sharp);
    pub const F: Note = Note(NaturalNote::F, Accidental::Natural);
    pub const F_FLAT: Note = Note(NaturalNote::F, Accidental::Flat);
    pub const F_SHARP: Note = Note(NaturalNote::F, Accidental::Sharp);
    pub const G: Note = Note(NaturalNote::G, Accidental::Natural);
    pub const G_FLAT: Note = Note(NaturalNote::G, Accidental::Flat);
    pub const G_SHARP: Note = Note(NaturalNote::G, Accidental::Sharp);

    /// Returns the twelve notes of the chromatic scale in ascending order, starting at C.
    pub fn chromatic_scale() -> impl Iterator<Item = Note> {
        CHROMATIC_SCALE.iter().map(|pitch_class| pitch_class.note)
    }

    /// Finds the note of the chromatic scale spelled as the given natural note and accidental,
    /// either directly or through one of its enharmonic aliases.
    pub fn find(name: NaturalNote, accidental: Accidental) -> Result<Note, NoteError> {
        let wanted = Note(name, accidental);
        CHROMATIC_SCALE
            .iter()
            .find(|pitch_class| pitch_class.note == wanted || pitch_class.aliases.contains(&wanted))
            .map(|pitch_class| pitch_class.note)
            .ok_or(NoteError::NotFound(name, accidental))
    }

    /// Returns the spelling of this note used in the chromatic scale. For example, `E#` resolves
    /// to `F`.
    pub fn canonical(&self) -> Result<Note, NoteError> {
        Note::find(self.0, self.1)
    }

    /// Returns the enharmonic spellings of this note. Only notes of the chromatic scale have any.
    #[must_use]
    pub fn aliases(&self) -> &'static [Note] {
        CHROMATIC_SCALE
            .iter()
            .find(|pitch_class| pitch_class.note == *self)
            .map(|pitch_class| pitch_class.aliases)
            .unwrap_or(&[])
    }

    /// Returns the index of the note in the chromatic scale. Only the primary spellings are part
    /// of the scale.
    fn position(&self) -> Result<usize, NoteError> {
        CHROMATIC_SCALE
            .iter()
            .position(|pitch_class| pitch_class.note == *self)
            .ok_or(NoteError::NotFound(self.0, self.1))
    }

    /// Returns the note one half step above this one.
    pub fn next_half_step(&self) -> Result<Note, NoteError> {
        let index = self.position()?;
        Ok(CHROMATIC_SCALE[(index + 1) % CHROMATIC_SCALE.len()].note)
    }

    /// Returns the note one half step below this one.
    pub fn previous_half_step(&self) -> Result<Note, NoteError> {
        let index = self.position()?;
        Ok(CHROMATIC_SCALE[(index + CHROMATIC_SCALE.len() - 1) % CHROMATIC_SCALE.len()].note)
    }

    /// Returns the note one whole step above this one.
    pub fn next_whole_step(&self) -> Result<Note, NoteError> {
        self.next_half_step()?.next_half_step()
    }

    /// Returns the note one whole step below this one.
    pub fn previous_whole_step(&self) -> Result<Note, NoteError> {
        self.previous_half_step()?.previous_half_step()
    }
}

impl Display for Note {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

impl FromStr for Note {
    type Err = NoteError;

    /// Parses notes written as a letter followed by an optional `#` or `b`, e.g. `F#` or `Bb`. The
    /// Unicode accidentals are accepted as well.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let name = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('A') => NaturalNote::A,
            Some('B') => NaturalNote::B,
            Some('C') => NaturalNote::C,
            Some('D') => NaturalNote::D,
            Some('E') => NaturalNote::E,
            Some('F') => NaturalNote::F,
            Some('G') => NaturalNote::G,
            _ => return Err(NoteError::Parse(s.to_string())),
        };
        let accidental = match chars.as_str() {
            "" => Accidental::Natural,
            "#" | "♯" => Accidental::Sharp,
            "b" | "♭" => Accidental::Flat,
            _ => return Err(NoteError::Parse(s.to_string())),
        };
        Ok(Note(name, accidental))
    }
}

impl TryFrom<String> for Note {
    type Error = NoteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Note> for String {
    fn from(note: Note) -> Self {
        note.to_string()
    }
}

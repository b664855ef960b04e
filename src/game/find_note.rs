//! The "find note" game asks the user to locate one or more notes on one or more strings of the
//! fretboard.
//!
//! Each question picks a set of distinct strings and a set of distinct notes. The user answers
//! with the frets of every position of those notes on each of the strings, one line per string.
//! When the answer is wrong, the fretboard is drawn with the correct positions highlighted.

use log::{debug, info, warn};
use rand::{SeedableRng, rngs::StdRng};
use std::{
    collections::{BTreeMap, BTreeSet},
    io::{BufRead, Write},
};

use crate::{
    data::music::notes::Note,
    error::{FretboardError, GameError},
    game::{Answer, Game, GameState, IndexSource, verify_answer},
    instrument::Fretboard,
    practice_stats::{PracticeStats, SessionStats},
};

/// The string whose frets are sampled to pick the notes of a question.
const REFERENCE_STRING: usize = 1;

/// A question of the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Challenge {
    /// The notes to find, in the order they were picked.
    pub target_notes: Vec<Note>,

    /// The positions of the target notes on each of the selected strings.
    pub expected: Answer,
}

/// A game in which the user finds the positions of notes on the fretboard. Questions are written
/// to `output` and answers are read line by line from `input`.
pub struct FindNoteGame<R, W, S = StdRng> {
    /// The fretboard on which the notes are found.
    fretboard: Fretboard,

    /// The number of distinct notes in each question.
    notes_wanted: usize,

    /// The number of distinct strings in each question.
    strings_wanted: usize,

    /// The stream from which the answers are read.
    input: R,

    /// The stream to which the questions and results are written.
    output: W,

    /// The results of the questions asked so far.
    stats: Box<dyn PracticeStats>,

    /// The source of the random choices made to build the questions.
    index_source: S,

    /// The current stage of the game.
    state: GameState,
}

impl<R: BufRead, W: Write> FindNoteGame<R, W, StdRng> {
    /// Creates a game whose questions are generated from the given seed, or from a seed taken
    /// from the operating system if there's none.
    pub fn with_seed(
        fretboard: Fretboard,
        input: R,
        output: W,
        seed: Option<u64>,
    ) -> FindNoteGame<R, W, StdRng> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        FindNoteGame::new(fretboard, input, output, rng)
    }
}

impl<R: BufRead, W: Write, S: IndexSource> FindNoteGame<R, W, S> {
    /// Creates a new game that takes its random choices from the given source.
    pub fn new(fretboard: Fretboard, input: R, output: W, index_source: S) -> Self {
        FindNoteGame {
            fretboard,
            notes_wanted: 0,
            strings_wanted: 0,
            input,
            output,
            stats: Box::new(SessionStats::new()),
            index_source,
            state: GameState::Unconfigured,
        }
    }

    /// Replaces the object recording the results of the questions.
    #[must_use]
    pub fn with_stats(mut self, stats: Box<dyn PracticeStats>) -> Self {
        self.stats = stats;
        self
    }

    /// Returns the fretboard used by the game.
    pub fn fretboard(&self) -> &Fretboard {
        &self.fretboard
    }

    /// Returns the number of distinct notes in each question.
    pub fn notes_wanted(&self) -> usize {
        self.notes_wanted
    }

    /// Returns the number of distinct strings in each question.
    pub fn strings_wanted(&self) -> usize {
        self.strings_wanted
    }

    /// Returns the current stage of the game.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Returns the results of the questions asked so far.
    pub fn stats(&self) -> &dyn PracticeStats {
        self.stats.as_ref()
    }

    /// Returns the stream to which the game writes.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Returns the number of distinct notes found on the reference string, which bounds the number
    /// of notes a question can ask for.
    fn distinct_reference_notes(&self) -> usize {
        let mut notes: Vec<Note> = vec![];
        if let Some(string) = self.fretboard.string(REFERENCE_STRING) {
            for note in string.notes() {
                if !notes.contains(note) {
                    notes.push(*note);
                }
            }
        }
        notes.len()
    }

    /// Sets the number of notes and strings of each question. The values are signed so that the
    /// numbers typed by the user can be checked as they are.
    pub fn set_config(&mut self, notes_wanted: i64, strings_wanted: i64) -> Result<(), GameError> {
        if self.state == GameState::Finished {
            return Err(GameError::GameFinished);
        }

        let num_strings = self.fretboard.num_strings();
        let strings = usize::try_from(strings_wanted)
            .ok()
            .filter(|n| (1..=num_strings).contains(n))
            .ok_or(GameError::InvalidConfig(
                "strings",
                strings_wanted,
                num_strings,
            ))?;

        // A string never holds more than twelve distinct notes, so asking for more notes than
        // that could never be satisfied even if the string has more frets.
        let max_notes = self
            .fretboard
            .string_length()
            .min(self.distinct_reference_notes());
        let notes = usize::try_from(notes_wanted)
            .ok()
            .filter(|n| (1..=max_notes).contains(n))
            .ok_or(GameError::InvalidConfig("notes", notes_wanted, max_notes))?;

        self.notes_wanted = notes;
        self.strings_wanted = strings;
        self.state = GameState::Configured;
        info!("configured find note game with {notes} note(s) across {strings} string(s)");
        Ok(())
    }

    /// Returns an error if the game is not in a stage in which questions can be asked.
    fn ensure_playable(&self) -> Result<(), GameError> {
        match self.state {
            GameState::Unconfigured => Err(GameError::NotConfigured),
            GameState::Finished => Err(GameError::GameFinished),
            _ => Ok(()),
        }
    }

    /// Builds a new question. Strings are picked uniformly among all the strings of the
    /// fretboard. Notes are picked by sampling frets of the reference string until enough
    /// distinct notes are found.
    pub fn build_challenge(&mut self) -> Result<Challenge, GameError> {
        self.ensure_playable()?;

        let num_strings = self.fretboard.num_strings();
        let mut strings = BTreeSet::new();
        while strings.len() < self.strings_wanted {
            strings.insert(self.index_source.next_index(num_strings) + 1);
        }

        let mut target_notes: Vec<Note> = vec![];
        while target_notes.len() < self.notes_wanted {
            let fret = self.index_source.next_index(self.fretboard.string_length());
            let note = self
                .fretboard
                .get_note_at(REFERENCE_STRING as i64, fret as i64)?;
            if !target_notes.contains(&note) {
                target_notes.push(note);
            }
        }

        let mut expected = Answer::new();
        for string_number in strings {
            let string = self
                .fretboard
                .string(string_number)
                .ok_or(FretboardError::InvalidString(
                    string_number as i64,
                    num_strings,
                ))?;
            let mut frets = BTreeMap::new();
            for note in &target_notes {
                frets.extend(string.find_note(*note));
            }
            expected.insert(string_number, frets);
        }

        debug!("built challenge for notes {target_notes:?} with answer {expected:?}");
        Ok(Challenge {
            target_notes,
            expected,
        })
    }

    /// Writes the question to the output.
    pub fn present_challenge(&mut self, challenge: &Challenge) -> Result<(), GameError> {
        let mut note_names: Vec<String> = challenge
            .target_notes
            .iter()
            .map(ToString::to_string)
            .collect();
        note_names.sort();
        note_names.dedup();

        let mut line = String::from("Find note(s) [ ");
        for name in &note_names {
            line.push_str(name);
            line.push(' ');
        }
        line.push_str("] across string(s) [ ");
        for string_number in challenge.expected.keys() {
            line.push_str(&format!("{string_number} "));
        }
        line.push_str("]\n");
        self.write_output(&line)
    }

    /// Parses the answer typed by the user for the given string. The answer is a list of fret
    /// numbers separated by commas. A blank answer means the notes are not found on the string.
    pub fn parse_answer(&self, raw: &str, string_number: usize) -> Result<Answer, GameError> {
        let mut frets = BTreeMap::new();
        if !raw.trim().is_empty() {
            for token in raw.split(',') {
                let token = token.trim();
                let fret: i64 = token
                    .parse()
                    .map_err(|e| GameError::ParseError(token.to_string(), e))?;
                let note = self
                    .fretboard
                    .get_note_at(string_number as i64, fret)
                    .map_err(|e| GameError::NoteNotFound(fret, e))?;

                // The lookup succeeded, so the fret is not negative.
                frets.insert(fret as usize, note);
            }
        }
        Ok(Answer::from([(string_number, frets)]))
    }

    /// Asks for and reads the answer for each string of the question, in ascending order.
    pub fn read_answer(&mut self, challenge: &Challenge) -> Result<Answer, GameError> {
        let mut answer = Answer::new();
        for string_number in challenge.expected.keys() {
            self.write_output(&format!(
                "Enter answer for string [{string_number}] (e.g., 3, 15): "
            ))?;
            let line = self.read_line()?;
            answer.extend(self.parse_answer(&line, *string_number)?);
        }
        Ok(answer)
    }

    /// Draws the fretboard with the expected notes highlighted on the expected strings.
    pub fn draw_answer(&self, expected: &Answer) -> Result<String, GameError> {
        let ignore_strings: BTreeSet<usize> = (1..=self.fretboard.num_strings())
            .filter(|string_number| !expected.contains_key(string_number))
            .collect();
        let mut notes: Vec<Note> = vec![];
        for note in expected.values().flat_map(BTreeMap::values) {
            if !notes.contains(note) {
                notes.push(*note);
            }
        }
        Ok(self.fretboard.draw(&notes, &ignore_strings)?)
    }

    /// Records the result of a question and writes it to the output.
    fn report_result(&mut self, expected: &Answer, correct: bool) -> Result<(), GameError> {
        self.stats.record_answer(correct);
        debug!("answer verified as {}", if correct { "correct" } else { "incorrect" });
        if correct {
            self.write_output("Correct! ✅\n")
        } else {
            let grid = self.draw_answer(expected)?;
            self.write_output(&format!(
                "Incorrect! ❌ - the correct answer was: [\n{grid}\n]\n"
            ))
        }
    }

    /// Reads one line of input, without its line ending.
    fn read_line(&mut self) -> Result<String, GameError> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(GameError::IO)?;
        if read == 0 {
            return Err(GameError::EndOfInput);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Reads one line of input as an integer.
    fn read_number(&mut self) -> Result<i64, GameError> {
        let line = self.read_line()?;
        let line = line.trim();
        line.parse()
            .map_err(|e| GameError::ParseError(line.to_string(), e))
    }

    /// Writes the text to the output and flushes it so that prompts are shown before reading.
    fn write_output(&mut self, text: &str) -> Result<(), GameError> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|()| self.output.flush())
            .map_err(GameError::IO)
    }
}

impl<R: BufRead, W: Write, S: IndexSource> Game for FindNoteGame<R, W, S> {
    fn configure(&mut self) -> Result<(), GameError> {
        if self.state == GameState::Finished {
            return Err(GameError::GameFinished);
        }
        self.write_output("How many notes do you want to find?: \n")?;
        let notes_wanted = self.read_number()?;
        self.write_output("Across how many strings do you want to find notes?: \n")?;
        let strings_wanted = self.read_number()?;
        self.set_config(notes_wanted, strings_wanted)
    }

    fn run_step(&mut self) -> Result<(), GameError> {
        let challenge = self.build_challenge()?;
        self.present_challenge(&challenge)?;
        self.state = GameState::AwaitingAnswer;

        let submitted = self.read_answer(&challenge)?;
        let correct = verify_answer(&challenge.expected, &submitted);
        self.report_result(&challenge.expected, correct)?;
        self.state = GameState::Verified;
        Ok(())
    }

    fn summary(&mut self) -> Result<(), GameError> {
        let summary = self.stats.summary();
        self.write_output(&summary)
    }

    fn quit(&mut self) {
        if self.state == GameState::Finished {
            return;
        }
        if let Err(e) = self.summary() {
            warn!("cannot write the game summary: {e}");
        }
        self.state = GameState::Finished;
        info!(
            "finished find note game after {} question(s)",
            self.stats.total_questions()
        );
    }
}

//! End-to-end tests of the find note game, driving it through its input and output streams.

use anyhow::Result;
use indoc::indoc;
use pretty_assertions::assert_eq;
use rand::{SeedableRng, rngs::StdRng};
use std::{
    collections::BTreeSet,
    io::{BufRead, Cursor},
    sync::atomic::AtomicBool,
};

use fretboard_games::{
    FindNoteGame, Fretboard, Tuning,
    game::{Game, GameState, IndexSource},
    practice_stats::PracticeStats,
    session::{SessionOutcome, run_session},
    testutil::{RecordedAnswers, ScriptedIndices},
};

/// The choices that select string 1 and the note at fret 2 of string 1, which is F#.
const F_SHARP_ON_FIRST_STRING: &[usize] = &[0, 2];

/// The drawing of the positions of F# on the first string of a 24-fret guitar.
const F_SHARP_GRID: &str = indoc! {"
    | 0  | 1  | 2  | 3  | 4  | 5  | 6  | 7  | 8  | 9  | 10 | 11 | 12 | 13 | 14 | 15 | 16 | 17 | 18 | 19 | 20 | 21 | 22 | 23 | 24 |
    | -  | -  | X  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | X  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  |
    | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  |
    | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  |
    | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  |
    | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  |
    | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  | -  |"};

type ScriptedGame = FindNoteGame<Cursor<Vec<u8>>, Vec<u8>, ScriptedIndices>;

/// Returns a game on a standard 24-fret guitar that reads the given input.
fn scripted_game(input: &str, indices: &[usize]) -> ScriptedGame {
    let fretboard = Fretboard::new(24, &Tuning::standard()).unwrap();
    FindNoteGame::new(
        fretboard,
        Cursor::new(input.as_bytes().to_vec()),
        vec![],
        ScriptedIndices::new(indices),
    )
}

fn output_of<R: BufRead, S: IndexSource>(game: &FindNoteGame<R, Vec<u8>, S>) -> String {
    String::from_utf8(game.output().clone()).unwrap()
}

/// Verifies a round answered correctly.
#[test]
fn correct_answer() -> Result<()> {
    let mut game = scripted_game("1\n1\n2,14\n", F_SHARP_ON_FIRST_STRING);
    game.configure()?;
    game.run_step()?;

    let output = output_of(&game);
    assert!(output.contains("Find note(s) [ F# ] across string(s) [ 1 ]\n"));
    assert!(output.contains("Enter answer for string [1] (e.g., 3, 15): Correct! ✅\n"));
    assert_eq!(game.stats().total_questions(), 1);
    assert_eq!(game.stats().correct_answers(), 1);
    assert_eq!(game.state(), GameState::Verified);
    Ok(())
}

/// Verifies that spaces around the frets are accepted.
#[test]
fn correct_answer_with_spaces() -> Result<()> {
    let mut game = scripted_game(" 14 ,  2\n", F_SHARP_ON_FIRST_STRING);
    game.set_config(1, 1)?;
    game.run_step()?;
    assert!(output_of(&game).ends_with("Correct! ✅\n"));
    Ok(())
}

/// Verifies that a wrong answer is followed by the drawing of the correct one.
#[test]
fn incorrect_answer() -> Result<()> {
    let mut game = scripted_game("2,13\n", F_SHARP_ON_FIRST_STRING);
    game.set_config(1, 1)?;
    game.run_step()?;

    let output = output_of(&game);
    assert!(output.contains("Find note(s) [ F# ] across string(s) [ 1 ]\n"));
    assert!(output.contains("Incorrect! ❌"));
    assert!(output.ends_with(&format!(
        "Incorrect! ❌ - the correct answer was: [\n{F_SHARP_GRID}\n]\n"
    )));
    assert_eq!(game.stats().total_questions(), 1);
    assert_eq!(game.stats().correct_answers(), 0);
    Ok(())
}

/// Verifies that the results of every round are reported to the stats.
#[test]
fn results_are_recorded() -> Result<()> {
    let fretboard = Fretboard::new(24, &Tuning::standard())?;
    let mut game = FindNoteGame::new(
        fretboard,
        Cursor::new(b"2,13\n2,14\n".to_vec()),
        Vec::<u8>::new(),
        ScriptedIndices::new(F_SHARP_ON_FIRST_STRING),
    )
    .with_stats(Box::new(RecordedAnswers::default()));
    game.set_config(1, 1)?;
    game.run_step()?;
    game.run_step()?;

    assert_eq!(game.stats().total_questions(), 2);
    assert_eq!(game.stats().correct_answers(), 1);
    assert_eq!(game.stats().correct_percentage(), 50);
    Ok(())
}

/// Verifies a round with several notes and strings.
#[test]
fn multiple_notes_and_strings() -> Result<()> {
    // Strings 1, 3, and 5, then the notes at frets 11 (D#), 0 (E), and 4 (G#) of string 1.
    let input = "11,23,0,12,24,4,16\n1,13,9,21,8,20\n6,18,7,19,11,23\n";
    let mut game = scripted_game(input, &[0, 2, 4, 11, 0, 4]);
    game.set_config(3, 3)?;
    game.run_step()?;

    let output = output_of(&game);
    assert!(output.contains("Find note(s) [ D# E G# ] across string(s) [ 1 3 5 ]\n"));
    assert!(output.contains("Enter answer for string [3] (e.g., 3, 15): "));
    assert!(output.ends_with("Correct! ✅\n"));
    Ok(())
}

/// Verifies that a malformed answer fails the round without recording it.
#[test]
fn malformed_answer() {
    let mut game = scripted_game("two\n", F_SHARP_ON_FIRST_STRING);
    game.set_config(1, 1).unwrap();
    assert!(game.run_step().is_err());
    assert_eq!(game.stats().total_questions(), 0);
}

/// Verifies that the same seed produces the same questions and that answering with the expected
/// positions is correct.
#[test]
fn seeded_games_repeat_questions() -> Result<()> {
    let fretboard = Fretboard::new(24, &Tuning::standard())?;
    let mut generator = FindNoteGame::with_seed(
        fretboard.clone(),
        Cursor::new(Vec::<u8>::new()),
        Vec::<u8>::new(),
        Some(1234),
    );
    generator.set_config(2, 3)?;
    let challenge = generator.build_challenge()?;
    assert_eq!(challenge.target_notes.len(), 2);
    assert_eq!(challenge.expected.len(), 3);

    let input: String = challenge
        .expected
        .values()
        .map(|frets| {
            let frets: Vec<String> = frets.keys().map(ToString::to_string).collect();
            format!("{}\n", frets.join(","))
        })
        .collect();
    let mut game = FindNoteGame::new(
        fretboard,
        Cursor::new(input.into_bytes()),
        Vec::<u8>::new(),
        StdRng::seed_from_u64(1234),
    );
    game.set_config(2, 3)?;
    game.run_step()?;
    assert!(output_of(&game).ends_with("Correct! ✅\n"));
    Ok(())
}

/// Verifies that every string, including the first, can be part of a question.
#[test]
fn all_strings_are_selected() -> Result<()> {
    let fretboard = Fretboard::new(24, &Tuning::standard())?;
    let mut game = FindNoteGame::new(
        fretboard,
        Cursor::new(Vec::<u8>::new()),
        Vec::<u8>::new(),
        StdRng::seed_from_u64(42),
    );
    game.set_config(1, 1)?;

    let mut selected = BTreeSet::new();
    for _ in 0..500 {
        let challenge = game.build_challenge()?;
        selected.extend(challenge.expected.keys().copied());
    }
    assert_eq!(selected, BTreeSet::from([1, 2, 3, 4, 5, 6]));
    Ok(())
}

/// Verifies that every position of every target note is expected on each selected string.
#[test]
fn challenges_cover_all_positions() -> Result<()> {
    let fretboard = Fretboard::new(24, &Tuning::standard())?;
    let mut game = FindNoteGame::new(
        fretboard.clone(),
        Cursor::new(Vec::<u8>::new()),
        Vec::<u8>::new(),
        StdRng::seed_from_u64(7),
    );
    game.set_config(4, 6)?;

    for _ in 0..20 {
        let challenge = game.build_challenge()?;
        let distinct: BTreeSet<String> =
            challenge.target_notes.iter().map(ToString::to_string).collect();
        assert_eq!(distinct.len(), 4);
        assert_eq!(challenge.expected.len(), 6);
        for (string_number, frets) in &challenge.expected {
            let string = fretboard.string(*string_number).unwrap();
            for (fret, note) in string.notes().iter().enumerate() {
                assert_eq!(
                    frets.contains_key(&fret),
                    challenge.target_notes.contains(note)
                );
            }
        }
    }
    Ok(())
}

/// Verifies a full session: configuration, two rounds, and the summary once the input ends.
#[test]
fn session_until_end_of_input() -> Result<()> {
    let mut game = scripted_game("1\n1\n2,13\n2,14\n", F_SHARP_ON_FIRST_STRING);
    game.configure()?;
    let mut notices: Vec<u8> = vec![];
    let outcome = run_session(&mut game, &AtomicBool::new(false), &mut notices);

    assert_eq!(outcome, SessionOutcome::EndOfInput);
    assert_eq!(game.state(), GameState::Finished);
    assert!(notices.is_empty());
    let output = output_of(&game);
    assert!(output.ends_with(indoc! {"
        =======================
        [Game Stats]
        Num of questions: 2
        Correct Answers: 1
        Result: 50%
        =======================
    "}));
    Ok(())
}

/// Verifies that step errors are reported and the session goes on to the next round.
#[test]
fn session_reports_errors() -> Result<()> {
    let mut game = scripted_game("30\n2,14\n", F_SHARP_ON_FIRST_STRING);
    game.set_config(1, 1)?;
    let mut notices: Vec<u8> = vec![];
    run_session(&mut game, &AtomicBool::new(false), &mut notices);

    assert_eq!(
        String::from_utf8(notices)?,
        "Error running game step: error note not found at fret number '30': fret '30' doesn't \
         exist, frets are numbered from 0 to 24\n"
    );
    assert_eq!(game.stats().total_questions(), 1);
    assert_eq!(game.stats().correct_answers(), 1);
    Ok(())
}

/// Verifies that an interrupted session prints the summary without asking more questions.
#[test]
fn interrupted_session() -> Result<()> {
    let mut game = scripted_game("2,14\n", F_SHARP_ON_FIRST_STRING);
    game.set_config(1, 1)?;
    let mut notices: Vec<u8> = vec![];
    let outcome = run_session(&mut game, &AtomicBool::new(true), &mut notices);

    assert_eq!(outcome, SessionOutcome::Interrupted);
    let output = output_of(&game);
    assert!(!output.contains("Find note(s)"));
    assert!(output.contains("Num of questions: 0\n"));
    assert!(output.contains("Result: 0%\n"));
    Ok(())
}

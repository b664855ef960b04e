// Command-line entry point for the fretboard games.
//
// Usage:
//   fretboard-games [findnote] [OPTIONS]
//     --frets <N>        Number of frets on each string (default: 24)
//     --tuning <NOTES>   Open notes from string 1 to the last one (default: E,B,G,D,A,E)
//     --seed <N>         Seed for the questions (default: random)
//     --config <FILE>    JSON file with the game options
//
// Flags given on the command line take precedence over the options file.

use anyhow::{Context, Result, anyhow, bail};
use indoc::indoc;
use log::info;
use std::{
    io,
    path::PathBuf,
    process,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use fretboard_games::{
    FindNoteGame, Fretboard, GameOptions, Tuning,
    game::Game,
    session::{SessionOutcome, run_session},
};

const USAGE: &str = indoc! {"
    Interactive guitar fretboard training games.

    Usage: fretboard-games [findnote] [OPTIONS]

    The find note game shows a challenge like \"Find note(s) [ A# D ] across string(s) [ 1 3 5 ]\".
    For each string, enter the frets where the notes are found as comma-separated numbers, for
    example \"3, 15\". Wrong answers are followed by a drawing of the fretboard with the correct
    positions. Press Ctrl+C to stop and see your results.

    Options:
      --frets <N>        Number of frets on each string (default: 24)
      --tuning <NOTES>   Open notes from string 1 to the last one (default: E,B,G,D,A,E)
      --seed <N>         Seed for the questions (default: random)
      --config <FILE>    JSON file with the game options
      --help, -h         Show this help
"};

/// The options given on the command line.
#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    help: bool,
    num_frets: Option<usize>,
    tuning: Option<Tuning>,
    seed: Option<u64>,
    config: Option<PathBuf>,
}

/// Parses the command-line arguments, not including the program name.
fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut cli = CliArgs::default();
    let mut iter = args.iter().peekable();

    // The game is optional since there's only one.
    if iter.peek().is_some_and(|arg| arg.as_str() == "findnote") {
        iter.next();
    }

    while let Some(arg) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .ok_or_else(|| anyhow!("{name} requires a value"))
        };
        match arg.as_str() {
            "--frets" => {
                let text = value("--frets")?;
                cli.num_frets = Some(
                    text.parse()
                        .with_context(|| format!("invalid number of frets '{text}'"))?,
                );
            }
            "--tuning" => cli.tuning = Some(value("--tuning")?.parse()?),
            "--seed" => {
                let text = value("--seed")?;
                cli.seed = Some(
                    text.parse()
                        .with_context(|| format!("invalid seed '{text}'"))?,
                );
            }
            "--config" => cli.config = Some(PathBuf::from(value("--config")?)),
            "--help" | "-h" => cli.help = true,
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(cli)
}

/// Merges the options file, if any, with the flags given on the command line.
fn game_options(cli: &CliArgs) -> Result<GameOptions> {
    let mut options = match &cli.config {
        Some(path) => GameOptions::from_file(path)?,
        None => GameOptions::default(),
    };
    if let Some(num_frets) = cli.num_frets {
        options.num_frets = num_frets;
    }
    if let Some(tuning) = &cli.tuning {
        options.tuning = tuning.clone();
    }
    if cli.seed.is_some() {
        options.seed = cli.seed;
    }
    Ok(options)
}

/// Configures and plays the find note game on the terminal until the user presses Ctrl+C.
fn play(options: &GameOptions) -> Result<SessionOutcome> {
    let fretboard = Fretboard::new(options.num_frets, &options.tuning)
        .context("cannot build the fretboard")?;

    let interrupted = Arc::new(AtomicBool::new(false));
    let handler_flag = interrupted.clone();
    ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst))
        .context("cannot install the interrupt handler")?;

    let mut game =
        FindNoteGame::with_seed(fretboard, io::stdin().lock(), io::stdout(), options.seed);
    game.configure().context("Error configuring the game")?;
    info!(
        "playing on {} strings with {} frets",
        options.tuning.notes().len(),
        options.num_frets
    );
    Ok(run_session(&mut game, &interrupted, &mut io::stdout()))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{e:#}");
            eprint!("{USAGE}");
            process::exit(1);
        }
    };
    if cli.help {
        print!("{USAGE}");
        return;
    }

    let result = game_options(&cli).and_then(|options| play(&options));
    if let Err(e) = result {
        println!("{e:#}");
        process::exit(1);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use fretboard_games::Note;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    /// Verifies parsing all the flags.
    #[test]
    fn parse_all_flags() -> Result<()> {
        let cli = parse_args(&args(&[
            "findnote", "--frets", "12", "--tuning", "D,A,F,C,G,C", "--seed", "1234", "--config",
            "options.json",
        ]))?;
        assert_eq!(
            cli,
            CliArgs {
                help: false,
                num_frets: Some(12),
                tuning: Some(Tuning(vec![
                    Note::D,
                    Note::A,
                    Note::F,
                    Note::C,
                    Note::G,
                    Note::C
                ])),
                seed: Some(1234),
                config: Some(PathBuf::from("options.json")),
            }
        );
        Ok(())
    }

    /// Verifies that the game name is optional.
    #[test]
    fn parse_without_game() -> Result<()> {
        assert_eq!(parse_args(&args(&[]))?, CliArgs::default());
        assert!(parse_args(&args(&["-h"]))?.help);
        Ok(())
    }

    /// Verifies that invalid flags are rejected.
    #[test]
    fn parse_invalid_flags() {
        assert!(parse_args(&args(&["--frets"])).is_err());
        assert!(parse_args(&args(&["--frets", "many"])).is_err());
        assert!(parse_args(&args(&["--seed", "-1"])).is_err());
        assert!(parse_args(&args(&["--tuning", "E,H"])).is_err());
        assert!(parse_args(&args(&["--strings", "3"])).is_err());
        assert!(parse_args(&args(&["findnote", "findnote"])).is_err());
    }

    /// Verifies that the command line overrides the defaults.
    #[test]
    fn options_from_flags() -> Result<()> {
        let cli = parse_args(&args(&["--frets", "15", "--seed", "3"]))?;
        let options = game_options(&cli)?;
        assert_eq!(options.num_frets, 15);
        assert_eq!(options.seed, Some(3));
        assert_eq!(options.tuning, Tuning::standard());

        let cli = parse_args(&args(&["findnote", "--tuning", "E,B,G,D,A,D"]))?;
        assert_eq!(game_options(&cli)?.tuning, Tuning::drop_d());
        Ok(())
    }
}

//! Runs a configured game until the user interrupts it or the input ends.
//!
//! The loop is cooperative: the interrupt flag is checked before every question, so an interrupt
//! received while waiting for an answer takes effect once that question is done. Quitting the game
//! is the only way out of the loop and always prints the summary.

use log::{info, warn};
use std::{
    io::Write,
    sync::atomic::{AtomicBool, Ordering},
};

use crate::{error::GameError, game::Game};

/// The reason a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The interrupt flag was set.
    Interrupted,

    /// The input stream was closed.
    EndOfInput,

    /// The game was already finished.
    Finished,
}

/// Runs steps of the game until the interrupt flag is set or the input ends. Errors in a step are
/// written to `notices` and the next step is started. The input of the failed step is not read
/// again.
pub fn run_session(
    game: &mut dyn Game,
    interrupted: &AtomicBool,
    notices: &mut dyn Write,
) -> SessionOutcome {
    info!("starting game session");
    let outcome = loop {
        if interrupted.load(Ordering::SeqCst) {
            let _ = writeln!(notices, "Interrupt received. Exiting the application...");
            break SessionOutcome::Interrupted;
        }

        match game.run_step() {
            Ok(()) => {}
            Err(GameError::EndOfInput) => break SessionOutcome::EndOfInput,
            Err(GameError::GameFinished) => break SessionOutcome::Finished,
            Err(e) => {
                warn!("game step failed: {e}");
                let _ = writeln!(notices, "Error running game step: {e}");
            }
        }
    };

    game.quit();
    info!("game session ended: {outcome:?}");
    outcome
}

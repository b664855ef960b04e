//! Defines the basic data structures used by the games: the musical notes and the options that
//! control how a game session is set up.

pub mod music;

use anyhow::{Context, Result};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

use crate::instrument::Tuning;

/// The number of frets of the fretboard used when none is given.
pub const DEFAULT_NUM_FRETS: usize = 24;

/// Options to control how the fretboard of a game session is built and how its questions are
/// generated.
#[derive(Builder, Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameOptions {
    /// The number of frets on each string, not counting the open string.
    #[builder(default = "DEFAULT_NUM_FRETS")]
    pub num_frets: usize,

    /// The open notes of the strings, starting with string 1.
    #[builder(default)]
    pub tuning: Tuning,

    /// The seed of the random number generator. A fixed seed makes a session repeat the same
    /// questions. If missing, the generator is seeded from the operating system.
    #[builder(default)]
    pub seed: Option<u64>,
}

impl Default for GameOptions {
    /// Returns the default game options.
    fn default() -> Self {
        GameOptions {
            num_frets: DEFAULT_NUM_FRETS,
            tuning: Tuning::standard(),
            seed: None,
        }
    }
}

impl GameOptions {
    /// Reads the options from the JSON file at the given path. Missing fields take their default
    /// values.
    pub fn from_file(path: &Path) -> Result<GameOptions> {
        let file = File::open(path)
            .with_context(|| format!("cannot open game options file {}", path.display()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("cannot parse game options from {}", path.display()))
    }
}

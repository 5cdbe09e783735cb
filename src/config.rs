//! Command line and environment configuration.
//!
//! Grid size, tick rate and scoring are compile-time constants; only the
//! session seed and the journal location can be chosen at start-up.

use std::path::PathBuf;

use clap::Parser;
use rand::Rng;

/// Falling-block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "tetris",
    version,
    about = "Falling-block puzzle in the terminal.",
    long_about = "Falling-block puzzle in the terminal.\n\n\
        CONTROLS:\n  A/Left  Move left   D/Right  Move right   S/Down  Soft drop\n  \
        W/Up    Rotate      R        Restart      Q/Esc   Quit"
)]
pub struct Args {
    /// Seed for the piece generator. A random seed is used when omitted.
    #[arg(long, env = "TETRIS_SEED", value_name = "SEED")]
    pub seed: Option<u32>,

    /// Append one JSON line per game transition to this file.
    #[arg(long, env = "TETRIS_LOG_PATH", value_name = "FILE")]
    pub log: Option<PathBuf>,
}

impl Args {
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| rand::thread_rng().gen())
    }
}

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use mineterm_core::{Difficulty, Game};
use rand::SeedableRng;
use rand::rngs::SmallRng;

mod app;
mod bootstrap;
mod error;
mod logger;
mod ui;

use app::Mode;
use error::AppError;

/// Difficulty presets selectable from the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl From<Preset> for Difficulty {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Beginner => Difficulty::Beginner,
            Preset::Intermediate => Difficulty::Intermediate,
            Preset::Expert => Difficulty::Expert,
        }
    }
}

/// Minesweeper in the terminal
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Use a preset board instead of prompting
    #[arg(short, long, value_enum, conflicts_with_all = ["size", "mines"])]
    difficulty: Option<Preset>,

    /// Grid side length
    #[arg(long, requires = "mines", allow_negative_numbers = true)]
    size: Option<i64>,

    /// Number of mines, less than size squared
    #[arg(long, requires = "size", allow_negative_numbers = true)]
    mines: Option<i64>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Move a cursor with the keyboard, or type `row,col` coordinates
    #[arg(short, long, value_enum, default_value_t = Mode::Cursor)]
    mode: Mode,

    /// Append log records to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn run(args: Args) -> Result<(), AppError> {
    if let Some(path) = &args.log_file {
        logger::init(path, args.verbose.log_level_filter())?;
    }

    let config = match (args.difficulty, args.size, args.mines) {
        (Some(preset), _, _) => Difficulty::from(preset).config(),
        (None, Some(size), Some(mines)) => mineterm_core::GameConfig::from_raw(size, mines)?,
        _ => bootstrap::prompt_config(&mut std::io::stdin().lock(), &mut std::io::stdout())?,
    };

    let seed = args.seed.unwrap_or_else(bootstrap::time_seed);
    log::debug!("seed: {}, config: {:?}, mode: {:?}", seed, config, args.mode);

    let mut rng = SmallRng::seed_from_u64(seed);
    let game = Game::generate(config, &mut rng)?;
    app::run(game, args.mode)
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

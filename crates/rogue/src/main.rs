//! rogue: generate, inspect and resume dungeon levels
//!
//! Prints levels as plain text or JSON. Runs are saved as seed tables and
//! regenerated on resume.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rogue_core::{ConfigError, Difficulty, GenerationOptions, Level, RunSeeds, MAX_LEVELS};
use rogue_save::{
    default_save_path, load_game, resume_game, save_game, SaveError, SaveRecord, Session,
};

/// Dungeon level generator
#[derive(Parser, Debug)]
#[command(name = "rogue")]
#[command(author, version, about = "Generate and explore dungeon levels", long_about = None)]
struct Cli {
    /// Debug logging (RUST_LOG still wins)
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a single level from a seed
    Generate {
        /// Level seed
        #[arg(short = 's', long = "seed", default_value_t = 42)]
        seed: u64,

        /// 1-based level number
        #[arg(short = 'l', long = "level", default_value_t = 1)]
        level: u32,

        #[command(flatten)]
        view: ViewArgs,

        #[command(flatten)]
        generation: GenerationArgs,
    },

    /// Start a run and write its save file
    NewRun {
        /// Player name, also names the save file
        #[arg(short = 'u', long = "name", default_value = "player")]
        name: String,

        /// Master seed (random when omitted)
        #[arg(short = 's', long = "seed")]
        seed: Option<u64>,

        /// Save file (defaults to the user data directory)
        #[arg(long = "save")]
        save: Option<PathBuf>,

        #[command(flatten)]
        view: ViewArgs,

        #[command(flatten)]
        generation: GenerationArgs,
    },

    /// Regenerate the active level of a saved run
    Resume {
        #[arg(short = 'u', long = "name", default_value = "player")]
        name: String,

        #[arg(long = "save")]
        save: Option<PathBuf>,

        /// Move the run to this level before regenerating
        #[arg(long = "descend")]
        descend: Option<u32>,

        #[command(flatten)]
        view: ViewArgs,

        /// Generation options file (JSON or OPTIONS= lines)
        #[arg(short = 'o', long = "options")]
        options: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Print the level as JSON instead of a map
    #[arg(long = "json")]
    json: bool,

    /// Show the whole map instead of what the player has seen
    #[arg(long = "reveal")]
    reveal: bool,
}

#[derive(Args, Debug)]
struct GenerationArgs {
    /// Difficulty modifier, 0.5 (hard) to 1.5 (easy)
    #[arg(short = 'd', long = "difficulty", default_value_t = 1.0)]
    difficulty: f64,

    /// Generation options file (JSON or OPTIONS= lines)
    #[arg(short = 'o', long = "options")]
    options: Option<PathBuf>,

    /// Disable the locked door puzzle
    #[arg(long = "no-doors")]
    no_doors: bool,

    /// Place unlocked doors instead of a puzzle
    #[arg(long = "cosmetic-doors")]
    cosmetic_doors: bool,

    /// Disable mimics
    #[arg(long = "no-mimics")]
    no_mimics: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Level {0} is outside 1..={MAX_LEVELS}")]
    LevelOutOfRange(u32),
}

impl GenerationArgs {
    fn difficulty(&self) -> Result<Difficulty, ConfigError> {
        Difficulty::strict(self.difficulty)
    }

    fn options(&self) -> Result<GenerationOptions, ConfigError> {
        let mut options = match &self.options {
            Some(path) => load_options(path)?,
            None => GenerationOptions::default(),
        };
        if self.no_doors {
            options.doors = false;
        }
        if self.cosmetic_doors {
            options.cosmetic_doors = true;
        }
        if self.no_mimics {
            options.mimics = false;
        }
        options.validate()?;
        Ok(options)
    }
}

fn load_options(path: &Path) -> Result<GenerationOptions, ConfigError> {
    if path.extension().is_some_and(|e| e == "json") {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let options: GenerationOptions = serde_json::from_str(&contents)
            .map_err(|e| ConfigError::InvalidValue(path.display().to_string(), e.to_string()))?;
        options.validate()?;
        Ok(options)
    } else {
        GenerationOptions::load_from_file(path)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Look around from the start room and print the level
fn show(level: &mut Level, view: &ViewArgs) -> Result<(), CliError> {
    if let Some(center) = level.start_room().map(|r| r.center()) {
        level.update_visibility(center);
    }
    if view.json {
        println!("{}", serde_json::to_string_pretty(level)?);
    } else {
        println!("{}", level.render(view.reveal));
        println!(
            "level {} seed {} rooms {} doors {} keys {}",
            level.number,
            level.seed,
            level.rooms.len(),
            level.doors().len(),
            level.keys().count()
        );
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Generate {
            seed,
            level,
            view,
            generation,
        } => {
            if level == 0 || level as usize > MAX_LEVELS {
                return Err(CliError::LevelOutOfRange(level));
            }
            let options = generation.options()?;
            let mut level = rogue_core::generate(level, seed, generation.difficulty()?, &options);
            show(&mut level, &view)
        }
        Command::NewRun {
            name,
            seed,
            save,
            view,
            generation,
        } => {
            let options = generation.options()?;
            let seeds = match seed {
                Some(seed) => RunSeeds::new(seed),
                None => RunSeeds::from_entropy(),
            };
            let mut session = Session::new(name.clone(), generation.difficulty()?);
            let record = SaveRecord::new(session.clone(), seeds)?;
            let mut level = record.regenerate(&options);
            if let Some(start) = level.start_room() {
                session.player_position = start.center();
            }

            let record = SaveRecord { session, ..record };
            let path = save.unwrap_or_else(|| default_save_path(&name));
            save_game(&record, &path)?;
            info!(path = %path.display(), "started new run");
            show(&mut level, &view)
        }
        Command::Resume {
            name,
            save,
            descend,
            view,
            options,
        } => {
            let path = save.unwrap_or_else(|| default_save_path(&name));
            let options = match options {
                Some(file) => load_options(&file)?,
                None => GenerationOptions::default(),
            };
            let mut level = match descend {
                Some(number) => {
                    let mut record = load_game(&path)?;
                    record.descend_to(number)?;
                    let level = record.regenerate(&options);
                    if let Some(start) = level.start_room() {
                        record.session.player_position = start.center();
                    }
                    save_game(&record, &path)?;
                    level
                }
                None => resume_game(&path, &options)?.1,
            };
            show(&mut level, &view)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

//! Skirmish - Entry Point
//!
//! Sets up logging and the random source, then runs one console game:
//! stat entry, rounds of turns, final ranking.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use skirmish::core::config::{load_config, GameConfig};
use skirmish::core::error::{Result, SkirmishError};
use skirmish::engine::play;
use skirmish::ui::{Presenter, TerminalConsole, Transcript};

/// Three-way turn-based battle: knight, mage and robot
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(about = "Turn-based console battle between a knight, a mage and a robot")]
struct Args {
    /// Random seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding class rules and preset stats
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read answers from this file instead of the keyboard
    #[arg(long)]
    script: Option<PathBuf>,

    /// Write every game event as JSON Lines to this file
    #[arg(long)]
    transcript: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "skirmish=debug"
    } else {
        "skirmish=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(SkirmishError::InputClosed) => {
            eprintln!("\nInput closed, game abandoned.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!("Using seed {}", seed);
    let rng = ChaCha8Rng::seed_from_u64(seed);

    let console: Box<dyn Presenter> = match &args.script {
        Some(path) => Box::new(
            TerminalConsole::new(BufReader::new(File::open(path)?), std::io::stdout())
                .with_echo(true),
        ),
        None => Box::new(TerminalConsole::stdio()),
    };

    match &args.transcript {
        Some(path) => {
            let sink = BufWriter::new(File::create(path)?);
            let mut presenter = Transcript::new(console, sink);
            play(config, rng, &mut presenter)?;
            let (_, mut sink) = presenter.into_parts();
            std::io::Write::flush(&mut sink)?;
        }
        None => {
            let mut presenter = console;
            play(config, rng, &mut presenter)?;
        }
    }

    Ok(())
}

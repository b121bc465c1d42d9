//! Sliding Tile Puzzle Solver
//!
//! Scrambles an N×N sliding puzzle with a random walk from the ordered
//! board, then finds a shortest sequence of slides back with A* and prints
//! or animates it.

mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use slidetile::config::PuzzleConfig;
use slidetile::playback::{Playback, Player};
use slidetile::session::Session;
use slidetile::{neighbors, ConfigError, PuzzleError, PuzzleState, Solution};

use render::{render_solution, render_state, Numerals};

/// Config file read from the working directory when `--config` is absent.
const DEFAULT_CONFIG: &str = "slidetile.toml";

/// Scrambles and optimally solves N×N sliding tile puzzles.
#[derive(Parser)]
#[command(name = "slidetile")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// TOML config file (defaults to ./slidetile.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Grid dimension N.
    #[arg(short, long, global = true)]
    size: Option<usize>,

    /// Seed for reproducible scrambles.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Fewest random slides in a scramble.
    #[arg(long, global = true)]
    min_moves: Option<u32>,

    /// Most random slides in a scramble.
    #[arg(long, global = true)]
    max_moves: Option<u32>,

    /// Give up solving after this many milliseconds.
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Digits used when printing tiles.
    #[arg(long, global = true, value_enum, default_value_t = Numerals::Arabic)]
    numerals: Numerals,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Print a scrambled puzzle and the number of random slides used.
    Shuffle,
    /// Solve a puzzle and print every step.
    Solve {
        /// Start state, e.g. "1 2 3 4 5 6 7 _ 8"; a fresh scramble if omitted.
        #[arg(long)]
        state: Option<String>,
    },
    /// Solve a puzzle and animate the solution in the terminal.
    Play {
        #[arg(long)]
        state: Option<String>,
        /// Delay between frames, overriding the config.
        #[arg(long)]
        interval_ms: Option<u64>,
    },
    /// List the states one slide away from a state.
    Neighbors {
        #[arg(long)]
        state: String,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Puzzle(PuzzleError::NoSolutionFound)) => {
            eprintln!("No solution found: the puzzle is not reachable from the goal.");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Installs the log subscriber; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = load_config(cli)?;
    let mut session = Session::new(&config)?;

    match &cli.command {
        Some(Command::Shuffle) => run_shuffle(&mut session, cli.numerals),
        Some(Command::Solve { state }) => {
            let solution = run_solver(&mut session, cli, state.as_deref())?;
            print!("{}", render_solution(&solution, cli.numerals));
            Ok(())
        }
        Some(Command::Play { state, interval_ms }) => {
            let solution = run_solver(&mut session, cli, state.as_deref())?;
            let interval = interval_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| config.playback.interval());
            run_play(&solution, interval, cli.numerals);
            session.apply(&solution);
            Ok(())
        }
        Some(Command::Neighbors { state }) => run_neighbors(state, cli.numerals),
        None => {
            // default: shuffle, solve, print
            let solution = run_solver(&mut session, cli, None)?;
            print!("{}", render_solution(&solution, cli.numerals));
            Ok(())
        }
    }
}

/// Reads the config file, then applies command line overrides.
fn load_config(cli: &Cli) -> Result<PuzzleConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => PuzzleConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => PuzzleConfig::load(DEFAULT_CONFIG)?,
        None => PuzzleConfig::default(),
    };

    if let Some(size) = cli.size {
        config.size = size;
    }
    if let Some(seed) = cli.seed {
        config.shuffle.seed = Some(seed);
    }
    if let Some(min_moves) = cli.min_moves {
        config.shuffle.min_moves = min_moves;
    }
    if let Some(max_moves) = cli.max_moves {
        config.shuffle.max_moves = max_moves;
    }

    config.validate()?;
    Ok(config)
}

fn run_shuffle(session: &mut Session, numerals: Numerals) -> Result<(), CliError> {
    let moves = session.shuffle();
    print!("{}", render_state(session.current(), numerals));
    println!("Moves: {moves}");
    Ok(())
}

/// Picks the start state (parsed or freshly scrambled) and solves it.
fn run_solver(
    session: &mut Session,
    cli: &Cli,
    state: Option<&str>,
) -> Result<Solution, CliError> {
    match state {
        Some(text) => {
            let start: PuzzleState = text.parse()?;
            session.resize(start.size())?;
            session.set_current(start)?;
        }
        None => {
            let moves = session.shuffle();
            println!("Shuffled with {moves} moves:");
            print!("{}", render_state(session.current(), cli.numerals));
            println!();
        }
    }

    let solution = match cli.timeout_ms {
        Some(timeout_ms) => session.solve_within(Duration::from_millis(timeout_ms))?,
        None => session.solve()?,
    };

    println!(
        "Solved in {} moves ({} states expanded)",
        solution.moves(),
        solution.stats.expanded
    );
    Ok(solution)
}

/// Animates a solution, redrawing the grid for each frame.
fn run_play(solution: &Solution, interval: Duration, numerals: Numerals) {
    let total = solution.moves();
    let (handle, frames) = Playback::start(Player::from_solution(solution), interval);

    for frame in frames {
        // clear screen and home the cursor
        print!("\x1b[2J\x1b[H");
        print!("{}", render_state(&frame.state, numerals));
        println!("Step {}/{}", frame.step, total);
    }

    handle.join();
}

fn run_neighbors(state: &str, numerals: Numerals) -> Result<(), CliError> {
    let state: PuzzleState = state.parse()?;
    for next in neighbors(&state) {
        print!("{}", render_state(&next, numerals));
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("slidetile").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = parse(&["--size", "4", "--seed", "3", "--min-moves", "1", "--max-moves", "2"]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.size, 4);
        assert_eq!(config.shuffle.seed, Some(3));
        assert_eq!((config.shuffle.min_moves, config.shuffle.max_moves), (1, 2));
    }

    #[test]
    fn test_cli_rejects_bad_size() {
        let cli = parse(&["--size", "1", "shuffle"]);
        assert!(matches!(load_config(&cli), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_solve_given_state() {
        let cli = parse(&["solve", "--state", "1 2 3 4 5 6 _ 7 8"]);
        let config = load_config(&cli).unwrap();
        let mut session = Session::new(&config).unwrap();
        let solution = run_solver(&mut session, &cli, Some("1 2 3 4 5 6 _ 7 8")).unwrap();
        assert_eq!(solution.moves(), 2);
    }

    #[test]
    fn test_solve_seeded_scramble_is_reproducible() {
        let cli = parse(&["--seed", "5", "--size", "3"]);
        let config = load_config(&cli).unwrap();

        let mut first = Session::new(&config).unwrap();
        let mut second = Session::new(&config).unwrap();
        let a = run_solver(&mut first, &cli, None).unwrap();
        let b = run_solver(&mut second, &cli, None).unwrap();
        assert_eq!(a.path, b.path);
    }
}

//! Cube State
//!
//! Command-line front end for the 3x3x3 cube engine: print the cube after a
//! move sequence, generate scrambles, show saved statistics, or play in an
//! interactive 3D viewer.

mod visualization;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cubestate::notation::{self, Step};
use cubestate::session::{DEFAULT_SCRAMBLE_LENGTH, DEFAULT_STATS_PATH};
use cubestate::{engine, grid, persistence, Cube, Session, SessionConfig};

/// Plays with a 3x3x3 Rubik's cube.
#[derive(Parser)]
#[command(name = "cubestate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File where solve statistics are kept.
    #[arg(long, global = true, default_value = DEFAULT_STATS_PATH)]
    stats_file: PathBuf,

    /// Number of random moves in a scramble.
    #[arg(long, global = true, default_value_t = DEFAULT_SCRAMBLE_LENGTH)]
    scramble_length: usize,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Apply a move sequence to a solved cube and print the result.
    Apply {
        /// Moves such as `R U R' U'`; whole-cube rotations are `x y z`.
        moves: Vec<String>,
    },
    /// Generate a random scramble and print it with the resulting cube.
    Scramble {
        /// Seed for a reproducible scramble.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show saved solve statistics.
    Stats,
    /// Open the interactive 3D cube.
    View,
}

fn main() -> ExitCode {
    env_logger::builder()
        .filter_module(
            "cubestate",
            if cfg!(debug_assertions) {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Warn
            },
        )
        .init();

    let cli = Cli::parse();
    let config = SessionConfig {
        scramble_length: cli.scramble_length,
        stats_path: cli.stats_file,
    };

    match cli.command {
        Some(Command::Apply { moves }) => run_apply(&moves.join(" ")),
        Some(Command::Scramble { seed }) => {
            run_scramble(config, seed);
            ExitCode::SUCCESS
        }
        Some(Command::Stats) => run_stats(&config.stats_path),
        Some(Command::View) | None => {
            println!("Controls: R L U D F B M E S turn (Shift reverses), arrows rotate,");
            println!("          Space scramble, Backspace reset, Z undo");
            visualization::display(config);
            ExitCode::SUCCESS
        }
    }
}

/// Applies a sequence of steps to a cube.
fn apply_steps(cube: Cube, steps: &[Step]) -> Cube {
    steps.iter().fold(cube, |cube, step| match *step {
        Step::Twist(twist) => twist.apply(&cube),
        Step::Rotate(axis, direction) => engine::rotate_whole_cube(&cube, axis, direction),
    })
}

/// Prints the cube after `moves`.
fn run_apply(moves: &str) -> ExitCode {
    let steps = match notation::parse_sequence(moves) {
        Ok(steps) => steps,
        Err(e) => {
            eprintln!("Invalid move sequence: {e}");
            return ExitCode::FAILURE;
        }
    };

    let cube = apply_steps(Cube::solved(), &steps);
    print!("{}", grid::format_cube(&cube));
    println!("Solved: {}", if cube.is_solved() { "yes" } else { "no" });
    ExitCode::SUCCESS
}

/// Prints a scramble and the cube it produces.
fn run_scramble(config: SessionConfig, seed: Option<u64>) {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut session = Session::new(config);
    let steps: Vec<Step> = session
        .scramble(&mut rng)
        .into_iter()
        .map(Step::Twist)
        .collect();

    println!("{}", notation::format_sequence(&steps));
    print!("{}", grid::format_cube(session.cube()));
}

/// Prints the saved statistics.
fn run_stats(path: &Path) -> ExitCode {
    match persistence::load(path) {
        Some(stats) => {
            print!("{}", persistence::format_summary(&stats));
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("No stats found at {}. Solve a cube in the viewer first.", path.display());
            ExitCode::FAILURE
        }
    }
}

//! Sliding Tile Puzzle Solver Library
//!
//! Provides the combinatorial core of the N×N sliding puzzle: the state
//! model, legal move generation, a Manhattan-distance A* search that returns
//! optimal solutions, and a random-walk scrambler that only produces
//! solvable states.

pub mod config;
pub mod error;
pub mod grid;
pub mod heuristic;
pub mod moves;
pub mod path;
pub mod playback;
pub mod search;
pub mod session;
pub mod shuffle;
pub mod state;
pub mod worker;

pub use error::{ConfigError, PuzzleError};
pub use grid::Direction;
pub use moves::neighbors;
pub use search::{solve, Solution};
pub use shuffle::{shuffle, Shuffled};
pub use state::{PuzzleState, BLANK};

/// Returns the goal state for an `size`×`size` puzzle.
///
/// # Errors
///
/// `InvalidConfiguration` unless `2 <= size <= 16`.
pub fn configure(size: usize) -> Result<PuzzleState, PuzzleError> {
    PuzzleState::goal(size)
}

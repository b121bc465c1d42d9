//! Session state owned by a presentation layer.
//!
//! The core functions are pure; a `Session` holds the one mutable "current
//! puzzle" and its move counter and updates them from core return values.

use std::time::Duration;

use crate::config::{PuzzleConfig, SearchConfig};
use crate::error::{ConfigError, PuzzleError};
use crate::grid::Direction;
use crate::moves::{slide, slide_tile};
use crate::search::{Solution, Solver};
use crate::shuffle::Shuffler;
use crate::state::{check_size, PuzzleState};
use crate::worker::spawn_solve;

#[derive(Debug, Clone)]
pub struct Session {
    goal: PuzzleState,
    current: PuzzleState,
    /// Moves shown to the player: shuffle length, manual slides, or the
    /// length of the last solution.
    moves: usize,
    shuffler: Shuffler,
    search: SearchConfig,
}

impl Session {
    /// Starts a session on the ordered puzzle.
    pub fn new(config: &PuzzleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let goal =
            PuzzleState::goal(config.size).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(Self {
            current: goal.clone(),
            goal,
            moves: 0,
            shuffler: Shuffler::new(config.shuffle)?,
            search: config.search,
        })
    }

    pub fn goal(&self) -> &PuzzleState {
        &self.goal
    }

    pub fn current(&self) -> &PuzzleState {
        &self.current
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn size(&self) -> usize {
        self.goal.size()
    }

    pub fn is_solved(&self) -> bool {
        self.current == self.goal
    }

    /// Returns to the ordered puzzle and clears the counter.
    pub fn reset(&mut self) {
        self.current = self.goal.clone();
        self.moves = 0;
    }

    /// Switches to a new grid size, starting from the ordered puzzle.
    pub fn resize(&mut self, size: usize) -> Result<(), PuzzleError> {
        check_size(size)?;
        self.goal = PuzzleState::goal(size)?;
        self.reset();
        Ok(())
    }

    /// Scrambles from the ordered puzzle; the counter shows the walk length.
    pub fn shuffle(&mut self) -> u32 {
        let shuffled = self.shuffler.shuffle(&self.goal);
        self.current = shuffled.state;
        self.moves = shuffled.moves as usize;
        shuffled.moves
    }

    /// Replaces the current state, e.g. with one entered by the player.
    pub fn set_current(&mut self, state: PuzzleState) -> Result<(), PuzzleError> {
        if state.size() != self.size() {
            return Err(PuzzleError::SizeMismatch {
                left: state.size(),
                right: self.size(),
            });
        }
        self.current = state;
        self.moves = 0;
        Ok(())
    }

    /// Slides the tile at `index` into the blank. Returns `false` if that
    /// tile cannot move.
    pub fn slide_tile(&mut self, index: usize) -> bool {
        self.advance(slide_tile(&self.current, index))
    }

    /// Moves the blank one cell. Returns `false` at the grid edge.
    pub fn slide(&mut self, direction: Direction) -> bool {
        self.advance(slide(&self.current, direction))
    }

    fn advance(&mut self, next: Option<PuzzleState>) -> bool {
        match next {
            Some(state) => {
                self.current = state;
                self.moves += 1;
                true
            }
            None => false,
        }
    }

    /// Solves from the current state; the counter shows the solution length.
    ///
    /// The current state is left alone so the caller can play the path
    /// back before calling [`Session::apply`].
    pub fn solve(&mut self) -> Result<Solution, PuzzleError> {
        let solution = Solver::new(self.search).solve(&self.current, &self.goal)?;
        self.moves = solution.moves();
        Ok(solution)
    }

    /// Like [`Session::solve`], but runs the search on a worker thread and
    /// cancels it after `timeout`.
    pub fn solve_within(&mut self, timeout: Duration) -> Result<Solution, PuzzleError> {
        let task = spawn_solve(self.current.clone(), self.goal.clone(), self.search);
        let solution = task.wait_timeout(timeout)?;
        self.moves = solution.moves();
        Ok(solution)
    }

    /// Jumps to the end of a solution's path.
    pub fn apply(&mut self, solution: &Solution) {
        if let Some(last) = solution.final_state() {
            self.current = last.clone();
        }
    }
}

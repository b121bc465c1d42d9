//! Manhattan distance heuristic.
//!
//! The sum over all tiles of the L1 grid distance between a tile's cell and
//! its goal cell. Each slide moves exactly one tile by one cell, so the
//! estimate changes by at most one per move: it is admissible and
//! consistent, which keeps A* optimal.

use crate::error::PuzzleError;
use crate::grid::cell_distance;
use crate::state::{PuzzleState, BLANK};

/// Manhattan distance to a fixed goal, with the goal's tile positions
/// precomputed.
#[derive(Debug, Clone)]
pub struct Manhattan {
    size: usize,
    /// `goal_index[tile]` is the cell the tile occupies in the goal.
    goal_index: Vec<usize>,
}

impl Manhattan {
    pub fn new(goal: &PuzzleState) -> Self {
        let mut goal_index = vec![0; goal.cells().len()];
        for (index, &tile) in goal.cells().iter().enumerate() {
            goal_index[tile as usize] = index;
        }
        Self {
            size: goal.size(),
            goal_index,
        }
    }

    /// Estimated number of moves from `state` to the goal.
    ///
    /// `state` must have the same grid size as the goal.
    #[inline]
    pub fn estimate(&self, state: &PuzzleState) -> u32 {
        debug_assert_eq!(state.size(), self.size);
        state
            .cells()
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| tile != BLANK)
            .map(|(index, &tile)| cell_distance(index, self.goal_index[tile as usize], self.size))
            .sum::<usize>() as u32
    }
}

/// One-shot Manhattan distance between `state` and `goal`.
pub fn manhattan_distance(state: &PuzzleState, goal: &PuzzleState) -> Result<u32, PuzzleError> {
    if state.size() != goal.size() {
        return Err(PuzzleError::SizeMismatch {
            left: state.size(),
            right: goal.size(),
        });
    }
    Ok(Manhattan::new(goal).estimate(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::neighbors;

    fn state(s: &str) -> PuzzleState {
        s.parse().unwrap()
    }

    fn h(state: &PuzzleState, goal: &PuzzleState) -> u32 {
        manhattan_distance(state, goal).unwrap()
    }

    #[test]
    fn test_goal_is_zero() {
        for size in 2..=6 {
            let goal = PuzzleState::goal(size).unwrap();
            assert_eq!(h(&goal, &goal), 0);
        }
    }

    #[test]
    fn test_known_values() {
        let goal = PuzzleState::goal(3).unwrap();
        assert_eq!(h(&state("1 2 3 4 5 6 7 _ 8"), &goal), 1);
        // 8 6 7 / 2 5 4 / 3 _ 1 is one of the two hardest 3x3 states
        assert_eq!(h(&state("8 6 7 2 5 4 3 _ 1"), &goal), 21);
        // the blank does not contribute
        assert_eq!(h(&state("_ 1 2 3 4 5 6 7 8"), &goal), 12);
    }

    #[test]
    fn test_against_non_canonical_goal() {
        let goal = state("_ 1 2 3");
        let start = PuzzleState::goal(2).unwrap();
        // 1: 0 -> 1, 2: 1 -> 2, 3: 2 -> 3
        assert_eq!(h(&start, &goal), 1 + 2 + 1);
    }

    #[test]
    fn test_size_mismatch() {
        let goal = PuzzleState::goal(3).unwrap();
        assert_eq!(
            manhattan_distance(&PuzzleState::goal(2).unwrap(), &goal),
            Err(PuzzleError::SizeMismatch { left: 2, right: 3 })
        );
    }

    #[test]
    fn test_consistent_across_moves() {
        let goal = PuzzleState::goal(4).unwrap();
        let heuristic = Manhattan::new(&goal);
        let start = state("5 1 3 4 2 _ 7 8 9 6 10 12 13 14 11 15");
        for next in neighbors(&start) {
            let (before, after) = (heuristic.estimate(&start), heuristic.estimate(&next));
            assert_eq!(before.abs_diff(after), 1);
        }
    }
}

//! Legal move generation.
//!
//! A move swaps the blank with an orthogonally adjacent tile. Every move is
//! its own inverse, so the reachable set of a state is closed under
//! [`neighbors`].

use crate::error::PuzzleError;
use crate::grid::{cell_distance, idx_to_coord, step, Direction};
use crate::state::{PuzzleState, BLANK};

/// Returns the state reached by moving the blank in `direction`.
///
/// Returns `None` if the blank is on the edge it would cross.
pub fn slide(state: &PuzzleState, direction: Direction) -> Option<PuzzleState> {
    let target = step(state.blank_index(), direction, state.size())?;
    Some(state.with_blank_at(target))
}

/// Returns every state one slide away, paired with the blank's direction.
///
/// Order is fixed: Up, Down, Left, Right (skipping those off the grid).
pub fn successors(state: &PuzzleState) -> impl Iterator<Item = (Direction, PuzzleState)> + '_ {
    Direction::ALL
        .into_iter()
        .filter_map(move |direction| slide(state, direction).map(|next| (direction, next)))
}

/// Returns all states reachable by one legal slide.
///
/// Yields 2 states with the blank in a corner, 3 on an edge, 4 otherwise.
pub fn neighbors(state: &PuzzleState) -> Vec<PuzzleState> {
    successors(state).map(|(_, next)| next).collect()
}

/// Slides the tile at `index` into the blank, as a player clicking a tile
/// would.
///
/// Returns `None` if `index` is the blank, is off the grid, or is not
/// adjacent to the blank.
pub fn slide_tile(state: &PuzzleState, index: usize) -> Option<PuzzleState> {
    let size = state.size();
    let blank = state.blank_index();
    if index >= size * size || cell_distance(index, blank, size) != 1 {
        return None;
    }
    Some(state.with_blank_at(index))
}

/// Returns the direction that turns `from` into `to`, if they are one
/// slide apart.
pub fn move_between(from: &PuzzleState, to: &PuzzleState) -> Option<Direction> {
    if from.size() != to.size() {
        return None;
    }
    successors(from).find_map(|(direction, next)| (next == *to).then_some(direction))
}

/// Counts pairs of tiles that appear in the opposite order of `goal`.
fn count_inversions(state: &PuzzleState, goal: &PuzzleState) -> usize {
    // rank each tile by its goal position so any goal ordering works
    let mut rank = vec![0usize; goal.cells().len()];
    for (index, &tile) in goal.cells().iter().enumerate() {
        rank[tile as usize] = index;
    }

    let ranked: Vec<usize> = state
        .cells()
        .iter()
        .filter(|&&tile| tile != BLANK)
        .map(|&tile| rank[tile as usize])
        .collect();

    ranked
        .iter()
        .enumerate()
        .map(|(i, &val)| ranked[i + 1..].iter().filter(|&&next| next < val).count())
        .sum()
}

/// Returns `true` if `goal` is reachable from `state` by legal slides.
///
/// Two states are mutually reachable iff they share the same permutation
/// parity class: on odd grids the tile inversion counts must agree in
/// parity; on even grids each blank row shift flips it.
pub fn is_solvable(state: &PuzzleState, goal: &PuzzleState) -> Result<bool, PuzzleError> {
    let size = state.size();
    if size != goal.size() {
        return Err(PuzzleError::SizeMismatch {
            left: size,
            right: goal.size(),
        });
    }

    let inversions = count_inversions(state, goal);
    let parity = if size % 2 == 1 {
        inversions % 2
    } else {
        let (blank_row, _) = idx_to_coord(state.blank_index(), size);
        let (goal_row, _) = idx_to_coord(goal.blank_index(), size);
        (inversions + blank_row.abs_diff(goal_row)) % 2
    };

    Ok(parity == 0)
}

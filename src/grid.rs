//! Grid geometry and text formatting for square sliding puzzles.
//!
//! Cells are stored row-major: `index = row * N + col`.

use std::fmt;

use crate::state::{PuzzleState, BLANK};

/// Direction the blank travels during a slide.
///
/// The declaration order is the neighbor ordering contract: Up, Down,
/// Left, Right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in neighbor order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Row and column offset applied to the blank.
    #[inline]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        };
        f.write_str(name)
    }
}

/// Converts a linear cell index to `(row, col)`.
#[inline(always)]
pub const fn idx_to_coord(index: usize, size: usize) -> (usize, usize) {
    (index / size, index % size)
}

/// Converts `(row, col)` to a linear cell index.
#[inline(always)]
pub const fn coord_to_idx(row: usize, col: usize, size: usize) -> usize {
    row * size + col
}

/// Returns the index reached by stepping from `index` in `direction`.
///
/// Returns `None` if the step would leave the grid.
#[inline]
pub fn step(index: usize, direction: Direction, size: usize) -> Option<usize> {
    let (row, col) = idx_to_coord(index, size);
    let (d_row, d_col) = direction.offset();
    let row = row.checked_add_signed(d_row).filter(|&r| r < size)?;
    let col = col.checked_add_signed(d_col).filter(|&c| c < size)?;
    Some(coord_to_idx(row, col, size))
}

/// Manhattan distance between two cell indices.
#[inline]
pub fn cell_distance(a: usize, b: usize, size: usize) -> usize {
    let (a_row, a_col) = idx_to_coord(a, size);
    let (b_row, b_col) = idx_to_coord(b, size);
    a_row.abs_diff(b_row) + a_col.abs_diff(b_col)
}

/// Formats a state as an N×N text grid.
///
/// Columns are right-aligned to the widest tile number; the blank shows
/// as '.'. Every row ends with a newline.
pub fn format_state(state: &PuzzleState) -> String {
    let size = state.size();
    let width = (size * size - 1).to_string().len();

    let mut output = String::new();
    for row in state.cells().chunks(size) {
        for (col, &cell) in row.iter().enumerate() {
            if col > 0 {
                output.push(' ');
            }
            if cell == BLANK {
                output.push_str(&format!("{:>width$}", '.'));
            } else {
                output.push_str(&format!("{:>width$}", cell));
            }
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_conversion_roundtrip() {
        for size in [2, 3, 4, 7] {
            for idx in 0..size * size {
                let (row, col) = idx_to_coord(idx, size);
                assert!(row < size && col < size);
                assert_eq!(coord_to_idx(row, col, size), idx, "roundtrip failed for {idx}");
            }
        }
    }

    #[test]
    fn test_step_stays_in_bounds() {
        // corner 0 of a 3x3 grid
        assert_eq!(step(0, Direction::Up, 3), None);
        assert_eq!(step(0, Direction::Left, 3), None);
        assert_eq!(step(0, Direction::Down, 3), Some(3));
        assert_eq!(step(0, Direction::Right, 3), Some(1));
        // right edge must not wrap to the next row
        assert_eq!(step(2, Direction::Right, 3), None);
        assert_eq!(step(3, Direction::Left, 3), None);
    }

    #[test]
    fn test_opposite_is_involution() {
        for dir in Direction::ALL {
            assert_ne!(dir, dir.opposite());
            assert_eq!(dir, dir.opposite().opposite());
        }
    }

    #[test]
    fn test_cell_distance() {
        assert_eq!(cell_distance(0, 8, 3), 4);
        assert_eq!(cell_distance(5, 5, 3), 0);
        assert_eq!(cell_distance(3, 2, 3), 3);
    }

    #[test]
    fn test_format_goal_3x3() {
        let goal = PuzzleState::goal(3).unwrap();
        insta::assert_snapshot!(format_state(&goal), @r"
        1 2 3
        4 5 6
        7 8 .
        ");
    }

    #[test]
    fn test_format_aligns_wide_tiles() {
        let goal = PuzzleState::goal(4).unwrap();
        assert_eq!(
            format_state(&goal),
            " 1  2  3  4\n 5  6  7  8\n 9 10 11 12\n13 14 15  .\n"
        );
    }
}

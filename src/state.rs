//! Puzzle state representation.
//!
//! A state is a flat, row-major sequence of `N*N` cells. Each cell holds a
//! tile number in `1..N*N` or [`BLANK`]. The full cell sequence is the
//! state's identity, so states can be used directly as hash map keys.

use std::fmt;
use std::str::FromStr;

use crate::error::PuzzleError;
use crate::grid::format_state;

/// Cell value marking the empty cell.
pub const BLANK: u8 = 0;

/// Smallest supported grid dimension.
pub const MIN_SIZE: usize = 2;

/// Largest supported grid dimension (tile numbers must fit in a `u8`).
pub const MAX_SIZE: usize = 16;

/// Checks that `size` is a supported grid dimension.
pub fn check_size(size: usize) -> Result<(), PuzzleError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(PuzzleError::InvalidConfiguration {
            size,
            min: MIN_SIZE,
            max: MAX_SIZE,
        })
    }
}

/// One immutable grid configuration.
///
/// Every transformation returns a new state; there is no public way to
/// mutate one in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PuzzleState {
    size: u8,
    /// Index of the blank cell, cached so move generation is O(1).
    blank: u8,
    cells: Box<[u8]>,
}

impl PuzzleState {
    /// Returns the canonical goal state `[1, 2, ..., N*N-1, BLANK]`.
    pub fn goal(size: usize) -> Result<Self, PuzzleError> {
        check_size(size)?;
        let len = size * size;
        let cells: Box<[u8]> = (1..len)
            .map(|tile| tile as u8)
            .chain(std::iter::once(BLANK))
            .collect();

        Ok(Self {
            size: size as u8,
            blank: (len - 1) as u8,
            cells,
        })
    }

    /// Builds a state from raw cells, inferring `N` from the cell count.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` when the length is not a supported perfect
    /// square, when there is not exactly one blank, or when the tiles are
    /// not exactly `1..N*N`.
    pub fn from_cells(cells: impl Into<Vec<u8>>) -> Result<Self, PuzzleError> {
        let cells: Vec<u8> = cells.into();
        let len = cells.len();
        let size = (1..=MAX_SIZE)
            .find(|n| n * n >= len)
            .filter(|n| n * n == len && *n >= MIN_SIZE)
            .ok_or_else(|| {
                PuzzleError::InvalidState(format!(
                    "{len} cells is not a square grid of size {MIN_SIZE}..={MAX_SIZE}"
                ))
            })?;

        let mut seen = vec![false; len];
        let mut blank = None;
        for (index, &cell) in cells.iter().enumerate() {
            if cell == BLANK {
                if blank.replace(index).is_some() {
                    return Err(PuzzleError::InvalidState("more than one blank".into()));
                }
                continue;
            }
            let tile = cell as usize;
            if tile >= len {
                return Err(PuzzleError::InvalidState(format!(
                    "tile {tile} out of range 1..={}",
                    len - 1
                )));
            }
            if std::mem::replace(&mut seen[tile], true) {
                return Err(PuzzleError::InvalidState(format!("duplicate tile {tile}")));
            }
        }
        let blank = blank.ok_or_else(|| PuzzleError::InvalidState("missing blank".into()))?;

        Ok(Self {
            size: size as u8,
            blank: blank as u8,
            cells: cells.into_boxed_slice(),
        })
    }

    /// Grid dimension `N`.
    #[inline]
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Row-major cells, with [`BLANK`] for the empty cell.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Index of the blank cell.
    #[inline]
    pub fn blank_index(&self) -> usize {
        self.blank as usize
    }

    /// Returns the tile at `index`, or `None` for the blank.
    pub fn tile_at(&self, index: usize) -> Option<u8> {
        self.cells.get(index).copied().filter(|&cell| cell != BLANK)
    }

    /// Returns `true` if this is the canonical goal arrangement.
    pub fn is_goal(&self) -> bool {
        let last = self.cells.len() - 1;
        self.cells[last] == BLANK
            && self.cells[..last]
                .iter()
                .enumerate()
                .all(|(index, &cell)| cell as usize == index + 1)
    }

    /// Returns a copy with the blank swapped into `target`.
    ///
    /// Callers guarantee `target` is orthogonally adjacent to the blank.
    pub(crate) fn with_blank_at(&self, target: usize) -> Self {
        let mut cells = self.cells.clone();
        cells.swap(self.blank as usize, target);
        Self {
            size: self.size,
            blank: target as u8,
            cells,
        }
    }
}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_state(self))
    }
}

impl FromStr for PuzzleState {
    type Err = PuzzleError;

    /// Parses tokens separated by whitespace, `,` or `/`.
    ///
    /// `_`, `.` and `0` all denote the blank.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .split(|c: char| c.is_whitespace() || c == ',' || c == '/')
            .filter(|token| !token.is_empty())
            .map(|token| match token {
                "_" | "." => Ok(BLANK),
                _ => token
                    .parse::<u8>()
                    .map_err(|_| PuzzleError::InvalidState(format!("bad token {token:?}"))),
            })
            .collect::<Result<Vec<u8>, _>>()?;
        Self::from_cells(cells)
    }
}

//! Terminal rendering of puzzle states and solutions.
//!
//! Numeral translation lives here; the library only deals in tile numbers.

use clap::ValueEnum;

use slidetile::{PuzzleState, Solution, BLANK};

/// Digit set used to print tile numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Numerals {
    Arabic,
    Kannada,
}

impl Numerals {
    /// Formats a tile number in this digit set.
    pub fn format(self, tile: u8) -> String {
        let digits = tile.to_string();
        match self {
            Numerals::Arabic => digits,
            // Kannada digits are contiguous from U+0CE6 (zero)
            Numerals::Kannada => digits
                .chars()
                .filter_map(|d| d.to_digit(10))
                .filter_map(|d| char::from_u32(0x0CE6 + d))
                .collect(),
        }
    }
}

/// Renders a state as a grid, blank shown as '.'.
pub fn render_state(state: &PuzzleState, numerals: Numerals) -> String {
    let size = state.size();
    let labels: Vec<String> = state
        .cells()
        .iter()
        .map(|&cell| {
            if cell == BLANK {
                ".".to_string()
            } else {
                numerals.format(cell)
            }
        })
        .collect();
    let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(1);

    let mut output = String::new();
    for row in labels.chunks(size) {
        let cells: Vec<String> = row.iter().map(|l| format!("{l:>width$}")).collect();
        output.push_str(&cells.join(" "));
        output.push('\n');
    }
    output
}

/// Renders every step of a solution, each labeled with its index.
pub fn render_solution(solution: &Solution, numerals: Numerals) -> String {
    let mut output = String::new();
    for (step, state) in solution.path.iter().enumerate() {
        output.push_str(&format!("Step {step}:\n"));
        output.push_str(&render_state(state, numerals));
        output.push('\n');
    }
    output
}

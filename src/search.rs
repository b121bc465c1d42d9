//! A* shortest-path search over the implicit state graph.
//!
//! Key points:
//! - States are interned once in a [`CameFrom`] table; scores live in a
//!   plain vector indexed by node id
//! - The frontier is a binary min-heap on `f = g + h` with lazy deletion:
//!   an improved node is pushed again and stale entries are skipped on pop
//! - Ties on `f` prefer the smaller `h`, then the earliest push, so results
//!   are reproducible
//! - Unit move cost and a consistent heuristic mean the first time the goal
//!   is popped its path is optimal

use std::cmp::Ordering as CmpOrdering;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::SearchConfig;
use crate::error::PuzzleError;
use crate::grid::Direction;
use crate::heuristic::Manhattan;
use crate::moves::{is_solvable, move_between, neighbors};
use crate::path::{reconstruct, CameFrom, NodeId};
use crate::state::PuzzleState;

/// Counters describing one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States removed from the frontier and expanded.
    pub expanded: usize,
    /// Successor states generated (including already known ones).
    pub generated: usize,
    /// Largest frontier size observed, stale entries included.
    pub max_frontier: usize,
    pub elapsed: Duration,
}

/// An optimal solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// States from start to goal inclusive.
    pub path: Vec<PuzzleState>,
    pub stats: SearchStats,
}

impl Solution {
    /// Number of slides, `path.len() - 1`.
    pub fn moves(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Direction the blank travels at each step.
    pub fn directions(&self) -> Vec<Direction> {
        self.path
            .windows(2)
            .filter_map(|pair| move_between(&pair[0], &pair[1]))
            .collect()
    }

    /// The last state of the path (the goal).
    pub fn final_state(&self) -> Option<&PuzzleState> {
        self.path.last()
    }
}

/// A frontier entry.
///
/// Ordered so that `BinaryHeap` (a max-heap) pops the lowest `f` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenEntry {
    f: u32,
    h: u32,
    /// Push order, the final tie-breaker.
    seq: u64,
    /// Cost from start when this entry was pushed.
    g: u32,
    node: NodeId,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

/// A configured A* solver.
///
/// Each call to [`Solver::solve`] owns its frontier and score tables; they
/// are dropped when the call returns, including on cancellation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Solver<'a> {
    config: SearchConfig,
    cancel: Option<&'a AtomicBool>,
}

impl<'a> Solver<'a> {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Aborts the search with `Cancelled` once `flag` is set.
    ///
    /// The flag is polled before every expansion.
    pub fn with_cancel_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Finds a shortest sequence of states from `start` to `goal`.
    ///
    /// # Errors
    ///
    /// - `SizeMismatch` if the two states have different grid sizes
    /// - `NoSolutionFound` if `goal` is unreachable from `start`
    /// - `SearchLimitExceeded` if `max_expansions` is reached
    /// - `Cancelled` if the cancel flag was raised
    pub fn solve(&self, start: &PuzzleState, goal: &PuzzleState) -> Result<Solution, PuzzleError> {
        if start.size() != goal.size() {
            return Err(PuzzleError::SizeMismatch {
                left: start.size(),
                right: goal.size(),
            });
        }
        if self.config.parity_check && !is_solvable(start, goal)? {
            warn!(event = "solve_unreachable", size = start.size());
            return Err(PuzzleError::NoSolutionFound);
        }

        let started = Instant::now();
        let heuristic = Manhattan::new(goal);
        let mut stats = SearchStats::default();

        let mut came_from = CameFrom::new();
        let mut g_score: Vec<u32> = Vec::new();
        let mut frontier = BinaryHeap::new();
        let mut seq = 0u64;

        let (start_node, _) = came_from.intern(start.clone());
        g_score.push(0);
        let h0 = heuristic.estimate(start);
        frontier.push(OpenEntry {
            f: h0,
            h: h0,
            seq,
            g: 0,
            node: start_node,
        });

        info!(event = "solve_start", size = start.size(), h0);

        while let Some(entry) = frontier.pop() {
            if entry.g > g_score[entry.node] {
                // superseded by a cheaper push of the same node
                continue;
            }
            if self.is_cancelled() {
                warn!(event = "solve_cancelled", expanded = stats.expanded);
                return Err(PuzzleError::Cancelled);
            }

            if came_from.state(entry.node) == goal {
                let path = reconstruct(&came_from, goal);
                stats.elapsed = started.elapsed();
                info!(
                    event = "solve_end",
                    moves = path.len() - 1,
                    expanded = stats.expanded,
                    generated = stats.generated,
                    max_frontier = stats.max_frontier,
                    elapsed_ms = stats.elapsed.as_millis() as u64,
                );
                return Ok(Solution { path, stats });
            }

            if let Some(limit) = self.config.max_expansions {
                if stats.expanded >= limit {
                    warn!(event = "solve_limit", expanded = stats.expanded);
                    return Err(PuzzleError::SearchLimitExceeded {
                        expanded: stats.expanded,
                    });
                }
            }
            stats.expanded += 1;

            let current = came_from.state(entry.node).clone();
            let tentative_g = entry.g + 1;
            for next in neighbors(&current) {
                stats.generated += 1;
                let (node, is_new) = came_from.intern(next);
                if is_new {
                    g_score.push(u32::MAX);
                }
                if tentative_g < g_score[node] {
                    g_score[node] = tentative_g;
                    came_from.link(node, entry.node);
                    let h = heuristic.estimate(came_from.state(node));
                    seq += 1;
                    frontier.push(OpenEntry {
                        f: tentative_g + h,
                        h,
                        seq,
                        g: tentative_g,
                        node,
                    });
                }
            }
            stats.max_frontier = stats.max_frontier.max(frontier.len());

            if stats.expanded % 100_000 == 0 {
                debug!(
                    event = "solve_progress",
                    expanded = stats.expanded,
                    discovered = came_from.len(),
                    f = entry.f,
                );
            }
        }

        stats.elapsed = started.elapsed();
        warn!(
            event = "solve_exhausted",
            expanded = stats.expanded,
            discovered = came_from.len(),
        );
        Err(PuzzleError::NoSolutionFound)
    }
}

/// Finds a shortest solution with the default search settings.
pub fn solve(start: &PuzzleState, goal: &PuzzleState) -> Result<Solution, PuzzleError> {
    Solver::default().solve(start, goal)
}

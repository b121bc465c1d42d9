//! Solvable scrambles via random walks from the goal.
//!
//! Each step picks one of the current state's neighbors uniformly at random.
//! The walk does not avoid backtracking, so a walk of `k` slides may end
//! fewer than `k` moves from the goal. Every slide is reversible, which
//! keeps the result in the goal's parity class: it is always solvable.

use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::ShuffleConfig;
use crate::error::{ConfigError, PuzzleError};
use crate::moves::neighbors;
use crate::state::{check_size, PuzzleState};

/// A scrambled state and the number of random slides that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shuffled {
    pub state: PuzzleState,
    pub moves: u32,
}

/// Applies `steps` uniformly random slides starting at `start`.
pub fn random_walk<R: Rng + ?Sized>(start: &PuzzleState, steps: u32, rng: &mut R) -> PuzzleState {
    let mut current = start.clone();
    for _ in 0..steps {
        // every state on a grid of size >= 2 has at least two neighbors
        if let Some(next) = neighbors(&current).choose(rng) {
            current = next.clone();
        }
    }
    current
}

/// Scrambler with its own random source.
///
/// Seeded scramblers are reproducible; unseeded ones draw from OS entropy.
#[derive(Debug, Clone)]
pub struct Shuffler {
    config: ShuffleConfig,
    rng: SmallRng,
}

impl Shuffler {
    pub fn new(config: ShuffleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &ShuffleConfig {
        &self.config
    }

    /// Scrambles `goal` with a walk length drawn from
    /// `min_moves..=max_moves`.
    pub fn shuffle(&mut self, goal: &PuzzleState) -> Shuffled {
        let moves = self
            .rng
            .random_range(self.config.min_moves..=self.config.max_moves);
        let state = random_walk(goal, moves, &mut self.rng);
        debug!(event = "shuffle", size = goal.size(), moves);
        Shuffled { state, moves }
    }
}

/// Scrambles `goal` with the default 35..=55 slide walk and fresh entropy.
///
/// # Errors
///
/// `InvalidConfiguration` for an unsupported `size`, `SizeMismatch` if
/// `goal` is not `size`×`size`.
pub fn shuffle(goal: &PuzzleState, size: usize) -> Result<Shuffled, PuzzleError> {
    check_size(size)?;
    if goal.size() != size {
        return Err(PuzzleError::SizeMismatch {
            left: goal.size(),
            right: size,
        });
    }
    let mut shuffler = Shuffler {
        config: ShuffleConfig::default(),
        rng: SmallRng::from_os_rng(),
    };
    Ok(shuffler.shuffle(goal))
}

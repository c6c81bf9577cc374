//! Rollout policies
//!
//! Simulation policies play a position out to the end of the game to
//! estimate its value.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::{game_state::Position, EngineError, Result};

/// Plays a position out to a decided game
pub trait SimulationPolicy: Send + Sync {
    /// Plays `position` out and returns +1, -1 or 0 from the engine's side
    fn simulate(&self, position: &Position, rng: &mut StdRng) -> Result<i32>;
}

/// Random simulation policy
///
/// Plays uniformly random legal moves on a private copy of the position
/// until the game is decided.
#[derive(Debug, Clone)]
pub struct RandomPolicy;

impl RandomPolicy {
    /// Creates a new random policy
    pub fn new() -> Self {
        RandomPolicy
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationPolicy for RandomPolicy {
    fn simulate(&self, position: &Position, rng: &mut StdRng) -> Result<i32> {
        let mut current = position.clone();
        let mut moves = Vec::with_capacity(81);

        while !current.is_terminal() {
            current.legal_moves_into(&mut moves);
            let play = *moves.choose(rng).ok_or_else(|| {
                EngineError::InvariantViolation(format!(
                    "no legal move in an ongoing position after {:?}",
                    current.last_play()
                ))
            })?;
            current.play_in_place(play);
        }

        Ok(current.outcome().reward())
    }
}

//! Configuration options for the search engine
//!
//! This module defines the parameters that control which search strategy
//! runs and how much work it may do.

use std::str::FromStr;
use std::time::Duration;

use crate::{EngineError, Result};

/// Search strategy used to pick a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Fixed-depth alpha-beta negamax over the heuristic evaluator
    Negamax,

    /// Monte Carlo Tree Search with UCB1 selection and random rollouts
    MonteCarlo,
}

impl FromStr for Algorithm {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "negamax" | "alphabeta" | "alpha-beta" => Ok(Algorithm::Negamax),
            "mcts" | "uct" | "montecarlo" => Ok(Algorithm::MonteCarlo),
            other => Err(EngineError::InvalidConfiguration(format!(
                "unknown algorithm '{}'",
                other
            ))),
        }
    }
}

/// Criteria for selecting the best child after an MCTS search is complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestChildCriteria {
    /// Select the child with the most visits
    ///
    /// This is the standard choice: visit counts are statistically more
    /// stable than mean rewards of rarely explored children.
    MostVisits,

    /// Select the child with the highest mean reward for the side to move
    HighestValue,
}

/// Configuration for the search engine
///
/// # Example
///
/// ```
/// use ultimate_ttt::config::{Algorithm, BestChildCriteria, SearchConfig};
/// use std::time::Duration;
///
/// let config = SearchConfig::default()
///     .with_algorithm(Algorithm::MonteCarlo)
///     .with_exploration_constant(1.5)
///     .with_max_time(Duration::from_millis(90))
///     .with_best_child_criteria(BestChildCriteria::MostVisits);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Strategy used by [`crate::Engine::choose_move`]
    pub algorithm: Algorithm,

    /// Negamax depth in plies
    pub depth: u32,

    /// Exploration constant for UCB1
    pub exploration_constant: f64,

    /// Maximum number of MCTS iterations
    pub max_iterations: usize,

    /// Wall-clock budget
    ///
    /// MCTS stops after the first iteration that ends past the budget.
    /// Negamax switches to iterative deepening and keeps the deepest
    /// completed result.
    pub max_time: Option<Duration>,

    /// How MCTS picks the final move
    pub best_child_criteria: BestChildCriteria,

    /// Seed for the rollout RNG; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            algorithm: Algorithm::Negamax,
            depth: 3,
            exploration_constant: 2.0,
            max_iterations: 10_000,
            max_time: None,
            best_child_criteria: BestChildCriteria::MostVisits,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Sets the search strategy
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the negamax depth
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Sets the exploration constant
    pub fn with_exploration_constant(mut self, constant: f64) -> Self {
        self.exploration_constant = constant;
        self
    }

    /// Sets the maximum number of iterations
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Sets the maximum time to run the search
    pub fn with_max_time(mut self, duration: Duration) -> Self {
        self.max_time = Some(duration);
        self
    }

    /// Sets the criteria for selecting the best child
    pub fn with_best_child_criteria(mut self, criteria: BestChildCriteria) -> Self {
        self.best_child_criteria = criteria;
        self
    }

    /// Seeds the rollout RNG
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Rejects settings no search can run with
    pub fn validate(&self) -> Result<()> {
        if self.depth == 0 {
            return Err(EngineError::InvalidConfiguration(
                "depth must be at least 1".to_string(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(EngineError::InvalidConfiguration(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(EngineError::InvalidConfiguration(format!(
                "exploration constant {} is not a finite non-negative number",
                self.exploration_constant
            )));
        }
        Ok(())
    }
}

//! # ultimate-ttt
//!
//! A game-tree search engine for Ultimate Tic-Tac-Toe: a 3x3 grid of 3x3
//! micro-boards where winning a micro-board claims the matching cell of the
//! macro board, and each move sends the opponent to the micro-board matching
//! the cell just played.
//!
//! ## Features
//!
//! - Compact board model with incremental board-result updates
//! - Legal move generation including the free-choice rule
//! - Weighted heuristic evaluator with memoized feature sums
//! - Arena-allocated game tree shared between strategies
//! - Alpha-beta negamax with optional iterative deepening under a deadline
//! - Monte Carlo Tree Search with UCB1 selection and random rollouts
//!
//! ## Basic Usage
//!
//! ```
//! use ultimate_ttt::{Engine, Player, SearchConfig};
//!
//! fn main() -> Result<(), ultimate_ttt::EngineError> {
//!     // The engine moves first and searches two plies deep
//!     let config = SearchConfig::default().with_depth(2);
//!     let mut engine = Engine::new_game(Player::Me, config)?;
//!
//!     let play = engine.choose_move()?;
//!     let (row, col) = play.to_coordinate();
//!     println!("{} {}", row, col);
//!
//!     // Feed back the opponent's reply
//!     let reply = engine.position().legal_moves()[0];
//!     engine.advance(reply)?;
//!
//!     println!("{}", engine.get_statistics().summary());
//!     Ok(())
//! }
//! ```
//!
//! ## Strategies
//!
//! [`negamax::Negamax`] searches a fixed number of plies and scores leaves
//! with [`evaluation::Evaluator`]. [`mcts::MonteCarlo`] runs
//! selection/rollout/backpropagation cycles until a time budget or iteration
//! cap runs out and plays the most visited move. Both implement
//! [`engine::SearchStrategy`] and operate on the same [`tree::GameTree`].

pub mod board;
pub mod config;
pub mod engine;
pub mod evaluation;
pub mod game_state;
pub mod mcts;
pub mod negamax;
pub mod policy;
pub mod stats;
pub mod tree;
pub mod utils;

pub use board::{Board, BoardResult, Cell, Outcome, PlayPosition, Player};
pub use config::{Algorithm, BestChildCriteria, SearchConfig};
pub use engine::{Engine, SearchStrategy};
pub use evaluation::{Evaluator, Weights};
pub use game_state::Position;
pub use mcts::MonteCarlo;
pub use negamax::Negamax;
pub use stats::SearchStatistics;
pub use tree::{GameTree, Node, NodeId};

/// Error types for the engine
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The game is already decided
    #[error("Game is over: no legal moves available")]
    GameOver,

    /// The move is not legal in the current position
    #[error("Illegal move: {0}")]
    IllegalMove(PlayPosition),

    /// Absolute coordinates outside the 9x9 board
    #[error("Coordinate ({row}, {col}) is outside the 9x9 board")]
    InvalidCoordinate { row: i32, col: i32 },

    /// Search was stopped before completion
    #[error("Search stopped: {0}")]
    SearchStopped(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Move generation or search bookkeeping is inconsistent
    #[error("Search invariant violated: {0}")]
    InvariantViolation(String),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

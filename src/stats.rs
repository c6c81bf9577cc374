//! Statistics collection for searches
//!
//! Every search fills in a fresh [`SearchStatistics`] instead of bumping
//! process-wide counters.

use std::time::Duration;

/// Statistics collected during one search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStatistics {
    /// MCTS iterations, or negamax depths completed
    pub iterations: usize,

    /// Nodes created by expansions
    pub nodes_expanded: usize,

    /// Static evaluations computed (cached node scores are not counted)
    pub evaluations: usize,

    /// Evaluator cache lookups answered during the search
    pub cache_hits: u64,

    /// Deepest node reached, relative to the search root
    pub max_depth: usize,

    /// Nodes in the tree when the search finished
    pub tree_size: usize,

    /// Total time spent searching
    pub total_time: Duration,

    /// Whether the time budget ended the search
    ///
    /// For MCTS this is the normal end of a timed search: the budget expired
    /// before the iteration cap was reached. For negamax it means a deeper
    /// iteration was abandoned at the deadline.
    pub stopped_early: bool,

    /// Negamax value of the root, when negamax ran
    pub root_score: Option<i32>,
}

impl SearchStatistics {
    /// Creates a new, empty statistics object
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of iterations per second
    pub fn iterations_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.iterations as f64 / self.total_time.as_secs_f64()
    }

    /// Returns a summary of the statistics as a string
    pub fn summary(&self) -> String {
        let root_score = match self.root_score {
            Some(score) => score.to_string(),
            None => "-".to_string(),
        };
        format!(
            "Search Statistics:\n\
             - Iterations: {}\n\
             - Total time: {:.3} seconds\n\
             - Nodes expanded: {}\n\
             - Evaluations: {} ({} cache hits)\n\
             - Tree size: {} nodes\n\
             - Max depth: {}\n\
             - Iterations per second: {:.1}\n\
             - Root score: {}\n\
             - Stopped early: {}",
            self.iterations,
            self.total_time.as_secs_f64(),
            self.nodes_expanded,
            self.evaluations,
            self.cache_hits,
            self.tree_size,
            self.max_depth,
            self.iterations_per_second(),
            root_score,
            self.stopped_early
        )
    }
}

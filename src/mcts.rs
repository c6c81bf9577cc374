//! Monte Carlo Tree Search over the shared game tree
//!
//! Each iteration selects a node, plays a random game out from a copy of its
//! position and adds the result to the node and all of its ancestors up to
//! the search root. Iterations repeat until the time budget or the iteration
//! cap runs out; a started rollout is always finished, so the budget can be
//! overshot by up to one iteration.

use std::time::{Duration, Instant};

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{
    config::{BestChildCriteria, SearchConfig},
    engine::SearchStrategy,
    evaluation::Evaluator,
    policy::{
        backpropagation::{BackpropagationPolicy, StandardPolicy},
        selection::{SelectionPolicy, UCB1Policy},
        simulation::{RandomPolicy, SimulationPolicy},
    },
    stats::SearchStatistics,
    tree::{GameTree, NodeId},
    EngineError, Result,
};

/// Iteration cap applied when the caller passes an explicit time budget
///
/// Only guards against a clock that never advances; the budget ends the
/// search long before this.
pub const TIMED_ITERATION_CAP: usize = 1_000_000;

/// The Monte Carlo Tree Search strategy
pub struct MonteCarlo {
    max_iterations: usize,

    max_time: Option<Duration>,

    best_child_criteria: BestChildCriteria,

    /// Policy for selecting nodes during the selection phase
    selection_policy: Box<dyn SelectionPolicy>,

    /// Policy for simulating games during the simulation phase
    simulation_policy: Box<dyn SimulationPolicy>,

    /// Policy for backpropagating results
    backpropagation_policy: Box<dyn BackpropagationPolicy>,

    rng: StdRng,
}

impl MonteCarlo {
    /// Creates an MCTS strategy from the search configuration
    pub fn new(config: &SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        MonteCarlo {
            max_iterations: config.max_iterations,
            max_time: config.max_time,
            best_child_criteria: config.best_child_criteria,
            selection_policy: Box::new(UCB1Policy::new(config.exploration_constant)),
            simulation_policy: Box::new(RandomPolicy::new()),
            backpropagation_policy: Box::new(StandardPolicy::new()),
            rng,
        }
    }

    /// Sets the selection policy to use
    pub fn with_selection_policy<P: SelectionPolicy + 'static>(mut self, policy: P) -> Self {
        self.selection_policy = Box::new(policy);
        self
    }

    /// Sets the simulation policy to use
    pub fn with_simulation_policy<P: SimulationPolicy + 'static>(mut self, policy: P) -> Self {
        self.simulation_policy = Box::new(policy);
        self
    }

    /// Sets the backpropagation policy to use
    pub fn with_backpropagation_policy<P: BackpropagationPolicy + 'static>(
        mut self,
        policy: P,
    ) -> Self {
        self.backpropagation_policy = Box::new(policy);
        self
    }

    /// Runs iterations from `root` until the budget or iteration cap is spent
    ///
    /// An explicit `budget` replaces both the configured time limit and the
    /// configured `max_iterations`, so the search runs for the whole budget
    /// (up to [`TIMED_ITERATION_CAP`] iterations). Without one, the configured
    /// limits apply. At least one iteration always runs. The caller reads the
    /// resulting statistics off the root's children, see
    /// [`MonteCarlo::best_child`].
    pub fn run(
        &mut self,
        tree: &mut GameTree,
        root: NodeId,
        budget: Option<Duration>,
        stats: &mut SearchStatistics,
    ) -> Result<()> {
        if tree.get(root).position.is_terminal() {
            return Err(EngineError::GameOver);
        }

        let start = Instant::now();
        let (budget, max_iterations) = match budget {
            Some(budget) => (Some(budget), TIMED_ITERATION_CAP),
            None => (self.max_time, self.max_iterations),
        };

        loop {
            self.execute_iteration(tree, root, stats)?;
            stats.iterations += 1;

            if let Some(budget) = budget {
                if start.elapsed() >= budget {
                    stats.stopped_early = true;
                    break;
                }
            }
            if stats.iterations >= max_iterations {
                break;
            }
        }

        stats.tree_size = tree.len();
        stats.total_time = start.elapsed();
        Ok(())
    }

    /// Executes one selection, rollout and backpropagation cycle
    ///
    /// Returns the node the rollout started from.
    pub fn execute_iteration(
        &mut self,
        tree: &mut GameTree,
        root: NodeId,
        stats: &mut SearchStatistics,
    ) -> Result<NodeId> {
        let selected = self.selection(tree, root, stats)?;
        let reward = self
            .simulation_policy
            .simulate(&tree.get(selected).position, &mut self.rng)?;
        self.backpropagate(tree, selected, root, reward);
        trace!("rollout from {:?} scored {}", selected, reward);
        Ok(selected)
    }

    /// Selection phase: find the node the next rollout starts from
    ///
    /// A terminal node is returned as is; its rollout is simply its outcome.
    /// This is intentional: the iteration still backpropagates that outcome
    /// instead of ending without a rollout, so a decided child keeps
    /// collecting visits.
    /// A node without children is expanded, then returned itself if it has
    /// never been visited, or its first child otherwise. An unvisited child
    /// is taken before any UCB1 comparison.
    fn selection(
        &self,
        tree: &mut GameTree,
        root: NodeId,
        stats: &mut SearchStatistics,
    ) -> Result<NodeId> {
        let mut current = root;
        let mut depth = 0;

        loop {
            stats.max_depth = stats.max_depth.max(depth);
            let node = tree.get(current);
            if node.position.is_terminal() {
                return Ok(current);
            }

            if !node.is_expanded() {
                let (children, created) = tree.expand(current);
                stats.nodes_expanded += created;
                if tree.get(current).visits == 0 {
                    return Ok(current);
                }
                return children.first().ok_or_else(|| {
                    EngineError::InvariantViolation(
                        "ongoing position expanded to no children".to_string(),
                    )
                });
            }

            let next = self
                .selection_policy
                .select_child(tree, current)
                .ok_or_else(|| {
                    EngineError::InvariantViolation(
                        "expanded ongoing node has no children".to_string(),
                    )
                })?;
            depth += 1;
            if tree.get(next).visits == 0 {
                stats.max_depth = stats.max_depth.max(depth);
                return Ok(next);
            }
            current = next;
        }
    }

    /// Backpropagation phase: credit `reward` to `from` and every ancestor up to `root`
    pub fn backpropagate(&self, tree: &mut GameTree, from: NodeId, root: NodeId, reward: i32) {
        let mut current = Some(from);
        while let Some(id) = current {
            self.backpropagation_policy.update_stats(tree.get_mut(id), reward);
            if id == root {
                break;
            }
            current = tree.parent(id);
        }
    }

    /// Picks the move to play from the accumulated statistics
    ///
    /// Ties go to the child that comes first. `HighestValue` ignores
    /// unvisited children and falls back to the most visited one if no
    /// child was visited.
    pub fn best_child(&self, tree: &GameTree, root: NodeId) -> Option<NodeId> {
        let children = tree.children(root)?;
        let most_visited = || {
            let mut best: Option<(NodeId, u64)> = None;
            for id in children.iter() {
                let visits = tree.get(id).visits;
                match best {
                    Some((_, best_visits)) if visits <= best_visits => {}
                    _ => best = Some((id, visits)),
                }
            }
            best.map(|(id, _)| id)
        };

        match self.best_child_criteria {
            BestChildCriteria::MostVisits => most_visited(),
            BestChildCriteria::HighestValue => {
                let perspective = tree.get(root).position.next_player().color() as f64;
                let mut best: Option<(NodeId, f64)> = None;
                for id in children.iter() {
                    let child = tree.get(id);
                    if child.visits == 0 {
                        continue;
                    }
                    let value = perspective * child.mean_score();
                    match best {
                        Some((_, best_value)) if value <= best_value => {}
                        _ => best = Some((id, value)),
                    }
                }
                best.map(|(id, _)| id).or_else(most_visited)
            }
        }
    }
}

impl SearchStrategy for MonteCarlo {
    fn name(&self) -> &'static str {
        "mcts"
    }

    fn choose(
        &mut self,
        tree: &mut GameTree,
        root: NodeId,
        _evaluator: &mut Evaluator,
        budget: Option<Duration>,
        stats: &mut SearchStatistics,
    ) -> Result<NodeId> {
        self.run(tree, root, budget, stats)?;

        let best = self.best_child(tree, root).ok_or_else(|| {
            EngineError::InvariantViolation("root has no children after search".to_string())
        })?;
        let node = tree.get(best);
        debug!(
            "mcts chose {:?} ({} visits, mean {:.3}) after {} iterations in {:?}",
            node.last_play(),
            node.visits,
            node.mean_score(),
            stats.iterations,
            stats.total_time
        );
        Ok(best)
    }
}

//! Depth-limited alpha-beta search in the negamax formulation
//!
//! Every node visited during a search stores the value it returned in
//! [`Node::score`](crate::tree::Node::score), from the point of view of the
//! colour it was searched with. The root driver uses that to recover the
//! best child without a second pass: it is the first child whose stored
//! score is the negation of the root's value.

use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::{
    engine::SearchStrategy,
    evaluation::Evaluator,
    stats::SearchStatistics,
    tree::{GameTree, NodeId},
    EngineError, Result,
};

/// Bound used for the initial alpha-beta window; safe to negate
pub const INFINITY: i32 = i32::MAX;

/// Mutable state borrowed by one negamax search
pub struct SearchContext<'a> {
    pub tree: &'a mut GameTree,
    pub evaluator: &'a mut Evaluator,
    pub stats: &'a mut SearchStatistics,
    deadline: Option<Instant>,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        tree: &'a mut GameTree,
        evaluator: &'a mut Evaluator,
        stats: &'a mut SearchStatistics,
    ) -> Self {
        SearchContext {
            tree,
            evaluator,
            stats,
            deadline: None,
        }
    }

    /// Aborts the search with [`EngineError::SearchStopped`] once `deadline` passes
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Negamax value of `id` searched `depth` plies deep
    ///
    /// `color` is +1 when the value should be read from the engine's side and
    /// -1 for the opponent's. Leaves return `color` times the cached static
    /// evaluation; siblings are cut as soon as `alpha >= beta`.
    pub fn negamax(
        &mut self,
        id: NodeId,
        depth: u32,
        mut alpha: i32,
        beta: i32,
        color: i32,
    ) -> Result<i32> {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(EngineError::SearchStopped("deadline reached".to_string()));
            }
        }

        if depth == 0 || self.tree.get(id).position.is_terminal() {
            let score = color * self.static_score(id);
            self.tree.get_mut(id).score = Some(score);
            return Ok(score);
        }

        let (children, created) = self.tree.expand(id);
        self.stats.nodes_expanded += created;
        if children.is_empty() {
            return Err(EngineError::InvariantViolation(
                "ongoing position expanded to no children".to_string(),
            ));
        }

        let mut value = -INFINITY;
        for child in children.iter() {
            let child_value = -self.negamax(child, depth - 1, -beta, -alpha, -color)?;
            value = value.max(child_value);
            alpha = alpha.max(value);
            if alpha >= beta {
                break;
            }
        }

        self.tree.get_mut(id).score = Some(value);
        Ok(value)
    }

    /// Searches `root` to `depth` and returns the chosen child with the root value
    pub fn search_root(&mut self, root: NodeId, depth: u32) -> Result<(NodeId, i32)> {
        // Scores left over from earlier turns must not match this search.
        if let Some(children) = self.tree.children(root) {
            for child in children.iter() {
                self.tree.get_mut(child).score = None;
            }
        }

        let color = self.tree.get(root).position.next_player().color();
        let score = self.negamax(root, depth, -INFINITY, INFINITY, color)?;

        let children = self.tree.children(root).ok_or_else(|| {
            EngineError::InvariantViolation("root was not expanded by the search".to_string())
        })?;
        let best = children
            .iter()
            .find(|&child| self.tree.get(child).score == Some(-score))
            .ok_or_else(|| {
                EngineError::InvariantViolation(format!("no child scored {}", -score))
            })?;

        trace!("depth {} searched, root score {}", depth, score);
        Ok((best, score))
    }

    fn static_score(&mut self, id: NodeId) -> i32 {
        if self.tree.get(id).static_score().is_none() {
            self.stats.evaluations += 1;
        }
        let evaluator = &mut *self.evaluator;
        self.tree.static_score_with(id, |position| evaluator.score(position))
    }
}

/// Negamax search strategy
///
/// Without a time budget this runs one fixed-depth search. With one, depths
/// 1..=`depth` run in turn and the deepest completed search decides; depth 1
/// always completes.
#[derive(Debug, Clone)]
pub struct Negamax {
    /// Maximum depth in plies
    pub depth: u32,

    /// Default time budget when the caller does not pass one
    pub max_time: Option<Duration>,
}

impl Negamax {
    /// Creates a fixed-depth negamax strategy
    pub fn new(depth: u32) -> Self {
        Negamax {
            depth,
            max_time: None,
        }
    }

    /// Sets the default time budget
    pub fn with_max_time(mut self, duration: Duration) -> Self {
        self.max_time = Some(duration);
        self
    }
}

impl Default for Negamax {
    fn default() -> Self {
        Self::new(3)
    }
}

impl SearchStrategy for Negamax {
    fn name(&self) -> &'static str {
        "negamax"
    }

    fn choose(
        &mut self,
        tree: &mut GameTree,
        root: NodeId,
        evaluator: &mut Evaluator,
        budget: Option<Duration>,
        stats: &mut SearchStatistics,
    ) -> Result<NodeId> {
        if tree.get(root).position.is_terminal() {
            return Err(EngineError::GameOver);
        }

        let start = Instant::now();
        let hits_before = evaluator.cache_hits();
        let budget = budget.or(self.max_time);

        let mut ctx = SearchContext::new(tree, evaluator, stats);
        let (best, score) = match budget {
            None => {
                let found = ctx.search_root(root, self.depth)?;
                ctx.stats.iterations = 1;
                ctx.stats.max_depth = self.depth as usize;
                found
            }
            Some(budget) => {
                let mut found = ctx.search_root(root, 1)?;
                ctx.stats.iterations = 1;
                ctx.stats.max_depth = 1;
                ctx.deadline = Some(start + budget);
                for depth in 2..=self.depth {
                    match ctx.search_root(root, depth) {
                        Ok(result) => {
                            found = result;
                            ctx.stats.iterations += 1;
                            ctx.stats.max_depth = depth as usize;
                        }
                        Err(EngineError::SearchStopped(reason)) => {
                            debug!("negamax stopped at depth {}: {}", depth, reason);
                            ctx.stats.stopped_early = true;
                            break;
                        }
                        Err(e) => return Err(e),
                    }
                }
                found
            }
        };

        stats.root_score = Some(score);
        stats.cache_hits = evaluator.cache_hits() - hits_before;
        stats.tree_size = tree.len();
        stats.total_time = start.elapsed();
        debug!(
            "negamax chose {:?} with score {} at depth {} in {:?}",
            tree.get(best).last_play(),
            score,
            stats.max_depth,
            stats.total_time
        );
        Ok(best)
    }
}

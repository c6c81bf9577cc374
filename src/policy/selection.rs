//! Selection policies for the MCTS algorithm
//!
//! Selection policies determine which child to visit during the selection
//! phase of MCTS, balancing exploration and exploitation.

use crate::{
    tree::{GameTree, NodeId},
    utils::ucb1_value,
};

/// Trait for policies that select nodes to explore
pub trait SelectionPolicy: Send + Sync {
    /// Selects a child of `parent`, or `None` if it has no children
    fn select_child(&self, tree: &GameTree, parent: NodeId) -> Option<NodeId>;
}

/// Upper Confidence Bound 1 (UCB1) selection policy
///
/// ```text
/// UCB1 = perspective * mean_score + exploration_constant * sqrt(ln(parent_visits) / child_visits)
/// ```
///
/// Node totals are kept from the engine's side. `perspective` is -1 when the
/// opponent is the one choosing between the children, so each side descends
/// into the move that is best for itself.
///
/// An unvisited child is returned as soon as the scan meets it, and ties
/// between equal UCB1 values go to the child scanned first.
#[derive(Debug, Clone)]
pub struct UCB1Policy {
    /// Exploration constant that controls the balance between exploration and exploitation.
    /// Higher values favor exploration of less-visited nodes.
    pub exploration_constant: f64,
}

impl UCB1Policy {
    /// Creates a new UCB1 policy with the given exploration constant
    pub fn new(exploration_constant: f64) -> Self {
        UCB1Policy {
            exploration_constant,
        }
    }
}

impl Default for UCB1Policy {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl SelectionPolicy for UCB1Policy {
    fn select_child(&self, tree: &GameTree, parent: NodeId) -> Option<NodeId> {
        let node = tree.get(parent);
        let children = node.children()?;
        let perspective = node.position.next_player().color() as f64;
        let parent_visits = node.visits;

        let mut best: Option<(NodeId, f64)> = None;
        for id in children.iter() {
            let child = tree.get(id);
            if child.visits == 0 {
                return Some(id);
            }

            let value = ucb1_value(
                child.total_score,
                child.visits,
                parent_visits,
                perspective,
                self.exploration_constant,
            );
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((id, value)),
            }
        }

        best.map(|(id, _)| id)
    }
}

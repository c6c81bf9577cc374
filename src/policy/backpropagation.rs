//! Backpropagation policies
//!
//! A policy folds one rollout reward into a node on the path from the
//! selected node back to the search root.

use crate::tree::Node;

/// Updates node statistics with a rollout reward
pub trait BackpropagationPolicy: Send + Sync {
    /// Updates statistics for a node based on a rollout reward
    fn update_stats(&self, node: &mut Node, reward: i32);
}

/// Standard backpropagation policy
///
/// This policy simply increments the visit count and adds the reward
/// to the total score.
#[derive(Debug, Clone)]
pub struct StandardPolicy;

impl StandardPolicy {
    /// Creates a new standard policy
    pub fn new() -> Self {
        StandardPolicy
    }
}

impl Default for StandardPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl BackpropagationPolicy for StandardPolicy {
    fn update_stats(&self, node: &mut Node, reward: i32) {
        node.visits += 1;
        node.total_score += i64::from(reward);
    }
}

//! UCB1 arithmetic shared by the tree and the selection policy
//!
//! Rollout totals are integers kept from the engine's side; everything here
//! works on those raw totals.

/// Average rollout reward, 0.0 for an unvisited node
pub fn mean_score(total_score: i64, visits: u64) -> f64 {
    if visits == 0 {
        return 0.0;
    }
    total_score as f64 / visits as f64
}

/// `c * sqrt(ln(parent_visits) / child_visits)`, infinite for an unvisited child
pub fn exploration_bonus(parent_visits: u64, child_visits: u64, exploration_constant: f64) -> f64 {
    if child_visits == 0 {
        return f64::INFINITY;
    }
    exploration_constant * ((parent_visits as f64).ln() / child_visits as f64).sqrt()
}

/// UCB1 value of a child seen by the player choosing at its parent
///
/// `perspective` is the chooser's colour: +1.0 for the engine, -1.0 for the
/// opponent, which flips the sign of the engine-side mean.
pub fn ucb1_value(
    total_score: i64,
    visits: u64,
    parent_visits: u64,
    perspective: f64,
    exploration_constant: f64,
) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }
    perspective * mean_score(total_score, visits)
        + exploration_bonus(parent_visits, visits, exploration_constant)
}

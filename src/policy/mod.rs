//! Policies for the phases of Monte Carlo Tree Search
//!
//! - Selection policies: which child to descend into
//! - Simulation policies: how to play out a position to the end
//! - Backpropagation policies: how a rollout result updates node statistics

pub mod backpropagation;
pub mod selection;
pub mod simulation;

pub use backpropagation::{BackpropagationPolicy, StandardPolicy};
pub use selection::{SelectionPolicy, UCB1Policy};
pub use simulation::{RandomPolicy, SimulationPolicy};

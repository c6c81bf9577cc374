//! Turn-level driver that owns the tree, the evaluator and a search strategy

use std::time::Duration;

use log::debug;

use crate::{
    board::{PlayPosition, Player},
    config::{Algorithm, SearchConfig},
    evaluation::Evaluator,
    game_state::Position,
    mcts::MonteCarlo,
    negamax::Negamax,
    stats::SearchStatistics,
    tree::{GameTree, NodeId},
    EngineError, Result,
};

/// A strategy that picks one child of a tree node
pub trait SearchStrategy {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Searches from `root` and returns the child to play
    ///
    /// `budget` overrides the strategy's own time limit for this call.
    fn choose(
        &mut self,
        tree: &mut GameTree,
        root: NodeId,
        evaluator: &mut Evaluator,
        budget: Option<Duration>,
        stats: &mut SearchStatistics,
    ) -> Result<NodeId>;
}

/// Plays one side of a game, keeping the search tree between turns
///
/// After every committed move, by either side, the tree is cut down to the
/// subtree below that move.
pub struct Engine {
    tree: GameTree,
    evaluator: Evaluator,
    strategy: Box<dyn SearchStrategy>,
    statistics: SearchStatistics,
}

impl Engine {
    /// Creates an engine for `position` using the configured algorithm
    pub fn new(position: Position, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let strategy: Box<dyn SearchStrategy> = match config.algorithm {
            Algorithm::Negamax => {
                let mut negamax = Negamax::new(config.depth);
                negamax.max_time = config.max_time;
                Box::new(negamax)
            }
            Algorithm::MonteCarlo => Box::new(MonteCarlo::new(&config)),
        };

        Ok(Engine {
            tree: GameTree::new(position),
            evaluator: Evaluator::default(),
            strategy,
            statistics: SearchStatistics::new(),
        })
    }

    /// Creates an engine for a new game with `first` to move
    pub fn new_game(first: Player, config: SearchConfig) -> Result<Self> {
        Self::new(Position::new(first), config)
    }

    /// Replaces the search strategy
    pub fn with_strategy<S: SearchStrategy + 'static>(mut self, strategy: S) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    /// Replaces the evaluator
    pub fn with_evaluator(mut self, evaluator: Evaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Position at the root of the tree
    pub fn position(&self) -> &Position {
        &self.tree.get(self.tree.root()).position
    }

    pub fn tree(&self) -> &GameTree {
        &self.tree
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Statistics of the most recent search
    pub fn get_statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Applies a move by whichever side is to move
    pub fn advance(&mut self, play: PlayPosition) -> Result<&Position> {
        let child = self.tree.advance(self.tree.root(), play)?;
        self.tree.reroot(child);
        Ok(self.position())
    }

    /// Applies a move given in absolute 9x9 coordinates
    pub fn advance_coordinate(&mut self, row: i32, col: i32) -> Result<&Position> {
        self.advance(PlayPosition::from_coordinate(row, col)?)
    }

    /// Searches with the configured limits and plays the chosen move
    pub fn choose_move(&mut self) -> Result<PlayPosition> {
        self.search(None)
    }

    /// Searches for at most `budget` and plays the chosen move
    ///
    /// The budget takes the place of the configured time limit. For MCTS it
    /// also lifts the configured iteration cap, so the search uses the whole
    /// budget.
    pub fn choose_move_within(&mut self, budget: Duration) -> Result<PlayPosition> {
        self.search(Some(budget))
    }

    fn search(&mut self, budget: Option<Duration>) -> Result<PlayPosition> {
        let root = self.tree.root();
        let mut stats = SearchStatistics::new();
        let chosen = self.strategy.choose(
            &mut self.tree,
            root,
            &mut self.evaluator,
            budget,
            &mut stats,
        )?;
        let play = self.tree.get(chosen).last_play().ok_or_else(|| {
            EngineError::InvariantViolation("chosen child has no last play".to_string())
        })?;

        debug!("{} played {}", self.strategy.name(), play);
        self.tree.reroot(chosen);
        self.statistics = stats;
        Ok(play)
    }
}

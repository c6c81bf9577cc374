//! Static evaluation of positions
//!
//! The evaluator scores a position from the engine's side: positive values
//! favour [`Player::Me`], negative values favour [`Player::Opponent`]. Feature
//! sums for the board result and for every micro-board are memoized on the
//! exact 9-cell contents, so repeated boards cost a single hash lookup.

use std::collections::HashMap;

use crate::{
    board::{
        is_won_by, two_in_line_count, Board, BoardResult, Cell, MicroBoard, Player, CENTER,
        CORNERS,
    },
    game_state::Position,
};

/// Feature weights used by the [`Evaluator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weights {
    /// Returned when the engine has won the macro game
    pub win: i32,
    /// Returned when the opponent has won the macro game
    pub lose: i32,
    /// Each micro-board won
    pub small_board_win: i32,
    /// Bonus when the won micro-board is the center one
    pub win_center: i32,
    /// Bonus when the won micro-board is a corner one
    pub win_corner: i32,
    /// Holding the center cell of any micro-board
    pub center_square_any_board: i32,
    /// Each cell held in the center micro-board
    pub square_in_center_board: i32,
    /// Each open macro line with two won micro-boards
    pub two_board_win: i32,
    /// Each open line with two marks inside a micro-board
    pub two_square_win: i32,
}

impl Default for Weights {
    fn default() -> Self {
        Weights {
            win: 10_000,
            lose: -10_000,
            small_board_win: 10,
            win_center: 10,
            win_corner: 3,
            center_square_any_board: 1,
            square_in_center_board: 1,
            two_board_win: 20,
            two_square_win: 1,
        }
    }
}

/// Weighted heuristic evaluator with owned memoization caches
///
/// Caches only ever grow: scored boards never change, so entries cannot go
/// stale. [`Evaluator::cache_len`] reports their size for accounting.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    weights: Weights,
    result_cache: HashMap<BoardResult, i32>,
    micro_cache: HashMap<MicroBoard, i32>,
    cache_hits: u64,
}

impl Evaluator {
    pub fn new(weights: Weights) -> Self {
        Evaluator {
            weights,
            ..Default::default()
        }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Scores a position from the engine's side
    pub fn score(&mut self, position: &Position) -> i32 {
        self.evaluate(position.board(), position.result())
    }

    /// Scores a macro board given its board result
    pub fn evaluate(&mut self, board: &Board, result: &BoardResult) -> i32 {
        if is_won_by(result, Player::Opponent) {
            return self.weights.lose;
        }
        if is_won_by(result, Player::Me) {
            return self.weights.win;
        }
        if board.is_finished(result) {
            return 0;
        }

        let mut score = self.cached_result_score(result);
        for micro in board.micro_boards() {
            score += self.cached_micro_score(micro);
        }
        let center = board.micro(CENTER);
        score += self.center_board_score(center, Player::Me)
            - self.center_board_score(center, Player::Opponent);
        score
    }

    /// Number of memoized board results and micro-boards
    pub fn cache_len(&self) -> (usize, usize) {
        (self.result_cache.len(), self.micro_cache.len())
    }

    /// Lookups answered from the caches so far
    pub fn cache_hits(&self) -> u64 {
        self.cache_hits
    }

    fn cached_result_score(&mut self, result: &BoardResult) -> i32 {
        if let Some(&score) = self.result_cache.get(result) {
            self.cache_hits += 1;
            return score;
        }
        let score =
            self.result_score(result, Player::Me) - self.result_score(result, Player::Opponent);
        self.result_cache.insert(*result, score);
        score
    }

    fn cached_micro_score(&mut self, micro: &MicroBoard) -> i32 {
        if let Some(&score) = self.micro_cache.get(micro) {
            self.cache_hits += 1;
            return score;
        }
        let score = self.micro_score(micro, Player::Me) - self.micro_score(micro, Player::Opponent);
        self.micro_cache.insert(*micro, score);
        score
    }

    fn result_score(&self, result: &BoardResult, player: Player) -> i32 {
        let mark = Cell::from(player);
        let won: i32 = (0..9)
            .filter(|&i| result[i] == mark)
            .map(|i| self.small_board_win_score(i))
            .sum();
        won + two_in_line_count(result, player) as i32 * self.weights.two_board_win
    }

    fn small_board_win_score(&self, board: usize) -> i32 {
        let mut score = self.weights.small_board_win;
        if board == CENTER {
            score += self.weights.win_center;
        } else if CORNERS.contains(&board) {
            score += self.weights.win_corner;
        }
        score
    }

    fn micro_score(&self, micro: &MicroBoard, player: Player) -> i32 {
        let mut score = 0;
        if micro[CENTER] == Cell::from(player) {
            score += self.weights.center_square_any_board;
        }
        score + two_in_line_count(micro, player) as i32 * self.weights.two_square_win
    }

    fn center_board_score(&self, center: &MicroBoard, player: Player) -> i32 {
        let mark = Cell::from(player);
        center.iter().filter(|&&c| c == mark).count() as i32 * self.weights.square_in_center_board
    }
}

//! Board model for Ultimate Tic-Tac-Toe
//!
//! The macro board is a 3x3 arrangement of 3x3 micro-boards. Cells and
//! micro-boards are both numbered 0..8 in row-major order. The "board result"
//! holds one cell per micro-board and is what the macro-level win check runs on.

use std::fmt;

use crate::{EngineError, Result};

/// The 8 three-cell lines that win a 3x3 board
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Index of the center cell (and the center micro-board)
pub const CENTER: usize = 4;

/// Corner indices of a 3x3 board
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// One of the two sides. `Me` is the side the engine plays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Me,
    Opponent,
}

impl Player {
    /// Returns the other side
    pub fn other(self) -> Self {
        match self {
            Player::Me => Player::Opponent,
            Player::Opponent => Player::Me,
        }
    }

    /// Negamax colour of this side: +1 for `Me`, -1 for `Opponent`
    pub fn color(self) -> i32 {
        match self {
            Player::Me => 1,
            Player::Opponent => -1,
        }
    }
}

/// Content of a single cell, or of a board result slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    Me,
    Opponent,
    #[default]
    Empty,
}

impl Cell {
    /// Swaps the owner of a marked cell; empty stays empty
    pub fn swapped(self) -> Self {
        match self {
            Cell::Me => Cell::Opponent,
            Cell::Opponent => Cell::Me,
            Cell::Empty => Cell::Empty,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::Me => Cell::Me,
            Player::Opponent => Cell::Opponent,
        }
    }
}

/// A single 3x3 board
pub type MicroBoard = [Cell; 9];

/// Per-micro-board status: `Me`/`Opponent` when won, otherwise `Empty`
pub type BoardResult = [Cell; 9];

/// Outcome of a game, seen from the engine's side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
    Ongoing,
}

impl Outcome {
    /// Derives the outcome from a macro board and its result
    ///
    /// A loss is checked before a win, matching the evaluator's terminal order.
    pub fn of(board: &Board, result: &BoardResult) -> Self {
        if is_won_by(result, Player::Opponent) {
            Outcome::Loss
        } else if is_won_by(result, Player::Me) {
            Outcome::Win
        } else if board.is_finished(result) {
            Outcome::Draw
        } else {
            Outcome::Ongoing
        }
    }

    /// Returns true once the game is decided
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }

    /// Rollout value: +1 win, -1 loss, 0 otherwise
    pub fn reward(self) -> i32 {
        match self {
            Outcome::Win => 1,
            Outcome::Loss => -1,
            Outcome::Draw | Outcome::Ongoing => 0,
        }
    }
}

/// Returns true if `player` holds a whole line on `cells`
pub fn is_won_by(cells: &[Cell; 9], player: Player) -> bool {
    let mark = Cell::from(player);
    WIN_LINES
        .iter()
        .any(|line| line.iter().all(|&i| cells[i] == mark))
}

/// Returns true if no cell is empty
pub fn is_full(cells: &[Cell; 9]) -> bool {
    cells.iter().all(|&c| c != Cell::Empty)
}

/// Result slot for one micro-board
pub fn micro_result(cells: &MicroBoard) -> Cell {
    if is_won_by(cells, Player::Me) {
        Cell::Me
    } else if is_won_by(cells, Player::Opponent) {
        Cell::Opponent
    } else {
        Cell::Empty
    }
}

/// Counts lines where `player` has exactly two marks and the third cell is empty
pub fn two_in_line_count(cells: &[Cell; 9], player: Player) -> u32 {
    let mark = Cell::from(player);
    WIN_LINES
        .iter()
        .filter(|line| {
            let owned = line.iter().filter(|&&i| cells[i] == mark).count();
            let empty = line.iter().filter(|&&i| cells[i] == Cell::Empty).count();
            owned == 2 && empty == 1
        })
        .count() as u32
}

/// A single placement: micro-board index and cell index, both 0..8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayPosition {
    pub board: usize,
    pub cell: usize,
}

impl PlayPosition {
    pub fn new(board: usize, cell: usize) -> Self {
        PlayPosition { board, cell }
    }

    /// Translates absolute 9x9 (row, col) into a play position
    pub fn from_coordinate(row: i32, col: i32) -> Result<Self> {
        if !(0..9).contains(&row) || !(0..9).contains(&col) {
            return Err(EngineError::InvalidCoordinate { row, col });
        }
        let (row, col) = (row as usize, col as usize);
        Ok(PlayPosition {
            board: (row / 3) * 3 + col / 3,
            cell: (row % 3) * 3 + col % 3,
        })
    }

    /// Absolute 9x9 (row, col) of this play
    pub fn to_coordinate(self) -> (usize, usize) {
        let row = (self.board / 3) * 3 + self.cell / 3;
        let col = (self.board % 3) * 3 + self.cell % 3;
        (row, col)
    }
}

impl fmt::Display for PlayPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (row, col) = self.to_coordinate();
        write!(f, "board {} cell {} ({} {})", self.board, self.cell, row, col)
    }
}

/// The full 9x9 macro board, stored as 9 contiguous micro-boards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [MicroBoard; 9],
}

impl Board {
    /// Creates an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board from its 9 micro-boards
    pub fn from_micro_boards(cells: [MicroBoard; 9]) -> Self {
        Board { cells }
    }

    pub fn micro(&self, board: usize) -> &MicroBoard {
        &self.cells[board]
    }

    pub fn micro_boards(&self) -> &[MicroBoard; 9] {
        &self.cells
    }

    pub fn get(&self, play: PlayPosition) -> Cell {
        self.cells[play.board][play.cell]
    }

    pub fn set(&mut self, play: PlayPosition, cell: Cell) {
        self.cells[play.board][play.cell] = cell;
    }

    /// Computes the board result from scratch
    pub fn result(&self) -> BoardResult {
        let mut result = [Cell::Empty; 9];
        for (slot, micro) in result.iter_mut().zip(self.cells.iter()) {
            *slot = micro_result(micro);
        }
        result
    }

    /// Patches `previous` after `play`: only the played micro-board is recomputed
    pub fn result_after(&self, previous: &BoardResult, play: PlayPosition) -> BoardResult {
        let mut result = *previous;
        result[play.board] = micro_result(&self.cells[play.board]);
        result
    }

    /// True when no unresolved micro-board still has an open cell
    pub fn is_finished(&self, result: &BoardResult) -> bool {
        result
            .iter()
            .zip(self.cells.iter())
            .all(|(&slot, micro)| slot != Cell::Empty || is_full(micro))
    }

    /// The same board with every mark handed to the other side
    pub fn swapped(&self) -> Self {
        let mut cells = self.cells;
        for micro in cells.iter_mut() {
            for cell in micro.iter_mut() {
                *cell = cell.swapped();
            }
        }
        Board { cells }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..9 {
            if row > 0 && row % 3 == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for col in 0..9 {
                if col > 0 && col % 3 == 0 {
                    write!(f, "| ")?;
                }
                let play = PlayPosition::new((row / 3) * 3 + col / 3, (row % 3) * 3 + col % 3);
                let symbol = match self.get(play) {
                    Cell::Me => 'X',
                    Cell::Opponent => 'O',
                    Cell::Empty => '.',
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

//! Game positions and move generation.
//!
//! A [`Position`] is everything a search needs to know about one point of
//! the game: the macro board, its derived board result, who moves next,
//! where the last mark went, and the resulting outcome.

use crate::{
    board::{is_full, Board, BoardResult, Cell, Outcome, PlayPosition, Player},
    EngineError, Result,
};

/// A game position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    result: BoardResult,
    next_player: Player,
    last_play: Option<PlayPosition>,
    outcome: Outcome,
}

impl Position {
    /// Creates the empty starting position with `first` to move
    pub fn new(first: Player) -> Self {
        Self::from_board(Board::new(), first, None)
    }

    /// Creates a position from an arbitrary board, recomputing the result from scratch
    pub fn from_board(board: Board, next_player: Player, last_play: Option<PlayPosition>) -> Self {
        let result = board.result();
        let outcome = Outcome::of(&board, &result);
        Position {
            board,
            result,
            next_player,
            last_play,
            outcome,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn result(&self) -> &BoardResult {
        &self.result
    }

    pub fn next_player(&self) -> Player {
        self.next_player
    }

    pub fn last_play(&self) -> Option<PlayPosition> {
        self.last_play
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Micro-board the next move is forced into, if any
    ///
    /// The target is the board matching the last play's cell index, unless that
    /// board is already won or has no open cell, in which case play is free.
    pub fn forced_board(&self) -> Option<usize> {
        let target = self.last_play?.cell;
        if self.result[target] != Cell::Empty || is_full(self.board.micro(target)) {
            None
        } else {
            Some(target)
        }
    }

    /// Appends every legal play to `moves`
    ///
    /// The buffer is cleared first so rollouts can reuse one allocation.
    pub fn legal_moves_into(&self, moves: &mut Vec<PlayPosition>) {
        moves.clear();
        if self.is_terminal() {
            return;
        }
        match self.forced_board() {
            Some(board) => self.open_cells_into(board, moves),
            None => {
                for board in 0..9 {
                    if self.result[board] == Cell::Empty {
                        self.open_cells_into(board, moves);
                    }
                }
            }
        }
    }

    /// Returns every legal play, in board then cell order
    pub fn legal_moves(&self) -> Vec<PlayPosition> {
        let mut moves = Vec::with_capacity(81);
        self.legal_moves_into(&mut moves);
        moves
    }

    fn open_cells_into(&self, board: usize, moves: &mut Vec<PlayPosition>) {
        let micro = self.board.micro(board);
        moves.extend(
            (0..9)
                .filter(|&cell| micro[cell] == Cell::Empty)
                .map(|cell| PlayPosition::new(board, cell)),
        );
    }

    /// Returns true if `play` is one of the legal moves
    pub fn is_legal(&self, play: PlayPosition) -> bool {
        if self.is_terminal() || play.board >= 9 || play.cell >= 9 {
            return false;
        }
        if self.board.get(play) != Cell::Empty {
            return false;
        }
        match self.forced_board() {
            Some(board) => play.board == board,
            None => self.result[play.board] == Cell::Empty,
        }
    }

    /// Builds the child position reached by `play`, leaving `self` untouched
    ///
    /// The play is assumed legal; use [`Position::play`] for checked input.
    pub fn child(&self, play: PlayPosition) -> Position {
        let mut next = self.clone();
        next.play_in_place(play);
        next
    }

    /// Checked variant of [`Position::child`]
    pub fn play(&self, play: PlayPosition) -> Result<Position> {
        if self.is_terminal() {
            return Err(EngineError::GameOver);
        }
        if !self.is_legal(play) {
            return Err(EngineError::IllegalMove(play));
        }
        Ok(self.child(play))
    }

    /// Applies `play` to this position directly
    ///
    /// Only meant for disposable copies, such as the position a rollout walks.
    pub fn play_in_place(&mut self, play: PlayPosition) {
        self.board.set(play, Cell::from(self.next_player));
        self.result = self.board.result_after(&self.result, play);
        self.outcome = Outcome::of(&self.board, &self.result);
        self.next_player = self.next_player.other();
        self.last_play = Some(play);
    }
}

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use ultimate_ttt::{Board, Cell, Evaluator, PlayPosition, Player, Position};

/// Builds a board from 9 text rows in absolute layout
///
/// `X` is the engine, `O` the opponent and `.` an empty cell; spaces and
/// `|` are ignored so rows can be written as `"X.. | ... | ..."`.
pub fn parse_board(rows: [&str; 9]) -> Board {
    let mut cells = [[Cell::Empty; 9]; 9];
    for (row, text) in rows.iter().enumerate() {
        let marks: Vec<Cell> = text
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .map(|c| match c {
                'X' => Cell::Me,
                'O' => Cell::Opponent,
                '.' => Cell::Empty,
                other => panic!("unexpected board character {:?}", other),
            })
            .collect();
        assert_eq!(marks.len(), 9, "row {} must have 9 cells", row);
        for (col, mark) in marks.into_iter().enumerate() {
            cells[(row / 3) * 3 + col / 3][(row % 3) * 3 + col % 3] = mark;
        }
    }
    Board::from_micro_boards(cells)
}

/// Engine to move in board 2 and one play, (2, 2), away from winning
pub fn winning_position() -> Position {
    let board = parse_board([
        "XXX | XXX | XX.",
        "... | ... | ...",
        "... | ... | ...",
        "... | ... | ..O",
        "... | ... | ...",
        "... | ... | ...",
        "... | ... | ...",
        "... | ... | ...",
        "... | ... | ...",
    ]);
    Position::from_board(board, Player::Me, Some(PlayPosition::new(5, 2)))
}

/// Micro-board filled in a drawn pattern: X O X / X O O / O X X
pub fn drawn_micro() -> [Cell; 9] {
    use Cell::{Me as X, Opponent as O};
    [X, O, X, X, O, O, O, X, X]
}

/// Plays up to `plies` random legal moves from the empty board
pub fn random_position(seed: u64, plies: usize) -> Position {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut position = Position::new(Player::Me);
    for _ in 0..plies {
        if position.is_terminal() {
            break;
        }
        let moves = position.legal_moves();
        let play = *moves.choose(&mut rng).expect("ongoing position has moves");
        position.play_in_place(play);
    }
    position
}

/// Random positions that are still ongoing after `plies` moves
pub fn ongoing_positions(count: usize, plies: usize) -> Vec<Position> {
    (0..)
        .map(|seed| random_position(seed, plies))
        .filter(|p| !p.is_terminal())
        .take(count)
        .collect()
}

/// Plain minimax in negamax form, without pruning or caching
pub fn minimax(position: &Position, evaluator: &mut Evaluator, depth: u32, color: i32) -> i32 {
    if depth == 0 || position.is_terminal() {
        return color * evaluator.score(position);
    }
    position
        .legal_moves()
        .into_iter()
        .map(|play| -minimax(&position.child(play), evaluator, depth - 1, -color))
        .max()
        .expect("ongoing position has moves")
}

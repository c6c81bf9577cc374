mod common;

use ultimate_ttt::{Board, Cell, EngineError, GameTree, PlayPosition, Player, Position};

use common::{drawn_micro, parse_board, random_position};

#[test]
fn test_empty_board_has_81_moves() {
    let position = Position::new(Player::Me);
    let moves = position.legal_moves();
    assert_eq!(moves.len(), 81);
    assert_eq!(moves[0], PlayPosition::new(0, 0));
    assert_eq!(moves[80], PlayPosition::new(8, 8));
}

#[test]
fn test_expanding_the_empty_board() {
    let mut tree = GameTree::new(Position::new(Player::Me));
    let root = tree.root();
    let (children, created) = tree.expand(root);
    assert_eq!(children.len(), 81);
    assert_eq!(created, 81);

    for child in children.iter() {
        assert_eq!(tree.get(child).position.next_player(), Player::Opponent);
        assert_eq!(tree.parent(child), Some(root));
    }

    // (0, 0) sends the opponent back to board 0, which now has 8 open cells
    let first = children.first().unwrap();
    let (grandchildren, _) = tree.expand(first);
    assert_eq!(grandchildren.len(), 8);

    // (0, 1) sends the opponent to the untouched board 1
    let second = children.iter().nth(1).unwrap();
    let (grandchildren, _) = tree.expand(second);
    assert_eq!(grandchildren.len(), 9);
    for grandchild in grandchildren.iter() {
        let position = &tree.get(grandchild).position;
        assert_eq!(position.last_play().unwrap().board, 1);
        assert_eq!(position.next_player(), Player::Me);
    }
}

#[test]
fn test_move_is_forced_into_matching_board() {
    let position = Position::new(Player::Me).child(PlayPosition::new(0, 4));
    assert_eq!(position.forced_board(), Some(4));

    let moves = position.legal_moves();
    assert_eq!(moves.len(), 9);
    assert!(moves.iter().all(|play| play.board == 4));
    assert!(!position.is_legal(PlayPosition::new(0, 0)));
}

#[test]
fn test_won_target_board_frees_the_move() {
    let board = parse_board([
        "... | ... | ...",
        ".X. | ... | ...",
        "... | ... | ...",
        "... | XXX | ...",
        "... | ... | ...",
        "... | ... | ...",
        "... | ... | ...",
        "... | ... | ...",
        "... | ... | ...",
    ]);
    let position = Position::from_board(board, Player::Opponent, Some(PlayPosition::new(0, 4)));
    assert_eq!(position.result()[4], Cell::Me);
    assert_eq!(position.forced_board(), None);

    let moves = position.legal_moves();
    assert_eq!(moves.len(), 8 + 7 * 9);
    assert!(moves.iter().all(|play| play.board != 4));
}

#[test]
fn test_full_target_board_frees_the_move() {
    let mut micro_boards = [[Cell::Empty; 9]; 9];
    micro_boards[4] = drawn_micro();
    micro_boards[0][4] = Cell::Me;
    let board = Board::from_micro_boards(micro_boards);
    let position = Position::from_board(board, Player::Opponent, Some(PlayPosition::new(0, 4)));

    assert_eq!(position.result()[4], Cell::Empty);
    assert_eq!(position.forced_board(), None);
    assert_eq!(position.legal_moves().len(), 8 + 7 * 9);
}

#[test]
fn test_checked_play() {
    let position = Position::new(Player::Me).child(PlayPosition::new(0, 4));

    assert_eq!(
        position.play(PlayPosition::new(3, 0)),
        Err(EngineError::IllegalMove(PlayPosition::new(3, 0)))
    );

    let next = position.play(PlayPosition::new(4, 0)).unwrap();
    assert_eq!(next.next_player(), Player::Me);
    assert_eq!(next.board().get(PlayPosition::new(4, 0)), Cell::Opponent);

    // Back into board 0, where (0, 4) is taken
    assert_eq!(
        next.play(PlayPosition::new(0, 4)),
        Err(EngineError::IllegalMove(PlayPosition::new(0, 4)))
    );
}

#[test]
fn test_no_moves_once_decided() {
    let board = parse_board([
        "XXX | XXX | XXX",
        "... | ... | ...",
        "... | ... | ...",
        "... | ... | ...",
        "... | ... | ...",
        "... | ... | ...",
        "... | ... | ...",
        "... | ... | ...",
        "... | ... | ...",
    ]);
    let position = Position::from_board(board, Player::Opponent, Some(PlayPosition::new(2, 2)));
    assert!(position.is_terminal());
    assert!(position.legal_moves().is_empty());
    assert_eq!(
        position.play(PlayPosition::new(3, 0)),
        Err(EngineError::GameOver)
    );
}

#[test]
fn test_ongoing_positions_always_have_moves() {
    for seed in 0..60 {
        for plies in [10, 25, 40, 55] {
            let position = random_position(seed, plies);
            let moves = position.legal_moves();
            if position.is_terminal() {
                assert!(moves.is_empty());
                continue;
            }
            assert!(!moves.is_empty(), "seed {} plies {}", seed, plies);
            for play in moves {
                assert!(position.is_legal(play));
                assert_eq!(position.board().get(play), Cell::Empty);
                assert_eq!(position.result()[play.board], Cell::Empty);
            }
        }
    }
}

#[test]
fn test_play_in_place_matches_child() {
    let position = random_position(7, 12);
    if let Some(&play) = position.legal_moves().first() {
        let mut copy = position.clone();
        copy.play_in_place(play);
        assert_eq!(copy, position.child(play));
        assert_eq!(copy.last_play(), Some(play));
        assert_eq!(copy.next_player(), position.next_player().other());
    }
}

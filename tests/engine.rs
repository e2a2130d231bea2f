use std::time::Duration;

use ataxx::ai::evaluate;
use ataxx::game::{FirstLegalMoveSelector, Game, MoveSelector};
use ataxx::{Board, Cell, Color, Decision, Move, MoveKind, Position, SearchConfig, Searcher};

fn lone_pieces() -> Board {
    Board::empty()
        .with_cell(Position::new(3, 3), Cell::Occupied(Color::Red))
        .with_cell(Position::new(3, 4), Cell::Occupied(Color::Blue))
}

#[test]
fn clone_beside_enemy_converts_it() {
    let board = lone_pieces();
    let clone = Move {
        from: Position::new(3, 3),
        to: Position::new(2, 4),
        kind: MoveKind::Clone,
    };

    assert!(board.legal_moves(Color::Red).contains(&clone));
    let next = board.apply(&clone, Color::Red);

    assert_eq!(next.cell(Position::new(3, 3)), Cell::Occupied(Color::Red));
    assert_eq!(next.cell(Position::new(2, 4)), Cell::Occupied(Color::Red));
    assert_eq!(next.cell(Position::new(3, 4)), Cell::Occupied(Color::Red));
    assert_eq!(next.count(Color::Blue), 0);
    assert_eq!(board.count(Color::Blue), 1);
}

#[test]
fn engine_answers_with_a_legal_move() {
    let board = lone_pieces();
    let config = SearchConfig::deep()
        .with_time_budget(Duration::from_millis(300));

    let result = Searcher::new(config).search(&board, Color::Red);

    let mv = result.decision.as_move().expect("red has moves");
    assert!(board.legal_moves(Color::Red).contains(&mv));
    assert!(result.depth >= 1);
    assert!(result.nodes > 0);
}

#[test]
fn evaluation_is_antisymmetric_along_a_game() {
    let mut game = Game::new();
    for _ in 0..40 {
        if game.is_game_over() {
            break;
        }
        let board = *game.board();
        assert_eq!(evaluate(&board, Color::Red), -evaluate(&board, Color::Blue));
        game.step(&mut FirstLegalMoveSelector).unwrap();
    }
}

#[test]
fn engine_plays_a_whole_game_legally() {
    let config = SearchConfig::compact().with_time_budget(Duration::from_secs(10));
    let mut engine = Searcher::new(config);
    let mut baseline = FirstLegalMoveSelector;
    let mut game = Game::new();

    while !game.is_game_over() && game.plies() < 500 {
        let before = game.to_game_state();
        let selector: &mut dyn MoveSelector = match game.to_move() {
            Color::Red => &mut engine,
            Color::Blue => &mut baseline,
        };
        let decision = game.step(selector).unwrap();
        let after = game.to_game_state();

        assert!(after.red_count as u32 + after.blue_count as u32 <= 64);
        if decision == Decision::Pass {
            assert!(after.is_pass);
            assert_eq!(before.board, after.board);
        }
    }

    if !game.is_game_over() {
        return;
    }
    let result = game.to_game_result();
    assert_eq!(
        result.winner,
        match result.red_count.cmp(&result.blue_count) {
            std::cmp::Ordering::Greater => Some(Color::Red),
            std::cmp::Ordering::Less => Some(Color::Blue),
            std::cmp::Ordering::Equal => None,
        }
    );
}

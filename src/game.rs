use crate::ai::search::Searcher;
use crate::board::Board;
use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::types::{Color, Decision, GameResult, GameState, Move, Position};

pub trait MoveSelector {
    fn select_move(&mut self, board: &Board, color: Color) -> Decision;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&mut self, board: &Board, color: Color) -> Decision {
        board
            .legal_moves(color)
            .first()
            .map_or(Decision::Pass, |mv| Decision::Move(*mv))
    }
}

impl<C: Clock> MoveSelector for Searcher<C> {
    fn select_move(&mut self, board: &Board, color: Color) -> Decision {
        self.search(board, color).decision
    }
}

/// Referee for a local game: turn order, forced passes and game end.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    to_move: Color,
    is_game_over: bool,
    is_pass: bool,
    flipped: Vec<Position>,
    plies: u32,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Standard start, Red to move.
    pub fn new() -> Self {
        Self::from_board(Board::initial(), Color::Red)
    }

    pub fn from_board(board: Board, to_move: Color) -> Self {
        let mut game = Self {
            board,
            to_move,
            is_game_over: false,
            is_pass: false,
            flipped: Vec::new(),
            plies: 0,
        };
        game.refresh_game_over();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    /// Moves and passes played so far.
    pub fn plies(&self) -> u32 {
        self.plies
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.board.legal_moves(self.to_move)
    }

    pub fn play(&mut self, mv: Move) -> Result<()> {
        if self.is_game_over {
            return Err(Error::GameOver);
        }
        if !self.legal_moves().contains(&mv) {
            return Err(Error::IllegalMove(mv));
        }

        self.flipped = self.board.captures(&mv, self.to_move);
        self.board = self.board.apply(&mv, self.to_move);
        self.advance(false);
        Ok(())
    }

    pub fn pass(&mut self) -> Result<()> {
        if self.is_game_over {
            return Err(Error::GameOver);
        }
        if self.board.has_any_move(self.to_move) {
            return Err(Error::PassWithMoves);
        }

        self.flipped.clear();
        self.advance(true);
        Ok(())
    }

    /// Asks `selector` for the side to move and plays its answer.
    pub fn step<S: MoveSelector + ?Sized>(&mut self, selector: &mut S) -> Result<Decision> {
        if self.is_game_over {
            return Err(Error::GameOver);
        }

        let decision = selector.select_move(&self.board, self.to_move);
        match decision {
            Decision::Move(mv) => self.play(mv)?,
            Decision::Pass => self.pass()?,
        }
        Ok(decision)
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            board: self.board.to_rows(),
            to_move: self.to_move,
            red_count: self.board.count(Color::Red) as u8,
            blue_count: self.board.count(Color::Blue) as u8,
            is_game_over: self.is_game_over,
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let red_count = self.board.count(Color::Red);
        let blue_count = self.board.count(Color::Blue);
        GameResult {
            winner: if red_count > blue_count {
                Some(Color::Red)
            } else if blue_count > red_count {
                Some(Color::Blue)
            } else {
                None
            },
            red_count: red_count as u8,
            blue_count: blue_count as u8,
        }
    }

    fn advance(&mut self, is_pass: bool) {
        self.is_pass = is_pass;
        self.to_move = self.to_move.other();
        self.plies += 1;
        self.refresh_game_over();
    }

    fn refresh_game_over(&mut self) {
        self.is_game_over =
            !self.board.has_any_move(self.to_move) && !self.board.has_any_move(self.to_move.other());
    }
}

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;

use crate::error::{Error, Result};
use crate::types::{Cell, Color, Move, MoveKind, Position};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
const STEPS: [(i32, MoveKind); 2] = [(1, MoveKind::Clone), (2, MoveKind::Jump)];

/// Destinations reachable from one square, in direction then step order.
struct Reach {
    targets: Vec<(usize, MoveKind)>,
    mask: u64,
}

static REACH: Lazy<Vec<Reach>> = Lazy::new(|| (0..NUM_SQUARES).map(reach_from).collect());

static NEIGHBORS: Lazy<Vec<u64>> = Lazy::new(|| {
    (0..NUM_SQUARES)
        .map(|pos| {
            let (row, col) = pos_to_row_col(pos);
            DIRECTIONS
                .iter()
                .filter(|(dr, dc)| in_bounds(row + dr, col + dc))
                .fold(0u64, |mask, (dr, dc)| mask | bit(row_col_to_pos(row + dr, col + dc)))
        })
        .collect()
});

/// Ataxx board state represented by two bitboards.
///
/// The board is a plain `Copy` value: every operation returns a new board and
/// never mutates the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    red: u64,
    blue: u64,
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates the starting position: Red on a1/h8 corners, Blue on the other two.
    pub fn initial() -> Self {
        Self {
            red: bit(0) | bit(NUM_SQUARES - 1),
            blue: bit(BOARD_SIZE - 1) | bit(NUM_SQUARES - BOARD_SIZE),
        }
    }

    pub fn from_bitboards(red: u64, blue: u64) -> Self {
        debug_assert_eq!(red & blue, 0, "a square cannot hold both colors");
        Self { red, blue }
    }

    /// Parses `BOARD_SIZE` rows of `.`, `R` and `B`.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        if rows.len() != BOARD_SIZE {
            return Err(Error::RowCount {
                expected: BOARD_SIZE,
                actual: rows.len(),
            });
        }

        let mut board = Self::empty();
        for (row, text) in rows.iter().enumerate() {
            let text = text.as_ref();
            let len = text.chars().count();
            if len != BOARD_SIZE {
                return Err(Error::RowLength {
                    row,
                    expected: BOARD_SIZE,
                    actual: len,
                });
            }
            for (col, ch) in text.chars().enumerate() {
                let cell = Cell::from_char(ch).ok_or(Error::InvalidCell { row, col, ch })?;
                board = board.with_cell(Position::new(row as u8, col as u8), cell);
            }
        }
        Ok(board)
    }

    pub fn to_rows(&self) -> Vec<String> {
        (0..BOARD_SIZE)
            .map(|row| {
                (0..BOARD_SIZE)
                    .map(|col| self.cell(Position::new(row as u8, col as u8)).to_char())
                    .collect()
            })
            .collect()
    }

    pub fn cell(&self, pos: Position) -> Cell {
        let square = bit(position_index(pos));
        if (self.red & square) != 0 {
            Cell::Occupied(Color::Red)
        } else if (self.blue & square) != 0 {
            Cell::Occupied(Color::Blue)
        } else {
            Cell::Empty
        }
    }

    /// Returns a copy with one square overwritten.
    pub fn with_cell(self, pos: Position, cell: Cell) -> Self {
        let square = bit(position_index(pos));
        let mut red = self.red & !square;
        let mut blue = self.blue & !square;
        match cell {
            Cell::Empty => {}
            Cell::Occupied(Color::Red) => red |= square,
            Cell::Occupied(Color::Blue) => blue |= square,
        }
        Self { red, blue }
    }

    /// Enumerates legal moves for `color`: row-major over its pieces, then
    /// direction, then clone before jump.
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        let empty = self.empty_mask();
        let mut moves = Vec::new();

        for from in squares(self.mask(color)) {
            for &(to, kind) in &REACH[from].targets {
                if (empty & bit(to)) != 0 {
                    moves.push(Move {
                        from: index_position(from),
                        to: index_position(to),
                        kind,
                    });
                }
            }
        }

        moves
    }

    pub fn has_any_move(&self, color: Color) -> bool {
        let empty = self.empty_mask();
        squares(self.mask(color)).any(|from| (REACH[from].mask & empty) != 0)
    }

    /// Applies `mv` for `color`, flipping every enemy piece adjacent to the
    /// destination. A jump vacates the source square.
    pub fn apply(&self, mv: &Move, color: Color) -> Self {
        let to = position_index(mv.to);
        let (mut me, mut opp) = self.split(color);
        let flips = NEIGHBORS[to] & opp;

        me |= bit(to) | flips;
        opp &= !(flips | bit(to));
        if mv.kind == MoveKind::Jump {
            me &= !bit(position_index(mv.from));
        }

        Self::join(color, me, opp)
    }

    /// Squares that `apply(mv, color)` would flip.
    pub fn captures(&self, mv: &Move, color: Color) -> Vec<Position> {
        let (_, opp) = self.split(color);
        squares(NEIGHBORS[position_index(mv.to)] & opp)
            .map(index_position)
            .collect()
    }

    pub fn count(&self, color: Color) -> u32 {
        self.mask(color).count_ones()
    }

    pub fn empty_count(&self) -> u32 {
        self.empty_mask().count_ones()
    }

    /// Number of pieces of `color` with at least one free destination.
    /// Counts pieces, not moves.
    pub fn mobile_piece_count(&self, color: Color) -> u32 {
        let empty = self.empty_mask();
        squares(self.mask(color))
            .filter(|&from| (REACH[from].mask & empty) != 0)
            .count() as u32
    }

    fn mask(&self, color: Color) -> u64 {
        match color {
            Color::Red => self.red,
            Color::Blue => self.blue,
        }
    }

    fn empty_mask(&self) -> u64 {
        !(self.red | self.blue)
    }

    fn split(&self, color: Color) -> (u64, u64) {
        (self.mask(color), self.mask(color.other()))
    }

    fn join(color: Color, me: u64, opp: u64) -> Self {
        match color {
            Color::Red => Self { red: me, blue: opp },
            Color::Blue => Self { red: opp, blue: me },
        }
    }
}

impl FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        Self::from_rows(&rows)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

fn reach_from(pos: usize) -> Reach {
    let (row, col) = pos_to_row_col(pos);
    let mut targets = Vec::new();
    let mut mask = 0u64;

    for (dr, dc) in DIRECTIONS {
        for (step, kind) in STEPS {
            let r = row + dr * step;
            let c = col + dc * step;
            if !in_bounds(r, c) {
                break;
            }
            let to = row_col_to_pos(r, c);
            targets.push((to, kind));
            mask |= bit(to);
        }
    }

    Reach { targets, mask }
}

fn squares(mut mask: u64) -> impl Iterator<Item = usize> {
    std::iter::from_fn(move || {
        if mask == 0 {
            return None;
        }
        let pos = mask.trailing_zeros() as usize;
        mask &= mask - 1;
        Some(pos)
    })
}

fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

fn position_index(pos: Position) -> usize {
    debug_assert!((pos.row as usize) < BOARD_SIZE && (pos.col as usize) < BOARD_SIZE);
    pos.row as usize * BOARD_SIZE + pos.col as usize
}

fn index_position(pos: usize) -> Position {
    Position::new((pos / BOARD_SIZE) as u8, (pos % BOARD_SIZE) as u8)
}

fn pos_to_row_col(pos: usize) -> (i32, i32) {
    ((pos / BOARD_SIZE) as i32, (pos % BOARD_SIZE) as i32)
}

fn row_col_to_pos(row: i32, col: i32) -> usize {
    row as usize * BOARD_SIZE + col as usize
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

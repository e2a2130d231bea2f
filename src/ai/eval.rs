//! Static evaluation: material plus mobile-piece difference.

use crate::board::Board;
use crate::types::Color;

pub const MATERIAL_WEIGHT: i32 = 100;
pub const MOBILITY_WEIGHT: i32 = 10;

/// Scores `board` from `perspective`'s point of view.
///
/// Antisymmetric: `evaluate(b, c) == -evaluate(b, c.other())`.
pub fn evaluate(board: &Board, perspective: Color) -> i32 {
    let opp = perspective.other();
    let material = board.count(perspective) as i32 - board.count(opp) as i32;
    let mobility =
        board.mobile_piece_count(perspective) as i32 - board.mobile_piece_count(opp) as i32;

    MATERIAL_WEIGHT * material + MOBILITY_WEIGHT * mobility
}

//! Wall-kick offset tables
//!
//! When a rotation collides, up to 5 candidate offsets are tried in order;
//! index 0 is always (0, 0). The I piece has its own table, the O piece never
//! kicks. Offsets are (row, column) with row increasing upward.

use crate::tetromino::{RotationDirection, RotationState, TetrominoKind};

/// Kick offsets for one rotation attempt, tried in order
pub fn get_wall_kicks(
    kind: TetrominoKind,
    from: RotationState,
    direction: RotationDirection,
) -> [(i32, i32); 5] {
    match kind {
        // O does not rotate; identity offsets keep the caller loop uniform
        TetrominoKind::O => [(0, 0); 5],
        TetrominoKind::I => i_piece_kicks(from, direction),
        _ => jlstz_kicks(from, direction),
    }
}

/// Kicks for J, L, S, T, Z
fn jlstz_kicks(from: RotationState, direction: RotationDirection) -> [(i32, i32); 5] {
    use RotationDirection::*;
    use RotationState::*;

    match (from, direction) {
        (Origin, Clockwise) => [(0, 0), (0, -1), (1, -1), (-2, 0), (-2, -1)],
        (Right, CounterClockwise) => [(0, 0), (0, 1), (-1, 1), (2, 0), (2, 1)],
        (Right, Clockwise) => [(0, 0), (0, 1), (-1, 1), (2, 0), (2, 1)],
        (Inverse, CounterClockwise) => [(0, 0), (0, -1), (1, -1), (-2, 0), (-2, -1)],
        (Inverse, Clockwise) => [(0, 0), (0, 1), (1, 1), (-2, 0), (-2, 1)],
        (Left, CounterClockwise) => [(0, 0), (0, -1), (-1, -1), (2, 0), (2, -1)],
        (Left, Clockwise) => [(0, 0), (0, -1), (-1, -1), (2, 0), (2, -1)],
        (Origin, CounterClockwise) => [(0, 0), (0, 1), (1, 1), (-2, 0), (-2, 1)],
    }
}

/// Kicks for the I piece
fn i_piece_kicks(from: RotationState, direction: RotationDirection) -> [(i32, i32); 5] {
    use RotationDirection::*;
    use RotationState::*;

    match (from, direction) {
        (Origin, Clockwise) => [(0, 0), (0, -2), (0, 1), (1, -2), (-2, 1)],
        (Right, CounterClockwise) => [(0, 0), (0, 2), (0, -1), (-1, 2), (2, -1)],
        (Right, Clockwise) => [(0, 0), (0, -1), (0, 2), (-1, -1), (2, 2)],
        (Inverse, CounterClockwise) => [(0, 0), (0, 1), (0, -2), (1, 1), (-2, -2)],
        (Inverse, Clockwise) => [(0, 0), (0, 2), (0, -1), (1, 2), (-2, -1)],
        (Left, CounterClockwise) => [(0, 0), (0, -2), (0, 1), (-1, -2), (2, 1)],
        (Left, Clockwise) => [(0, 0), (0, 1), (0, -2), (1, 1), (-2, -2)],
        (Origin, CounterClockwise) => [(0, 0), (0, -1), (0, 2), (-1, -1), (2, 2)],
    }
}

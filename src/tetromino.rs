//! Tetromino shapes, rotation states, and the falling-piece value type
//!
//! A piece is a 4x4 mask of colored cells plus a grid position. Rotation
//! happens in place on the mask: the I piece remaps the full 4x4, every other
//! piece remaps the lower-left 3x3, and the O piece is symmetric. Mask row 0
//! is the bottom, matching the field's row direction.

use crate::cell::CellColor;
use crate::field::Field;

/// The 7 tetromino kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoKind {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

impl TetrominoKind {
    /// Cell color for this kind
    pub fn color(&self) -> CellColor {
        match self {
            TetrominoKind::I => CellColor::Cyan,
            TetrominoKind::O => CellColor::Yellow,
            TetrominoKind::T => CellColor::Purple,
            TetrominoKind::J => CellColor::Blue,
            TetrominoKind::L => CellColor::Orange,
            TetrominoKind::S => CellColor::Green,
            TetrominoKind::Z => CellColor::Red,
        }
    }

    /// All kinds, for bag randomization
    pub fn all() -> [TetrominoKind; 7] {
        [
            TetrominoKind::I,
            TetrominoKind::O,
            TetrominoKind::T,
            TetrominoKind::J,
            TetrominoKind::L,
            TetrominoKind::S,
            TetrominoKind::Z,
        ]
    }
}

/// Rotation phase: Origin, then 90 degree steps clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationState {
    #[default]
    Origin,
    Right,
    Inverse,
    Left,
}

impl RotationState {
    /// Clockwise step: Origin -> Right -> Inverse -> Left -> Origin
    pub fn cw(&self) -> RotationState {
        match self {
            RotationState::Origin => RotationState::Right,
            RotationState::Right => RotationState::Inverse,
            RotationState::Inverse => RotationState::Left,
            RotationState::Left => RotationState::Origin,
        }
    }

    /// Counter-clockwise step
    pub fn ccw(&self) -> RotationState {
        match self {
            RotationState::Origin => RotationState::Left,
            RotationState::Left => RotationState::Inverse,
            RotationState::Inverse => RotationState::Right,
            RotationState::Right => RotationState::Origin,
        }
    }
}

/// Direction of a rotation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

/// The falling piece: a 4x4 color mask anchored at (row, column) on the field.
/// Row 0 of the mask is its bottom edge; the anchor is the mask's bottom-left
/// cell, so occupied field coordinates are (row + r, column + c).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tetromino {
    kind: TetrominoKind,
    cells: [[CellColor; Self::SIZE]; Self::SIZE],
    row: i32,
    column: i32,
    rotation: RotationState,
}

impl Tetromino {
    pub const SIZE: usize = 4;

    /// Build a piece of the given kind at the origin, spawn orientation
    pub fn new(kind: TetrominoKind) -> Self {
        let mut piece = Self {
            kind,
            cells: [[CellColor::Empty; Self::SIZE]; Self::SIZE],
            row: 0,
            column: 0,
            rotation: RotationState::Origin,
        };
        piece.build(kind);
        piece
    }

    /// Fill the mask from the fixed spawn template for `kind`
    fn build(&mut self, kind: TetrominoKind) {
        let color = kind.color();
        let mut mask = [[CellColor::Empty; Self::SIZE]; Self::SIZE];

        let occupied: [(usize, usize); 4] = match kind {
            TetrominoKind::I => [(1, 0), (1, 1), (1, 2), (1, 3)],
            TetrominoKind::O => [(1, 1), (1, 2), (2, 1), (2, 2)],
            TetrominoKind::T => [(1, 0), (1, 1), (1, 2), (2, 1)],
            TetrominoKind::J => [(1, 0), (1, 1), (1, 2), (2, 0)],
            TetrominoKind::L => [(1, 0), (1, 1), (1, 2), (2, 2)],
            TetrominoKind::S => [(0, 0), (0, 1), (1, 1), (1, 2)],
            TetrominoKind::Z => [(0, 1), (0, 2), (1, 0), (1, 1)],
        };
        for (r, c) in occupied {
            mask[r][c] = color;
        }

        self.kind = kind;
        self.cells = mask;
        self.rotation = RotationState::Origin;
    }

    pub fn kind(&self) -> TetrominoKind {
        self.kind
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn column(&self) -> i32 {
        self.column
    }

    /// Color of a mask cell (row 0 = bottom of the mask)
    pub fn cell(&self, row: usize, column: usize) -> CellColor {
        self.cells[row][column]
    }

    pub fn set_position(&mut self, row: i32, column: i32) {
        self.row = row;
        self.column = column;
    }

    pub fn shift(&mut self, row_delta: i32, column_delta: i32) {
        self.row += row_delta;
        self.column += column_delta;
    }

    /// Absolute field-grid indices of the 4 occupied cells, in mask scan
    /// order. Computed as `(row + r) * columns + (column + c)`; this catches
    /// vertical overflow only, so horizontal bounds need `cells_as_vector`.
    pub fn cells_index(&self) -> [i32; 4] {
        let mut idx = [0i32; 4];
        let mut count = 0;
        for r in 0..Self::SIZE {
            for c in 0..Self::SIZE {
                if !self.cells[r][c].is_empty() {
                    idx[count] = (self.row + r as i32) * Field::COLUMNS as i32
                        + (self.column + c as i32);
                    count += 1;
                }
            }
        }
        debug_assert_eq!(count, 4);
        idx
    }

    /// (column, row) pairs of the 4 occupied cells, for horizontal and full
    /// bounds checks
    pub fn cells_as_vector(&self) -> [(i32, i32); 4] {
        let mut out = [(0i32, 0i32); 4];
        let mut count = 0;
        for r in 0..Self::SIZE {
            for c in 0..Self::SIZE {
                if !self.cells[r][c].is_empty() {
                    out[count] = (self.column + c as i32, self.row + r as i32);
                    count += 1;
                }
            }
        }
        debug_assert_eq!(count, 4);
        out
    }

    /// Rotate the mask 90 degrees counter-clockwise in place
    pub fn left_rotate(&mut self) {
        self.rotation = self.rotation.ccw();

        if self.kind == TetrominoKind::O {
            return;
        }

        let old = self.cells;
        let mut mask = [[CellColor::Empty; Self::SIZE]; Self::SIZE];
        if self.kind == TetrominoKind::I {
            for r in 0..4 {
                for c in 0..4 {
                    mask[r][c] = old[3 - c][r];
                }
            }
        } else {
            for r in 0..3 {
                for c in 0..3 {
                    mask[r][c] = old[2 - c][r];
                }
            }
        }
        self.cells = mask;
    }

    /// Rotate the mask 90 degrees clockwise in place
    pub fn right_rotate(&mut self) {
        self.rotation = self.rotation.cw();

        if self.kind == TetrominoKind::O {
            return;
        }

        let old = self.cells;
        let mut mask = [[CellColor::Empty; Self::SIZE]; Self::SIZE];
        if self.kind == TetrominoKind::I {
            for r in 0..4 {
                for c in 0..4 {
                    mask[r][c] = old[c][3 - r];
                }
            }
        } else {
            for r in 0..3 {
                for c in 0..3 {
                    mask[r][c] = old[c][2 - r];
                }
            }
        }
        self.cells = mask;
    }

    pub fn rotate(&mut self, direction: RotationDirection) {
        match direction {
            RotationDirection::Clockwise => self.right_rotate(),
            RotationDirection::CounterClockwise => self.left_rotate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_build_has_four_cells() {
        for kind in TetrominoKind::all() {
            let piece = Tetromino::new(kind);
            let filled: usize = (0..4)
                .flat_map(|r| (0..4).map(move |c| (r, c)))
                .filter(|&(r, c)| !piece.cell(r, c).is_empty())
                .count();
            assert_eq!(filled, 4, "{kind:?} must occupy exactly 4 mask cells");
        }
    }

    #[test]
    fn test_cells_index_distinct_in_all_rotations() {
        for kind in TetrominoKind::all() {
            let mut piece = Tetromino::new(kind);
            piece.set_position(5, 3);
            for _ in 0..4 {
                let idx = piece.cells_index();
                let unique: HashSet<_> = idx.iter().collect();
                assert_eq!(unique.len(), 4, "{kind:?} produced duplicate indices");
                piece.right_rotate();
            }
        }
    }

    #[test]
    fn test_four_right_rotations_are_identity() {
        for kind in TetrominoKind::all() {
            let original = Tetromino::new(kind);
            let mut piece = original.clone();
            for _ in 0..4 {
                piece.right_rotate();
            }
            assert_eq!(piece, original, "{kind:?} did not return to spawn shape");
        }
    }

    #[test]
    fn test_four_left_rotations_are_identity() {
        for kind in TetrominoKind::all() {
            let original = Tetromino::new(kind);
            let mut piece = original.clone();
            for _ in 0..4 {
                piece.left_rotate();
            }
            assert_eq!(piece, original);
        }
    }

    #[test]
    fn test_left_then_right_cancels() {
        for kind in TetrominoKind::all() {
            let original = Tetromino::new(kind);
            let mut piece = original.clone();
            piece.left_rotate();
            piece.right_rotate();
            assert_eq!(piece, original);
        }
    }

    #[test]
    fn test_rotation_state_wraps() {
        assert_eq!(RotationState::Left.cw(), RotationState::Origin);
        assert_eq!(RotationState::Origin.ccw(), RotationState::Left);
        assert_eq!(RotationState::Right.ccw(), RotationState::Origin);
    }

    #[test]
    fn test_i_right_rotation_is_vertical() {
        let mut piece = Tetromino::new(TetrominoKind::I);
        piece.right_rotate();
        // Spawn row 1 becomes mask column 1 after a clockwise remap
        for r in 0..4 {
            assert!(!piece.cell(r, 1).is_empty());
        }
        assert_eq!(piece.rotation(), RotationState::Right);
    }

    #[test]
    fn test_cells_index_formula() {
        let mut piece = Tetromino::new(TetrominoKind::O);
        piece.set_position(2, 3);
        // O occupies mask (1,1) (1,2) (2,1) (2,2)
        let mut idx = piece.cells_index();
        idx.sort_unstable();
        assert_eq!(idx, [34, 35, 44, 45]);
    }

    #[test]
    fn test_cells_as_vector_tracks_position() {
        let mut piece = Tetromino::new(TetrominoKind::T);
        piece.set_position(10, 4);
        for (column, row) in piece.cells_as_vector() {
            assert!((4..7).contains(&column));
            assert!((10..13).contains(&row));
        }
    }
}

//! Piece catalog: the seven tetromino types, their rotation tables and colours.

use serde::Serialize;

// ============================================================================
// Shapes
// ============================================================================

/// One rotation state: rows of 0/1 cells, top row first.
pub type Shape = &'static [&'static [u8]];

const I_ROTATIONS: &[Shape] = &[
    &[&[1, 1, 1, 1]],
    &[&[0, 0, 1, 0], &[0, 0, 1, 0], &[0, 0, 1, 0], &[0, 0, 1, 0]],
    &[&[0, 0, 0, 0], &[1, 1, 1, 1]],
    &[&[0, 1, 0, 0], &[0, 1, 0, 0], &[0, 1, 0, 0], &[0, 1, 0, 0]],
];

const J_ROTATIONS: &[Shape] = &[
    &[&[0, 0, 0], &[0, 0, 1], &[1, 1, 1]],
    &[&[0, 1, 0], &[0, 1, 0], &[0, 1, 1]],
    &[&[0, 0, 0], &[1, 1, 1], &[1, 0, 0]],
    &[&[1, 1, 0], &[0, 1, 0], &[0, 1, 0]],
];

const L_ROTATIONS: &[Shape] = &[
    &[&[0, 0, 0], &[1, 0, 0], &[1, 1, 1]],
    &[&[0, 1, 1], &[0, 1, 0], &[0, 1, 0]],
    &[&[0, 0, 0], &[1, 1, 1], &[0, 0, 1]],
    &[&[0, 1, 0], &[0, 1, 0], &[1, 1, 0]],
];

// Symmetric pieces only store their distinct states.
const O_ROTATIONS: &[Shape] = &[&[&[1, 1], &[1, 1]]];

const S_ROTATIONS: &[Shape] = &[
    &[&[0, 0, 0], &[0, 1, 1], &[1, 1, 0]],
    &[&[1, 0, 0], &[1, 1, 0], &[0, 1, 0]],
];

const T_ROTATIONS: &[Shape] = &[
    &[&[0, 0, 0], &[0, 1, 0], &[1, 1, 1]],
    &[&[0, 1, 0], &[0, 1, 1], &[0, 1, 0]],
    &[&[0, 0, 0], &[1, 1, 1], &[0, 1, 0]],
    &[&[0, 1, 0], &[1, 1, 0], &[0, 1, 0]],
];

const Z_ROTATIONS: &[Shape] = &[
    &[&[0, 0, 0], &[1, 1, 0], &[0, 1, 1]],
    &[&[0, 0, 1], &[0, 1, 1], &[0, 1, 0]],
];

// Compact spawn shapes for the "next" panel. T points down here, unlike its
// first rotation state.
const I_PREVIEW: Shape = &[&[1, 1, 1, 1]];
const J_PREVIEW: Shape = &[&[0, 0, 1], &[1, 1, 1]];
const L_PREVIEW: Shape = &[&[1, 0, 0], &[1, 1, 1]];
const O_PREVIEW: Shape = &[&[1, 1], &[1, 1]];
const S_PREVIEW: Shape = &[&[0, 1, 1], &[1, 1, 0]];
const T_PREVIEW: Shape = &[&[1, 1, 1], &[0, 1, 0]];
const Z_PREVIEW: Shape = &[&[1, 1, 0], &[0, 1, 1]];

/// Width of a shape's bounding rectangle.
pub fn shape_width(shape: Shape) -> usize {
    shape.first().map_or(0, |row| row.len())
}

/// Height of a shape's bounding rectangle.
pub fn shape_height(shape: Shape) -> usize {
    shape.len()
}

/// Offsets `(dx, dy)` of the filled cells of a shape, row by row.
pub fn filled_cells(shape: Shape) -> impl Iterator<Item = (i32, i32)> {
    shape.iter().enumerate().flat_map(|(dy, row)| {
        row.iter()
            .enumerate()
            .filter(|(_, cell)| **cell != 0)
            .map(move |(dx, _)| (dx as i32, dy as i32))
    })
}

// ============================================================================
// Types
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize)]
pub enum Colour {
    Cyan,
    Blue,
    Orange,
    Yellow,
    Green,
    Purple,
    Red,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize)]
pub enum TetrominoType {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl TetrominoType {
    /// Catalog order; a piece index is a position in this array.
    pub const ALL: [TetrominoType; 7] = [
        TetrominoType::I,
        TetrominoType::J,
        TetrominoType::L,
        TetrominoType::O,
        TetrominoType::S,
        TetrominoType::T,
        TetrominoType::Z,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        match self {
            TetrominoType::I => 0,
            TetrominoType::J => 1,
            TetrominoType::L => 2,
            TetrominoType::O => 3,
            TetrominoType::S => 4,
            TetrominoType::T => 5,
            TetrominoType::Z => 6,
        }
    }

    pub fn colour(&self) -> Colour {
        match self {
            TetrominoType::I => Colour::Cyan,
            TetrominoType::J => Colour::Blue,
            TetrominoType::L => Colour::Orange,
            TetrominoType::O => Colour::Yellow,
            TetrominoType::S => Colour::Green,
            TetrominoType::T => Colour::Purple,
            TetrominoType::Z => Colour::Red,
        }
    }

    pub fn rotations(&self) -> &'static [Shape] {
        match self {
            TetrominoType::I => I_ROTATIONS,
            TetrominoType::J => J_ROTATIONS,
            TetrominoType::L => L_ROTATIONS,
            TetrominoType::O => O_ROTATIONS,
            TetrominoType::S => S_ROTATIONS,
            TetrominoType::T => T_ROTATIONS,
            TetrominoType::Z => Z_ROTATIONS,
        }
    }

    /// Shape for a rotation index; the index wraps around the stored states.
    pub fn shape(&self, rotation: usize) -> Shape {
        let rotations = self.rotations();
        rotations[rotation % rotations.len()]
    }

    pub fn next_rotation(&self, rotation: usize) -> usize {
        (rotation + 1) % self.rotations().len()
    }

    /// Shape drawn in the "next" panel.
    pub fn preview_shape(&self) -> Shape {
        match self {
            TetrominoType::I => I_PREVIEW,
            TetrominoType::J => J_PREVIEW,
            TetrominoType::L => L_PREVIEW,
            TetrominoType::O => O_PREVIEW,
            TetrominoType::S => S_PREVIEW,
            TetrominoType::T => T_PREVIEW,
            TetrominoType::Z => Z_PREVIEW,
        }
    }
}

// ============================================================================
// Active Piece
// ============================================================================

/// The falling piece as it is currently stamped on the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ActivePiece {
    pub x: i32,
    pub y: i32,
    pub blocks: Shape,
    pub colour: Colour,
    pub rotation: usize,
}

impl ActivePiece {
    pub fn new(kind: TetrominoType, rotation: usize, x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            blocks: kind.shape(rotation),
            colour: kind.colour(),
            rotation: rotation % kind.rotations().len(),
        }
    }

    pub fn width(&self) -> usize {
        shape_width(self.blocks)
    }

    pub fn height(&self) -> usize {
        shape_height(self.blocks)
    }

    /// Absolute board coordinates of the filled cells.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        filled_cells(self.blocks).map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

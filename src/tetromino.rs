//! Tetromino definitions and shapes
//!
//! All 7 standard tetrominoes with their SRS rotation states. Shapes are
//! `(row, col)` offsets from the top-left corner of the piece's bounding box,
//! with row 0 at the top and rows increasing downward.

use serde::{Deserialize, Serialize};

/// An RGB color with channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Color used for injected garbage rows
    pub const GARBAGE: Rgb = Rgb::new(0.5, 0.5, 0.5);
}

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    I, // Cyan - long bar
    O, // Yellow - square
    T, // Purple - T-shape
    S, // Green - S-shape
    Z, // Red - Z-shape
    J, // Blue - J-shape
    L, // Orange - L-shape
}

impl PieceType {
    /// Every piece type, in bag order before shuffling
    pub const ALL: [PieceType; 7] = [
        PieceType::I,
        PieceType::O,
        PieceType::T,
        PieceType::S,
        PieceType::Z,
        PieceType::J,
        PieceType::L,
    ];

    /// Get the guideline color for this tetromino
    pub fn color(&self) -> Rgb {
        match self {
            PieceType::I => Rgb::new(0.0, 1.0, 1.0),
            PieceType::O => Rgb::new(1.0, 1.0, 0.0),
            PieceType::T => Rgb::new(0.5, 0.0, 0.5),
            PieceType::S => Rgb::new(0.0, 1.0, 0.0),
            PieceType::Z => Rgb::new(1.0, 0.0, 0.0),
            PieceType::J => Rgb::new(0.0, 0.0, 1.0),
            PieceType::L => Rgb::new(1.0, 0.65, 0.0),
        }
    }

    /// Side length of the square bounding box the piece rotates in
    pub fn box_size(&self) -> usize {
        match self {
            PieceType::I => 4,
            PieceType::O => 2,
            _ => 3,
        }
    }

    /// Get the shape offsets for this tetromino at a given rotation
    pub fn shape(&self, rotation: Rotation) -> [(i32, i32); 4] {
        match self {
            // ....  ..I.  ....  .I..
            // IIII  ..I.  ....  .I..
            // ....  ..I.  IIII  .I..
            // ....  ..I.  ....  .I..
            PieceType::I => match rotation {
                Rotation::North => [(1, 0), (1, 1), (1, 2), (1, 3)],
                Rotation::East => [(0, 2), (1, 2), (2, 2), (3, 2)],
                Rotation::South => [(2, 0), (2, 1), (2, 2), (2, 3)],
                Rotation::West => [(0, 1), (1, 1), (2, 1), (3, 1)],
            },
            // O piece doesn't rotate
            PieceType::O => [(0, 0), (0, 1), (1, 0), (1, 1)],
            PieceType::T => match rotation {
                Rotation::North => [(0, 1), (1, 0), (1, 1), (1, 2)],
                Rotation::East => [(0, 1), (1, 1), (1, 2), (2, 1)],
                Rotation::South => [(1, 0), (1, 1), (1, 2), (2, 1)],
                Rotation::West => [(0, 1), (1, 0), (1, 1), (2, 1)],
            },
            // North: .SS   East: .S.   South: ...   West: S..
            //        SS.         .SS          .SS         SS.
            //        ...         ..S          SS.         .S.
            PieceType::S => match rotation {
                Rotation::North => [(0, 1), (0, 2), (1, 0), (1, 1)],
                Rotation::East => [(0, 1), (1, 1), (1, 2), (2, 2)],
                Rotation::South => [(1, 1), (1, 2), (2, 0), (2, 1)],
                Rotation::West => [(0, 0), (1, 0), (1, 1), (2, 1)],
            },
            // North: ZZ.   East: ..Z   South: ...   West: .Z.
            //        .ZZ         .ZZ          ZZ.         ZZ.
            //        ...         .Z.          .ZZ         Z..
            PieceType::Z => match rotation {
                Rotation::North => [(0, 0), (0, 1), (1, 1), (1, 2)],
                Rotation::East => [(0, 2), (1, 1), (1, 2), (2, 1)],
                Rotation::South => [(1, 0), (1, 1), (2, 1), (2, 2)],
                Rotation::West => [(0, 1), (1, 0), (1, 1), (2, 0)],
            },
            PieceType::J => match rotation {
                Rotation::North => [(0, 0), (1, 0), (1, 1), (1, 2)],
                Rotation::East => [(0, 1), (0, 2), (1, 1), (2, 1)],
                Rotation::South => [(1, 0), (1, 1), (1, 2), (2, 2)],
                Rotation::West => [(0, 1), (1, 1), (2, 0), (2, 1)],
            },
            PieceType::L => match rotation {
                Rotation::North => [(0, 2), (1, 0), (1, 1), (1, 2)],
                Rotation::East => [(0, 1), (1, 1), (2, 1), (2, 2)],
                Rotation::South => [(1, 0), (1, 1), (1, 2), (2, 0)],
                Rotation::West => [(0, 0), (0, 1), (1, 1), (2, 1)],
            },
        }
    }

    /// Get spawn anchor (row, col) - top-left of the bounding box, centered
    /// horizontally, with the topmost block of the spawn shape on row 0
    pub fn spawn_position(&self, field_width: usize) -> (i32, i32) {
        let col = (field_width.saturating_sub(self.box_size()) / 2) as i32;
        match self {
            // The I piece sits on the second row of its box
            PieceType::I => (-1, col),
            _ => (0, col),
        }
    }
}

/// Rotation states (using SRS naming convention)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    North, // Spawn state (0)
    East,  // Clockwise from North (R)
    South, // 180 from North (2)
    West,  // Counter-clockwise from North (L)
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Rotate clockwise: North → East → South → West → North
    pub fn cw(&self) -> Rotation {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise: North → West → South → East → North
    pub fn ccw(&self) -> Rotation {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    pub fn turn(&self, direction: RotationDirection) -> Rotation {
        match direction {
            RotationDirection::Clockwise => self.cw(),
            RotationDirection::CounterClockwise => self.ccw(),
        }
    }
}

/// Direction for rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

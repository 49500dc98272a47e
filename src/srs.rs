//! Super Rotation System (SRS) wall kick data
//!
//! SRS defines the wall kicks attempted when rotating a piece.
//! If a rotation would cause collision, these offsets are tried in order.
//! Tables are written as published, `(x, y)` with y pointing up; [`kicks`]
//! converts them to field `(row, col)` offsets.

use crate::tetromino::{PieceType, Rotation};

/// One of the eight rotation transitions between adjacent states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    NorthToEast, // 0→R
    EastToNorth, // R→0
    EastToSouth, // R→2
    SouthToEast, // 2→R
    SouthToWest, // 2→L
    WestToSouth, // L→2
    WestToNorth, // L→0
    NorthToWest, // 0→L
}

impl Transition {
    /// Transition between two rotation states, `None` unless they are adjacent
    pub fn between(from: Rotation, to: Rotation) -> Option<Transition> {
        use Rotation::*;

        match (from, to) {
            (North, East) => Some(Transition::NorthToEast),
            (East, North) => Some(Transition::EastToNorth),
            (East, South) => Some(Transition::EastToSouth),
            (South, East) => Some(Transition::SouthToEast),
            (South, West) => Some(Transition::SouthToWest),
            (West, South) => Some(Transition::WestToSouth),
            (West, North) => Some(Transition::WestToNorth),
            (North, West) => Some(Transition::NorthToWest),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

pub const KICKS_PER_TRANSITION: usize = 5;

type KickTable = [[(i32, i32); KICKS_PER_TRANSITION]; 8];

/// J, L, S, T, Z kicks, indexed by [`Transition`]
const JLSTZ_KICKS: KickTable = [
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)], // 0→R
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],     // R→0
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],     // R→2
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)], // 2→R
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],    // 2→L
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],  // L→2
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],  // L→0
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],    // 0→L
];

/// I piece kicks (different from other pieces)
const I_KICKS: KickTable = [
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)], // 0→R
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)], // R→0
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)], // R→2
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)], // 2→R
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)], // 2→L
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)], // L→2
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)], // L→0
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)], // 0→L
];

/// Get wall kick offsets for a rotation attempt as `(row, col)` pairs,
/// the unmodified position first
pub fn kicks(piece_type: PieceType, transition: Transition) -> Vec<(i32, i32)> {
    let table = match piece_type {
        // O piece doesn't kick, its box is symmetric
        PieceType::O => return vec![(0, 0)],
        PieceType::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    };

    table[transition.index()]
        .iter()
        .map(|&(x, y)| (-y, x))
        .collect()
}

//! Hold slot: one stored piece type, swapped with the active piece

use crate::tetromino::PieceType;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoldSlot {
    piece: Option<PieceType>,
}

impl HoldSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The held piece, if any
    pub fn piece(&self) -> Option<PieceType> {
        self.piece
    }

    /// Store `piece_type` and hand back whatever was held before
    pub fn swap(&mut self, piece_type: PieceType) -> Option<PieceType> {
        self.piece.replace(piece_type)
    }
}

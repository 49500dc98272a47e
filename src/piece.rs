//! Active falling piece logic

use crate::field::Field;
use crate::srs::{Transition, kicks};
use crate::tetromino::{PieceType, Rotation, RotationDirection};
use std::time::Duration;

/// An active falling piece
#[derive(Debug, Clone, PartialEq)]
pub struct ActivePiece {
    /// The type of tetromino
    pub piece_type: PieceType,
    /// Current rotation state
    pub rotation: Rotation,
    /// Top-left corner of the bounding box; row 0 is the top of the field
    /// and may go negative while the piece is above it
    pub row: i32,
    pub col: i32,
    /// Time accumulated toward the next gravity step
    pub fall_timer: Duration,
    /// Time spent resting on the stack, `None` while airborne
    pub lock_timer: Option<Duration>,
    /// Lock delay resets used since the piece last reached a new low
    pub lock_resets: u8,
    /// Lowest row any block has reached, for lock reset tracking
    pub lowest_row: i32,
    /// Whether this piece came out of a hold swap
    pub has_held: bool,
}

impl ActivePiece {
    /// Create a new piece at its spawn position
    pub fn spawn(piece_type: PieceType, field_width: usize) -> Self {
        let (row, col) = piece_type.spawn_position(field_width);
        let mut piece = Self {
            piece_type,
            rotation: Rotation::North,
            row,
            col,
            fall_timer: Duration::ZERO,
            lock_timer: None,
            lock_resets: 0,
            lowest_row: row,
            has_held: false,
        };
        piece.lowest_row = piece.bottom_row();
        piece
    }

    /// Get the absolute positions of all 4 blocks
    pub fn cells(&self) -> [(i32, i32); 4] {
        self.cells_at(self.row, self.col, self.rotation)
    }

    fn cells_at(&self, row: i32, col: i32, rotation: Rotation) -> [(i32, i32); 4] {
        self.piece_type
            .shape(rotation)
            .map(|(dr, dc)| (row + dr, col + dc))
    }

    /// Row of the piece's lowest block
    pub fn bottom_row(&self) -> i32 {
        self.cells().iter().map(|&(row, _)| row).max().unwrap_or(self.row)
    }

    /// Whether the piece fits where it is
    pub fn fits(&self, field: &Field) -> bool {
        !field.is_blocked(&self.cells())
    }

    /// Try to shift by an offset, returns true if successful
    pub fn shift(&mut self, d_row: i32, d_col: i32, field: &Field) -> bool {
        let cells = self.cells_at(self.row + d_row, self.col + d_col, self.rotation);
        if field.is_blocked(&cells) {
            return false;
        }
        self.row += d_row;
        self.col += d_col;
        true
    }

    pub fn move_left(&mut self, field: &Field) -> bool {
        self.shift(0, -1, field)
    }

    pub fn move_right(&mut self, field: &Field) -> bool {
        self.shift(0, 1, field)
    }

    pub fn move_down(&mut self, field: &Field) -> bool {
        self.shift(1, 0, field)
    }

    /// Check whether the piece rests on the stack or the floor
    pub fn is_grounded(&self, field: &Field) -> bool {
        field.is_blocked(&self.cells_at(self.row + 1, self.col, self.rotation))
    }

    /// Try to rotate, using SRS wall kicks
    ///
    /// Either the first unblocked kick is committed or nothing changes.
    pub fn rotate(&mut self, direction: RotationDirection, field: &Field) -> bool {
        let target = self.rotation.turn(direction);
        let Some(transition) = Transition::between(self.rotation, target) else {
            return false;
        };

        for (kick_row, kick_col) in kicks(self.piece_type, transition) {
            let (row, col) = (self.row + kick_row, self.col + kick_col);
            if !field.is_blocked(&self.cells_at(row, col, target)) {
                self.row = row;
                self.col = col;
                self.rotation = target;
                return true;
            }
        }

        false
    }

    /// Hard drop - move down as far as possible and return distance dropped
    pub fn hard_drop(&mut self, field: &Field) -> u32 {
        let landing = self.ghost_row(field);
        let distance = (landing - self.row).max(0) as u32;
        self.row = landing;
        distance
    }

    /// Get the ghost piece anchor row (where the piece would land)
    pub fn ghost_row(&self, field: &Field) -> i32 {
        let mut row = self.row;
        while !field.is_blocked(&self.cells_at(row + 1, self.col, self.rotation)) {
            row += 1;
        }
        row
    }

    /// Get the ghost piece blocks
    pub fn ghost_cells(&self, field: &Field) -> [(i32, i32); 4] {
        self.cells_at(self.ghost_row(field), self.col, self.rotation)
    }
}

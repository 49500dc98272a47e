//! Flat render buffers rebuilt after every tick
//!
//! All layers are row-major. The next area stacks `num_nexts` blocks of
//! `next_size * next_size` cells; the hold area is one
//! `hold_size * hold_size` block. Empty cells carry a zero color.

use crate::field::Field;
use crate::piece::ActivePiece;
use crate::queue::NextQueue;
use crate::settings::EngineConfig;
use crate::tetromino::{PieceType, Rgb, Rotation};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    width: usize,
    height: usize,
    field: Vec<bool>,
    field_color: Vec<Rgb>,
    ghost: Vec<bool>,
    next_size: usize,
    nexts: Vec<bool>,
    nexts_color: Vec<Rgb>,
    hold_size: usize,
    hold: Vec<bool>,
    hold_color: Vec<Rgb>,
}

impl Snapshot {
    pub(crate) fn new(config: &EngineConfig) -> Self {
        let field_len = config.width * config.height;
        let nexts_len = config.num_nexts * config.next_size * config.next_size;
        let hold_len = config.hold_size * config.hold_size;
        Self {
            width: config.width,
            height: config.height,
            field: vec![false; field_len],
            field_color: vec![Rgb::default(); field_len],
            ghost: vec![false; field_len],
            next_size: config.next_size,
            nexts: vec![false; nexts_len],
            nexts_color: vec![Rgb::default(); nexts_len],
            hold_size: config.hold_size,
            hold: vec![false; hold_len],
            hold_color: vec![Rgb::default(); hold_len],
        }
    }

    /// Locked blocks with the active piece drawn on top, plus the ghost layer
    pub(crate) fn render_field(
        &mut self,
        field: &Field,
        active: Option<&ActivePiece>,
        show_ghost: bool,
    ) {
        for (i, cell) in field.cells().iter().enumerate() {
            self.field[i] = cell.is_filled();
            self.field_color[i] = cell.color();
        }
        self.ghost.fill(false);

        let Some(piece) = active else {
            return;
        };

        if show_ghost {
            for (row, col) in piece.ghost_cells(field) {
                if let Some(i) = self.index(row, col) {
                    self.ghost[i] = true;
                }
            }
        }

        let color = piece.piece_type.color();
        for (row, col) in piece.cells() {
            if let Some(i) = self.index(row, col) {
                self.field[i] = true;
                self.field_color[i] = color;
                self.ghost[i] = false;
            }
        }
    }

    pub(crate) fn render_nexts(&mut self, nexts: &NextQueue) {
        let block = self.next_size * self.next_size;
        for (n, piece_type) in nexts.iter().enumerate() {
            let range = n * block..(n + 1) * block;
            draw_piece(
                &mut self.nexts[range.clone()],
                &mut self.nexts_color[range],
                self.next_size,
                Some(piece_type),
            );
        }
    }

    pub(crate) fn render_hold(&mut self, held: Option<PieceType>) {
        draw_piece(&mut self.hold, &mut self.hold_color, self.hold_size, held);
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn field(&self) -> &[bool] {
        &self.field
    }

    pub fn field_color(&self) -> &[Rgb] {
        &self.field_color
    }

    /// Ghost layer, all false when the ghost is disabled
    pub fn ghost(&self) -> &[bool] {
        &self.ghost
    }

    pub fn nexts(&self) -> &[bool] {
        &self.nexts
    }

    pub fn nexts_color(&self) -> &[Rgb] {
        &self.nexts_color
    }

    pub fn hold(&self) -> &[bool] {
        &self.hold
    }

    pub fn hold_color(&self) -> &[Rgb] {
        &self.hold_color
    }
}

/// Draw a piece's spawn shape into the top-left of a square block
fn draw_piece(
    cells: &mut [bool],
    colors: &mut [Rgb],
    size: usize,
    piece_type: Option<PieceType>,
) {
    cells.fill(false);
    colors.fill(Rgb::default());

    let Some(piece_type) = piece_type else {
        return;
    };
    let color = piece_type.color();
    for (row, col) in piece_type.shape(Rotation::North) {
        let i = row as usize * size + col as usize;
        cells[i] = true;
        colors[i] = color;
    }
}

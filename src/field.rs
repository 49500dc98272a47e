//! Playfield representation and collision detection

use crate::tetromino::Rgb;
use std::fmt;

/// A cell on the field - either empty or filled with a color
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Rgb),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    /// Color of a filled cell, zero for an empty one
    pub fn color(&self) -> Rgb {
        match self {
            Cell::Filled(color) => *color,
            Cell::Empty => Rgb::default(),
        }
    }
}

/// The playfield
#[derive(Debug, Clone)]
pub struct Field {
    width: usize,
    height: usize,
    /// Row-major, row 0 is the top
    cells: Vec<Cell>,
}

impl Field {
    /// Create a new empty field
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// All cells, row-major from the top
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(row * self.width + col)
    }

    /// Get the cell at a position (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Set a cell at a position
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Check whether a single position is blocked: outside the side walls,
    /// below the floor, or occupied. Rows above the top are always free.
    pub fn is_cell_blocked(&self, row: i32, col: i32) -> bool {
        if col < 0 || col >= self.width as i32 || row >= self.height as i32 {
            return true;
        }
        if row < 0 {
            return false;
        }
        self.cells[row as usize * self.width + col as usize].is_filled()
    }

    /// Check if any of the given positions is blocked
    pub fn is_blocked(&self, positions: &[(i32, i32)]) -> bool {
        positions
            .iter()
            .any(|&(row, col)| self.is_cell_blocked(row, col))
    }

    /// Lock blocks onto the field with the given color
    ///
    /// Positions above the top row have nowhere to go and are dropped;
    /// returns how many were dropped.
    pub fn lock(&mut self, positions: &[(i32, i32)], color: Rgb) -> usize {
        let mut dropped = 0;
        for &(row, col) in positions {
            debug_assert!(!self.get(row, col).is_some_and(|c| c.is_filled()));
            if !self.set(row, col, Cell::Filled(color)) {
                dropped += 1;
            }
        }
        dropped
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row).iter().all(|cell| cell.is_filled())
    }

    fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    /// Clear completed rows and return the number cleared
    ///
    /// Surviving rows keep their order and settle to the bottom; empty rows
    /// are inserted at the top.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut write_row = self.height;

        // Walk bottom to top, compacting kept rows downward
        for read_row in (0..self.height).rev() {
            if self.is_row_full(read_row) {
                cleared += 1;
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let (src, dst) = (read_row * self.width, write_row * self.width);
                self.cells.copy_within(src..src + self.width, dst);
            }
        }

        // Fill the top with empty rows
        self.cells[..write_row * self.width].fill(Cell::Empty);

        cleared
    }

    /// Push a garbage row in from the bottom, leaving column `hole` empty
    ///
    /// Every row moves up by one and the top row is discarded. Returns true
    /// if the discarded row had any blocks in it.
    pub fn inject_garbage(&mut self, hole: usize) -> bool {
        debug_assert!(hole < self.width, "garbage hole {hole} outside the field");
        let overflow = self.row(0).iter().any(|cell| cell.is_filled());

        self.cells.copy_within(self.width.., 0);
        let bottom = (self.height - 1) * self.width;
        for col in 0..self.width {
            self.cells[bottom + col] = if col == hole {
                Cell::Empty
            } else {
                Cell::Filled(Rgb::GARBAGE)
            };
        }

        overflow
    }

    /// Number of filled cells on the field
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_filled()).count()
    }

    /// Check if the field is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for line in self.cells.chunks(self.width) {
            write!(f, "|")?;
            for cell in line {
                let symbol = if cell.is_filled() { '*' } else { ' ' };
                write!(f, "{}", symbol)?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}

// src/field.rs
use std::fmt;

use bevy::prelude::*;

use crate::piece::{Piece, ShapeKind};

/// A field cell: empty, or the shape whose color it carries.
pub type Cell = Option<ShapeKind>;

/// Grid of locked cells. Row 0 is the top row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Field {
    pub fn new(width: usize, height: usize) -> Self {
        Field {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    fn index(&self, cell: IVec2) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| cell.y as usize * self.width + cell.x as usize)
    }

    /// Cell at (col, row); out-of-bounds reads as empty.
    pub fn cell_at(&self, col: i32, row: i32) -> Cell {
        self.index(IVec2::new(col, row))
            .and_then(|index| self.cells[index])
    }

    pub fn set(&mut self, col: i32, row: i32, cell: Cell) {
        if let Some(index) = self.index(IVec2::new(col, row)) {
            self.cells[index] = cell;
        }
    }

    /// Writes the piece's cells into the field. The position is assumed to be
    /// valid already.
    pub fn place(&mut self, piece: &Piece) {
        for cell in piece.occupied_cells() {
            self.set(cell.x, cell.y, Some(piece.kind()));
        }
    }

    /// Rows outside the field are never full.
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.height {
            return false;
        }
        let start = row * self.width;
        self.cells[start..start + self.width]
            .iter()
            .all(Option::is_some)
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Rows are scanned top to bottom. Removing row `r` shifts rows `0..r`
    /// down by one and empties row 0, so the row now at `r` was already
    /// scanned and the scan simply continues at `r + 1`.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width;
        let mut cleared = 0;
        for row in 0..self.height {
            if !self.is_row_full(row) {
                continue;
            }
            cleared += 1;
            self.cells.copy_within(0..row * width, width);
            self.cells[..width].fill(None);
        }
        if cleared > 0 {
            debug!("cleared {} full rows", cleared);
        }
        cleared
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                f.write_str(if cell.is_some() { "x " } else { "_ " })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

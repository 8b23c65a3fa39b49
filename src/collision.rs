// src/collision.rs
use crate::field::Field;
use crate::piece::Piece;

/// True if every cell of `piece` is inside the field and empty.
pub fn is_valid(piece: &Piece, field: &Field) -> bool {
    piece
        .occupied_cells()
        .all(|cell| field.in_bounds(cell) && field.cell_at(cell.x, cell.y).is_none())
}

/// Where `piece` would come to rest if dropped straight down.
///
/// Always returns a piece; if it cannot move down at all the copy keeps the
/// starting position.
pub fn project(piece: &Piece, field: &Field) -> Piece {
    let mut projected = piece.snapshot();
    for _ in 0..field.height() {
        projected.move_by(0, 1);
        if !is_valid(&projected, field) {
            projected.move_by(0, -1);
            break;
        }
    }
    projected
}

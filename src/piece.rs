// src/piece.rs
use bevy::prelude::*;
use rand::distributions::{Distribution, Standard};
use rand::Rng;

// Anchor of a freshly spawned piece: column 4, row 0.
pub const SPAWN_POSITION: IVec2 = IVec2::new(4, 0);

// Each rotation state is a list of indices into a 4x4 mask:
//
//  0  4  8 12
//  1  5  9 13
//  2  6 10 14
//  3  7 11 15
//
// i.e. index = col * 4 + row.
const L_MASKS: &[[u8; 4]] = &[[0, 1, 2, 4], [0, 1, 5, 9], [2, 4, 5, 6], [0, 4, 8, 9]];
const J_MASKS: &[[u8; 4]] = &[[0, 4, 5, 6], [0, 1, 4, 8], [0, 1, 2, 6], [1, 5, 8, 9]];
const O_MASKS: &[[u8; 4]] = &[[0, 1, 4, 5]];
const I_MASKS: &[[u8; 4]] = &[[0, 1, 2, 3], [0, 4, 8, 12]];
const S_MASKS: &[[u8; 4]] = &[[1, 2, 4, 5], [0, 4, 5, 9]];
const Z_MASKS: &[[u8; 4]] = &[[0, 1, 5, 6], [1, 4, 5, 8]];
const T_MASKS: &[[u8; 4]] = &[[1, 4, 5, 6], [0, 4, 5, 8], [0, 1, 2, 5], [1, 4, 5, 9]];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    L,
    J,
    O,
    I,
    S,
    Z,
    T,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::O,
        ShapeKind::I,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::T,
    ];

    /// Rotation states of this shape, in clockwise order.
    pub fn masks(self) -> &'static [[u8; 4]] {
        match self {
            ShapeKind::L => L_MASKS,
            ShapeKind::J => J_MASKS,
            ShapeKind::O => O_MASKS,
            ShapeKind::I => I_MASKS,
            ShapeKind::S => S_MASKS,
            ShapeKind::Z => Z_MASKS,
            ShapeKind::T => T_MASKS,
        }
    }

    pub fn rotation_count(self) -> usize {
        self.masks().len()
    }

    pub fn color(self) -> Color {
        match self {
            ShapeKind::L => Color::srgb_u8(255, 127, 0),
            ShapeKind::J => Color::srgb_u8(0, 0, 255),
            ShapeKind::O => Color::srgb_u8(255, 255, 0),
            ShapeKind::I => Color::srgb_u8(0, 255, 255),
            ShapeKind::S => Color::srgb_u8(0, 255, 0),
            ShapeKind::Z => Color::srgb_u8(255, 0, 0),
            ShapeKind::T => Color::srgb_u8(128, 0, 128),
        }
    }

    /// Dimmed color used for the landing projection.
    pub fn faded_color(self) -> Color {
        match self {
            ShapeKind::L => Color::srgb_u8(63, 31, 0),
            ShapeKind::J => Color::srgb_u8(0, 0, 63),
            ShapeKind::O => Color::srgb_u8(63, 63, 0),
            ShapeKind::I => Color::srgb_u8(0, 63, 63),
            ShapeKind::S => Color::srgb_u8(0, 63, 0),
            ShapeKind::Z => Color::srgb_u8(63, 0, 0),
            ShapeKind::T => Color::srgb_u8(31, 0, 31),
        }
    }
}

impl Distribution<ShapeKind> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::ALL[rng.gen_range(0..ShapeKind::ALL.len())]
    }
}

fn mask_offset(index: u8) -> IVec2 {
    IVec2::new(i32::from(index / 4), i32::from(index % 4))
}

/// A tetromino placed somewhere on (or around) the field.
///
/// Movement and rotation are purely geometric; legality against a field is
/// checked by the caller (see `collision::is_valid`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: ShapeKind,
    rotation: usize,
    position: IVec2,
    // Always the bounding box of the current mask.
    dims: IVec2,
}

impl Piece {
    pub fn new(kind: ShapeKind) -> Self {
        let mut piece = Piece {
            kind,
            rotation: 0,
            position: SPAWN_POSITION,
            dims: IVec2::ZERO,
        };
        piece.refresh_dims();
        piece
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn rotation(&self) -> usize {
        self.rotation
    }

    pub fn position(&self) -> IVec2 {
        self.position
    }

    /// (width, height) of the occupied part of the current mask.
    pub fn dims(&self) -> IVec2 {
        self.dims
    }

    pub fn mask(&self) -> &'static [u8; 4] {
        &self.kind.masks()[self.rotation]
    }

    /// Cells of the current mask relative to the anchor.
    pub fn local_cells(&self) -> impl Iterator<Item = IVec2> {
        self.mask().iter().map(|&index| mask_offset(index))
    }

    /// Absolute field coordinates covered by the piece.
    pub fn occupied_cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.local_cells().map(move |offset| self.position + offset)
    }

    pub fn covers(&self, cell: IVec2) -> bool {
        self.occupied_cells().any(|occupied| occupied == cell)
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.position += IVec2::new(dx, dy);
    }

    /// Steps the rotation index by `direction` (±1), wrapping around the
    /// shape's rotation count.
    pub fn rotate(&mut self, direction: i32) {
        let count = self.kind.rotation_count() as i32;
        self.rotation = (self.rotation as i32 + direction).rem_euclid(count) as usize;
        self.refresh_dims();
    }

    /// Pushes the piece back inside the inclusive cell bounds `min..=max`.
    pub fn clamp(&mut self, min: IVec2, max: IVec2) {
        let dims = self.dims();
        if self.position.x < min.x {
            self.position.x = min.x;
        }
        if self.position.y < min.y {
            self.position.y = min.y;
        }
        if self.position.x + dims.x - 1 > max.x {
            self.position.x = max.x - dims.x + 1;
        }
        if self.position.y + dims.y - 1 > max.y {
            self.position.y = max.y - dims.y + 1;
        }
    }

    pub fn snapshot(&self) -> Piece {
        *self
    }

    /// Overwrites this piece with the state of `other`.
    pub fn restore_from(&mut self, other: &Piece) {
        self.kind = other.kind;
        self.position = other.position;
        self.rotation = other.rotation;
        self.refresh_dims();
    }

    /// Back to spawn: anchor (4, 0), rotation 0, optionally a new shape.
    pub fn reset(&mut self, kind: Option<ShapeKind>) {
        if let Some(kind) = kind {
            self.kind = kind;
        }
        self.position = SPAWN_POSITION;
        self.rotation = 0;
        self.refresh_dims();
    }

    fn refresh_dims(&mut self) {
        self.dims = self
            .local_cells()
            .fold(IVec2::ZERO, |acc, cell| acc.max(cell + IVec2::ONE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cells(piece: &Piece) -> Vec<IVec2> {
        let mut cells: Vec<IVec2> = piece.occupied_cells().collect();
        cells.sort_by_key(|c| (c.x, c.y));
        cells
    }

    #[test]
    fn test_rotation_counts() {
        assert_eq!(ShapeKind::O.rotation_count(), 1);
        assert_eq!(ShapeKind::I.rotation_count(), 2);
        assert_eq!(ShapeKind::S.rotation_count(), 2);
        assert_eq!(ShapeKind::Z.rotation_count(), 2);
        assert_eq!(ShapeKind::L.rotation_count(), 4);
        assert_eq!(ShapeKind::J.rotation_count(), 4);
        assert_eq!(ShapeKind::T.rotation_count(), 4);
    }

    #[test]
    fn test_every_mask_has_four_distinct_cells() {
        for kind in ShapeKind::ALL {
            for mask in kind.masks() {
                let mut sorted = *mask;
                sorted.sort_unstable();
                assert!(sorted.windows(2).all(|w| w[0] != w[1]), "{kind:?}");
                assert!(sorted.iter().all(|&i| i < 16), "{kind:?}");
            }
        }
    }

    #[test]
    fn test_new_piece_spawns_at_anchor() {
        let piece = Piece::new(ShapeKind::O);
        assert_eq!(piece.position(), IVec2::new(4, 0));
        assert_eq!(piece.rotation(), 0);
        assert_eq!(
            cells(&piece),
            vec![
                IVec2::new(4, 0),
                IVec2::new(4, 1),
                IVec2::new(5, 0),
                IVec2::new(5, 1)
            ]
        );
    }

    #[test]
    fn test_mask_index_is_column_major() {
        // Horizontal I at rotation 1: indices 0, 4, 8, 12 are row 0.
        let mut piece = Piece::new(ShapeKind::I);
        piece.rotate(1);
        assert_eq!(
            cells(&piece),
            (4..8).map(|x| IVec2::new(x, 0)).collect::<Vec<_>>()
        );
        assert_eq!(piece.dims(), IVec2::new(4, 1));
    }

    #[test]
    fn test_dims_follow_rotation() {
        let mut piece = Piece::new(ShapeKind::I);
        assert_eq!(piece.dims(), IVec2::new(1, 4));
        piece.rotate(1);
        assert_eq!(piece.dims(), IVec2::new(4, 1));
        piece.rotate(1);
        assert_eq!(piece.dims(), IVec2::new(1, 4));

        let mut t = Piece::new(ShapeKind::T);
        for _ in 0..4 {
            let tight = t
                .local_cells()
                .fold(IVec2::ZERO, |acc, c| acc.max(c + IVec2::ONE));
            assert_eq!(t.dims(), tight);
            t.rotate(-1);
        }
    }

    #[test]
    fn test_rotate_wraps_both_directions() {
        let mut piece = Piece::new(ShapeKind::L);
        piece.rotate(-1);
        assert_eq!(piece.rotation(), 3);
        piece.rotate(1);
        assert_eq!(piece.rotation(), 0);

        let mut s = Piece::new(ShapeKind::S);
        s.rotate(1);
        s.rotate(1);
        assert_eq!(s.rotation(), 0);
    }

    #[test]
    fn test_o_piece_never_changes_mask() {
        let mut piece = Piece::new(ShapeKind::O);
        let before = *piece.mask();
        piece.rotate(1);
        assert_eq!(*piece.mask(), before);
        piece.rotate(-1);
        piece.rotate(-1);
        assert_eq!(*piece.mask(), before);
        assert_eq!(piece.rotation(), 0);
    }

    #[test]
    fn test_move_has_no_bounds_check() {
        let mut piece = Piece::new(ShapeKind::T);
        piece.move_by(-10, 30);
        assert_eq!(piece.position(), IVec2::new(-6, 30));
    }

    #[test]
    fn test_clamp_pushes_inward() {
        let min = IVec2::ZERO;
        let max = IVec2::new(9, 23);

        let mut piece = Piece::new(ShapeKind::I);
        piece.rotate(1);
        piece.move_by(4, 0); // spans columns 8..=11
        piece.clamp(min, max);
        assert_eq!(piece.position(), IVec2::new(6, 0));

        let mut piece = Piece::new(ShapeKind::O);
        piece.move_by(-7, -2);
        piece.clamp(min, max);
        assert_eq!(piece.position(), IVec2::ZERO);

        let mut piece = Piece::new(ShapeKind::I);
        piece.move_by(0, 22);
        piece.clamp(min, max);
        assert_eq!(piece.position(), IVec2::new(4, 20));
        assert_eq!(piece.rotation(), 0);
    }

    #[test]
    fn test_clamp_keeps_piece_that_fits() {
        let mut piece = Piece::new(ShapeKind::J);
        piece.move_by(2, 10);
        let before = piece;
        piece.clamp(IVec2::ZERO, IVec2::new(9, 23));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut piece = Piece::new(ShapeKind::Z);
        let snapshot = piece.snapshot();
        piece.move_by(1, 1);
        piece.rotate(1);
        assert_eq!(snapshot.position(), IVec2::new(4, 0));
        assert_eq!(snapshot.rotation(), 0);
    }

    #[test]
    fn test_restore_from_copies_state() {
        let mut source = Piece::new(ShapeKind::T);
        source.rotate(1);
        source.move_by(-2, 5);

        let mut target = Piece::new(ShapeKind::I);
        target.restore_from(&source);
        assert_eq!(target, source);
        assert_eq!(target.dims(), IVec2::new(3, 2));
    }

    #[test]
    fn test_reset_keeps_or_replaces_shape() {
        let mut piece = Piece::new(ShapeKind::T);
        piece.rotate(1);
        piece.move_by(3, 7);
        piece.reset(None);
        assert_eq!(piece, Piece::new(ShapeKind::T));

        piece.reset(Some(ShapeKind::I));
        assert_eq!(piece, Piece::new(ShapeKind::I));
    }

    #[test]
    fn test_random_kinds_cover_all_shapes() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(rng.gen::<ShapeKind>());
        }
        assert_eq!(seen.len(), 7);
    }
}

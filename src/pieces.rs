//! Cubie definitions, the solved configuration, and the solved predicate.
//!
//! Coordinates are centered: each component of a cubie position is -1, 0 or
//! 1, with the origin at the middle of the cube.

use std::ops::{Index, IndexMut};

use rustc_hash::FxHashSet;

use crate::geometry::Axis;
use crate::grid::{coord_to_idx, idx_to_coord};

/// A 3D coordinate of a cubie position.
pub type Coord = (i32, i32, i32);

/// Number of layers along each axis.
pub const LAYER_COUNT: usize = 3;

/// Number of cubies in the cube, including the hidden core.
pub const NUM_PIECES: usize = LAYER_COUNT * LAYER_COUNT * LAYER_COUNT;

/// Number of stickers of each color.
pub const STICKERS_PER_COLOR: usize = LAYER_COUNT * LAYER_COUNT;

/// One of the six faces of a cubie (and of the whole cube).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    Right = 0,
    Left = 1,
    Top = 2,
    Bottom = 3,
    Front = 4,
    Back = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Right,
        Face::Left,
        Face::Top,
        Face::Bottom,
        Face::Front,
        Face::Back,
    ];

    /// Returns the axis perpendicular to this face.
    pub const fn axis(self) -> Axis {
        match self {
            Face::Right | Face::Left => Axis::X,
            Face::Top | Face::Bottom => Axis::Y,
            Face::Front | Face::Back => Axis::Z,
        }
    }

    /// Returns `+1` for right/top/front and `-1` for the others.
    pub const fn sign(self) -> i32 {
        match self {
            Face::Right | Face::Top | Face::Front => 1,
            Face::Left | Face::Bottom | Face::Back => -1,
        }
    }

    /// Returns the outward unit normal.
    pub const fn normal(self) -> Coord {
        let s = self.sign();
        match self.axis() {
            Axis::X => (s, 0, 0),
            Axis::Y => (0, s, 0),
            Axis::Z => (0, 0, s),
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Face::Right => Face::Left,
            Face::Left => Face::Right,
            Face::Top => Face::Bottom,
            Face::Bottom => Face::Top,
            Face::Front => Face::Back,
            Face::Back => Face::Front,
        }
    }

    /// Color of this face in the solved configuration.
    pub const fn home_color(self) -> Color {
        match self {
            Face::Right => Color::Red,
            Face::Left => Color::Orange,
            Face::Top => Color::White,
            Face::Bottom => Color::Yellow,
            Face::Front => Color::Green,
            Face::Back => Color::Blue,
        }
    }

    /// Whether a cubie at `coord` lies on this face of the cube.
    #[inline]
    pub const fn contains(self, coord: Coord) -> bool {
        self.axis().component(coord) == self.sign()
    }
}

/// One of the six sticker colors.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    White,
    Yellow,
    Red,
    Orange,
    Blue,
    Green,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::White,
        Color::Yellow,
        Color::Red,
        Color::Orange,
        Color::Blue,
        Color::Green,
    ];

    /// Single-letter abbreviation used in text renderings.
    pub const fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Yellow => 'Y',
            Color::Red => 'R',
            Color::Orange => 'O',
            Color::Blue => 'B',
            Color::Green => 'G',
        }
    }
}

/// Sticker colors of a cubie, indexed by the face they currently point at.
///
/// `None` means the face points into the cube and has no sticker.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Stickers([Option<Color>; 6]);

impl Index<Face> for Stickers {
    type Output = Option<Color>;

    fn index(&self, face: Face) -> &Self::Output {
        &self.0[face as usize]
    }
}

impl IndexMut<Face> for Stickers {
    fn index_mut(&mut self, face: Face) -> &mut Self::Output {
        &mut self.0[face as usize]
    }
}

impl Stickers {
    /// Stickers of the cubie that starts at `home`.
    pub fn solved_at(home: Coord) -> Self {
        let mut stickers = Self::default();
        for face in Face::ALL {
            if face.contains(home) {
                stickers[face] = Some(face.home_color());
            }
        }
        stickers
    }

    /// Iterates over the faces that carry a sticker.
    pub fn iter(&self) -> impl Iterator<Item = (Face, Color)> + '_ {
        Face::ALL
            .into_iter()
            .filter_map(|face| self[face].map(|color| (face, color)))
    }

    pub fn count(&self) -> usize {
        self.0.iter().flatten().count()
    }
}

/// A single cubie.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    /// Stable identity; equals the index of the cubie's home position.
    pub id: u8,
    /// Current position.
    pub position: Coord,
    /// Current sticker orientation.
    pub stickers: Stickers,
}

/// The full set of 27 cubies.
///
/// Pieces are stored in id order, so a piece never changes slot; only its
/// position and stickers change.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cube {
    pieces: [Piece; NUM_PIECES],
}

impl Default for Cube {
    fn default() -> Self {
        Self::solved()
    }
}

impl Cube {
    /// Returns the canonical solved cube.
    pub fn solved() -> Self {
        let pieces = std::array::from_fn(|index| {
            let position = idx_to_coord(index);
            Piece {
                id: index as u8,
                position,
                stickers: Stickers::solved_at(position),
            }
        });
        Self { pieces }
    }

    pub fn pieces(&self) -> &[Piece; NUM_PIECES] {
        &self.pieces
    }

    pub(crate) fn pieces_mut(&mut self) -> &mut [Piece; NUM_PIECES] {
        &mut self.pieces
    }

    /// Looks up a piece by its id.
    pub fn piece(&self, id: u8) -> &Piece {
        &self.pieces[id as usize]
    }

    /// Finds the piece currently at `position`.
    pub fn piece_at(&self, position: Coord) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.position == position)
    }

    /// Colors showing on one face of the cube, skipping missing stickers.
    pub fn face_colors(&self, face: Face) -> impl Iterator<Item = Color> + '_ {
        self.pieces
            .iter()
            .filter(move |piece| face.contains(piece.position))
            .filter_map(move |piece| piece.stickers[face])
    }

    /// Whether every sticker on `face` shows the same color.
    ///
    /// A face with no stickers at all does not count as uniform.
    pub fn is_face_uniform(&self, face: Face) -> bool {
        let mut colors = self.face_colors(face);
        match colors.next() {
            Some(first) => colors.all(|color| color == first),
            None => false,
        }
    }

    /// Whether all six faces are uniform. Always evaluated from scratch.
    pub fn is_solved(&self) -> bool {
        Face::ALL.into_iter().all(|face| self.is_face_uniform(face))
    }

    /// Counts stickers of `color` across all cubies.
    pub fn sticker_count(&self, color: Color) -> usize {
        self.pieces
            .iter()
            .flat_map(|piece| piece.stickers.iter())
            .filter(|&(_, c)| c == color)
            .count()
    }

    /// Whether the pieces occupy every grid position exactly once.
    pub fn positions_are_distinct(&self) -> bool {
        let mut seen = FxHashSet::default();
        self.pieces.iter().all(|piece| {
            let (x, y, z) = piece.position;
            [x, y, z].iter().all(|c| (-1..=1).contains(c)) && seen.insert(piece.position)
        })
    }

    /// Returns the sticker color at `position` facing `face`, if any.
    pub fn sticker(&self, position: Coord, face: Face) -> Option<Color> {
        self.piece_at(position).and_then(|piece| piece.stickers[face])
    }
}

/// Slot of the piece whose home is `position`.
pub fn home_id(position: Coord) -> u8 {
    coord_to_idx(position) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solved_cube_has_27_distinct_positions() {
        let cube = Cube::solved();
        assert_eq!(cube.pieces().len(), 27);
        assert!(cube.positions_are_distinct());
    }

    #[test]
    fn test_ids_match_home_positions() {
        let cube = Cube::solved();
        for (slot, piece) in cube.pieces().iter().enumerate() {
            assert_eq!(piece.id as usize, slot);
            assert_eq!(home_id(piece.position), piece.id);
        }
    }

    #[test]
    fn test_sticker_counts_by_piece_kind() {
        let cube = Cube::solved();
        let mut by_count = [0usize; 4];
        for piece in cube.pieces() {
            by_count[piece.stickers.count()] += 1;
        }
        // core, 6 centers, 12 edges, 8 corners
        assert_eq!(by_count, [1, 6, 12, 8]);
    }

    #[test]
    fn test_solved_cube_is_solved() {
        assert!(Cube::solved().is_solved());
    }

    #[test]
    fn test_each_color_has_nine_stickers() {
        let cube = Cube::solved();
        for color in Color::ALL {
            assert_eq!(cube.sticker_count(color), STICKERS_PER_COLOR);
        }
    }

    #[test]
    fn test_home_colors_are_distinct() {
        let mut colors: Vec<Color> = Face::ALL.iter().map(|f| f.home_color()).collect();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), 6);
    }

    #[test]
    fn test_stickers_only_face_outward() {
        let cube = Cube::solved();
        for piece in cube.pieces() {
            for (face, color) in piece.stickers.iter() {
                assert!(face.contains(piece.position));
                assert_eq!(color, face.home_color());
            }
        }
    }

    #[test]
    fn test_face_without_stickers_is_not_uniform() {
        let mut cube = Cube::solved();
        for piece in cube.pieces_mut() {
            piece.stickers[Face::Top] = None;
        }
        assert!(!cube.is_face_uniform(Face::Top));
        assert!(!cube.is_solved());
    }

    #[test]
    fn test_mismatched_sticker_breaks_uniformity() {
        let mut cube = Cube::solved();
        let corner = home_id((1, 1, 1));
        cube.pieces_mut()[corner as usize].stickers[Face::Top] = Some(Color::Blue);
        assert!(!cube.is_face_uniform(Face::Top));
        assert!(cube.is_face_uniform(Face::Front));
        assert!(!cube.is_solved());
    }

    #[test]
    fn test_opposite_faces_share_axis() {
        for face in Face::ALL {
            assert_eq!(face.opposite().axis(), face.axis());
            assert_eq!(face.opposite().sign(), -face.sign());
            assert_eq!(face.opposite().opposite(), face);
        }
    }
}

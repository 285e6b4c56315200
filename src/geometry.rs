//! Quarter-turn rotations of the 3x3x3 grid.
//!
//! A quarter turn is identified by an axis and a direction. Each one has a
//! position formula (how a cubie's coordinates move) and a face cycle (how
//! the four stickers perpendicular to the axis trade places). Both live in
//! lookup tables indexed by `[axis][direction]` so the two can be checked
//! against each other.

use crate::pieces::{Coord, Face};

/// One of the three rotation axes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// X axis (right).
    X = 0,
    /// Y axis (up).
    Y = 1,
    /// Z axis (towards the viewer).
    Z = 2,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the component of `coord` along this axis.
    #[inline]
    pub const fn component(self, (x, y, z): Coord) -> i32 {
        match self {
            Axis::X => x,
            Axis::Y => y,
            Axis::Z => z,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }
}

/// Rotation sense, as seen from the positive end of the axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Clockwise; `+1`.
    Cw = 0,
    /// Counter-clockwise; `-1`.
    Ccw = 1,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Cw, Direction::Ccw];

    /// Returns `+1` or `-1`.
    pub const fn sign(self) -> i32 {
        match self {
            Direction::Cw => 1,
            Direction::Ccw => -1,
        }
    }

    /// Converts `+1` / `-1` into a direction.
    ///
    /// # Panics
    ///
    /// Panics on any other value.
    pub const fn from_sign(sign: i32) -> Self {
        match sign {
            1 => Direction::Cw,
            -1 => Direction::Ccw,
            _ => panic!("direction must be +1 or -1"),
        }
    }

    #[must_use]
    pub const fn rev(self) -> Self {
        match self {
            Direction::Cw => Direction::Ccw,
            Direction::Ccw => Direction::Cw,
        }
    }
}

/// Position formulas for every quarter turn, indexed by `[axis][direction]`.
///
/// Each entry is the matrix form of a 90 degree rotation written out on
/// tuples; the `Ccw` entry is the inverse of the `Cw` entry.
pub const QUARTER_TURNS: [[fn(Coord) -> Coord; 2]; 3] = [
    // X axis
    [
        |(x, y, z)| (x, z, -y), // cw
        |(x, y, z)| (x, -z, y), // ccw
    ],
    // Y axis
    [
        |(x, y, z)| (-z, y, x), // cw
        |(x, y, z)| (z, y, -x), // ccw
    ],
    // Z axis
    [
        |(x, y, z)| (y, -x, z), // cw
        |(x, y, z)| (-y, x, z), // ccw
    ],
];

/// Four `(destination, source)` pairs: after the turn, the sticker on
/// `destination` is the one that was on `source`.
pub type FaceCycle = [(Face, Face); 4];

/// Sticker cycles for every quarter turn, indexed by `[axis][direction]`.
///
/// Must stay in sync with `QUARTER_TURNS`: rotating the normal of a source
/// face must yield the normal of its destination face.
pub const FACE_CYCLES: [[FaceCycle; 2]; 3] = {
    use Face::*;
    [
        // X axis
        [
            [(Back, Top), (Bottom, Back), (Front, Bottom), (Top, Front)],
            [(Top, Back), (Back, Bottom), (Bottom, Front), (Front, Top)],
        ],
        // Y axis
        [
            [(Front, Right), (Right, Back), (Back, Left), (Left, Front)],
            [(Right, Front), (Back, Right), (Left, Back), (Front, Left)],
        ],
        // Z axis
        [
            [(Top, Left), (Right, Top), (Bottom, Right), (Left, Bottom)],
            [(Left, Top), (Top, Right), (Right, Bottom), (Bottom, Left)],
        ],
    ]
};

/// Rotates a coordinate a quarter turn around `axis`.
#[inline]
pub fn rotate(axis: Axis, direction: Direction, coord: Coord) -> Coord {
    QUARTER_TURNS[axis as usize][direction as usize](coord)
}

/// Returns the sticker cycle for a quarter turn.
#[inline]
pub fn face_cycle(axis: Axis, direction: Direction) -> &'static FaceCycle {
    &FACE_CYCLES[axis as usize][direction as usize]
}

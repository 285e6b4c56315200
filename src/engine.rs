//! Layer rotation engine.
//!
//! Every operation here is a pure function from one `Cube` value to the
//! next. Callers own the cube and decide what to do with the result (record
//! history, check for a solve, animate).

use std::fmt;

use rand::Rng;

use crate::geometry::{self, Axis, Direction};
use crate::grid::Layer;
use crate::pieces::{Cube, Stickers};

/// A quarter turn of one layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Twist {
    pub axis: Axis,
    pub layer: Layer,
    pub direction: Direction,
}

impl Twist {
    pub const fn new(axis: Axis, layer: Layer, direction: Direction) -> Self {
        Self {
            axis,
            layer,
            direction,
        }
    }

    /// Returns the twist that undoes this one.
    #[must_use]
    pub const fn rev(self) -> Self {
        Self {
            direction: self.direction.rev(),
            ..self
        }
    }

    /// Picks an axis, layer, and direction uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            axis: Axis::ALL[rng.random_range(0..Axis::ALL.len())],
            layer: Layer::ALL[rng.random_range(0..Layer::ALL.len())],
            direction: Direction::ALL[rng.random_range(0..Direction::ALL.len())],
        }
    }

    /// Every distinct quarter turn: 3 axes x 3 layers x 2 directions.
    pub fn all() -> impl Iterator<Item = Twist> {
        Axis::ALL.into_iter().flat_map(|axis| {
            Layer::ALL.into_iter().flat_map(move |layer| {
                Direction::ALL
                    .into_iter()
                    .map(move |direction| Twist::new(axis, layer, direction))
            })
        })
    }

    /// Applies this twist to `cube`.
    pub fn apply(self, cube: &Cube) -> Cube {
        rotate_layer(cube, self.axis, self.layer, self.direction)
    }
}

impl fmt::Display for Twist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.axis.symbol(),
            self.layer,
            if self.direction == Direction::Cw { "+" } else { "-" }
        )
    }
}

impl Stickers {
    /// Moves the four side stickers according to a quarter turn, leaving the
    /// two stickers on `axis` in place.
    #[must_use]
    pub fn cycled(&self, axis: Axis, direction: Direction) -> Self {
        let mut cycled = *self;
        for &(destination, source) in geometry::face_cycle(axis, direction) {
            cycled[destination] = self[source];
        }
        cycled
    }
}

/// Rotates the nine cubies of one layer a quarter turn.
///
/// Cubies in the layer move to their rotated position and their side
/// stickers cycle; all other cubies are untouched.
pub fn rotate_layer(cube: &Cube, axis: Axis, layer: Layer, direction: Direction) -> Cube {
    let mut rotated = *cube;
    let mut moved = 0;

    for piece in rotated.pieces_mut() {
        if !layer.contains(axis, piece.position) {
            continue;
        }
        piece.position = geometry::rotate(axis, direction, piece.position);
        piece.stickers = piece.stickers.cycled(axis, direction);
        moved += 1;
    }

    debug_assert_eq!(moved, 9, "a layer always holds nine cubies");
    debug_assert!(rotated.positions_are_distinct());
    rotated
}

/// Reorients the whole cube a quarter turn around `axis`.
///
/// Only positions change; sticker faces stay where they are, so this is a
/// change of viewpoint rather than a puzzle move.
pub fn rotate_whole_cube(cube: &Cube, axis: Axis, direction: Direction) -> Cube {
    let mut rotated = *cube;
    for piece in rotated.pieces_mut() {
        piece.position = geometry::rotate(axis, direction, piece.position);
    }
    rotated
}

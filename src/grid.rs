//! Grid indexing, layer selection, and text rendering of the cube.
//!
//! Cells are indexed x-major over centered coordinates:
//! `idx = (x + 1) * 9 + (y + 1) * 3 + (z + 1)`.

use std::fmt;

use crate::geometry::Axis;
use crate::pieces::{Coord, Cube, Face, LAYER_COUNT};

const DIM: usize = LAYER_COUNT;

/// Converts centered (x, y, z) coordinates to a linear cell index.
#[inline(always)]
pub const fn coord_to_idx((x, y, z): Coord) -> usize {
    ((x + 1) as usize) * DIM * DIM + ((y + 1) as usize) * DIM + ((z + 1) as usize)
}

/// Converts a linear cell index to centered (x, y, z) coordinates.
#[inline(always)]
pub const fn idx_to_coord(cell_index: usize) -> Coord {
    (
        (cell_index / (DIM * DIM)) as i32 - 1,
        ((cell_index / DIM) % DIM) as i32 - 1,
        (cell_index % DIM) as i32 - 1,
    )
}

/// A 1-based layer selector along some axis.
///
/// Layer 1 is the slab at coordinate -1, layer 2 the middle slice, layer 3
/// the slab at coordinate +1.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Layer(u8);

impl Layer {
    pub const ALL: [Layer; LAYER_COUNT] = [Layer(1), Layer(2), Layer(3)];

    /// # Panics
    ///
    /// Panics if `index` is not 1, 2 or 3.
    pub const fn new(index: u8) -> Self {
        assert!(
            index >= 1 && index as usize <= LAYER_COUNT,
            "layer index must be 1, 2 or 3"
        );
        Self(index)
    }

    /// Returns the layer containing coordinate `coordinate` (-1, 0 or 1).
    pub const fn from_coordinate(coordinate: i32) -> Self {
        Self::new((coordinate + 2) as u8)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Coordinate value shared by the nine cubies of this layer.
    pub const fn coordinate(self) -> i32 {
        self.0 as i32 - 2
    }

    /// Whether a cubie at `coord` belongs to this layer along `axis`.
    #[inline]
    pub const fn contains(self, axis: Axis, coord: Coord) -> bool {
        axis.component(coord) == self.coordinate()
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of the cubie behind row `row`, column `col` of `face` as it
/// appears in the unfolded net.
///
/// Side faces are read as seen from outside with the top face up; the top
/// face has the back edge on row 0 and the bottom face has the front edge on
/// row 0.
fn net_position(face: Face, row: usize, col: usize) -> Coord {
    let down = 1 - row as i32;
    let across = col as i32 - 1;
    match face {
        Face::Top => (across, 1, -down),
        Face::Bottom => (across, -1, down),
        Face::Front => (across, down, 1),
        Face::Back => (-across, down, -1),
        Face::Right => (1, down, -across),
        Face::Left => (-1, down, across),
    }
}

/// Returns the nine sticker letters of one face, row by row.
fn face_rows(cube: &Cube, face: Face) -> [[char; DIM]; DIM] {
    let mut rows = [['.'; DIM]; DIM];
    for (row, letters) in rows.iter_mut().enumerate() {
        for (col, letter) in letters.iter_mut().enumerate() {
            if let Some(color) = cube.sticker(net_position(face, row, col), face) {
                *letter = color.letter();
            }
        }
    }
    rows
}

/// Formats the cube as an unfolded net.
///
/// ```text
///    U
///   LFRB
///    D
/// ```
///
/// Each sticker is shown by its color letter; a missing sticker shows as
/// '.'.
pub fn format_cube(cube: &Cube) -> String {
    let mut output = String::new();
    let padding = " ".repeat(DIM);

    let push_single = |output: &mut String, face: Face| {
        for row in face_rows(cube, face) {
            output.push_str(&padding);
            output.extend(row);
            output.push('\n');
        }
    };

    push_single(&mut output, Face::Top);

    let band = [Face::Left, Face::Front, Face::Right, Face::Back].map(|face| face_rows(cube, face));
    for row in 0..DIM {
        for face in &band {
            output.extend(face[row]);
        }
        output.push('\n');
    }

    push_single(&mut output, Face::Bottom);

    output
}

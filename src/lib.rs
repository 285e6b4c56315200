//! 3x3x3 Cube State Library
//!
//! Models the cubies of a Rubik's cube, the quarter-turn algebra that moves
//! them, and a play session (history, timer, scrambles, statistics) layered
//! on top.
//!
//! The engine is a set of pure functions over a `Cube` value:
//!
//! ```
//! use cubestate::{geometry::{Axis, Direction}, grid::Layer};
//!
//! let cube = cubestate::initialize();
//! let turned = cubestate::rotate_layer(&cube, Axis::X, Layer::new(3), Direction::Cw);
//! assert!(!cubestate::is_solved(&turned));
//! let back = cubestate::rotate_layer(&turned, Axis::X, Layer::new(3), Direction::Ccw);
//! assert!(cubestate::is_solved(&back));
//! ```

pub mod engine;
pub mod geometry;
pub mod grid;
pub mod notation;
pub mod persistence;
pub mod pieces;
pub mod session;
pub mod stats;

pub use engine::{rotate_layer, rotate_whole_cube, Twist};
pub use pieces::Cube;
pub use session::{Session, SessionConfig};

/// Returns the solved 27-cubie configuration.
pub fn initialize() -> Cube {
    Cube::solved()
}

/// Whether all six faces of `cube` are uniform.
pub fn is_solved(cube: &Cube) -> bool {
    cube.is_solved()
}

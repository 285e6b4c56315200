//! Move notation.
//!
//! Outer layers are `R L U D F B`, slices are `M E S`, and whole-cube
//! rotations are `x y z`. A `'` suffix reverses a move and a `2` suffix
//! repeats it.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::engine::Twist;
use crate::geometry::{Axis, Direction};
use crate::grid::Layer;

/// Layer symbols and the twist each one names without a suffix.
const LAYER_SYMBOLS: [(char, Twist); 9] = {
    use Axis::*;
    use Direction::*;
    [
        ('R', Twist::new(X, Layer::new(3), Cw)),
        ('L', Twist::new(X, Layer::new(1), Ccw)),
        ('U', Twist::new(Y, Layer::new(3), Cw)),
        ('D', Twist::new(Y, Layer::new(1), Ccw)),
        ('F', Twist::new(Z, Layer::new(3), Cw)),
        ('B', Twist::new(Z, Layer::new(1), Ccw)),
        ('M', Twist::new(X, Layer::new(2), Ccw)),
        ('E', Twist::new(Y, Layer::new(2), Ccw)),
        ('S', Twist::new(Z, Layer::new(2), Cw)),
    ]
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("empty move")]
    Empty,
    #[error("unknown move symbol {0:?}")]
    UnknownSymbol(char),
    #[error("invalid suffix {suffix:?} on move {symbol:?}")]
    BadSuffix { symbol: char, suffix: String },
}

/// One token of a move sequence.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// A puzzle move.
    Twist(Twist),
    /// A reorientation of the whole cube.
    Rotate(Axis, Direction),
}

impl Step {
    #[must_use]
    pub fn rev(self) -> Self {
        match self {
            Step::Twist(twist) => Step::Twist(twist.rev()),
            Step::Rotate(axis, direction) => Step::Rotate(axis, direction.rev()),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (symbol, prime) = match *self {
            Step::Twist(twist) => {
                let &(symbol, named) = LAYER_SYMBOLS
                    .iter()
                    .find(|(_, named)| named.axis == twist.axis && named.layer == twist.layer)
                    .ok_or(fmt::Error)?;
                (symbol, named.direction != twist.direction)
            }
            Step::Rotate(axis, direction) => (axis.symbol(), direction == Direction::Ccw),
        };
        write!(f, "{symbol}{}", if prime { "'" } else { "" })
    }
}

/// A move token with its repeat count, e.g. `R2` or `x'`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub step: Step,
    pub count: u8,
}

impl FromStr for Token {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let symbol = chars.next().ok_or(ParseMoveError::Empty)?;
        let suffix = chars.as_str();

        let step = match symbol {
            'x' => Step::Rotate(Axis::X, Direction::Cw),
            'y' => Step::Rotate(Axis::Y, Direction::Cw),
            'z' => Step::Rotate(Axis::Z, Direction::Cw),
            _ => {
                let &(_, twist) = LAYER_SYMBOLS
                    .iter()
                    .find(|(c, _)| *c == symbol)
                    .ok_or(ParseMoveError::UnknownSymbol(symbol))?;
                Step::Twist(twist)
            }
        };

        let (step, count) = match suffix {
            "" => (step, 1),
            "'" => (step.rev(), 1),
            "2" | "2'" => (step, 2),
            _ => {
                return Err(ParseMoveError::BadSuffix {
                    symbol,
                    suffix: suffix.to_string(),
                })
            }
        };
        Ok(Token { step, count })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.count {
            2 => {
                // a half turn has no direction worth printing
                let forward = match self.step {
                    Step::Twist(twist) => LAYER_SYMBOLS
                        .iter()
                        .find(|(_, named)| named.axis == twist.axis && named.layer == twist.layer)
                        .map(|&(_, named)| Step::Twist(named))
                        .unwrap_or(self.step),
                    Step::Rotate(axis, _) => Step::Rotate(axis, Direction::Cw),
                };
                write!(f, "{forward}2")
            }
            _ => write!(f, "{}", self.step),
        }
    }
}

/// Parses a whitespace-separated move sequence into individual quarter
/// turns, expanding half turns.
pub fn parse_sequence(s: &str) -> Result<Vec<Step>, ParseMoveError> {
    let mut steps = Vec::new();
    for word in s.split_whitespace() {
        let token: Token = word.parse()?;
        for _ in 0..token.count {
            steps.push(token.step);
        }
    }
    Ok(steps)
}

/// Formats quarter turns as a space-separated sequence.
pub fn format_sequence<'a>(steps: impl IntoIterator<Item = &'a Step>) -> String {
    steps
        .into_iter()
        .map(|step| step.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Maps a keyboard letter to a twist: the letter picks the layer, and
/// holding shift reverses the direction.
pub fn twist_for_key(letter: char, shift: bool) -> Option<Twist> {
    let symbol = letter.to_ascii_uppercase();
    let &(_, twist) = LAYER_SYMBOLS.iter().find(|(c, _)| *c == symbol)?;
    Some(if shift { twist.rev() } else { twist })
}

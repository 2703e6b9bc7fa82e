//! Counting line geometry.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Which side of a counting line a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Negative,
    On,
    Positive,
}

/// Direction of a crossing, named after the side the track ends up on.
///
/// For a horizontal line in image coordinates the positive side is below the
/// line, so `Positive` is a top-to-bottom crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossingDirection {
    /// Negative side to positive side
    Positive,
    /// Positive side to negative side
    Negative,
}

/// Which crossing directions increment the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionFilter {
    #[default]
    Any,
    Positive,
    Negative,
}

impl DirectionFilter {
    pub fn accepts(self, direction: CrossingDirection) -> bool {
        match self {
            Self::Any => true,
            Self::Positive => direction == CrossingDirection::Positive,
            Self::Negative => direction == CrossingDirection::Negative,
        }
    }
}

/// The fixed line vehicles are counted against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CountingLine {
    /// Infinite horizontal line `y = y`
    Horizontal { y: f32 },
    /// Infinite vertical line `x = x`
    Vertical { x: f32 },
    /// Finite segment; its positive side is on the right of `start -> end`
    /// as drawn on screen, where y grows downward.
    Segment { start: Point2<f32>, end: Point2<f32> },
}

impl Default for CountingLine {
    fn default() -> Self {
        Self::Horizontal { y: 300.0 }
    }
}

impl CountingLine {
    pub fn segment(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::Segment {
            start: Point2::new(x1, y1),
            end: Point2::new(x2, y2),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        match *self {
            Self::Horizontal { y } if !y.is_finite() => {
                Err(Error::DegenerateLine(format!("horizontal offset {y}")))
            }
            Self::Vertical { x } if !x.is_finite() => {
                Err(Error::DegenerateLine(format!("vertical offset {x}")))
            }
            Self::Segment { start, end } => {
                let finite = start.iter().chain(end.iter()).all(|v| v.is_finite());
                if !finite || start == end {
                    return Err(Error::DegenerateLine(format!(
                        "segment ({}, {}) -> ({}, {})",
                        start.x, start.y, end.x, end.y
                    )));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Signed distance-like value whose sign gives the side of `p`.
    pub fn signed_offset(&self, p: &Point2<f32>) -> f32 {
        match *self {
            Self::Horizontal { y } => p.y - y,
            Self::Vertical { x } => p.x - x,
            Self::Segment { start, end } => {
                let dir = end - start;
                let rel = *p - start;
                dir.x * rel.y - dir.y * rel.x
            }
        }
    }

    pub fn side(&self, p: &Point2<f32>) -> Side {
        let offset = self.signed_offset(p);
        if offset > 0.0 {
            Side::Positive
        } else if offset < 0.0 {
            Side::Negative
        } else {
            Side::On
        }
    }

    /// Whether the move `from -> to`, whose endpoints lie on opposite sides,
    /// passes through the drawn part of the line. Always true for the
    /// infinite variants.
    pub fn crossing_in_bounds(&self, from: &Point2<f32>, to: &Point2<f32>) -> bool {
        let Self::Segment { start, end } = *self else {
            return true;
        };
        let da = self.signed_offset(from);
        let db = self.signed_offset(to);
        if da == db {
            return false;
        }
        let hit = *from + (*to - *from) * (da / (da - db));
        let dir = end - start;
        let t = (hit - start).dot(&dir) / dir.norm_squared();
        (0.0..=1.0).contains(&t)
    }
}

//! Canvas coordinates and sizes.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Top-left corner of a shape of `size` whose center is at `self`.
    pub fn centered(self, size: Dimensions) -> Self {
        Self {
            x: self.x - size.width / 2.0,
            y: self.y - size.height / 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn square(side: f64) -> Self {
        Self::new(side, side)
    }
}

/// Where a created shape goes: at its top-left corner, or centered on a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    TopLeft(Point),
    Center(Point),
}

impl Placement {
    pub fn resolve(self, size: Dimensions) -> Point {
        match self {
            Self::TopLeft(p) => p,
            Self::Center(p) => p.centered(size),
        }
    }
}

impl From<Point> for Placement {
    fn from(point: Point) -> Self {
        Self::TopLeft(point)
    }
}

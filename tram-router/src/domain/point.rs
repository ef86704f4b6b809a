//! Planar stop coordinates.

use serde::{Deserialize, Serialize};

/// A position on the network's planar map.
///
/// Units are whatever the network data uses; the search only compares
/// distances against a speed expressed in the same units per minute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Returns true if both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

//! Core types for trilateration
//!
//! This module defines the fundamental types used throughout the crate:
//! reference spheres / result points, the fixed-capacity solution sequence
//! and the error values.

use crate::vector::Vec3;
use serde::de::Error as _;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;

/// A point in 3-D space with an attached range.
///
/// As a solver input the point is a sphere center and `r` is the measured
/// distance from that center to the unknown target. Points produced by the
/// solver carry `r = 0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub r: f64,
}

impl Point {
    /// Create a sphere center with range `r`.
    pub fn new(x: f64, y: f64, z: f64, r: f64) -> Self {
        Self { x, y, z, r }
    }

    /// Create a bare location (`r = 0`).
    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, r: 0.0 }
    }

    /// Coordinates as a free vector, dropping the range.
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Euclidean distance between the coordinates of two points
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.position() - other.position()).norm()
    }
}

impl From<Vec3> for Point {
    fn from(v: Vec3) -> Self {
        Point::at(v.x, v.y, v.z)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Maximum number of candidates a solve can produce.
pub const MAX_CANDIDATES: usize = 3;

/// Ordered candidate target locations.
///
/// Element 0 is the primary point in the plane of the three sphere centers.
/// When the intersection is not tangent, elements 1 and 2 are the `+z` and
/// `-z` mirror candidates, in that order.
#[derive(Debug, Clone, Copy)]
pub struct Solution {
    points: [Point; MAX_CANDIDATES],
    len: usize,
}

impl Solution {
    /// Single-point solution (spheres touch in the normal direction)
    pub(crate) fn tangent(primary: Point) -> Self {
        Self {
            points: [primary, Point::default(), Point::default()],
            len: 1,
        }
    }

    /// Primary point followed by the `+z` / `-z` pair
    pub(crate) fn mirrored(primary: Point, upper: Point, lower: Point) -> Self {
        Self {
            points: [primary, upper, lower],
            len: MAX_CANDIDATES,
        }
    }

    /// Up to [`MAX_CANDIDATES`] points, in order.
    fn from_slice(points: &[Point]) -> Option<Self> {
        if points.len() > MAX_CANDIDATES {
            return None;
        }
        let mut slots = [Point::default(); MAX_CANDIDATES];
        slots[..points.len()].copy_from_slice(points);
        Some(Self {
            points: slots,
            len: points.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The primary candidate.
    ///
    /// # Panics
    ///
    /// Panics if the solution is empty, exactly like `solution[0]`.
    pub fn first(&self) -> Point {
        self.as_slice()[0]
    }

    /// The primary candidate, or `None` for an empty solution.
    pub fn primary(&self) -> Option<Point> {
        self.as_slice().first().copied()
    }

    pub fn get(&self, index: usize) -> Option<Point> {
        self.as_slice().get(index).copied()
    }

    /// The `(+z, -z)` candidates, if the intersection was not tangent.
    pub fn mirror_pair(&self) -> Option<(Point, Point)> {
        match self.as_slice() {
            [_, upper, lower] => Some((*upper, *lower)),
            _ => None,
        }
    }

    /// True when the spheres meet in exactly one point.
    pub fn is_tangent(&self) -> bool {
        self.len == 1
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.as_slice().iter()
    }
}

impl Deref for Solution {
    type Target = [Point];

    fn deref(&self) -> &[Point] {
        self.as_slice()
    }
}

impl PartialEq for Solution {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<'a> IntoIterator for &'a Solution {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Solution {
    type Item = Point;
    type IntoIter = std::iter::Take<std::array::IntoIter<Point, MAX_CANDIDATES>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter().take(self.len)
    }
}

impl Serialize for Solution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len))?;
        for point in self.iter() {
            seq.serialize_element(point)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Solution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let points = Vec::<Point>::deserialize(deserializer)?;
        Solution::from_slice(&points)
            .ok_or_else(|| D::Error::invalid_length(points.len(), &"at most 3 points"))
    }
}

/// The three spheres admit no consistent intersection point.
///
/// Infeasible radii and degenerate center geometry (coincident or collinear
/// centers) are deliberately reported through this one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no solution found")]
pub struct NoSolutionError;

/// Result type for solve operations
pub type SolveResult = Result<Solution, NoSolutionError>;

/// Errors raised when validating a [`SolverConfig`](crate::trilateration::SolverConfig)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid tangent tolerance: {0}. Must be finite and non-negative")]
    InvalidTangentTolerance(f64),

    #[error("Invalid degeneracy tolerance: {0}. Must be finite and non-negative")]
    InvalidDegeneracyTolerance(f64),
}

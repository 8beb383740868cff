//! Closed-form three-sphere trilateration.
//!
//! Given three spheres (center + measured range) this module finds the
//! point(s) where they meet. The computation works in a local orthonormal
//! frame built from the sphere centers:
//!
//! - `ex` points from the first center to the second,
//! - `ey` is the part of (third − first) orthogonal to `ex`, normalised,
//! - `ez = ex × ey` is the normal of the plane through the three centers.
//!
//! In that frame the problem reduces to two linear equations for the in-plane
//! coordinates `(x, y)` and a quadratic for the out-of-plane offset `z`.
//!
//! # Quick start
//!
//! ```
//! use trilat_core::{solve, Point};
//!
//! let r = 25.0;
//! let p1 = Point::new(0.0, 0.0, 0.0, r);
//! let p2 = Point::new(0.8 * r, 0.0, 0.0, r);
//! let p3 = Point::new(0.0, 0.8 * r, 0.0, r);
//!
//! let solution = solve(p1, p2, p3).unwrap();
//! assert_eq!(solution.len(), 3);
//! assert_eq!(solution.first().x, 10.0);
//! assert_eq!(solution.first().y, 10.0);
//! ```
//!
//! Degenerate geometry (coincident or collinear centers) and infeasible
//! ranges both surface as [`NoSolutionError`]. The precise reason is emitted
//! as a `trace`-level `tracing` event.

use crate::types::{ConfigError, NoSolutionError, Point, Solution, SolveResult};
use crate::vector::Vec3;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tolerances applied by [`Trilaterator`].
///
/// The default is all zeros, which reproduces exact-equality classification:
/// only `z == 0.0` counts as tangent and any negative `z²` fails. Baselines
/// are still checked against the round-off bound of the input coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Out-of-plane offsets `z <= tangent_tolerance` collapse to a single
    /// tangent point, and `z²` down to `-tangent_tolerance²` is clamped to 0.
    pub tangent_tolerance: f64,
    /// Absolute floor for the baselines `d` (first→second center) and `j`
    /// (third center's distance from the first baseline). Values at or below
    /// it are rejected, on top of the relative round-off bound that always
    /// applies.
    pub degeneracy_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tangent_tolerance: 0.0,
            degeneracy_tolerance: 0.0,
        }
    }
}

impl SolverConfig {
    /// Exact-equality classification (same as `default()`).
    pub fn exact() -> Self {
        Self::default()
    }

    /// Absorb round-off around tangency and near-degenerate geometry.
    pub fn tolerant() -> Self {
        Self {
            tangent_tolerance: 1e-9,
            degeneracy_tolerance: 1e-9,
        }
    }

    /// Check that both tolerances are finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tangent_tolerance.is_finite() && self.tangent_tolerance >= 0.0) {
            return Err(ConfigError::InvalidTangentTolerance(self.tangent_tolerance));
        }
        if !(self.degeneracy_tolerance.is_finite() && self.degeneracy_tolerance >= 0.0) {
            return Err(ConfigError::InvalidDegeneracyTolerance(
                self.degeneracy_tolerance,
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rejection reasons (logged, never exposed)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
enum Rejection {
    /// First and second centers coincide.
    CoincidentCenters { d: f64 },
    /// Third center lies on the line through the first two.
    CollinearCenters { j: f64 },
    /// Ranges are inconsistent with the center separation.
    NegativeDiscriminant { z_squared: f64 },
    /// NaN or infinity reached the out-of-plane offset or an output point.
    NonFiniteResult { value: f64 },
}

impl Rejection {
    fn reason(&self) -> &'static str {
        match self {
            Rejection::CoincidentCenters { .. } => "coincident centers",
            Rejection::CollinearCenters { .. } => "collinear centers",
            Rejection::NegativeDiscriminant { .. } => "negative discriminant",
            Rejection::NonFiniteResult { .. } => "non-finite result",
        }
    }

    /// The scalar that tripped the guard.
    fn value(&self) -> f64 {
        match *self {
            Rejection::CoincidentCenters { d } => d,
            Rejection::CollinearCenters { j } => j,
            Rejection::NegativeDiscriminant { z_squared } => z_squared,
            Rejection::NonFiniteResult { value } => value,
        }
    }
}

// ---------------------------------------------------------------------------
// Local frame
// ---------------------------------------------------------------------------

/// Orthonormal frame anchored at the first center.
#[derive(Debug, Clone, Copy)]
struct Frame {
    origin: Vec3,
    ex: Vec3,
    ey: Vec3,
    /// Component of (third − first) orthogonal to `ex`.
    a: Vec3,
    /// Distance between first and second center.
    d: f64,
    /// Projection of (third − first) on `ex`.
    i: f64,
    /// Length of `a`.
    j: f64,
}

impl Frame {
    fn build(p1: &Point, p2: &Point, p3: &Point, tolerance: f64) -> Result<Self, Rejection> {
        let origin = p1.position();
        let baseline = p2.position() - origin;
        let d = baseline.norm();
        // Coordinate differences carry round-off at the scale of the centers.
        let center_scale = origin
            .norm()
            .max(p2.position().norm())
            .max(p3.position().norm());
        ensure_nonzero(d, center_scale, tolerance)
            .map_err(|d| Rejection::CoincidentCenters { d })?;
        let ex = baseline / d;

        let offset = p3.position() - origin;
        let i = ex.dot(offset);
        let a = offset - ex * i;
        let j = a.norm();
        ensure_nonzero(j, center_scale.max(offset.norm()), tolerance)
            .map_err(|j| Rejection::CollinearCenters { j })?;
        let ey = a / j;

        Ok(Self {
            origin,
            ex,
            ey,
            a,
            d,
            i,
            j,
        })
    }

    fn normal(&self) -> Vec3 {
        self.ex.cross(self.ey)
    }
}

/// Multiples of machine epsilon, relative to the operand magnitude, below
/// which a difference of coordinates is indistinguishable from round-off.
const ROUND_OFF_ULPS: f64 = 16.0;

/// Denominator guard. `value` must exceed both the absolute `tolerance` and
/// the round-off bound of quantities of magnitude `scale`. NaN fails the
/// comparison and is rejected too.
fn ensure_nonzero(value: f64, scale: f64, tolerance: f64) -> Result<f64, f64> {
    let floor = tolerance.max(f64::EPSILON * ROUND_OFF_ULPS * scale);
    if value > floor && value.is_finite() {
        Ok(value)
    } else {
        Err(value)
    }
}

/// NaN / infinity guard on the out-of-plane offset.
fn ensure_finite(z: f64) -> Result<f64, Rejection> {
    if z.is_finite() {
        Ok(z)
    } else {
        Err(Rejection::NonFiniteResult { value: z })
    }
}

fn square(v: f64) -> f64 {
    v * v
}

// ---------------------------------------------------------------------------
// Trilaterator
// ---------------------------------------------------------------------------

/// Stateless three-sphere solver carrying a [`SolverConfig`].
///
/// The value is `Copy` and `Sync`; one instance can serve any number of
/// threads concurrently. With the `parallel` feature,
/// [`solve_batch`](Self::solve_batch) fans a slice of triples out over rayon.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Trilaterator {
    config: SolverConfig,
}

impl Trilaterator {
    /// Solver with exact-equality classification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Solver with custom tolerances.
    pub fn with_config(config: SolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Intersect three spheres.
    ///
    /// Returns `[primary]` for a tangent intersection, otherwise
    /// `[primary, a + z·ez, a − z·ez]`. The mirror pair is expressed relative
    /// to the orthogonal component `a`, not relative to `p1`.
    pub fn solve(&self, p1: Point, p2: Point, p3: Point) -> SolveResult {
        match self.try_solve(&p1, &p2, &p3) {
            Ok(solution) => {
                tracing::trace!(candidates = solution.len(), "trilateration solved");
                Ok(solution)
            }
            Err(rejection) => {
                tracing::trace!(
                    reason = rejection.reason(),
                    value = rejection.value(),
                    "trilateration rejected"
                );
                Err(NoSolutionError)
            }
        }
    }

    /// Solve many independent triples in parallel. Results keep input order.
    #[cfg(feature = "parallel")]
    pub fn solve_batch(&self, triples: &[[Point; 3]]) -> Vec<SolveResult> {
        triples
            .par_iter()
            .map(|[p1, p2, p3]| self.solve(*p1, *p2, *p3))
            .collect()
    }

    fn try_solve(&self, p1: &Point, p2: &Point, p3: &Point) -> Result<Solution, Rejection> {
        let frame = Frame::build(p1, p2, p3, self.config.degeneracy_tolerance)?;
        let Frame { d, i, j, .. } = frame;

        let r1_sq = square(p1.r);
        let x = (r1_sq - square(p2.r) + square(d)) / (2.0 * d);
        let y = (r1_sq - square(p3.r) + square(i) + square(j)) / (2.0 * j) - (i / j) * x;
        let z = self.out_of_plane_offset(r1_sq - square(x) - square(y))?;

        let primary = frame.origin + frame.ex * x + frame.ey * y;
        if z <= self.config.tangent_tolerance {
            return finite_points([primary]).map(|[p]| Solution::tangent(p));
        }

        let ez = frame.normal();
        let upper = frame.a + ez * z;
        let lower = frame.a - ez * z;
        finite_points([primary, upper, lower])
            .map(|[p, u, l]| Solution::mirrored(p, u, l))
    }

    fn out_of_plane_offset(&self, z_squared: f64) -> Result<f64, Rejection> {
        ensure_finite(z_squared)?;
        let floor = -square(self.config.tangent_tolerance);
        if z_squared < floor {
            return Err(Rejection::NegativeDiscriminant { z_squared });
        }
        ensure_finite(z_squared.max(0.0).sqrt())
    }
}

fn finite_points<const N: usize>(points: [Vec3; N]) -> Result<[Point; N], Rejection> {
    let bad = points
        .iter()
        .flat_map(|p| [p.x, p.y, p.z])
        .find(|c| !c.is_finite());
    match bad {
        Some(value) => Err(Rejection::NonFiniteResult { value }),
        None => Ok(points.map(Point::from)),
    }
}

/// Intersect three spheres with exact-equality classification.
///
/// Equivalent to `Trilaterator::new().solve(p1, p2, p3)`.
pub fn solve(p1: Point, p2: Point, p3: Point) -> SolveResult {
    Trilaterator::new().solve(p1, p2, p3)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

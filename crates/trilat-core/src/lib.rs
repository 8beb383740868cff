//! # Trilateration Core
//!
//! Closed-form position fixing from three reference spheres.
//!
//! Each reference is a [`Point`] carrying a center `(x, y, z)` and a measured
//! range `r` to the unknown target. [`solve`] intersects the three spheres and
//! returns a [`Solution`] of one or three candidates, or [`NoSolutionError`]
//! when the ranges are inconsistent or the centers are degenerate.
//!
//! ## Solution layout
//!
//! ```text
//! [0] primary  = p1 + x·ex + y·ey          (in the plane of the centers)
//! [1] upper    = a + z·ez                  (only when z != 0)
//! [2] lower    = a − z·ez
//! ```
//!
//! ## Example
//!
//! ```rust
//! use trilat_core::prelude::*;
//!
//! let solver = Trilaterator::with_config(SolverConfig::tolerant()).unwrap();
//! let fix = solver.solve(
//!     Point::new(0.0, 0.0, 0.0, 5.0),
//!     Point::new(10.0, 0.0, 0.0, 5.0),
//!     Point::new(5.0, 5.0, 0.0, 5.0),
//! );
//! assert!(fix.unwrap().is_tangent());
//! ```

pub mod observe;
pub mod trilateration;
pub mod types;
pub mod vector;

pub use trilateration::{solve, SolverConfig, Trilaterator};
pub use types::{ConfigError, NoSolutionError, Point, Solution, SolveResult};
pub use vector::Vec3;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::trilateration::{solve, SolverConfig, Trilaterator};
    pub use crate::types::{NoSolutionError, Point, Solution, SolveResult};
    pub use crate::vector::Vec3;
}

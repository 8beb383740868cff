//! Locate a target from three beacons and print every candidate.
//!
//! Run with: RUST_LOG=trilat_core=trace cargo run -p trilat-core --example locate

use trilat_core::observe::{init_logging, LogConfig};
use trilat_core::prelude::*;

fn main() {
    init_logging(&LogConfig::development());

    let r = 25.0;
    let beacons = [
        Point::new(0.0, 0.0, 0.0, r),
        Point::new(0.8 * r, 0.0, 0.0, r),
        Point::new(0.0, 0.8 * r, 0.0, r),
    ];

    match solve(beacons[0], beacons[1], beacons[2]) {
        Ok(solution) => {
            println!("{} candidate(s)", solution.len());
            for (idx, point) in solution.iter().enumerate() {
                println!("  [{}] {}", idx, point);
            }
        }
        Err(err) => println!("error: {}", err),
    }

    // Beacons on one line cannot fix a position.
    let collinear = [
        Point::new(0.0, 0.0, 0.0, 1.0),
        Point::new(1.0, 0.0, 0.0, 1.0),
        Point::new(2.0, 0.0, 0.0, 1.0),
    ];
    if let Err(err) = solve(collinear[0], collinear[1], collinear[2]) {
        println!("collinear beacons: {}", err);
    }
}

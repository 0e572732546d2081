//! Geographic kernel: great-circle distances and travel-time estimation.
//!
//! Distances are miles, durations are minutes. Decoupled from the solvers
//! so a caller can substitute a road-network matrix without touching them.

mod haversine;
mod matrix;

pub use haversine::{haversine_distance, EARTH_RADIUS_MILES};
pub use matrix::{
    build_duration_matrix, estimate_travel_time, problem_locations, DistanceMatrix, Location,
};

//! Dense distance matrix and travel-time estimation.

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Technician, WorkOrder};
use crate::round::round2;

use super::haversine::haversine_distance;

/// A geographic point used to build a distance matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

impl Location {
    /// Creates a location.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<&WorkOrder> for Location {
    fn from(wo: &WorkOrder) -> Self {
        Self::new(wo.lat(), wo.lng())
    }
}

impl From<&Technician> for Location {
    fn from(tech: &Technician) -> Self {
        Self::new(tech.home_lat(), tech.home_lng())
    }
}

/// A dense n×n distance matrix stored in row-major order, in miles.
///
/// The solver convention indexes rows 0..T-1 as technician home bases and
/// T..T+W-1 as work-order sites; [`problem_locations`] produces that
/// layout.
///
/// # Examples
///
/// ```
/// use dispatch_routing::geo::{DistanceMatrix, Location};
///
/// let dm = DistanceMatrix::from_locations(&[
///     Location::new(39.7392, -104.9903),
///     Location::new(39.7294, -104.8319),
/// ]).unwrap();
/// assert_eq!(dm.size(), 2);
/// assert_eq!(dm.get(0, 0), 0.0);
/// assert!(dm.is_symmetric(1e-9));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Builds a symmetric haversine matrix from locations.
    ///
    /// Distances are rounded to 4 decimals; the diagonal is zero. Fails
    /// with [`Error::InvalidLocation`] if any coordinate is not finite.
    pub fn from_locations(locations: &[Location]) -> Result<Self> {
        for (idx, loc) in locations.iter().enumerate() {
            if !loc.lat.is_finite() || !loc.lng.is_finite() {
                return Err(Error::InvalidLocation {
                    index: idx,
                    reason: format!("coordinates ({}, {}) are not finite", loc.lat, loc.lng),
                });
            }
        }

        let n = locations.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = haversine_distance(
                    locations[i].lat,
                    locations[i].lng,
                    locations[j].lat,
                    locations[j].lng,
                );
                let d = (d * 10_000.0).round() / 10_000.0;
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        debug!(size = n, "built distance matrix");
        Ok(dm)
    }

    /// Creates a matrix from explicit rows.
    ///
    /// Fails with [`Error::MatrixSizeMismatch`] if any row length differs
    /// from the row count.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(Error::MatrixSizeMismatch(format!(
                    "row {idx} has {} columns but expected {n}",
                    row.len()
                )));
            }
        }
        Ok(Self {
            data: rows.into_iter().flatten().collect(),
            size: n,
        })
    }

    /// Distance from node `from` to node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from node `from` to node `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}

/// Concatenates technician homes and work-order sites in the solver's node
/// order: 0..T-1 are homes, T..T+W-1 are sites.
pub fn problem_locations(technicians: &[Technician], work_orders: &[WorkOrder]) -> Vec<Location> {
    technicians
        .iter()
        .map(Location::from)
        .chain(work_orders.iter().map(Location::from))
        .collect()
}

/// Estimates travel time in minutes for a distance at a constant speed.
///
/// Rounded to 2 decimals. Fails with [`Error::InvalidInput`] for negative
/// distance or non-positive speed.
///
/// # Examples
///
/// ```
/// use dispatch_routing::geo::estimate_travel_time;
///
/// assert_eq!(estimate_travel_time(15.0, 30.0).unwrap(), 30.0);
/// assert!(estimate_travel_time(-1.0, 30.0).is_err());
/// ```
pub fn estimate_travel_time(distance_miles: f64, speed_mph: f64) -> Result<f64> {
    if distance_miles < 0.0 {
        return Err(Error::InvalidInput(format!(
            "distance_miles must be non-negative, got {distance_miles}"
        )));
    }
    if speed_mph <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "speed_mph must be positive, got {speed_mph}"
        )));
    }
    Ok(round2(distance_miles / speed_mph * 60.0))
}

/// Converts a distance matrix (miles) into per-leg travel minutes.
///
/// Fails with [`Error::InvalidInput`] if `avg_speed_mph` is not positive.
pub fn build_duration_matrix(matrix: &DistanceMatrix, avg_speed_mph: f64) -> Result<Vec<Vec<f64>>> {
    if avg_speed_mph <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "avg_speed_mph must be positive, got {avg_speed_mph}"
        )));
    }
    let n = matrix.size();
    let durations = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| round2(matrix.get(i, j) / avg_speed_mph * 60.0))
                .collect()
        })
        .collect();
    Ok(durations)
}

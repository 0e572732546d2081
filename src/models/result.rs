//! Optimization result type.

use std::collections::BTreeMap;

use crate::round::round2;

use super::TechnicianRoute;

/// The outcome of one solver run.
///
/// Value object: built once by a solver, never mutated afterwards. Every
/// input work order appears either on exactly one route or in the sorted
/// unassigned list.
///
/// # Examples
///
/// ```
/// use dispatch_routing::models::{OptimizationResult, TechnicianRoute};
///
/// let result = OptimizationResult::new(
///     "greedy",
///     vec![TechnicianRoute::new("tech-001", "Alice")],
///     vec!["WO-002".to_string()],
/// );
/// assert_eq!(result.algorithm(), "greedy");
/// assert_eq!(result.unassigned_orders(), ["WO-002"]);
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct OptimizationResult {
    routes: Vec<TechnicianRoute>,
    total_distance: f64,
    total_duration: f64,
    unassigned_orders: Vec<String>,
    algorithm: String,
    solve_time_seconds: f64,
    metadata: BTreeMap<String, serde_json::Value>,
}

impl OptimizationResult {
    /// Creates a result from finalized routes.
    ///
    /// Totals are summed from the route totals and rounded to 2 decimals;
    /// the unassigned list is sorted lexicographically.
    pub fn new(
        algorithm: impl Into<String>,
        routes: Vec<TechnicianRoute>,
        mut unassigned_orders: Vec<String>,
    ) -> Self {
        unassigned_orders.sort();
        let total_distance = round2(routes.iter().map(TechnicianRoute::total_distance).sum());
        let total_duration = round2(routes.iter().map(TechnicianRoute::total_duration).sum());
        Self {
            routes,
            total_distance,
            total_duration,
            unassigned_orders,
            algorithm: algorithm.into(),
            solve_time_seconds: 0.0,
            metadata: BTreeMap::new(),
        }
    }

    /// One technician route per input technician, in input order.
    pub fn routes(&self) -> &[TechnicianRoute] {
        &self.routes
    }

    /// Sum of route distances in miles.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Sum of route travel durations in minutes.
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// Work orders no route serves, sorted lexicographically.
    pub fn unassigned_orders(&self) -> &[String] {
        &self.unassigned_orders
    }

    /// Name of the strategy that produced this result.
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Wall-clock solve time in seconds, rounded to 4 decimals.
    /// Informational, not contractual.
    pub fn solve_time_seconds(&self) -> f64 {
        self.solve_time_seconds
    }

    /// Solver-specific extras (convergence info, engine status, …).
    pub fn metadata(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.metadata
    }

    /// Number of work orders assigned across all routes.
    pub fn num_assigned(&self) -> usize {
        self.routes.iter().map(TechnicianRoute::len).sum()
    }

    pub(crate) fn set_solve_time_seconds(&mut self, seconds: f64) {
        self.solve_time_seconds = seconds;
    }

    pub(crate) fn insert_metadata(&mut self, key: &str, value: serde_json::Value) {
        self.metadata.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RouteStop;
    use chrono::NaiveDate;

    fn route_with_distance(id: &str, miles: f64) -> TechnicianRoute {
        let day = NaiveDate::from_ymd_opt(2026, 2, 12).expect("valid date");
        let mut route = TechnicianRoute::new(id, "Tech");
        route.push_stop(RouteStop {
            work_order_id: format!("WO-{id}"),
            property_id: "P-1".to_string(),
            lat: 39.7,
            lng: -105.0,
            sequence: 0,
            arrival_time: day.and_hms_opt(9, 0, 0).expect("valid"),
            departure_time: day.and_hms_opt(10, 0, 0).expect("valid"),
            travel_distance: miles,
            travel_duration: miles * 2.0,
        });
        route.finalize(8.0);
        route
    }

    #[test]
    fn test_totals_sum_routes() {
        let result = OptimizationResult::new(
            "greedy",
            vec![route_with_distance("a", 10.0), route_with_distance("b", 5.25)],
            vec![],
        );
        assert!((result.total_distance() - 15.25).abs() < 1e-9);
        assert!((result.total_duration() - 30.5).abs() < 1e-9);
        assert_eq!(result.num_assigned(), 2);
    }

    #[test]
    fn test_unassigned_sorted() {
        let result = OptimizationResult::new(
            "greedy",
            vec![],
            vec!["WO-010".to_string(), "WO-002".to_string()],
        );
        assert_eq!(result.unassigned_orders(), ["WO-002", "WO-010"]);
    }

    #[test]
    fn test_metadata_round_trip() {
        let mut result = OptimizationResult::new("genetic", vec![], vec![]);
        result.insert_metadata("best_fitness", serde_json::json!(12.5));
        assert_eq!(
            result.metadata().get("best_fitness"),
            Some(&serde_json::json!(12.5))
        );
    }
}

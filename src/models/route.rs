//! Route stop and technician route types.

use chrono::NaiveDateTime;

use crate::round::{round1, round2};

use super::timing::minutes_between;

/// A single timed stop on a technician's route.
///
/// Arrival is the service start (after any waiting for the window to
/// open); departure is arrival plus service duration. Travel fields
/// describe the leg from the previous node, rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RouteStop {
    /// Work order serviced at this stop.
    pub work_order_id: String,
    /// Property being serviced.
    pub property_id: String,
    /// Site latitude.
    pub lat: f64,
    /// Site longitude.
    pub lng: f64,
    /// 0-based position within the route.
    pub sequence: usize,
    /// Service start time.
    pub arrival_time: NaiveDateTime,
    /// Service end time.
    pub departure_time: NaiveDateTime,
    /// Miles traveled from the previous node.
    pub travel_distance: f64,
    /// Minutes traveled from the previous node.
    pub travel_duration: f64,
}

/// The ordered schedule for one technician.
///
/// Totals are sums of the per-stop fields; utilization is the share of the
/// technician's daily hour budget consumed by travel plus service, clamped
/// to 100%.
///
/// # Examples
///
/// ```
/// use dispatch_routing::models::TechnicianRoute;
///
/// let route = TechnicianRoute::new("tech-001", "Alice Martinez");
/// assert!(route.is_empty());
/// assert_eq!(route.utilization_percent(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TechnicianRoute {
    technician_id: String,
    technician_name: String,
    stops: Vec<RouteStop>,
    total_distance: f64,
    total_duration: f64,
    total_work_time: f64,
    utilization_percent: f64,
}

impl TechnicianRoute {
    /// Creates an empty route for the given technician.
    pub fn new(technician_id: impl Into<String>, technician_name: impl Into<String>) -> Self {
        Self {
            technician_id: technician_id.into(),
            technician_name: technician_name.into(),
            stops: Vec::new(),
            total_distance: 0.0,
            total_duration: 0.0,
            total_work_time: 0.0,
            utilization_percent: 0.0,
        }
    }

    /// Appends a stop and folds its travel and service time into the
    /// running totals.
    pub fn push_stop(&mut self, stop: RouteStop) {
        self.total_distance += stop.travel_distance;
        self.total_duration += stop.travel_duration;
        self.total_work_time += minutes_between(stop.arrival_time, stop.departure_time);
        self.stops.push(stop);
    }

    /// Rounds the totals and computes utilization against the given daily
    /// hour budget. Call once, after the last stop.
    pub fn finalize(&mut self, max_hours: f64) {
        self.total_distance = round2(self.total_distance);
        self.total_duration = round2(self.total_duration);
        self.total_work_time = round2(self.total_work_time);
        let total_hours = (self.total_duration + self.total_work_time) / 60.0;
        self.utilization_percent = if max_hours > 0.0 {
            round1((total_hours / max_hours * 100.0).min(100.0))
        } else {
            0.0
        };
    }

    /// Technician this route belongs to.
    pub fn technician_id(&self) -> &str {
        &self.technician_id
    }

    /// Technician display name.
    pub fn technician_name(&self) -> &str {
        &self.technician_name
    }

    /// Ordered stops.
    pub fn stops(&self) -> &[RouteStop] {
        &self.stops
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if the route has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Total miles traveled.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Total minutes spent traveling.
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// Total minutes spent on site.
    pub fn total_work_time(&self) -> f64 {
        self.total_work_time
    }

    /// Share of the daily hour budget used, 0–100.
    pub fn utilization_percent(&self) -> f64 {
        self.utilization_percent
    }
}

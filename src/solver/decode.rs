//! Shared assignment decoder.
//!
//! Turns an abstract assignment (ordered work-order indices per
//! technician) into timed, feasibility-checked routes. This is the
//! canonical producer of [`TechnicianRoute`] for the greedy and genetic
//! strategies; the CP-VRP strategy reads timing from solver variables and
//! runs the same feasibility filter in its own decode.

use std::collections::BTreeSet;

use crate::models::{add_minutes, OptimizationResult, RouteStop, TechnicianRoute};
use crate::round::round2;

use super::instance::ProblemInstance;

/// Travel minutes for a leg, rounded to 2 decimals.
///
/// Same formula as [`crate::geo::estimate_travel_time`]; arguments are
/// pre-validated at solve entry so this variant is infallible.
pub(crate) fn travel_minutes(distance_miles: f64, speed_mph: f64) -> f64 {
    round2(distance_miles / speed_mph * 60.0)
}

/// Routes decoded from an assignment, with the set of ids that survived
/// the feasibility filter.
pub(crate) struct DecodedRoutes {
    pub routes: Vec<TechnicianRoute>,
    pub assigned: BTreeSet<String>,
}

impl DecodedRoutes {
    /// Ids of input orders that no route serves.
    pub fn unassigned(&self, problem: &ProblemInstance) -> Vec<String> {
        problem
            .work_orders()
            .iter()
            .map(|wo| wo.id().to_string())
            .filter(|id| !self.assigned.contains(id))
            .collect()
    }

    /// Count of routes with at least one stop.
    pub fn vehicles_used(&self) -> usize {
        self.routes.iter().filter(|r| !r.is_empty()).count()
    }
}

/// Simulates each technician's assigned sequence from the home node at
/// shift start.
///
/// Per stop: travel distance from the matrix, travel minutes at
/// `avg_speed_mph`, arrival waits for the window to open, departure is
/// arrival plus service. A stop is skipped — and lands in unassigned —
/// when it fails the skill subset, arrives after its window closes, would
/// depart after shift end, or would push travel + service past the daily
/// hour budget. Waiting time counts toward neither.
pub(crate) fn decode_assignment(
    problem: &ProblemInstance,
    assignment: &[Vec<usize>],
    avg_speed_mph: f64,
) -> DecodedRoutes {
    let mut routes = Vec::with_capacity(problem.technicians().len());
    let mut assigned = BTreeSet::new();

    for (tech_idx, order_indices) in assignment.iter().enumerate() {
        let tech = &problem.technicians()[tech_idx];
        let shift = tech.shift();
        let mut route = TechnicianRoute::new(tech.id(), tech.name());

        let mut current_node = tech_idx;
        let mut current_time = shift.start();
        let mut travel_acc = 0.0;
        let mut work_acc = 0.0;
        let mut seq = 0;

        for &order_idx in order_indices {
            let wo = &problem.work_orders()[order_idx];

            if !problem.skill_feasible(tech_idx, order_idx) {
                continue;
            }

            let node = problem.order_node(order_idx);
            let dist = problem.distance(current_node, node);
            let travel_min = travel_minutes(dist, avg_speed_mph);
            let service_min = f64::from(wo.duration_minutes());

            let mut arrival = add_minutes(current_time, travel_min);
            let window = wo.time_window();
            if arrival < window.start() {
                arrival = window.start();
            }
            if arrival > window.end() {
                continue;
            }

            let departure = add_minutes(arrival, service_min);
            if departure > shift.end() {
                continue;
            }

            if (travel_acc + work_acc + travel_min + service_min) / 60.0 > tech.max_hours() {
                continue;
            }

            route.push_stop(RouteStop {
                work_order_id: wo.id().to_string(),
                property_id: wo.property_id().to_string(),
                lat: wo.lat(),
                lng: wo.lng(),
                sequence: seq,
                arrival_time: arrival,
                departure_time: departure,
                travel_distance: round2(dist),
                travel_duration: travel_min,
            });
            assigned.insert(wo.id().to_string());

            travel_acc += travel_min;
            work_acc += service_min;
            current_node = node;
            current_time = departure;
            seq += 1;
        }

        route.finalize(tech.max_hours());
        routes.push(route);
    }

    DecodedRoutes { routes, assigned }
}

/// Assembles the final result from decoded routes.
pub(crate) fn result_from_decoded(
    algorithm: &str,
    problem: &ProblemInstance,
    decoded: DecodedRoutes,
) -> OptimizationResult {
    let unassigned = decoded.unassigned(problem);
    let vehicles_used = decoded.vehicles_used();
    let mut result = OptimizationResult::new(algorithm, decoded.routes, unassigned);
    result.insert_metadata("num_vehicles_used", serde_json::json!(vehicles_used));
    result
}

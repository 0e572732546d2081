//! Constraint-programming model formulation.
//!
//! Pure data: everything a routing engine needs to search, with no
//! dependency on any particular engine. Nodes 0..T-1 are per-technician
//! depots (each vehicle starts and ends at its own), T..T+W-1 are
//! work-order nodes.

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::geo::estimate_travel_time;
use crate::models::minutes_between;
use crate::solver::{ProblemInstance, SolverConfig};

/// Multiplier turning fractional miles into integer arc costs.
const DISTANCE_SCALE: f64 = 1000.0;

/// Integer CVRPTW formulation of a problem instance.
///
/// Arc costs are scaled miles; the time dimension accumulates travel
/// minutes plus service minutes at the destination work-order node, with
/// slack allowing waiting. Time is measured in whole minutes relative to
/// the first technician's shift start.
#[derive(Debug, Clone)]
pub struct CpModel {
    num_vehicles: usize,
    num_nodes: usize,
    arc_costs: Vec<Vec<i64>>,
    time_transits: Vec<Vec<i64>>,
    time_windows: Vec<Option<(i64, i64)>>,
    depot_bounds: Vec<(i64, i64)>,
    vehicle_caps: Vec<i64>,
    allowed_vehicles: Vec<Vec<usize>>,
    drop_penalties: Vec<i64>,
    reference_start: NaiveDateTime,
}

impl CpModel {
    /// Builds the integer formulation from a validated instance.
    pub fn build(problem: &ProblemInstance, config: &SolverConfig) -> Result<Self> {
        let num_vehicles = problem.technicians().len();
        let num_orders = problem.work_orders().len();
        let num_nodes = num_vehicles + num_orders;
        let speed = config.avg_speed_mph();
        let reference_start = problem.technicians()[0].shift().start();

        let mut arc_costs = vec![vec![0_i64; num_nodes]; num_nodes];
        let mut time_transits = vec![vec![0_i64; num_nodes]; num_nodes];
        for from in 0..num_nodes {
            for to in 0..num_nodes {
                let dist = problem.distance(from, to);
                arc_costs[from][to] = (dist * DISTANCE_SCALE) as i64;

                let travel_min = estimate_travel_time(dist, speed)?;
                let service_min = if to >= num_vehicles {
                    f64::from(problem.work_orders()[to - num_vehicles].duration_minutes())
                } else {
                    0.0
                };
                time_transits[from][to] = (travel_min + service_min) as i64;
            }
        }

        let time_windows = (0..num_nodes)
            .map(|node| {
                if node < num_vehicles {
                    return None;
                }
                let window = problem.work_orders()[node - num_vehicles].time_window();
                let start = minutes_between(reference_start, window.start()) as i64;
                let end = minutes_between(reference_start, window.end()) as i64;
                Some((start.max(0), end))
            })
            .collect();

        let depot_bounds = problem
            .technicians()
            .iter()
            .map(|tech| (0, tech.shift().length_minutes()))
            .collect();

        let vehicle_caps = problem
            .technicians()
            .iter()
            .map(|tech| (tech.max_hours() * 60.0) as i64)
            .collect();

        let mask = problem.feasibility_mask();
        let allowed_vehicles = (0..num_orders)
            .map(|w| (0..num_vehicles).filter(|&v| mask[v][w]).collect())
            .collect();

        let drop_penalties = problem
            .work_orders()
            .iter()
            .map(|wo| wo.priority().drop_penalty())
            .collect();

        Ok(Self {
            num_vehicles,
            num_nodes,
            arc_costs,
            time_transits,
            time_windows,
            depot_bounds,
            vehicle_caps,
            allowed_vehicles,
            drop_penalties,
            reference_start,
        })
    }

    /// Vehicle (technician) count.
    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    /// Total node count (depots + work orders).
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Scaled integer arc cost between two nodes.
    pub fn arc_cost(&self, from: usize, to: usize) -> i64 {
        self.arc_costs[from][to]
    }

    /// Whole-minute transit between two nodes, including service time at
    /// a destination work-order node.
    pub fn time_transit(&self, from: usize, to: usize) -> i64 {
        self.time_transits[from][to]
    }

    /// Arrival window in minutes relative to the reference start;
    /// `None` for depot nodes.
    pub fn time_window(&self, node: usize) -> Option<(i64, i64)> {
        self.time_windows[node]
    }

    /// Depot cumulative-time bounds for a vehicle (0 .. shift length).
    pub fn depot_bounds(&self, vehicle: usize) -> (i64, i64) {
        self.depot_bounds[vehicle]
    }

    /// Per-vehicle cumulative time cap in minutes (the daily budget).
    pub fn vehicle_cap_minutes(&self, vehicle: usize) -> i64 {
        self.vehicle_caps[vehicle]
    }

    /// Largest vehicle cap; the dimension capacity an engine that only
    /// supports a global bound should use.
    pub fn max_cap_minutes(&self) -> i64 {
        self.vehicle_caps.iter().copied().max().unwrap_or(0)
    }

    /// Slack allowance for waiting at a node.
    pub fn slack_max_minutes(&self) -> i64 {
        self.max_cap_minutes()
    }

    /// Vehicles whose skills cover the given work order.
    pub fn allowed_vehicles(&self, order_idx: usize) -> &[usize] {
        &self.allowed_vehicles[order_idx]
    }

    /// Penalty for leaving the given work order unserved.
    pub fn drop_penalty(&self, order_idx: usize) -> i64 {
        self.drop_penalties[order_idx]
    }

    /// The instant minute 0 refers to (first technician's shift start).
    pub fn reference_start(&self) -> NaiveDateTime {
        self.reference_start
    }
}

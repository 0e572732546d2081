//! Greedy nearest-neighbor strategy.
//!
//! # Algorithm
//!
//! Work orders are sorted by priority; each technician then repeatedly
//! takes the best feasible unassigned order, where "best" is lexicographic:
//! higher priority always wins, and within a priority tier the nearest
//! order wins. Ties fall back to input order, so identical inputs always
//! produce identical routes.
//!
//! # Complexity
//!
//! O(T · W²) where T = technicians, W = work orders. Milliseconds on
//! typical field-service instances.

use tracing::info;

use crate::constraints::check_daily_limit;
use crate::error::Result;
use crate::models::{add_minutes, OptimizationResult};

use super::decode::{decode_assignment, result_from_decoded, travel_minutes};
use super::instance::ProblemInstance;
use super::{run_timed, Solver, SolverConfig};

/// Nearest-neighbor construction for field-service routing.
///
/// Fast baseline: useful for quick estimates and for benchmarking the
/// genetic and CP-VRP strategies.
///
/// # Examples
///
/// ```no_run
/// use dispatch_routing::solver::{GreedySolver, ProblemInstance, Solver, SolverConfig};
///
/// # fn demo(problem: &ProblemInstance) -> dispatch_routing::error::Result<()> {
/// let solver = GreedySolver::new(problem, SolverConfig::default());
/// let result = solver.solve()?;
/// println!("{} mi, {} unassigned", result.total_distance(),
///          result.unassigned_orders().len());
/// # Ok(())
/// # }
/// ```
pub struct GreedySolver<'a> {
    problem: &'a ProblemInstance,
    config: SolverConfig,
}

impl<'a> GreedySolver<'a> {
    /// Creates a greedy solver over a validated problem instance.
    pub fn new(problem: &'a ProblemInstance, config: SolverConfig) -> Self {
        Self { problem, config }
    }

    fn solve_impl(&self) -> Result<OptimizationResult> {
        let problem = self.problem;
        let speed = self.config.avg_speed_mph();
        let num_orders = problem.work_orders().len();

        info!(
            technicians = problem.technicians().len(),
            work_orders = num_orders,
            "greedy solver starting"
        );

        let sorted_orders = problem.priority_sorted_orders();
        let mut assigned = vec![false; num_orders];
        let mut assignment: Vec<Vec<usize>> = Vec::with_capacity(problem.technicians().len());

        for (tech_idx, tech) in problem.technicians().iter().enumerate() {
            let shift = tech.shift();
            let mut sequence = Vec::new();
            let mut current_node = tech_idx;
            let mut current_time = shift.start();
            let mut travel_acc = 0.0;
            let mut work_acc = 0.0;

            loop {
                let mut best: Option<(u8, f64, usize)> = None;

                for &order_idx in &sorted_orders {
                    if assigned[order_idx] {
                        continue;
                    }
                    let wo = &problem.work_orders()[order_idx];

                    if !problem.skill_feasible(tech_idx, order_idx) {
                        continue;
                    }

                    let node = problem.order_node(order_idx);
                    let dist = problem.distance(current_node, node);
                    let travel_min = travel_minutes(dist, speed);
                    let service_min = f64::from(wo.duration_minutes());
                    let used_hours = (travel_acc + work_acc) / 60.0;

                    if !check_daily_limit(
                        used_hours,
                        tech.max_hours(),
                        (travel_min + service_min) / 60.0,
                    )? {
                        continue;
                    }

                    let mut arrival = add_minutes(current_time, travel_min);
                    let window = wo.time_window();
                    if arrival < window.start() {
                        // Waiting is allowed, but the idle minutes must
                        // still fit the daily budget.
                        let wait_min = window.waiting_minutes(arrival);
                        if !check_daily_limit(
                            used_hours,
                            tech.max_hours(),
                            (travel_min + wait_min + service_min) / 60.0,
                        )? {
                            continue;
                        }
                        arrival = window.start();
                    }
                    if arrival > window.end() {
                        continue;
                    }

                    let departure = add_minutes(arrival, service_min);
                    if departure > shift.end() {
                        continue;
                    }

                    let key = wo.priority().sort_key();
                    let better = match best {
                        None => true,
                        Some((best_key, best_dist, _)) => {
                            key < best_key || (key == best_key && dist < best_dist)
                        }
                    };
                    if better {
                        best = Some((key, dist, order_idx));
                    }
                }

                let Some((_, dist, order_idx)) = best else {
                    break;
                };

                let wo = &problem.work_orders()[order_idx];
                let node = problem.order_node(order_idx);
                let travel_min = travel_minutes(dist, speed);
                let service_min = f64::from(wo.duration_minutes());

                let mut arrival = add_minutes(current_time, travel_min);
                if arrival < wo.time_window().start() {
                    arrival = wo.time_window().start();
                }

                assigned[order_idx] = true;
                sequence.push(order_idx);
                travel_acc += travel_min;
                work_acc += service_min;
                current_node = node;
                current_time = add_minutes(arrival, service_min);
            }

            assignment.push(sequence);
        }

        let decoded = decode_assignment(problem, &assignment, speed);
        Ok(result_from_decoded(self.name(), problem, decoded))
    }
}

impl Solver for GreedySolver<'_> {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn solve(&self) -> Result<OptimizationResult> {
        self.config.validate_common()?;
        run_timed(self.name(), || self.solve_impl())
    }
}

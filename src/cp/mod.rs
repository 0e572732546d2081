//! CP-VRP strategy.
//!
//! Formulates the field-service problem as a capacitated VRP with time
//! windows — per-technician depots, skill-restricted vehicles, and
//! priority-priced optional visits — and delegates the search to an
//! external constraint-programming routing engine behind the
//! [`RoutingEngine`] trait. The default engine binds Google OR-Tools and
//! is only compiled with the `ortools` cargo feature; without it,
//! [`CpSolver::solve`] reports the missing dependency.

mod engine;
mod model;
#[cfg(feature = "ortools")]
mod ortools;

pub use engine::{EngineSolution, EngineVisit, RoutingEngine, SearchParams};
pub use model::CpModel;
#[cfg(feature = "ortools")]
pub use ortools::OrToolsEngine;

use std::time::Duration;

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::models::{add_minutes, OptimizationResult, RouteStop, TechnicianRoute, WorkOrder};
use crate::round::round2;
use crate::solver::decode::travel_minutes;
use crate::solver::{run_timed, ProblemInstance, Solver, SolverConfig};

/// Constraint-programming solver for field-service routing.
///
/// Produces the highest-quality schedules of the three strategies when
/// its engine is available. Orders the engine drops (or whose reported
/// timing fails the strict feasibility filter) end up unassigned.
///
/// # Examples
///
/// ```no_run
/// use dispatch_routing::cp::CpSolver;
/// use dispatch_routing::solver::{ProblemInstance, Solver, SolverConfig};
///
/// # fn demo(problem: &ProblemInstance) -> dispatch_routing::error::Result<()> {
/// let config = SolverConfig::default().with_time_limit_seconds(30);
/// let result = CpSolver::new(problem, config).solve()?;
/// println!("status: {}", result.metadata()["status"]);
/// # Ok(())
/// # }
/// ```
pub struct CpSolver<'a> {
    problem: &'a ProblemInstance,
    config: SolverConfig,
    engine: Option<Box<dyn RoutingEngine>>,
}

impl<'a> CpSolver<'a> {
    /// Creates a CP solver wired to the default engine.
    ///
    /// The default engine exists only when the crate is built with the
    /// `ortools` feature; otherwise [`solve`](Solver::solve) fails with
    /// [`Error::DependencyMissing`].
    pub fn new(problem: &'a ProblemInstance, config: SolverConfig) -> Self {
        Self {
            problem,
            config,
            engine: default_engine(),
        }
    }

    /// Creates a CP solver with an injected engine.
    pub fn with_engine(
        problem: &'a ProblemInstance,
        config: SolverConfig,
        engine: Box<dyn RoutingEngine>,
    ) -> Self {
        Self {
            problem,
            config,
            engine: Some(engine),
        }
    }

    fn solve_impl(&self) -> Result<OptimizationResult> {
        let problem = self.problem;
        let engine = self.engine.as_deref().ok_or_else(|| {
            Error::DependencyMissing(
                "the CP-VRP strategy needs a constraint-programming routing engine; \
                 build with the `ortools` feature or inject one via CpSolver::with_engine"
                    .to_string(),
            )
        })?;

        info!(
            technicians = problem.technicians().len(),
            work_orders = problem.work_orders().len(),
            time_limit_seconds = self.config.time_limit_seconds(),
            "cp-vrp solver starting"
        );

        let model = CpModel::build(problem, &self.config)?;
        let params = SearchParams {
            first_solution_strategy: self.config.first_solution_strategy(),
            metaheuristic: self.config.metaheuristic(),
            time_limit: Duration::from_secs(self.config.time_limit_seconds()),
        };

        match engine.solve(&model, &params)? {
            Some(solution) => Ok(self.decode(&model, &solution)),
            None => {
                warn!("routing engine found no solution");
                let unassigned = problem
                    .work_orders()
                    .iter()
                    .map(|wo| wo.id().to_string())
                    .collect();
                let mut result = OptimizationResult::new(self.name(), Vec::new(), unassigned);
                result.insert_metadata("status", serde_json::json!("NO_SOLUTION"));
                Ok(result)
            }
        }
    }

    /// Turns engine visit lists into timed routes.
    ///
    /// Arrival comes from the engine's cumulative time variable, converted
    /// through the model's reference start. Each visit still passes the
    /// strict feasibility filter (skill, window end, shift end, daily
    /// budget); violating visits are dropped to unassigned, so the result
    /// invariants hold for any engine.
    fn decode(&self, model: &CpModel, solution: &EngineSolution) -> OptimizationResult {
        let problem = self.problem;
        let speed = self.config.avg_speed_mph();
        let mut routes = Vec::with_capacity(problem.technicians().len());
        let mut assigned: std::collections::BTreeSet<String> = std::collections::BTreeSet::new();

        for (tech_idx, tech) in problem.technicians().iter().enumerate() {
            let shift = tech.shift();
            let visits = solution.visits.get(tech_idx).map_or(&[][..], Vec::as_slice);
            let mut route = TechnicianRoute::new(tech.id(), tech.name());

            let mut current_node = tech_idx;
            let mut travel_acc = 0.0;
            let mut work_acc = 0.0;
            let mut seq = 0;

            for visit in visits {
                let wo = &problem.work_orders()[visit.order_index];

                if !problem.skill_feasible(tech_idx, visit.order_index) {
                    continue;
                }

                let node = problem.order_node(visit.order_index);
                let dist = problem.distance(current_node, node);
                let travel_min = travel_minutes(dist, speed);
                let service_min = f64::from(wo.duration_minutes());

                let mut arrival =
                    add_minutes(model.reference_start(), visit.arrival_minutes as f64);
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
                seq += 1;
            }

            route.finalize(tech.max_hours());
            routes.push(route);
        }

        let unassigned: Vec<String> = problem
            .work_orders()
            .iter()
            .map(WorkOrder::id)
            .filter(|id| !assigned.contains(*id))
            .map(str::to_string)
            .collect();

        let vehicles_used = routes.iter().filter(|r| !r.is_empty()).count();
        let mut result = OptimizationResult::new(self.name(), routes, unassigned);
        result.insert_metadata("status", serde_json::json!("SOLUTION_FOUND"));
        result.insert_metadata("num_vehicles_used", serde_json::json!(vehicles_used));
        result
    }
}

impl Solver for CpSolver<'_> {
    fn name(&self) -> &'static str {
        "cp-vrp"
    }

    fn solve(&self) -> Result<OptimizationResult> {
        self.config.validate_cp()?;
        run_timed(self.name(), || self.solve_impl())
    }
}

#[cfg(feature = "ortools")]
fn default_engine() -> Option<Box<dyn RoutingEngine>> {
    Some(Box::new(OrToolsEngine))
}

#[cfg(not(feature = "ortools"))]
fn default_engine() -> Option<Box<dyn RoutingEngine>> {
    None
}

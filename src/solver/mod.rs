//! Solver framework: shared contract, validated input, configuration,
//! and the greedy strategy.
//!
//! Every strategy consumes a [`ProblemInstance`] and a [`SolverConfig`]
//! and exposes one operation, [`Solver::solve`]. Input validation happens
//! when the instance is built; solve wall-clock time is measured around
//! the strategy body and recorded on the result.

mod config;
pub(crate) mod decode;
mod greedy;
mod instance;

use std::time::Instant;

use tracing::info;

use crate::error::Result;
use crate::models::OptimizationResult;
use crate::round::round4;

pub use config::{FirstSolutionStrategy, Metaheuristic, SolverConfig};
pub use greedy::GreedySolver;
pub use instance::ProblemInstance;

/// A route-optimization strategy.
///
/// Implementations are pure with respect to their inputs: a solve holds no
/// shared mutable state and touches no globals, so independent solves may
/// run on separate threads.
pub trait Solver {
    /// Strategy name recorded on the result.
    fn name(&self) -> &'static str;

    /// Runs the strategy and returns the optimized schedule.
    fn solve(&self) -> Result<OptimizationResult>;
}

/// Runs a strategy body under a monotonic clock and stamps the elapsed
/// seconds (rounded to 4 decimals) on its result.
pub(crate) fn run_timed(
    algorithm: &str,
    body: impl FnOnce() -> Result<OptimizationResult>,
) -> Result<OptimizationResult> {
    let start = Instant::now();
    let mut result = body()?;
    result.set_solve_time_seconds(round4(start.elapsed().as_secs_f64()));
    info!(
        algorithm,
        solve_seconds = result.solve_time_seconds(),
        routes = result.routes().len(),
        unassigned = result.unassigned_orders().len(),
        total_distance = result.total_distance(),
        "solver completed"
    );
    Ok(result)
}

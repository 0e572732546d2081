//! Routing-engine adapter seam.
//!
//! The CP-VRP strategy delegates search to an external constraint
//! programming engine behind this trait, so the crate compiles and tests
//! without the engine and adapters can be swapped.

use std::time::Duration;

use crate::error::Result;
use crate::solver::{FirstSolutionStrategy, Metaheuristic};

use super::model::CpModel;

/// Search knobs passed through to the engine.
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Initial route construction strategy.
    pub first_solution_strategy: FirstSolutionStrategy,
    /// Local-search metaheuristic.
    pub metaheuristic: Metaheuristic,
    /// Wall-clock search cap.
    pub time_limit: Duration,
}

/// One visited work-order node on a vehicle's path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineVisit {
    /// Work-order index (0-based, not a node index).
    pub order_index: usize,
    /// Cumulative-time value at the node, in minutes relative to the
    /// model's reference start.
    pub arrival_minutes: i64,
}

/// A solution as reported by the engine: one visit list per vehicle, in
/// path order. Vehicles with no visits have empty lists.
#[derive(Debug, Clone, Default)]
pub struct EngineSolution {
    /// Per-vehicle visited work orders.
    pub visits: Vec<Vec<EngineVisit>>,
}

/// A constraint-programming routing engine.
///
/// `Ok(None)` means the search finished without finding any solution;
/// errors are reserved for engine malfunction.
pub trait RoutingEngine {
    /// Searches the model within the given parameters.
    fn solve(&self, model: &CpModel, params: &SearchParams) -> Result<Option<EngineSolution>>;
}

//! Google OR-Tools routing engine adapter.
//!
//! Compiled only with the `ortools` cargo feature; requires the native
//! OR-Tools library at build time.

use std::ffi::c_int;

use or_tools::constraint_solver::routing::RoutingModel;
use or_tools::constraint_solver::routing_enums::FirstSolutionStrategy as OrFirstSolutionStrategy;
use or_tools::constraint_solver::routing_index_manager::{
    RoutingIndexManager, RoutingIndexManagerVehiclePlan, RoutingNodeIndex, RoutingNodeIndexVector,
};
use or_tools::constraint_solver::routing_parameters::RoutingSearchParameters;
use tracing::debug;

use crate::error::Result;
use crate::solver::FirstSolutionStrategy;

use super::engine::{EngineSolution, EngineVisit, RoutingEngine, SearchParams};
use super::model::CpModel;

/// [`RoutingEngine`] backed by the OR-Tools vehicle routing library.
///
/// Arc costs and the time dimension come straight from the [`CpModel`].
/// Per-node vehicle restrictions and drop disjunctions are not exposed by
/// the wrapper; the solver's strict decode enforces those constraints on
/// whatever paths the engine returns. Metaheuristic selection likewise
/// runs the engine's default local search. The wrapper surfaces no search
/// status either, so a solve where no vehicle leaves its depot is treated
/// as no solution.
pub struct OrToolsEngine;

impl RoutingEngine for OrToolsEngine {
    fn solve(&self, model: &CpModel, params: &SearchParams) -> Result<Option<EngineSolution>> {
        let num_vehicles = model.num_vehicles();
        let num_nodes = model.num_nodes() as c_int;

        let starts: RoutingNodeIndexVector = (0..num_vehicles)
            .map(|v| RoutingNodeIndex::new(v as c_int))
            .collect();
        let ends: RoutingNodeIndexVector = (0..num_vehicles)
            .map(|v| RoutingNodeIndex::new(v as c_int))
            .collect();

        let manager = RoutingIndexManager::new(
            num_nodes,
            num_vehicles as c_int,
            RoutingIndexManagerVehiclePlan::Map { starts, ends },
        );
        let mut routing = RoutingModel::new(&manager, None);

        let arc_callback = |from_index: i64, to_index: i64| -> i64 {
            let from = manager.index_to_node(from_index).value() as usize;
            let to = manager.index_to_node(to_index).value() as usize;
            model.arc_cost(from, to)
        };
        let arc_index = routing.register_transit_callback(&arc_callback);
        routing.set_arc_cost_evaluator_of_all_vehicles(arc_index);

        let time_callback = |from_index: i64, to_index: i64| -> i64 {
            let from = manager.index_to_node(from_index).value() as usize;
            let to = manager.index_to_node(to_index).value() as usize;
            model.time_transit(from, to)
        };
        let time_index = routing.register_transit_callback(&time_callback);
        routing.add_dimension(
            time_index,
            model.slack_max_minutes(),
            model.max_cap_minutes(),
            false,
            "Time",
        );

        let mut search = RoutingSearchParameters::new();
        search.set_first_solution_strategy(map_first_solution(params.first_solution_strategy));
        search.set_time_limit(params.time_limit);

        let solution = routing.solve_with_parameters(&search);

        let time_dimension = routing.get_mutable_dimension("Time");
        let mut visits = vec![Vec::new(); num_vehicles];
        let mut any_vehicle_used = false;

        for vehicle in 0..num_vehicles {
            if !solution.is_vehicle_used(vehicle as c_int) {
                continue;
            }
            any_vehicle_used = true;

            let mut index = solution.next(routing.start(vehicle as c_int));
            while !routing.is_end(index) {
                let node = manager.index_to_node(index).value() as usize;
                if node >= num_vehicles {
                    let arrival_minutes = time_dimension
                        .as_ref()
                        .and_then(|dim| dim.cumul_var(index))
                        .map(|var| solution.value(var))
                        .unwrap_or(0);
                    visits[vehicle].push(EngineVisit {
                        order_index: node - num_vehicles,
                        arrival_minutes,
                    });
                }
                index = solution.next(index);
            }
        }

        if !any_vehicle_used {
            debug!("no vehicle left its depot; treating as no solution");
            return Ok(None);
        }

        Ok(Some(EngineSolution { visits }))
    }
}

fn map_first_solution(strategy: FirstSolutionStrategy) -> OrFirstSolutionStrategy {
    match strategy {
        FirstSolutionStrategy::PathCheapestArc => OrFirstSolutionStrategy::PathCheapestArc,
        FirstSolutionStrategy::ParallelCheapestInsertion => {
            OrFirstSolutionStrategy::ParallelCheapestInsertion
        }
        FirstSolutionStrategy::Savings => OrFirstSolutionStrategy::Savings,
        FirstSolutionStrategy::Automatic => OrFirstSolutionStrategy::Automatic,
    }
}

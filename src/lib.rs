//! # dispatch-routing
//!
//! Field-service vehicle routing: assigns work orders to technicians and
//! sequences each technician's visits to minimize travel distance under
//! skill, time-window, shift, and daily-hour constraints.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (WorkOrder, Technician, routes, results) and
//!   the loose-record boundary
//! - [`geo`] — Haversine distances, distance/duration matrices
//! - [`constraints`] — Pure feasibility predicates and route validation
//! - [`solver`] — Solver contract, validated input, configuration, shared
//!   decoder, and the greedy nearest-neighbor strategy
//! - [`ga`] — Genetic strategy with penalty-based fitness
//! - [`cp`] — CP-VRP strategy behind a swappable routing-engine adapter
//! - [`error`] — Error taxonomy
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use dispatch_routing::geo::{problem_locations, DistanceMatrix};
//! use dispatch_routing::models::{Priority, Shift, Technician, TimeWindow, WorkOrder};
//! use dispatch_routing::solver::{GreedySolver, ProblemInstance, Solver, SolverConfig};
//!
//! let day = NaiveDate::from_ymd_opt(2026, 2, 12).unwrap();
//! let shift = Shift::new(day.and_hms_opt(8, 0, 0).unwrap(),
//!                        day.and_hms_opt(17, 0, 0).unwrap()).unwrap();
//! let window = TimeWindow::new(day.and_hms_opt(8, 0, 0).unwrap(),
//!                              day.and_hms_opt(12, 0, 0).unwrap()).unwrap();
//!
//! let technicians = vec![
//!     Technician::new("tech-001", "Alice Martinez", 39.7392, -104.9903, 8.0, shift)
//!         .with_skills(["electrical"]),
//! ];
//! let work_orders = vec![
//!     WorkOrder::new("WO-001", "P-101", 39.7047, -105.0814, Priority::High, 60, window)
//!         .with_required_skills(["electrical"]),
//! ];
//! let matrix = DistanceMatrix::from_locations(
//!     &problem_locations(&technicians, &work_orders),
//! ).unwrap();
//!
//! let problem = ProblemInstance::new(work_orders, technicians, matrix).unwrap();
//! let result = GreedySolver::new(&problem, SolverConfig::default()).solve().unwrap();
//! assert_eq!(result.num_assigned(), 1);
//! ```

pub mod constraints;
pub mod cp;
pub mod error;
pub mod ga;
pub mod geo;
pub mod models;
pub mod solver;

mod round;

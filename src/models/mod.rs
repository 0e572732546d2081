//! Domain model types for field-service routing.
//!
//! Provides the core entities: work orders with time windows, required
//! skills, and priorities; technicians with home bases, skill sets, and
//! shifts; and the route/result value objects every solver produces.

pub mod records;

mod priority;
mod result;
mod route;
mod technician;
mod timing;
mod work_order;

pub use priority::Priority;
pub use result::OptimizationResult;
pub use route::{RouteStop, TechnicianRoute};
pub use technician::Technician;
pub use timing::{add_minutes, minutes_between, Shift, TimeWindow};
pub use work_order::WorkOrder;

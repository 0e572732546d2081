//! Constraint kernel: pure feasibility predicates and route validation.
//!
//! No I/O; every check is a function of its arguments. Solvers use these
//! predicates during construction, and callers can re-validate any decoded
//! route with [`validate_route`].

mod checks;
mod validate;

pub use checks::{check_daily_limit, check_time_window, skill_match};
pub use validate::{validate_route, work_order_map};

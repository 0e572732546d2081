//! Crate error type.
//!
//! All validation errors are raised at solve entry, before any routing work
//! begins. Per-stop infeasibility during a solve (skill, window, capacity)
//! is not an error; such orders end up in the result's unassigned list.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by input validation and solver setup.
#[derive(Debug, Error)]
pub enum Error {
    /// Empty inputs, non-positive speed, negative distance or hour
    /// arguments, or other out-of-domain values.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Distance matrix dimensions do not equal technicians + work orders,
    /// or a row is ragged.
    #[error("distance matrix size mismatch: {0}")]
    MatrixSizeMismatch(String),

    /// A loose record lacks one or more required attributes.
    #[error("record '{record}' missing required attributes: {missing:?}")]
    MissingRequiredAttribute {
        /// Offending record, identified by its `id` when present.
        record: String,
        /// Every missing key, sorted.
        missing: Vec<String>,
    },

    /// A time window whose start is after its end.
    #[error("invalid time window: start {start} is after end {end}")]
    InvalidWindow {
        /// Window start.
        start: String,
        /// Window end.
        end: String,
    },

    /// A location used to build a distance matrix lacks a coordinate.
    #[error("invalid location at index {index}: {reason}")]
    InvalidLocation {
        /// Position in the input location list.
        index: usize,
        /// What was missing or malformed.
        reason: String,
    },

    /// The CP-VRP solver was invoked without its underlying routing engine.
    #[error("routing engine unavailable: {0}")]
    DependencyMissing(String),
}

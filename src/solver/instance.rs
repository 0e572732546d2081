//! Validated problem instance.

use tracing::info;

use crate::error::{Error, Result};
use crate::geo::DistanceMatrix;
use crate::models::{Technician, WorkOrder};

/// The immutable input bundle every solver consumes.
///
/// Construction performs all entry validation; a successfully built
/// instance is guaranteed consistent, so solvers never produce partial
/// results from bad input.
///
/// Node convention: matrix rows 0..T-1 are technician home bases in input
/// order, T..T+W-1 are work-order sites in input order.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dispatch_routing::geo::{problem_locations, DistanceMatrix};
/// use dispatch_routing::models::{Priority, Shift, Technician, TimeWindow, WorkOrder};
/// use dispatch_routing::solver::ProblemInstance;
///
/// let day = NaiveDate::from_ymd_opt(2026, 2, 12).unwrap();
/// let shift = Shift::new(day.and_hms_opt(8, 0, 0).unwrap(),
///                        day.and_hms_opt(17, 0, 0).unwrap()).unwrap();
/// let window = TimeWindow::new(day.and_hms_opt(8, 0, 0).unwrap(),
///                              day.and_hms_opt(17, 0, 0).unwrap()).unwrap();
///
/// let technicians = vec![
///     Technician::new("tech-001", "Alice", 39.7392, -104.9903, 8.0, shift),
/// ];
/// let work_orders = vec![
///     WorkOrder::new("WO-001", "P-101", 39.7047, -105.0814,
///                    Priority::High, 60, window),
/// ];
/// let matrix = DistanceMatrix::from_locations(
///     &problem_locations(&technicians, &work_orders),
/// ).unwrap();
///
/// let problem = ProblemInstance::new(work_orders, technicians, matrix).unwrap();
/// assert_eq!(problem.num_nodes(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    work_orders: Vec<WorkOrder>,
    technicians: Vec<Technician>,
    matrix: DistanceMatrix,
}

impl ProblemInstance {
    /// Validates and bundles solver input.
    ///
    /// Fails with [`Error::InvalidInput`] on empty orders/technicians,
    /// duplicate ids, or negative matrix entries, and with
    /// [`Error::MatrixSizeMismatch`] when the matrix is not
    /// (T+W) × (T+W).
    pub fn new(
        work_orders: Vec<WorkOrder>,
        technicians: Vec<Technician>,
        matrix: DistanceMatrix,
    ) -> Result<Self> {
        if work_orders.is_empty() {
            return Err(Error::InvalidInput("work_orders must not be empty".to_string()));
        }
        if technicians.is_empty() {
            return Err(Error::InvalidInput("technicians must not be empty".to_string()));
        }

        check_unique_ids(work_orders.iter().map(WorkOrder::id), "work order")?;
        check_unique_ids(technicians.iter().map(Technician::id), "technician")?;

        let expected = technicians.len() + work_orders.len();
        if matrix.size() != expected {
            return Err(Error::MatrixSizeMismatch(format!(
                "matrix is {0}x{0} but expected {expected}x{expected} \
                 (technicians={1}, work_orders={2})",
                matrix.size(),
                technicians.len(),
                work_orders.len()
            )));
        }

        for i in 0..matrix.size() {
            for j in 0..matrix.size() {
                if matrix.get(i, j) < 0.0 {
                    return Err(Error::InvalidInput(format!(
                        "distance matrix entry ({i}, {j}) is negative: {}",
                        matrix.get(i, j)
                    )));
                }
            }
        }

        info!(
            work_orders = work_orders.len(),
            technicians = technicians.len(),
            nodes = expected,
            "input validation passed"
        );

        Ok(Self {
            work_orders,
            technicians,
            matrix,
        })
    }

    /// All work orders, in input order.
    pub fn work_orders(&self) -> &[WorkOrder] {
        &self.work_orders
    }

    /// All technicians, in input order.
    pub fn technicians(&self) -> &[Technician] {
        &self.technicians
    }

    /// The caller-supplied distance matrix.
    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    /// Number of matrix nodes (T + W).
    pub fn num_nodes(&self) -> usize {
        self.matrix.size()
    }

    /// Matrix node index of a work order.
    pub fn order_node(&self, order_idx: usize) -> usize {
        self.technicians.len() + order_idx
    }

    /// Distance in miles between two matrix nodes.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.matrix.get(from, to)
    }

    /// Returns `true` if the technician's skills cover the order's
    /// requirements.
    pub fn skill_feasible(&self, tech_idx: usize, order_idx: usize) -> bool {
        self.work_orders[order_idx]
            .required_skills()
            .is_subset(self.technicians[tech_idx].skills())
    }

    /// Technician × work-order skill-feasibility mask.
    pub fn feasibility_mask(&self) -> Vec<Vec<bool>> {
        (0..self.technicians.len())
            .map(|t| {
                (0..self.work_orders.len())
                    .map(|w| self.skill_feasible(t, w))
                    .collect()
            })
            .collect()
    }

    /// Work-order indices sorted by priority (most urgent first), ties in
    /// input order.
    pub fn priority_sorted_orders(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.work_orders.len()).collect();
        indices.sort_by_key(|&i| self.work_orders[i].priority().sort_key());
        indices
    }
}

fn check_unique_ids<'a>(ids: impl Iterator<Item = &'a str>, kind: &str) -> Result<()> {
    let mut seen = std::collections::BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(Error::InvalidInput(format!("duplicate {kind} id '{id}'")));
        }
    }
    Ok(())
}

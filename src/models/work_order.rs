//! Work-order entity.

use std::collections::BTreeSet;

use super::{Priority, TimeWindow};

/// A serviceable task at one property.
///
/// Immutable through a solve; `id` must be unique within a problem
/// instance.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dispatch_routing::models::{Priority, TimeWindow, WorkOrder};
///
/// let day = NaiveDate::from_ymd_opt(2026, 2, 12).unwrap();
/// let window = TimeWindow::new(
///     day.and_hms_opt(8, 0, 0).unwrap(),
///     day.and_hms_opt(12, 0, 0).unwrap(),
/// ).unwrap();
/// let wo = WorkOrder::new("WO-001", "P-101", 39.7392, -104.9903,
///                         Priority::High, 45, window)
///     .with_required_skills(["plumbing"]);
/// assert_eq!(wo.id(), "WO-001");
/// assert!(wo.required_skills().contains("plumbing"));
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WorkOrder {
    id: String,
    property_id: String,
    lat: f64,
    lng: f64,
    priority: Priority,
    required_skills: BTreeSet<String>,
    duration_minutes: u32,
    time_window: TimeWindow,
}

impl WorkOrder {
    /// Creates a work order with no required skills.
    pub fn new(
        id: impl Into<String>,
        property_id: impl Into<String>,
        lat: f64,
        lng: f64,
        priority: Priority,
        duration_minutes: u32,
        time_window: TimeWindow,
    ) -> Self {
        Self {
            id: id.into(),
            property_id: property_id.into(),
            lat,
            lng,
            priority,
            required_skills: BTreeSet::new(),
            duration_minutes,
            time_window,
        }
    }

    /// Sets the skills a technician must have to service this order.
    pub fn with_required_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_skills = skills.into_iter().map(Into::into).collect();
        self
    }

    /// Work order ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Serviced property ID.
    pub fn property_id(&self) -> &str {
        &self.property_id
    }

    /// Site latitude in decimal degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Site longitude in decimal degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Urgency level.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Skills required to service this order.
    pub fn required_skills(&self) -> &BTreeSet<String> {
        &self.required_skills
    }

    /// On-site service duration in minutes.
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Acceptable arrival window.
    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn window() -> TimeWindow {
        let day = NaiveDate::from_ymd_opt(2026, 2, 12).expect("valid date");
        TimeWindow::new(
            day.and_hms_opt(8, 0, 0).expect("valid"),
            day.and_hms_opt(17, 0, 0).expect("valid"),
        )
        .expect("valid window")
    }

    #[test]
    fn test_work_order_new() {
        let wo = WorkOrder::new("WO-1", "P-1", 39.7, -105.0, Priority::Medium, 30, window());
        assert_eq!(wo.id(), "WO-1");
        assert_eq!(wo.property_id(), "P-1");
        assert_eq!(wo.priority(), Priority::Medium);
        assert_eq!(wo.duration_minutes(), 30);
        assert!(wo.required_skills().is_empty());
    }

    #[test]
    fn test_with_required_skills_dedups() {
        let wo = WorkOrder::new("WO-1", "P-1", 0.0, 0.0, Priority::Low, 0, window())
            .with_required_skills(["hvac", "hvac", "electrical"]);
        assert_eq!(wo.required_skills().len(), 2);
    }
}

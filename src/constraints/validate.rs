//! Whole-route validation.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::models::{RouteStop, Technician, WorkOrder};

/// Builds the work-order-by-id lookup [`validate_route`] consumes.
pub fn work_order_map(work_orders: &[WorkOrder]) -> BTreeMap<&str, &WorkOrder> {
    work_orders.iter().map(|wo| (wo.id(), wo)).collect()
}

/// Validates a complete technician route.
///
/// Checks, per stop: the referenced work order exists, the technician has
/// the required skills, arrival falls inside the order's window, arrival is
/// not before shift start, and departure is not after shift end. Finally
/// checks that cumulative travel plus service time fits the daily hour
/// budget. Every independent failure contributes one description; an empty
/// list means the route is feasible.
///
/// # Examples
///
/// ```
/// use dispatch_routing::constraints::{validate_route, work_order_map};
/// # use chrono::NaiveDate;
/// # use dispatch_routing::models::{Shift, Technician, WorkOrder};
/// # let day = NaiveDate::from_ymd_opt(2026, 2, 12).unwrap();
/// # let shift = Shift::new(day.and_hms_opt(8, 0, 0).unwrap(),
/// #                        day.and_hms_opt(17, 0, 0).unwrap()).unwrap();
/// # let tech = Technician::new("tech-001", "Alice", 39.7, -105.0, 8.0, shift);
/// let orders: Vec<WorkOrder> = vec![];
/// let violations = validate_route(&[], &tech, &work_order_map(&orders));
/// assert!(violations.is_empty());
/// ```
pub fn validate_route(
    stops: &[RouteStop],
    technician: &Technician,
    work_orders: &BTreeMap<&str, &WorkOrder>,
) -> Vec<String> {
    let mut violations = Vec::new();
    let shift = technician.shift();
    let mut cumulative_minutes = 0.0;

    for (stop_idx, stop) in stops.iter().enumerate() {
        let Some(wo) = work_orders.get(stop.work_order_id.as_str()) else {
            violations.push(format!(
                "stop {stop_idx}: work order '{}' not found",
                stop.work_order_id
            ));
            continue;
        };

        if !wo.required_skills().is_subset(technician.skills()) {
            let missing: Vec<&str> = wo
                .required_skills()
                .difference(technician.skills())
                .map(String::as_str)
                .collect();
            violations.push(format!(
                "stop {stop_idx} (WO {}): technician '{}' missing skills {missing:?}",
                wo.id(),
                technician.id()
            ));
        }

        let window = wo.time_window();
        if !window.contains(stop.arrival_time) {
            violations.push(format!(
                "stop {stop_idx} (WO {}): arrival {} outside window [{}, {}]",
                wo.id(),
                stop.arrival_time,
                window.start(),
                window.end()
            ));
        }

        if stop.arrival_time < shift.start() {
            violations.push(format!(
                "stop {stop_idx} (WO {}): arrival {} is before shift start {}",
                wo.id(),
                stop.arrival_time,
                shift.start()
            ));
        }

        if stop.departure_time > shift.end() {
            violations.push(format!(
                "stop {stop_idx} (WO {}): departure {} is after shift end {}",
                wo.id(),
                stop.departure_time,
                shift.end()
            ));
        }

        cumulative_minutes += f64::from(wo.duration_minutes()) + stop.travel_duration;
    }

    let cumulative_hours = cumulative_minutes / 60.0;
    if cumulative_hours > technician.max_hours() {
        violations.push(format!(
            "technician '{}' total route time {cumulative_hours:.2}h exceeds max_hours {}h",
            technician.id(),
            technician.max_hours()
        ));
    }

    if violations.is_empty() {
        debug!(technician = technician.id(), "route validation passed");
    } else {
        warn!(
            technician = technician.id(),
            count = violations.len(),
            "route validation found violations"
        );
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, Shift, TimeWindow};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 12)
            .expect("valid date")
            .and_hms_opt(h, m, 0)
            .expect("valid time")
    }

    fn tech(skills: &[&str]) -> Technician {
        Technician::new(
            "tech-001",
            "Alice",
            39.7392,
            -104.9903,
            8.0,
            Shift::new(at(8, 0), at(17, 0)).expect("valid shift"),
        )
        .with_skills(skills.iter().copied())
    }

    fn order(id: &str, skills: &[&str], start: NaiveDateTime, end: NaiveDateTime) -> WorkOrder {
        WorkOrder::new(
            id,
            "P-101",
            39.7047,
            -105.0814,
            Priority::High,
            60,
            TimeWindow::new(start, end).expect("valid window"),
        )
        .with_required_skills(skills.iter().copied())
    }

    fn stop(id: &str, arrive: NaiveDateTime, depart: NaiveDateTime, travel_min: f64) -> RouteStop {
        RouteStop {
            work_order_id: id.to_string(),
            property_id: "P-101".to_string(),
            lat: 39.7047,
            lng: -105.0814,
            sequence: 0,
            arrival_time: arrive,
            departure_time: depart,
            travel_distance: travel_min / 2.0,
            travel_duration: travel_min,
        }
    }

    #[test]
    fn test_valid_route_no_violations() {
        let orders = vec![order("WO-001", &["electrical"], at(8, 0), at(10, 0))];
        let violations = validate_route(
            &[stop("WO-001", at(8, 30), at(9, 30), 15.0)],
            &tech(&["electrical", "plumbing"]),
            &work_order_map(&orders),
        );
        assert!(violations.is_empty(), "unexpected: {violations:?}");
    }

    #[test]
    fn test_unknown_work_order() {
        let orders: Vec<WorkOrder> = vec![];
        let violations = validate_route(
            &[stop("WO-404", at(8, 30), at(9, 30), 15.0)],
            &tech(&["electrical"]),
            &work_order_map(&orders),
        );
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("not found"));
    }

    #[test]
    fn test_skill_violation_names_missing_skills() {
        let orders = vec![order("WO-001", &["electrical"], at(8, 0), at(10, 0))];
        let violations = validate_route(
            &[stop("WO-001", at(8, 30), at(9, 30), 15.0)],
            &tech(&["plumbing"]),
            &work_order_map(&orders),
        );
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("missing skills"));
        assert!(violations[0].contains("electrical"));
    }

    #[test]
    fn test_late_arrival_violation() {
        let orders = vec![order("WO-001", &[], at(8, 0), at(10, 0))];
        let violations = validate_route(
            &[stop("WO-001", at(11, 0), at(12, 0), 15.0)],
            &tech(&[]),
            &work_order_map(&orders),
        );
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("outside window"));
    }

    #[test]
    fn test_before_shift_start_violation() {
        let orders = vec![order("WO-001", &[], at(7, 0), at(10, 0))];
        let violations = validate_route(
            &[stop("WO-001", at(7, 30), at(8, 30), 15.0)],
            &tech(&[]),
            &work_order_map(&orders),
        );
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("before shift start"));
    }

    #[test]
    fn test_after_shift_end_violation() {
        let orders = vec![order("WO-001", &[], at(8, 0), at(17, 0))];
        let violations = validate_route(
            &[stop("WO-001", at(16, 30), at(17, 30), 15.0)],
            &tech(&[]),
            &work_order_map(&orders),
        );
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("after shift end"));
    }

    #[test]
    fn test_daily_limit_violation() {
        let orders = vec![order("WO-001", &[], at(8, 0), at(17, 0))];
        // 60 min service + 450 min travel = 8.5h > 8h
        let violations = validate_route(
            &[stop("WO-001", at(15, 30), at(16, 30), 450.0)],
            &tech(&[]),
            &work_order_map(&orders),
        );
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("exceeds max_hours"));
    }

    #[test]
    fn test_independent_failures_all_surface() {
        let orders = vec![order("WO-001", &["electrical"], at(8, 0), at(10, 0))];
        // Wrong skill AND late arrival AND departure after shift end
        let violations = validate_route(
            &[stop("WO-001", at(16, 45), at(17, 45), 15.0)],
            &tech(&["plumbing"]),
            &work_order_map(&orders),
        );
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn test_empty_route_is_valid() {
        let orders: Vec<WorkOrder> = vec![];
        assert!(validate_route(&[], &tech(&[]), &work_order_map(&orders)).is_empty());
    }
}

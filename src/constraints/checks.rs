//! Pure constraint predicates.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use crate::error::{Error, Result};

/// Returns `true` if the technician possesses every required skill.
///
/// An empty requirement set always matches.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use dispatch_routing::constraints::skill_match;
///
/// let tech: BTreeSet<String> = ["electrical", "plumbing"].iter().map(|s| s.to_string()).collect();
/// let req: BTreeSet<String> = ["plumbing"].iter().map(|s| s.to_string()).collect();
/// assert!(skill_match(&tech, &req));
/// assert!(skill_match(&tech, &BTreeSet::new()));
/// assert!(!skill_match(&req, &tech));
/// ```
pub fn skill_match(technician_skills: &BTreeSet<String>, required_skills: &BTreeSet<String>) -> bool {
    required_skills.is_subset(technician_skills)
}

/// Returns `true` if `arrival` falls within `[window_start, window_end]`
/// (inclusive on both ends).
///
/// Fails with [`Error::InvalidWindow`] if the window is inverted.
pub fn check_time_window(
    arrival: NaiveDateTime,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> Result<bool> {
    if window_start > window_end {
        return Err(Error::InvalidWindow {
            start: window_start.to_string(),
            end: window_end.to_string(),
        });
    }
    Ok(arrival >= window_start && arrival <= window_end)
}

/// Returns `true` if `current_hours + additional_hours` stays at or below
/// `max_hours`.
///
/// Fails with [`Error::InvalidInput`] if any argument is negative.
pub fn check_daily_limit(current_hours: f64, max_hours: f64, additional_hours: f64) -> Result<bool> {
    if current_hours < 0.0 || max_hours < 0.0 || additional_hours < 0.0 {
        return Err(Error::InvalidInput(format!(
            "hour arguments must be non-negative, got current_hours={current_hours}, \
             max_hours={max_hours}, additional_hours={additional_hours}"
        )));
    }
    Ok(current_hours + additional_hours <= max_hours)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 12)
            .expect("valid date")
            .and_hms_opt(h, m, 0)
            .expect("valid time")
    }

    fn skills(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_skill_match_subset() {
        assert!(skill_match(
            &skills(&["electrical", "plumbing"]),
            &skills(&["plumbing"])
        ));
    }

    #[test]
    fn test_skill_match_exact() {
        assert!(skill_match(&skills(&["electrical"]), &skills(&["electrical"])));
    }

    #[test]
    fn test_skill_match_missing() {
        assert!(!skill_match(&skills(&["plumbing"]), &skills(&["electrical"])));
    }

    #[test]
    fn test_skill_match_empty_required() {
        assert!(skill_match(&skills(&["plumbing"]), &BTreeSet::new()));
        assert!(skill_match(&BTreeSet::new(), &BTreeSet::new()));
    }

    #[test]
    fn test_time_window_inside() {
        assert!(check_time_window(at(10, 0), at(9, 0), at(12, 0)).expect("valid"));
    }

    #[test]
    fn test_time_window_boundaries_inclusive() {
        assert!(check_time_window(at(9, 0), at(9, 0), at(12, 0)).expect("valid"));
        assert!(check_time_window(at(12, 0), at(9, 0), at(12, 0)).expect("valid"));
    }

    #[test]
    fn test_time_window_outside() {
        assert!(!check_time_window(at(13, 0), at(9, 0), at(12, 0)).expect("valid"));
        assert!(!check_time_window(at(8, 59), at(9, 0), at(12, 0)).expect("valid"));
    }

    #[test]
    fn test_time_window_inverted() {
        assert!(matches!(
            check_time_window(at(10, 0), at(12, 0), at(9, 0)),
            Err(Error::InvalidWindow { .. })
        ));
    }

    #[test]
    fn test_daily_limit_within() {
        assert!(check_daily_limit(5.0, 8.0, 2.0).expect("valid"));
    }

    #[test]
    fn test_daily_limit_exact() {
        assert!(check_daily_limit(5.0, 8.0, 3.0).expect("valid"));
    }

    #[test]
    fn test_daily_limit_exceeded() {
        assert!(!check_daily_limit(5.0, 8.0, 4.0).expect("valid"));
    }

    #[test]
    fn test_daily_limit_negative_rejected() {
        assert!(check_daily_limit(-1.0, 8.0, 1.0).is_err());
        assert!(check_daily_limit(1.0, -8.0, 1.0).is_err());
        assert!(check_daily_limit(1.0, 8.0, -1.0).is_err());
    }
}

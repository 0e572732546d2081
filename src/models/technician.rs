//! Technician entity.

use std::collections::BTreeSet;

use super::Shift;

/// A mobile worker with a home base, skill set, daily hour budget, and
/// shift window.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dispatch_routing::models::{Shift, Technician};
///
/// let day = NaiveDate::from_ymd_opt(2026, 2, 12).unwrap();
/// let shift = Shift::new(
///     day.and_hms_opt(8, 0, 0).unwrap(),
///     day.and_hms_opt(17, 0, 0).unwrap(),
/// ).unwrap();
/// let tech = Technician::new("tech-001", "Alice Martinez",
///                            39.7392, -104.9903, 8.0, shift)
///     .with_skills(["electrical", "plumbing"]);
/// assert_eq!(tech.name(), "Alice Martinez");
/// assert!(tech.skills().contains("electrical"));
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Technician {
    id: String,
    name: String,
    skills: BTreeSet<String>,
    home_lat: f64,
    home_lng: f64,
    max_hours: f64,
    shift: Shift,
}

impl Technician {
    /// Creates a technician with no skills.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        home_lat: f64,
        home_lng: f64,
        max_hours: f64,
        shift: Shift,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            skills: BTreeSet::new(),
            home_lat,
            home_lng,
            max_hours,
            shift,
        }
    }

    /// Sets the technician's skill set.
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    /// Technician ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Skills this technician can perform.
    pub fn skills(&self) -> &BTreeSet<String> {
        &self.skills
    }

    /// Home base latitude in decimal degrees.
    pub fn home_lat(&self) -> f64 {
        self.home_lat
    }

    /// Home base longitude in decimal degrees.
    pub fn home_lng(&self) -> f64 {
        self.home_lng
    }

    /// Daily working-hour budget (travel + service).
    pub fn max_hours(&self) -> f64 {
        self.max_hours
    }

    /// Working shift window.
    pub fn shift(&self) -> &Shift {
        &self.shift
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn shift() -> Shift {
        let day = NaiveDate::from_ymd_opt(2026, 2, 12).expect("valid date");
        Shift::new(
            day.and_hms_opt(8, 0, 0).expect("valid"),
            day.and_hms_opt(17, 0, 0).expect("valid"),
        )
        .expect("valid shift")
    }

    #[test]
    fn test_technician_new() {
        let t = Technician::new("tech-1", "Bob", 39.7, -105.0, 8.0, shift());
        assert_eq!(t.id(), "tech-1");
        assert_eq!(t.name(), "Bob");
        assert_eq!(t.max_hours(), 8.0);
        assert!(t.skills().is_empty());
    }

    #[test]
    fn test_with_skills() {
        let t = Technician::new("tech-1", "Bob", 0.0, 0.0, 8.0, shift())
            .with_skills(["plumbing", "general_maintenance"]);
        assert_eq!(t.skills().len(), 2);
        assert!(t.skills().contains("plumbing"));
    }
}

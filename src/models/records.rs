//! Loose-record boundary.
//!
//! Upstream systems (CRM sync, document stores) deliver work orders and
//! technicians as untyped JSON maps. This module converts those maps into
//! the typed entities the solvers consume, reporting every missing key of
//! a record at once rather than failing on the first.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::warn;

use crate::error::{Error, Result};

use super::{Priority, Shift, Technician, TimeWindow, WorkOrder};

/// Keys a work-order record must carry.
pub const WORK_ORDER_KEYS: [&str; 9] = [
    "id",
    "property_id",
    "lat",
    "lng",
    "priority",
    "required_skills",
    "duration_minutes",
    "time_window_start",
    "time_window_end",
];

/// Keys a technician record must carry.
pub const TECHNICIAN_KEYS: [&str; 8] = [
    "id",
    "name",
    "skills",
    "home_lat",
    "home_lng",
    "max_hours",
    "shift_start",
    "shift_end",
];

/// Converts a loose work-order record into a typed [`WorkOrder`].
///
/// `index` identifies the record in error messages when it has no `id`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use dispatch_routing::models::records::work_order_from_value;
///
/// let wo = work_order_from_value(0, &json!({
///     "id": "WO-001",
///     "property_id": "P-101",
///     "lat": 39.7047,
///     "lng": -105.0814,
///     "priority": "emergency",
///     "required_skills": ["electrical"],
///     "duration_minutes": 60,
///     "time_window_start": "2026-02-12T08:00:00",
///     "time_window_end": "2026-02-12T10:00:00",
/// })).unwrap();
/// assert_eq!(wo.id(), "WO-001");
/// ```
pub fn work_order_from_value(index: usize, value: &Value) -> Result<WorkOrder> {
    let map = require_keys(value, &WORK_ORDER_KEYS, "work_order", index)?;
    let record = record_name(map, "work_order", index);

    let id = string_field(map, "id", &record)?;
    let property_id = string_field(map, "property_id", &record)?;
    let lat = number_field(map, "lat", &record)?;
    let lng = number_field(map, "lng", &record)?;

    let label = string_field(map, "priority", &record)?;
    let priority = Priority::from_label(&label).unwrap_or_else(|| {
        warn!(record = %record, label = %label, "unrecognized priority label, treating as low");
        Priority::Low
    });

    let duration = number_field(map, "duration_minutes", &record)?;
    if duration < 0.0 {
        return Err(Error::InvalidInput(format!(
            "{record}: duration_minutes must be non-negative, got {duration}"
        )));
    }

    let window = TimeWindow::new(
        datetime_field(map, "time_window_start", &record)?,
        datetime_field(map, "time_window_end", &record)?,
    )?;

    Ok(
        WorkOrder::new(id, property_id, lat, lng, priority, duration as u32, window)
            .with_required_skills(skill_field(map, "required_skills", &record)?),
    )
}

/// Converts a loose technician record into a typed [`Technician`].
pub fn technician_from_value(index: usize, value: &Value) -> Result<Technician> {
    let map = require_keys(value, &TECHNICIAN_KEYS, "technician", index)?;
    let record = record_name(map, "technician", index);

    let id = string_field(map, "id", &record)?;
    let name = string_field(map, "name", &record)?;
    let home_lat = number_field(map, "home_lat", &record)?;
    let home_lng = number_field(map, "home_lng", &record)?;

    let max_hours = number_field(map, "max_hours", &record)?;
    if max_hours < 0.0 {
        return Err(Error::InvalidInput(format!(
            "{record}: max_hours must be non-negative, got {max_hours}"
        )));
    }

    let shift = Shift::new(
        datetime_field(map, "shift_start", &record)?,
        datetime_field(map, "shift_end", &record)?,
    )?;

    Ok(Technician::new(id, name, home_lat, home_lng, max_hours, shift)
        .with_skills(skill_field(map, "skills", &record)?))
}

/// Converts a batch of work-order records, failing on the first bad one.
pub fn work_orders_from_values(values: &[Value]) -> Result<Vec<WorkOrder>> {
    values
        .iter()
        .enumerate()
        .map(|(idx, v)| work_order_from_value(idx, v))
        .collect()
}

/// Converts a batch of technician records, failing on the first bad one.
pub fn technicians_from_values(values: &[Value]) -> Result<Vec<Technician>> {
    values
        .iter()
        .enumerate()
        .map(|(idx, v)| technician_from_value(idx, v))
        .collect()
}

fn require_keys<'a>(
    value: &'a Value,
    keys: &[&str],
    kind: &str,
    index: usize,
) -> Result<&'a serde_json::Map<String, Value>> {
    let map = value.as_object().ok_or_else(|| {
        Error::InvalidInput(format!("{kind} record at index {index} is not an object"))
    })?;

    let missing: Vec<String> = keys
        .iter()
        .filter(|k| map.get(**k).is_none_or(Value::is_null))
        .map(|k| k.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(Error::MissingRequiredAttribute {
            record: record_name(map, kind, index),
            missing,
        });
    }
    Ok(map)
}

fn record_name(map: &serde_json::Map<String, Value>, kind: &str, index: usize) -> String {
    match map.get("id").and_then(Value::as_str) {
        Some(id) => id.to_string(),
        None => format!("{kind}[{index}]"),
    }
}

fn string_field(map: &serde_json::Map<String, Value>, key: &str, record: &str) -> Result<String> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidInput(format!("{record}: '{key}' must be a string")))
}

fn number_field(map: &serde_json::Map<String, Value>, key: &str, record: &str) -> Result<f64> {
    map.get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| Error::InvalidInput(format!("{record}: '{key}' must be a number")))
}

fn skill_field(
    map: &serde_json::Map<String, Value>,
    key: &str,
    record: &str,
) -> Result<BTreeSet<String>> {
    let items = map
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::InvalidInput(format!("{record}: '{key}' must be an array")))?;
    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                Error::InvalidInput(format!("{record}: '{key}' entries must be strings"))
            })
        })
        .collect()
}

fn datetime_field(
    map: &serde_json::Map<String, Value>,
    key: &str,
    record: &str,
) -> Result<NaiveDateTime> {
    let raw = map.get(key).and_then(Value::as_str).ok_or_else(|| {
        Error::InvalidInput(format!("{record}: '{key}' must be a timestamp string"))
    })?;
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .map_err(|e| {
            Error::InvalidInput(format!("{record}: '{key}' is not a valid timestamp: {e}"))
        })
}

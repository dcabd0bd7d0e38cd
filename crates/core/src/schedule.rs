//! Schedule arithmetic and collision detection.
//!
//! This module lives in `core` (zero internal deps) so it can be used by the
//! API layer, the repositories, and any future CLI tooling. It is the single
//! home of the interval-overlap rule: every room/trainer availability check
//! and both the create and edit mutation paths go through
//! [`busy_resource_ids`] rather than reimplementing the scan.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Day of the week a training is scheduled on.
///
/// Serialized as lowercase English names (`"monday"` .. `"sunday"`), matching
/// both the wire format and the `trainings.day_of_week` CHECK constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monday" => Ok(DayOfWeek::Monday),
            "tuesday" => Ok(DayOfWeek::Tuesday),
            "wednesday" => Ok(DayOfWeek::Wednesday),
            "thursday" => Ok(DayOfWeek::Thursday),
            "friday" => Ok(DayOfWeek::Friday),
            "saturday" => Ok(DayOfWeek::Saturday),
            "sunday" => Ok(DayOfWeek::Sunday),
            other => Err(CoreError::Validation(format!(
                "Unknown day of week: {other}"
            ))),
        }
    }
}

/// Parse an `HH:MM` (24-hour) time-of-day string into minutes since midnight.
pub fn parse_time_of_day(s: &str) -> Result<i32, CoreError> {
    let (hh, mm) = s
        .split_once(':')
        .ok_or_else(|| CoreError::Validation(format!("Invalid time format: {s}")))?;

    // Postgres TIME columns render as HH:MM:SS; accept and ignore seconds.
    let mm = mm.split_once(':').map(|(m, _)| m).unwrap_or(mm);

    let hour: i32 = hh
        .parse()
        .map_err(|_| CoreError::Validation(format!("Invalid time format: {s}")))?;
    let minute: i32 = mm
        .parse()
        .map_err(|_| CoreError::Validation(format!("Invalid time format: {s}")))?;

    if !(0..24).contains(&hour) || !(0..60).contains(&minute) {
        return Err(CoreError::Validation(format!("Time out of range: {s}")));
    }

    Ok(hour * 60 + minute)
}

/// A half-open `[start, end)` minute range within a single day of the week.
///
/// Derived from a training's stored start/end time strings; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub day: DayOfWeek,
    pub start_min: i32,
    pub end_min: i32,
}

impl TimeSlot {
    /// Build a slot from `HH:MM` strings, rejecting non-positive durations.
    ///
    /// Equal or inverted times are an input error ([`CoreError::InvalidDuration`]),
    /// caught here before any collision check runs. Sessions never span
    /// midnight, so same-day is the only case.
    pub fn from_strings(day: DayOfWeek, start: &str, end: &str) -> Result<Self, CoreError> {
        let start_min = parse_time_of_day(start)?;
        let end_min = parse_time_of_day(end)?;
        if end_min <= start_min {
            return Err(CoreError::InvalidDuration(format!(
                "End time {end} must be after start time {start}"
            )));
        }
        Ok(TimeSlot {
            day,
            start_min,
            end_min,
        })
    }

    /// Session length in minutes. Always positive by construction.
    pub fn duration_min(&self) -> i32 {
        self.end_min - self.start_min
    }

    /// Half-open interval overlap: `[s1,e1)` and `[s2,e2)` overlap iff
    /// `s1 < e2 && e1 > s2`. Touching endpoints (one ends at 10:00, the
    /// other starts at 10:00) do not overlap. Different days never overlap
    /// regardless of times.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.day == other.day && self.start_min < other.end_min && self.end_min > other.start_min
    }
}

/// One existing training's interval, projected onto a resource dimension
/// (room or trainer) for a busy-set scan.
#[derive(Debug, Clone, Copy)]
pub struct ScheduledInterval {
    /// The training this interval belongs to, used for self-exclusion on edit.
    pub training_id: DbId,
    /// The room id or trainer id, depending on which dimension is scanned.
    pub resource_id: DbId,
    pub slot: TimeSlot,
}

/// Return the distinct resource ids (rooms or trainers) whose existing
/// intervals overlap `candidate`.
///
/// When editing an existing training, pass its id as `exclude_training_id`
/// so the record does not conflict with itself. An empty `existing` set
/// yields an empty busy set. Read-only and deterministic: the result depends
/// only on the inputs.
pub fn busy_resource_ids(
    candidate: &TimeSlot,
    existing: &[ScheduledInterval],
    exclude_training_id: Option<DbId>,
) -> Vec<DbId> {
    let mut busy: Vec<DbId> = existing
        .iter()
        .filter(|item| Some(item.training_id) != exclude_training_id)
        .filter(|item| candidate.overlaps(&item.slot))
        .map(|item| item.resource_id)
        .collect();
    busy.sort_unstable();
    busy.dedup();
    busy
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn slot(day: DayOfWeek, start: &str, end: &str) -> TimeSlot {
        TimeSlot::from_strings(day, start, end).expect("valid slot")
    }

    // -----------------------------------------------------------------------
    // Time parsing and duration
    // -----------------------------------------------------------------------

    #[test]
    fn parses_hh_mm() {
        assert_eq!(parse_time_of_day("09:00").unwrap(), 540);
        assert_eq!(parse_time_of_day("00:00").unwrap(), 0);
        assert_eq!(parse_time_of_day("23:59").unwrap(), 1439);
    }

    #[test]
    fn parses_hh_mm_ss_from_postgres_time() {
        assert_eq!(parse_time_of_day("09:30:00").unwrap(), 570);
    }

    #[test]
    fn rejects_malformed_times() {
        assert_matches!(parse_time_of_day("900"), Err(CoreError::Validation(_)));
        assert_matches!(parse_time_of_day("ab:cd"), Err(CoreError::Validation(_)));
        assert_matches!(parse_time_of_day("24:00"), Err(CoreError::Validation(_)));
        assert_matches!(parse_time_of_day("12:60"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn one_hour_session_is_60_minutes() {
        let s = slot(DayOfWeek::Monday, "09:00", "10:00");
        assert_eq!(s.duration_min(), 60);
    }

    #[test]
    fn rejects_equal_start_and_end() {
        let result = TimeSlot::from_strings(DayOfWeek::Monday, "10:00", "10:00");
        assert_matches!(result, Err(CoreError::InvalidDuration(_)));
    }

    #[test]
    fn rejects_inverted_times() {
        let result = TimeSlot::from_strings(DayOfWeek::Monday, "11:00", "10:00");
        assert_matches!(result, Err(CoreError::InvalidDuration(_)));
    }

    // -----------------------------------------------------------------------
    // Overlap semantics
    // -----------------------------------------------------------------------

    #[test]
    fn touching_endpoints_do_not_overlap() {
        let a = slot(DayOfWeek::Monday, "09:00", "10:00");
        let b = slot(DayOfWeek::Monday, "10:00", "11:00");
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn partial_overlap_detected() {
        let a = slot(DayOfWeek::Monday, "09:00", "10:00");
        let b = slot(DayOfWeek::Monday, "09:30", "10:30");
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn containment_is_overlap() {
        let outer = slot(DayOfWeek::Friday, "08:00", "12:00");
        let inner = slot(DayOfWeek::Friday, "09:00", "10:00");
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn different_days_never_overlap() {
        let a = slot(DayOfWeek::Monday, "09:00", "10:00");
        let b = slot(DayOfWeek::Tuesday, "09:00", "10:00");
        assert!(!a.overlaps(&b));
    }

    // -----------------------------------------------------------------------
    // Busy-set scan
    // -----------------------------------------------------------------------

    fn existing(day: DayOfWeek) -> Vec<ScheduledInterval> {
        vec![
            ScheduledInterval {
                training_id: 1,
                resource_id: 100,
                slot: slot(day, "09:00", "10:00"),
            },
            ScheduledInterval {
                training_id: 2,
                resource_id: 200,
                slot: slot(day, "12:00", "13:00"),
            },
            // Second training in the same room, also overlapping the
            // candidate below; the busy set must still list the room once.
            ScheduledInterval {
                training_id: 3,
                resource_id: 100,
                slot: slot(day, "09:15", "09:45"),
            },
        ]
    }

    #[test]
    fn overlapping_resources_reported_once() {
        let candidate = slot(DayOfWeek::Monday, "09:30", "10:30");
        let busy = busy_resource_ids(&candidate, &existing(DayOfWeek::Monday), None);
        assert_eq!(busy, vec![100]);
    }

    #[test]
    fn empty_schedule_yields_empty_busy_set() {
        let candidate = slot(DayOfWeek::Monday, "09:00", "10:00");
        assert!(busy_resource_ids(&candidate, &[], None).is_empty());
    }

    #[test]
    fn excluded_training_does_not_conflict_with_itself() {
        let candidate = slot(DayOfWeek::Monday, "09:00", "10:00");
        let busy = busy_resource_ids(&candidate, &existing(DayOfWeek::Monday), Some(1));
        // Training 3 still occupies room 100 within the window.
        assert_eq!(busy, vec![100]);

        let only_self = vec![ScheduledInterval {
            training_id: 1,
            resource_id: 100,
            slot: slot(DayOfWeek::Monday, "09:00", "10:00"),
        }];
        assert!(busy_resource_ids(&candidate, &only_self, Some(1)).is_empty());
    }

    #[test]
    fn non_overlapping_candidate_sees_no_busy_resources() {
        let candidate = slot(DayOfWeek::Monday, "10:00", "11:00");
        let busy = busy_resource_ids(&candidate, &existing(DayOfWeek::Monday), None);
        assert!(busy.is_empty());
    }
}

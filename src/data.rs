use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed teaching slots of one day, used when the caller supplies none.
pub const DEFAULT_TIME_SLOTS: [&str; 7] = [
    "9:00-10:20",
    "10:30-11:50",
    "12:40-14:00",
    "14:10-15:30",
    "15:40-17:00",
    "17:10-18:30",
    "18:40-20:00",
];

fn default_time_slots() -> Vec<String> {
    DEFAULT_TIME_SLOTS.iter().map(|s| s.to_string()).collect()
}

/// Represents a teacher and their weekly hour cap.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherSpec {
    pub name: String,
    /// Informational only; preferred days are not enforced by the allocator.
    #[serde(default)]
    pub preferred_days: Vec<String>,
    pub max_hours_per_week: u32,
}

/// Represents a physical room with a given capacity and equipment.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSpec {
    pub name: String,
    pub capacity: u32,
    #[serde(default)]
    pub resources: Vec<String>,
}

/// A teaching unit to be placed, bound to exactly one teacher by name.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSpec {
    pub name: String,
    pub total_hours: u32,
    pub teacher: String,
}

/// A calendar date range. Both bounds are optional on the wire; a missing
/// bound makes the period invalid and the run produces zero placements.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl Period {
    /// Expands the period to the inclusive list of calendar dates, formatted
    /// `YYYY-MM-DD`. `None` if either bound is missing.
    pub fn allowed_dates(&self) -> Option<Vec<String>> {
        let start = self.start?;
        let end = self.end?;
        let dates = start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect();
        Some(dates)
    }
}

/// Where the allocator draws its day labels from: an explicit ordered list,
/// or a planning period expanded to calendar dates.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DaySource {
    Days(Vec<String>),
    Period(Period),
}

/// Which teacher-availability test the scorer applies. The allocator's
/// pre-filter is always slot-aware; only the score penalty is configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TeacherCheck {
    /// Penalize when the exact (day, slot) is taken or the day is at cap.
    #[default]
    SlotAware,
    /// Penalize only when the day is at cap, ignoring reserved slots.
    DayOnly,
}

/// The complete input for one generation run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationInput {
    pub teachers: Vec<TeacherSpec>,
    pub rooms: Vec<RoomSpec>,
    pub courses: Vec<CourseSpec>,
    pub day_source: DaySource,
    #[serde(default)]
    pub teacher_check: TeacherCheck,
    #[serde(default = "default_time_slots")]
    pub time_slots: Vec<String>,
}

/// A single committed assignment. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub course: String,
    pub teacher: String,
    pub room: String,
    pub day: String,
    pub time_slot: String,
    pub duration_hours: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
    CandidateDiscarded,
    Committed,
    CourseUnsatisfiable,
    InvalidPeriod,
}

/// A human-readable notice emitted while allocating.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.kind, self.message)
    }
}

/// Per-course outcome: hour counters plus the placements the course received.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseReport {
    pub name: String,
    pub total_hours: u32,
    /// May end below zero when `total_hours` is odd, since every placement
    /// lasts two hours.
    pub remaining_hours: i32,
    pub placements: Vec<Placement>,
}

/// The final output of a generation run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutput {
    pub placements: Vec<Placement>,
    pub diagnostics: Vec<Diagnostic>,
    pub courses: Vec<CourseReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_expansion_is_inclusive_and_iso_formatted() {
        let period = Period {
            start: NaiveDate::from_ymd_opt(2024, 12, 30),
            end: NaiveDate::from_ymd_opt(2025, 1, 2),
        };
        let dates = period.allowed_dates().unwrap();
        assert_eq!(
            dates,
            vec!["2024-12-30", "2024-12-31", "2025-01-01", "2025-01-02"]
        );
    }

    #[test]
    fn period_with_missing_bound_does_not_expand() {
        let period = Period {
            start: NaiveDate::from_ymd_opt(2024, 12, 1),
            end: None,
        };
        assert!(period.allowed_dates().is_none());
    }

    #[test]
    fn period_with_reversed_bounds_expands_to_nothing() {
        let period = Period {
            start: NaiveDate::from_ymd_opt(2024, 12, 15),
            end: NaiveDate::from_ymd_opt(2024, 12, 1),
        };
        assert_eq!(period.allowed_dates().unwrap(), Vec::<String>::new());
    }

    #[test]
    fn input_deserializes_with_defaults() {
        let json = r#"{
            "teachers": [{"name": "Mr. Smith", "maxHoursPerWeek": 20}],
            "rooms": [{"name": "A101", "capacity": 30}],
            "courses": [{"name": "Cybersecurity", "totalHours": 4, "teacher": "Mr. Smith"}],
            "daySource": {"days": ["Monday", "Tuesday"]}
        }"#;
        let input: GenerationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.time_slots.len(), 7);
        assert_eq!(input.time_slots[0], "9:00-10:20");
        assert_eq!(input.teacher_check, TeacherCheck::SlotAware);
        assert!(input.teachers[0].preferred_days.is_empty());
        match &input.day_source {
            DaySource::Days(days) => assert_eq!(days, &["Monday", "Tuesday"]),
            DaySource::Period(_) => panic!("expected explicit day list"),
        }
    }

    #[test]
    fn input_deserializes_period_source() {
        let json = r#"{
            "teachers": [],
            "rooms": [],
            "courses": [],
            "daySource": {"period": {"start": "2024-12-01", "end": "2024-12-15"}},
            "teacherCheck": "dayOnly"
        }"#;
        let input: GenerationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.teacher_check, TeacherCheck::DayOnly);
        match &input.day_source {
            DaySource::Period(p) => {
                assert_eq!(p.start, NaiveDate::from_ymd_opt(2024, 12, 1));
                assert_eq!(p.end, NaiveDate::from_ymd_opt(2024, 12, 15));
            }
            DaySource::Days(_) => panic!("expected period"),
        }
    }
}

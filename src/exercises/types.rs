//! Exercise record types and display helpers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exercise kinds with dedicated display treatment. Anything else is
/// accepted verbatim and rendered with the fallback glyph.
pub const RECOGNIZED_KINDS: [&str; 9] = [
    "Running",
    "Cycling",
    "Swimming",
    "Walking",
    "Weightlifting",
    "Yoga",
    "Cardio",
    "HIIT",
    "Other",
];

/// One logged exercise session.
///
/// Immutable once persisted; the only mutation path is full deletion by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    /// Unique identifier, generated at creation
    pub id: Uuid,
    /// Activity kind (free-form; see [`RECOGNIZED_KINDS`])
    #[serde(rename = "type")]
    pub kind: String,
    /// Session length in minutes
    #[serde(rename = "duration")]
    pub duration_min: u32,
    /// Calories burned
    pub calories: u32,
    /// Calendar date the activity took place (distinct from `created_at`)
    pub date: NaiveDate,
    /// Optional free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Creation instant, record-of-creation only
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl ExerciseRecord {
    /// Build a record from validated input with a fresh id and timestamp.
    pub fn new(fields: NewExercise) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: fields.kind,
            duration_min: fields.duration_min,
            calories: fields.calories,
            date: fields.date,
            notes: fields.notes,
            created_at: Utc::now(),
        }
    }

    /// Display glyph for this record's kind.
    pub fn glyph(&self) -> &'static str {
        kind_glyph(&self.kind)
    }
}

/// Caller-supplied fields for creating a record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExercise {
    /// Activity kind
    pub kind: String,
    /// Session length in minutes
    pub duration_min: u32,
    /// Calories burned
    pub calories: u32,
    /// Calendar date of the activity
    pub date: NaiveDate,
    /// Optional notes
    pub notes: Option<String>,
}

impl NewExercise {
    /// Basic presence checks applied at the add boundary.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.kind.trim().is_empty() {
            return Err("exercise type must not be empty");
        }
        if self.duration_min == 0 {
            return Err("duration must be at least 1 minute");
        }
        Ok(())
    }
}

/// Display glyph for an exercise kind. Unrecognized kinds fall back to 💪.
pub fn kind_glyph(kind: &str) -> &'static str {
    match kind {
        "Running" => "🏃",
        "Cycling" => "🚴",
        "Swimming" => "🏊",
        "Walking" => "🚶",
        "Weightlifting" => "🏋️",
        "Yoga" => "🧘",
        "Cardio" => "❤️",
        "HIIT" => "⚡",
        "Other" => "💪",
        _ => "💪",
    }
}

/// Human-readable date for listings, e.g. `Jan 1, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_reasonable_input() {
        let fields = NewExercise {
            kind: "Running".to_string(),
            duration_min: 30,
            calories: 300,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            notes: None,
        };
        assert!(fields.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_kind() {
        let fields = NewExercise {
            kind: "   ".to_string(),
            duration_min: 30,
            calories: 300,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            notes: None,
        };
        assert!(fields.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_duration() {
        let fields = NewExercise {
            kind: "Yoga".to_string(),
            duration_min: 0,
            calories: 50,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            notes: None,
        };
        assert!(fields.validate().is_err());
    }

    #[test]
    fn test_glyph_fallback_for_unrecognized_kind() {
        assert_eq!(kind_glyph("Running"), "🏃");
        assert_eq!(kind_glyph("Parkour"), "💪");
    }

    #[test]
    fn test_record_serializes_with_original_field_names() {
        let record = ExerciseRecord::new(NewExercise {
            kind: "Cycling".to_string(),
            duration_min: 45,
            calories: 400,
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            notes: Some("hill repeats".to_string()),
        });

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "Cycling");
        assert_eq!(json["duration"], 45);
        assert_eq!(json["date"], "2024-01-02");
        assert!(json.get("timestamp").is_some());
    }

    #[test]
    fn test_notes_omitted_when_absent() {
        let record = ExerciseRecord::new(NewExercise {
            kind: "Walking".to_string(),
            duration_min: 20,
            calories: 80,
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            notes: None,
        });

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(format_date(date), "Jan 1, 2024");
    }
}

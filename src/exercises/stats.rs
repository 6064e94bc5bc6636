//! Aggregate statistics over a set of exercise records.

use crate::exercises::types::ExerciseRecord;
use serde::{Deserialize, Serialize};

/// Totals and averages derived from a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExerciseStats {
    /// Number of records
    pub count: usize,
    /// Sum of session lengths in minutes
    pub total_duration_min: u64,
    /// Sum of calories burned
    pub total_calories: u64,
    /// Mean session length, rounded to the nearest minute
    pub avg_duration_min: u32,
}

impl ExerciseStats {
    /// Compute stats over the given records. Empty input yields all zeros.
    pub fn from_records(records: &[ExerciseRecord]) -> Self {
        let count = records.len();
        let total_duration_min: u64 = records.iter().map(|ex| u64::from(ex.duration_min)).sum();
        let total_calories: u64 = records.iter().map(|ex| u64::from(ex.calories)).sum();

        let avg_duration_min = if count > 0 {
            (total_duration_min as f64 / count as f64).round() as u32
        } else {
            0
        };

        Self {
            count,
            total_duration_min,
            total_calories,
            avg_duration_min,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercises::types::NewExercise;
    use chrono::NaiveDate;

    fn record(kind: &str, duration_min: u32, calories: u32, date: &str) -> ExerciseRecord {
        ExerciseRecord::new(NewExercise {
            kind: kind.to_string(),
            duration_min,
            calories,
            date: date.parse::<NaiveDate>().unwrap(),
            notes: None,
        })
    }

    #[test]
    fn test_stats_of_empty_set_are_zero() {
        let stats = ExerciseStats::from_records(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.total_duration_min, 0);
        assert_eq!(stats.total_calories, 0);
        assert_eq!(stats.avg_duration_min, 0);
    }

    #[test]
    fn test_stats_sums_and_rounded_average() {
        let records = [
            record("Running", 30, 300, "2024-01-01"),
            record("Cycling", 45, 400, "2024-01-02"),
        ];

        let stats = ExerciseStats::from_records(&records);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.total_duration_min, 75);
        assert_eq!(stats.total_calories, 700);
        // 75 / 2 = 37.5 rounds up
        assert_eq!(stats.avg_duration_min, 38);
    }

    #[test]
    fn test_average_rounds_down_below_half() {
        let records = [
            record("Yoga", 20, 80, "2024-01-01"),
            record("Yoga", 21, 85, "2024-01-02"),
            record("Yoga", 21, 85, "2024-01-03"),
        ];

        let stats = ExerciseStats::from_records(&records);
        // 62 / 3 = 20.67 rounds to 21
        assert_eq!(stats.avg_duration_min, 21);
    }
}

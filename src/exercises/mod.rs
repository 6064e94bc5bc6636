//! Exercise records, the store that owns them, and aggregate stats.

pub mod stats;
pub mod store;
pub mod types;

pub use stats::ExerciseStats;
pub use store::{ExerciseStore, HistoryFilter, StoreError};
pub use types::{ExerciseRecord, NewExercise};

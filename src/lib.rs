//! FitLog - Exercise Session Tracker
//!
//! A small, self-hosted tracker for logging exercise sessions (type,
//! duration, calories, date, notes) with durable local persistence,
//! time-window filtering, and aggregate statistics.

pub mod exercises;
pub mod storage;

// Re-export commonly used types
pub use exercises::stats::ExerciseStats;
pub use exercises::store::{ExerciseStore, HistoryFilter, StoreError};
pub use exercises::types::{ExerciseRecord, NewExercise};
pub use storage::backing::{BackingStore, MemoryStore, StorageError};
pub use storage::keyvalue::KeyValueStore;

//! The exercise store: the authoritative in-memory collection, kept in
//! sync with durable storage on every mutation.

use crate::exercises::stats::ExerciseStats;
use crate::exercises::types::{ExerciseRecord, NewExercise};
use crate::storage::backing::{BackingStore, MemoryStore, StorageError};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Fixed key the serialized collection lives under in the backing store.
const STORAGE_KEY: &str = "exercises";

/// Time-window restriction for listing records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryFilter {
    /// No restriction
    All,
    /// Records whose date falls within the last `n * 24h`. Future-dated
    /// records always pass (the window has no upper bound).
    LastDays(i64),
}

impl HistoryFilter {
    /// Last 7 days.
    pub fn week() -> Self {
        Self::LastDays(7)
    }

    /// Last 30 days.
    pub fn month() -> Self {
        Self::LastDays(30)
    }

    /// Whether a record dated `date` falls inside the window anchored at
    /// `now`. The date is taken at midnight UTC, matching a fixed-duration
    /// window rather than calendar-day boundaries.
    pub fn matches(&self, date: NaiveDate, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::LastDays(n) => {
                let cutoff = now - Duration::days(*n);
                date.and_time(NaiveTime::MIN).and_utc() >= cutoff
            }
        }
    }
}

/// Exercise store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid exercise input: {0}")]
    Validation(String),

    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Owns the exercise collection for the lifetime of the process.
///
/// Every mutation serializes the whole collection to the backing store
/// before returning; a failed write is surfaced and the in-memory change
/// rolled back, so memory and disk never diverge.
pub struct ExerciseStore {
    exercises: Vec<ExerciseRecord>,
    backing: Box<dyn BackingStore>,
}

impl ExerciseStore {
    /// Open a store over the given backing, loading any persisted
    /// collection. Missing, unreadable, or malformed persisted data is not
    /// an error: the store starts empty and logs a warning.
    pub fn open(backing: Box<dyn BackingStore>) -> Self {
        let exercises = Self::load(backing.as_ref());
        tracing::debug!(count = exercises.len(), "Loaded exercise collection");

        Self { exercises, backing }
    }

    /// Open a store over an in-process backing (for testing and ephemeral
    /// use).
    pub fn open_in_memory() -> Self {
        Self::open(Box::new(MemoryStore::new()))
    }

    fn load(backing: &dyn BackingStore) -> Vec<ExerciseRecord> {
        match backing.get(STORAGE_KEY) {
            Ok(Some(blob)) => match serde_json::from_str(&blob) {
                Ok(exercises) => exercises,
                Err(e) => {
                    tracing::warn!("Persisted exercise data is malformed, starting empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read persisted exercises, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Create a record from the given fields, prepend it to the collection,
    /// and persist. The returned record carries the generated id and
    /// creation timestamp.
    pub fn add(&mut self, fields: NewExercise) -> Result<ExerciseRecord, StoreError> {
        fields
            .validate()
            .map_err(|e| StoreError::Validation(e.to_string()))?;

        let record = ExerciseRecord::new(fields);
        self.exercises.insert(0, record.clone());

        if let Err(e) = self.persist() {
            self.exercises.remove(0);
            return Err(e);
        }

        tracing::info!(id = %record.id, kind = %record.kind, "Exercise added");
        Ok(record)
    }

    /// Remove the record with the given id, persisting the shrunk
    /// collection. Returns `false` (not an error) when no record matches;
    /// the collection is left untouched and not re-persisted.
    pub fn remove(&mut self, id: Uuid) -> Result<bool, StoreError> {
        let position = match self.exercises.iter().position(|ex| ex.id == id) {
            Some(position) => position,
            None => return Ok(false),
        };

        let removed = self.exercises.remove(position);

        if let Err(e) = self.persist() {
            self.exercises.insert(position, removed);
            return Err(e);
        }

        tracing::info!(id = %id, "Exercise deleted");
        Ok(true)
    }

    /// Records matching the filter, in current (reverse-insertion) order.
    pub fn list(&self, filter: HistoryFilter) -> Vec<ExerciseRecord> {
        self.list_at(filter, Utc::now())
    }

    /// Same as [`list`](Self::list) with an explicit window anchor, for
    /// deterministic filtering.
    pub fn list_at(&self, filter: HistoryFilter, now: DateTime<Utc>) -> Vec<ExerciseRecord> {
        self.exercises
            .iter()
            .filter(|ex| filter.matches(ex.date, now))
            .cloned()
            .collect()
    }

    /// Aggregate stats over the full collection, independent of any filter.
    pub fn summarize(&self) -> ExerciseStats {
        ExerciseStats::from_records(&self.exercises)
    }

    /// Number of records in the collection.
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let blob = serde_json::to_string(&self.exercises)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        self.backing.set(STORAGE_KEY, &blob)?;
        Ok(())
    }
}

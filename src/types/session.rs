//! Persisted records: finished sessions and the daily streak

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::types::ExerciseKind;

/// One finished exercise session. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: Uuid,
    /// When the session started
    pub started_at: DateTime<Utc>,
    /// When the session ended and was recorded
    pub recorded_at: DateTime<Utc>,
    /// UTC calendar day of `recorded_at`
    pub day: NaiveDate,
    pub exercise: ExerciseKind,
    pub reps: u32,
    /// Always at least one second
    pub duration_seconds: u64,
}

impl SessionRecord {
    /// Duration as shown in reports, e.g. "2m 5s"
    pub fn duration_display(&self) -> String {
        crate::core::report::format_duration(self.duration_seconds)
    }

    /// Single-line summary
    pub fn summary(&self) -> String {
        format!(
            "Exercise: {} • Reps: {} • Duration: {}",
            self.exercise.label(),
            self.reps,
            self.duration_display()
        )
    }
}

/// Consecutive-day streak, one per user/device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub last_date: Option<NaiveDate>,
}

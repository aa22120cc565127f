//! Session recorder: finished session → record → store → streak

use chrono::{DateTime, Utc};
use tracing::{error, info};
use uuid::Uuid;
use crate::core::session::SessionContext;
use crate::core::store::ProgressStore;
use crate::core::streak::update_streak;
use crate::types::{SessionRecord, StreakState};
use crate::{Result, MIN_SESSION_SECS};

/// Whole seconds between two instants, rounded, never below one second
pub fn session_duration_secs(started_at: DateTime<Utc>, ended_at: DateTime<Utc>) -> u64 {
    let millis = (ended_at - started_at).num_milliseconds();
    if millis <= 0 {
        return MIN_SESSION_SECS;
    }
    let rounded = (millis as u64 + 500) / 1000;
    rounded.max(MIN_SESSION_SECS)
}

/// Build the immutable record for a finished session
pub fn build_record(ctx: &SessionContext, now: DateTime<Utc>) -> SessionRecord {
    SessionRecord {
        id: Uuid::new_v4(),
        started_at: ctx.started_at(),
        recorded_at: now,
        day: now.date_naive(),
        exercise: ctx.exercise(),
        reps: ctx.rep_count(),
        duration_seconds: session_duration_secs(ctx.started_at(), now),
    }
}

/// Persists finished sessions and keeps the streak current
#[derive(Debug)]
pub struct SessionRecorder {
    store: ProgressStore,
}

impl SessionRecorder {
    pub fn new(store: ProgressStore) -> Self {
        Self { store }
    }

    /// End the session now
    pub fn finish(&mut self, ctx: &SessionContext) -> Result<SessionRecord> {
        self.finish_at(ctx, Utc::now())
    }

    /// End the session at `now`: append the record, then fold its day into the streak
    ///
    /// Store failures are returned, not retried. The context is left untouched
    /// so the caller can keep the session and try again.
    pub fn finish_at(&mut self, ctx: &SessionContext, now: DateTime<Utc>) -> Result<SessionRecord> {
        let record = build_record(ctx, now);

        if let Err(e) = self.store.append_session(&record) {
            error!(id = %record.id, error = %e, "failed to append session record");
            return Err(e);
        }

        let streak = self.update_streak(&record).inspect_err(|e| {
            error!(id = %record.id, error = %e, "failed to update streak");
        })?;

        info!(
            id = %record.id,
            exercise = %record.exercise,
            reps = record.reps,
            duration_seconds = record.duration_seconds,
            streak = streak.streak,
            "session recorded"
        );
        Ok(record)
    }

    fn update_streak(&mut self, record: &SessionRecord) -> Result<StreakState> {
        let current = self.store.streak()?;
        let next = update_streak(record.day, current);
        self.store.save_streak(&next)?;
        Ok(next)
    }

    /// Read-only access for reports and exporters
    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ProgressStore {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use crate::config::TargetConfig;
    use crate::core::store::MemoryStore;
    use crate::types::ExerciseKind;

    #[test]
    fn test_duration_rounding() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        assert_eq!(session_duration_secs(t0, t0), 1);
        assert_eq!(session_duration_secs(t0, t0 + Duration::milliseconds(200)), 1);
        assert_eq!(session_duration_secs(t0, t0 + Duration::milliseconds(1499)), 1);
        assert_eq!(session_duration_secs(t0, t0 + Duration::milliseconds(1500)), 2);
        assert_eq!(session_duration_secs(t0, t0 + Duration::seconds(125)), 125);
        assert_eq!(session_duration_secs(t0, t0 - Duration::seconds(3)), 1);
    }

    #[test]
    fn test_finish_records_and_updates_streak() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let ctx = SessionContext::start_at(ExerciseKind::Squat, TargetConfig::free(), t0);
        let mut recorder = SessionRecorder::new(ProgressStore::new(MemoryStore::new()));

        let record = recorder.finish_at(&ctx, t0 + Duration::seconds(42)).unwrap();
        assert_eq!(record.duration_seconds, 42);
        assert_eq!(record.reps, 0);
        assert_eq!(record.day, t0.date_naive());

        assert_eq!(recorder.store().sessions().unwrap(), vec![record]);
        let streak = recorder.store().streak().unwrap();
        assert_eq!(streak.streak, 1);
        assert_eq!(streak.last_date, Some(t0.date_naive()));
    }
}

//! Read-only progress aggregates for exporters and dashboards

use std::collections::BTreeMap;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use crate::types::{ExerciseKind, SessionRecord, StreakState};

/// "{minutes}m {seconds}s"
pub fn format_duration(secs: u64) -> String {
    format!("{}m {}s", secs / 60, secs % 60)
}

/// Summary of the whole session history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub generated_at: DateTime<Utc>,
    pub total_sessions: usize,
    pub total_reps: u64,
    pub current_streak: u32,
    /// Session count per calendar day, ascending
    pub sessions_by_day: BTreeMap<NaiveDate, u32>,
    /// Total reps per exercise
    pub reps_by_exercise: BTreeMap<ExerciseKind, u64>,
    /// Newest first
    pub history: Vec<SessionRecord>,
}

impl ProgressReport {
    pub fn build(sessions: &[SessionRecord], streak: &StreakState, generated_at: DateTime<Utc>) -> Self {
        let mut sessions_by_day = BTreeMap::new();
        let mut reps_by_exercise = BTreeMap::new();

        for s in sessions {
            *sessions_by_day.entry(s.day).or_insert(0) += 1;
            *reps_by_exercise.entry(s.exercise).or_insert(0) += u64::from(s.reps);
        }

        Self {
            generated_at,
            total_sessions: sessions.len(),
            total_reps: sessions.iter().map(|s| u64::from(s.reps)).sum(),
            current_streak: streak.streak,
            sessions_by_day,
            reps_by_exercise,
            history: sessions.iter().rev().cloned().collect(),
        }
    }

    /// Plain-text rendering for the terminal
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Generated: {}\n", self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")));
        out.push_str(&format!("Total Sessions: {}\n", self.total_sessions));
        out.push_str(&format!("Total Reps: {}\n", self.total_reps));
        out.push_str(&format!("Current Streak: {} days\n", self.current_streak));

        if self.history.is_empty() {
            out.push_str("\nNo sessions available.\n");
            return out;
        }

        out.push_str(&format!("\n{:<22}{:<18}{:>6}  {}\n", "Date", "Exercise", "Reps", "Duration"));
        for s in &self.history {
            out.push_str(&format!(
                "{:<22}{:<18}{:>6}  {}\n",
                s.recorded_at.format("%Y-%m-%d %H:%M:%S"),
                s.exercise.label(),
                s.reps,
                format_duration(s.duration_seconds)
            ));
        }
        out
    }
}

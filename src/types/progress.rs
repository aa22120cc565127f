//! Rep and set progress values

use serde::{Deserialize, Serialize};

/// Emitted for each accepted repetition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepEvent {
    /// Cumulative rep count including this rep
    pub count: u32,
}

/// Notifications fired at set boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum SetEvent {
    /// Set `set` finished, more sets follow
    SetComplete { set: u32 },
    /// Every set finished
    WorkoutComplete { total_reps: u32 },
}

/// Snapshot of progress toward the rep/set goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetState {
    pub target_reps: u32,
    pub target_sets: u32,
    /// 1-based, clamped to the target set count
    pub current_set: u32,
    /// Reps shown for the current set (raw count in free mode)
    pub reps_in_set: u32,
    /// Cumulative reps this session
    pub rep_count: u32,
}

impl SetState {
    pub fn is_free_mode(&self) -> bool {
        self.target_reps == 0 || self.target_sets == 0
    }

    /// "Set 2/3 · 4/10", or "Reps: 7" in free mode
    pub fn display(&self) -> String {
        if self.is_free_mode() {
            format!("Reps: {}", self.rep_count)
        } else {
            format!(
                "Set {}/{} · {}/{}",
                self.current_set, self.target_sets, self.reps_in_set, self.target_reps
            )
        }
    }
}

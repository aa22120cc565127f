//! Set progress: current set, reps within the set, boundary events
//!
//! Free-count mode (either target 0) has no set semantics.

use crate::config::TargetConfig;
use crate::types::{SetEvent, SetState};

/// Derive set progress from the cumulative rep count
///
/// `reps_in_set` shows the full target (not 0) when a set was just finished.
/// `current_set = ceil(rep_count / target_reps)` clamped to `[1, target_sets]`.
pub fn set_progress(rep_count: u32, targets: TargetConfig) -> SetState {
    let TargetConfig { target_reps, target_sets } = targets;

    if targets.is_free_mode() {
        return SetState {
            target_reps,
            target_sets,
            current_set: 1,
            reps_in_set: rep_count,
            rep_count,
        };
    }

    let remainder = rep_count % target_reps;
    let reps_in_set = if remainder == 0 && rep_count > 0 {
        target_reps
    } else {
        remainder
    };
    let current_set = rep_count.div_ceil(target_reps).clamp(1, target_sets);

    SetState {
        target_reps,
        target_sets,
        current_set,
        reps_in_set,
        rep_count,
    }
}

/// Fires set-complete and workout-complete exactly once each
#[derive(Debug, Clone)]
pub struct SetTracker {
    targets: TargetConfig,
    /// Highest set already announced as complete
    last_completed_set: u32,
    workout_complete: bool,
}

impl SetTracker {
    pub fn new(targets: TargetConfig) -> Self {
        Self {
            targets,
            last_completed_set: 0,
            workout_complete: false,
        }
    }

    pub fn targets(&self) -> TargetConfig {
        self.targets
    }

    /// Current progress for a rep count
    pub fn progress(&self, rep_count: u32) -> SetState {
        set_progress(rep_count, self.targets)
    }

    /// Check the rep count for a boundary; returns the event to announce, if any
    pub fn update(&mut self, rep_count: u32) -> Option<SetEvent> {
        let total = self.targets.total_reps()?;
        if self.workout_complete {
            return None;
        }

        if rep_count >= total {
            self.workout_complete = true;
            return Some(SetEvent::WorkoutComplete { total_reps: rep_count });
        }

        let progress = self.progress(rep_count);
        if progress.reps_in_set == progress.target_reps
            && progress.current_set < progress.target_sets
            && progress.current_set > self.last_completed_set
        {
            self.last_completed_set = progress.current_set;
            return Some(SetEvent::SetComplete { set: progress.current_set });
        }

        None
    }

    pub fn is_workout_complete(&self) -> bool {
        self.workout_complete
    }
}

//! Per-frame output structures for terminal display and the API

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::{ExerciseKind, PositionSignal, PositionState, ReasonCode, RepEvent, SetEvent, SetState};

/// Result of processing one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    pub timestamp: DateTime<Utc>,
    pub exercise: ExerciseKind,
    /// Counter state after this frame
    pub state: PositionState,
    /// Classifier signal; None when no body was in view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<PositionSignal>,
    /// Average knee angle in degrees (squat only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knee_angle: Option<f64>,
    pub progress: SetState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rep: Option<RepEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_event: Option<SetEvent>,
    pub reason: ReasonCode,
    /// True once every set is done; the caller should end the session
    pub workout_complete: bool,
}

impl FrameOutput {
    pub fn rep_count(&self) -> u32 {
        self.progress.rep_count
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.state.color_code();
        let reset = PositionState::color_reset();
        let emoji = self.state.emoji();

        format!(
            "{}{} {} | state={}{} | {}{}",
            color,
            emoji,
            self.progress.display(),
            self.state,
            self.angle_suffix(),
            self.reason.code(),
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "reps={} | set={} | state={}{} | reason={}",
            self.progress.rep_count,
            self.progress.current_set,
            self.state,
            self.angle_suffix(),
            self.reason.code()
        )
    }

    fn angle_suffix(&self) -> String {
        match self.knee_angle {
            Some(angle) => format!(" | knee={:.0}°", angle),
            None => String::new(),
        }
    }
}

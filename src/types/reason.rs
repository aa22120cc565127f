//! Reason codes attached to every frame output

use serde::{Deserialize, Serialize};

/// Why a frame produced the output it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // R001: Input
    // =========================================================================
    /// Provider reported no body in view
    R001_NO_BODY,
    /// Frame has fewer landmarks than the pose model
    R001_INCOMPLETE_FRAME,
    /// Joint angle undefined (coincident landmarks)
    R001_DEGENERATE_GEOMETRY,

    // =========================================================================
    // R002: Counter transitions
    // =========================================================================
    /// Rising edge, rep counted
    R002_REP_COUNTED,
    /// Position still held, no new rep
    R002_POSITION_HELD,
    /// Position left, counter re-armed
    R002_POSITION_RELEASED,

    // =========================================================================
    // R003: Hysteresis
    // =========================================================================
    /// Squat angle inside the deadband, state frozen
    R003_DEADBAND_HOLD,

    // =========================================================================
    // R004: Sets
    // =========================================================================
    /// A set boundary was reached
    R004_SET_COMPLETE,
    /// All sets done
    R004_WORKOUT_COMPLETE,
    /// Workout already complete, frame ignored
    R004_SESSION_COMPLETE,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R001_NO_BODY => "R001_NO_BODY",
            Self::R001_INCOMPLETE_FRAME => "R001_INCOMPLETE_FRAME",
            Self::R001_DEGENERATE_GEOMETRY => "R001_DEGENERATE_GEOMETRY",
            Self::R002_REP_COUNTED => "R002_REP_COUNTED",
            Self::R002_POSITION_HELD => "R002_POSITION_HELD",
            Self::R002_POSITION_RELEASED => "R002_POSITION_RELEASED",
            Self::R003_DEADBAND_HOLD => "R003_DEADBAND_HOLD",
            Self::R004_SET_COMPLETE => "R004_SET_COMPLETE",
            Self::R004_WORKOUT_COMPLETE => "R004_WORKOUT_COMPLETE",
            Self::R004_SESSION_COMPLETE => "R004_SESSION_COMPLETE",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R001_NO_BODY => "No body detected",
            Self::R001_INCOMPLETE_FRAME => "Required landmarks missing",
            Self::R001_DEGENERATE_GEOMETRY => "Joint angle undefined",
            Self::R002_REP_COUNTED => "Rep counted",
            Self::R002_POSITION_HELD => "Holding position",
            Self::R002_POSITION_RELEASED => "Ready for next rep",
            Self::R003_DEADBAND_HOLD => "Inside hysteresis band",
            Self::R004_SET_COMPLETE => "Set complete",
            Self::R004_WORKOUT_COMPLETE => "Workout complete",
            Self::R004_SESSION_COMPLETE => "Workout already complete",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

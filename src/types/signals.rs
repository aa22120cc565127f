//! Classifier output signal

use serde::{Deserialize, Serialize};
use crate::types::ReasonCode;

/// Why the classifier could not decide on a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldCause {
    /// Squat knee angle between the enter and exit thresholds
    Deadband,
    /// Frame lacks the landmarks the rule needs
    IncompleteFrame,
    /// Landmarks coincide, the joint angle is undefined
    DegenerateGeometry,
}

/// Tri-state result of classifying one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "signal", content = "cause")]
pub enum PositionSignal {
    /// Target position reached
    Reached,
    /// Target position left
    Released,
    /// No decision this frame; the counter keeps its state
    Holding(HoldCause),
}

impl PositionSignal {
    /// Boolean view: only `Reached` is "in position"
    pub fn is_reached(&self) -> bool {
        matches!(self, PositionSignal::Reached)
    }

    /// Reason code for frames the counter does not act on
    pub fn hold_reason(&self) -> Option<ReasonCode> {
        match self {
            PositionSignal::Holding(HoldCause::Deadband) => Some(ReasonCode::R003_DEADBAND_HOLD),
            PositionSignal::Holding(HoldCause::IncompleteFrame) => Some(ReasonCode::R001_INCOMPLETE_FRAME),
            PositionSignal::Holding(HoldCause::DegenerateGeometry) => Some(ReasonCode::R001_DEGENERATE_GEOMETRY),
            _ => None,
        }
    }
}

impl From<bool> for PositionSignal {
    fn from(reached: bool) -> Self {
        if reached {
            PositionSignal::Reached
        } else {
            PositionSignal::Released
        }
    }
}

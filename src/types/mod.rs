//! Core types for RepQuest

pub mod landmark;
mod exercise;
mod state;
mod signals;
mod progress;
mod output;
mod reason;
mod session;

pub use landmark::{Landmark, LandmarkFrame, FrameEvent, FramePayload};
pub use exercise::ExerciseKind;
pub use state::PositionState;
pub use signals::{PositionSignal, HoldCause};
pub use progress::{RepEvent, SetEvent, SetState};
pub use output::FrameOutput;
pub use reason::ReasonCode;
pub use session::{SessionRecord, StreakState};

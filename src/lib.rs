//! RepQuest: rep/set detection and session aggregation engine
//!
//! Landmark frame → classifier → rep counter → set tracker → output.
//! At session end: session context → recorder → streak tracker → store.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod types;

pub use error::{Error, Result};

// =============================================================================
// CLASSIFIER THRESHOLDS
// =============================================================================

/// Average knee angle below which a squat counts as "down" (degrees)
pub const SQUAT_ENTER_ANGLE_DEG: f64 = 140.0;

/// Average knee angle above which a squat is released again (degrees)
/// Angles between enter and exit freeze the current position.
pub const SQUAT_EXIT_ANGLE_DEG: f64 = 160.0;

/// Leg raise: ankle must be above knee.y × this factor (5% tolerance)
pub const LEG_RAISE_TOLERANCE: f64 = 1.05;

/// Body tilt: minimum |head.x − shoulder_mid.x| in normalized width
pub const TILT_OFFSET_THRESHOLD: f64 = 0.05;

/// Minimum landmarks in a complete pose frame
pub const MIN_LANDMARKS: usize = 33;

/// Vector length below which an angle is undefined
pub const DEGENERATE_VECTOR_EPSILON: f64 = 1e-6;

// =============================================================================
// SESSION
// =============================================================================

/// Delay between workout-complete and automatic session end (milliseconds)
/// Long enough for the notification to be seen before the screen changes.
pub const WORKOUT_COMPLETE_GRACE_MS: u64 = 800;

/// Shortest duration a recorded session can have (seconds)
pub const MIN_SESSION_SECS: u64 = 1;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";

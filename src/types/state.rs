//! Rep counter position state

use serde::{Deserialize, Serialize};

/// The two states of the hysteresis rep counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionState {
    /// Initial state; the next reached signal counts a rep
    #[default]
    NotInPosition,
    /// Target position held; no further reps until released
    InPosition,
}

impl PositionState {
    pub fn is_in_position(&self) -> bool {
        *self == PositionState::InPosition
    }

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            PositionState::NotInPosition => "\x1b[90m", // Gray
            PositionState::InPosition => "\x1b[32m",    // Green
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            PositionState::NotInPosition => "⏳",
            PositionState::InPosition => "💪",
        }
    }
}

impl std::fmt::Display for PositionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PositionState::NotInPosition => "NOT_IN_POSITION",
            PositionState::InPosition => "IN_POSITION",
        };
        write!(f, "{}", name)
    }
}

//! Hysteresis rep counter: rising-edge detector over the classifier signal
//!
//! State transitions:
//! - NOT_IN_POSITION → IN_POSITION: signal reached (rep counted)
//! - IN_POSITION → IN_POSITION: signal reached (held, no count)
//! - any → NOT_IN_POSITION: signal released
//! - holding signals leave the state unchanged

use crate::types::{PositionSignal, PositionState, ReasonCode, RepEvent};

/// Rep counter state machine, one per session
#[derive(Debug, Clone, Default)]
pub struct RepCounter {
    /// Current position state
    state: PositionState,
    /// Cumulative accepted reps
    count: u32,
    /// Frames fed so far
    update_count: u64,
}

/// Result of one counter update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterUpdate {
    pub state: PositionState,
    pub rep: Option<RepEvent>,
    pub reason: ReasonCode,
}

impl RepCounter {
    /// Create new counter in NOT_IN_POSITION with zero reps
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one classifier signal
    pub fn update(&mut self, signal: PositionSignal) -> CounterUpdate {
        self.update_count += 1;

        let (rep, reason) = match (signal, self.state) {
            (PositionSignal::Reached, PositionState::NotInPosition) => {
                self.count += 1;
                self.state = PositionState::InPosition;
                (Some(RepEvent { count: self.count }), ReasonCode::R002_REP_COUNTED)
            }
            (PositionSignal::Reached, PositionState::InPosition) => {
                (None, ReasonCode::R002_POSITION_HELD)
            }
            (PositionSignal::Released, _) => {
                self.state = PositionState::NotInPosition;
                (None, ReasonCode::R002_POSITION_RELEASED)
            }
            (PositionSignal::Holding(_), _) => {
                let reason = signal.hold_reason().unwrap_or(ReasonCode::R003_DEADBAND_HOLD);
                (None, reason)
            }
        };

        CounterUpdate { state: self.state, rep, reason }
    }

    /// Boolean convenience: true = reached, false = released
    pub fn update_bool(&mut self, in_position: bool) -> CounterUpdate {
        self.update(in_position.into())
    }

    /// Get current state
    pub fn state(&self) -> PositionState {
        self.state
    }

    pub fn is_in_position(&self) -> bool {
        self.state.is_in_position()
    }

    /// Get cumulative rep count
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Get number of updates
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Reset to initial state
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

// =============================================================================
// TESTS
// =============================================================================

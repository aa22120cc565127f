//! Target configuration
//!
//! Targets come from user input (CLI flags, JSON bodies). Anything that is
//! not a non-negative integer becomes 0, which selects free-count mode.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rep/set goal for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    pub target_reps: u32,
    pub target_sets: u32,
}

impl TargetConfig {
    pub fn new(target_reps: u32, target_sets: u32) -> Self {
        Self { target_reps, target_sets }
    }

    /// Free-count mode: no targets at all
    pub fn free() -> Self {
        Self::default()
    }

    /// Parse from raw text inputs. Absent or malformed values become 0.
    pub fn from_inputs(reps: Option<&str>, sets: Option<&str>) -> Self {
        Self {
            target_reps: parse_count(reps),
            target_sets: parse_count(sets),
        }
    }

    /// Parse from JSON values (numbers or numeric strings).
    pub fn from_json(reps: Option<&Value>, sets: Option<&Value>) -> Self {
        Self {
            target_reps: count_from_json(reps),
            target_sets: count_from_json(sets),
        }
    }

    /// True when either target is 0 and set semantics do not apply
    pub fn is_free_mode(&self) -> bool {
        self.target_reps == 0 || self.target_sets == 0
    }

    /// Reps needed to finish the whole workout (None in free mode)
    pub fn total_reps(&self) -> Option<u32> {
        if self.is_free_mode() {
            None
        } else {
            Some(self.target_reps.saturating_mul(self.target_sets))
        }
    }
}

/// Lenient count parse: trims whitespace, rejects negatives and garbage
pub fn parse_count(raw: Option<&str>) -> u32 {
    raw.map(str::trim)
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(0)
}

fn count_from_json(value: Option<&Value>) -> u32 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0),
        Some(Value::String(s)) => parse_count(Some(s)),
        _ => 0,
    }
}

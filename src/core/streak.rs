//! Daily streak: consecutive calendar days with at least one session
//!
//! - first session ever: streak 1
//! - next day: +1
//! - gap of two or more days: back to 1
//! - same day: unchanged
//! - earlier day (clock moved back): streak unchanged
//!
//! `last_date` always becomes the session day.

use chrono::NaiveDate;
use tracing::warn;
use crate::types::StreakState;

/// Fold one session day into the streak
pub fn update_streak(day: NaiveDate, state: StreakState) -> StreakState {
    let Some(last) = state.last_date else {
        return StreakState { streak: 1, last_date: Some(day) };
    };

    let diff = (day - last).num_days();
    match diff {
        1 => StreakState { streak: state.streak.saturating_add(1), last_date: Some(day) },
        d if d > 1 => StreakState { streak: 1, last_date: Some(day) },
        0 => StreakState { last_date: Some(day), ..state },
        _ => {
            warn!(%day, %last, "session day precedes last streak day, streak unchanged");
            StreakState { last_date: Some(day), ..state }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_first_session() {
        let s = update_streak(day(1), StreakState::default());
        assert_eq!(s, StreakState { streak: 1, last_date: Some(day(1)) });
    }

    #[test]
    fn test_consecutive_days() {
        let mut s = StreakState::default();
        let mut seen = Vec::new();
        for d in 1..=3 {
            s = update_streak(day(d), s);
            seen.push(s.streak);
        }
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn test_gap_resets() {
        let s = update_streak(day(1), StreakState::default());
        let s = update_streak(day(2), s);
        let s = update_streak(day(5), s);
        assert_eq!(s, StreakState { streak: 1, last_date: Some(day(5)) });
    }

    #[test]
    fn test_same_day_unchanged() {
        let s = update_streak(day(1), StreakState::default());
        let s = update_streak(day(2), s);
        let again = update_streak(day(2), s);
        assert_eq!(again, s);
    }

    #[test]
    fn test_month_boundary() {
        let s = StreakState { streak: 4, last_date: NaiveDate::from_ymd_opt(2024, 2, 29) };
        let s = update_streak(day(1), s);
        assert_eq!(s.streak, 5);
    }

    #[test]
    fn test_backward_day_keeps_count_and_moves_date() {
        let s = StreakState { streak: 3, last_date: Some(day(10)) };
        let after = update_streak(day(8), s);
        assert_eq!(after, StreakState { streak: 3, last_date: Some(day(8)) });

        // Counting resumes from the new last date
        assert_eq!(update_streak(day(9), after).streak, 4);
        assert_eq!(update_streak(day(11), after).streak, 1);
    }
}

//! Session context: all per-session state in one owned value
//!
//! Created at exercise start, fed one frame at a time, consumed by the
//! recorder at exercise end. Frames are processed synchronously in order.

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use crate::config::TargetConfig;
use crate::core::classifier::ExerciseClassifier;
use crate::core::counter::RepCounter;
use crate::core::sets::SetTracker;
use crate::types::{
    ExerciseKind, FrameEvent, FrameOutput, PositionSignal, PositionState, ReasonCode, RepEvent,
    SetEvent, SetState,
};

/// One active exercise session
#[derive(Debug, Clone)]
pub struct SessionContext {
    classifier: ExerciseClassifier,
    counter: RepCounter,
    sets: SetTracker,
    started_at: DateTime<Utc>,
    /// Reason attached to the most recent frame
    last_reason: ReasonCode,
    last_knee_angle: Option<f64>,
}

impl SessionContext {
    /// Start a session now
    pub fn start(exercise: ExerciseKind, targets: TargetConfig) -> Self {
        Self::start_at(exercise, targets, Utc::now())
    }

    /// Start a session at an explicit time
    pub fn start_at(exercise: ExerciseKind, targets: TargetConfig, started_at: DateTime<Utc>) -> Self {
        info!(
            %exercise,
            target_reps = targets.target_reps,
            target_sets = targets.target_sets,
            "session started"
        );
        Self {
            classifier: ExerciseClassifier::new(exercise),
            counter: RepCounter::new(),
            sets: SetTracker::new(targets),
            started_at,
            last_reason: ReasonCode::R002_POSITION_RELEASED,
            last_knee_angle: None,
        }
    }

    /// Process one frame event: classifier → counter → set tracker
    pub fn process(&mut self, event: &FrameEvent) -> FrameOutput {
        if self.sets.is_workout_complete() {
            self.last_reason = ReasonCode::R004_SESSION_COMPLETE;
            return self.output(None, None, None);
        }

        let frame = match event {
            FrameEvent::Detected(frame) => frame,
            FrameEvent::NoBody => {
                self.last_reason = ReasonCode::R001_NO_BODY;
                return self.output(None, None, None);
            }
        };

        let evaluation = self.classifier.evaluate(frame);
        self.last_knee_angle = evaluation.knee_angle;

        let update = self.counter.update(evaluation.signal);
        let mut reason = update.reason;
        let mut set_event = None;

        if let Some(rep) = update.rep {
            debug!(exercise = %self.exercise(), count = rep.count, "rep counted");
            set_event = self.sets.update(rep.count);
            match set_event {
                Some(SetEvent::SetComplete { set }) => {
                    info!(set, "set complete");
                    reason = ReasonCode::R004_SET_COMPLETE;
                }
                Some(SetEvent::WorkoutComplete { total_reps }) => {
                    info!(total_reps, "workout complete");
                    reason = ReasonCode::R004_WORKOUT_COMPLETE;
                }
                None => {}
            }
        }

        self.last_reason = reason;
        let mut output = self.output(Some(evaluation.signal), update.rep, set_event);
        output.knee_angle = evaluation.knee_angle;
        output
    }

    fn output(
        &self,
        signal: Option<PositionSignal>,
        rep: Option<RepEvent>,
        set_event: Option<SetEvent>,
    ) -> FrameOutput {
        FrameOutput {
            timestamp: Utc::now(),
            exercise: self.exercise(),
            state: self.counter.state(),
            signal,
            knee_angle: None,
            progress: self.progress(),
            rep,
            set_event,
            reason: self.last_reason,
            workout_complete: self.sets.is_workout_complete(),
        }
    }

    /// Current output without processing a frame
    pub fn current_output(&self) -> FrameOutput {
        let mut output = self.output(None, None, None);
        output.knee_angle = self.last_knee_angle;
        output
    }

    pub fn exercise(&self) -> ExerciseKind {
        self.classifier.kind()
    }

    pub fn targets(&self) -> TargetConfig {
        self.sets.targets()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Cumulative accepted reps
    pub fn rep_count(&self) -> u32 {
        self.counter.count()
    }

    pub fn state(&self) -> PositionState {
        self.counter.state()
    }

    pub fn progress(&self) -> SetState {
        self.sets.progress(self.counter.count())
    }

    /// True once every set is done; further frames are ignored
    pub fn is_workout_complete(&self) -> bool {
        self.sets.is_workout_complete()
    }

    /// Frames that reached the counter: excludes no-body frames and frames
    /// ignored after workout-complete
    pub fn frames_processed(&self) -> u64 {
        self.counter.update_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::landmark::{LEFT_SHOULDER, LEFT_WRIST, RIGHT_SHOULDER, RIGHT_WRIST};
    use crate::types::{Landmark, LandmarkFrame};
    use crate::MIN_LANDMARKS;

    fn arms(up: bool) -> FrameEvent {
        let mut frame = LandmarkFrame::new(vec![Landmark::new(0.5, 0.5); MIN_LANDMARKS]);
        let wrist_y = if up { 0.1 } else { 0.6 };
        frame.set(LEFT_SHOULDER, Landmark::new(0.6, 0.3));
        frame.set(RIGHT_SHOULDER, Landmark::new(0.4, 0.3));
        frame.set(LEFT_WRIST, Landmark::new(0.65, wrist_y));
        frame.set(RIGHT_WRIST, Landmark::new(0.35, wrist_y));
        FrameEvent::Detected(frame)
    }

    #[test]
    fn test_counts_reps_through_pipeline() {
        let mut ctx = SessionContext::start(ExerciseKind::DoubleArmRaise, TargetConfig::free());
        let out = ctx.process(&arms(true));
        assert_eq!(out.rep, Some(RepEvent { count: 1 }));
        assert_eq!(out.reason, ReasonCode::R002_REP_COUNTED);

        ctx.process(&arms(true));
        ctx.process(&arms(false));
        ctx.process(&arms(true));
        assert_eq!(ctx.rep_count(), 2);
        assert_eq!(ctx.progress().display(), "Reps: 2");
    }

    #[test]
    fn test_no_body_is_noop() {
        let mut ctx = SessionContext::start(ExerciseKind::DoubleArmRaise, TargetConfig::free());
        ctx.process(&arms(true));

        let out = ctx.process(&FrameEvent::NoBody);
        assert_eq!(out.reason, ReasonCode::R001_NO_BODY);
        assert_eq!(out.state, PositionState::InPosition);
        assert_eq!(out.signal, None);

        // Still held: no double count after the gap
        ctx.process(&arms(true));
        assert_eq!(ctx.rep_count(), 1);
    }

    #[test]
    fn test_frames_processed_skips_no_body_and_post_workout() {
        let mut ctx = SessionContext::start(ExerciseKind::DoubleArmRaise, TargetConfig::new(1, 1));
        ctx.process(&FrameEvent::NoBody);
        ctx.process(&arms(false));
        ctx.process(&FrameEvent::NoBody);
        assert_eq!(ctx.frames_processed(), 1);

        ctx.process(&arms(true));
        assert!(ctx.is_workout_complete());
        assert_eq!(ctx.frames_processed(), 2);

        ctx.process(&arms(false));
        ctx.process(&arms(true));
        assert_eq!(ctx.frames_processed(), 2);
    }

    #[test]
    fn test_workout_complete_stops_counting() {
        let mut ctx = SessionContext::start(ExerciseKind::DoubleArmRaise, TargetConfig::new(2, 1));
        ctx.process(&arms(true));
        ctx.process(&arms(false));
        let out = ctx.process(&arms(true));
        assert!(out.workout_complete);
        assert_eq!(out.reason, ReasonCode::R004_WORKOUT_COMPLETE);
        assert_eq!(out.set_event, Some(SetEvent::WorkoutComplete { total_reps: 2 }));

        ctx.process(&arms(false));
        let out = ctx.process(&arms(true));
        assert_eq!(out.reason, ReasonCode::R004_SESSION_COMPLETE);
        assert_eq!(ctx.rep_count(), 2);
    }
}

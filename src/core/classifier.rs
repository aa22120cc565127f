//! Exercise classifier: landmark frame → "target position reached"
//!
//! Each exercise maps to exactly one rule in `Rule::for_exercise`. Adding an
//! exercise is adding one arm there.
//!
//! | Exercise            | Rule                                              |
//! |---------------------|---------------------------------------------------|
//! | double arm raise    | both wrists above the shoulder midline            |
//! | left/right arm      | wrist above same-side shoulder                    |
//! | left/right leg      | ankle.y < knee.y × 1.05                           |
//! | body tilt           | \|head.x − shoulder_mid.x\| > 0.05                |
//! | squat               | knee angle < 140° reached, > 160° released        |

use crate::core::geometry::{horizontal_offset, is_above, joint_angle, midpoint};
use crate::types::landmark::{
    LEFT_ANKLE, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER, LEFT_WRIST, NOSE, RIGHT_ANKLE, RIGHT_HIP,
    RIGHT_KNEE, RIGHT_SHOULDER, RIGHT_WRIST,
};
use crate::types::{ExerciseKind, HoldCause, LandmarkFrame, PositionSignal};
use crate::{LEG_RAISE_TOLERANCE, SQUAT_ENTER_ANGLE_DEG, SQUAT_EXIT_ANGLE_DEG, TILT_OFFSET_THRESHOLD};

/// Geometric rule deciding whether a frame is in the target position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// Both wrists above the midpoint of the shoulders
    WristsAboveShoulderLine,
    /// One wrist above its shoulder
    WristAboveShoulder { wrist: usize, shoulder: usize },
    /// Ankle raised to (nearly) knee height
    AnkleAboveKnee { ankle: usize, knee: usize, tolerance: f64 },
    /// Head shifted sideways from the shoulder center
    HeadOffset { threshold: f64 },
    /// Average knee angle with a hysteresis band
    KneeAngleBand { enter_below: f64, exit_above: f64 },
}

/// Outcome of classifying one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub signal: PositionSignal,
    /// Average knee angle, for rules that measure it
    pub knee_angle: Option<f64>,
}

impl Evaluation {
    fn signal(signal: PositionSignal) -> Self {
        Self { signal, knee_angle: None }
    }

    fn hold(cause: HoldCause) -> Self {
        Self::signal(PositionSignal::Holding(cause))
    }
}

impl Rule {
    /// Rule registry: exercise → rule
    pub const fn for_exercise(kind: ExerciseKind) -> Self {
        match kind {
            ExerciseKind::DoubleArmRaise => Rule::WristsAboveShoulderLine,
            ExerciseKind::LeftArmRaise => {
                Rule::WristAboveShoulder { wrist: LEFT_WRIST, shoulder: LEFT_SHOULDER }
            }
            ExerciseKind::RightArmRaise => {
                Rule::WristAboveShoulder { wrist: RIGHT_WRIST, shoulder: RIGHT_SHOULDER }
            }
            ExerciseKind::LeftLegRaise => {
                Rule::AnkleAboveKnee { ankle: LEFT_ANKLE, knee: LEFT_KNEE, tolerance: LEG_RAISE_TOLERANCE }
            }
            ExerciseKind::RightLegRaise => {
                Rule::AnkleAboveKnee { ankle: RIGHT_ANKLE, knee: RIGHT_KNEE, tolerance: LEG_RAISE_TOLERANCE }
            }
            ExerciseKind::BodyTilt => Rule::HeadOffset { threshold: TILT_OFFSET_THRESHOLD },
            ExerciseKind::Squat => {
                Rule::KneeAngleBand { enter_below: SQUAT_ENTER_ANGLE_DEG, exit_above: SQUAT_EXIT_ANGLE_DEG }
            }
        }
    }

    /// Evaluate against a frame. Incomplete frames never reach the position.
    pub fn evaluate(&self, frame: &LandmarkFrame) -> Evaluation {
        if !frame.is_complete() {
            return Evaluation::hold(HoldCause::IncompleteFrame);
        }

        match *self {
            Rule::WristsAboveShoulderLine => {
                let points = (
                    y_of(frame, LEFT_WRIST),
                    y_of(frame, RIGHT_WRIST),
                    y_of(frame, LEFT_SHOULDER),
                    y_of(frame, RIGHT_SHOULDER),
                );
                match points {
                    (Some(lw), Some(rw), Some(ls), Some(rs)) => {
                        let shoulder_y = midpoint(ls, rs);
                        Evaluation::signal((is_above(lw, shoulder_y) && is_above(rw, shoulder_y)).into())
                    }
                    _ => Evaluation::hold(HoldCause::IncompleteFrame),
                }
            }

            Rule::WristAboveShoulder { wrist, shoulder } => {
                match (y_of(frame, wrist), y_of(frame, shoulder)) {
                    (Some(w), Some(s)) => Evaluation::signal(is_above(w, s).into()),
                    _ => Evaluation::hold(HoldCause::IncompleteFrame),
                }
            }

            Rule::AnkleAboveKnee { ankle, knee, tolerance } => {
                match (y_of(frame, ankle), y_of(frame, knee)) {
                    (Some(a), Some(k)) => Evaluation::signal(is_above(a, k * tolerance).into()),
                    _ => Evaluation::hold(HoldCause::IncompleteFrame),
                }
            }

            Rule::HeadOffset { threshold } => {
                let points = (
                    x_of(frame, NOSE),
                    x_of(frame, LEFT_SHOULDER),
                    x_of(frame, RIGHT_SHOULDER),
                );
                match points {
                    (Some(head), Some(ls), Some(rs)) => {
                        let offset = horizontal_offset(head, midpoint(ls, rs));
                        Evaluation::signal((offset > threshold).into())
                    }
                    _ => Evaluation::hold(HoldCause::IncompleteFrame),
                }
            }

            Rule::KneeAngleBand { enter_below, exit_above } => {
                let Some(angle) = average_knee_angle(frame) else {
                    return Evaluation::hold(HoldCause::DegenerateGeometry);
                };
                let signal = if angle < enter_below {
                    PositionSignal::Reached
                } else if angle > exit_above {
                    PositionSignal::Released
                } else {
                    PositionSignal::Holding(HoldCause::Deadband)
                };
                Evaluation { signal, knee_angle: Some(angle) }
            }
        }
    }
}

/// Average of left and right knee angles (hip-knee-ankle), in degrees
///
/// None if a landmark is missing or either angle is undefined.
pub fn average_knee_angle(frame: &LandmarkFrame) -> Option<f64> {
    let left = knee_angle(frame, LEFT_HIP, LEFT_KNEE, LEFT_ANKLE)?;
    let right = knee_angle(frame, RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE)?;
    Some(midpoint(left, right))
}

fn knee_angle(frame: &LandmarkFrame, hip: usize, knee: usize, ankle: usize) -> Option<f64> {
    joint_angle(
        frame.get(hip)?.xy(),
        frame.get(knee)?.xy(),
        frame.get(ankle)?.xy(),
    )
}

fn y_of(frame: &LandmarkFrame, index: usize) -> Option<f64> {
    frame.get(index).map(|l| l.y)
}

fn x_of(frame: &LandmarkFrame, index: usize) -> Option<f64> {
    frame.get(index).map(|l| l.x)
}

/// Classifier bound to one exercise
#[derive(Debug, Clone, Copy)]
pub struct ExerciseClassifier {
    kind: ExerciseKind,
    rule: Rule,
}

impl ExerciseClassifier {
    pub fn new(kind: ExerciseKind) -> Self {
        Self { kind, rule: Rule::for_exercise(kind) }
    }

    pub fn kind(&self) -> ExerciseKind {
        self.kind
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }

    /// Evaluate one frame
    pub fn evaluate(&self, frame: &LandmarkFrame) -> Evaluation {
        self.rule.evaluate(frame)
    }
}

/// Pure boolean contract: is the frame in the target position for `kind`?
pub fn classify(frame: &LandmarkFrame, kind: ExerciseKind) -> bool {
    classify_signal(frame, kind).is_reached()
}

/// Tri-state classification (reached / released / holding)
pub fn classify_signal(frame: &LandmarkFrame, kind: ExerciseKind) -> PositionSignal {
    ExerciseClassifier::new(kind).evaluate(frame).signal
}

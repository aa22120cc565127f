//! Exercise selection

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use crate::Error;

/// The closed set of supported exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExerciseKind {
    #[serde(alias = "doubleArm")]
    DoubleArmRaise,
    #[serde(alias = "leftArm")]
    LeftArmRaise,
    #[serde(alias = "rightArm")]
    RightArmRaise,
    #[serde(alias = "leftLeg")]
    LeftLegRaise,
    #[serde(alias = "rightLeg")]
    RightLegRaise,
    #[serde(alias = "tilt")]
    BodyTilt,
    #[serde(alias = "squats")]
    Squat,
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 7] = [
        ExerciseKind::DoubleArmRaise,
        ExerciseKind::LeftArmRaise,
        ExerciseKind::RightArmRaise,
        ExerciseKind::LeftLegRaise,
        ExerciseKind::RightLegRaise,
        ExerciseKind::BodyTilt,
        ExerciseKind::Squat,
    ];

    /// Stable identifier (as serialized)
    pub fn id(&self) -> &'static str {
        match self {
            ExerciseKind::DoubleArmRaise => "doubleArmRaise",
            ExerciseKind::LeftArmRaise => "leftArmRaise",
            ExerciseKind::RightArmRaise => "rightArmRaise",
            ExerciseKind::LeftLegRaise => "leftLegRaise",
            ExerciseKind::RightLegRaise => "rightLegRaise",
            ExerciseKind::BodyTilt => "bodyTilt",
            ExerciseKind::Squat => "squat",
        }
    }

    /// Short selector accepted from older clients
    fn short_id(&self) -> &'static str {
        match self {
            ExerciseKind::DoubleArmRaise => "doublearm",
            ExerciseKind::LeftArmRaise => "leftarm",
            ExerciseKind::RightArmRaise => "rightarm",
            ExerciseKind::LeftLegRaise => "leftleg",
            ExerciseKind::RightLegRaise => "rightleg",
            ExerciseKind::BodyTilt => "tilt",
            ExerciseKind::Squat => "squats",
        }
    }

    /// Human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            ExerciseKind::DoubleArmRaise => "Double Arm Raise",
            ExerciseKind::LeftArmRaise => "Left Arm Raise",
            ExerciseKind::RightArmRaise => "Right Arm Raise",
            ExerciseKind::LeftLegRaise => "Left Leg Raise",
            ExerciseKind::RightLegRaise => "Right Leg Raise",
            ExerciseKind::BodyTilt => "Body Tilt",
            ExerciseKind::Squat => "Squat",
        }
    }
}

impl std::fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for ExerciseKind {
    type Err = Error;

    /// Case-insensitive; ignores `-`, `_` and spaces
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        ExerciseKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.id().to_lowercase() == needle || kind.short_id() == needle)
            .ok_or_else(|| Error::UnknownExercise(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_and_short_names() {
        assert_eq!("squat".parse::<ExerciseKind>().unwrap(), ExerciseKind::Squat);
        assert_eq!("squats".parse::<ExerciseKind>().unwrap(), ExerciseKind::Squat);
        assert_eq!("doubleArm".parse::<ExerciseKind>().unwrap(), ExerciseKind::DoubleArmRaise);
        assert_eq!("left-leg-raise".parse::<ExerciseKind>().unwrap(), ExerciseKind::LeftLegRaise);
        assert_eq!("BODY_TILT".parse::<ExerciseKind>().unwrap(), ExerciseKind::BodyTilt);
        assert_eq!("tilt".parse::<ExerciseKind>().unwrap(), ExerciseKind::BodyTilt);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "jumpingJack".parse::<ExerciseKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownExercise(ref s) if s == "jumpingJack"));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ExerciseKind::RightArmRaise).unwrap();
        assert_eq!(json, "\"rightArmRaise\"");

        let kind: ExerciseKind = serde_json::from_str("\"squats\"").unwrap();
        assert_eq!(kind, ExerciseKind::Squat);
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for kind in ExerciseKind::ALL {
            assert_eq!(kind.to_string().parse::<ExerciseKind>().unwrap(), kind);
        }
    }
}

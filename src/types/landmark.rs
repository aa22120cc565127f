//! Pose landmarks and frame events

use serde::{Deserialize, Serialize};
use crate::MIN_LANDMARKS;

// ============================================================================
// LANDMARK INDICES (33-point pose model)
// ============================================================================

pub const NOSE: usize = 0;
pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_WRIST: usize = 15;
pub const RIGHT_WRIST: usize = 16;
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;
pub const LEFT_KNEE: usize = 25;
pub const RIGHT_KNEE: usize = 26;
pub const LEFT_ANKLE: usize = 27;
pub const RIGHT_ANKLE: usize = 28;

/// A single body keypoint in normalized frame coordinates
///
/// Smaller `y` is higher in the frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default)]
    pub visibility: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0, visibility: 1.0 }
    }

    /// 2D position, as used by the geometry helpers
    pub fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// One frame of landmarks indexed by anatomical position
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkFrame {
    landmarks: Vec<Landmark>,
}

impl LandmarkFrame {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// Get a landmark by index, if present
    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.landmarks.get(index)
    }

    /// Number of landmarks in the frame
    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// A complete frame carries the full 33-point model
    pub fn is_complete(&self) -> bool {
        self.landmarks.len() >= MIN_LANDMARKS
    }

    /// Replace one landmark (used when building frames by hand)
    pub fn set(&mut self, index: usize, landmark: Landmark) {
        if index >= self.landmarks.len() {
            self.landmarks.resize(index + 1, Landmark::default());
        }
        self.landmarks[index] = landmark;
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }
}

/// What the landmark provider delivered for one frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    /// A body was detected
    Detected(LandmarkFrame),
    /// No body in view; a valid, no-op frame
    NoBody,
}

impl FrameEvent {
    pub fn frame(&self) -> Option<&LandmarkFrame> {
        match self {
            FrameEvent::Detected(frame) => Some(frame),
            FrameEvent::NoBody => None,
        }
    }
}

impl From<Option<LandmarkFrame>> for FrameEvent {
    fn from(frame: Option<LandmarkFrame>) -> Self {
        match frame {
            Some(frame) => FrameEvent::Detected(frame),
            None => FrameEvent::NoBody,
        }
    }
}

/// Wire shape of a frame: `{"landmarks": [...]}`, null or missing = no body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FramePayload {
    #[serde(default)]
    pub landmarks: Option<LandmarkFrame>,
}

impl From<FramePayload> for FrameEvent {
    fn from(payload: FramePayload) -> Self {
        payload.landmarks.into()
    }
}

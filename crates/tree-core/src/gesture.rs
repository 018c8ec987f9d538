//! One-hand posture classifier.
//!
//! Landmarks follow the 21-point hand model: 0 is the wrist, 4 the thumb tip,
//! 8/12/16/20 the finger tips and 9 the base of the middle finger. Distances
//! are normalized by the wrist-to-palm length so the classifier does not care
//! how far the hand is from the camera.

use crate::error::TreeError;
use crate::state::{Mode, SceneState};
use glam::{Vec2, Vec3};

pub const LANDMARK_COUNT: usize = 21;

const WRIST: usize = 0;
const THUMB_TIP: usize = 4;
const INDEX_TIP: usize = 8;
const PALM_BASE: usize = 9;
const FINGER_TIPS: [usize; 4] = [8, 12, 16, 20];

pub const STATUS_NO_GESTURE: &str = "Tracking, no gesture";
pub const STATUS_NO_HAND: &str = "Hand not found";

/// Empirically chosen cut-offs. Tune per camera; nothing depends on the exact values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureThresholds {
    /// Below this average finger extension the hand counts as a fist.
    pub fist_extension: f32,
    /// Above this average finger extension the hand counts as open.
    pub open_extension: f32,
    /// Below this thumb-to-index distance the hand counts as pinching.
    pub pinch: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            fist_extension: 1.35,
            open_extension: 1.7,
            pinch: 0.28,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    Fist,
    Open,
    Pinch,
}

impl Gesture {
    pub fn mode(self) -> Mode {
        match self {
            Gesture::Fist => Mode::Assembled,
            Gesture::Open => Mode::Scattered,
            Gesture::Pinch => Mode::Focused,
        }
    }

    pub fn status(self) -> &'static str {
        match self {
            Gesture::Fist => "Fist: Assemble",
            Gesture::Open => "Open: Scatter",
            Gesture::Pinch => "Pinch: Focus",
        }
    }
}

/// One frame's worth of hand landmarks in normalized image space.
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    points: [Vec3; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Vec3; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build from `x, y, z` triples as delivered by the tracker.
    pub fn from_flat(flat: &[f32]) -> Result<Self, TreeError> {
        if flat.len() != LANDMARK_COUNT * 3 {
            return Err(TreeError::InvalidLandmarks(flat.len() / 3));
        }
        let mut points = [Vec3::ZERO; LANDMARK_COUNT];
        for (p, xyz) in points.iter_mut().zip(flat.chunks_exact(3)) {
            *p = Vec3::new(xyz[0], xyz[1], xyz[2]);
        }
        Ok(Self { points })
    }

    pub fn point(&self, index: usize) -> Vec3 {
        self.points[index]
    }

    /// Mirrored screen pointer in [-1, 1]^2 taken from the palm base.
    pub fn pointer(&self) -> Vec2 {
        let p = self.points[PALM_BASE];
        Vec2::new(-(p.x - 0.5) * 2.0, -(p.y - 0.5) * 2.0)
    }

    pub fn hand_scale(&self) -> f32 {
        self.points[WRIST].distance(self.points[PALM_BASE])
    }

    /// Average fingertip distance from the wrist, in palm lengths.
    pub fn extension_ratio(&self) -> f32 {
        let wrist = self.points[WRIST];
        let sum: f32 = FINGER_TIPS
            .iter()
            .map(|&tip| wrist.distance(self.points[tip]))
            .sum();
        sum / FINGER_TIPS.len() as f32 / self.hand_scale()
    }

    /// Thumb-to-index distance, in palm lengths.
    pub fn pinch_ratio(&self) -> f32 {
        self.points[THUMB_TIP].distance(self.points[INDEX_TIP]) / self.hand_scale()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GestureReading {
    /// `None` when no hand was detected.
    pub pointer: Option<Vec2>,
    pub gesture: Option<Gesture>,
    pub status: &'static str,
}

impl GestureReading {
    pub fn no_hand() -> Self {
        Self {
            pointer: None,
            gesture: None,
            status: STATUS_NO_HAND,
        }
    }
}

/// Classify a single hand; first matching rule wins (fist, open, pinch).
pub fn classify(hand: &HandLandmarks, thresholds: &GestureThresholds) -> GestureReading {
    let pointer = Some(hand.pointer());
    if hand.hand_scale() <= f32::EPSILON {
        return GestureReading {
            pointer,
            gesture: None,
            status: STATUS_NO_GESTURE,
        };
    }
    let extension = hand.extension_ratio();
    let gesture = if extension < thresholds.fist_extension {
        Some(Gesture::Fist)
    } else if extension > thresholds.open_extension {
        Some(Gesture::Open)
    } else if hand.pinch_ratio() < thresholds.pinch {
        Some(Gesture::Pinch)
    } else {
        None
    };
    GestureReading {
        pointer,
        gesture,
        status: gesture.map_or(STATUS_NO_GESTURE, Gesture::status),
    }
}

#[derive(Clone, Debug, Default)]
pub struct GestureClassifier {
    pub thresholds: GestureThresholds,
}

impl GestureClassifier {
    /// Classify one tracker frame (or a miss) and fold it into the shared
    /// state. Returns whether the mode changed.
    pub fn observe(&self, hand: Option<&HandLandmarks>, state: &mut SceneState) -> bool {
        let reading = match hand {
            Some(h) => classify(h, &self.thresholds),
            None => GestureReading::no_hand(),
        };
        apply_reading(&reading, state)
    }
}

/// Write a reading into the shared state. The mode is only touched on an
/// actual transition.
pub fn apply_reading(reading: &GestureReading, state: &mut SceneState) -> bool {
    if let Some(p) = reading.pointer {
        state.hand_pointer = p;
    }
    if state.gesture_status != reading.status {
        state.gesture_status = reading.status.to_string();
    }
    match reading.gesture {
        Some(g) if g.mode() != state.mode() => {
            log::info!("[gesture] {}", g.status());
            state.set_mode(g.mode())
        }
        _ => false,
    }
}

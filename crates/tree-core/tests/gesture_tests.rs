// Host-side tests for the hand gesture classifier and how readings fold into
// the shared scene state.

use glam::{Vec2, Vec3};
use tree_core::*;

const WRIST: Vec3 = Vec3::new(0.5, 0.8, 0.0);
const PALM: Vec3 = Vec3::new(0.5, 0.6, 0.0);

/// A hand with a 0.2 palm length, all fingertips `tip_dist` above the wrist
/// and the thumb tip `thumb_gap` to the side of the index tip.
fn hand(tip_dist: f32, thumb_gap: f32) -> HandLandmarks {
    let mut points = [PALM; LANDMARK_COUNT];
    points[0] = WRIST;
    points[9] = PALM;
    let tip = WRIST - Vec3::new(0.0, tip_dist, 0.0);
    for i in [8, 12, 16, 20] {
        points[i] = tip;
    }
    points[4] = tip + Vec3::new(thumb_gap, 0.0, 0.0);
    HandLandmarks::new(points)
}

fn fist() -> HandLandmarks {
    hand(0.2, 0.15)
}

fn open() -> HandLandmarks {
    hand(0.4, 0.15)
}

fn pinch() -> HandLandmarks {
    hand(0.3, 0.04)
}

fn neutral() -> HandLandmarks {
    hand(0.3, 0.2)
}

#[test]
fn ratios_are_normalized_by_palm_length() {
    let h = hand(0.4, 0.04);
    assert!((h.hand_scale() - 0.2).abs() < 1e-5);
    assert!((h.extension_ratio() - 2.0).abs() < 1e-4);
    assert!((h.pinch_ratio() - 0.2).abs() < 1e-4);
}

#[test]
fn classifies_the_three_postures() {
    let t = GestureThresholds::default();
    assert_eq!(classify(&fist(), &t).gesture, Some(Gesture::Fist));
    assert_eq!(classify(&open(), &t).gesture, Some(Gesture::Open));
    assert_eq!(classify(&pinch(), &t).gesture, Some(Gesture::Pinch));

    let idle = classify(&neutral(), &t);
    assert_eq!(idle.gesture, None);
    assert_eq!(idle.status, STATUS_NO_GESTURE);
}

#[test]
fn fist_wins_over_pinch() {
    // curled fingers with the thumb touching the index tip
    let reading = classify(&hand(0.2, 0.02), &GestureThresholds::default());
    assert_eq!(reading.gesture, Some(Gesture::Fist));
    assert_eq!(reading.status, "Fist: Assemble");
}

#[test]
fn thresholds_are_configurable() {
    let strict = GestureThresholds {
        fist_extension: 0.5,
        open_extension: 3.0,
        pinch: 0.1,
    };
    assert_eq!(classify(&fist(), &strict).gesture, None);
    assert_eq!(classify(&open(), &strict).gesture, None);
    assert_eq!(classify(&pinch(), &strict).gesture, None);
}

#[test]
fn pointer_is_mirrored_palm_position() {
    let mut points = [Vec3::ZERO; LANDMARK_COUNT];
    points[0] = Vec3::new(0.25, 0.95, 0.0);
    points[9] = Vec3::new(0.25, 0.75, 0.0);
    let reading = classify(&HandLandmarks::new(points), &GestureThresholds::default());
    let p = reading.pointer.unwrap();
    assert!((p - Vec2::new(0.5, -0.5)).length() < 1e-5, "pointer {p:?}");
}

#[test]
fn degenerate_hand_yields_no_gesture() {
    let reading = classify(&HandLandmarks::new([PALM; LANDMARK_COUNT]), &GestureThresholds::default());
    assert_eq!(reading.gesture, None);
    assert_eq!(reading.status, STATUS_NO_GESTURE);
}

#[test]
fn flat_landmarks_must_hold_21_points() {
    let flat: Vec<f32> = (0..63).map(|i| i as f32 * 0.01).collect();
    let h = HandLandmarks::from_flat(&flat).unwrap();
    assert!((h.point(20) - Vec3::new(0.60, 0.61, 0.62)).length() < 1e-5);

    let short = vec![0.0; 60];
    assert_eq!(HandLandmarks::from_flat(&short), Err(TreeError::InvalidLandmarks(20)));
}

#[test]
fn open_hand_scatters_and_reports_status() {
    let classifier = GestureClassifier::default();
    let mut state = SceneState::default();
    assert!(classifier.observe(Some(&open()), &mut state));
    assert_eq!(state.mode(), Mode::Scattered);
    assert_eq!(state.gesture_status, "Open: Scatter");
    assert!((state.hand_pointer - Vec2::new(0.0, -0.2)).length() < 1e-5);
}

#[test]
fn fist_reassembles_from_scatter() {
    let classifier = GestureClassifier::default();
    let mut state = SceneState::default();
    state.set_mode(Mode::Scattered);
    assert!(classifier.observe(Some(&fist()), &mut state));
    assert_eq!(state.mode(), Mode::Assembled);
}

#[test]
fn pinch_enters_focus_and_queues_selection() {
    let classifier = GestureClassifier::default();
    let mut state = SceneState::default();
    assert!(classifier.observe(Some(&pinch()), &mut state));
    assert_eq!(state.mode(), Mode::Focused);
    assert!(state.take_focus_request());
    assert_eq!(state.focused(), None);
}

#[test]
fn repeated_reading_is_a_no_op() {
    let classifier = GestureClassifier::default();
    let mut state = SceneState::default();
    assert!(classifier.observe(Some(&pinch()), &mut state));
    state.set_focused(Some(3));
    assert!(!classifier.observe(Some(&pinch()), &mut state));
    assert_eq!(state.mode(), Mode::Focused);
    assert_eq!(state.focused(), Some(3));
}

#[test]
fn leaving_focus_by_gesture_clears_the_focused_placard() {
    let classifier = GestureClassifier::default();
    let mut state = SceneState::default();
    state.set_mode(Mode::Focused);
    state.set_focused(Some(2));
    assert!(classifier.observe(Some(&open()), &mut state));
    assert_eq!(state.focused(), None);
}

#[test]
fn missing_hand_keeps_mode_and_pointer() {
    let classifier = GestureClassifier::default();
    let mut state = SceneState::default();
    classifier.observe(Some(&open()), &mut state);
    let pointer = state.hand_pointer;

    assert!(!classifier.observe(None, &mut state));
    assert_eq!(state.mode(), Mode::Scattered);
    assert_eq!(state.gesture_status, STATUS_NO_HAND);
    assert_eq!(state.hand_pointer, pointer);
}

#[test]
fn idle_hand_moves_pointer_without_changing_mode() {
    let classifier = GestureClassifier::default();
    let mut state = SceneState::default();
    state.set_mode(Mode::Scattered);
    assert!(!classifier.observe(Some(&neutral()), &mut state));
    assert_eq!(state.mode(), Mode::Scattered);
    assert_eq!(state.gesture_status, STATUS_NO_GESTURE);
}

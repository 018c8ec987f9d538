// Host-side tests for pure input functions.
// The main crate is wasm-only, so the module is included directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;
use tree_core::Mode;

#[test]
fn digit_keys_pick_modes() {
    assert_eq!(key_action("1"), Some(KeyAction::SetMode(Mode::Assembled)));
    assert_eq!(key_action("2"), Some(KeyAction::SetMode(Mode::Scattered)));
    assert_eq!(key_action("3"), Some(KeyAction::SetMode(Mode::Focused)));
    assert_eq!(key_action("4"), None);
}

#[test]
fn letter_keys_ignore_case() {
    for (lower, upper, action) in [
        ("g", "G", KeyAction::ToggleGestures),
        ("m", "M", KeyAction::ToggleMusic),
        ("h", "H", KeyAction::ToggleUi),
    ] {
        assert_eq!(key_action(lower), Some(action));
        assert_eq!(key_action(upper), Some(action));
    }
    assert_eq!(key_action("Enter"), Some(KeyAction::Fullscreen));
    assert_eq!(key_action("x"), None);
    assert_eq!(key_action(""), None);
}

#[test]
fn short_press_is_a_click() {
    let mut d = DragState::default();
    d.begin(Vec2::new(100.0, 100.0));
    assert!(d.move_to(Vec2::new(102.0, 101.0)).is_some());
    assert!(d.end(5.0));
    assert!(!d.active);
}

#[test]
fn long_drag_is_not_a_click() {
    let mut d = DragState::default();
    d.begin(Vec2::ZERO);
    let delta = d.move_to(Vec2::new(30.0, 40.0)).unwrap();
    assert_eq!(delta, Vec2::new(30.0, 40.0));
    assert!((d.travelled - 50.0).abs() < 1e-4);
    assert!(!d.end(5.0));
}

#[test]
fn travel_accumulates_even_when_returning_to_start() {
    let mut d = DragState::default();
    d.begin(Vec2::ZERO);
    d.move_to(Vec2::new(10.0, 0.0));
    d.move_to(Vec2::ZERO);
    assert!((d.travelled - 20.0).abs() < 1e-4);
    assert!(!d.end(5.0));
}

#[test]
fn moves_without_press_are_ignored() {
    let mut d = DragState::default();
    assert!(d.move_to(Vec2::new(10.0, 10.0)).is_none());
    assert!(!d.end(5.0));
}

#[test]
fn ndc_corners_and_centre() {
    let size = Vec2::new(800.0, 600.0);
    assert_eq!(px_to_ndc(Vec2::ZERO, size), Vec2::new(-1.0, 1.0));
    assert_eq!(px_to_ndc(size, size), Vec2::new(1.0, -1.0));
    assert_eq!(px_to_ndc(Vec2::new(400.0, 300.0), size), Vec2::ZERO);
}

#[test]
fn ndc_clamps_outside_canvas_and_handles_empty_size() {
    let size = Vec2::new(100.0, 100.0);
    assert_eq!(px_to_ndc(Vec2::new(-50.0, 250.0), size), Vec2::new(-1.0, -1.0));
    assert_eq!(px_to_ndc(Vec2::new(10.0, 10.0), Vec2::ZERO), Vec2::ZERO);
}

#[test]
fn aspect_never_divides_by_zero() {
    assert!((aspect(1920, 1080) - 16.0 / 9.0).abs() < 1e-6);
    assert_eq!(aspect(0, 0), 1.0);
    assert_eq!(aspect(200, 0), 200.0);
}

#[test]
fn cursor_turns_to_a_pointer_over_placards() {
    assert_eq!(hover_cursor(Some(0)), "pointer");
    assert_eq!(hover_cursor(Some(7)), "pointer");
    assert_eq!(hover_cursor(None), "auto");
}

#[test]
fn wheel_units_normalise_to_pixels() {
    assert_eq!(wheel_pixels(3.0, 0), 3.0);
    assert_eq!(wheel_pixels(3.0, 1), 48.0);
    assert_eq!(wheel_pixels(-1.0, 2), -400.0);
}

// Host-side checks on front-end tuning constants.
// The main crate is wasm-only, so the module is included directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn post_chain_values_are_sane() {
    assert!(BLOOM_THRESHOLD > 0.0 && BLOOM_THRESHOLD < 1.0);
    assert!(BLOOM_INTENSITY > 0.0);
    assert!(TONE_EXPOSURE > 0.0);
    assert!(VIGNETTE_OFFSET >= 0.0 && VIGNETTE_DARKNESS > 0.0);
    assert!(NOISE_OPACITY >= 0.0 && NOISE_OPACITY < 0.2);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn lighting_is_dim_ambient_with_bright_point() {
    assert!(AMBIENT_INTENSITY > 0.0 && AMBIENT_INTENSITY < 1.0);
    assert!(POINT_LIGHT_INTENSITY > AMBIENT_INTENSITY);
    // star glows harder than the ornaments
    assert!(STAR_EMISSIVE > SWARM_EMISSIVE);
    assert!(CLEAR_RGB.iter().all(|c| *c >= 0.0 && *c < 0.01));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn capture_and_photo_limits() {
    assert!(CAPTURE_WIDTH > CAPTURE_HEIGHT);
    assert!(CAPTURE_FPS > 0.0);
    assert!(PHOTO_MAX_SIDE.is_power_of_two());
    assert!(CLICK_SLOP_PX > 0.0);
    assert!(NOTICE_MS > 0);
}

#[test]
fn hand_assets_share_one_tracker_version() {
    assert!(HANDS_WASM_ROOT.contains("tasks-vision@0.10.3"));
    assert!(HANDS_MODEL_URL.ends_with(".task"));
    assert_ne!(HINT_GESTURES, HINT_BUTTONS);
}

// Host-side tests for the scene composer, shared state and the small state
// machines around it (photo intake, music playback).

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tree_core::constants::*;
use tree_core::*;

const DT: f32 = 1.0 / 60.0;

fn small_scene() -> Scene {
    let config = SceneConfig {
        particle_count: 50,
        placard_count: 5,
        dust_count: 10,
    };
    Scene::new(config, &mut StdRng::seed_from_u64(99))
}

#[test]
fn set_mode_reports_transitions() {
    let mut state = SceneState::default();
    assert_eq!(state.mode(), Mode::Assembled);
    assert!(!state.set_mode(Mode::Assembled));
    assert!(state.set_mode(Mode::Focused));
    assert!(state.take_focus_request());
    assert!(!state.take_focus_request());
}

#[test]
fn focus_is_cleared_only_when_leaving_focused() {
    let mut state = SceneState::default();
    state.set_mode(Mode::Focused);
    state.set_focused(Some(1));
    assert!(!state.set_mode(Mode::Focused));
    assert_eq!(state.focused(), Some(1));

    assert!(state.set_mode(Mode::Scattered));
    assert_eq!(state.focused(), None);
    assert!(!state.take_focus_request());
}

#[test]
fn entering_focus_with_a_clicked_placard_skips_selection() {
    let mut state = SceneState::default();
    state.toggle_focus(3);
    assert!(state.set_mode(Mode::Focused));
    assert!(!state.take_focus_request());
    assert_eq!(state.focused(), Some(3));

    state.toggle_focus(3);
    assert_eq!(state.focused(), None);
}

#[test]
fn modes_display_their_button_labels() {
    let labels: Vec<String> = Mode::ALL.iter().map(|m| m.to_string()).collect();
    assert_eq!(labels, ["TREE", "SCATTER", "FOCUS"]);
}

#[test]
fn group_spins_only_outside_focus() {
    let mut rig = GroupRig::default();
    rig.update(Mode::Assembled, Vec2::ZERO, 1.0);
    assert!((rig.spin() - AMBIENT_SPIN_RATE).abs() < 1e-6);
    rig.update(Mode::Scattered, Vec2::ZERO, 1.0);
    assert!((rig.spin() - 2.0 * AMBIENT_SPIN_RATE).abs() < 1e-6);
    rig.update(Mode::Focused, Vec2::ZERO, 1.0);
    assert!((rig.spin() - 2.0 * AMBIENT_SPIN_RATE).abs() < 1e-6);
}

#[test]
fn group_follows_pointer_with_damping_in_focus() {
    let pointer = Vec2::new(1.0, 0.5);
    let mut rig = GroupRig::default();
    for _ in 0..600 {
        rig.update(Mode::Assembled, pointer, DT);
    }
    assert!((rig.rotation.x + 0.5 * POINTER_PITCH).abs() < 1e-3);

    for _ in 0..600 {
        rig.update(Mode::Focused, pointer, DT);
    }
    assert!((rig.rotation.x + 0.5 * POINTER_PITCH * FOCUS_POINTER_DAMPING).abs() < 1e-3);
    assert!((rig.rotation.y - POINTER_YAW * FOCUS_POINTER_DAMPING).abs() < 1e-3);
}

#[test]
fn orbit_camera_starts_at_the_configured_eye() {
    let orbit = OrbitCamera::default();
    assert!(orbit.eye().distance(CAMERA_EYE) < 1e-3);
    let camera = orbit.camera(16.0 / 9.0);
    assert!(camera.forward().dot((Vec3::ZERO - CAMERA_EYE).normalize()) > 0.9999);
}

#[test]
fn orbit_camera_clamps_polar_angle() {
    let mut orbit = OrbitCamera::default();
    orbit.rotate(0.0, -10_000.0, 800.0);
    assert!((orbit.phi - CAMERA_MAX_POLAR).abs() < 1e-6);
    orbit.rotate(0.0, 10_000.0, 800.0);
    assert!(orbit.phi > 0.0 && orbit.phi < 0.01);
    assert!(orbit.eye().y > 0.0);
}

#[test]
fn orbit_zoom_is_clamped_and_ignored_in_focus() {
    let mut orbit = OrbitCamera::default();
    let start = orbit.radius;
    assert!(!orbit.zoom(500.0, Mode::Focused));
    assert_eq!(orbit.radius, start);

    assert!(orbit.zoom(100.0, Mode::Assembled));
    assert!(orbit.radius > start);
    orbit.zoom(1.0e6, Mode::Scattered);
    assert_eq!(orbit.radius, CAMERA_MAX_DISTANCE);
    orbit.zoom(-1.0e6, Mode::Assembled);
    assert_eq!(orbit.radius, CAMERA_MIN_DISTANCE);
}

#[test]
fn star_shrinks_away_outside_the_tree() {
    let mut star = TreeTopStar::default();
    let mut t = 0.0;
    for _ in 0..120 {
        t += DT;
        star.update(Mode::Scattered, DT, t);
    }
    assert!(star.scale < 1e-3);
    for _ in 0..120 {
        t += DT;
        star.update(Mode::Assembled, DT, t);
    }
    assert!((star.scale - 1.0).abs() < 1e-3);

    star.update(Mode::Assembled, 0.0, 0.0);
    assert!((star.position.y - (TREE_HEIGHT / 2.0 + STAR_LIFT)).abs() < 1e-6);
}

#[test]
fn star_light_fades_with_the_star() {
    let mut star = TreeTopStar::default();
    let group = glam::Mat4::from_rotation_x(0.3);
    let full = star.light(group);
    assert_eq!(full.intensity, STAR_LIGHT_INTENSITY);
    assert_eq!(full.range, STAR_LIGHT_RANGE);
    assert!(full.position.distance(group.transform_point3(star.position)) < 1e-6);

    let mut t = 0.0;
    for _ in 0..30 {
        t += DT;
        star.update(Mode::Scattered, DT, t);
        let light = star.light(group);
        assert!((light.intensity - STAR_LIGHT_INTENSITY * star.scale).abs() < 1e-5);
    }
    assert!(star.light(group).intensity < full.intensity);
    for _ in 0..120 {
        t += DT;
        star.update(Mode::Scattered, DT, t);
    }
    assert!(star.light(group).intensity < 1e-2);
}

#[test]
fn dust_instances_cover_every_mote() {
    let mut dust = DustField::new(DUST_COUNT, &mut StdRng::seed_from_u64(5));
    let mut out = Vec::new();
    for _ in 0..30 {
        dust.update(DT);
    }
    dust.write_instances(&mut out);
    assert_eq!(out.len(), DUST_COUNT);
    for instance in &out {
        let m = glam::Mat4::from_cols_array_2d(&instance.model);
        let s = m.x_axis.truncate().length();
        assert!((0.05 - 1e-4..=0.15 + 1e-4).contains(&s), "scale {s}");
        assert_eq!(instance.color, DUST_COLOR);
    }
}

#[test]
fn tick_fills_every_batch() {
    let mut scene = small_scene();
    let mut state = SceneState::default();
    let out = scene.tick(&mut state, DT, 0.0, 1.5);
    assert_eq!(out.swarm.spheres.len(), 30);
    assert_eq!(out.swarm.cubes.len(), 20);
    assert_eq!(out.placards.len(), 5);
    assert_eq!(out.dust.len(), 10);
    assert!(out.eye.distance(CAMERA_EYE) < 1e-3);
    let star_at = glam::Mat4::from_cols_array_2d(&out.star.model).w_axis.truncate();
    assert!(out.star_light.position.distance(star_at) < 1e-4);
}

#[test]
fn tick_resolves_a_pending_focus_request() {
    let mut scene = small_scene();
    let mut state = SceneState::default();
    state.hand_pointer = Vec2::new(0.3, -0.2);
    state.set_mode(Mode::Focused);
    scene.tick(&mut state, DT, 0.0, 1.5);

    assert!(!state.take_focus_request());
    let expected = scene.placards().select_focus_from_camera(
        &scene.orbit.camera(1.5),
        scene.rig.matrix(),
        state.hand_pointer,
    );
    assert!(expected.is_some());
    assert_eq!(state.focused(), expected);
}

#[test]
fn tick_keeps_an_existing_focus() {
    let mut scene = small_scene();
    let mut state = SceneState::default();
    state.toggle_focus(4);
    state.set_mode(Mode::Focused);
    scene.tick(&mut state, DT, 0.0, 1.5);
    assert_eq!(state.focused(), Some(4));
}

#[test]
fn clicking_a_projected_placard_hits_something() {
    let mut scene = small_scene();
    let mut state = SceneState::default();
    scene.tick(&mut state, DT, 0.0, 1.0);
    let camera = scene.orbit.camera(1.0);
    let group = scene.rig.matrix();
    for p in scene.placards().placards() {
        let ndc = camera.project(group.transform_point3(p.position));
        assert!(scene.pick(ndc, 1.0).is_some(), "missed placard at {:?}", p.position);
    }
    assert_eq!(scene.pick(Vec2::new(0.99, 0.99), 1.0), None);
}

#[test]
fn photo_queue_keeps_the_first_ten() {
    let mut queue = PhotoQueue::default();
    let accepted = queue.extend((0..15).map(|i| format!("photo-{i}")));
    assert_eq!(accepted.len(), MAX_PHOTOS);
    for (n, (index, name)) in accepted.iter().enumerate() {
        assert_eq!(*index, n);
        assert_eq!(name, &format!("photo-{n}"));
    }
    assert!(queue.is_full());
    assert!(queue.extend(["late".to_string()]).is_empty());
    assert_eq!(queue.len(), MAX_PHOTOS);
}

#[test]
fn photo_queue_appends_across_uploads() {
    let mut queue = PhotoQueue::default();
    queue.extend([1, 2, 3]);
    let accepted = queue.extend(4..20);
    assert_eq!(accepted.first(), Some(&(3, 4)));
    assert_eq!(accepted.last(), Some(&(9, 10)));
    assert_eq!(queue.remaining(), 0);
}

#[test]
fn photos_are_cropped_to_a_centred_square() {
    assert_eq!(centre_crop(400, 300, 2048), (50, 0, 300));
    assert_eq!(centre_crop(300, 400, 2048), (0, 50, 300));
    assert_eq!(centre_crop(5000, 4000, 2048), (1476, 976, 2048));
    assert_eq!(centre_crop(0, 0, 2048), (0, 0, 1));
}

#[test]
fn playback_state_transitions() {
    use PlayTrigger::*;
    let s = PlaybackState::default();
    assert_eq!(s.label(), "Play");

    // autoplay refusal is not an error
    assert_eq!(s.after_play(Autoplay, false), PlaybackState::Paused);
    let playing = s.after_play(Autoplay, true);
    assert!(playing.is_playing());
    assert_eq!(playing.label(), "Pause");
    assert_eq!(playing.after_pause(), PlaybackState::Paused);

    let failed = s.after_play(Manual, false);
    assert_eq!(failed, PlaybackState::LoadError);
    assert_eq!(failed.label(), "Error");
    assert_eq!(failed.after_play(Autoplay, false), PlaybackState::LoadError);
    assert_eq!(failed.after_pause(), PlaybackState::LoadError);
    assert_eq!(failed.after_play(Manual, true), PlaybackState::Playing);

    assert_eq!(playing.after_media_error(), PlaybackState::LoadError);
}

#[test]
fn errors_carry_a_user_notice() {
    let denied = TreeError::PermissionDenied("NotAllowedError".into());
    assert_eq!(denied.user_notice(), "Please check camera permissions.");
    let asset = TreeError::asset("hand model", "404");
    assert_eq!(asset.to_string(), "failed to load hand model: 404");
}

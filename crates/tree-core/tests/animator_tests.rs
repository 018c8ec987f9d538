// Host-side tests for the particle swarm animator.

use glam::{Mat4, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tree_core::constants::*;
use tree_core::*;

fn point(position: Vec3, scale: f32, color: Rgb) -> Point3D {
    Point3D {
        position,
        color,
        scale,
    }
}

/// Ten points on a line for the cone and ten far away for the shell.
fn line_animator() -> ParticleAnimator {
    let cone = (0..10)
        .map(|i| point(Vec3::new(i as f32, 0.0, 0.0), 0.5, [1.0, 0.5, 0.0]))
        .collect();
    let shell = (0..10)
        .map(|i| point(Vec3::new(0.0, 15.0, i as f32), 0.4, [0.0, 0.0, 1.0]))
        .collect();
    ParticleAnimator::from_parts(cone, shell, vec![Vec2::ZERO; 10])
}

fn max_distance(a: &[Vec3], targets: &[Point3D]) -> f32 {
    a.iter()
        .zip(targets)
        .map(|(p, t)| p.distance(t.position))
        .fold(0.0, f32::max)
}

fn scale_of(instance: &InstanceRaw) -> f32 {
    Mat4::from_cols_array_2d(&instance.model).x_axis.truncate().length()
}

#[test]
fn splits_into_spheres_and_cubes() {
    let animator = ParticleAnimator::new(PARTICLE_COUNT, &mut StdRng::seed_from_u64(7));
    assert_eq!(animator.len(), 4000);
    assert_eq!(animator.sphere_count(), 2400);
    assert_eq!(animator.cube_count(), 1600);
    let batches = animator.batches();
    assert_eq!(batches.spheres.len(), 2400);
    assert_eq!(batches.cubes.len(), 1600);
}

#[test]
fn starts_assembled_on_the_cone() {
    let animator = line_animator();
    assert_eq!(max_distance(animator.positions(), animator.cone()), 0.0);
}

#[test]
fn converges_to_shell_then_back_to_cone() {
    let mut animator = line_animator();
    let mut batches = animator.batches();
    let dt = 1.0 / 60.0;
    let mut t = 0.0;
    for _ in 0..300 {
        t += dt;
        animator.update(Mode::Focused, dt, t, Some(&mut batches));
    }
    assert!(max_distance(animator.positions(), animator.shell()) < 0.01);

    for _ in 0..180 {
        t += dt;
        animator.update(Mode::Assembled, dt, t, Some(&mut batches));
    }
    assert!(max_distance(animator.positions(), animator.cone()) < 0.01);
}

#[test]
fn scatter_target_includes_the_wobble() {
    let mut animator = line_animator();
    let mut batches = animator.batches();
    let t = 3.0;
    for _ in 0..40 {
        animator.update(Mode::Scattered, 0.5, t, Some(&mut batches));
    }
    for (i, p) in animator.positions().iter().enumerate() {
        let target = animator.shell()[i].position + scatter_wobble(i, t);
        assert!(p.distance(target) < 1e-3);
    }
}

#[test]
fn blend_is_frame_rate_independent() {
    let mut fine = line_animator();
    let mut coarse = line_animator();
    let mut fine_batches = fine.batches();
    let mut coarse_batches = coarse.batches();
    for _ in 0..60 {
        fine.update(Mode::Focused, 1.0 / 60.0, 0.0, Some(&mut fine_batches));
    }
    coarse.update(Mode::Focused, 1.0, 0.0, Some(&mut coarse_batches));
    for (a, b) in fine.positions().iter().zip(coarse.positions()) {
        assert!(a.distance(*b) < 1e-3, "{a:?} vs {b:?}");
    }
}

#[test]
fn missing_batches_leave_state_untouched() {
    let mut animator = line_animator();
    let before = animator.positions().to_vec();
    animator.update(Mode::Scattered, 1.0, 1.0, None);
    assert_eq!(animator.positions(), &before[..]);
}

#[test]
fn instances_are_written_by_index() {
    let mut animator = ParticleAnimator::new(20, &mut StdRng::seed_from_u64(3));
    let mut batches = animator.batches();
    animator.update(Mode::Assembled, 0.016, 0.5, Some(&mut batches));
    let spheres = animator.sphere_count();
    for (i, p) in animator.positions().iter().enumerate() {
        let instance = if i < spheres {
            &batches.spheres[i]
        } else {
            &batches.cubes[i - spheres]
        };
        assert!(instance.translation().distance(*p) < 1e-4);
        let c = animator.cone()[i].color;
        assert_eq!(instance.color, [c[0], c[1], c[2], 1.0]);
    }
}

#[test]
fn focus_shrinks_the_swarm() {
    let mut assembled = line_animator();
    let mut focused = line_animator();
    let mut a = assembled.batches();
    let mut f = focused.batches();
    assembled.update(Mode::Assembled, 0.0, 0.0, Some(&mut a));
    focused.update(Mode::Focused, 0.0, 0.0, Some(&mut f));

    // same breathing phase at t = 0; only the focus factor and target scale differ
    for i in 0..assembled.sphere_count() {
        let sa = scale_of(&a.spheres[i]) / assembled.cone()[i].scale;
        let sf = scale_of(&f.spheres[i]) / focused.shell()[i].scale;
        assert!((sf / sa - FOCUS_BACKDROP_SCALE).abs() < 1e-4);
    }
}

#[test]
fn from_parts_pairs_the_shortest_inputs() {
    let cone = vec![point(Vec3::ZERO, 0.3, [1.0; 3]); 5];
    let shell = vec![point(Vec3::ONE, 0.3, [1.0; 3]); 3];
    let animator = ParticleAnimator::from_parts(cone, shell, Vec::new());
    assert_eq!(animator.len(), 3);
    assert_eq!(animator.cone().len(), 3);
}

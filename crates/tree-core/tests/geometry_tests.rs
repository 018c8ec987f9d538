// Host-side tests for the procedural point sets and mesh primitives.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tree_core::constants::*;
use tree_core::mesh;
use tree_core::{generate_cone, generate_sphere_shell, generate_spiral_slots, palette, ray_sphere};

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn cone_points_stay_inside_the_tree_silhouette() {
    let points = generate_cone(2000, &mut rng());
    assert_eq!(points.len(), 2000);
    for p in &points {
        let y = p.position.y;
        assert!(y >= -TREE_HEIGHT / 2.0 - 1e-4 && y <= TREE_HEIGHT / 2.0 + 1e-4);
        let h = (y + TREE_HEIGHT / 2.0) / TREE_HEIGHT;
        let radial = Vec3::new(p.position.x, 0.0, p.position.z).length();
        assert!(radial <= (1.0 - h) * TREE_RADIUS + 1e-3, "point {:?} outside cone", p.position);
    }
}

#[test]
fn shell_points_lie_between_the_two_radii() {
    let points = generate_sphere_shell(2000, &mut rng());
    assert_eq!(points.len(), 2000);
    for p in &points {
        let r = p.position.length();
        assert!(r >= SHELL_RADIUS_MIN - 1e-3 && r <= SHELL_RADIUS_MAX + 1e-3, "radius {r}");
    }
}

#[test]
fn colours_come_from_palette_and_scales_stay_in_range() {
    let colours = palette();
    let mut r = rng();
    let all = generate_cone(500, &mut r)
        .into_iter()
        .chain(generate_sphere_shell(500, &mut r));
    for p in all {
        assert!(colours.contains(&p.color), "colour {:?} not in palette", p.color);
        assert!(p.scale >= POINT_SCALE_MIN && p.scale <= POINT_SCALE_MAX);
    }
}

#[test]
fn generators_handle_zero_count() {
    let mut r = rng();
    assert!(generate_cone(0, &mut r).is_empty());
    assert!(generate_sphere_shell(0, &mut r).is_empty());
    assert!(generate_spiral_slots(0, &mut r).is_empty());
}

#[test]
fn same_seed_gives_same_points() {
    let a = generate_cone(100, &mut rng());
    let b = generate_cone(100, &mut rng());
    assert_eq!(a, b);
}

#[test]
fn spiral_slots_climb_monotonically() {
    let slots = generate_spiral_slots(PLACARD_COUNT, &mut rng());
    assert_eq!(slots.len(), PLACARD_COUNT);
    for pair in slots.windows(2) {
        assert!(pair[1].position.y > pair[0].position.y);
    }
    let lowest = slots[0].position.y;
    assert!((lowest - (0.1 * TREE_HEIGHT - TREE_HEIGHT / 2.0)).abs() < 1e-4);
}

#[test]
fn spiral_slots_face_away_from_the_axis() {
    for slot in generate_spiral_slots(PLACARD_COUNT, &mut rng()) {
        let facing = slot.rotation * Vec3::Z;
        let radial = Vec3::new(slot.position.x, 0.0, slot.position.z).normalize();
        assert!(facing.dot(radial) > 0.9, "slot at {:?} faces {:?}", slot.position, facing);
    }
}

#[test]
fn spiral_slot_radius_sits_just_outside_the_cone() {
    for (i, slot) in generate_spiral_slots(PLACARD_COUNT, &mut rng()).iter().enumerate() {
        let h = 0.1 + (i as f32 / PLACARD_COUNT as f32) * 0.8;
        let radial = Vec3::new(slot.position.x, 0.0, slot.position.z).length();
        assert!((radial - ((1.0 - h) * TREE_RADIUS + PLACARD_SURFACE_OFFSET)).abs() < 1e-3);
    }
}

#[test]
fn ray_sphere_hits_in_front_only() {
    let hit = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 1.0);
    assert!(matches!(hit, Some(t) if (t - 4.0).abs() < 1e-5));
    assert!(ray_sphere(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, 5.0), 1.0).is_none());
    assert!(ray_sphere(Vec3::ZERO, Vec3::X, Vec3::new(0.0, 0.0, 5.0), 1.0).is_none());
}

#[test]
fn mesh_indices_are_in_range() {
    let meshes = [
        ("sphere", mesh::swarm_sphere()),
        ("cube", mesh::swarm_cube()),
        ("star", mesh::star()),
        ("placard", mesh::placard()),
        ("dust", mesh::dust_mote()),
    ];
    for (name, m) in meshes.iter() {
        assert!(!m.vertices.is_empty(), "{name} has no vertices");
        assert_eq!(m.indices.len() % 3, 0, "{name} index count");
        for &i in &m.indices {
            assert!((i as usize) < m.vertices.len(), "{name} index {i} out of range");
        }
    }
}

#[test]
fn star_outline_alternates_outer_and_inner_points() {
    let outline = mesh::star_outline(1.0, 0.4);
    assert_eq!(outline.len(), 10);
    for (i, p) in outline.iter().enumerate() {
        let r = (p[0] * p[0] + p[1] * p[1]).sqrt();
        let expected = if i % 2 == 0 { 1.0 } else { 0.4 };
        assert!((r - expected).abs() < 1e-5);
    }
}

#[test]
fn placard_mesh_has_a_textured_photo_surface() {
    let m = mesh::placard();
    let textured = m.vertices.iter().filter(|v| v.textured > 0.5).count();
    assert_eq!(textured, 4);
}

//! Procedural point sets for the swarm targets and the placard spiral.
//!
//! Every generator is a pure function of its count and the supplied RNG. The
//! output order is stable within a call; the animator pairs index `i` of one
//! set with index `i` of another purely by position.

use crate::constants::*;
use glam::{Mat3, Quat, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

pub type Rgb = [f32; 3];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point3D {
    pub position: Vec3,
    pub color: Rgb,
    pub scale: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacardSlot {
    pub position: Vec3,
    pub rotation: Quat,
}

/// The fixed palette as RGB triples.
pub fn palette() -> [Rgb; PALETTE_HEX.len()] {
    PALETTE_HEX.map(hex_to_rgb)
}

fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    hex_to_rgb(PALETTE_HEX[rng.gen_range(0..PALETTE_HEX.len())])
}

fn random_scale<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    POINT_SCALE_MIN + rng.gen::<f32>() * (POINT_SCALE_MAX - POINT_SCALE_MIN)
}

/// Radius of the tree silhouette at height fraction `h` in [0, 1].
#[inline]
pub fn cone_radius(h: f32) -> f32 {
    (1.0 - h) * TREE_RADIUS
}

#[inline]
pub fn height_to_y(h: f32) -> f32 {
    h * TREE_HEIGHT - TREE_HEIGHT / 2.0
}

/// Points filling the tree cone, with a mild spiral bias toward the tip.
pub fn generate_cone<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Point3D> {
    (0..count)
        .map(|_| {
            let h: f32 = rng.gen();
            let r = cone_radius(h);
            let angle = h * CONE_SPIRAL_TWIST + rng.gen::<f32>() * TAU;
            let radius = rng.gen::<f32>() * r;
            Point3D {
                position: Vec3::new(angle.cos() * radius, height_to_y(h), angle.sin() * radius),
                color: random_color(rng),
                scale: random_scale(rng),
            }
        })
        .collect()
}

/// Points on a thick spherical shell, uniform over directions.
pub fn generate_sphere_shell<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Point3D> {
    (0..count)
        .map(|_| {
            let u: f32 = rng.gen();
            let v: f32 = rng.gen();
            let theta = TAU * u;
            let phi = (2.0 * v - 1.0).clamp(-1.0, 1.0).acos();
            let radius = SHELL_RADIUS_MIN + rng.gen::<f32>() * (SHELL_RADIUS_MAX - SHELL_RADIUS_MIN);
            Point3D {
                position: Vec3::new(
                    radius * phi.sin() * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                    radius * phi.cos(),
                ),
                color: random_color(rng),
                scale: random_scale(rng),
            }
        })
        .collect()
}

/// Orientation whose local +Z points from `eye` toward `target`, +Y as close
/// to `up` as possible.
pub fn look_rotation(eye: Vec3, target: Vec3, up: Vec3) -> Quat {
    let z = (target - eye).normalize_or_zero();
    if z == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let mut x = up.cross(z);
    if x.length_squared() < 1e-8 {
        // looking straight along `up`; nudge the reference axis
        x = Vec3::Z.cross(z);
    }
    let x = x.normalize();
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z))
}

/// Placard slots on a golden-angle spiral climbing the tree surface.
pub fn generate_spiral_slots<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<PlacardSlot> {
    (0..count)
        .map(|i| {
            let h = 0.1 + (i as f32 / count as f32) * 0.8;
            let y = height_to_y(h);
            let r = cone_radius(h) + PLACARD_SURFACE_OFFSET;
            let angle = i as f32 * TAU * GOLDEN_RATIO_CONJUGATE + rng.gen::<f32>() * PLACARD_ANGLE_JITTER;
            let position = Vec3::new(angle.cos() * r, y, angle.sin() * r);

            let outward = Vec3::new(position.x * 2.0, y, position.z * 2.0);
            let facing = look_rotation(position, outward, Vec3::Y);
            let roll = rng.gen_range(-PLACARD_ROLL_JITTER..=PLACARD_ROLL_JITTER);
            let pitch = rng.gen_range(-PLACARD_PITCH_JITTER..=PLACARD_PITCH_JITTER);
            let rotation = facing * Quat::from_rotation_z(roll) * Quat::from_rotation_x(pitch);

            PlacardSlot { position, rotation }
        })
        .collect()
}

/// Distance along a normalized ray to the first hit of a sphere in front of
/// the origin.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

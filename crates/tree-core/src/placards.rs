//! Photo placards hung on the tree spiral.
//!
//! Each placard rests on its slot (or on a fixed "exploded" pose while the
//! scene is scattered) and can be pulled in front of the camera as the single
//! focused placard. All poses are kept in the assembly group's local space;
//! the group transform is applied when instances are emitted.

use crate::constants::*;
use crate::geometry::{generate_spiral_slots, look_rotation, ray_sphere, PlacardSlot};
use crate::mesh::InstanceRaw;
use crate::state::{Camera, Mode};
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::TAU;

#[derive(Clone, Debug)]
pub struct Placard {
    pub slot: PlacardSlot,
    pub exploded_position: Vec3,
    pub exploded_rotation: Quat,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
    /// Index into the photo queue, if a photo was uploaded for this slot.
    pub photo: Option<usize>,
}

impl Placard {
    fn new<R: Rng + ?Sized>(slot: PlacardSlot, rng: &mut R) -> Self {
        let distance = rng.gen_range(PLACARD_EXPLODE_MIN..=PLACARD_EXPLODE_MAX);
        let mut jitter = || rng.gen_range(-PLACARD_EXPLODE_JITTER..=PLACARD_EXPLODE_JITTER);
        let offset = Vec3::new(jitter(), jitter(), jitter());
        let exploded_position = slot.position.normalize_or_zero() * distance + offset;
        let exploded_rotation = Quat::from_euler(
            EulerRot::XYZ,
            rng.gen::<f32>() * TAU,
            rng.gen::<f32>() * TAU,
            rng.gen::<f32>() * TAU,
        );
        Self {
            slot,
            exploded_position,
            exploded_rotation,
            position: slot.position,
            rotation: slot.rotation,
            scale: 1.0,
            photo: None,
        }
    }

    /// Resting pose for a mode.
    pub fn rest_pose(&self, mode: Mode) -> (Vec3, Quat) {
        match mode {
            Mode::Scattered => (self.exploded_position, self.exploded_rotation),
            _ => (self.slot.position, self.slot.rotation),
        }
    }

    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation, self.position)
    }
}

/// Inputs for one placard update.
#[derive(Clone, Debug)]
pub struct PlacardFrame<'a> {
    pub mode: Mode,
    pub focused: Option<usize>,
    pub dt_sec: f32,
    pub camera: &'a Camera,
    /// World transform of the assembly group.
    pub group: Mat4,
    /// Pointer driving the focused placard's tilt, in [-1, 1]^2.
    pub tilt: Vec2,
}

/// Pose the focused placard is driven toward, in group-local space.
pub fn focus_pose(camera: &Camera, group: Mat4, tilt: Vec2) -> (Vec3, Quat) {
    let world = camera.eye + camera.forward() * PLACARD_FOCUS_DISTANCE
        - camera.camera_up() * PLACARD_FOCUS_DROP;
    let local = group.inverse().transform_point3(world);
    let facing = look_rotation(world, camera.eye, Vec3::Y)
        * Quat::from_rotation_y(-tilt.x * PLACARD_FOCUS_TILT)
        * Quat::from_rotation_x(tilt.y * PLACARD_FOCUS_TILT);
    let (_, group_rotation, _) = group.to_scale_rotation_translation();
    (local, (group_rotation.inverse() * facing).normalize())
}

/// Index of the screen point closest to `pointer`; ties keep the lowest index.
pub fn nearest_to_pointer(screen: impl IntoIterator<Item = Vec2>, pointer: Vec2) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, p) in screen.into_iter().enumerate() {
        let d = p.distance(pointer);
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

pub struct PlacardController {
    placards: SmallVec<[Placard; PLACARD_COUNT]>,
}

impl PlacardController {
    pub fn new<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let slots = generate_spiral_slots(count, rng);
        Self::from_slots(slots, rng)
    }

    pub fn from_slots<R: Rng + ?Sized>(slots: Vec<PlacardSlot>, rng: &mut R) -> Self {
        Self {
            placards: slots.into_iter().map(|s| Placard::new(s, rng)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.placards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placards.is_empty()
    }

    pub fn placards(&self) -> &[Placard] {
        &self.placards
    }

    pub fn assign_photo(&mut self, index: usize, photo: usize) {
        if let Some(p) = self.placards.get_mut(index) {
            p.photo = Some(photo);
        }
    }

    /// Pick the placard whose slot lands closest to the pointer on screen.
    /// `project` maps a group-local slot position to normalized device
    /// coordinates.
    pub fn select_focus(&self, project: impl Fn(Vec3) -> Vec2, pointer: Vec2) -> Option<usize> {
        nearest_to_pointer(self.placards.iter().map(|p| project(p.slot.position)), pointer)
    }

    /// Select using the live camera and group transform.
    pub fn select_focus_from_camera(&self, camera: &Camera, group: Mat4, pointer: Vec2) -> Option<usize> {
        self.select_focus(|local| camera.project(group.transform_point3(local)), pointer)
    }

    pub fn update(&mut self, frame: &PlacardFrame<'_>) {
        let rest_follow = frame_follow(PLACARD_REST_FOLLOW, frame.dt_sec);
        let scale_follow = frame_follow(PLACARD_SCALE_FOLLOW, frame.dt_sec);
        let focus_follow = frame_follow(PLACARD_FOCUS_FOLLOW, frame.dt_sec);
        let focus_turn = frame_follow(PLACARD_FOCUS_TURN, frame.dt_sec);

        for (i, p) in self.placards.iter_mut().enumerate() {
            if frame.focused == Some(i) {
                let (pos, rot) = focus_pose(frame.camera, frame.group, frame.tilt);
                p.position = p.position.lerp(pos, focus_follow);
                p.rotation = p.rotation.slerp(rot, focus_turn);
                p.scale += (PLACARD_FOCUS_SCALE - p.scale) * scale_follow;
            } else {
                let (pos, rot) = p.rest_pose(frame.mode);
                p.position = p.position.lerp(pos, rest_follow);
                p.rotation = p.rotation.slerp(rot, rest_follow);
                p.scale += (1.0 - p.scale) * scale_follow;
            }
        }
    }

    /// World-space instance records; colour alpha flags whether a photo is present.
    pub fn instances(&self, group: Mat4) -> SmallVec<[InstanceRaw; PLACARD_COUNT]> {
        self.placards
            .iter()
            .map(|p| {
                let has_photo = if p.photo.is_some() { 1.0 } else { 0.0 };
                InstanceRaw::new(group * p.local_matrix(), [1.0, 1.0, 1.0, has_photo])
            })
            .collect()
    }

    /// Nearest placard hit by a world-space ray.
    pub fn pick(&self, ray_origin: Vec3, ray_dir: Vec3, group: Mat4) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, p) in self.placards.iter().enumerate() {
            let center = group.transform_point3(p.position);
            if let Some(t) = ray_sphere(ray_origin, ray_dir, center, PLACARD_PICK_RADIUS * p.scale) {
                match best {
                    Some((_, bt)) if t >= bt => {}
                    _ => best = Some((i, t)),
                }
            }
        }
        best.map(|(i, _)| i)
    }
}

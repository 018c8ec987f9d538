//! Per-frame composition of the whole scene.
//!
//! `Scene` owns every animated component and advances them in a fixed order
//! against one `SceneState` borrow. The renderer only ever sees the
//! `FrameOutput` it returns.

use crate::ambient::{DustField, PointLight, TreeTopStar};
use crate::animator::{ParticleAnimator, SwarmBatches};
use crate::constants::*;
use crate::mesh::InstanceRaw;
use crate::placards::{PlacardController, PlacardFrame};
use crate::state::{Mode, OrbitCamera, SceneState};
use glam::{EulerRot, Mat4, Vec2, Vec3};
use rand::Rng;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneConfig {
    pub particle_count: usize,
    pub placard_count: usize,
    pub dust_count: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            placard_count: PLACARD_COUNT,
            dust_count: DUST_COUNT,
        }
    }
}

/// Rotation of the assembly group that parents the swarm, star and placards.
#[derive(Clone, Debug, Default)]
pub struct GroupRig {
    /// Pitch (x) and yaw (y) in radians.
    pub rotation: Vec2,
    spin: f32,
}

impl GroupRig {
    pub fn spin(&self) -> f32 {
        self.spin
    }

    pub fn update(&mut self, mode: Mode, pointer: Vec2, dt_sec: f32) {
        let yaw = pointer.x * POINTER_YAW;
        let pitch = -pointer.y * POINTER_PITCH;
        let target = if mode == Mode::Focused {
            Vec2::new(pitch, yaw) * FOCUS_POINTER_DAMPING
        } else {
            self.spin += AMBIENT_SPIN_RATE * dt_sec.max(0.0);
            Vec2::new(pitch, self.spin + yaw)
        };
        self.rotation += (target - self.rotation) * frame_follow(GROUP_FOLLOW, dt_sec);
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0)
    }
}

/// Everything the renderer needs for one frame.
pub struct FrameOutput<'a> {
    pub view_proj: Mat4,
    pub eye: Vec3,
    pub group: Mat4,
    pub swarm: &'a SwarmBatches,
    pub placards: &'a [InstanceRaw],
    pub star: InstanceRaw,
    pub star_light: PointLight,
    pub dust: &'a [InstanceRaw],
}

pub struct Scene {
    pub orbit: OrbitCamera,
    pub rig: GroupRig,
    animator: ParticleAnimator,
    placards: PlacardController,
    star: TreeTopStar,
    dust: DustField,
    batches: SwarmBatches,
    placard_instances: SmallVec<[InstanceRaw; PLACARD_COUNT]>,
    dust_instances: Vec<InstanceRaw>,
}

impl Scene {
    pub fn new<R: Rng + ?Sized>(config: SceneConfig, rng: &mut R) -> Self {
        let animator = ParticleAnimator::new(config.particle_count, rng);
        let placards = PlacardController::new(config.placard_count, rng);
        let dust = DustField::new(config.dust_count, rng);
        let batches = animator.batches();
        log::info!(
            "[scene] swarm={} ({} spheres, {} cubes) placards={} dust={}",
            animator.len(),
            animator.sphere_count(),
            animator.cube_count(),
            placards.len(),
            dust.len()
        );
        Self {
            orbit: OrbitCamera::default(),
            rig: GroupRig::default(),
            animator,
            placards,
            star: TreeTopStar::default(),
            dust,
            batches,
            placard_instances: SmallVec::new(),
            dust_instances: Vec::new(),
        }
    }

    pub fn placards(&self) -> &PlacardController {
        &self.placards
    }

    pub fn assign_photo(&mut self, placard: usize, photo: usize) {
        self.placards.assign_photo(placard, photo);
    }

    /// Placard under an NDC pointer position, if any.
    pub fn pick(&self, ndc: Vec2, aspect: f32) -> Option<usize> {
        let camera = self.orbit.camera(aspect);
        let (origin, dir) = camera.ray_through(ndc);
        self.placards.pick(origin, dir, self.rig.matrix())
    }

    /// Advance one frame.
    pub fn tick(&mut self, state: &mut SceneState, dt_sec: f32, time_sec: f32, aspect: f32) -> FrameOutput<'_> {
        let mode = state.mode();
        let camera = self.orbit.camera(aspect);

        self.rig.update(mode, state.hand_pointer, dt_sec);
        let group = self.rig.matrix();

        if mode == Mode::Focused && state.take_focus_request() {
            let selected = self
                .placards
                .select_focus_from_camera(&camera, group, state.hand_pointer);
            log::info!("[focus] selected placard {:?}", selected);
            state.set_focused(selected);
        }

        self.animator
            .update(mode, dt_sec, time_sec, Some(&mut self.batches));
        self.placards.update(&PlacardFrame {
            mode,
            focused: state.focused(),
            dt_sec,
            camera: &camera,
            group,
            tilt: state.mouse_pointer,
        });
        self.star.update(mode, dt_sec, time_sec);
        self.dust.update(dt_sec);

        self.placard_instances = self.placards.instances(group);
        self.dust.write_instances(&mut self.dust_instances);

        FrameOutput {
            view_proj: camera.view_proj(),
            eye: camera.eye,
            group,
            swarm: &self.batches,
            placards: &self.placard_instances,
            star: self.star.instance(group),
            star_light: self.star.light(group),
            dust: &self.dust_instances,
        }
    }
}

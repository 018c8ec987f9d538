use crate::constants::*;
use crate::mesh::InstanceRaw;
use crate::state::Mode;
use glam::{Mat4, Quat, Vec3};
use rand::Rng;

/// A point light for the scene pass. `range` of zero means unbounded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
    pub range: f32,
}

/// Star on the tree tip. Only shows while the tree is assembled.
#[derive(Clone, Debug)]
pub struct TreeTopStar {
    pub scale: f32,
    pub position: Vec3,
    pub spin: f32,
}

impl Default for TreeTopStar {
    fn default() -> Self {
        Self {
            scale: 1.0,
            position: Vec3::new(0.0, TREE_HEIGHT / 2.0 + STAR_LIFT, 0.0),
            spin: 0.0,
        }
    }
}

impl TreeTopStar {
    pub fn update(&mut self, mode: Mode, dt_sec: f32, time_sec: f32) {
        self.spin = time_sec * STAR_SPIN_RATE;
        let target = if mode == Mode::Assembled { 1.0 } else { 0.0 };
        self.scale += (target - self.scale) * frame_follow(STAR_SCALE_FOLLOW, dt_sec);
        self.position.y = TREE_HEIGHT / 2.0 + STAR_LIFT + (time_sec * 2.0).sin() * STAR_BOB;
    }

    pub fn instance(&self, group: Mat4) -> InstanceRaw {
        let model = group
            * Mat4::from_scale_rotation_translation(
                Vec3::splat(self.scale),
                Quat::from_rotation_y(self.spin),
                self.position,
            );
        let c = hex_to_rgb(0xFFE135);
        InstanceRaw::new(model, [c[0], c[1], c[2], 1.0])
    }

    /// Gold glow carried with the star; it fades out as the star shrinks.
    pub fn light(&self, group: Mat4) -> PointLight {
        PointLight {
            position: group.transform_point3(self.position),
            color: hex_to_rgb(STAR_LIGHT_HEX),
            intensity: STAR_LIGHT_INTENSITY * self.scale.max(0.0),
            range: STAR_LIGHT_RANGE,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Mote {
    phase: f32,
    speed: f32,
    anchor: Vec3,
}

/// Faint motes drifting around the whole scene, outside the tree group.
#[derive(Clone, Debug)]
pub struct DustField {
    motes: Vec<Mote>,
}

impl DustField {
    pub fn new<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let motes = (0..count)
            .map(|_| Mote {
                phase: rng.gen::<f32>() * 100.0,
                // per-frame rate at the reference frame rate, halved
                speed: (0.01 + rng.gen::<f32>() * 0.02) * 0.5 * REFERENCE_FPS,
                anchor: Vec3::new(
                    rng.gen_range(-DUST_EXTENT..=DUST_EXTENT),
                    rng.gen_range(-DUST_EXTENT..=DUST_EXTENT),
                    rng.gen_range(-DUST_EXTENT..=DUST_EXTENT),
                ),
            })
            .collect();
        Self { motes }
    }

    pub fn len(&self) -> usize {
        self.motes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motes.is_empty()
    }

    pub fn update(&mut self, dt_sec: f32) {
        for m in &mut self.motes {
            m.phase += m.speed * dt_sec.max(0.0);
        }
    }

    /// Write the motes into `out`, resizing it to fit.
    pub fn write_instances(&self, out: &mut Vec<InstanceRaw>) {
        out.resize(self.motes.len(), InstanceRaw::default());
        for (slot, m) in out.iter_mut().zip(&self.motes) {
            let t = m.phase;
            let pos = m.anchor + Vec3::new((t / 4.0).cos(), (t / 5.0).sin(), (t / 6.0).cos()) * 2.0;
            let s = t.cos() * 0.5 + 0.5;
            let scale = s * 0.1 + 0.05;
            *slot = InstanceRaw::new(
                Mat4::from_scale_rotation_translation(Vec3::splat(scale), Quat::IDENTITY, pos),
                DUST_COLOR,
            );
        }
    }
}

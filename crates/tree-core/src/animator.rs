//! Per-frame blending of the particle swarm between its target shapes.

use crate::constants::*;
use crate::geometry::{generate_cone, generate_sphere_shell, Point3D};
use crate::mesh::InstanceRaw;
use crate::state::Mode;
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use rand::Rng;

/// Instance records for the two swarm meshes, updated in place every frame.
#[derive(Clone, Debug, Default)]
pub struct SwarmBatches {
    pub spheres: Vec<InstanceRaw>,
    pub cubes: Vec<InstanceRaw>,
}

impl SwarmBatches {
    pub fn with_split(sphere_count: usize, cube_count: usize) -> Self {
        Self {
            spheres: vec![InstanceRaw::default(); sphere_count],
            cubes: vec![InstanceRaw::default(); cube_count],
        }
    }
}

pub struct ParticleAnimator {
    cone: Vec<Point3D>,
    shell: Vec<Point3D>,
    current: Vec<Vec3>,
    spin: Vec<Vec2>,
    sphere_count: usize,
}

impl ParticleAnimator {
    pub fn new<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let cone = generate_cone(count, rng);
        let shell = generate_sphere_shell(count, rng);
        let spin = (0..count)
            .map(|_| {
                Vec2::new(
                    rng.gen_range(-SPIN_JITTER..=SPIN_JITTER),
                    rng.gen_range(-SPIN_JITTER..=SPIN_JITTER),
                )
            })
            .collect();
        Self::from_parts(cone, shell, spin)
    }

    /// Build from explicit target sets. Extra entries beyond the shortest
    /// input are dropped so the sets pair up positionally.
    pub fn from_parts(mut cone: Vec<Point3D>, mut shell: Vec<Point3D>, mut spin: Vec<Vec2>) -> Self {
        let count = cone.len().min(shell.len());
        cone.truncate(count);
        shell.truncate(count);
        spin.resize(count, Vec2::ZERO);
        // the swarm starts fully assembled
        let current = cone.iter().map(|p| p.position).collect();
        Self {
            cone,
            shell,
            current,
            spin,
            sphere_count: sphere_count(count),
        }
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn sphere_count(&self) -> usize {
        self.sphere_count
    }

    pub fn cube_count(&self) -> usize {
        self.len() - self.sphere_count
    }

    pub fn batches(&self) -> SwarmBatches {
        SwarmBatches::with_split(self.sphere_count(), self.cube_count())
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.current
    }

    pub fn cone(&self) -> &[Point3D] {
        &self.cone
    }

    pub fn shell(&self) -> &[Point3D] {
        &self.shell
    }

    /// Target set for a mode. Focus reuses the scatter shell.
    pub fn targets(&self, mode: Mode) -> &[Point3D] {
        match mode {
            Mode::Assembled => &self.cone,
            Mode::Scattered | Mode::Focused => &self.shell,
        }
    }

    /// Advance one frame and write every instance into `batches`. Without
    /// batches (renderer not ready) nothing is touched.
    pub fn update(
        &mut self,
        mode: Mode,
        dt_sec: f32,
        time_sec: f32,
        batches: Option<&mut SwarmBatches>,
    ) {
        let Some(batches) = batches else {
            return;
        };
        let rate = match mode {
            Mode::Assembled => ASSEMBLE_RATE,
            _ => SCATTER_RATE,
        };
        let alpha = 1.0 - (-rate * dt_sec.max(0.0)).exp();
        let mut positions = std::mem::take(&mut self.current);
        let targets = self.targets(mode);

        for (i, current) in positions.iter_mut().enumerate() {
            let point = &targets[i];
            let mut target = point.position;
            if mode == Mode::Scattered {
                target += scatter_wobble(i, time_sec);
            }
            *current = current.lerp(target, alpha);

            let mut scale = point.scale;
            if mode == Mode::Focused {
                scale *= FOCUS_BACKDROP_SCALE;
            }
            scale *= 1.0 + (time_sec * 3.0 + i as f32).sin() * BREATH_AMOUNT;

            let spin = self.spin[i] + Vec2::splat(SPIN_SHARED);
            let rotation = Quat::from_euler(EulerRot::XYZ, spin.x * time_sec, spin.y * time_sec, 0.0);

            let c = self.cone[i].color;
            let record = InstanceRaw::new(
                Mat4::from_scale_rotation_translation(Vec3::splat(scale), rotation, *current),
                [c[0], c[1], c[2], 1.0],
            );
            let slot = if i < self.sphere_count {
                batches.spheres.get_mut(i)
            } else {
                batches.cubes.get_mut(i - self.sphere_count)
            };
            if let Some(slot) = slot {
                *slot = record;
            }
        }
        self.current = positions;
    }
}

/// Slow drift layered on the scatter target so the cloud never sits still.
#[inline]
pub fn scatter_wobble(index: usize, time_sec: f32) -> Vec3 {
    let i = index as f32;
    Vec3::new(
        (time_sec * 0.2 + i * 0.1).sin(),
        (time_sec * 0.15 + i * 0.15).cos(),
        (time_sec * 0.25 + i * 0.05).sin(),
    ) * SCATTER_WOBBLE
}

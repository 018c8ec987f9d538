//! Small indexed meshes and the GPU-facing records shared with the renderer.

use crate::constants::*;
use glam::{Mat4, Vec3};
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    /// 1.0 on the photo surface, 0.0 elsewhere.
    pub textured: f32,
}

/// Per-instance transform and colour, laid out for a vertex buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl Default for InstanceRaw {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            color: [1.0; 4],
        }
    }
}

impl InstanceRaw {
    pub fn new(model: Mat4, color: [f32; 4]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
        }
    }

    pub fn translation(&self) -> Vec3 {
        Mat4::from_cols_array_2d(&self.model).w_axis.truncate()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    fn push(&mut self, position: Vec3, normal: Vec3, uv: [f32; 2], textured: f32) -> u16 {
        self.vertices.push(Vertex {
            position: position.to_array(),
            normal: normal.to_array(),
            uv,
            textured,
        });
        (self.vertices.len() - 1) as u16
    }

    /// Append an axis-aligned quad given its four corners in CCW order (seen
    /// from the side `normal` points to).
    fn quad(&mut self, corners: [Vec3; 4], normal: Vec3, textured: f32) {
        let uvs = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
        let base = self.vertices.len() as u16;
        for (c, uv) in corners.iter().zip(uvs) {
            self.push(*c, normal, uv, textured);
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Append a box centred at `center` with full extents `size`.
    fn cuboid(&mut self, center: Vec3, size: Vec3) {
        let h = size * 0.5;
        let faces: [(Vec3, Vec3, Vec3); 6] = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];
        for (n, u, v) in faces {
            // u x v == n keeps the winding counter-clockwise from outside
            let c = center + n * h;
            let du = u * h;
            let dv = v * h;
            self.quad([c - du - dv, c + du - dv, c + du + dv, c - du + dv], n, 0.0);
        }
    }
}

/// Low-poly UV sphere.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut mesh = MeshData::default();
    for r in 0..=rings {
        let v = r as f32 / rings as f32;
        let phi = v * PI;
        for s in 0..=segments {
            let u = s as f32 / segments as f32;
            let theta = u * TAU;
            let n = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            mesh.push(n * radius, n, [u, v], 0.0);
        }
    }
    let stride = (segments + 1) as u16;
    for r in 0..rings as u16 {
        for s in 0..segments as u16 {
            let a = r * stride + s;
            let b = a + stride;
            mesh.indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    mesh
}

pub fn cube(size: f32) -> MeshData {
    let mut mesh = MeshData::default();
    mesh.cuboid(Vec3::ZERO, Vec3::splat(size));
    mesh
}

/// Outline of a five-point star in the XY plane, starting at the top point.
pub fn star_outline(outer: f32, inner: f32) -> Vec<[f32; 2]> {
    (0..10)
        .map(|i| {
            let angle = i as f32 * PI / 5.0 + PI / 2.0;
            let r = if i % 2 == 0 { outer } else { inner };
            [angle.cos() * r, angle.sin() * r]
        })
        .collect()
}

/// Star outline extruded along +Z by `depth`.
pub fn star_prism(outer: f32, inner: f32, depth: f32) -> MeshData {
    let outline = star_outline(outer, inner);
    let n = outline.len() as u16;
    let mut mesh = MeshData::default();
    let front_z = depth * 0.5;
    let back_z = -depth * 0.5;

    // caps: fan around the centre
    for (z, normal) in [(front_z, Vec3::Z), (back_z, Vec3::NEG_Z)] {
        let centre = mesh.push(Vec3::new(0.0, 0.0, z), normal, [0.5, 0.5], 0.0);
        let first = centre + 1;
        for p in &outline {
            mesh.push(Vec3::new(p[0], p[1], z), normal, [0.5, 0.5], 0.0);
        }
        for i in 0..n {
            let a = first + i;
            let b = first + (i + 1) % n;
            if normal.z > 0.0 {
                mesh.indices.extend_from_slice(&[centre, a, b]);
            } else {
                mesh.indices.extend_from_slice(&[centre, b, a]);
            }
        }
    }

    // side walls
    for i in 0..outline.len() {
        let p0 = outline[i];
        let p1 = outline[(i + 1) % outline.len()];
        let edge = Vec3::new(p1[0] - p0[0], p1[1] - p0[1], 0.0);
        let normal = edge.cross(Vec3::Z).normalize_or_zero();
        mesh.quad(
            [
                Vec3::new(p0[0], p0[1], back_z),
                Vec3::new(p1[0], p1[1], back_z),
                Vec3::new(p1[0], p1[1], front_z),
                Vec3::new(p0[0], p0[1], front_z),
            ],
            normal,
            0.0,
        );
    }
    mesh
}

/// Placard: a thin card frame with a square photo surface on its front.
pub fn placard() -> MeshData {
    let mut mesh = MeshData::default();
    mesh.cuboid(Vec3::ZERO, Vec3::new(1.2, 1.45, 0.06));
    let c = Vec3::new(0.0, 0.1, 0.035);
    let h = 0.5;
    mesh.quad(
        [
            c + Vec3::new(-h, -h, 0.0),
            c + Vec3::new(h, -h, 0.0),
            c + Vec3::new(h, h, 0.0),
            c + Vec3::new(-h, h, 0.0),
        ],
        Vec3::Z,
        1.0,
    );
    mesh
}

/// Swarm ornaments; instance scales in [0.2, 0.7] are applied on top.
pub fn swarm_sphere() -> MeshData {
    uv_sphere(0.07, 6, 6)
}

pub fn swarm_cube() -> MeshData {
    cube(0.1)
}

pub fn star() -> MeshData {
    star_prism(STAR_OUTER_RADIUS, STAR_INNER_RADIUS, STAR_DEPTH)
}

pub fn dust_mote() -> MeshData {
    uv_sphere(0.2, 8, 8)
}

use tree_core::{InstanceRaw, MeshData, Vertex};
use wgpu::util::DeviceExt;

/// Indexed mesh uploaded once.
pub(crate) struct MeshBuffers {
    vertex: wgpu::Buffer,
    index: wgpu::Buffer,
    index_count: u32,
}

impl MeshBuffers {
    pub(crate) fn new(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertex = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex,
            index,
            index_count: mesh.indices.len() as u32,
        }
    }
}

/// Per-instance records, rewritten every frame; grows when a batch outgrows it.
pub(crate) struct InstanceBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: usize,
    len: u32,
}

impl InstanceBuffer {
    pub(crate) fn new(device: &wgpu::Device, label: &'static str, capacity: usize) -> Self {
        Self {
            label,
            buffer: Self::allocate(device, label, capacity),
            capacity: capacity.max(1),
            len: 0,
        }
    }

    fn allocate(device: &wgpu::Device, label: &str, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (std::mem::size_of::<InstanceRaw>() * capacity.max(1)) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    pub(crate) fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[InstanceRaw]) {
        if data.len() > self.capacity {
            self.capacity = data.len().next_power_of_two();
            self.buffer = Self::allocate(device, self.label, self.capacity);
            log::info!("[render] {} grown to {}", self.label, self.capacity);
        }
        if !data.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
        }
        self.len = data.len() as u32;
    }
}

/// A mesh, its instances and the material they are drawn with.
pub(crate) struct Batch {
    pub(crate) mesh: MeshBuffers,
    pub(crate) instances: InstanceBuffer,
    pub(crate) material: wgpu::BindGroup,
}

impl Batch {
    fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_bind_group(2, &self.material, &[]);
        rpass.set_vertex_buffer(0, self.mesh.vertex.slice(..));
        rpass.set_vertex_buffer(1, self.instances.buffer.slice(..));
        rpass.set_index_buffer(self.mesh.index.slice(..), wgpu::IndexFormat::Uint16);
    }

    /// Draw every instance with one bound photo group.
    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.instances.len == 0 {
            return;
        }
        self.bind(rpass);
        rpass.draw_indexed(0..self.mesh.index_count, 0, 0..self.instances.len);
    }

    /// Draw instance by instance, letting `photo_for` pick the texture group.
    pub(crate) fn draw_each<'g>(
        &self,
        rpass: &mut wgpu::RenderPass<'_>,
        photo_for: impl Fn(usize) -> &'g wgpu::BindGroup,
    ) {
        if self.instances.len == 0 {
            return;
        }
        self.bind(rpass);
        for i in 0..self.instances.len {
            rpass.set_bind_group(1, photo_for(i as usize), &[]);
            rpass.draw_indexed(0..self.mesh.index_count, 0, i..i + 1);
        }
    }
}

pub(crate) fn vertex_layouts() -> [wgpu::VertexBufferLayout<'static>; 2] {
    const VERTEX_ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x2,
        3 => Float32,
    ];
    const INSTANCE_ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
        7 => Float32x4,
        8 => Float32x4,
    ];
    [
        // slot 0: mesh vertices
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRS,
        },
        // slot 1: instance model matrix columns + colour
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &INSTANCE_ATTRS,
        },
    ]
}

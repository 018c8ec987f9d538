use crate::constants::*;
use glam::Vec3;
use tree_core::constants::hex_to_rgb;
use tree_core::{mesh, FrameOutput, InstanceRaw, SceneConfig};
use web_sys as web;
use wgpu::util::DeviceExt;

mod helpers;
mod meshes;
mod photos;
mod post;
mod targets;
use meshes::{Batch, InstanceBuffer, MeshBuffers};
use targets::RenderTargets;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    eye_ambient: [f32; 4],
    light_pos: [f32; 4],
    light_color: [f32; 4],
    star_light_pos: [f32; 4],
    star_light_color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MaterialUniforms {
    tint: [f32; 4],
    empty: [f32; 4],
}

impl MaterialUniforms {
    fn new(tint: [f32; 3], emissive: f32) -> Self {
        Self {
            tint: [tint[0], tint[1], tint[2], emissive],
            empty: [PLACARD_EMPTY_RGB[0], PLACARD_EMPTY_RGB[1], PLACARD_EMPTY_RGB[2], 0.0],
        }
    }
}

struct Batches {
    spheres: Batch,
    cubes: Batch,
    star: Batch,
    placards: Batch,
    dust: Batch,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    frame_uniforms: wgpu::Buffer,
    frame_group: wgpu::BindGroup,
    lit_pipeline: wgpu::RenderPipeline,
    glow_pipeline: wgpu::RenderPipeline,
    batches: Batches,
    photos: photos::PhotoTextures,

    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post: post::PostResources,
    post_groups: post::PostBindGroups,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, scene: &SceneConfig) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[render] surface {}x{} {:?}", width, height, format);

        // Scene pass: uniforms, materials, photo textures, pipelines
        let frame_uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_bgl"),
            entries: &[helpers::uniform_layout_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
        });
        let frame_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bg"),
            layout: &frame_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_uniforms.as_entire_binding(),
            }],
        });
        let material_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material_bgl"),
            entries: &[helpers::uniform_layout_entry(0, wgpu::ShaderStages::FRAGMENT)],
        });
        let photos = photos::PhotoTextures::new(&device, &queue);

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let scene_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&frame_bgl, photos.layout(), &material_bgl],
            push_constant_ranges: &[],
        });
        let lit_pipeline = scene_pipeline(&device, &scene_layout, &scene_shader, "fs_lit", None, true);
        let glow_pipeline = scene_pipeline(
            &device,
            &scene_layout,
            &scene_shader,
            "fs_glow",
            Some(ADDITIVE),
            false,
        );

        let sphere_count = tree_core::constants::sphere_count(scene.particle_count);
        let batch = |label: &'static str, mesh: &tree_core::MeshData, capacity: usize, material: MaterialUniforms| {
            let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::bytes_of(&material),
                usage: wgpu::BufferUsages::UNIFORM,
            });
            Batch {
                mesh: MeshBuffers::new(&device, label, mesh),
                instances: InstanceBuffer::new(&device, label, capacity),
                material: device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(label),
                    layout: &material_bgl,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                }),
            }
        };
        let batches = Batches {
            spheres: batch(
                "swarm_spheres",
                &mesh::swarm_sphere(),
                sphere_count,
                MaterialUniforms::new([1.0; 3], SWARM_EMISSIVE),
            ),
            cubes: batch(
                "swarm_cubes",
                &mesh::swarm_cube(),
                scene.particle_count - sphere_count,
                MaterialUniforms::new([1.0; 3], SWARM_EMISSIVE),
            ),
            star: batch("star", &mesh::star(), 1, MaterialUniforms::new([1.0; 3], STAR_EMISSIVE)),
            placards: batch(
                "placards",
                &mesh::placard(),
                scene.placard_count,
                MaterialUniforms::new(hex_to_rgb(PLACARD_FRAME_HEX), 0.0),
            ),
            dust: batch("dust", &mesh::dust_mote(), scene.dust_count, MaterialUniforms::new([1.0; 3], 0.0)),
        };

        // Offscreen targets and post-processing
        let targets = RenderTargets::new(&device, width, height);
        let linear_sampler = helpers::linear_sampler(&device, "linear_sampler");
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(POST_WGSL.into()),
        });
        let post = post::create_post_resources(&device, &post_shader, format);
        let post_groups = post.bind_groups(&device, &linear_sampler, &targets);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            frame_uniforms,
            frame_group,
            lit_pipeline,
            glow_pipeline,
            batches,
            photos,
            targets,
            linear_sampler,
            post,
            post_groups,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_RGB[0],
                g: CLEAR_RGB[1],
                b: CLEAR_RGB[2],
                a: 1.0,
            },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
        }
    }

    /// Reconfigure the surface and rebuild size-dependent targets.
    pub fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
        self.targets.recreate(&self.device, self.width, self.height);
        self.post_groups = self
            .post
            .bind_groups(&self.device, &self.linear_sampler, &self.targets);
    }

    pub fn upload_photo(&mut self, index: usize, bitmap: &web::ImageBitmap) -> bool {
        self.photos.upload(&self.device, &self.queue, index, bitmap)
    }

    /// Draw one frame. `placard_photos[i]` is the photo shown on placard `i`.
    pub fn render(
        &mut self,
        frame: &FrameOutput<'_>,
        placard_photos: &[Option<usize>],
        time_sec: f32,
    ) -> Result<(), wgpu::SurfaceError> {
        let light = hex_to_rgb(POINT_LIGHT_HEX);
        let star = &frame.star_light;
        let uniforms = FrameUniforms {
            view_proj: frame.view_proj.to_cols_array_2d(),
            eye_ambient: with_w(frame.eye, AMBIENT_INTENSITY),
            light_pos: with_w(Vec3::from_array(POINT_LIGHT_POS), POINT_LIGHT_INTENSITY),
            light_color: [light[0], light[1], light[2], time_sec],
            star_light_pos: with_w(star.position, star.intensity),
            star_light_color: [star.color[0], star.color[1], star.color[2], star.range],
        };
        self.queue
            .write_buffer(&self.frame_uniforms, 0, bytemuck::bytes_of(&uniforms));
        self.post
            .write_uniforms(&self.queue, self.width, self.height, time_sec);

        let b = &mut self.batches;
        b.spheres
            .instances
            .write(&self.device, &self.queue, &frame.swarm.spheres);
        b.cubes
            .instances
            .write(&self.device, &self.queue, &frame.swarm.cubes);
        b.star
            .instances
            .write(&self.device, &self.queue, std::slice::from_ref::<InstanceRaw>(&frame.star));
        b.placards
            .instances
            .write(&self.device, &self.queue, frame.placards);
        b.dust.instances.write(&self.device, &self.queue, frame.dust);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            let b = &self.batches;
            rpass.set_pipeline(&self.lit_pipeline);
            rpass.set_bind_group(0, &self.frame_group, &[]);
            rpass.set_bind_group(1, self.photos.placeholder(), &[]);
            b.spheres.draw(&mut rpass);
            b.cubes.draw(&mut rpass);
            b.star.draw(&mut rpass);
            let photos = &self.photos;
            b.placards.draw_each(&mut rpass, |i| {
                photos.bind_group(placard_photos.get(i).copied().flatten())
            });

            rpass.set_pipeline(&self.glow_pipeline);
            rpass.set_bind_group(1, self.photos.placeholder(), &[]);
            b.dust.draw(&mut rpass);
        }

        self.post
            .encode(&mut encoder, &self.post_groups, &self.targets, &view);

        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}

const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::Zero,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

#[inline]
fn with_w(v: Vec3, w: f32) -> [f32; 4] {
    [v.x, v.y, v.z, w]
}

fn scene_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    frag_entry: &str,
    blend: Option<wgpu::BlendState>,
    depth_write: bool,
) -> wgpu::RenderPipeline {
    let buffers = meshes::vertex_layouts();
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(frag_entry),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: Some(wgpu::DepthStencilState {
            format: helpers::DEPTH_FORMAT,
            depth_write_enabled: depth_write,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(frag_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format: helpers::HDR_FORMAT,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

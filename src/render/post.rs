use super::helpers;
use super::targets::RenderTargets;
use crate::constants::*;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    resolution: [f32; 2],
    time: f32,
    threshold: f32,
    blur_dir: [f32; 2],
    bloom_intensity: f32,
    exposure: f32,
    vignette: [f32; 2],
    noise_opacity: f32,
    _pad: f32,
}

impl PostUniforms {
    fn new(resolution: [f32; 2], time: f32, blur_dir: [f32; 2]) -> Self {
        Self {
            resolution,
            time,
            threshold: BLOOM_THRESHOLD,
            blur_dir,
            bloom_intensity: BLOOM_INTENSITY,
            exposure: TONE_EXPOSURE,
            vignette: [VIGNETTE_OFFSET, VIGNETTE_DARKNESS],
            noise_opacity: NOISE_OPACITY,
            _pad: 0.0,
        }
    }
}

/// One uniform buffer per pass, so every pass in an encoder sees its own values.
pub(crate) struct PassUniforms {
    bright: wgpu::Buffer,
    blur_h: wgpu::Buffer,
    blur_v: wgpu::Buffer,
    composite: wgpu::Buffer,
}

pub(crate) struct PostResources {
    bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    bgl1: wgpu::BindGroupLayout, // tex+sampler
    uniforms: PassUniforms,
    bright_pipeline: wgpu::RenderPipeline,
    blur_pipeline: wgpu::RenderPipeline,
    composite_pipeline: wgpu::RenderPipeline,
}

/// Bind groups that reference the current render targets.
pub(crate) struct PostBindGroups {
    bright: wgpu::BindGroup,
    blur_h: wgpu::BindGroup,
    blur_v: wgpu::BindGroup,
    composite: wgpu::BindGroup,
    bloom: wgpu::BindGroup,
}

fn uniform_buffer(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<PostUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

pub(crate) fn create_post_resources(
    device: &wgpu::Device,
    post_shader: &wgpu::ShaderModule,
    swap_format: wgpu::TextureFormat,
) -> PostResources {
    let [tex0, samp0] = helpers::texture_layout_entries(0);
    let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl0"),
        entries: &[
            tex0,
            samp0,
            helpers::uniform_layout_entry(2, wgpu::ShaderStages::FRAGMENT),
        ],
    });
    let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl1"),
        entries: &helpers::texture_layout_entries(0),
    });
    let pl_bright_blur = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_0"),
        bind_group_layouts: &[&bgl0],
        push_constant_ranges: &[],
    });
    let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_comp"),
        bind_group_layouts: &[&bgl0, &bgl1],
        push_constant_ranges: &[],
    });
    let bright_pipeline = helpers::make_post_pipeline(
        device,
        "bright_pipeline",
        &pl_bright_blur,
        post_shader,
        "fs_bright",
        helpers::HDR_FORMAT,
    );
    let blur_pipeline = helpers::make_post_pipeline(
        device,
        "blur_pipeline",
        &pl_bright_blur,
        post_shader,
        "fs_blur",
        helpers::HDR_FORMAT,
    );
    let composite_pipeline = helpers::make_post_pipeline(
        device,
        "composite_pipeline",
        &pl_composite,
        post_shader,
        "fs_composite",
        swap_format,
    );

    PostResources {
        bgl0,
        bgl1,
        uniforms: PassUniforms {
            bright: uniform_buffer(device, "post_bright"),
            blur_h: uniform_buffer(device, "post_blur_h"),
            blur_v: uniform_buffer(device, "post_blur_v"),
            composite: uniform_buffer(device, "post_composite"),
        },
        bright_pipeline,
        blur_pipeline,
        composite_pipeline,
    }
}

impl PostResources {
    fn source_group(
        &self,
        device: &wgpu::Device,
        label: &str,
        view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
        uniforms: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.bgl0,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniforms.as_entire_binding(),
                },
            ],
        })
    }

    pub(crate) fn bind_groups(
        &self,
        device: &wgpu::Device,
        sampler: &wgpu::Sampler,
        targets: &RenderTargets,
    ) -> PostBindGroups {
        let u = &self.uniforms;
        PostBindGroups {
            bright: self.source_group(device, "bg_bright", &targets.hdr_view, sampler, &u.bright),
            blur_h: self.source_group(device, "bg_blur_h", &targets.bloom_a_view, sampler, &u.blur_h),
            blur_v: self.source_group(device, "bg_blur_v", &targets.bloom_b_view, sampler, &u.blur_v),
            composite: self.source_group(
                device,
                "bg_composite",
                &targets.hdr_view,
                sampler,
                &u.composite,
            ),
            bloom: device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("bg_bloom_a_only"),
                layout: &self.bgl1,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&targets.bloom_a_view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                ],
            }),
        }
    }

    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, width: u32, height: u32, time: f32) {
        let (bw, bh) = RenderTargets::bloom_size(width, height);
        let full = [width as f32, height as f32];
        let half = [bw as f32, bh as f32];
        let u = &self.uniforms;
        let write = |buf: &wgpu::Buffer, v: PostUniforms| queue.write_buffer(buf, 0, bytemuck::bytes_of(&v));
        write(&u.bright, PostUniforms::new(half, time, [0.0, 0.0]));
        write(&u.blur_h, PostUniforms::new(half, time, [1.0, 0.0]));
        write(&u.blur_v, PostUniforms::new(half, time, [0.0, 1.0]));
        write(&u.composite, PostUniforms::new(full, time, [0.0, 0.0]));
    }

    /// Bright pass, two blur passes and the composite onto `output`.
    pub(crate) fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        groups: &PostBindGroups,
        targets: &RenderTargets,
        output: &wgpu::TextureView,
    ) {
        blit(encoder, "bright_pass", &targets.bloom_a_view, &self.bright_pipeline, &groups.bright, None);
        blit(encoder, "blur_h", &targets.bloom_b_view, &self.blur_pipeline, &groups.blur_h, None);
        blit(encoder, "blur_v", &targets.bloom_a_view, &self.blur_pipeline, &groups.blur_v, None);
        blit(
            encoder,
            "composite",
            output,
            &self.composite_pipeline,
            &groups.composite,
            Some(&groups.bloom),
        );
    }
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
}

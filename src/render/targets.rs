use super::helpers;

/// Offscreen targets for one frame.
///
/// - `hdr_*` hold the scene colour in Rgba16Float for post-processing, with
///   a matching depth buffer.
/// - `bloom_*` are half-res ping-pong buffers for the bright pass and blur.
pub(crate) struct RenderTargets {
    pub(crate) hdr_tex: wgpu::Texture,
    pub(crate) hdr_view: wgpu::TextureView,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
    pub(crate) bloom_a: wgpu::Texture,
    pub(crate) bloom_a_view: wgpu::TextureView,
    pub(crate) bloom_b: wgpu::Texture,
    pub(crate) bloom_b_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (hdr_tex, hdr_view) = helpers::create_color_target(device, "hdr_tex", width, height);
        let (depth_tex, depth_view) = helpers::create_depth_target(device, width, height);
        let (bw, bh) = Self::bloom_size(width, height);
        let (bloom_a, bloom_a_view) = helpers::create_color_target(device, "bloom_a", bw, bh);
        let (bloom_b, bloom_b_view) = helpers::create_color_target(device, "bloom_b", bw, bh);
        Self {
            hdr_tex,
            hdr_view,
            depth_tex,
            depth_view,
            bloom_a,
            bloom_a_view,
            bloom_b,
            bloom_b_view,
        }
    }

    pub(crate) fn bloom_size(width: u32, height: u32) -> (u32, u32) {
        ((width.max(1) / 2).max(1), (height.max(1) / 2).max(1))
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        for tex in [&self.hdr_tex, &self.depth_tex, &self.bloom_a, &self.bloom_b] {
            tex.destroy();
        }
        *self = Self::new(device, width, height);
    }
}

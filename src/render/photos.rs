use super::helpers;
use crate::constants::PLACARD_EMPTY_RGB;
use tree_core::constants::MAX_PHOTOS;
use web_sys as web;

struct PhotoSlot {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// GPU copies of uploaded photos, indexed like the photo queue. Placards
/// without a photo bind a 1x1 placeholder.
pub(crate) struct PhotoTextures {
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    placeholder: wgpu::BindGroup,
    slots: Vec<Option<PhotoSlot>>,
}

impl PhotoTextures {
    pub(crate) fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("photo_bgl"),
            entries: &helpers::texture_layout_entries(0),
        });
        let sampler = helpers::linear_sampler(device, "photo_sampler");

        let (tex, view) = helpers::create_texture(
            device,
            "photo_placeholder",
            1,
            1,
            helpers::PHOTO_FORMAT,
            wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        );
        let rgba = PLACARD_EMPTY_RGB.map(|c| (c.clamp(0.0, 1.0) * 255.0) as u8);
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &tex,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &[rgba[0], rgba[1], rgba[2], 255],
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4),
                rows_per_image: Some(1),
            },
            wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
        );
        let placeholder = Self::group(device, &layout, &sampler, &view, "photo_placeholder");

        Self {
            layout,
            sampler,
            placeholder,
            slots: (0..MAX_PHOTOS).map(|_| None).collect(),
        }
    }

    fn group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        view: &wgpu::TextureView,
        label: &str,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    pub(crate) fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub(crate) fn placeholder(&self) -> &wgpu::BindGroup {
        &self.placeholder
    }

    /// Texture group for a placard's photo, or the placeholder.
    pub(crate) fn bind_group(&self, photo: Option<usize>) -> &wgpu::BindGroup {
        photo
            .and_then(|i| self.slots.get(i))
            .and_then(|slot| slot.as_ref())
            .map_or(&self.placeholder, |slot| &slot.bind_group)
    }

    /// Copy a decoded bitmap into slot `index`. Returns false when the
    /// index is outside the queue.
    pub(crate) fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        index: usize,
        bitmap: &web::ImageBitmap,
    ) -> bool {
        if index >= self.slots.len() {
            return false;
        }
        let (width, height) = (bitmap.width().max(1), bitmap.height().max(1));
        let side = width.min(height);
        let label = format!("photo_{}", index);
        let (texture, view) = helpers::create_photo_texture(device, &label, side);
        queue.copy_external_image_to_texture(
            &wgpu::CopyExternalImageSourceInfo {
                source: wgpu::ExternalImageSource::ImageBitmap(bitmap.clone()),
                origin: wgpu::Origin2d::ZERO,
                flip_y: false,
            },
            wgpu::CopyExternalImageDestInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
                color_space: wgpu::PredefinedColorSpace::Srgb,
                premultiplied_alpha: false,
            },
            wgpu::Extent3d {
                width: side,
                height: side,
                depth_or_array_layers: 1,
            },
        );
        let bind_group = Self::group(device, &self.layout, &self.sampler, &view, &label);
        if let Some(old) = self.slots[index].replace(PhotoSlot { texture, bind_group }) {
            old.texture.destroy();
        }
        log::info!("[render] photo {} uploaded ({}px)", index, side);
        true
    }
}

use crate::coords::PixelSize;

/// Offscreen render target the gradient is drawn into and read back from.
///
/// Rows are stored bottom-up (row 0 is the scene's bottom edge), the same as
/// a GL framebuffer; see `shaders/gradient.wgsl`.
pub(crate) struct BackingStore {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    size: PixelSize,
}

impl BackingStore {
    pub(crate) fn new(
        device: &wgpu::Device,
        size: PixelSize,
        format: wgpu::TextureFormat,
        label: &str,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view, size }
    }

    #[inline]
    pub(crate) fn size(&self) -> PixelSize {
        self.size
    }

    #[inline]
    pub(crate) fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    #[inline]
    pub(crate) fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Frees GPU memory now instead of when the last reference drops.
    pub(crate) fn destroy(self) {
        drop(self.view);
        self.texture.destroy();
    }
}

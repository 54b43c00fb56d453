/// Renderer-facing context (device + queue).
///
/// This is intentionally small and stable. Build it with
/// [`Gpu::render_ctx`](crate::device::Gpu::render_ctx), or directly when the
/// host owns its own wgpu device.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    /// Snapshot of the device-lost flag; renderers refuse to draw when set.
    pub context_lost: bool,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(device: &'a wgpu::Device, queue: &'a wgpu::Queue) -> Self {
        Self {
            device,
            queue,
            context_lost: false,
        }
    }

    #[inline]
    pub fn with_context_lost(mut self, lost: bool) -> Self {
        self.context_lost = lost;
        self
    }
}

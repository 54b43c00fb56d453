use meshgrad_gen::AnchorPoint;
use wgpu::util::DeviceExt;

use crate::coords::{CanvasSize, PixelSize, Viewport};
use crate::export;

use super::backing::BackingStore;
use super::common::{
    uniform_min_binding_size, GradientUniform, QuadVertex, FULLSCREEN_QUAD, MAX_ANCHORS,
};
use super::readback::read_rgba8;
use super::shader::{check_wgsl, GRADIENT_WGSL};
use super::{RenderCtx, RenderError};

/// Renderer settings fixed at [`GradientRenderer::create`].
#[derive(Debug, Clone, Copy)]
pub struct RendererConfig {
    /// Backing-store format. Only the 8-bit RGBA formats are readable back;
    /// anything else falls back to `Rgba8Unorm`.
    pub format: wgpu::TextureFormat,

    /// Cleared to before every draw. The gradient covers every pixel, so this
    /// only shows if the draw itself is skipped.
    pub clear_color: wgpu::Color,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            format: wgpu::TextureFormat::Rgba8Unorm,
            clear_color: wgpu::Color::BLACK,
        }
    }
}

impl RendererConfig {
    fn readable_format(self) -> wgpu::TextureFormat {
        match self.format {
            f @ (wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb) => f,
            other => {
                log::warn!("backing-store format {other:?} is not readable back, using Rgba8Unorm");
                wgpu::TextureFormat::Rgba8Unorm
            }
        }
    }
}

/// Draws the inverse-distance-weighted gradient of a set of anchors.
///
/// Owns its pipeline, buffers and backing store. All of them are released by
/// [`destroy`](Self::destroy), which `Drop` also calls; a destroyed renderer
/// answers every later call with [`RenderError::ContextUnavailable`].
pub struct GradientRenderer {
    config: RendererConfig,

    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    uniform_ubo: Option<wgpu::Buffer>,
    quad_vbo: Option<wgpu::Buffer>,

    backing: Option<BackingStore>,
    canvas: CanvasSize,

    warned_anchor_cap: bool,
}

impl GradientRenderer {
    /// Validates the shader, then builds the pipeline and static buffers.
    ///
    /// The backing store is created lazily by the first draw.
    pub fn create(ctx: &RenderCtx<'_>, config: RendererConfig) -> Result<Self, RenderError> {
        if ctx.context_lost {
            return Err(RenderError::ContextUnavailable("device lost".into()));
        }
        check_wgsl("meshgrad gradient shader", GRADIENT_WGSL)?;

        let config = RendererConfig {
            format: config.readable_format(),
            ..config
        };
        let mut renderer = Self {
            config,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            uniform_ubo: None,
            quad_vbo: None,
            backing: None,
            canvas: CanvasSize::default(),
            warned_anchor_cap: false,
        };
        renderer.ensure_pipeline(ctx);
        renderer.ensure_static_buffers(ctx);
        renderer.ensure_bindings(ctx);

        log::debug!("gradient renderer created ({:?})", config.format);
        Ok(renderer)
    }

    /// Releases every GPU resource. Idempotent.
    pub fn destroy(&mut self) {
        if self.pipeline.is_none() {
            return;
        }
        self.pipeline = None;
        self.bind_group = None;
        self.bind_group_layout = None;
        if let Some(ubo) = self.uniform_ubo.take() {
            ubo.destroy();
        }
        if let Some(vbo) = self.quad_vbo.take() {
            vbo.destroy();
        }
        if let Some(backing) = self.backing.take() {
            backing.destroy();
        }
        self.canvas = CanvasSize::default();
        log::debug!("gradient renderer destroyed");
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.pipeline.is_none()
    }

    #[inline]
    pub fn config(&self) -> RendererConfig {
        self.config
    }

    /// Current backing-store size, or `None` before the first draw.
    pub fn pixel_size(&self) -> Option<PixelSize> {
        self.backing.as_ref().map(BackingStore::size)
    }

    /// Canvas of the last draw or resize.
    #[inline]
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// Makes the backing store match `canvas.pixels`.
    ///
    /// Returns `true` when the store was (re)allocated. Anchor positions are
    /// not touched; rescaling them is the caller's job.
    pub fn sync_size(&mut self, ctx: &RenderCtx<'_>, canvas: CanvasSize) -> Result<bool, RenderError> {
        self.check_live(ctx)?;
        check_canvas(ctx, canvas)?;
        self.canvas = canvas;

        if self.pixel_size() == Some(canvas.pixels) {
            return Ok(false);
        }
        if let Some(old) = self.backing.take() {
            old.destroy();
        }
        self.backing = Some(BackingStore::new(
            ctx.device,
            canvas.pixels,
            self.config.format,
            "meshgrad backing store",
        ));
        log::info!(
            "backing store resized to {}x{} (display {}x{})",
            canvas.pixels.width,
            canvas.pixels.height,
            canvas.display.width,
            canvas.display.height,
        );
        Ok(true)
    }

    /// Renders `points` into the backing store, resizing it to `canvas` first.
    pub fn draw(
        &mut self,
        ctx: &RenderCtx<'_>,
        points: &[AnchorPoint],
        canvas: CanvasSize,
    ) -> Result<(), RenderError> {
        self.check_anchors(points)?;
        self.sync_size(ctx, canvas)?;

        let Some(backing) = self.backing.as_ref() else {
            return Err(RenderError::ContextUnavailable("no backing store".into()));
        };
        self.encode_draw(ctx, backing.view(), points, canvas)
    }

    /// Reads the backing store back as tightly packed RGBA8.
    ///
    /// Rows come out bottom-up: row 0 is the bottom of the image.
    pub fn read_pixels(&self, ctx: &RenderCtx<'_>) -> Result<(PixelSize, Vec<u8>), RenderError> {
        self.check_live(ctx)?;
        let Some(backing) = self.backing.as_ref() else {
            return Err(RenderError::Readback("nothing has been drawn yet".into()));
        };
        let pixels = read_rgba8(ctx, backing.texture(), backing.size())?;
        Ok((backing.size(), pixels))
    }

    /// Draws `points` and returns the result as PNG bytes.
    ///
    /// Before the first draw the canvas is sized from `container * dpr`;
    /// afterwards the existing backing-store resolution is kept. Failures are
    /// logged and reported as `None`.
    pub fn export_png(
        &mut self,
        ctx: &RenderCtx<'_>,
        points: &[AnchorPoint],
        container: Viewport,
        device_pixel_ratio: f32,
    ) -> Option<Vec<u8>> {
        let canvas = match self.pixel_size() {
            None => CanvasSize::from_display(container, device_pixel_ratio),
            Some(pixels) => CanvasSize::new(container, pixels),
        };

        match self.try_export(ctx, points, canvas) {
            Ok(png) => {
                log::info!(
                    "exported {}x{} PNG ({} bytes)",
                    canvas.pixels.width,
                    canvas.pixels.height,
                    png.len()
                );
                Some(png)
            }
            Err(err) => {
                log::error!("PNG export failed: {err:#}");
                None
            }
        }
    }

    /// Renders into a temporary target of `canvas.pixels` and returns
    /// top-down RGBA8 rows. The live backing store is left alone.
    pub fn render_offscreen(
        &mut self,
        ctx: &RenderCtx<'_>,
        points: &[AnchorPoint],
        canvas: CanvasSize,
    ) -> Result<Vec<u8>, RenderError> {
        self.check_anchors(points)?;
        self.check_live(ctx)?;
        check_canvas(ctx, canvas)?;

        let target = BackingStore::new(
            ctx.device,
            canvas.pixels,
            self.config.format,
            "meshgrad offscreen target",
        );
        let result = self
            .encode_draw(ctx, target.view(), points, canvas)
            .and_then(|()| read_rgba8(ctx, target.texture(), canvas.pixels));
        target.destroy();

        let image = export::bottom_up_to_image(canvas.pixels, result?)
            .map_err(|err| RenderError::Readback(format!("{err:#}")))?;
        Ok(image.into_raw())
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn try_export(
        &mut self,
        ctx: &RenderCtx<'_>,
        points: &[AnchorPoint],
        canvas: CanvasSize,
    ) -> anyhow::Result<Vec<u8>> {
        self.draw(ctx, points, canvas)?;
        let (size, pixels) = self.read_pixels(ctx)?;
        let image = export::bottom_up_to_image(size, pixels)?;
        export::encode_png(&image)
    }

    fn check_live(&self, ctx: &RenderCtx<'_>) -> Result<(), RenderError> {
        if self.is_destroyed() {
            return Err(RenderError::ContextUnavailable("renderer destroyed".into()));
        }
        if ctx.context_lost {
            return Err(RenderError::ContextUnavailable("device lost".into()));
        }
        Ok(())
    }

    fn check_anchors(&mut self, points: &[AnchorPoint]) -> Result<(), RenderError> {
        if points.is_empty() {
            return Err(RenderError::EmptyAnchorSet);
        }
        if points.len() > MAX_ANCHORS && !self.warned_anchor_cap {
            log::warn!(
                "{} anchors given; only the first {MAX_ANCHORS} are rendered",
                points.len()
            );
            self.warned_anchor_cap = true;
        }
        Ok(())
    }

    fn encode_draw(
        &self,
        ctx: &RenderCtx<'_>,
        target: &wgpu::TextureView,
        points: &[AnchorPoint],
        canvas: CanvasSize,
    ) -> Result<(), RenderError> {
        let (Some(pipeline), Some(bind_group), Some(ubo), Some(quad_vbo)) = (
            self.pipeline.as_ref(),
            self.bind_group.as_ref(),
            self.uniform_ubo.as_ref(),
            self.quad_vbo.as_ref(),
        ) else {
            return Err(RenderError::ContextUnavailable("renderer destroyed".into()));
        };

        ctx.queue
            .write_buffer(ubo, 0, bytemuck::bytes_of(&GradientUniform::pack(points, canvas)));

        let mut encoder = ctx.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("meshgrad gradient encoder"),
        });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("meshgrad gradient pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.config.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, bind_group, &[]);
            rpass.set_vertex_buffer(0, quad_vbo.slice(..));
            rpass.draw(0..FULLSCREEN_QUAD.len() as u32, 0..1);
        }
        ctx.queue.submit(std::iter::once(encoder.finish()));

        log::trace!(
            "drew {} anchors at {}x{}",
            points.len().min(MAX_ANCHORS),
            canvas.pixels.width,
            canvas.pixels.height
        );
        Ok(())
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("meshgrad gradient shader"),
            source: wgpu::ShaderSource::Wgsl(GRADIENT_WGSL.into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("meshgrad gradient bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: Some(uniform_min_binding_size()),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("meshgrad gradient pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("meshgrad gradient pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.uniform_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.uniform_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let uniform_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("meshgrad gradient ubo"),
            size: std::mem::size_of::<GradientUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("meshgrad gradient bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_ubo.as_entire_binding(),
            }],
        });

        self.uniform_ubo = Some(uniform_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("meshgrad gradient quad vbo"),
            contents: bytemuck::cast_slice(&FULLSCREEN_QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        }));
    }
}

impl Drop for GradientRenderer {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Rejects empty or non-finite canvases and sizes the device cannot allocate.
fn check_canvas(ctx: &RenderCtx<'_>, canvas: CanvasSize) -> Result<(), RenderError> {
    let invalid = || RenderError::InvalidDimensions {
        width: canvas.display.width,
        height: canvas.display.height,
    };
    if !canvas.is_valid() {
        return Err(invalid());
    }
    let max = ctx.device.limits().max_texture_dimension_2d;
    if canvas.pixels.width > max || canvas.pixels.height > max {
        log::warn!(
            "{}x{} exceeds the device texture limit of {max}",
            canvas.pixels.width,
            canvas.pixels.height
        );
        return Err(invalid());
    }
    Ok(())
}

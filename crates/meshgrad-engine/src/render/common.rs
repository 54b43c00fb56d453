//! GPU-side data layouts shared by the gradient pipeline.

use bytemuck::{Pod, Zeroable};
use meshgrad_gen::AnchorPoint;

use crate::coords::{CanvasSize, Viewport};

/// Hard cap on anchors the shader reads. Must match `MAX_ANCHORS` in
/// `shaders/gradient.wgsl`.
pub const MAX_ANCHORS: usize = 16;

// ── gradient uniform ──────────────────────────────────────────────────────

/// Uniform buffer layout (528 bytes):
///
///  offset   0  resolution  [f32; 2]        backing-store pixels
///  offset   8  count       u32             active anchors, ≤ 16
///  offset  12  _pad        u32
///  offset  16  colors      [[f32; 4]; 16]  rgb in 0..1, w unused
///  offset 272  positions   [[f32; 4]; 16]  uv in xy, zw unused
///
/// Arrays use vec4 slots because uniform arrays have a 16-byte stride.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct GradientUniform {
    pub resolution: [f32; 2],
    pub count: u32,
    pub _pad: u32,
    pub colors: [[f32; 4]; MAX_ANCHORS],
    pub positions: [[f32; 4]; MAX_ANCHORS],
}

impl GradientUniform {
    /// Packs `points` for `canvas`. Slots past the active count stay zero;
    /// points past [`MAX_ANCHORS`] are dropped.
    pub fn pack(points: &[AnchorPoint], canvas: CanvasSize) -> Self {
        let mut u = Self::zeroed();
        u.resolution = [canvas.pixels.width as f32, canvas.pixels.height as f32];

        let active = &points[..points.len().min(MAX_ANCHORS)];
        u.count = active.len() as u32;

        for (i, p) in active.iter().enumerate() {
            let [r, g, b] = p.color.to_normalized();
            let [s, t] = anchor_uv(p, canvas.display);
            u.colors[i] = [r, g, b, 0.0];
            u.positions[i] = [s, t, 0.0, 0.0];
        }
        u
    }
}

/// Display-space pixel position to shader UV: `(x / w, 1 - y / h)`.
#[inline]
pub(crate) fn anchor_uv(p: &AnchorPoint, display: Viewport) -> [f32; 2] {
    [p.x / display.width, 1.0 - p.y / display.height]
}

/// Returns the `wgpu` minimum binding size for the gradient uniform buffer.
pub(crate) fn uniform_min_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<GradientUniform>() as u64)
        .expect("GradientUniform has non-zero size by construction")
}

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct QuadVertex {
    pub pos: [f32; 2], // clip space, -1..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Two triangles covering the whole viewport.
pub(crate) const FULLSCREEN_QUAD: [QuadVertex; 6] = [
    QuadVertex { pos: [-1.0, -1.0] },
    QuadVertex { pos: [1.0, -1.0] },
    QuadVertex { pos: [-1.0, 1.0] },
    QuadVertex { pos: [-1.0, 1.0] },
    QuadVertex { pos: [1.0, -1.0] },
    QuadVertex { pos: [1.0, 1.0] },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::PixelSize;
    use meshgrad_gen::Rgb8;

    fn canvas() -> CanvasSize {
        CanvasSize::new(Viewport::new(200.0, 100.0), PixelSize::new(400, 200))
    }

    #[test]
    fn layout_is_528_bytes() {
        assert_eq!(std::mem::size_of::<GradientUniform>(), 528);
        assert_eq!(std::mem::offset_of!(GradientUniform, colors), 16);
        assert_eq!(std::mem::offset_of!(GradientUniform, positions), 272);
    }

    #[test]
    fn pack_uses_pixel_resolution_and_display_uv() {
        let p = AnchorPoint::new(50.0, 25.0, 10.0, Rgb8::new(255, 0, 51));
        let u = GradientUniform::pack(&[p], canvas());

        assert_eq!(u.resolution, [400.0, 200.0]);
        assert_eq!(u.count, 1);
        assert_eq!(u.positions[0], [0.25, 0.75, 0.0, 0.0]);
        assert_eq!(u.colors[0], [1.0, 0.0, 0.2, 0.0]);
    }

    #[test]
    fn unused_slots_are_zero() {
        let p = AnchorPoint::new(1.0, 1.0, 1.0, Rgb8::WHITE);
        let u = GradientUniform::pack(&[p, p], canvas());
        assert!(u.colors[2..].iter().all(|c| *c == [0.0; 4]));
        assert!(u.positions[2..].iter().all(|c| *c == [0.0; 4]));
    }

    #[test]
    fn anchors_past_cap_are_dropped() {
        let pts: Vec<_> = (0..20)
            .map(|i| AnchorPoint::new(i as f32, 0.0, 1.0, Rgb8::WHITE))
            .collect();
        let u = GradientUniform::pack(&pts, canvas());
        assert_eq!(u.count as usize, MAX_ANCHORS);
        assert_eq!(u.positions[15][0], 15.0 / 200.0);
    }

    #[test]
    fn top_edge_maps_to_v_one() {
        let p = AnchorPoint::new(0.0, 0.0, 1.0, Rgb8::BLACK);
        assert_eq!(anchor_uv(&p, Viewport::new(10.0, 10.0)), [0.0, 1.0]);
    }
}
